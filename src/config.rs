use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Filename looked up in the working directory when no config is given.
pub const CONFIG_FILENAME: &str = "partitura.toml";

/// Partitura project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartituraConfig {
    /// Table builder settings
    #[serde(default)]
    pub reporter: ReporterConfig,

    /// Tabular import settings
    #[serde(default)]
    pub importer: ImporterConfig,
}

/// Inputs and outputs of the table build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Directory holding the project documents
    pub projects_dir: PathBuf,

    /// Page template carrying the injection anchors
    pub template_path: PathBuf,

    /// Where the built page is written
    pub output_html: PathBuf,

    /// Where the flat snapshot is written
    pub output_csv: PathBuf,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("./projects"),
            template_path: PathBuf::from("./docs/template.html"),
            output_html: PathBuf::from("./docs/index.html"),
            output_csv: PathBuf::from("./docs/table.csv"),
        }
    }
}

/// Inputs and outputs of the tabular import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// Tabular export to read rows from
    pub csv_path: PathBuf,

    /// Document template cloned for every row
    pub template_path: PathBuf,

    /// Directory the generated documents land in
    pub output_dir: PathBuf,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("./misc/evaluations.csv"),
            template_path: PathBuf::from("./projects/_template.yaml"),
            output_dir: PathBuf::from("./projects"),
        }
    }
}

impl PartituraConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the effective configuration. An explicit path must load;
    /// otherwise `partitura.toml` is picked up from the working directory
    /// when present, and the defaults apply when it is not.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        match path {
            Some(path) => {
                Self::load(path).with_context(|| format!("loading config {}", path.display()))
            }
            None => {
                let fallback = Path::new(CONFIG_FILENAME);
                if fallback.exists() {
                    Self::load(fallback)
                        .with_context(|| format!("loading config {}", fallback.display()))
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
