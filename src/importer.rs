/// Tabular export ingestion: one structured document per spreadsheet row
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::ImporterConfig;
use crate::schema;
use crate::types::ProjectDoc;

/// Comment banner written ahead of every generated document.
const DOCUMENT_BANNER: &str = r"---
####################################################################################################################################
# Generative music AI evaluation
# A musician-centered evaluation of generative music AI systems
####################################################################################################################################

";

/// Normalize a spreadsheet cell to the document value vocabulary. Symbols
/// map to levels; anything unrecognized passes through trimmed.
pub fn normalize_value(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "" => String::new(),
        "✓" => "high".to_string(),
        "~" => "partial".to_string(),
        "✗" | "✘" => "low".to_string(),
        other => other.to_string(),
    }
}

/// File stem for a project document: lower-cased name, spaces as hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Import every row of the tabular export, writing one document per
/// project into the output directory. Existing documents with the same
/// slug are overwritten. Returns the written paths in row order.
pub fn run_import(config: &ImporterConfig) -> Result<Vec<PathBuf>> {
    let template = load_template(&config.template_path)?;

    let mut reader = csv::Reader::from_path(&config.csv_path)
        .with_context(|| format!("reading {}", config.csv_path.display()))?;
    let headers = reader.headers()?.clone();
    let columns: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();
    info!("importing from {}", config.csv_path.display());

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let mut written = Vec::new();
    for result in reader.records() {
        let row = result.with_context(|| format!("reading {}", config.csv_path.display()))?;

        let mut doc = template.clone();
        doc.project.name = cell(&columns, &row, "Name").trim().to_string();
        doc.project.affiliation = cell(&columns, &row, "Affiliation(s)").to_string();
        doc.project.architecture = cell(&columns, &row, "Model Architecture").to_string();
        doc.project.applications = cell(&columns, &row, "Musical Applications").to_string();
        // the export carries neither of these
        doc.project.link = String::new();
        doc.project.notes = String::new();

        for criterion in &schema::CRITERIA {
            let value = normalize_value(cell(
                &columns,
                &row,
                &format!("{} {}", criterion.csv_prefix, criterion.csv_title),
            ));
            let notes =
                cell(&columns, &row, &format!("{} Notes", criterion.csv_prefix)).to_string();
            let tags = criterion.has_tags.then(|| {
                cell(&columns, &row, &format!("{} Tags", criterion.csv_prefix)).to_string()
            });

            let entry = (criterion.get_mut)(&mut doc);
            entry.value = value;
            entry.notes = notes;
            if tags.is_some() {
                entry.tags = tags;
            }
        }

        let name = doc.project.name.clone();
        if name.is_empty() {
            warn!("row {} has no project name", written.len() + 1);
        }
        println!("Processing: {name}");

        let path = config.output_dir.join(format!("{}.yaml", slugify(&name)));
        write_document(&doc, &path)?;
        println!("YAML file for {name} created successfully.");
        written.push(path);
    }

    Ok(written)
}

/// Look up a row cell by column name; missing columns read as empty.
fn cell<'r>(columns: &HashMap<&str, usize>, row: &'r csv::StringRecord, column: &str) -> &'r str {
    columns
        .get(column)
        .and_then(|&index| row.get(index))
        .unwrap_or("")
}

fn load_template(path: &Path) -> Result<ProjectDoc> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    let doc = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing template {}", path.display()))?;
    Ok(doc)
}

fn write_document(doc: &ProjectDoc, path: &Path) -> Result<()> {
    let body = serde_yaml::to_string(doc)?;
    let mut content = String::with_capacity(DOCUMENT_BANNER.len() + body.len());
    content.push_str(DOCUMENT_BANNER);
    content.push_str(&body);
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
