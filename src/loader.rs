/// Evaluation document discovery and loading
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::types::{ProjectDoc, ProjectRecord};

/// Find evaluation documents directly under `projects_dir`: `.yaml` files
/// only, template files excluded, sorted by path so every downstream step
/// sees a stable order.
pub fn discover_documents(projects_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(projects_dir).min_depth(1).max_depth(1) {
        let entry = entry
            .with_context(|| format!("reading projects directory {}", projects_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
            continue;
        }
        if entry.file_name().to_string_lossy().contains("_template") {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Load every discovered document into a record list.
///
/// Faults are isolated per file: unreadable or unparseable documents are
/// skipped with a warning and do not abort the run. Documents without a
/// project name are dropped. When two documents claim the same project
/// name, the later file (in path order) wins and replaces the earlier
/// record in place.
pub fn load_records(projects_dir: &Path) -> Result<Vec<ProjectRecord>> {
    let files = discover_documents(projects_dir)?;
    info!("found {} evaluation documents", files.len());

    let mut records: Vec<ProjectRecord> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for path in &files {
        let doc = match read_document(path) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("skipping {}: {err:#}", path.display());
                continue;
            }
        };

        if doc.project.name.is_empty() {
            warn!("skipping {}: document has no project name", path.display());
            continue;
        }

        let source_file = source_name(path);
        match by_name.get(&doc.project.name) {
            Some(&index) => {
                warn!(
                    "duplicate project name {:?}: {} replaces {}",
                    doc.project.name, source_file, records[index].source_file
                );
                records[index] = ProjectRecord { doc, source_file };
            }
            None => {
                by_name.insert(doc.project.name.clone(), records.len());
                records.push(ProjectRecord { doc, source_file });
            }
        }
    }

    Ok(records)
}

fn read_document(path: &Path) -> Result<ProjectDoc> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: ProjectDoc =
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(doc)
}

/// Path recorded in the CSV snapshot. Relative discovery under the working
/// directory drops the leading dot, keeping the historical `/projects/...`
/// form; other paths are recorded as-is.
fn source_name(path: &Path) -> String {
    let display = path.to_string_lossy();
    match display.strip_prefix("./") {
        Some(rest) => format!("/{rest}"),
        None => display.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn doc(name: &str) -> String {
        format!("project:\n  name: {name}\nadaptability:\n  hardware_requirements:\n    value: high\n    notes: ''\n")
    }

    #[test]
    fn test_discovery_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "zeta.yaml", &doc("Zeta"));
        write(temp.path(), "alpha.yaml", &doc("Alpha"));
        write(temp.path(), "_template.yaml", &doc(""));
        write(temp.path(), "notes.txt", "not a document");
        write(temp.path(), "alpha.yml", &doc("WrongExtension"));
        fs::create_dir(temp.path().join("nested")).unwrap();
        write(&temp.path().join("nested"), "deep.yaml", &doc("Deep"));

        let files = discover_documents(temp.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.yaml", "zeta.yaml"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        assert!(discover_documents(&missing).is_err());
    }

    #[test]
    fn test_malformed_document_is_isolated() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.yaml", &doc("Good"));
        write(temp.path(), "broken.yaml", "project: [unclosed");

        let records = load_records(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].doc.project.name, "Good");
    }

    #[test]
    fn test_unnamed_document_is_dropped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "anon.yaml", "project:\n  name: ''\n");
        write(temp.path(), "named.yaml", &doc("Named"));

        let records = load_records(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].doc.project.name, "Named");
    }

    #[test]
    fn test_duplicate_name_last_wins_in_place() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "a.yaml",
            "project:\n  name: Dup\n  affiliation: FirstLab\n",
        );
        write(temp.path(), "m.yaml", &doc("Middle"));
        write(
            temp.path(),
            "z.yaml",
            "project:\n  name: Dup\n  affiliation: SecondLab\n",
        );

        let records = load_records(temp.path()).unwrap();
        assert_eq!(records.len(), 2);
        // the duplicate keeps its original position but carries the later data
        assert_eq!(records[0].doc.project.name, "Dup");
        assert_eq!(records[0].doc.project.affiliation, "SecondLab");
        assert!(records[0].source_file.ends_with("z.yaml"));
        assert_eq!(records[1].doc.project.name, "Middle");
    }

    #[test]
    fn test_source_name_strips_leading_dot() {
        assert_eq!(
            source_name(Path::new("./projects/alpha.yaml")),
            "/projects/alpha.yaml"
        );
        assert_eq!(
            source_name(Path::new("/abs/projects/alpha.yaml")),
            "/abs/projects/alpha.yaml"
        );
    }

    #[test]
    fn test_nulls_and_missing_fields_load_as_empty() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "sparse.yaml",
            "project:\n  name: Sparse\n  link:\nusability:\n  community_support:\n    value: partial\n    notes:\n    tags: live coding\n",
        );

        let records = load_records(temp.path()).unwrap();
        let doc = &records[0].doc;
        assert_eq!(doc.project.link, "");
        assert_eq!(doc.usability.community_support.value, "partial");
        assert_eq!(doc.usability.community_support.notes, "");
        assert_eq!(
            doc.usability.community_support.tags.as_deref(),
            Some("live coding")
        );
        assert_eq!(doc.adaptability.hardware_requirements.value, "");
    }
}
