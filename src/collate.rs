/// Tag and application pooling across the scored table
use std::collections::{BTreeMap, BTreeSet};

use crate::schema::{self, CriterionDef, Dimension};
use crate::score::ScoredRecord;

/// Pooled tag vocabulary, per-row qualified tags, and the application set.
#[derive(Debug, Default)]
pub struct Collation {
    criterion_tags: BTreeMap<&'static str, BTreeSet<String>>,
    /// Row annotations parallel to the scored records that produced them.
    pub rows: Vec<RowAnnotations>,
    /// Distinct applications across all projects, lexicographic order.
    pub applications: BTreeSet<String>,
}

/// Per-row payload carried into the table markup.
#[derive(Debug, Default)]
pub struct RowAnnotations {
    /// Qualified `short_id:tag` entries, explicit tags before synthetic,
    /// accumulated in column display order. Duplicates are kept.
    pub tags: Vec<String>,
    pub applications: Vec<String>,
}

impl Collation {
    /// Pooled tags for a criterion, ordered for display: fewest characters
    /// first so the header packs tightly, equal lengths lexicographic.
    pub fn display_tags(&self, criterion: &CriterionDef) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .criterion_tags
            .get(criterion.key)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        tags.sort_by(|a, b| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b)));
        tags
    }

    pub fn has_tags(&self, criterion: &CriterionDef) -> bool {
        self.criterion_tags
            .get(criterion.key)
            .is_some_and(|set| !set.is_empty())
    }

    fn register(&mut self, criterion_key: &'static str, tag: &str) {
        self.criterion_tags
            .entry(criterion_key)
            .or_default()
            .insert(tag.to_owned());
    }
}

/// Build the collation for an already scored and sorted table.
pub fn collate(records: &[ScoredRecord]) -> Collation {
    let mut collation = Collation::default();

    // Register every tag the synthetic rules can produce, so the filter
    // vocabulary stays stable even when no current project triggers them.
    for rule in &schema::SYNTHETIC_TAGS {
        collation.criterion_tags.entry(rule.criterion).or_default();
        for tag in rule.all() {
            collation.register(rule.criterion, tag);
        }
    }

    for scored in records {
        let doc = &scored.record.doc;
        let mut row = RowAnnotations::default();

        for dimension in Dimension::DISPLAY_ORDER {
            for criterion in dimension.criteria() {
                let entry = (criterion.get)(doc);

                if let Some(tags) = entry.tags.as_deref() {
                    for tag in split_list(tags) {
                        row.tags.push(format!("{}:{}", criterion.short_id, tag));
                        collation.register(criterion.key, tag);
                    }
                }

                if let Some(rule) = schema::synthetic_tags(criterion.key) {
                    for tag in rule.for_value(&entry.value) {
                        row.tags.push(format!("{}:{}", criterion.short_id, tag));
                    }
                }
            }
        }

        row.applications = split_list(&doc.project.applications)
            .map(str::to_owned)
            .collect();
        collation
            .applications
            .extend(row.applications.iter().cloned());

        collation.rows.push(row);
    }

    collation
}

/// Split a comma separated field, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Scores, ScoredRecord};
    use crate::types::{ProjectDoc, ProjectRecord};

    fn scored(doc: ProjectDoc) -> ScoredRecord {
        let scores = Scores::compute(&doc);
        ScoredRecord {
            record: ProjectRecord {
                doc,
                source_file: String::new(),
            },
            scores,
        }
    }

    fn criterion(key: &str) -> &'static CriterionDef {
        schema::CRITERIA.iter().find(|c| c.key == key).unwrap()
    }

    #[test]
    fn test_synthetic_vocabulary_registered_without_data() {
        let collation = collate(&[]);
        assert_eq!(
            collation.display_tags(criterion("hardware_requirements")),
            vec!["CPU"]
        );
        assert_eq!(
            collation.display_tags(criterion("dataset_size")),
            vec!["small dataset"]
        );
        assert_eq!(
            collation.display_tags(criterion("realtime_capabilities")),
            vec!["real-time"]
        );
        assert!(!collation.has_tags(criterion("adaptation_pathways")));
    }

    #[test]
    fn test_explicit_tags_pool_across_projects() {
        let mut a = ProjectDoc::default();
        a.project.name = "A".to_string();
        a.adaptability.adaptation_pathways.tags = Some("fine-tuning, LoRA".to_string());
        let mut b = ProjectDoc::default();
        b.project.name = "B".to_string();
        b.adaptability.adaptation_pathways.tags = Some("LoRA, training code".to_string());

        let collation = collate(&[scored(a), scored(b)]);
        assert_eq!(
            collation.display_tags(criterion("adaptation_pathways")),
            vec!["LoRA", "fine-tuning", "training code"]
        );
    }

    #[test]
    fn test_display_tags_sort_by_length_then_lexicographic() {
        let mut doc = ProjectDoc::default();
        doc.usability.community_support.tags = Some("zz, ab, b, long tag".to_string());

        let collation = collate(&[scored(doc)]);
        assert_eq!(
            collation.display_tags(criterion("community_support")),
            vec!["b", "ab", "zz", "long tag"]
        );
    }

    #[test]
    fn test_display_tags_length_counts_characters_not_bytes() {
        let mut doc = ProjectDoc::default();
        doc.usability.community_support.tags = Some("drums, écho".to_string());

        let collation = collate(&[scored(doc)]);
        // "écho" is four characters (five bytes in UTF-8) and sorts ahead
        // of the five-character tag
        assert_eq!(
            collation.display_tags(criterion("community_support")),
            vec!["écho", "drums"]
        );
    }

    #[test]
    fn test_row_tags_are_qualified_and_ordered() {
        let mut doc = ProjectDoc::default();
        doc.project.name = "A".to_string();
        // display order: adaptability, usability, controllability
        doc.controllability.conditioning_inputs.tags = Some("midi".to_string());
        doc.usability.interface_availability.tags = Some("plugin, cli".to_string());
        doc.adaptability.hardware_requirements.value = "high".to_string();

        let collation = collate(&[scored(doc)]);
        assert_eq!(
            collation.rows[0].tags,
            vec![
                "hardware:CPU".to_string(),
                "interface:plugin".to_string(),
                "interface:cli".to_string(),
                "conditioning:midi".to_string(),
            ]
        );
    }

    #[test]
    fn test_row_keeps_duplicate_tags() {
        let mut doc = ProjectDoc::default();
        doc.usability.workflow_integration.tags = Some("daw, daw".to_string());

        let collation = collate(&[scored(doc)]);
        assert_eq!(
            collation.rows[0].tags,
            vec!["workflow:daw".to_string(), "workflow:daw".to_string()]
        );
        // the pooled header set is still deduplicated
        assert_eq!(
            collation.display_tags(criterion("workflow_integration")),
            vec!["daw"]
        );
    }

    #[test]
    fn test_synthetic_tags_only_fire_on_matching_value() {
        let mut doc = ProjectDoc::default();
        doc.usability.realtime_capabilities.value = "partial".to_string();
        let collation = collate(&[scored(doc)]);
        assert!(collation.rows[0].tags.is_empty());

        let mut doc = ProjectDoc::default();
        doc.usability.realtime_capabilities.value = "high".to_string();
        let collation = collate(&[scored(doc)]);
        assert_eq!(collation.rows[0].tags, vec!["realtime:real-time".to_string()]);
    }

    #[test]
    fn test_applications_pool_sorted_and_deduplicated() {
        let mut a = ProjectDoc::default();
        a.project.applications = "sound design, melody generation".to_string();
        let mut b = ProjectDoc::default();
        b.project.applications = "accompaniment, sound design".to_string();

        let collation = collate(&[scored(a), scored(b)]);
        let pooled: Vec<&str> = collation.applications.iter().map(String::as_str).collect();
        assert_eq!(
            pooled,
            vec!["accompaniment", "melody generation", "sound design"]
        );
        assert_eq!(
            collation.rows[0].applications,
            vec!["sound design", "melody generation"]
        );
    }

    #[test]
    fn test_split_list_trims_and_drops_blanks() {
        let parts: Vec<&str> = split_list(" a , , b,,c ").collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
        assert_eq!(split_list("").count(), 0);
        assert_eq!(split_list("  ,  ").count(), 0);
    }
}
