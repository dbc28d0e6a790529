/// Core data model for evaluation documents
use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};

/// One evaluated criterion: assessment value, free-text notes, and an
/// optional comma separated tag list.
///
/// `tags` distinguishes a missing key (`None`) from a key that is present
/// but blank (`Some("")`). Only tag-bearing criteria carry the key in the
/// canonical template, and the importer keeps it present-but-empty for
/// blank spreadsheet cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub value: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub notes: String,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<String>,
}

/// Project metadata block of an evaluation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub affiliation: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub architecture: String,
    /// Comma separated musical applications, free text.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub applications: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub notes: String,
}

/// Adaptability criteria, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptabilityBlock {
    #[serde(default)]
    pub hardware_requirements: CriterionEntry,
    #[serde(default)]
    pub dataset_size: CriterionEntry,
    #[serde(default)]
    pub adaptation_pathways: CriterionEntry,
    #[serde(default)]
    pub technical_barriers: CriterionEntry,
    #[serde(default)]
    pub model_redistribution: CriterionEntry,
}

/// Controllability criteria, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllabilityBlock {
    #[serde(default)]
    pub conditioning_inputs: CriterionEntry,
    #[serde(default)]
    pub time_varying_control: CriterionEntry,
    #[serde(default)]
    pub feature_disentanglement: CriterionEntry,
    #[serde(default)]
    pub control_parameters: CriterionEntry,
}

/// Usability criteria, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsabilityBlock {
    #[serde(default)]
    pub interface_availability: CriterionEntry,
    #[serde(default)]
    pub access_restrictions: CriterionEntry,
    #[serde(default)]
    pub realtime_capabilities: CriterionEntry,
    #[serde(default)]
    pub workflow_integration: CriterionEntry,
    #[serde(default)]
    pub output_licensing: CriterionEntry,
    #[serde(default)]
    pub community_support: CriterionEntry,
}

/// One complete evaluation document. Missing blocks and null scalars
/// deserialize to empty defaults so partially filled documents still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDoc {
    #[serde(default)]
    pub project: ProjectMeta,
    #[serde(default)]
    pub adaptability: AdaptabilityBlock,
    #[serde(default)]
    pub controllability: ControllabilityBlock,
    #[serde(default)]
    pub usability: UsabilityBlock,
}

/// A loaded document together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub doc: ProjectDoc,
    /// Path recorded in the CSV snapshot, leading `.` stripped for
    /// documents found under the working directory.
    pub source_file: String,
}

/// View of a criterion value. Unknown strings are carried through so data
/// entry mistakes stay visible in the output instead of vanishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating<'a> {
    High,
    Partial,
    Low,
    Empty,
    Other(&'a str),
}

impl<'a> Rating<'a> {
    pub fn of(value: &'a str) -> Self {
        match value {
            "high" => Rating::High,
            "partial" => Rating::Partial,
            "low" => Rating::Low,
            "" => Rating::Empty,
            other => Rating::Other(other),
        }
    }

    /// Score contribution of this value.
    pub fn points(self) -> f64 {
        match self {
            Rating::High => 1.0,
            Rating::Partial => 0.5,
            _ => 0.0,
        }
    }

    /// Cell glyph in the rendered table.
    pub fn symbol(self) -> &'static str {
        match self {
            // U+2714 with the text-style variation selector
            Rating::High => "\u{2714}\u{fe0e}",
            Rating::Partial => "~",
            Rating::Low => "\u{2718}",
            _ => "",
        }
    }

    /// Cell class in the rendered table: the raw value, or `empty`.
    pub fn css_class(self) -> &'a str {
        match self {
            Rating::High => "high",
            Rating::Partial => "partial",
            Rating::Low => "low",
            Rating::Empty => "empty",
            Rating::Other(value) => value,
        }
    }
}

impl fmt::Display for Rating<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Deserialize a string field that may be null or a bare scalar.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringVisitor;

    impl<'de> de::Visitor<'de> for StringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, scalar, or null")
        }

        fn visit_unit<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_str<E>(self, v: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_owned())
        }

        fn visit_string<E>(self, v: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_bool<E>(self, v: bool) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringVisitor)
}

/// Deserialize an optional string field where an explicit null means
/// "present but blank" rather than "absent".
fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_empty(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_scalars_deserialize_to_empty_strings() {
        let doc: ProjectDoc = serde_yaml::from_str(
            "project:\n  name: Alpha\n  link:\nadaptability:\n  hardware_requirements:\n    value:\n    notes:\n",
        )
        .unwrap();

        assert_eq!(doc.project.name, "Alpha");
        assert_eq!(doc.project.link, "");
        assert_eq!(doc.adaptability.hardware_requirements.value, "");
        assert_eq!(doc.adaptability.hardware_requirements.notes, "");
    }

    #[test]
    fn test_missing_blocks_default_to_empty() {
        let doc: ProjectDoc = serde_yaml::from_str("project:\n  name: Alpha\n").unwrap();

        assert_eq!(doc.usability.community_support.value, "");
        assert_eq!(doc.controllability.conditioning_inputs.tags, None);
    }

    #[test]
    fn test_tags_distinguish_null_from_absent() {
        let entry: CriterionEntry = serde_yaml::from_str("value: high\nnotes: ok\n").unwrap();
        assert_eq!(entry.tags, None);

        let entry: CriterionEntry =
            serde_yaml::from_str("value: high\nnotes: ok\ntags:\n").unwrap();
        assert_eq!(entry.tags, Some(String::new()));

        let entry: CriterionEntry =
            serde_yaml::from_str("value: high\nnotes: ok\ntags: a, b\n").unwrap();
        assert_eq!(entry.tags, Some("a, b".to_string()));
    }

    #[test]
    fn test_absent_tags_are_not_serialized() {
        let entry = CriterionEntry {
            value: "high".to_string(),
            notes: String::new(),
            tags: None,
        };
        let yaml = serde_yaml::to_string(&entry).unwrap();
        assert!(!yaml.contains("tags"));

        let entry = CriterionEntry {
            tags: Some(String::new()),
            ..entry
        };
        let yaml = serde_yaml::to_string(&entry).unwrap();
        assert!(yaml.contains("tags: ''"));
    }

    #[test]
    fn test_numeric_scalars_survive_as_text() {
        let entry: CriterionEntry = serde_yaml::from_str("value: high\nnotes: 42\n").unwrap();
        assert_eq!(entry.notes, "42");
    }

    #[test]
    fn test_document_round_trip_preserves_block_order() {
        let mut doc = ProjectDoc::default();
        doc.project.name = "Alpha".to_string();
        doc.adaptability.dataset_size.value = "partial".to_string();

        let yaml = serde_yaml::to_string(&doc).unwrap();
        let project = yaml.find("project:").unwrap();
        let adaptability = yaml.find("adaptability:").unwrap();
        let controllability = yaml.find("controllability:").unwrap();
        let usability = yaml.find("usability:").unwrap();
        assert!(project < adaptability);
        assert!(adaptability < controllability);
        assert!(controllability < usability);

        let parsed: ProjectDoc = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_rating_of_maps_known_levels() {
        assert_eq!(Rating::of("high"), Rating::High);
        assert_eq!(Rating::of("partial"), Rating::Partial);
        assert_eq!(Rating::of("low"), Rating::Low);
        assert_eq!(Rating::of(""), Rating::Empty);
        assert_eq!(Rating::of("medium"), Rating::Other("medium"));
    }

    #[test]
    fn test_rating_points() {
        assert_eq!(Rating::High.points(), 1.0);
        assert_eq!(Rating::Partial.points(), 0.5);
        assert_eq!(Rating::Low.points(), 0.0);
        assert_eq!(Rating::Empty.points(), 0.0);
        assert_eq!(Rating::Other("medium").points(), 0.0);
    }

    #[test]
    fn test_rating_symbols_and_classes() {
        assert_eq!(Rating::High.symbol(), "✔︎");
        assert_eq!(Rating::Partial.symbol(), "~");
        assert_eq!(Rating::Low.symbol(), "✘");
        assert_eq!(Rating::Empty.symbol(), "");
        assert_eq!(Rating::Other("medium").symbol(), "");

        assert_eq!(Rating::High.css_class(), "high");
        assert_eq!(Rating::Empty.css_class(), "empty");
        assert_eq!(Rating::Other("medium").css_class(), "medium");
    }
}
