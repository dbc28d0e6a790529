/// Static description of the evaluation grid: three dimensions, fifteen
/// criteria, and the synthetic tags derived from assessment values.
use crate::types::{CriterionEntry, ProjectDoc};

/// Evaluation dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Adaptability,
    Controllability,
    Usability,
}

impl Dimension {
    /// Document order (matches the block order in the YAML documents).
    pub const ALL: [Dimension; 3] = [
        Dimension::Adaptability,
        Dimension::Controllability,
        Dimension::Usability,
    ];

    /// Column group order in the rendered table.
    pub const DISPLAY_ORDER: [Dimension; 3] = [
        Dimension::Adaptability,
        Dimension::Usability,
        Dimension::Controllability,
    ];

    /// Lowercase key used in markup hooks and score column names.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Adaptability => "adaptability",
            Dimension::Controllability => "controllability",
            Dimension::Usability => "usability",
        }
    }

    /// Header title in the rendered table.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Adaptability => "Adaptability",
            Dimension::Controllability => "Controllability",
            Dimension::Usability => "Usability",
        }
    }

    /// Criterion descriptors for this dimension, in document order.
    pub fn criteria(self) -> &'static [CriterionDef] {
        match self {
            Dimension::Adaptability => &CRITERIA[0..5],
            Dimension::Controllability => &CRITERIA[5..9],
            Dimension::Usability => &CRITERIA[9..15],
        }
    }
}

/// Typed read accessor into a document for one criterion.
pub type CriterionGet = fn(&ProjectDoc) -> &CriterionEntry;
/// Typed write accessor into a document for one criterion.
pub type CriterionGetMut = fn(&mut ProjectDoc) -> &mut CriterionEntry;

/// One criterion of the evaluation grid.
pub struct CriterionDef {
    pub dimension: Dimension,
    /// Field name within the dimension block of a document.
    pub key: &'static str,
    /// Column header in the rendered table, with an embedded line break.
    pub label: &'static str,
    /// Short identifier used in markup hooks and qualified tags.
    pub short_id: &'static str,
    /// Column prefix in the tabular export, e.g. `[A][1]`.
    pub csv_prefix: &'static str,
    /// Column title following the prefix in the tabular export.
    pub csv_title: &'static str,
    /// Whether the canonical template carries a `tags` key for this criterion.
    pub has_tags: bool,
    pub get: CriterionGet,
    pub get_mut: CriterionGetMut,
}

/// The full evaluation grid, dimension blocks in document order.
pub static CRITERIA: [CriterionDef; 15] = [
    CriterionDef {
        dimension: Dimension::Adaptability,
        key: "hardware_requirements",
        label: "Hardware<br/>Requirements",
        short_id: "hardware",
        csv_prefix: "[A][1]",
        csv_title: "Hardware Requirements",
        has_tags: false,
        get: |doc| &doc.adaptability.hardware_requirements,
        get_mut: |doc| &mut doc.adaptability.hardware_requirements,
    },
    CriterionDef {
        dimension: Dimension::Adaptability,
        key: "dataset_size",
        label: "Dataset<br/>Size",
        short_id: "dataset",
        csv_prefix: "[A][2]",
        csv_title: "Dataset Size",
        has_tags: false,
        get: |doc| &doc.adaptability.dataset_size,
        get_mut: |doc| &mut doc.adaptability.dataset_size,
    },
    CriterionDef {
        dimension: Dimension::Adaptability,
        key: "adaptation_pathways",
        label: "Adaptation<br/>Pathways",
        short_id: "adaptation",
        csv_prefix: "[A][3]",
        csv_title: "Adaptation Pathways",
        has_tags: true,
        get: |doc| &doc.adaptability.adaptation_pathways,
        get_mut: |doc| &mut doc.adaptability.adaptation_pathways,
    },
    CriterionDef {
        dimension: Dimension::Adaptability,
        key: "technical_barriers",
        label: "Technical<br/>Barriers",
        short_id: "technical",
        csv_prefix: "[A][4]",
        csv_title: "Technical Barriers",
        has_tags: true,
        get: |doc| &doc.adaptability.technical_barriers,
        get_mut: |doc| &mut doc.adaptability.technical_barriers,
    },
    CriterionDef {
        dimension: Dimension::Adaptability,
        key: "model_redistribution",
        label: "Model<br/>Redistribution",
        short_id: "redistribution",
        csv_prefix: "[A][5]",
        csv_title: "Model Redistribution",
        has_tags: false,
        get: |doc| &doc.adaptability.model_redistribution,
        get_mut: |doc| &mut doc.adaptability.model_redistribution,
    },
    CriterionDef {
        dimension: Dimension::Controllability,
        key: "conditioning_inputs",
        label: "Conditioning<br/>Inputs",
        short_id: "conditioning",
        csv_prefix: "[C][1]",
        csv_title: "Conditioning Inputs",
        has_tags: true,
        get: |doc| &doc.controllability.conditioning_inputs,
        get_mut: |doc| &mut doc.controllability.conditioning_inputs,
    },
    CriterionDef {
        dimension: Dimension::Controllability,
        key: "time_varying_control",
        label: "Time-Varying<br/>Control",
        short_id: "timevarying",
        csv_prefix: "[C][2]",
        csv_title: "Time-Varying Control",
        has_tags: false,
        get: |doc| &doc.controllability.time_varying_control,
        get_mut: |doc| &mut doc.controllability.time_varying_control,
    },
    CriterionDef {
        dimension: Dimension::Controllability,
        key: "feature_disentanglement",
        label: "Feature<br/>Disentanglement",
        short_id: "disentanglement",
        csv_prefix: "[C][3]",
        csv_title: "Feature Disentanglement",
        has_tags: true,
        get: |doc| &doc.controllability.feature_disentanglement,
        get_mut: |doc| &mut doc.controllability.feature_disentanglement,
    },
    CriterionDef {
        dimension: Dimension::Controllability,
        key: "control_parameters",
        label: "Control<br/>Parameters",
        short_id: "parameters",
        csv_prefix: "[C][4]",
        csv_title: "Control Parameters",
        has_tags: true,
        get: |doc| &doc.controllability.control_parameters,
        get_mut: |doc| &mut doc.controllability.control_parameters,
    },
    CriterionDef {
        dimension: Dimension::Usability,
        key: "interface_availability",
        label: "Interface<br/>Availability",
        short_id: "interface",
        csv_prefix: "[U][1]",
        csv_title: "Interface Availability",
        has_tags: true,
        get: |doc| &doc.usability.interface_availability,
        get_mut: |doc| &mut doc.usability.interface_availability,
    },
    CriterionDef {
        dimension: Dimension::Usability,
        key: "access_restrictions",
        label: "Access<br/>Restrictions",
        short_id: "access",
        csv_prefix: "[U][2]",
        csv_title: "Access Restrictions",
        has_tags: false,
        get: |doc| &doc.usability.access_restrictions,
        get_mut: |doc| &mut doc.usability.access_restrictions,
    },
    CriterionDef {
        dimension: Dimension::Usability,
        key: "realtime_capabilities",
        label: "Real-time<br/>Capabilities",
        short_id: "realtime",
        csv_prefix: "[U][3]",
        csv_title: "Real-time Capabilities",
        has_tags: false,
        get: |doc| &doc.usability.realtime_capabilities,
        get_mut: |doc| &mut doc.usability.realtime_capabilities,
    },
    CriterionDef {
        dimension: Dimension::Usability,
        key: "workflow_integration",
        label: "Workflow<br/>Integration",
        short_id: "workflow",
        csv_prefix: "[U][4]",
        csv_title: "Workflow Integration",
        has_tags: true,
        get: |doc| &doc.usability.workflow_integration,
        get_mut: |doc| &mut doc.usability.workflow_integration,
    },
    CriterionDef {
        dimension: Dimension::Usability,
        key: "output_licensing",
        label: "Output<br/>Licensing",
        short_id: "licensing",
        csv_prefix: "[U][5]",
        csv_title: "Output Licensing",
        has_tags: false,
        get: |doc| &doc.usability.output_licensing,
        get_mut: |doc| &mut doc.usability.output_licensing,
    },
    CriterionDef {
        dimension: Dimension::Usability,
        key: "community_support",
        label: "Community<br/>Support",
        short_id: "community",
        csv_prefix: "[U][6]",
        csv_title: "Community Support",
        has_tags: true,
        get: |doc| &doc.usability.community_support,
        get_mut: |doc| &mut doc.usability.community_support,
    },
];

/// Criteria in table display order.
pub fn display_criteria() -> impl Iterator<Item = &'static CriterionDef> {
    Dimension::DISPLAY_ORDER
        .iter()
        .flat_map(|dimension| dimension.criteria().iter())
}

/// Tags applied automatically from a criterion's assessment value.
pub struct SyntheticTags {
    /// Criterion key this rule attaches to.
    pub criterion: &'static str,
    pub high: &'static [&'static str],
    pub partial: &'static [&'static str],
    pub low: &'static [&'static str],
}

impl SyntheticTags {
    /// Tags implied by an assessment value.
    pub fn for_value(&self, value: &str) -> &'static [&'static str] {
        match value {
            "high" => self.high,
            "partial" => self.partial,
            "low" => self.low,
            _ => &[],
        }
    }

    /// Every tag this rule can produce, across all value levels.
    pub fn all(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.high.iter().chain(self.partial).chain(self.low).copied()
    }
}

/// Fixed synthetic tag table. Every configured tag is registered into the
/// pooled vocabulary on each build regardless of the current data, keeping
/// the filter UI stable across builds.
pub static SYNTHETIC_TAGS: [SyntheticTags; 3] = [
    SyntheticTags {
        criterion: "hardware_requirements",
        high: &["CPU"],
        partial: &[],
        low: &[],
    },
    SyntheticTags {
        criterion: "dataset_size",
        high: &["small dataset"],
        partial: &[],
        low: &[],
    },
    SyntheticTags {
        criterion: "realtime_capabilities",
        high: &["real-time"],
        partial: &[],
        low: &[],
    },
];

/// Synthetic tag rule for a criterion, if one is configured.
pub fn synthetic_tags(criterion_key: &str) -> Option<&'static SyntheticTags> {
    SYNTHETIC_TAGS
        .iter()
        .find(|rule| rule.criterion == criterion_key)
}
