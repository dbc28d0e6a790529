// Library exports for the Partitura evaluation table builder
pub mod collate;
pub mod config;
pub mod importer;
pub mod loader;
pub mod publish;
pub mod render;
pub mod schema;
pub mod score;
pub mod types;

// Re-export key types for convenience
pub use collate::Collation;
pub use config::{ImporterConfig, PartituraConfig, ReporterConfig};
pub use schema::{CriterionDef, Dimension, CRITERIA};
pub use score::{ScoredRecord, Scores};
pub use types::{CriterionEntry, ProjectDoc, ProjectMeta, ProjectRecord, Rating};
