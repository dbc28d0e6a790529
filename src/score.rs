/// Dimension and overall score calculation
use crate::schema::Dimension;
use crate::types::{ProjectDoc, ProjectRecord, Rating};

/// Integer percentage scores derived from one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub adaptability: u32,
    pub controllability: u32,
    pub usability: u32,
    pub overall: u32,
}

impl Scores {
    /// Score every dimension of a document. Pure: no I/O, no shared state.
    pub fn compute(doc: &ProjectDoc) -> Self {
        let adaptability = dimension_score(doc, Dimension::Adaptability);
        let controllability = dimension_score(doc, Dimension::Controllability);
        let usability = dimension_score(doc, Dimension::Usability);
        let overall =
            round_half_even((adaptability + controllability + usability) as f64 / 3.0);

        Scores {
            adaptability,
            controllability,
            usability,
            overall,
        }
    }

    pub fn for_dimension(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Adaptability => self.adaptability,
            Dimension::Controllability => self.controllability,
            Dimension::Usability => self.usability,
        }
    }
}

/// A loaded record together with its derived scores.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: ProjectRecord,
    pub scores: Scores,
}

/// Score all records and order them for presentation: overall score
/// descending, ties keeping load order.
pub fn rank(records: Vec<ProjectRecord>) -> Vec<ScoredRecord> {
    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let scores = Scores::compute(&record.doc);
            ScoredRecord { record, scores }
        })
        .collect();
    scored.sort_by(|a, b| b.scores.overall.cmp(&a.scores.overall));
    scored
}

/// Percentage for one dimension: earned points over the full criteria
/// count. The denominator never shrinks when values are blank.
fn dimension_score(doc: &ProjectDoc, dimension: Dimension) -> u32 {
    let criteria = dimension.criteria();
    let earned: f64 = criteria
        .iter()
        .map(|criterion| Rating::of(&(criterion.get)(doc).value).points())
        .sum();
    round_half_even(earned / criteria.len() as f64 * 100.0)
}

/// Half-to-even rounding, matching the rounding the published scores have
/// always used. Visible on controllability, whose four criteria can land
/// exactly between integers: one partial rounds to 12, three to 38.
fn round_half_even(value: f64) -> u32 {
    value.round_ties_even() as u32
}
