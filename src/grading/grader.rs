use serde::Serialize;
use std::fmt;

use crate::core::sample::SampleRecord;

/// Points for a correct answer
pub const CORRECT_POINTS: i64 = 1;

/// Points for declining to answer a sample that has an answer
pub const MISSED_POINTS: i64 = 0;

/// Points for a confident wrong answer
pub const WRONG_POINTS: i64 = -5;

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How a single sample was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeKind {
    Correct,
    /// Marked invalid although an answer exists
    Missed,
    /// Marked valid with the wrong ids, or valid when it should be invalid
    Wrong,
}

impl fmt::Display for GradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeKind::Correct => write!(f, "ok"),
            GradeKind::Missed => write!(f, "missed"),
            GradeKind::Wrong => write!(f, "WRONG"),
        }
    }
}

/// Grade of one sample
#[derive(Debug, Clone, Serialize)]
pub struct GradeOutcome {
    pub kind: GradeKind,
    pub points: i64,
    pub message: String,
}

fn id_text<T: fmt::Display>(id: Option<T>) -> String {
    id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

/// Grade one sample's output against its expected answer
#[must_use]
pub fn grade_sample(sample: &SampleRecord) -> GradeOutcome {
    let expected = &sample.expected;
    let output = &sample.output;
    let input = format!("{}:{}", sample.input.section, sample.input.row);

    let (kind, message) = if expected.valid {
        let wanted = format!(
            "{}:{}",
            id_text(expected.section_id),
            id_text(expected.row_id)
        );
        if !output.valid {
            (
                GradeKind::Missed,
                format!("{input} marked invalid, should be {wanted}"),
            )
        } else if output.section_id == expected.section_id && output.row_id == expected.row_id {
            (GradeKind::Correct, "ok".to_string())
        } else {
            let got = format!("{}:{}", id_text(output.section_id), id_text(output.row_id));
            (
                GradeKind::Wrong,
                format!("{input} WRONG!, marked {got}, should be {wanted}"),
            )
        }
    } else if output.valid {
        (
            GradeKind::Wrong,
            format!("{input} WRONG! Marked valid, should be invalid"),
        )
    } else {
        (GradeKind::Correct, "ok".to_string())
    };

    let points = match kind {
        GradeKind::Correct => CORRECT_POINTS,
        GradeKind::Missed => MISSED_POINTS,
        GradeKind::Wrong => WRONG_POINTS,
    };

    GradeOutcome {
        kind,
        points,
        message,
    }
}

/// Totals over a batch of graded samples
#[derive(Debug, Clone, Default, Serialize)]
pub struct GradeSummary {
    /// Samples graded; also the best possible score
    pub total: usize,
    pub correct: usize,
    pub missed: usize,
    pub wrong: usize,
    pub score: i64,
}

impl GradeSummary {
    /// Grade every sample, returning the totals and the per-sample outcomes in order
    #[must_use]
    pub fn grade(samples: &[SampleRecord]) -> (Self, Vec<GradeOutcome>) {
        let mut summary = Self::default();
        let outcomes: Vec<GradeOutcome> = samples.iter().map(grade_sample).collect();
        for outcome in &outcomes {
            summary.add(outcome);
        }
        (summary, outcomes)
    }

    /// Fold one outcome into the totals
    pub fn add(&mut self, outcome: &GradeOutcome) {
        self.total += 1;
        self.score += outcome.points;
        match outcome.kind {
            GradeKind::Correct => self.correct += 1,
            GradeKind::Missed => self.missed += 1,
            GradeKind::Wrong => self.wrong += 1,
        }
    }

    /// Fraction of samples answered correctly
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count_to_f64(self.correct) / count_to_f64(self.total)
        }
    }
}

impl fmt::Display for GradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total)
    }
}
