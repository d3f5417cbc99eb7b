//! Mean / median over student marks
//!
//! An empty set has no mean and no median; both render as `N/A`.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

impl CourseStats {
    pub fn from_marks(marks: &[f64]) -> Self {
        Self {
            count: marks.len(),
            mean: mean(marks),
            median: median(marks),
        }
    }
}

impl fmt::Display for CourseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "average {}, median {} ({} student(s))",
            display_value(self.mean),
            display_value(self.median),
            self.count
        )
    }
}

/// Two decimals, or `N/A`
pub fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

pub fn mean(marks: &[f64]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    Some(marks.iter().sum::<f64>() / marks.len() as f64)
}

/// Middle of the ascending order; mean of the two middle values for an even
/// count.
pub fn median(marks: &[f64]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    let mut sorted = marks.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
