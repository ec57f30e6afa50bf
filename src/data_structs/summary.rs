use crate::utils::{format_stat, mean_std};

/// Mean and sample standard deviation of a group of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSummary {
    pub mean: f64,
    pub std:  f64,
}

impl StatSummary {
    pub fn new(
        mean: f64,
        std: f64,
    ) -> Self {
        Self { mean, std }
    }

    pub fn from_values(values: &[f64]) -> Self {
        mean_std(values)
    }

    pub fn mean_str(&self) -> String {
        format_stat(self.mean)
    }

    pub fn std_str(&self) -> String {
        format_stat(self.std)
    }
}
