use statrs::statistics::Statistics;

use crate::data_structs::StatSummary;

/// Mean and sample standard deviation (divisor `n - 1`) of `values`.
///
/// A single value has a standard deviation of exactly `0.0`. An empty slice
/// yields `NaN` for both.
pub fn mean_std(values: &[f64]) -> StatSummary {
    let mean = values.iter().mean();
    let std = if values.len() == 1 {
        0.0
    }
    else {
        values.iter().std_dev()
    };
    StatSummary::new(mean, std)
}

/// Fixed four-decimal rendering used for every derived column.
pub fn format_stat(value: f64) -> String {
    format!("{:.4}", value)
}
