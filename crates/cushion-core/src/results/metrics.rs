use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("cannot compute an error metric over zero samples")]
    Empty,

    #[error("sample count mismatch: {expected} expected vs {calculated} calculated")]
    LengthMismatch { expected: usize, calculated: usize },
}

/// Mean of `|expected[i] - calculated[i]|`.
pub fn mean_absolute_error(expected: &[u64], calculated: &[u64]) -> Result<f64, MetricsError> {
    if expected.len() != calculated.len() {
        return Err(MetricsError::LengthMismatch {
            expected: expected.len(),
            calculated: calculated.len(),
        });
    }
    if expected.is_empty() {
        return Err(MetricsError::Empty);
    }

    let total: u64 = expected
        .iter()
        .zip(calculated)
        .map(|(e, c)| e.abs_diff(*c))
        .sum();
    Ok(total as f64 / expected.len() as f64)
}
