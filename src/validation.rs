//! Input checks shared by the constructors and setters of [`Vector`](crate::Vector).
//!
//! Typed callers can only get the label wrong (an empty string). Callers that hold
//! untyped data go through the `serde_json::Value` checks, which also catch a
//! coefficient list that is not an array or that holds something other than numbers.

use crate::{CoefficientsFault, Result, VectorError};
use ndarray::Array1;
use serde_json::Value;

/// Accepts any non-empty label.
pub fn check_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(VectorError::InvalidLabel);
    }
    Ok(())
}

/// Rejects nulls, non-strings and the empty string.
pub fn label_from_json(value: &Value) -> Result<String> {
    match value.as_str() {
        Some(label) if !label.is_empty() => Ok(label.to_owned()),
        _ => Err(VectorError::InvalidLabel),
    }
}

/// Converts an untyped coefficient list, checking every element.
///
/// An empty array is accepted here: emptiness is a construction-only rule, see
/// [`check_not_empty`].
pub fn coefficients_from_json(value: &Value) -> Result<Array1<f64>> {
    let elements = value.as_array().ok_or(CoefficientsFault::NotASequence)?;

    let coefficients = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            element
                .as_f64()
                .ok_or(CoefficientsFault::NonNumeric { index })
        })
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    Ok(Array1::from_vec(coefficients))
}

pub fn check_not_empty(coefficients: &Array1<f64>) -> Result<()> {
    if coefficients.is_empty() {
        return Err(CoefficientsFault::Empty.into());
    }
    Ok(())
}
