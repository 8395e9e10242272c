use crate::{validation, vector::Vector, Result};
use ndarray::{CowArray, Ix1};
use serde_json::Value;

/// Anything that can stand on the right-hand side of a dot product.
///
/// `Ok(None)` means the value carries no coefficient sequence at all, which the
/// dot product reports as [`VectorError::MissingCoefficients`](crate::VectorError::MissingCoefficients).
/// A sequence that is present but malformed is an `Err` and is passed through as is.
pub trait Coefficients {
    fn coefficients(&self) -> Result<Option<CowArray<'_, f64, Ix1>>>;
}

/// An operand that also knows its L2 norm, as cosine similarity needs.
pub trait Normed: Coefficients {
    fn norm(&self) -> f64;
}

impl Coefficients for Vector {
    fn coefficients(&self) -> Result<Option<CowArray<'_, f64, Ix1>>> {
        Ok(Some(CowArray::from(Vector::coefficients(self).view())))
    }
}

impl Normed for Vector {
    fn norm(&self) -> f64 {
        Vector::norm(self)
    }
}

// A loose `{"coefficients": [...]}` object. An absent or null field is missing.
impl Coefficients for Value {
    fn coefficients(&self) -> Result<Option<CowArray<'_, f64, Ix1>>> {
        match self.get("coefficients") {
            None | Some(Value::Null) => Ok(None),
            Some(field) => {
                let coefficients = validation::coefficients_from_json(field)?;
                Ok(Some(CowArray::from(coefficients)))
            }
        }
    }
}
