use crate::operand::{Coefficients, Normed};
use crate::{validation, Result, VectorError};
use ndarray::{Array1, ArrayView1};
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// A labeled point in n-dimensional real space with a cached L2 norm.
///
/// The norm is recomputed on every coefficient change, so `norm()` never
/// disagrees with `coefficients()`. A freshly built vector always has at least
/// one coefficient; [`Vector::set_coefficients`] may later empty it, in which
/// case the norm is `0.0`.
#[derive(Debug, Clone)]
pub struct Vector {
    label: String,
    coefficients: Array1<f64>,
    norm: f64,
}

impl Vector {
    pub fn new(label: impl Into<String>, coefficients: impl Into<Array1<f64>>) -> Result<Self> {
        let coefficients = coefficients.into();
        let label = label.into();
        validation::check_label(&label)?;
        validation::check_not_empty(&coefficients)?;
        Ok(Self::assemble(label, coefficients))
    }

    /// Builds a vector from untyped input.
    ///
    /// Coefficients are checked for shape and element type first, then the
    /// label, and only then for emptiness.
    pub fn from_json(label: &Value, coefficients: &Value) -> Result<Self> {
        let coefficients = validation::coefficients_from_json(coefficients)?;
        let label = validation::label_from_json(label)?;
        validation::check_not_empty(&coefficients)?;
        Ok(Self::assemble(label, coefficients))
    }

    fn assemble(label: String, coefficients: Array1<f64>) -> Self {
        let norm = l2_norm(&coefficients);
        Self {
            label,
            coefficients,
            norm,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    /// Sum of the component-wise products with `other`.
    pub fn dot_product<O: Coefficients + ?Sized>(&self, other: &O) -> Result<f64> {
        let operand = other.coefficients()?;
        self.dot_against(operand.as_ref().map(|c| c.view()))
    }

    pub(crate) fn dot_against(&self, operand: Option<ArrayView1<'_, f64>>) -> Result<f64> {
        let operand = operand.ok_or(VectorError::MissingCoefficients)?;
        if operand.len() != self.coefficients.len() {
            return Err(VectorError::DimensionMismatch {
                expected: self.coefficients.len(),
                found: operand.len(),
            });
        }
        Ok(self.coefficients.dot(&operand))
    }

    /// Dot product over the product of both norms.
    ///
    /// A zero-norm operand is not guarded against: the result is NaN or an
    /// infinity, following IEEE-754 division.
    pub fn cosine_similarity<O: Normed + ?Sized>(&self, other: &O) -> Result<f64> {
        let dot_product = self.dot_product(other)?;
        Ok(dot_product / (self.norm * other.norm()))
    }

    /// Copy with every coefficient multiplied by `factor`. The label is kept.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::assemble(self.label.clone(), &self.coefficients * factor)
    }

    /// Replaces the coefficients and recomputes the norm.
    ///
    /// Unlike construction, an empty sequence is accepted here.
    pub fn set_coefficients(&mut self, coefficients: impl Into<Array1<f64>>) {
        self.replace_coefficients(coefficients.into());
    }

    pub fn set_coefficients_json(&mut self, coefficients: &Value) -> Result<()> {
        let coefficients = validation::coefficients_from_json(coefficients).inspect_err(|err| {
            debug!(label = %self.label, error = %err, "rejected coefficients");
        })?;
        self.replace_coefficients(coefficients);
        Ok(())
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        validation::check_label(&label).inspect_err(|err| {
            debug!(label = %self.label, error = %err, "rejected label");
        })?;
        self.label = label;
        Ok(())
    }

    pub fn set_label_json(&mut self, label: &Value) -> Result<()> {
        self.label = validation::label_from_json(label).inspect_err(|err| {
            debug!(label = %self.label, error = %err, "rejected label");
        })?;
        Ok(())
    }

    fn replace_coefficients(&mut self, coefficients: Array1<f64>) {
        // Norm first so a panic cannot leave the pair half-written.
        let norm = l2_norm(&coefficients);
        self.coefficients = coefficients;
        self.norm = norm;
        trace!(
            label = %self.label,
            dimension = self.coefficients.len(),
            norm,
            "coefficients replaced"
        );
    }
}

fn l2_norm(coefficients: &Array1<f64>) -> f64 {
    coefficients.dot(coefficients).sqrt()
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.coefficients == other.coefficients
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector(label={}, dims={}, norm={})",
            self.label,
            self.dimension(),
            self.norm
        )
    }
}
