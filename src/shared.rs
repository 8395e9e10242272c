use crate::operand::{Coefficients, Normed};
use crate::{vector::Vector, Result};
use ndarray::{Array1, CowArray, Ix1};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`Vector`] shared between threads.
///
/// One lock guards the whole vector, so readers never see a norm that belongs
/// to a different coefficient set. Clones share the same underlying vector.
#[derive(Debug, Clone)]
pub struct SharedVector {
    inner: Arc<RwLock<Vector>>,
}

impl SharedVector {
    pub fn new(vector: Vector) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vector)),
        }
    }

    // Setters validate before writing, so a poisoned lock still guards a
    // consistent vector.
    fn read(&self) -> RwLockReadGuard<'_, Vector> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vector> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Vector {
        self.read().clone()
    }

    pub fn label(&self) -> String {
        self.read().label().to_owned()
    }

    pub fn norm(&self) -> f64 {
        self.read().norm()
    }

    pub fn coefficients(&self) -> Array1<f64> {
        self.read().coefficients().clone()
    }

    pub fn set_coefficients(&self, coefficients: impl Into<Array1<f64>>) {
        self.write().set_coefficients(coefficients);
    }

    pub fn set_coefficients_json(&self, coefficients: &Value) -> Result<()> {
        self.write().set_coefficients_json(coefficients)
    }

    pub fn set_label(&self, label: impl Into<String>) -> Result<()> {
        self.write().set_label(label)
    }

    pub fn dot_product<O: Coefficients + ?Sized>(&self, other: &O) -> Result<f64> {
        // Read the operand before taking our own lock; it may be this handle.
        let operand = other.coefficients()?;
        self.read().dot_against(operand.as_ref().map(|c| c.view()))
    }

    pub fn cosine_similarity<O: Normed + ?Sized>(&self, other: &O) -> Result<f64> {
        let operand = other.coefficients()?;
        let other_norm = other.norm();
        let vector = self.read();
        let dot_product = vector.dot_against(operand.as_ref().map(|c| c.view()))?;
        Ok(dot_product / (vector.norm() * other_norm))
    }
}

impl From<Vector> for SharedVector {
    fn from(vector: Vector) -> Self {
        Self::new(vector)
    }
}

impl Coefficients for SharedVector {
    fn coefficients(&self) -> Result<Option<CowArray<'_, f64, Ix1>>> {
        Ok(Some(CowArray::from(SharedVector::coefficients(self))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VectorError;
    use serde_json::json;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedVector::new(Vector::new("s", vec![3.0, 4.0]).unwrap());
        let handle = shared.clone();
        handle.set_coefficients(vec![6.0, 8.0]);
        assert_eq!(shared.norm(), 10.0);
        assert_eq!(shared.coefficients().to_vec(), vec![6.0, 8.0]);

        assert_eq!(handle.set_label(""), Err(VectorError::InvalidLabel));
        assert!(handle.set_coefficients_json(&json!([1, "x"])).is_err());
        assert_eq!(shared.label(), "s");
        assert_eq!(shared.norm(), 10.0);
    }

    #[test]
    fn test_dot_product_with_itself() {
        let shared = SharedVector::new(Vector::new("s", vec![1.0, 2.0, 3.0]).unwrap());
        assert_eq!(shared.dot_product(&shared).unwrap(), 14.0);

        let other = Vector::new("o", vec![1.0, 2.0, 3.0]).unwrap();
        assert!((shared.cosine_similarity(&other).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_readers_never_see_stale_norm() {
        let shared = SharedVector::new(Vector::new("s", vec![3.0, 4.0]).unwrap());

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 1..=200 {
                    let k = i as f64;
                    shared.set_coefficients(vec![3.0 * k, 4.0 * k]);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = shared.snapshot();
                        let expected = snapshot.coefficients().dot(snapshot.coefficients()).sqrt();
                        assert_eq!(snapshot.norm(), expected);

                        // Every written set is (3k, 4k), so any observed norm is 5k.
                        let norm = shared.norm();
                        assert!((5.0..=1000.0).contains(&norm));
                        assert_eq!(norm % 5.0, 0.0);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.norm(), 1000.0);
    }
}
