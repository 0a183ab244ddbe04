//! Distance metric between input vectors and prototype vectors.

use crate::error::{Result, TopomapError};

/// Computes the Euclidean distance between two vectors.
///
/// Fails with `DimensionMismatch` if the lengths differ or either vector
/// is empty. Pure and deterministic.
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return Err(TopomapError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum();

    Ok(sum.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_identical() {
        let v = vec![0.3, 0.7, 0.1];
        assert_eq!(distance(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let d_ab = distance(&a, &b).unwrap();
        let d_ba = distance(&b, &a).unwrap();
        assert_eq!(d_ab, d_ba);
        assert!((d_ab - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_distance_known_value() {
        let a = vec![0.0, 0.0];
        let b = vec![3.0, 4.0];
        assert!((distance(&a, &b).unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_distance_length_mismatch() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            distance(&a, &b),
            Err(TopomapError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_distance_empty_rejected() {
        let empty: Vec<f64> = Vec::new();
        assert!(matches!(
            distance(&empty, &empty),
            Err(TopomapError::DimensionMismatch { .. })
        ));
    }
}
