/// Epsilons used by the NURBS kernel.
///
/// Every near-zero guard in evaluation, normal computation and ray casting reads
/// its threshold from here so a host can tighten or loosen them together.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Smallest knot-span denominator treated as non-zero in the Cox-de Boor recursion
    pub basis: f64,
    /// Smallest accumulated weight that is divided by during rational evaluation
    pub weight: f64,
    /// Smallest vector length that is normalized; shorter vectors fall back to +Z
    pub normal: f64,
    /// Parallel-ray and minimum hit distance threshold for ray/triangle tests
    pub ray: f64,
}

impl Tolerance {
    pub const DEFAULT_BASIS: f64 = 1e-6;
    pub const DEFAULT_WEIGHT: f64 = 1e-6;
    pub const DEFAULT_NORMAL: f64 = 1e-6;
    pub const DEFAULT_RAY: f64 = 1e-6;

    pub fn new(basis: f64, weight: f64, normal: f64, ray: f64) -> Self {
        Self {
            basis,
            weight,
            normal,
            ray,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            basis: Self::DEFAULT_BASIS,
            weight: Self::DEFAULT_WEIGHT,
            normal: Self::DEFAULT_NORMAL,
            ray: Self::DEFAULT_RAY,
        }
    }

    pub fn loose() -> Self {
        Self {
            basis: 1e-4,
            weight: 1e-4,
            normal: 1e-4,
            ray: 1e-4,
        }
    }

    pub fn tight() -> Self {
        Self {
            basis: 1e-10,
            weight: 1e-10,
            normal: 1e-10,
            ray: 1e-10,
        }
    }

    /// Check if a knot-span width is large enough to divide by
    pub fn span_is_nonzero(self, width: f64) -> bool {
        width.abs() > self.basis
    }

    /// Check if an accumulated rational weight is large enough to divide by
    pub fn weight_is_nonzero(self, w: f64) -> bool {
        w > self.weight
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_kernel_epsilon() {
        let tol = Tolerance::default();
        assert_eq!(tol.basis, 1e-6);
        assert!(tol.span_is_nonzero(1e-5));
        assert!(!tol.span_is_nonzero(1e-7));
        assert!(!tol.span_is_nonzero(-1e-7));
    }

    #[test]
    fn test_weight_guard_rejects_negative() {
        let tol = Tolerance::default();
        assert!(tol.weight_is_nonzero(0.5));
        assert!(!tol.weight_is_nonzero(0.0));
        assert!(!tol.weight_is_nonzero(-1.0));
    }
}
