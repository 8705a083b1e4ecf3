use crate::complex::*;

/// f(z) = z³ − 2z + 2
///
/// Its Newton map has an attracting 2-cycle 0 → 1 → 0 alongside the three
/// roots, which is what gives the basins their black and off-colour regions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cubic;

impl Cubic {
    #[inline]
    pub fn value(&self, z: C<f64>) -> C<f64> {
        z * z * z - z * 2.0 + 2.0
    }

    /// f′(z) = 3z² − 2
    #[inline]
    pub fn slope(&self, z: C<f64>) -> C<f64> {
        z * z * 3.0 - 2.0
    }

    /// One Newton-Raphson update, z − f(z)/f′(z).
    ///
    /// A zero slope produces NaN or infinite components rather than a panic.
    #[inline]
    pub fn newton_step(&self, z: C<f64>) -> C<f64> {
        z - self.value(z) / self.slope(z)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_value_and_slope() {
        let f = Cubic;
        assert_eq!(f.value(cr(0.0)), cr(2.0));
        assert_eq!(f.value(cr(1.0)), cr(1.0));
        assert_eq!(f.slope(cr(0.0)), cr(-2.0));
        assert_eq!(f.slope(ci(1.0)), cr(-5.0));
    }

    #[test]
    fn test_slope_matches_central_difference() {
        let f = Cubic;
        let h = 1e-6;
        for &z in &[c(0.2, 0.8), c(-1.3, 0.4), c(2.0, -1.0)] {
            let numeric = (f.value(z + cr(h)) - f.value(z - cr(h))) / (2.0 * h);
            assert!((numeric - f.slope(z)).norm() < 1e-6, "at {}", z);
        }
    }

    #[test]
    fn test_two_cycle() {
        let f = Cubic;
        assert_eq!(f.newton_step(cr(0.0)), cr(1.0));
        assert_eq!(f.newton_step(cr(1.0)), cr(0.0));
    }

    #[test]
    fn test_zero_slope_is_not_finite() {
        let z = Cubic.newton_step(cr((2.0f64 / 3.0).sqrt()));
        assert!(!z.is_finite() || z.norm() > 1e6);
    }
}
