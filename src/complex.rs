use num::complex::Complex;

pub type C<T> = Complex<T>;

pub fn c(re: f64, im: f64) -> C<f64> {
    Complex::new(re, im)
}

pub fn cr(re: f64) -> C<f64> {
    c(re, 0.0)
}

pub fn ci(im: f64) -> C<f64> {
    c(0.0, im)
}

/// The value carried by a point once it has left the plane for good.
pub fn invalid() -> C<f64> {
    c(f64::NAN, f64::NAN)
}

pub fn is_invalid(z: C<f64>) -> bool {
    z.re.is_nan() || z.im.is_nan()
}
