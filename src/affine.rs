/// A 2D affine transform from projection plane to viewport.
///
/// Maps plane coordinates (x, y) to viewport coordinates (u, v):
///   u = a * x + b * y + c
///   v = d * x + e * y + f
///
/// Fitted projections only ever use a uniform scale with the y axis
/// flipped (plane y grows north, viewport v grows down): b = d = 0, e = -a.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Uniform scale `k` with flipped y, then translation (tx, ty).
    pub fn scale_translate(k: f64, tx: f64, ty: f64) -> Self {
        Self::new(k, 0.0, tx, 0.0, -k, ty)
    }

    /// Horizontal scale factor.
    pub fn scale(&self) -> f64 {
        self.a
    }

    /// Apply the forward transform: (x, y) -> (u, v).
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        let u = self.a * x + self.b * y + self.c;
        let v = self.d * x + self.e * y + self.f;
        (u, v)
    }

    /// Compute the inverse transform, or `None` if it is singular.
    pub fn inverse(&self) -> Option<Affine> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Affine {
            a: self.e * inv_det,
            b: -self.b * inv_det,
            c: (self.b * self.f - self.e * self.c) * inv_det,
            d: -self.d * inv_det,
            e: self.a * inv_det,
            f: (self.d * self.c - self.a * self.f) * inv_det,
        })
    }
}
