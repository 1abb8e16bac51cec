//! 2D vector type used for positions, velocities and forces.
//!
//! The vector itself is ultraviolet's `DVec2`: a `Copy` value compared
//! structurally, with `+`, `-`, unary `-`, `* f64`, `dot`, `mag` and `mag_sq`.
//! [`Polar`] adds the polar helpers the rest of the crate needs.

pub use ultraviolet::DVec2 as Vector;

/// Polar-coordinate helpers for [`Vector`].
pub trait Polar {
    /// Builds `(r·cos θ, r·sin θ)`.
    fn from_polar(r: f64, theta: f64) -> Self;

    /// Angle of the vector from the +x axis, `atan2(y, x)`.
    /// The zero vector has angle 0.
    fn angle(&self) -> f64;
}

impl Polar for Vector {
    #[inline]
    fn from_polar(r: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Vector::new(r * cos, r * sin)
    }

    #[inline]
    fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}
