mod field;
mod point;

pub use field::{FieldElement, FieldError, PrimeField};
pub use point::{AffinePoint, ExtendedPoint, GroupOps, PointError, ProjectivePoint};
