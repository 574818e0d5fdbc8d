#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

//! Point algebra on twisted Edwards curves `a·x² + y² = 1 + d·x²·y²` over
//! runtime prime fields, in three coordinate representations (affine,
//! projective, extended) sharing one group interface.
//!
//! Curves and points are plain immutable values: every operation reads its
//! inputs and returns a freshly validated point, so batching independent
//! scalar multiplications across threads needs no locking.
//!
//! All arithmetic is variable-time. This crate is for algebra, not for
//! secret-dependent workloads.
//!
//! ```
//! use agora_edwards::{AffinePoint, GroupOps, PrimeField, TwistedEdwardsCurve};
//! use num_bigint::BigInt;
//!
//! let field = PrimeField::new(13u8.into());
//! let curve = TwistedEdwardsCurve::new(field.element(-1), field.element(2)).unwrap();
//! let p = AffinePoint::new(&curve, field.element(2), field.element(4)).unwrap();
//! let q = p.scalar_mul(&BigInt::from(4)).unwrap();
//! assert_eq!(q, p.double().unwrap().double().unwrap());
//! ```

pub mod arithmetic;
pub mod curve;

pub use arithmetic::{
    AffinePoint, ExtendedPoint, FieldElement, FieldError, GroupOps, PointError, PrimeField,
    ProjectivePoint,
};
pub use curve::{CurveError, TwistedEdwardsCurve};
