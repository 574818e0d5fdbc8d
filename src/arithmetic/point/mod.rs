mod affine;
mod extended;
mod projective;

pub use affine::AffinePoint;
pub use extended::ExtendedPoint;
pub use projective::ProjectivePoint;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;
use thiserror::Error;

use super::field::FieldError;
use crate::curve::TwistedEdwardsCurve;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    #[error("point coordinates do not satisfy the curve equation")]
    NotOnCurve,
    #[error("points lie on different curves")]
    CurveMismatch,
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// The group operations shared by all three coordinate representations.
///
/// `subtract` and `scalar_mul` are provided on top of the required
/// operations, so the double-and-add algorithm exists once rather than per
/// representation.
pub trait GroupOps: Clone + Sized {
    fn curve(&self) -> &TwistedEdwardsCurve;

    /// The neutral element of the group law on `curve`.
    fn identity(curve: &TwistedEdwardsCurve) -> Self;

    fn is_identity(&self) -> bool;

    fn negate(&self) -> Self;

    /// Point addition. Fails with [`PointError::CurveMismatch`] if the
    /// operands lie on different curves; the identity is absorbed on
    /// either side.
    fn add(&self, rhs: &Self) -> Result<Self, PointError>;

    fn double(&self) -> Result<Self, PointError>;

    fn subtract(&self, rhs: &Self) -> Result<Self, PointError> {
        self.add(&rhs.negate())
    }

    /// Scalar multiplication by double-and-add, scanning the bits of `n`
    /// from least to most significant.
    ///
    /// Variable-time: the operation count leaks the bit pattern of `n`.
    /// Fine here, this crate makes no side-channel promises.
    fn scalar_mul(&self, n: &BigInt) -> Result<Self, PointError> {
        match n.sign() {
            Sign::Minus => self.negate().scalar_mul(&-n),
            Sign::NoSign => Ok(Self::identity(self.curve())),
            Sign::Plus => {
                let mut bits = n.magnitude().clone();
                let mut power = self.clone();
                let mut acc = if bits.is_odd() {
                    self.clone()
                } else {
                    Self::identity(self.curve())
                };
                bits >>= 1usize;
                while !bits.is_zero() {
                    power = power.double()?;
                    if bits.is_odd() {
                        acc = acc.add(&power)?;
                    }
                    bits >>= 1usize;
                }
                Ok(acc)
            }
        }
    }
}
