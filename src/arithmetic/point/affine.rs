use std::fmt;

use super::{ExtendedPoint, GroupOps, PointError, ProjectivePoint};
use crate::arithmetic::FieldElement;
use crate::curve::TwistedEdwardsCurve;

/// A curve point in affine coordinates `(x, y)`, or the identity element,
/// which carries no coordinates.
///
/// Explicit construction validates the curve equation; results of group
/// operations are produced by formulas that preserve it and skip the
/// recheck.
#[derive(Clone, Debug)]
pub struct AffinePoint {
    curve: TwistedEdwardsCurve,
    coords: Option<(FieldElement, FieldElement)>,
}

impl AffinePoint {
    pub fn new(
        curve: &TwistedEdwardsCurve,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<Self, PointError> {
        if !curve.contains(&x, &y) {
            return Err(PointError::NotOnCurve);
        }
        Ok(Self::finite_unchecked(curve.clone(), x, y))
    }

    pub(super) fn finite_unchecked(
        curve: TwistedEdwardsCurve,
        x: FieldElement,
        y: FieldElement,
    ) -> Self {
        Self {
            curve,
            coords: Some((x, y)),
        }
    }

    /// `None` for the identity element.
    pub fn x(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, y)| y)
    }

    pub fn to_projective(&self) -> ProjectivePoint {
        match &self.coords {
            None => ProjectivePoint::identity(&self.curve),
            Some((x, y)) => ProjectivePoint::finite_unchecked(
                self.curve.clone(),
                x.clone(),
                y.clone(),
                self.curve.field().one(),
            ),
        }
    }

    pub fn to_extended(&self) -> ExtendedPoint {
        match &self.coords {
            None => ExtendedPoint::identity(&self.curve),
            Some((x, y)) => ExtendedPoint::finite_unchecked(
                self.curve.clone(),
                x.clone(),
                y.clone(),
                x * y,
                self.curve.field().one(),
            ),
        }
    }
}

impl GroupOps for AffinePoint {
    fn curve(&self) -> &TwistedEdwardsCurve {
        &self.curve
    }

    fn identity(curve: &TwistedEdwardsCurve) -> Self {
        Self {
            curve: curve.clone(),
            coords: None,
        }
    }

    fn is_identity(&self) -> bool {
        self.coords.is_none()
    }

    /// `(x, y) ↦ (−x, y)`: the identity is `(0, 1)`, so the inverse flips
    /// the `x` coordinate.
    fn negate(&self) -> Self {
        match &self.coords {
            None => self.clone(),
            Some((x, y)) => Self::finite_unchecked(self.curve.clone(), -x, y.clone()),
        }
    }

    fn add(&self, rhs: &Self) -> Result<Self, PointError> {
        if self.curve != rhs.curve {
            return Err(PointError::CurveMismatch);
        }
        let ((x1, y1), (x2, y2)) = match (&self.coords, &rhs.coords) {
            (None, _) => return Ok(rhs.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(p), Some(q)) => (p, q),
        };

        // unified twisted Edwards addition:
        //   x3 = (x1 y2 + y1 x2) / (1 + d x1 x2 y1 y2)
        //   y3 = (y1 y2 - a x1 x2) / (1 - d x1 x2 y1 y2)
        let one = self.curve.field().one();
        let xx = x1 * x2;
        let yy = y1 * y2;
        let dxxyy = &(self.curve.d() * &xx) * &yy;

        let x3 = (&(x1 * y2) + &(y1 * x2)).divide(&(&one + &dxxyy))?;
        let y3 = (&yy - &(self.curve.a() * &xx)).divide(&(&one - &dxxyy))?;
        Ok(Self::finite_unchecked(self.curve.clone(), x3, y3))
    }

    fn double(&self) -> Result<Self, PointError> {
        self.add(self)
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve {
            return false;
        }
        match (&self.coords, &other.coords) {
            (None, None) => true,
            // the identity is the group-law neutral element (0, 1)
            (None, Some((x, y))) | (Some((x, y)), None) => x.is_zero() && y.is_one(),
            (Some((x1, y1)), Some((x2, y2))) => x1 == x2 && y1 == y2,
        }
    }
}

impl Eq for AffinePoint {}

impl std::ops::Neg for &AffinePoint {
    type Output = AffinePoint;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for AffinePoint {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            None => write!(f, "Identity"),
            Some((x, y)) => write!(f, "({}, {})", x, y),
        }
    }
}
