use std::fmt;

use super::{AffinePoint, GroupOps, PointError};
use crate::arithmetic::FieldElement;
use crate::curve::TwistedEdwardsCurve;

/// A curve point in projective coordinates `(X, Y, Z)`, affine-equivalent
/// to `(X/Z, Y/Z)`, or the identity element.
///
/// Stored points are always normalized to `Z = 1`: the projective triple
/// is used as scratch inside `add`/`double` (BBJLP 2008 formulas) and the
/// result is divided by `Z3` before it is wrapped, matching the affine
/// representation operation for operation rather than deferring
/// inversions.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    curve: TwistedEdwardsCurve,
    coords: Option<(FieldElement, FieldElement, FieldElement)>,
}

impl ProjectivePoint {
    /// Validates by reducing to affine first; `z = 0` surfaces the field's
    /// division error.
    pub fn new(
        curve: &TwistedEdwardsCurve,
        x: FieldElement,
        y: FieldElement,
        z: FieldElement,
    ) -> Result<Self, PointError> {
        let z_inv = z.invert()?;
        let x = &x * &z_inv;
        let y = &y * &z_inv;
        if !curve.contains(&x, &y) {
            return Err(PointError::NotOnCurve);
        }
        Ok(Self::finite_unchecked(
            curve.clone(),
            x,
            y,
            curve.field().one(),
        ))
    }

    pub(super) fn finite_unchecked(
        curve: TwistedEdwardsCurve,
        x: FieldElement,
        y: FieldElement,
        z: FieldElement,
    ) -> Self {
        Self {
            curve,
            coords: Some((x, y, z)),
        }
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(x, _, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, y, _)| y)
    }

    pub fn z(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, _, z)| z)
    }

    pub fn to_affine(&self) -> AffinePoint {
        match &self.coords {
            None => AffinePoint::identity(&self.curve),
            // z is 1 by the storage invariant
            Some((x, y, _)) => {
                AffinePoint::finite_unchecked(self.curve.clone(), x.clone(), y.clone())
            }
        }
    }
}

impl GroupOps for ProjectivePoint {
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

    fn negate(&self) -> Self {
        match &self.coords {
            None => self.clone(),
            Some((x, y, z)) => {
                Self::finite_unchecked(self.curve.clone(), -x, y.clone(), z.clone())
            }
        }
    }

    fn add(&self, rhs: &Self) -> Result<Self, PointError> {
        if self.curve != rhs.curve {
            return Err(PointError::CurveMismatch);
        }
        let ((x1, y1, _), (x2, y2, _)) = match (&self.coords, &rhs.coords) {
            (None, _) => return Ok(rhs.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(p), Some(q)) => (p, q),
        };

        // BBJLP 2008 section 6 with Z1 = Z2 = 1:
        //   C = X1 X2, D = Y1 Y2, E = d C D
        //   X3 = (1 - E)((X1 + Y1)(X2 + Y2) - C - D)
        //   Y3 = (1 + E)(D - a C)
        //   Z3 = 1 - E^2
        let one = self.curve.field().one();
        let c = x1 * x2;
        let d = y1 * y2;
        let e = &(self.curve.d() * &c) * &d;

        let x3 = (&one - &e) * (&(&(x1 + y1) * &(x2 + y2)) - &c - &d);
        let y3 = (&one + &e) * (&d - &(self.curve.a() * &c));
        let z3 = &one - &e.square();

        let z_inv = z3.invert()?;
        Ok(Self::finite_unchecked(
            self.curve.clone(),
            &x3 * &z_inv,
            &y3 * &z_inv,
            one,
        ))
    }

    fn double(&self) -> Result<Self, PointError> {
        let (x1, y1) = match &self.coords {
            None => return Ok(self.clone()),
            Some((x, y, _)) => (x, y),
        };

        // BBJLP 2008 doubling with Z1 = 1:
        //   B = (X1 + Y1)^2, C = X1^2, D = Y1^2, E = a C, F = E + D
        //   X3 = (B - C - D)(F - 2), Y3 = F(E - D), Z3 = F^2 - 2F
        let field = self.curve.field();
        let two = field.element(2);
        let b = (x1 + y1).square();
        let c = x1.square();
        let d = y1.square();
        let e = self.curve.a() * &c;
        let f = &e + &d;

        let x3 = (&(&b - &c) - &d) * (&f - &two);
        let y3 = &f * &(&e - &d);
        let z3 = &f.square() - &(&two * &f);

        let z_inv = z3.invert()?;
        Ok(Self::finite_unchecked(
            self.curve.clone(),
            &x3 * &z_inv,
            &y3 * &z_inv,
            field.one(),
        ))
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve {
            return false;
        }
        match (&self.coords, &other.coords) {
            (None, None) => true,
            (None, Some((x, y, _))) | (Some((x, y, _)), None) => x.is_zero() && y.is_one(),
            (Some((x1, y1, z1)), Some((x2, y2, z2))) => x1 == x2 && y1 == y2 && z1 == z2,
        }
    }
}

impl Eq for ProjectivePoint {}

impl std::ops::Neg for &ProjectivePoint {
    type Output = ProjectivePoint;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for ProjectivePoint {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for ProjectivePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            None => write!(f, "Identity"),
            Some((x, y, z)) => write!(f, "({} : {} : {})", x, y, z),
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::fixtures::*;
    use super::*;
    use num_bigint::BigInt;

    fn base_point() -> ProjectivePoint {
        let curve = jubjub();
        let one = curve.field().one();
        ProjectivePoint::new(&curve, known_x(), known_y(), one).unwrap()
    }

    #[test]
    fn construction_normalizes() {
        let curve = jubjub();
        let f = curve.field().clone();
        let three = f.element(3);

        // (3X, 3Y, 3) reduces to the same point as (X, Y, 1)
        let scaled = ProjectivePoint::new(
            &curve,
            &known_x() * &three,
            &known_y() * &three,
            three,
        )
        .unwrap();
        assert_eq!(scaled, base_point());
        assert!(scaled.z().unwrap().is_one());

        assert_eq!(
            ProjectivePoint::new(&curve, f.element(1), f.element(1), f.one()),
            Err(PointError::NotOnCurve)
        );
        assert_eq!(
            ProjectivePoint::new(&curve, known_x(), known_y(), f.zero()),
            Err(PointError::Field(
                crate::arithmetic::FieldError::DivisionByZero
            ))
        );
    }

    #[test]
    fn identity_and_inverse_laws() {
        let curve = jubjub();
        let p = base_point();
        let id = ProjectivePoint::identity(&curve);

        assert_eq!(p.add(&id).unwrap(), p);
        assert_eq!(id.add(&p).unwrap(), p);
        assert_eq!(p.add(&p.negate()).unwrap(), id);
        assert_eq!(p.negate().add(&p).unwrap(), id);
        assert_eq!(p.subtract(&p).unwrap(), id);
    }

    #[test]
    fn group_laws() {
        let p = base_point();
        let q = p.double().unwrap();
        let r = p.scalar_mul(&BigInt::from(5)).unwrap();

        assert_eq!(p.add(&q).unwrap(), q.add(&p).unwrap());
        assert_eq!(
            p.add(&q).unwrap().add(&r).unwrap(),
            p.add(&q.add(&r).unwrap()).unwrap()
        );
        assert_eq!(p.double().unwrap(), p.add(&p).unwrap());
    }

    #[test]
    fn results_stay_normalized_and_on_curve() {
        let curve = jubjub();
        let p = base_point();
        let q = p.scalar_mul(&BigInt::from(117)).unwrap();
        assert!(q.z().unwrap().is_one());
        assert!(curve.contains(q.x().unwrap(), q.y().unwrap()));
    }
}
