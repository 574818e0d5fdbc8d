use std::fmt;

use super::{AffinePoint, GroupOps, PointError};
use crate::arithmetic::FieldElement;
use crate::curve::TwistedEdwardsCurve;

/// A curve point in extended coordinates `(X, Y, T, Z)` with `T = XY/Z`,
/// or the identity element.
///
/// The addition and doubling formulas are the HWCD 2008 ("Twisted Edwards
/// Curves Revisited") laws for an arbitrary parameter `a`; with `a = -1`
/// they reduce to the familiar Jubjub-style variants. Stored points are
/// normalized to `Z = 1` with
/// `T = X·Y` rederived from the normalized coordinates; the quadruple is
/// scratch inside `add`/`double` and the result is divided by `Z3` before
/// it is wrapped.
///
/// Negation flips both `X` and `T`, keeping `T = XY/Z` and
/// `P + negate(P) = identity` consistent with the addition law.
#[derive(Clone, Debug)]
pub struct ExtendedPoint {
    curve: TwistedEdwardsCurve,
    coords: Option<(FieldElement, FieldElement, FieldElement, FieldElement)>,
}

impl ExtendedPoint {
    /// Validates by reducing to affine first; `z = 0` surfaces the field's
    /// division error. `t` is rederived from the normalized `x`, `y`, so
    /// the stored invariant `T = X·Y` holds regardless of the input.
    pub fn new(
        curve: &TwistedEdwardsCurve,
        x: FieldElement,
        y: FieldElement,
        _t: FieldElement,
        z: FieldElement,
    ) -> Result<Self, PointError> {
        let z_inv = z.invert()?;
        let x = &x * &z_inv;
        let y = &y * &z_inv;
        if !curve.contains(&x, &y) {
            return Err(PointError::NotOnCurve);
        }
        let t = &x * &y;
        Ok(Self::finite_unchecked(
            curve.clone(),
            x,
            y,
            t,
            curve.field().one(),
        ))
    }

    pub(super) fn finite_unchecked(
        curve: TwistedEdwardsCurve,
        x: FieldElement,
        y: FieldElement,
        t: FieldElement,
        z: FieldElement,
    ) -> Self {
        Self {
            curve,
            coords: Some((x, y, t, z)),
        }
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(x, _, _, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, y, _, _)| y)
    }

    pub fn t(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, _, t, _)| t)
    }

    pub fn z(&self) -> Option<&FieldElement> {
        self.coords.as_ref().map(|(_, _, _, z)| z)
    }

    pub fn to_affine(&self) -> AffinePoint {
        match &self.coords {
            None => AffinePoint::identity(&self.curve),
            // z is 1 by the storage invariant
            Some((x, y, _, _)) => {
                AffinePoint::finite_unchecked(self.curve.clone(), x.clone(), y.clone())
            }
        }
    }
}

impl GroupOps for ExtendedPoint {
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
            Some((x, y, t, z)) => {
                Self::finite_unchecked(self.curve.clone(), -x, y.clone(), -t, z.clone())
            }
        }
    }

    fn add(&self, rhs: &Self) -> Result<Self, PointError> {
        if self.curve != rhs.curve {
            return Err(PointError::CurveMismatch);
        }
        let ((x1, y1, t1, z1), (x2, y2, t2, z2)) = match (&self.coords, &rhs.coords) {
            (None, _) => return Ok(rhs.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(p), Some(q)) => (p, q),
        };

        // HWCD 2008 section 3.1, unified addition:
        //   A = X1 X2, B = Y1 Y2, C = d T1 T2, D = Z1 Z2
        //   E = (X1 + Y1)(X2 + Y2) - A - B, F = D - C, G = D + C, H = B - a A
        //   X3 = E F, Y3 = G H, T3 = E H, Z3 = F G
        let a = x1 * x2;
        let b = y1 * y2;
        let c = &(self.curve.d() * t1) * t2;
        let d = z1 * z2;
        let e = &(&(x1 + y1) * &(x2 + y2)) - &(&a + &b);
        let f = &d - &c;
        let g = &d + &c;
        let h = &b - &(self.curve.a() * &a);

        let x3 = &e * &f;
        let y3 = &g * &h;
        let z3 = &f * &g;

        let z_inv = z3.invert()?;
        let x = &x3 * &z_inv;
        let y = &y3 * &z_inv;
        let t = &x * &y;
        Ok(Self::finite_unchecked(
            self.curve.clone(),
            x,
            y,
            t,
            self.curve.field().one(),
        ))
    }

    fn double(&self) -> Result<Self, PointError> {
        let (x1, y1, z1) = match &self.coords {
            None => return Ok(self.clone()),
            Some((x, y, _, z)) => (x, y, z),
        };

        // HWCD 2008 section 3.3 doubling:
        //   A = X1^2, B = Y1^2, C = 2 Z1^2, D = a A
        //   E = (X1 + Y1)^2 - A - B, G = D + B, F = G - C, H = D - B
        //   X3 = E F, Y3 = G H, T3 = E H, Z3 = F G
        let field = self.curve.field();
        let a = x1.square();
        let b = y1.square();
        let c = &field.element(2) * &z1.square();
        let d = self.curve.a() * &a;
        let e = &(&(x1 + y1).square() - &a) - &b;
        let g = &d + &b;
        let f = &g - &c;
        let h = &d - &b;

        let x3 = &e * &f;
        let y3 = &g * &h;
        let z3 = &f * &g;

        let z_inv = z3.invert()?;
        let x = &x3 * &z_inv;
        let y = &y3 * &z_inv;
        let t = &x * &y;
        Ok(Self::finite_unchecked(
            self.curve.clone(),
            x,
            y,
            t,
            field.one(),
        ))
    }
}

impl PartialEq for ExtendedPoint {
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve {
            return false;
        }
        match (&self.coords, &other.coords) {
            (None, None) => true,
            (None, Some((x, y, _, _))) | (Some((x, y, _, _)), None) => x.is_zero() && y.is_one(),
            (Some((x1, y1, t1, z1)), Some((x2, y2, t2, z2))) => {
                x1 == x2 && y1 == y2 && t1 == t2 && z1 == z2
            }
        }
    }
}

impl Eq for ExtendedPoint {}

impl std::ops::Neg for &ExtendedPoint {
    type Output = ExtendedPoint;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for ExtendedPoint {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for ExtendedPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            None => write!(f, "Identity"),
            Some((x, y, t, z)) => write!(f, "({} : {} : {} : {})", x, y, t, z),
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::fixtures::*;
    use super::*;
    use crate::arithmetic::PrimeField;
    use num_bigint::{BigInt, BigUint};

    fn base_point() -> ExtendedPoint {
        let curve = jubjub();
        let one = curve.field().one();
        let t = &known_x() * &known_y();
        ExtendedPoint::new(&curve, known_x(), known_y(), t, one).unwrap()
    }

    #[test]
    fn construction_normalizes() {
        let curve = jubjub();
        let f = curve.field().clone();
        let p = base_point();
        assert!(p.z().unwrap().is_one());
        assert_eq!(p.t().unwrap(), &(&known_x() * &known_y()));

        // an inconsistent t is rederived from the normalized coordinates
        let q = ExtendedPoint::new(&curve, known_x(), known_y(), f.element(42), f.one()).unwrap();
        assert_eq!(q, p);

        assert_eq!(
            ExtendedPoint::new(&curve, f.element(1), f.element(1), f.element(1), f.one()),
            Err(PointError::NotOnCurve)
        );
        assert_eq!(
            ExtendedPoint::new(&curve, known_x(), known_y(), f.zero(), f.zero()),
            Err(PointError::Field(
                crate::arithmetic::FieldError::DivisionByZero
            ))
        );
    }

    #[test]
    fn identity_and_inverse_laws() {
        let curve = jubjub();
        let p = base_point();
        let id = ExtendedPoint::identity(&curve);

        assert_eq!(p.add(&id).unwrap(), p);
        assert_eq!(id.add(&p).unwrap(), p);
        assert_eq!(p.add(&p.negate()).unwrap(), id);
        assert_eq!(p.negate().add(&p).unwrap(), id);
        assert_eq!(p.subtract(&p).unwrap(), id);
    }

    #[test]
    fn negation_preserves_t_invariant() {
        let p = base_point().negate();
        let (x, y, t) = (p.x().unwrap(), p.y().unwrap(), p.t().unwrap());
        assert_eq!(t, &(x * y));
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
    fn general_curve_parameter_a() {
        // a = 3 is a square and d = 2 a non-square mod 13, so the unified
        // law is complete; (2, 3) generates the full order-16 group
        let f = PrimeField::new(BigUint::from(13u8));
        let curve = TwistedEdwardsCurve::new(f.element(3), f.element(2)).unwrap();
        let p = AffinePoint::new(&curve, f.element(2), f.element(3)).unwrap();

        let doubled = p.to_extended().double().unwrap();
        assert!(curve.contains(doubled.x().unwrap(), doubled.y().unwrap()));
        assert_eq!(
            doubled.to_affine(),
            AffinePoint::new(&curve, f.element(8), f.element(7)).unwrap()
        );

        for n in 1i64..=16 {
            let n = BigInt::from(n);
            let ext = p.to_extended().scalar_mul(&n).unwrap();
            assert_eq!(ext.to_affine(), p.scalar_mul(&n).unwrap());
            if let (Some(x), Some(y)) = (ext.x(), ext.y()) {
                assert!(curve.contains(x, y));
            }
        }
    }

    #[test]
    fn results_stay_normalized_and_on_curve() {
        let curve = jubjub();
        let q = base_point().scalar_mul(&BigInt::from(117)).unwrap();
        assert!(q.z().unwrap().is_one());
        assert_eq!(q.t().unwrap(), &(q.x().unwrap() * q.y().unwrap()));
        assert!(curve.contains(q.x().unwrap(), q.y().unwrap()));
    }
}
