use std::fmt;

use thiserror::Error;

use crate::arithmetic::FieldElement;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("curve parameters give a zero discriminant (singular curve)")]
    Singular,
}

/// A twisted Edwards curve `a·x² + y² = 1 + d·x²·y²` over a prime field.
///
/// The discriminant `a·d·(a−d)⁴` and the j-invariant
/// `16·(a² + 14ad + d²)³ / disc` are computed once at construction; a zero
/// discriminant (singular curve) is rejected there and nowhere else.
#[derive(Clone, Debug)]
pub struct TwistedEdwardsCurve {
    a: FieldElement,
    d: FieldElement,
    disc: FieldElement,
    j: FieldElement,
}

impl TwistedEdwardsCurve {
    /// # Panics
    ///
    /// Panics if `a` and `d` are elements of different prime fields; the
    /// parameters of one curve share one field by contract.
    pub fn new(a: FieldElement, d: FieldElement) -> Result<Self, CurveError> {
        let disc = &(&a * &d) * &(&a - &d).square().square();
        // a zero discriminant is exactly the case where this inversion fails
        let disc_inv = disc.invert().map_err(|_| CurveError::Singular)?;

        let field = a.field();
        let s = &(&a.square() + &(&(&field.element(14) * &a) * &d)) + &d.square();
        let j = &(&field.element(16) * &(&s.square() * &s)) * &disc_inv;

        Ok(Self { a, d, disc, j })
    }

    /// Whether `(x, y)` satisfies the curve equation. Coordinates from a
    /// different field are simply not on the curve.
    pub fn contains(&self, x: &FieldElement, y: &FieldElement) -> bool {
        if x.field() != self.field() || y.field() != self.field() {
            return false;
        }
        let x2 = x.square();
        let y2 = y.square();
        &(&self.a * &x2) + &y2 == &self.field().one() + &(&(&self.d * &x2) * &y2)
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn d(&self) -> &FieldElement {
        &self.d
    }

    pub fn field(&self) -> &crate::arithmetic::PrimeField {
        self.a.field()
    }

    pub fn discriminant(&self) -> &FieldElement {
        &self.disc
    }

    pub fn j_invariant(&self) -> &FieldElement {
        &self.j
    }
}

impl PartialEq for TwistedEdwardsCurve {
    fn eq(&self, other: &Self) -> bool {
        // disc and j are derived from (a, d)
        self.a == other.a && self.d == other.d
    }
}

impl Eq for TwistedEdwardsCurve {}

impl fmt::Display for TwistedEdwardsCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x^2 + y^2 = 1 + {}x^2y^2", self.a, self.d)
    }
}
