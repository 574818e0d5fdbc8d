use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("attempted to divide by zero in the field")]
    DivisionByZero,
}

/// Descriptor of a prime field `GF(p)` with a runtime modulus.
///
/// Cheap to clone (the modulus is shared behind an `Arc`), compared by
/// modulus value. Primality is not verified here; `invert` relies on the
/// modulus being an odd prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: Arc<BigUint>,
}

impl PrimeField {
    /// Panics if `modulus < 2`.
    pub fn new(modulus: BigUint) -> Self {
        assert!(modulus > BigUint::one(), "field modulus must be at least 2");
        Self {
            modulus: Arc::new(modulus),
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Canonical residue of a signed integer; negative inputs map to
    /// `p - |n| mod p`.
    pub fn element(&self, n: impl Into<BigInt>) -> FieldElement {
        let reduced = n.into().mod_floor(&BigInt::from((*self.modulus).clone()));
        FieldElement {
            value: reduced.magnitude().clone(),
            field: self.clone(),
        }
    }

    /// Big-endian bytes, reduced mod p.
    pub fn from_bytes_be(&self, bytes: &[u8]) -> FieldElement {
        FieldElement {
            value: BigUint::from_bytes_be(bytes) % &*self.modulus,
            field: self.clone(),
        }
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement {
            value: BigUint::zero(),
            field: self.clone(),
        }
    }

    pub fn one(&self) -> FieldElement {
        FieldElement {
            value: BigUint::one(),
            field: self.clone(),
        }
    }
}

/// An element of a [`PrimeField`], stored as the canonical residue below
/// the modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    field: PrimeField,
}

impl FieldElement {
    pub fn inner(&self) -> &BigUint {
        &self.value
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// Multiplicative inverse via Fermat's little theorem
    /// (`x^(p-2) mod p`), valid since the modulus is prime.
    pub fn invert(&self) -> Result<Self, FieldError> {
        if self.value.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        let exponent = self.field.modulus() - BigUint::from(2u8);
        Ok(Self {
            value: self.value.modpow(&exponent, self.field.modulus()),
            field: self.field.clone(),
        })
    }

    pub fn divide(&self, rhs: &Self) -> Result<Self, FieldError> {
        Ok(self * &rhs.invert()?)
    }

    fn assert_same_field(&self, rhs: &Self) {
        assert!(
            self.field == rhs.field,
            "operands belong to different prime fields"
        );
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<'a, 'b> std::ops::Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> Self::Output {
        self.assert_same_field(rhs);
        FieldElement {
            value: (&self.value + &rhs.value) % self.field.modulus(),
            field: self.field.clone(),
        }
    }
}

impl std::ops::Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl std::ops::Add<&FieldElement> for FieldElement {
    type Output = Self;
    fn add(self, rhs: &Self) -> Self::Output {
        &self + rhs
    }
}

impl std::ops::Add<FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: FieldElement) -> Self::Output {
        self + &rhs
    }
}

impl std::ops::AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = &*self + &rhs;
    }
}

impl std::ops::AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &Self) {
        *self = &*self + rhs;
    }
}

impl<'a, 'b> std::ops::Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> Self::Output {
        self.assert_same_field(rhs);
        // lhs < p and rhs < p, so p + lhs - rhs never underflows
        FieldElement {
            value: (self.field.modulus() + &self.value - &rhs.value) % self.field.modulus(),
            field: self.field.clone(),
        }
    }
}

impl std::ops::Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl std::ops::Sub<&FieldElement> for FieldElement {
    type Output = Self;
    fn sub(self, rhs: &Self) -> Self::Output {
        &self - rhs
    }
}

impl std::ops::Sub<FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: FieldElement) -> Self::Output {
        self - &rhs
    }
}

impl std::ops::SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = &*self - &rhs;
    }
}

impl<'a, 'b> std::ops::Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> Self::Output {
        self.assert_same_field(rhs);
        FieldElement {
            value: (&self.value * &rhs.value) % self.field.modulus(),
            field: self.field.clone(),
        }
    }
}

impl std::ops::Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl std::ops::Mul<&FieldElement> for FieldElement {
    type Output = Self;
    fn mul(self, rhs: &Self) -> Self::Output {
        &self * rhs
    }
}

impl std::ops::Mul<FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: FieldElement) -> Self::Output {
        self * &rhs
    }
}

impl std::ops::MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = &*self * &rhs;
    }
}

impl std::ops::MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &Self) {
        *self = &*self * rhs;
    }
}

impl std::ops::Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        let value = if self.value.is_zero() {
            BigUint::zero()
        } else {
            self.field.modulus() - &self.value
        };
        FieldElement {
            value,
            field: self.field.clone(),
        }
    }
}

impl std::ops::Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn small_field() -> PrimeField {
        PrimeField::new(BigUint::from(17u8))
    }

    #[test]
    fn reduction_on_construction() {
        let f = small_field();
        assert_eq!(f.element(21), f.element(4));
        assert_eq!(f.element(-1), f.element(16));
        assert_eq!(f.element(-21), f.element(13));
        assert_eq!(f.from_bytes_be(&[0x15]), f.element(4));
    }

    #[test]
    fn operations_with_small_modulus() {
        let f = small_field();
        let a = f.element(15);
        let b = f.element(9);
        assert_eq!(&a + &b, f.element(7));
        assert_eq!(&a * &b, f.element(16));
        assert_eq!(&a - &b, f.element(6));
        assert_eq!(&b - &a, f.element(11));
        assert_eq!(-&a, f.element(2));
        assert_eq!(-f.zero(), f.zero());

        let mut c = a.clone();
        c += &b;
        c -= f.element(7);
        assert!(c.is_zero());
        c += f.one();
        c *= &b;
        assert_eq!(c, b);
    }

    #[test]
    fn inversion() {
        let f = small_field();
        for n in 1..17 {
            let x = f.element(n);
            let x_inv = x.invert().unwrap();
            assert!((x * x_inv).is_one());
        }
        assert_eq!(f.zero().invert(), Err(FieldError::DivisionByZero));
        assert_eq!(f.element(3).divide(&f.element(5)).unwrap(), f.element(4));
        assert_eq!(
            f.element(3).divide(&f.zero()),
            Err(FieldError::DivisionByZero)
        );
    }

    #[test]
    fn large_modulus_arithmetic() {
        let q = BigUint::parse_bytes(
            b"73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
            16,
        )
        .unwrap();
        let f = PrimeField::new(q.clone());
        let a = f.element(-1);
        assert_eq!(a.inner(), &(&q - 1u8));
        assert!((&a + &f.one()).is_zero());
        assert!((&a * &a).is_one());

        let x = f.from_bytes_be(&q.to_bytes_be());
        assert!(x.is_zero());

        assert_eq!(f.from_bytes_be(&a.to_bytes_be()), a);
        assert_eq!(f.zero().to_bytes_be(), vec![0]);
    }

    #[test]
    #[should_panic(expected = "different prime fields")]
    fn mixed_field_operands() {
        let a = small_field().element(3);
        let b = PrimeField::new(BigUint::from(19u8)).element(3);
        let _ = &a + &b;
    }
}
