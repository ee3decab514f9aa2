//! Exact rational arithmetic over fixed-width signed integers.

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use num_integer::Integer;
use num_traits::{Float, FromPrimitive, Inv, NumCast, One, Signed, ToPrimitive, Zero};
use std::fmt;

/// A helper trait to define valid component types for [`Rational`]:
/// fixed-width signed integers such as `i32` or `i64`.
pub trait RationalBase: Integer + Signed + NumCast + Copy {}
impl<T: Integer + Signed + NumCast + Copy> RationalBase for T {}

/// An exact fraction `numerator / denominator`.
///
/// The fraction is kept in lowest terms with a strictly positive denominator
/// after every construction, so `6/4` and `3/2` are the same value and the
/// derived equality and hashing are structural. Every arithmetic operation
/// returns a new value; instances are immutable.
///
/// The backing integers are fixed-width. Arithmetic that overflows them
/// (including the cross-multiplication used by `Add`, `Sub` and the
/// comparison operators) is a documented limitation of this type and is not
/// checked.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Copy)]
pub struct Rational<T> {
    numer: T,
    denom: T, // always positive when reduced
}

/// Alias for a rational number backed by `i32` components.
pub type Rational32 = Rational<i32>;
/// Alias for a rational number backed by `i64` components.
pub type Rational64 = Rational<i64>;

/// Error produced by the fallible [`Rational`] constructors and division
/// helpers. These are the only failing conditions of the type; integer
/// overflow is unchecked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RationalError {
    kind: RationalErrorKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RationalErrorKind {
    ZeroDenominator,
    DivisionByZero,
}

impl RationalError {
    fn zero_denominator() -> Self {
        RationalError { kind: RationalErrorKind::ZeroDenominator }
    }

    fn division_by_zero() -> Self {
        RationalError { kind: RationalErrorKind::DivisionByZero }
    }

    /// Whether this error came from dividing (or inverting) a zero value,
    /// as opposed to constructing with a zero denominator.
    #[inline]
    pub fn is_division_by_zero(&self) -> bool {
        self.kind == RationalErrorKind::DivisionByZero
    }
}

impl fmt::Display for RationalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RationalErrorKind::ZeroDenominator => write!(f, "denominator must be non-zero"),
            RationalErrorKind::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for RationalError {}

impl<T> Rational<T> {
    #[inline]
    pub(crate) const fn new_raw(numer: T, denom: T) -> Self {
        Rational { numer, denom }
    }

    /// Returns the numerator of the fraction (carries the sign).
    #[inline]
    pub fn numer(&self) -> &T {
        &self.numer
    }

    /// Returns the denominator of the fraction. Always positive.
    #[inline]
    pub fn denom(&self) -> &T {
        &self.denom
    }

    /// Takes the fraction apart as `(numerator, denominator)`.
    #[inline]
    pub fn into_parts(self) -> (T, T) {
        (self.numer, self.denom)
    }
}

impl<T: RationalBase> Rational<T> {
    fn reduce(&mut self) {
        if self.denom.is_zero() {
            panic!("denominator == 0");
        }

        let g = self.numer.gcd(&self.denom);
        self.numer = self.numer / g;
        self.denom = self.denom / g;

        // keep denom positive
        if self.denom < T::zero() {
            self.numer = -self.numer;
            self.denom = -self.denom;
        }
    }

    /// Creates a fraction from the given numerator and denominator, reduced
    /// to lowest terms with the sign carried by the numerator.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero; use [`Rational::try_new`] to get an error
    /// value instead.
    #[inline]
    pub fn new(numer: T, denom: T) -> Self {
        let mut ret = Rational::new_raw(numer, denom);
        ret.reduce();
        ret
    }

    /// Fallible variant of [`Rational::new`].
    #[inline]
    pub fn try_new(numer: T, denom: T) -> Result<Self, RationalError> {
        if denom.is_zero() {
            Err(RationalError::zero_denominator())
        } else {
            Ok(Rational::new(numer, denom))
        }
    }

    /// Creates a fraction from an exact decimal value given as
    /// `unscaled * 10^-scale`, e.g. `from_decimal(25, 2)` is `0.25 = 1/4`.
    ///
    /// `10^scale` must be representable in `T`.
    pub fn from_decimal(unscaled: T, scale: u32) -> Self {
        let two = T::one() + T::one();
        let ten = two * (two * two + T::one());
        let mut denom = T::one();
        for _ in 0..scale {
            denom = denom * ten;
        }
        Rational::new(unscaled, denom)
    }

    /// Creates the exact fraction equal to a finite float, via its binary
    /// mantissa/exponent decomposition. This is equivalent in lowest terms
    /// to routing through the float's exact decimal expansion.
    ///
    /// Returns `None` when the input is NaN or infinite, or when the exact
    /// fraction does not fit in `T`.
    pub fn from_float<F: Float>(f: F) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        if f.is_zero() {
            return Some(Rational::zero());
        }

        let (mant, exp, sign) = f.integer_decode();
        let (numer, denom) = if exp >= 0 {
            let mant = mant as u128;
            if (exp as u32) > mant.leading_zeros() {
                return None;
            }
            (T::from(mant << exp)?, T::one())
        } else {
            let shift = (-(exp as i32)) as u32;
            let cancel = shift.min(mant.trailing_zeros());
            let shift = shift - cancel;
            if shift >= 127 {
                return None;
            }
            (T::from(mant >> cancel)?, T::from(1u128 << shift)?)
        };

        // the mantissa was reduced against the power of two above,
        // so the pair is already in lowest terms
        let numer = if sign < 0 { -numer } else { numer };
        Some(Rational::new_raw(numer, denom))
    }

    /// Returns the multiplicative inverse, with the sign moved back to the
    /// numerator.
    ///
    /// # Panics
    ///
    /// Panics if this value is zero; use [`Rational::try_recip`] to get an
    /// error value instead.
    #[inline]
    pub fn recip(self) -> Self {
        if self.numer.is_zero() {
            panic!("division by zero");
        }
        Rational::new(self.denom, self.numer)
    }

    /// Fallible variant of [`Rational::recip`].
    #[inline]
    pub fn try_recip(self) -> Result<Self, RationalError> {
        if self.numer.is_zero() {
            Err(RationalError::division_by_zero())
        } else {
            Ok(self.recip())
        }
    }

    /// Fallible variant of the `/` operator.
    #[inline]
    pub fn try_div(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.numer.is_zero() {
            Err(RationalError::division_by_zero())
        } else {
            Ok(self / rhs)
        }
    }

    /// Fallible variant of the `%` operator.
    #[inline]
    pub fn try_rem(self, rhs: Self) -> Result<Self, RationalError> {
        if rhs.numer.is_zero() {
            Err(RationalError::division_by_zero())
        } else {
            Ok(self % rhs)
        }
    }

    /// Raises this value to a rational power, as a floating approximation.
    /// A rational base under a non-integer rational exponent is generally
    /// irrational, so the result is a float rather than a `Rational`.
    #[inline]
    pub fn pow(self, exp: Self) -> f64 {
        match (self.to_f64(), exp.to_f64()) {
            (Some(base), Some(exp)) => base.powf(exp),
            _ => f64::NAN,
        }
    }
}

impl<T: RationalBase> From<T> for Rational<T> {
    /// Create a `Rational` representation of an integer.
    #[inline]
    fn from(t: T) -> Self {
        Rational::new_raw(t, T::one())
    }
}

macro_rules! arith_impl {
    (impl $imp:ident, $method:ident) => {
        // Abstracts a/b `op` c/d = (a*d `op` c*b) / (b*d),
        // with a direct-numerator fast path when b == d
        impl<T: RationalBase> $imp for Rational<T> {
            type Output = Rational<T>;
            fn $method(self, rhs: Rational<T>) -> Rational<T> {
                if self.denom == rhs.denom {
                    return Rational::new(self.numer.$method(rhs.numer), self.denom);
                }
                Rational::new(
                    (self.numer * rhs.denom).$method(rhs.numer * self.denom),
                    self.denom * rhs.denom,
                )
            }
        }
        // Abstracts the a/b `op` c/1 = (a `op` b*c) / b pattern
        impl<T: RationalBase> $imp<T> for Rational<T> {
            type Output = Rational<T>;
            #[inline]
            fn $method(self, rhs: T) -> Rational<T> {
                Rational::new(self.numer.$method(self.denom * rhs), self.denom)
            }
        }
    };
}

arith_impl!(impl Add, add);
arith_impl!(impl Sub, sub);

impl<T: RationalBase> Mul for Rational<T> {
    type Output = Rational<T>;
    #[inline]
    fn mul(self, rhs: Rational<T>) -> Rational<T> {
        Rational::new(self.numer * rhs.numer, self.denom * rhs.denom)
    }
}

impl<T: RationalBase> Mul<T> for Rational<T> {
    type Output = Rational<T>;
    #[inline]
    fn mul(self, rhs: T) -> Rational<T> {
        Rational::new(self.numer * rhs, self.denom)
    }
}

impl<T: RationalBase> Div for Rational<T> {
    type Output = Rational<T>;
    #[inline]
    fn div(self, rhs: Rational<T>) -> Rational<T> {
        if rhs.numer.is_zero() {
            panic!("division by zero");
        }
        Rational::new(self.numer * rhs.denom, self.denom * rhs.numer)
    }
}

impl<T: RationalBase> Div<T> for Rational<T> {
    type Output = Rational<T>;
    #[inline]
    fn div(self, rhs: T) -> Rational<T> {
        if rhs.is_zero() {
            panic!("division by zero");
        }
        Rational::new(self.numer, self.denom * rhs)
    }
}

impl<T: RationalBase> Rem for Rational<T> {
    type Output = Rational<T>;

    /// Truncating remainder: `self - rhs * trunc(self / rhs)`, where the
    /// quotient is truncated toward zero through its floating value. This is
    /// not a floor modulo; for a negative dividend the result carries the
    /// dividend's sign.
    fn rem(self, rhs: Rational<T>) -> Rational<T> {
        let quot = self / rhs;
        let trunc = quot
            .to_f64()
            .and_then(|q| T::from(q.trunc()))
            // quotient too large for the float path, truncate in T directly
            .unwrap_or_else(|| quot.numer / quot.denom);
        self - rhs * trunc
    }
}

impl<T: RationalBase> Neg for Rational<T> {
    type Output = Rational<T>;
    #[inline]
    fn neg(self) -> Rational<T> {
        Rational::new_raw(-self.numer, self.denom)
    }
}

impl<T: RationalBase> Inv for Rational<T> {
    type Output = Rational<T>;
    #[inline]
    fn inv(self) -> Rational<T> {
        self.recip()
    }
}

impl<T: RationalBase> Zero for Rational<T> {
    #[inline]
    fn zero() -> Self {
        Rational { numer: T::zero(), denom: T::one() }
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }
}

impl<T: RationalBase> One for Rational<T> {
    #[inline]
    fn one() -> Self {
        Rational { numer: T::one(), denom: T::one() }
    }
    #[inline]
    fn is_one(&self) -> bool {
        self.numer.is_one() && self.denom.is_one()
    }
}

impl<T: RationalBase> PartialOrd for Rational<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: RationalBase> Ord for Rational<T> {
    /// Compares by cross-multiplication, with a direct numerator comparison
    /// when the denominators agree. The cross products can overflow `T` for
    /// values near the representable range.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denom == other.denom {
            self.numer.cmp(&other.numer)
        } else {
            (self.numer * other.denom).cmp(&(other.numer * self.denom))
        }
    }
}

impl<T: RationalBase> FromPrimitive for Rational<T> {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        T::from(n).map(Rational::from)
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        T::from(n).map(Rational::from)
    }

    #[inline]
    fn from_f64(f: f64) -> Option<Self> {
        Rational::from_float(f)
    }
}

impl<T: RationalBase> ToPrimitive for Rational<T> {
    /// Truncates the floating quotient toward zero, so `-7/2` converts
    /// to `-3`.
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.to_f64().and_then(|f| f.to_i64())
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.to_f64().and_then(|f| f.to_u64())
    }

    /// The closest double to `numerator / denominator`. Lossy for fractions
    /// with no exact binary representation.
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(self.numer.to_f64()? / self.denom.to_f64()?)
    }
}

impl<T: fmt::Display + RationalBase> fmt::Display for Rational<T> {
    /// Canonical form: `numerator` alone when the value is an integer,
    /// `numerator/denominator` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
