//! Floating-point complex arithmetic with NaN/Infinity sentinel semantics.

use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_traits::{Float, FromPrimitive, Inv, One, Zero};
use std::fmt;

/// A complex number `re + im*i` over IEEE-754 floats.
///
/// The type carries two sentinel classifications instead of raising errors:
/// a value is NaN when either component is NaN, and NaN is sticky through
/// every operation; a value is infinite when it is not NaN and at least one
/// component is infinite, standing for the single unsigned complex infinity.
/// Division by the exact zero value yields the NaN sentinel rather than an
/// error, so callers inspect [`Complex::is_nan`] / [`Complex::is_infinite`]
/// instead of handling a `Result`.
///
/// Unlike plain floats, two NaN values compare equal to each other, so the
/// type can implement `Eq` and `Hash`. No ordering is provided at all; a
/// total order over the complex plane is not meaningful, and callers that
/// need one can order by [`Complex::abs`].
#[derive(Clone, Debug, Copy)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

/// Alias for a complex number with `f32` components.
pub type Complex32 = Complex<f32>;
/// Alias for a complex number with `f64` components.
pub type Complex64 = Complex<f64>;

impl<T> Complex<T> {
    /// Creates a complex number from its real and imaginary parts.
    #[inline]
    pub const fn new(re: T, im: T) -> Self {
        Complex { re, im }
    }
}

impl<T: Float> Complex<T> {
    /// The imaginary unit `i`.
    #[inline]
    pub fn i() -> Self {
        Complex::new(T::zero(), T::one())
    }

    /// The NaN sentinel, with both components NaN.
    #[inline]
    pub fn nan() -> Self {
        Complex::new(T::nan(), T::nan())
    }

    /// The sentinel for the unsigned complex infinity.
    #[inline]
    pub fn infinity() -> Self {
        Complex::new(T::infinity(), T::infinity())
    }

    /// Whether either component is NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// Whether this value is classified as the complex infinity: not NaN,
    /// with at least one infinite component.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        !self.is_nan() && (self.re.is_infinite() || self.im.is_infinite())
    }

    /// The magnitude `sqrt(re^2 + im^2)`, computed by scaling with the
    /// larger-magnitude component so the intermediate square cannot
    /// overflow or underflow.
    pub fn abs(self) -> T {
        if self.is_nan() {
            return T::nan();
        }
        if self.is_infinite() {
            return T::infinity();
        }
        if self.re.abs() < self.im.abs() {
            if self.im.is_zero() {
                return self.re.abs();
            }
            let q = self.re / self.im;
            self.im.abs() * (T::one() + q * q).sqrt()
        } else {
            if self.re.is_zero() {
                return self.im.abs();
            }
            let q = self.im / self.re;
            self.re.abs() * (T::one() + q * q).sqrt()
        }
    }

    /// The principal natural logarithm, `(ln(abs(self)), atan2(im, re))`.
    pub fn ln(self) -> Self {
        if self.is_nan() {
            return Complex::nan();
        }
        Complex::new(self.abs().ln(), self.im.atan2(self.re))
    }

    /// The exponential `e^re * (cos(im) + i sin(im))`.
    pub fn exp(self) -> Self {
        if self.is_nan() {
            return Complex::nan();
        }
        let e = self.re.exp();
        Complex::new(e * self.im.cos(), e * self.im.sin())
    }

    /// The general complex power through the principal logarithm,
    /// `exp(exp * ln(self))`. Edge cases follow from that composition
    /// rather than from any integer-exponent special case; in particular
    /// `0^0` is NaN because `ln(0)` has an infinite real part.
    #[inline]
    pub fn pow(self, exp: Self) -> Self {
        (self.ln() * exp).exp()
    }

    /// The multiplicative inverse. The inverse of zero is the infinity
    /// sentinel and the inverse of an infinite value is zero; otherwise
    /// this uses the same magnitude-branching formula as division.
    pub fn recip(self) -> Self {
        if self.is_nan() {
            return Complex::nan();
        }
        if self.re.is_zero() && self.im.is_zero() {
            return Complex::infinity();
        }
        if self.is_infinite() {
            return Complex::zero();
        }

        if self.re.abs() < self.im.abs() {
            let q = self.re / self.im;
            let scale = (self.re * q + self.im).recip();
            Complex::new(scale * q, -scale)
        } else {
            let q = self.im / self.re;
            let scale = (self.im * q + self.re).recip();
            Complex::new(scale, -scale * q)
        }
    }
}

impl<T: Float> From<T> for Complex<T> {
    /// Create a `Complex` representation of a real number.
    #[inline]
    fn from(re: T) -> Self {
        Complex::new(re, T::zero())
    }
}

impl<T: Float> Add for Complex<T> {
    type Output = Complex<T>;
    #[inline]
    fn add(self, rhs: Complex<T>) -> Complex<T> {
        if self.is_nan() || rhs.is_nan() {
            return Complex::nan();
        }
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Float> Sub for Complex<T> {
    type Output = Complex<T>;
    #[inline]
    fn sub(self, rhs: Complex<T>) -> Complex<T> {
        if self.is_nan() || rhs.is_nan() {
            return Complex::nan();
        }
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: Float> Mul for Complex<T> {
    type Output = Complex<T>;
    fn mul(self, rhs: Complex<T>) -> Complex<T> {
        if self.is_nan() || rhs.is_nan() {
            return Complex::nan();
        }
        // the componentwise expansion would produce inf * 0 = NaN artifacts
        if self.is_infinite() || rhs.is_infinite() {
            return Complex::infinity();
        }
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl<T: Float> Div for Complex<T> {
    type Output = Complex<T>;

    /// Division by the exact zero value yields NaN; a finite value divided
    /// by an infinite one is zero. The general case is Smith's algorithm:
    /// branch on which divisor component is larger in magnitude and scale
    /// by their ratio, so neither branch can overflow on a divisor with one
    /// very large component. The two branches are not interchangeable under
    /// floating rounding.
    fn div(self, rhs: Complex<T>) -> Complex<T> {
        if self.is_nan() || rhs.is_nan() {
            return Complex::nan();
        }
        if rhs.re.is_zero() && rhs.im.is_zero() {
            return Complex::nan();
        }
        if rhs.is_infinite() && !self.is_infinite() {
            return Complex::zero();
        }

        if rhs.re.abs() < rhs.im.abs() {
            let q = rhs.re / rhs.im;
            let denom = rhs.re * q + rhs.im;
            Complex::new(
                (self.re * q + self.im) / denom,
                (self.im * q - self.re) / denom,
            )
        } else {
            let q = rhs.im / rhs.re;
            let denom = rhs.im * q + rhs.re;
            Complex::new(
                (self.im * q + self.re) / denom,
                (self.im - self.re * q) / denom,
            )
        }
    }
}

macro_rules! scalar_arith_impl {
    (impl $imp:ident, $method:ident) => {
        // Route scalars through the full complex impl
        // so the NaN/Infinity sentinel rules hold
        impl<T: Float> $imp<T> for Complex<T> {
            type Output = Complex<T>;
            #[inline]
            fn $method(self, rhs: T) -> Complex<T> {
                self.$method(Complex::from(rhs))
            }
        }
    };
}

scalar_arith_impl!(impl Add, add);
scalar_arith_impl!(impl Sub, sub);
scalar_arith_impl!(impl Mul, mul);
scalar_arith_impl!(impl Div, div);

impl<T: Float> Neg for Complex<T> {
    type Output = Complex<T>;
    #[inline]
    fn neg(self) -> Complex<T> {
        Complex::new(-self.re, -self.im)
    }
}

impl<T: Float> Inv for Complex<T> {
    type Output = Complex<T>;
    #[inline]
    fn inv(self) -> Complex<T> {
        self.recip()
    }
}

impl<T: Float> Zero for Complex<T> {
    #[inline]
    fn zero() -> Self {
        Complex::new(T::zero(), T::zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl<T: Float> One for Complex<T> {
    #[inline]
    fn one() -> Self {
        Complex::new(T::one(), T::zero())
    }
    #[inline]
    fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }
}

impl<T: Float> PartialEq for Complex<T> {
    /// Componentwise value equality, except that any two NaN-classified
    /// values are equal to each other. This deliberately diverges from the
    /// plain float convention so that the NaN sentinel behaves as a single
    /// value.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() {
            self.is_nan() && other.is_nan()
        } else {
            self.re == other.re && self.im == other.im
        }
    }
}

// NaN == NaN above makes equality reflexive
impl<T: Float> Eq for Complex<T> {}

fn hash_component<T: Float, H: Hasher>(x: T, state: &mut H) {
    // fold -0.0 into 0.0 so the hash agrees with ==
    let x = if x == T::zero() { T::zero() } else { x };
    let (mant, exp, sign) = x.integer_decode();
    mant.hash(state);
    exp.hash(state);
    sign.hash(state);
}

impl<T: Float> Hash for Complex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_nan() {
            // all NaN-classified values are equal, give them one hash
            state.write_u8(7);
        } else {
            hash_component(self.re, state);
            hash_component(self.im, state);
        }
    }
}

impl<T: Float> FromPrimitive for Complex<T> {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        T::from(n).map(Complex::from)
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        T::from(n).map(Complex::from)
    }

    #[inline]
    fn from_f64(f: f64) -> Option<Self> {
        T::from(f).map(Complex::from)
    }
}

impl<T: Float + fmt::Display> fmt::Display for Complex<T> {
    /// Canonical form `<re><sign><im>i` with an explicit `+` for a
    /// non-negative imaginary part, which is always shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.re)?;
        if self.im >= T::zero() {
            write!(f, "+")?;
        }
        write!(f, "{}i", self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    pub const ONE_TWO: Complex64 = Complex::new(1.0, 2.0);
    pub const THREE_FOUR: Complex64 = Complex::new(3.0, 4.0);

    fn assert_close(a: Complex64, b: Complex64) {
        assert!(
            (a.re - b.re).abs() < 1e-10 && (a.im - b.im).abs() < 1e-10,
            "{} != {}",
            a,
            b
        );
    }

    #[test]
    fn classification_test() {
        assert!(Complex64::nan().is_nan());
        assert!(Complex::new(1.0, f64::NAN).is_nan());
        assert!(Complex::new(f64::NAN, 1.0).is_nan());
        assert!(!Complex64::nan().is_infinite());

        assert!(Complex64::infinity().is_infinite());
        assert!(Complex::new(f64::NEG_INFINITY, 0.0).is_infinite());
        assert!(Complex::new(0.0, f64::INFINITY).is_infinite());
        // NaN wins over an infinite component
        assert!(Complex::new(f64::INFINITY, f64::NAN).is_nan());
        assert!(!Complex::new(f64::INFINITY, f64::NAN).is_infinite());

        assert!(!ONE_TWO.is_nan());
        assert!(!ONE_TWO.is_infinite());
        assert!(Complex64::zero().is_zero());
        assert!(Complex64::one().is_one());
        assert_eq!(Complex64::i(), Complex::new(0.0, 1.0));
    }

    #[test]
    fn equality_test() {
        assert_eq!(Complex64::nan(), Complex64::nan());
        assert_eq!(Complex64::nan(), Complex::new(f64::NAN, 0.0));
        assert_eq!(ONE_TWO, Complex::new(1.0, 2.0));
        assert_ne!(ONE_TWO, Complex::new(1.0, 3.0));
        assert_ne!(ONE_TWO, Complex64::nan());
        assert_eq!(Complex::new(0.0, 0.0), Complex::new(-0.0, -0.0));
    }

    #[test]
    fn nan_propagation_test() {
        let nan = Complex64::nan();
        assert!((nan + Complex::new(1.0, 1.0)).is_nan());
        assert!((Complex::new(1.0, 1.0) - nan).is_nan());
        assert!((nan * Complex64::infinity()).is_nan());
        assert!((Complex::new(1.0, 1.0) / nan).is_nan());
        assert!(nan.recip().is_nan());
        assert!(nan.ln().is_nan());
        assert!(nan.exp().is_nan());
        assert!((-nan).is_nan());
        assert!(nan.abs().is_nan());
    }

    #[test]
    fn add_sub_test() {
        assert_eq!(ONE_TWO + THREE_FOUR, Complex::new(4.0, 6.0));
        assert_eq!(THREE_FOUR - ONE_TWO, Complex::new(2.0, 2.0));
        assert_eq!(ONE_TWO - ONE_TWO, Complex::zero());
        assert_eq!(-ONE_TWO, Complex::new(-1.0, -2.0));
    }

    #[test]
    fn mul_test() {
        assert_eq!(ONE_TWO * THREE_FOUR, Complex::new(-5.0, 10.0));
        assert_eq!(Complex64::i() * Complex::i(), Complex::new(-1.0, 0.0));

        // any infinite operand collapses to the sentinel, never to NaN
        let inf = Complex::new(f64::INFINITY, 0.0);
        assert!((Complex::new(1.0, 1.0) * inf).is_infinite());
        assert!((Complex::new(0.0, 0.0) * inf).is_infinite());
        assert!((inf * inf).is_infinite());
    }

    #[test]
    fn div_test() {
        // both Smith branches, exact in binary floating point
        assert_eq!(Complex::new(-5.0, 10.0) / THREE_FOUR, ONE_TWO);
        assert_eq!(Complex::new(10.0, 5.0) / Complex::new(4.0, 3.0), Complex::new(55.0 / 25.0, -10.0 / 25.0));
        assert_eq!(ONE_TWO / Complex::one(), ONE_TWO);

        // dividing by exact zero is undefined, not infinite
        assert!((Complex::new(1.0, 0.0) / Complex::zero()).is_nan());
        // a finite value over an infinite one vanishes
        assert_eq!(ONE_TWO / Complex::infinity(), Complex::zero());

        // a divisor component whose square would overflow must stay usable
        assert_close(
            Complex::new(1e308, 0.0) / Complex::new(1e308, 1.0),
            Complex::one(),
        );
    }

    #[test]
    fn recip_test() {
        assert!(Complex64::zero().recip().is_infinite());
        assert_eq!(Complex64::infinity().recip(), Complex::zero());
        assert_eq!(Complex::from(2.0).recip(), Complex::from(0.5));
        assert_eq!(Complex::new(0.0, 2.0).recip(), Complex::new(0.0, -0.5));
        assert_close(ONE_TWO.recip().recip(), ONE_TWO);
        assert_eq!(ONE_TWO.inv(), ONE_TWO.recip());
    }

    #[test]
    fn abs_test() {
        assert_eq!(THREE_FOUR.abs(), 5.0);
        assert_eq!(Complex::new(-3.0, 4.0).abs(), 5.0);
        assert_eq!(Complex::new(0.0, -7.0).abs(), 7.0);
        assert_eq!(Complex::new(-7.0, 0.0).abs(), 7.0);
        assert_eq!(Complex64::zero().abs(), 0.0);
        assert_eq!(Complex64::infinity().abs(), f64::INFINITY);

        // the scaled formula survives components whose square overflows;
        // powers of two keep every intermediate step exact
        let big = 2f64.powi(600);
        assert_eq!(Complex::new(3.0 * big, 4.0 * big).abs(), 5.0 * big);
    }

    #[test]
    fn ln_exp_test() {
        assert_eq!(Complex64::one().ln(), Complex::zero());
        assert_eq!(Complex64::zero().exp(), Complex::one());
        assert_close(Complex64::i().ln(), Complex::new(0.0, std::f64::consts::FRAC_PI_2));
        assert_close(Complex::new(0.0, std::f64::consts::PI).exp(), Complex::new(-1.0, 0.0));

        for z in [ONE_TWO, THREE_FOUR, Complex::new(-1.0, 0.5)] {
            assert_close(z.ln().exp(), z);
        }
    }

    #[test]
    fn pow_test() {
        assert_close(Complex::from(2.0).pow(Complex::from(10.0)), Complex::from(1024.0));
        assert_close(Complex::new(1.0, 1.0).pow(Complex::from(2.0)), Complex::new(0.0, 2.0));
        assert_close(Complex64::i().pow(Complex::from(2.0)), Complex::from(-1.0));

        // 0^0 composes through ln(0) and comes out NaN
        assert!(Complex64::zero().pow(Complex::zero()).is_nan());
    }

    #[test]
    fn scalar_arithmetic_test() {
        assert_eq!(ONE_TWO + 1.0, Complex::new(2.0, 2.0));
        assert_eq!(ONE_TWO - 1.0, Complex::new(0.0, 2.0));
        assert_eq!(ONE_TWO * 2.0, Complex::new(2.0, 4.0));
        assert_eq!(ONE_TWO / 2.0, Complex::new(0.5, 1.0));
        assert!((Complex64::nan() + 1.0).is_nan());
        assert!((ONE_TWO / 0.0).is_nan());
    }

    #[test]
    fn from_primitive_test() {
        assert_eq!(Complex64::from_i64(-3), Some(Complex::new(-3.0, 0.0)));
        assert_eq!(Complex64::from_u64(3), Some(Complex::new(3.0, 0.0)));
        assert_eq!(Complex64::from_f64(0.5), Some(Complex::new(0.5, 0.0)));
        assert_eq!(Complex::from(2.5), Complex::new(2.5, 0.0));
    }

    #[test]
    fn display_test() {
        assert_eq!(Complex::new(2.0, -3.0).to_string(), "2-3i");
        assert_eq!(Complex::new(2.0, 3.0).to_string(), "2+3i");
        assert_eq!(Complex64::zero().to_string(), "0+0i");
        assert_eq!(Complex::new(-1.5, 0.0).to_string(), "-1.5+0i");
    }

    #[test]
    fn hash_test() {
        let mut set = HashSet::new();
        set.insert(Complex64::nan());
        set.insert(Complex::new(f64::NAN, 0.0));
        set.insert(Complex::new(0.0, 0.0));
        set.insert(Complex::new(-0.0, -0.0));
        set.insert(ONE_TWO);
        assert_eq!(set.len(), 3);
    }
}
