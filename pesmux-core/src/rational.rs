//! Rational number type for precise time base representation.

use std::fmt;

/// A rational number represented as a numerator and denominator.
///
/// Used for precise representation of time bases and rescale factors.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    /// Numerator
    pub num: i64,
    /// Denominator (must be positive)
    pub den: i64,
}

impl Rational {
    /// Create a new rational number, normalizing the sign onto the
    /// numerator.
    ///
    /// # Panics
    ///
    /// Panics if denominator is zero.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator must be non-zero");
        if den < 0 {
            Self {
                num: -num,
                den: -den,
            }
        } else {
            Self { num, den }
        }
    }

    /// Divide out the greatest common divisor.
    pub fn reduce(&self) -> Self {
        if self.num == 0 {
            return Self { num: 0, den: 1 };
        }
        let divisor = gcd(self.num.unsigned_abs(), self.den.unsigned_abs()) as i64;
        Self {
            num: self.num / divisor,
            den: self.den / divisor,
        }
    }

    /// Convert to f64.
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Rescale a tick value from this time base into `target`.
    ///
    /// The conversion factor is `self / target`; everything is widened
    /// to 128 bits first so tick values near the i64 range cannot
    /// overflow the intermediate product.
    pub fn rescale(&self, value: i64, target: Rational) -> i64 {
        let factor_num = self.num as i128 * target.den as i128;
        let factor_den = self.den as i128 * target.num as i128;
        (value as i128 * factor_num / factor_den) as i64
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_sign() {
        let r = Rational::new(1, -2);
        assert_eq!(r.num, -1);
        assert_eq!(r.den, 2);
    }

    #[test]
    fn test_reduce() {
        let r = Rational::new(90000, 1000).reduce();
        assert_eq!(r.num, 90);
        assert_eq!(r.den, 1);
    }

    #[test]
    fn test_rescale_exact() {
        // 1/1000 -> 1/90000: multiply by 90
        let ms = Rational::new(1, 1000);
        let mpeg = Rational::new(1, 90000);
        assert_eq!(ms.rescale(5000, mpeg), 450_000);
        assert_eq!(ms.rescale(4000, mpeg), 360_000);
    }

    #[test]
    fn test_rescale_identity() {
        let mpeg = Rational::new(1, 90000);
        assert_eq!(mpeg.rescale(12345, mpeg), 12345);
    }

    #[test]
    fn test_rescale_large_values() {
        // A tick value near the 33-bit PTS wrap times a large timescale must
        // not overflow the intermediate product.
        let tb = Rational::new(1, 1_000_000);
        let mpeg = Rational::new(1, 90000);
        let input: i64 = 1 << 52;
        let expected = (input as i128 * 90000 / 1_000_000) as i64;
        assert_eq!(tb.rescale(input, mpeg), expected);
    }

    #[test]
    #[should_panic(expected = "denominator must be non-zero")]
    fn test_zero_denominator_panics() {
        let _ = Rational::new(1, 0);
    }
}
