//! Time base handling for timestamp rescaling.
//!
//! Elementary stream samples arrive with timestamps in the source
//! container's time scale; PES packets always carry 90 kHz ticks.

use crate::rational::Rational;

/// A time base for converting between timestamp units.
///
/// Common time bases:
/// - 1/90000 for MPEG-TS
/// - 1/48000 for 48kHz audio
/// - 1/1000 for milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBase(pub Rational);

impl TimeBase {
    /// Standard MPEG time base (1/90000).
    pub const MPEG: Self = Self(Rational { num: 1, den: 90000 });

    /// Millisecond time base (1/1000).
    pub const MILLISECONDS: Self = Self(Rational { num: 1, den: 1000 });

    /// Create a new time base from numerator and denominator.
    pub fn new(num: i64, den: i64) -> Self {
        Self(Rational::new(num, den))
    }

    /// Create a time base of `1/rate` from a tick rate in Hz.
    pub fn hz(rate: u32) -> Self {
        Self(Rational::new(1, rate as i64))
    }

    /// Convert a timestamp from this time base to another.
    pub fn convert(&self, value: i64, target: TimeBase) -> i64 {
        self.0.rescale(value, target.0)
    }

    /// Convert a tick value to seconds as f64.
    pub fn to_seconds(&self, value: i64) -> f64 {
        value as f64 * self.0.to_f64()
    }

    /// Get the time base as a rational.
    pub fn as_rational(&self) -> Rational {
        self.0
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::MPEG
    }
}

impl From<Rational> for TimeBase {
    fn from(r: Rational) -> Self {
        Self(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_to_mpeg() {
        let tb = TimeBase::hz(1000);
        // 1000 ticks at 1 kHz = 1 second = 90000 MPEG ticks
        assert_eq!(tb.convert(1000, TimeBase::MPEG), 90_000);
    }

    #[test]
    fn test_convert_identity() {
        let tb = TimeBase::hz(90000);
        assert_eq!(tb.convert(12345, TimeBase::MPEG), 12345);
    }

    #[test]
    fn test_to_seconds() {
        let secs = TimeBase::MPEG.to_seconds(90_000);
        assert!((secs - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_milliseconds_const() {
        assert_eq!(TimeBase::MILLISECONDS, TimeBase::hz(1000));
    }
}
