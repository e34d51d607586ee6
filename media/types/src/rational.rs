/*!
    Rational number type for frame rates.
*/

use std::fmt;

/**
    A rational number represented as a numerator and denominator.

    Used for frame rates (e.g. 24000/1001 for 23.976 fps) so NTSC-style
    rates round-trip exactly from source to sink.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /**
        Invert the rational, turning a frame rate into a frame duration.

        # Panics

        Panics if numerator is zero.
    */
    #[inline]
    pub const fn invert(self) -> Self {
        assert!(self.num != 0, "cannot invert zero");
        Self {
            num: self.den,
            den: self.num,
        }
    }

    /**
        Returns true if this rational is positive.
    */
    #[inline]
    pub const fn is_positive(self) -> bool {
        (self.num > 0) == (self.den > 0) && self.num != 0
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

impl From<(i32, i32)> for Rational {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(num, den)
    }
}

impl From<i32> for Rational {
    fn from(num: i32) -> Self {
        Self::new(num, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rational() {
        let r = Rational::new(30, 1);
        assert_eq!(r.num, 30);
        assert_eq!(r.den, 1);
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn to_f64_conversion() {
        assert_eq!(Rational::new(30, 1).to_f64(), 30.0);
        assert_eq!(Rational::new(24000, 1001).to_f64(), 24000.0 / 1001.0);
    }

    #[test]
    fn invert_frame_rate() {
        let rate = Rational::new(30000, 1001);
        let duration = rate.invert();
        assert_eq!(duration.num, 1001);
        assert_eq!(duration.den, 30000);
    }

    #[test]
    fn is_positive() {
        assert!(Rational::new(30, 1).is_positive());
        assert!(Rational::new(-30, -1).is_positive());
        assert!(!Rational::new(0, 1).is_positive());
        assert!(!Rational::new(-1, 1).is_positive());
    }

    #[test]
    fn from_tuple() {
        let r: Rational = (25, 1).into();
        assert_eq!(r.num, 25);
        assert_eq!(r.den, 1);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rational::new(24000, 1001)), "24000/1001");
    }
}
