//! Exact highest-averages quotients.
//!
//! A quotient is kept as the unreduced pair `seats / divisor`. Ordering and
//! equality cross-multiply in `u64`, so two mathematically equal quotients
//! from different entities always compare `Equal` (no float rounding).

use core::cmp::Ordering;
use core::fmt;
use core::num::NonZeroU32;

/// `seats / divisor`, compared exactly.
#[derive(Clone, Copy, Debug)]
pub struct Quotient {
    seats: u32,
    divisor: NonZeroU32,
}

impl Quotient {
    #[inline]
    pub fn new(seats: u32, divisor: NonZeroU32) -> Self {
        Self { seats, divisor }
    }

    /// Seat weight of the owning entity (the numerator, never reduced).
    #[inline]
    pub fn seats(&self) -> u32 { self.seats }

    #[inline]
    pub fn divisor(&self) -> u32 { self.divisor.get() }

    /// Display value. Never use this for comparisons.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.seats) / f64::from(self.divisor.get())
    }

    /// True when the quotient is a whole number.
    #[inline]
    pub fn is_integral(&self) -> bool {
        self.seats % self.divisor.get() == 0
    }
}

impl Ord for Quotient {
    fn cmp(&self, other: &Self) -> Ordering {
        // a/b ? c/d  <=>  a*d ? c*b  (u32*u32 always fits u64)
        let lhs = u64::from(self.seats) * u64::from(other.divisor.get());
        let rhs = u64::from(other.seats) * u64::from(self.divisor.get());
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Quotient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl PartialEq for Quotient {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Quotient {}

impl fmt::Display for Quotient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.seats, self.divisor)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Quotient {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut st = s.serialize_struct("Quotient", 3)?;
        st.serialize_field("seats", &self.seats)?;
        st.serialize_field("divisor", &self.divisor.get())?;
        st.serialize_field("value", &self.as_f64())?;
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: u32, d: u32) -> Quotient {
        Quotient::new(s, NonZeroU32::new(d).unwrap())
    }

    #[test]
    fn equal_across_entities() {
        assert_eq!(q(10, 2), q(5, 1));
        assert_eq!(q(14, 7), q(2, 1));
        assert_eq!(q(9, 3), q(6, 2));
    }

    #[test]
    fn thirds_do_not_drift() {
        // 7/21 and 1/3 are the same value even though the f64 paths differ.
        assert_eq!(q(7, 21), q(1, 3));
        assert_eq!(q(7, 21).cmp(&q(1, 3)), Ordering::Equal);
    }

    #[test]
    fn ordering() {
        assert!(q(14, 1) > q(7, 1));
        assert!(q(14, 3) > q(7, 2));
        assert!(q(5, 2) < q(3, 1));
        assert!(q(0, 1) < q(1, 40));
    }

    #[test]
    fn display_helpers() {
        assert!(q(6, 3).is_integral());
        assert!(!q(14, 3).is_integral());
        assert_eq!(q(7, 2).as_f64(), 3.5);
        assert_eq!(q(7, 2).to_string(), "7/2");
    }
}
