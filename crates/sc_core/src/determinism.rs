//! Determinism utilities: the total order used for the global ranking.
//!
//! I/O-free. The ranking order is:
//! 1. quotient value, descending (exact comparison);
//! 2. seat weight of the owning entity, descending;
//! 3. entity name, ascending;
//! 4. divisor, ascending.
//!
//! Steps 3 and 4 only matter for equal values between equally sized
//! entities; they make the order independent of input order.

use core::cmp::Ordering;

use crate::entities::{Entity, QuotientEntry};

/// Provide a **total**, stable order for values that must sort canonically.
pub trait StableOrd {
    fn stable_cmp(&self, other: &Self) -> Ordering;
}

impl StableOrd for QuotientEntry {
    #[inline]
    fn stable_cmp(&self, other: &Self) -> Ordering {
        other
            .value
            .cmp(&self.value)
            .then_with(|| other.seats().cmp(&self.seats()))
            .then_with(|| self.entity_name.cmp(&other.entity_name))
            .then_with(|| self.divisor.cmp(&other.divisor))
    }
}

impl StableOrd for Entity {
    /// Larger seat weight first, then by name.
    #[inline]
    fn stable_cmp(&self, other: &Self) -> Ordering {
        other.seats.cmp(&self.seats).then_with(|| self.name.cmp(&other.name))
    }
}

/// Sort in place into canonical order.
#[inline]
pub fn sort_canonical<T: StableOrd>(xs: &mut [T]) {
    xs.sort_by(|a, b| a.stable_cmp(b));
}

/* ---------------------------------- Tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotient::Quotient;
    use core::num::NonZeroU32;

    fn entry(name: &str, seats: u32, divisor: u32) -> QuotientEntry {
        QuotientEntry {
            rank: 0,
            entity_name: name.into(),
            divisor,
            value: Quotient::new(seats, NonZeroU32::new(divisor).unwrap()),
            is_tie: false,
        }
    }

    fn order(mut xs: Vec<QuotientEntry>) -> Vec<(String, u32)> {
        sort_canonical(&mut xs);
        xs.into_iter().map(|e| (e.entity_name, e.divisor)).collect()
    }

    #[test]
    fn value_desc_first() {
        let got = order(vec![entry("B", 7, 1), entry("A", 14, 1), entry("A", 14, 2)]);
        assert_eq!(got, vec![("A".into(), 1), ("A".into(), 2), ("B".into(), 1)]);
    }

    #[test]
    fn equal_value_larger_entity_first() {
        // 10/2 == 5/1: the 10-seat entity wins the tie-break.
        let got = order(vec![entry("Small", 5, 1), entry("Large", 10, 2)]);
        assert_eq!(got, vec![("Large".into(), 2), ("Small".into(), 1)]);
    }

    #[test]
    fn equal_value_equal_seats_by_name() {
        let got = order(vec![entry("UWG", 2, 1), entry("ÖDP", 2, 1)]);
        // byte order: 'U' < 'Ö'
        assert_eq!(got, vec![("UWG".into(), 1), ("ÖDP".into(), 1)]);
    }
}
