//! Total ordering, equality and hashing for the storable primitives.
//!
//! Floats do not implement `Ord`/`Eq`/`Hash`; these traits paper over that
//! with a canonical total order (NaN compares greater than any number,
//! `-0.0` and `0.0` are identified).

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub trait TotalEq {
    fn tot_eq(&self, other: &Self) -> bool;
}

pub trait TotalOrd: TotalEq {
    fn tot_cmp(&self, other: &Self) -> Ordering;
}

pub trait TotalHash {
    fn tot_hash<H: Hasher>(&self, state: &mut H);
}

impl TotalEq for i64 {
    #[inline]
    fn tot_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl TotalOrd for i64 {
    #[inline]
    fn tot_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl TotalHash for i64 {
    #[inline]
    fn tot_hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(*self)
    }
}

impl TotalEq for f64 {
    #[inline]
    fn tot_eq(&self, other: &Self) -> bool {
        if self.is_nan() {
            other.is_nan()
        } else {
            self == other
        }
    }
}

impl TotalOrd for f64 {
    #[inline]
    fn tot_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl TotalHash for f64 {
    #[inline]
    fn tot_hash<H: Hasher>(&self, state: &mut H) {
        // Canonicalize so that tot_hash agrees with tot_eq.
        let canonical = if self.is_nan() {
            f64::NAN
        } else if *self == 0.0 {
            0.0
        } else {
            *self
        };
        state.write_u64(canonical.to_bits())
    }
}

impl TotalEq for String {
    #[inline]
    fn tot_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl TotalOrd for String {
    #[inline]
    fn tot_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl TotalHash for String {
    #[inline]
    fn tot_hash<H: Hasher>(&self, state: &mut H) {
        self.hash(state)
    }
}

impl<T: TotalEq + ?Sized> TotalEq for &T {
    #[inline]
    fn tot_eq(&self, other: &Self) -> bool {
        (*self).tot_eq(*other)
    }
}

impl<T: TotalHash + ?Sized> TotalHash for &T {
    #[inline]
    fn tot_hash<H: Hasher>(&self, state: &mut H) {
        (*self).tot_hash(state)
    }
}

/// Wrapper that lends `Hash`/`Eq` to types that only have the total variants,
/// so they can key a hashmap.
#[derive(Debug, Clone, Copy)]
pub struct TotalOrdWrap<T>(pub T);

impl<T: TotalEq> PartialEq for TotalOrdWrap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.tot_eq(&other.0)
    }
}

impl<T: TotalEq> Eq for TotalOrdWrap<T> {}

impl<T: TotalHash> Hash for TotalOrdWrap<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.tot_hash(state)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_float_total_order() {
        assert_eq!(1.0f64.tot_cmp(&2.0), Ordering::Less);
        assert_eq!(f64::NAN.tot_cmp(&f64::INFINITY), Ordering::Greater);
        assert!(f64::NAN.tot_eq(&f64::NAN));
        assert!(0.0f64.tot_eq(&-0.0));
    }

    #[test]
    fn test_zero_hash_consistency() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(v: f64) -> u64 {
            let mut h = DefaultHasher::new();
            v.tot_hash(&mut h);
            h.finish()
        }
        assert_eq!(hash_of(0.0), hash_of(-0.0));
        assert_eq!(hash_of(f64::NAN), hash_of(-f64::NAN));
    }
}
