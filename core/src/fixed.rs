//! Fixed-point arithmetic for all hashed simulation state.
//!
//! RULE: Every field that is stepped or hashed uses `Fixed`.
//! Native floats are allowed only at construction (`from_f64`)
//! and presentation (`to_f64`). Float results are not guaranteed
//! bit-identical across platforms and compilers; integer results are.
//!
//! Representation: signed Q47.16. The raw `i64` holds value × 2^16.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

pub const FRAC_BITS: u32 = 16;

/// Raw encoding of 1.0.
pub const FIXED_ONE: i64 = 1 << FRAC_BITS;

/// Hash quantization scale: fields are hashed as trunc(value × 1000).
pub const QUANTIZE_SCALE: i64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed(i64);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(FIXED_ONE);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn from_int(n: i64) -> Self {
        Self(n << FRAC_BITS)
    }

    /// `num / den`, truncated toward zero. Panics if `den` is zero.
    pub fn from_fraction(num: i64, den: i64) -> Self {
        assert!(den != 0, "from_fraction: zero denominator");
        Self((((num as i128) << FRAC_BITS) / den as i128) as i64)
    }

    /// Construction only. Never call this inside a per-tick update.
    pub fn from_f64(v: f64) -> Self {
        Self((v * FIXED_ONE as f64).round() as i64)
    }

    /// Presentation only. Never feed the result back into state or a hash.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_ONE as f64
    }

    /// trunc(value × 1000), computed on the raw integer.
    /// Truncates toward zero; sub-unit differences collapse to the same value.
    pub fn quantize_milli(self) -> i64 {
        ((self.0 as i128 * QUANTIZE_SCALE as i128) / FIXED_ONE as i128) as i64
    }

    pub fn checked_div(self, rhs: Fixed) -> Option<Fixed> {
        if rhs.0 == 0 {
            return None;
        }
        Some(Fixed((((self.0 as i128) << FRAC_BITS) / rhs.0 as i128) as i64))
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn abs(self) -> Fixed {
        Fixed(self.0.wrapping_abs())
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i128 * rhs.0 as i128) >> FRAC_BITS) as i64)
    }
}

impl Div for Fixed {
    type Output = Fixed;
    /// Panics on division by zero, like integer division.
    fn div(self, rhs: Fixed) -> Fixed {
        self.checked_div(rhs).expect("Fixed division by zero")
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_and_div_stay_exact_for_representable_values() {
        let a = Fixed::from_fraction(3, 2);
        let b = Fixed::from_int(4);
        assert_eq!(a * b, Fixed::from_int(6));
        assert_eq!(Fixed::from_int(6) / b, a);
    }

    #[test]
    fn mul_floors_negative_products() {
        // -1/65536 * 0.5 = -1/131072, floored to -1/65536
        let tiny = Fixed::from_raw(-1);
        assert_eq!(tiny * Fixed::from_fraction(1, 2), Fixed::from_raw(-1));
    }

    #[test]
    fn division_by_zero_is_reported_by_checked_div() {
        assert_eq!(Fixed::ONE.checked_div(Fixed::ZERO), None);
    }

    #[test]
    fn quantize_truncates_toward_zero() {
        assert_eq!(Fixed::from_fraction(5, 2).quantize_milli(), 2500);
        // 0.0015 is not exactly representable; both signs truncate toward zero
        let v = Fixed::from_f64(0.0015);
        assert_eq!(v.quantize_milli(), 1);
        assert_eq!((-v).quantize_milli(), -1);
    }

    #[test]
    fn serializes_as_raw_integer() {
        let v = Fixed::from_fraction(1, 2);
        assert_eq!(serde_json::to_string(&v).unwrap(), "32768");
        let back: Fixed = serde_json::from_str("32768").unwrap();
        assert_eq!(back, v);
    }
}
