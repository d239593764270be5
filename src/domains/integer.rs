use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rug::{integer::Order, ops::Pow, Complete, Integer as MultiPrecisionInteger};

/// An arbitrary-precision integer that is stored in the smallest
/// representation that can hold its value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Natural(i64),
    Double(i128),
    Large(MultiPrecisionInteger),
}

macro_rules! from_with_cast {
    ($base: ty) => {
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::Natural(value as i64)
            }
        }
    };
}

from_with_cast!(i32);
from_with_cast!(i64);
from_with_cast!(u32);

impl PartialEq<i32> for Integer {
    #[inline]
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Integer::Natural(n) if *n == *other as i64)
    }
}

impl PartialEq<Integer> for i32 {
    #[inline]
    fn eq(&self, other: &Integer) -> bool {
        other == self
    }
}

impl PartialOrd<i32> for Integer {
    #[inline]
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        match self {
            Integer::Natural(n) => n.partial_cmp(&(*other as i64)),
            x if x.is_negative() => Some(Ordering::Less),
            _ => Some(Ordering::Greater),
        }
    }
}

impl PartialOrd<Integer> for i32 {
    #[inline]
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        other.partial_cmp(self).map(|x| x.reverse())
    }
}

impl From<i128> for Integer {
    #[inline]
    fn from(value: i128) -> Self {
        Integer::from_double(value)
    }
}

impl From<MultiPrecisionInteger> for Integer {
    /// Convert from a multi-precision integer to an Integer, potentially
    /// downcasting the number.
    #[inline]
    fn from(n: MultiPrecisionInteger) -> Self {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else if let Some(n) = n.to_i128() {
            Integer::Double(n)
        } else {
            Integer::Large(n)
        }
    }
}

impl FromStr for Integer {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() <= 20 {
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Integer::Natural(n));
            }
        }

        if s.len() <= 40 {
            if let Ok(n) = s.parse::<i128>() {
                return Ok(Integer::from_double(n));
            }
        }

        if let Ok(n) = s.parse::<MultiPrecisionInteger>() {
            Ok(Integer::from(n))
        } else {
            Err("Could not parse integer")
        }
    }
}

impl std::fmt::Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Natural(n) => std::fmt::Display::fmt(n, f),
            Self::Double(n) => std::fmt::Display::fmt(n, f),
            Self::Large(n) => std::fmt::Display::fmt(n, f),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Double(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer::zero()
    }
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    #[inline]
    fn simplify(&mut self) -> &mut Self {
        match self {
            Integer::Double(n) => {
                *self = Integer::from_double(*n);
            }
            Integer::Large(l) => {
                if let Some(n) = l.to_i64() {
                    *self = Integer::Natural(n);
                } else if let Some(n) = l.to_i128() {
                    *self = Integer::Double(n);
                }
            }
            _ => {}
        }
        self
    }

    #[inline]
    pub fn from_double(n: i128) -> Integer {
        if n >= i64::MIN as i128 && n <= i64::MAX as i128 {
            Integer::Natural(n as i64)
        } else {
            Integer::Double(n)
        }
    }

    /// Build an integer from its two's complement little-endian 64-bit limbs.
    pub fn from_signed_limbs(limbs: &[u64]) -> Integer {
        let negative = limbs.last().map(|l| (*l as i64) < 0).unwrap_or(false);
        if !negative {
            return Integer::from(MultiPrecisionInteger::from_digits(limbs, Order::Lsf));
        }

        // negate in place to obtain the magnitude
        let mut magnitude = limbs.to_vec();
        let mut carry = true;
        for l in &mut magnitude {
            *l = !*l;
            if carry {
                let (s, c) = l.overflowing_add(1);
                *l = s;
                carry = c;
            }
        }

        Integer::from(-MultiPrecisionInteger::from_digits(&magnitude, Order::Lsf))
    }

    pub fn to_multi_prec(self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => n.into(),
            Integer::Double(d) => d.into(),
            Integer::Large(l) => l,
        }
    }

    /// The magnitude as little-endian 64-bit limbs.
    pub fn magnitude_limbs(&self) -> Vec<u64> {
        match self {
            Integer::Natural(n) => vec![n.unsigned_abs()],
            Integer::Double(n) => {
                let m = n.unsigned_abs();
                vec![m as u64, (m >> 64) as u64]
            }
            Integer::Large(r) => r.as_abs().to_digits::<u64>(Order::Lsf),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 0,
            _ => false,
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 1,
            _ => false,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Double(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    /// Return `-1`, `0` or `1` depending on the sign.
    #[inline]
    pub fn signum(&self) -> i32 {
        match self {
            Integer::Natural(n) => n.signum() as i32,
            Integer::Double(n) => n.signum() as i32,
            Integer::Large(r) => match r.cmp0() {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            },
        }
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer::Natural(0)
    }

    #[inline]
    pub fn one() -> Integer {
        Integer::Natural(1)
    }

    #[inline]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            Integer::Natural(n) => Some(*n as i128),
            Integer::Double(n) => Some(*n),
            Integer::Large(_) => None,
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if *n == i64::MIN {
                    Integer::Double((*n as i128).abs())
                } else {
                    Integer::Natural(n.abs())
                }
            }
            Integer::Double(n) => {
                if *n == i128::MIN {
                    Integer::Large(MultiPrecisionInteger::from(*n).abs())
                } else {
                    Integer::Double(n.abs())
                }
            }
            Integer::Large(n) => Integer::Large(n.clone().abs()),
        }
    }

    /// The number of bits needed to represent the absolute value. Zero has zero bits.
    #[inline]
    pub fn bits(&self) -> u32 {
        match self {
            Integer::Natural(n) => u64::BITS - n.unsigned_abs().leading_zeros(),
            Integer::Double(n) => u128::BITS - n.unsigned_abs().leading_zeros(),
            Integer::Large(r) => r.significant_bits(),
        }
    }

    pub fn pow(&self, e: u32) -> Integer {
        if e == 0 {
            return Integer::one();
        }

        match self {
            Integer::Natural(n1) => {
                if let Some(pn) = n1.checked_pow(e) {
                    Integer::Natural(pn)
                } else if let Some(pn) = (*n1 as i128).checked_pow(e) {
                    Integer::Double(pn)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1).pow(e))
                }
            }
            Integer::Double(n1) => {
                if let Some(pn) = n1.checked_pow(e) {
                    Integer::Double(pn)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1).pow(e))
                }
            }
            Integer::Large(r) => Integer::Large(r.clone().pow(e)),
        }
    }

    /// Compute the quotient rounded towards negative infinity and the matching
    /// remainder, which has the sign of the divisor.
    pub fn quot_rem_floor(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        if let (Some(a), Some(b)) = (self.to_i128(), b.to_i128()) {
            if let Some((q, r)) = floor_div_rem_i128(a, b) {
                return (Integer::from_double(q), Integer::from_double(r));
            }
        }

        let a = self.clone().to_multi_prec();
        let b = b.clone().to_multi_prec();
        let (q, r) = a.div_rem_floor(b);
        (Integer::from(q), Integer::from(r))
    }

    /// Return `self / b` if `b` divides `self`.
    pub fn checked_div_exact(&self, b: &Integer) -> Option<Integer> {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        if let (Some(a), Some(b)) = (self.to_i128(), b.to_i128()) {
            if let (Some(q), Some(r)) = (a.checked_div(b), a.checked_rem(b)) {
                return if r == 0 {
                    Some(Integer::from_double(q))
                } else {
                    None
                };
            }
        }

        let a = self.clone().to_multi_prec();
        let b = b.clone().to_multi_prec();
        if a.is_divisible(&b) {
            Some(Integer::from(a.div_exact(&b)))
        } else {
            None
        }
    }

    /// Divide out all factors `p` from `self` and return how many were removed.
    /// `p` must be larger than one in absolute value.
    pub fn remove_factor(&mut self, p: &Integer) -> u32 {
        debug_assert!(p.bits() > 1);

        if let (Integer::Natural(n), Integer::Natural(pp)) = (&mut *self, p) {
            let mut count = 0;
            while *n != 0 && *n % *pp == 0 {
                *n /= *pp;
                count += 1;
            }
            return count;
        }

        let mut r = std::mem::take(self).to_multi_prec();
        let count = r.remove_factor_mut(&p.clone().to_multi_prec());
        *self = Integer::from(r);
        count
    }

    /// Return the smallest prime strictly larger than `self`.
    pub fn next_prime(&self) -> Integer {
        Integer::from(self.clone().to_multi_prec().next_prime())
    }

    /// Compute `self += b * c`, avoiding the allocation of the product when
    /// `self` is already a multi-precision integer.
    #[inline(always)]
    pub fn add_mul_assign(&mut self, b: &Integer, c: &Integer) {
        if let Integer::Large(l) = self {
            match (b, c) {
                (Integer::Natural(b1), Integer::Large(c1)) => l.add_assign(b1 * c1),
                (Integer::Double(b1), Integer::Large(c1)) => l.add_assign(b1 * c1),
                (Integer::Large(b1), Integer::Natural(c1)) => l.add_assign(b1 * c1),
                (Integer::Large(b1), Integer::Double(c1)) => l.add_assign(b1 * c1),
                (Integer::Large(b1), Integer::Large(c1)) => l.add_assign(b1 * c1),
                _ => {
                    return *self += b * c;
                }
            }

            self.simplify();
            return;
        }

        *self += b * c;
    }

    /// Compute `self -= b * c`.
    #[inline(always)]
    pub fn sub_mul_assign(&mut self, b: &Integer, c: &Integer) {
        if let Integer::Large(l) = self {
            match (b, c) {
                (Integer::Natural(b1), Integer::Large(c1)) => l.sub_assign(b1 * c1),
                (Integer::Double(b1), Integer::Large(c1)) => l.sub_assign(b1 * c1),
                (Integer::Large(b1), Integer::Natural(c1)) => l.sub_assign(b1 * c1),
                (Integer::Large(b1), Integer::Double(c1)) => l.sub_assign(b1 * c1),
                (Integer::Large(b1), Integer::Large(c1)) => l.sub_assign(b1 * c1),
                _ => {
                    return *self -= b * c;
                }
            }

            self.simplify();
            return;
        }

        *self -= b * c;
    }
}

/// Floor division on `i128`, or `None` on overflow.
#[inline]
pub(crate) fn floor_div_rem_i128(a: i128, b: i128) -> Option<(i128, i128)> {
    let mut q = a.checked_div(b)?;
    let mut r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        q -= 1;
        r += b;
    }
    Some((q, r))
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            (Integer::Natural(n1), Integer::Large(n2)) => n2.partial_cmp(n1).map_or(Ordering::Equal, Ordering::reverse),
            (Integer::Large(n1), Integer::Natural(n2)) => n1.partial_cmp(n2).unwrap_or(Ordering::Equal),
            (Integer::Large(n1), Integer::Large(n2)) => n1.cmp(n2),
            (Integer::Natural(n1), Integer::Double(n2)) => (*n1 as i128).cmp(n2),
            (Integer::Double(n1), Integer::Natural(n2)) => n1.cmp(&(*n2 as i128)),
            (Integer::Double(n1), Integer::Double(n2)) => n1.cmp(n2),
            (Integer::Double(n1), Integer::Large(n2)) => n2.partial_cmp(n1).map_or(Ordering::Equal, Ordering::reverse),
            (Integer::Large(n1), Integer::Double(n2)) => n1.partial_cmp(n2).unwrap_or(Ordering::Equal),
        }
    }
}

impl<'b> Add<&'b Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn add(self, rhs: &'b Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from(*n + r),
                Integer::Double(n) => Integer::from(*n + r),
                Integer::Large(n) => Integer::from(n + r),
            }
        } else {
            &self + rhs
        }
    }
}

impl Add<Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn add(self, rhs: Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from(n + r),
                Integer::Double(n) => Integer::from(n + r),
                Integer::Large(n) => Integer::from(n + r),
            }
        } else if let Integer::Large(r) = rhs {
            match self {
                Integer::Natural(n) => Integer::from(n + r),
                Integer::Double(n) => Integer::from(n + r),
                Integer::Large(n) => Integer::from(n + r),
            }
        } else {
            self + &rhs
        }
    }
}

impl<'a> Add<Integer> for &'a Integer {
    type Output = Integer;

    #[inline(always)]
    fn add(self, rhs: Integer) -> Integer {
        rhs + self
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline(always)]
    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_add(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Double(*n1 as i128 + *n2 as i128)
                }
            }
            (Integer::Natural(n1), Integer::Double(r2))
            | (Integer::Double(r2), Integer::Natural(n1)) => {
                if let Some(num) = (*n1 as i128).checked_add(*r2) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*r2) + *n1)
                }
            }
            (Integer::Double(r1), Integer::Double(r2)) => {
                if let Some(num) = r1.checked_add(*r2) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*r1) + *r2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from((*n1 + r2).complete()),
            (Integer::Double(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Double(n1)) => Integer::from((*n1 + r2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 + r2).complete()),
        }
    }
}

impl<'a> Sub<&'a Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, rhs: &Integer) -> Integer {
        if let Integer::Large(s) = self {
            match rhs {
                Integer::Natural(r) => Integer::from(s - r),
                Integer::Double(r) => Integer::from(s - r),
                Integer::Large(r) => Integer::from(s - r),
            }
        } else {
            &self - rhs
        }
    }
}

impl<'a> Sub<Integer> for &'a Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, rhs: Integer) -> Integer {
        if let Integer::Large(r) = rhs {
            match self {
                Integer::Natural(s) => Integer::from(*s - r),
                Integer::Double(s) => Integer::from(*s - r),
                Integer::Large(s) => Integer::from(s - r),
            }
        } else {
            self - &rhs
        }
    }
}

impl Sub<Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, rhs: Integer) -> Integer {
        if let Integer::Large(s) = self {
            match rhs {
                Integer::Natural(r) => Integer::from(s - r),
                Integer::Double(r) => Integer::from(s - r),
                Integer::Large(r) => Integer::from(s - r),
            }
        } else if let Integer::Large(r) = rhs {
            match self {
                Integer::Natural(s) => Integer::from(s - r),
                Integer::Double(s) => Integer::from(s - r),
                Integer::Large(s) => Integer::from(s - r),
            }
        } else {
            self - &rhs
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_sub(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Double(*n1 as i128 - *n2 as i128)
                }
            }
            (Integer::Natural(n1), Integer::Double(r2)) => {
                if let Some(num) = (*n1 as i128).checked_sub(*r2) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) - *r2)
                }
            }
            (Integer::Double(r1), Integer::Natural(r2)) => {
                if let Some(num) = r1.checked_sub(*r2 as i128) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*r1) - *r2)
                }
            }
            (Integer::Double(r1), Integer::Double(r2)) => {
                if let Some(num) = r1.checked_sub(*r2) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*r1) - *r2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2)) => Integer::from((*n1 - r2).complete()),
            (Integer::Large(r1), Integer::Natural(n2)) => Integer::from((r1 - *n2).complete()),
            (Integer::Double(n1), Integer::Large(r2)) => Integer::from((*n1 - r2).complete()),
            (Integer::Large(r1), Integer::Double(n2)) => Integer::from((r1 - *n2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 - r2).complete()),
        }
    }
}

impl<'a> Mul<&'a Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, rhs: &'a Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from(*n * r),
                Integer::Double(n) => Integer::from(*n * r),
                Integer::Large(n) => Integer::from(n * r),
            }
        } else {
            &self * rhs
        }
    }
}

impl<'a> Mul<Integer> for &'a Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, rhs: Integer) -> Integer {
        rhs * self
    }
}

impl Mul<Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, rhs: Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from(n * r),
                Integer::Double(n) => Integer::from(n * r),
                Integer::Large(n) => Integer::from(n * r),
            }
        } else if let Integer::Large(r) = rhs {
            match self {
                Integer::Natural(n) => Integer::from(n * r),
                Integer::Double(n) => Integer::from(n * r),
                Integer::Large(n) => Integer::from(n * r),
            }
        } else {
            self * &rhs
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_mul(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Double(*n1 as i128 * *n2 as i128)
                }
            }
            (Integer::Natural(n1), Integer::Double(r2))
            | (Integer::Double(r2), Integer::Natural(n1)) => {
                if let Some(num) = (*n1 as i128).checked_mul(*r2) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*r2) * *n1)
                }
            }
            (Integer::Double(r1), Integer::Double(r2)) => {
                if let Some(num) = r1.checked_mul(*r2) {
                    Integer::from_double(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*r1) * *r2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from((n1 * r2).complete()),
            (Integer::Double(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Double(n1)) => Integer::from((n1 * r2).complete()),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from((r1 * r2).complete()),
        }
    }
}

impl AddAssign<Integer> for Integer {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Integer) {
        if let Integer::Large(l) = self {
            match rhs {
                Integer::Natural(r) => l.add_assign(r),
                Integer::Double(r) => l.add_assign(r),
                Integer::Large(r) => l.add_assign(r),
            }

            self.simplify();
        } else {
            *self = rhs + &*self;
        }
    }
}

impl<'a> AddAssign<&'a Integer> for Integer {
    #[inline(always)]
    fn add_assign(&mut self, rhs: &'a Integer) {
        if let Integer::Large(l) = self {
            match rhs {
                Integer::Natural(r) => l.add_assign(*r),
                Integer::Double(r) => l.add_assign(*r),
                Integer::Large(r) => l.add_assign(r),
            }

            self.simplify();
        } else {
            *self = &*self + rhs;
        }
    }
}

impl SubAssign<Integer> for Integer {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Integer) {
        if let Integer::Large(l) = self {
            match rhs {
                Integer::Natural(r) => l.sub_assign(r),
                Integer::Double(r) => l.sub_assign(r),
                Integer::Large(r) => l.sub_assign(r),
            }

            self.simplify();
        } else {
            *self = &*self - rhs;
        }
    }
}

impl<'a> SubAssign<&'a Integer> for Integer {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: &'a Integer) {
        if let Integer::Large(l) = self {
            match rhs {
                Integer::Natural(r) => l.sub_assign(*r),
                Integer::Double(r) => l.sub_assign(*r),
                Integer::Large(r) => l.sub_assign(r),
            }

            self.simplify();
        } else {
            *self = &*self - rhs;
        }
    }
}

impl MulAssign<Integer> for Integer {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Integer) {
        if let Integer::Large(l) = self {
            match rhs {
                Integer::Natural(r) => l.mul_assign(r),
                Integer::Double(r) => l.mul_assign(r),
                Integer::Large(r) => l.mul_assign(r),
            }

            self.simplify();
        } else {
            *self = &*self * rhs;
        }
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: &'a Integer) {
        if let Integer::Large(l) = self {
            match rhs {
                Integer::Natural(r) => l.mul_assign(*r),
                Integer::Double(r) => l.mul_assign(*r),
                Integer::Large(r) => l.mul_assign(r),
            }

            self.simplify();
        } else {
            *self = &*self * rhs;
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Self::Output {
        match self {
            Integer::Natural(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::Natural(neg)
                } else {
                    Integer::Double((n as i128).neg())
                }
            }
            Integer::Double(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::from_double(neg)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(n).neg())
                }
            }
            Integer::Large(r) => Integer::from(-r),
        }
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Self::Output {
        match self {
            Integer::Natural(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::Natural(neg)
                } else {
                    Integer::Double((*n as i128).neg())
                }
            }
            Integer::Double(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::from_double(neg)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n).neg())
                }
            }
            Integer::Large(r) => Integer::from(r.clone().neg()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::ops::{Add, Mul, Sub};

    use rug::Complete;

    use super::Integer;

    #[test]
    fn binary_ops() {
        let a = Integer::from(5);
        let b: Integer = 7.into();

        assert_eq!(a < 5, false);
        assert_eq!(5 > a, false);
        assert_eq!(a < Integer::from(-891273892173892178922i128), false);

        macro_rules! try_variants {
            ($a: expr, $b: expr, $res: expr, $op: tt) => {
                assert_eq!($a.clone().$op(&$b), $res);
                assert_eq!($a.clone().$op($b.clone()), $res);
                assert_eq!((&$a).$op($b.clone()), $res);
                assert_eq!((&$a).$op(&$b), $res);
            };
        }

        try_variants!(a, b, 12, add);
        try_variants!(a, b, -2, sub);
        try_variants!(a, b, 35, mul);

        let a = Integer::from(5123123132i64).pow(5);
        let b: Integer = Integer::from(-312223132i64).pow(5);

        try_variants!(
            a,
            b,
            Integer::from(
                rug::Integer::parse("3529178341193418202448766865967598093745792000000")
                    .unwrap()
                    .complete()
            ),
            add
        );
        try_variants!(
            a,
            b,
            Integer::from(
                rug::Integer::parse("3529184275300451286008027827753913822719081764864")
                    .unwrap()
                    .complete()
            ),
            sub
        );
    }

    #[test]
    fn canonical_variant() {
        let a = Integer::from(i64::MAX) + &Integer::one();
        assert!(matches!(a, Integer::Double(_)));
        let b = a - &Integer::one();
        assert!(matches!(b, Integer::Natural(_)));

        let c = Integer::from(i128::MAX) * &Integer::from(4);
        assert!(matches!(c, Integer::Large(_)));
        let mut d = c.clone();
        d -= &c;
        assert_eq!(d, Integer::zero());
        assert!(d.is_zero());
    }

    #[test]
    fn floor_division() {
        let cases: [(i64, i64, i64, i64); 6] = [
            (7, 2, 3, 1),
            (-7, 2, -4, 1),
            (7, -2, -4, -1),
            (-7, -2, 3, -1),
            (-3, 2, -2, 1),
            (6, -3, -2, 0),
        ];

        for (a, b, q, r) in cases {
            let (qq, rr) = Integer::from(a).quot_rem_floor(&Integer::from(b));
            assert_eq!((qq, rr), (Integer::from(q), Integer::from(r)), "{} / {}", a, b);
        }

        let big: Integer = "-1000000000000000000000000000000000000001".parse().unwrap();
        let (q, r) = big.quot_rem_floor(&Integer::from(10));
        assert_eq!(r, Integer::from(9));
        assert_eq!(
            q,
            "-100000000000000000000000000000000000001"
                .parse::<Integer>()
                .unwrap()
        );

        let (q, r) = Integer::from(i64::MIN).quot_rem_floor(&Integer::from(-1));
        assert_eq!(q, Integer::from(i64::MAX) + &Integer::one());
        assert!(r.is_zero());
    }

    #[test]
    fn exact_division_and_factors() {
        assert_eq!(
            Integer::from(12).checked_div_exact(&Integer::from(4)),
            Some(Integer::from(3))
        );
        assert_eq!(Integer::from(12).checked_div_exact(&Integer::from(5)), None);

        let large = Integer::from(3).pow(100);
        assert_eq!(
            large.checked_div_exact(&Integer::from(3).pow(98)),
            Some(Integer::from(9))
        );
        assert_eq!(large.checked_div_exact(&Integer::from(2)), None);

        let mut k = Integer::from(2).pow(5) * Integer::from(3).pow(70);
        assert_eq!(k.remove_factor(&Integer::from(2)), 5);
        assert_eq!(k.remove_factor(&Integer::from(3)), 70);
        assert!(k.is_one());
    }

    #[test]
    fn primes_and_bits() {
        assert_eq!(Integer::one().next_prime(), Integer::from(2));
        assert_eq!(Integer::from(2).next_prime(), Integer::from(3));
        assert_eq!(Integer::from(13).next_prime(), Integer::from(17));

        assert_eq!(Integer::zero().bits(), 0);
        assert_eq!(Integer::from(-8).bits(), 4);
        assert_eq!(Integer::from(2).pow(100).bits(), 101);
        assert_eq!(Integer::from(-5).signum(), -1);
    }

    #[test]
    fn signed_limbs() {
        assert_eq!(Integer::from_signed_limbs(&[5, 0, 0]), Integer::from(5));
        assert_eq!(
            Integer::from_signed_limbs(&[u64::MAX, u64::MAX, u64::MAX]),
            Integer::from(-1)
        );
        assert_eq!(
            Integer::from_signed_limbs(&[0, 0, 1]),
            Integer::from(2).pow(128)
        );
        assert_eq!(
            Integer::from_signed_limbs(&[0, 0, u64::MAX]),
            -Integer::from(2).pow(128)
        );
    }
}
