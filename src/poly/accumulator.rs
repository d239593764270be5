use crate::domains::integer::Integer;

/// A signed three-word accumulator in two's complement, used to sum products of
/// word-sized coefficients without allocating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accumulator {
    limbs: [u64; 3],
}

impl Accumulator {
    #[inline]
    pub fn new() -> Accumulator {
        Accumulator { limbs: [0; 3] }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.limbs = [0; 3];
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 3]
    }

    #[inline(always)]
    fn add_limbs(&mut self, other: [u64; 3]) {
        let (s0, c0) = self.limbs[0].overflowing_add(other[0]);
        let (s1, c1) = self.limbs[1].overflowing_add(other[1]);
        let (s1, c2) = s1.overflowing_add(c0 as u64);
        let s2 = self.limbs[2]
            .wrapping_add(other[2])
            .wrapping_add((c1 | c2) as u64);
        self.limbs = [s0, s1, s2];
    }

    #[inline(always)]
    fn sub_limbs(&mut self, other: [u64; 3]) {
        let (s0, b0) = self.limbs[0].overflowing_sub(other[0]);
        let (s1, b1) = self.limbs[1].overflowing_sub(other[1]);
        let (s1, b2) = s1.overflowing_sub(b0 as u64);
        let s2 = self.limbs[2]
            .wrapping_sub(other[2])
            .wrapping_sub((b1 | b2) as u64);
        self.limbs = [s0, s1, s2];
    }

    #[inline(always)]
    fn limbs_of(v: i128) -> [u64; 3] {
        let u = v as u128;
        [u as u64, (u >> 64) as u64, if v < 0 { u64::MAX } else { 0 }]
    }

    #[inline(always)]
    pub fn add_i128(&mut self, v: i128) {
        self.add_limbs(Self::limbs_of(v));
    }

    #[inline(always)]
    pub fn sub_i128(&mut self, v: i128) {
        self.sub_limbs(Self::limbs_of(v));
    }

    /// Compute `self += a * b`.
    #[inline(always)]
    pub fn add_mul(&mut self, a: i64, b: i64) {
        self.add_i128(a as i128 * b as i128);
    }

    /// Compute `self -= a * b`.
    #[inline(always)]
    pub fn sub_mul(&mut self, a: i64, b: i64) {
        self.sub_i128(a as i128 * b as i128);
    }

    /// Add an integer whose absolute value fits in 191 bits.
    pub fn add_integer(&mut self, v: &Integer) {
        if let Some(n) = v.to_i128() {
            self.add_i128(n);
            return;
        }

        let digits = v.magnitude_limbs();
        debug_assert!(digits.len() <= 3 && v.bits() < 192);

        let mut m = [0u64; 3];
        for (l, d) in m.iter_mut().zip(&digits) {
            *l = *d;
        }

        if v.is_negative() {
            self.sub_limbs(m);
        } else {
            self.add_limbs(m);
        }
    }

    /// The value as an `i128`, if it fits.
    #[inline]
    pub fn to_i128(&self) -> Option<i128> {
        let sign = if (self.limbs[1] as i64) < 0 {
            u64::MAX
        } else {
            0
        };

        if self.limbs[2] == sign {
            Some((self.limbs[0] as u128 | (self.limbs[1] as u128) << 64) as i128)
        } else {
            None
        }
    }

    pub fn to_integer(&self) -> Integer {
        if let Some(n) = self.to_i128() {
            Integer::from_double(n)
        } else {
            Integer::from_signed_limbs(&self.limbs)
        }
    }
}
