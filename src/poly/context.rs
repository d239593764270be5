use std::sync::Arc;

use crate::domains::integer::Integer;

/// The order in which primes are assigned to variables. Since monomials are
/// compared by key, this choice fixes the monomial ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VariableOrder {
    /// Variable `0` gets the prime `2`, variable `1` the prime `3`, etc.
    #[default]
    Natural,
    /// The last variable gets the prime `2`.
    Reversed,
}

/// The coefficient arithmetic used by multiplication and division.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoefficientPath {
    /// Use a fixed-width accumulator whenever the operand sizes allow it.
    #[default]
    Auto,
    /// Always use multi-precision arithmetic.
    MultiPrecision,
}

/// The immutable description of a polynomial ring: the number of variables
/// and the prime that encodes each of them in a monomial key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PolynomialContext {
    primes: Vec<Integer>,
    order: VariableOrder,
    path: CoefficientPath,
}

impl PolynomialContext {
    /// Create a context for `nvars` variables with the default options.
    pub fn new(nvars: usize) -> Arc<PolynomialContext> {
        Self::with_options(nvars, VariableOrder::Natural, CoefficientPath::Auto)
    }

    pub fn with_options(
        nvars: usize,
        order: VariableOrder,
        path: CoefficientPath,
    ) -> Arc<PolynomialContext> {
        let mut primes = Vec::with_capacity(nvars);
        let mut p = Integer::one();
        for _ in 0..nvars {
            p = p.next_prime();
            primes.push(p.clone());
        }

        if order == VariableOrder::Reversed {
            primes.reverse();
        }

        Arc::new(PolynomialContext {
            primes,
            order,
            path,
        })
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.primes.len()
    }

    #[inline]
    pub fn order(&self) -> VariableOrder {
        self.order
    }

    #[inline]
    pub fn coefficient_path(&self) -> CoefficientPath {
        self.path
    }

    /// The prime that encodes variable `var`.
    #[inline]
    pub fn prime(&self, var: usize) -> &Integer {
        self.check_var(var);
        &self.primes[var]
    }

    #[inline]
    pub fn primes(&self) -> &[Integer] {
        &self.primes
    }

    #[inline]
    pub(crate) fn check_var(&self, var: usize) {
        if var >= self.primes.len() {
            panic!(
                "Variable index {} out of range for context with {} variables",
                var,
                self.primes.len()
            );
        }
    }

    /// Check if polynomials of both contexts can be combined.
    #[inline]
    pub fn is_compatible(self: &Arc<Self>, other: &Arc<Self>) -> bool {
        Arc::ptr_eq(self, other) || self.primes == other.primes
    }
}

#[cfg(test)]
mod test {
    use super::{CoefficientPath, PolynomialContext, VariableOrder};
    use crate::domains::integer::Integer;

    #[test]
    fn prime_assignment() {
        let ctx = PolynomialContext::new(4);
        assert_eq!(ctx.nvars(), 4);
        assert_eq!(
            ctx.primes(),
            &[2, 3, 5, 7].map(Integer::from)[..],
        );
        assert_eq!(ctx.coefficient_path(), CoefficientPath::Auto);

        let rev = PolynomialContext::with_options(
            3,
            VariableOrder::Reversed,
            CoefficientPath::MultiPrecision,
        );
        assert_eq!(rev.prime(0), &Integer::from(5));
        assert_eq!(rev.prime(2), &Integer::from(2));
        assert!(!ctx.is_compatible(&rev));
        assert!(ctx.is_compatible(&PolynomialContext::new(4)));
    }

    #[test]
    fn empty_context() {
        let ctx = PolynomialContext::new(0);
        assert_eq!(ctx.nvars(), 0);
        assert!(ctx.primes().is_empty());
    }

    #[test]
    #[should_panic(expected = "Variable index 2 out of range")]
    fn bad_variable() {
        PolynomialContext::new(2).prime(2);
    }
}
