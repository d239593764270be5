//! Property-based tests for polynomial arithmetic.

use std::sync::Arc;

use proptest::prelude::*;

use crate::domains::integer::Integer;
use crate::poly::context::{CoefficientPath, PolynomialContext, VariableOrder};
use crate::poly::polynomial::MultivariatePolynomial;

type Terms = Vec<(Integer, [u32; 3])>;

// Mostly small coefficients, with some that need one or more words
fn coefficient() -> impl Strategy<Value = Integer> {
    prop_oneof![
        4 => (-50i64..50).prop_map(Integer::from),
        1 => any::<i64>().prop_map(Integer::from),
        1 => (any::<i32>(), 1u32..3)
            .prop_map(|(c, e)| Integer::from(c) * Integer::from(3).pow(40 * e)),
    ]
}

fn terms() -> impl Strategy<Value = Terms> {
    proptest::collection::vec((coefficient(), proptest::array::uniform3(0u32..4)), 0..8)
}

fn nonzero_terms() -> impl Strategy<Value = Terms> {
    terms().prop_filter("polynomial must be non-zero", |t| {
        !build(&PolynomialContext::new(3), t).is_zero()
    })
}

fn build(ctx: &Arc<PolynomialContext>, terms: &Terms) -> MultivariatePolynomial {
    MultivariatePolynomial::from_terms(ctx, terms.iter().cloned())
}

/// Every remainder term has a key that is not divisible by the leading key of
/// `b`, or a coefficient that is reduced modulo the leading coefficient of `b`.
fn is_reduced(r: &MultivariatePolynomial, b: &MultivariatePolynomial) -> bool {
    let (Some(lk), lc) = (b.lkey(), b.lcoeff()) else {
        return false;
    };

    r.dump().all(|(k, c)| {
        if k.checked_div_exact(lk).is_none() {
            return true;
        }

        if lc.is_negative() {
            c <= &Integer::zero() && c > &lc
        } else {
            c >= &Integer::zero() && c < &lc
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mul_commutative(a in terms(), b in terms()) {
        let ctx = PolynomialContext::new(3);
        let (a, b) = (build(&ctx, &a), build(&ctx, &b));
        let ab = &a * &b;
        ab.check_consistency();
        prop_assert_eq!(ab, &b * &a);
    }

    #[test]
    fn mul_associative(a in terms(), b in terms(), c in terms()) {
        let ctx = PolynomialContext::new(3);
        let (a, b, c) = (build(&ctx, &a), build(&ctx, &b), build(&ctx, &c));
        prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }

    #[test]
    fn distributive(a in terms(), b in terms(), c in terms()) {
        let ctx = PolynomialContext::new(3);
        let (a, b, c) = (build(&ctx, &a), build(&ctx, &b), build(&ctx, &c));
        let left = &a * &(&b + &c);
        let right = &(&a * &b) + &(&a * &c);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn division_identity(a in terms(), b in nonzero_terms()) {
        let ctx = PolynomialContext::new(3);
        let (a, b) = (build(&ctx, &a), build(&ctx, &b));
        let (q, r) = a.div_rem(&b);
        q.check_consistency();
        r.check_consistency();
        prop_assert_eq!(&(&q * &b) + &r, a.clone());
        prop_assert!(is_reduced(&r, &b));
        prop_assert_eq!(a.quotient(&b), q);
    }

    #[test]
    fn exact_division(a in terms(), b in nonzero_terms()) {
        let ctx = PolynomialContext::new(3);
        let (a, b) = (build(&ctx, &a), build(&ctx, &b));
        let p = &a * &b;
        prop_assert_eq!(&p / &b, a.clone());
        let (q, r) = p.div_rem(&b);
        prop_assert_eq!(q, a);
        prop_assert!(r.is_zero());
    }

    #[test]
    fn aliasing(a in terms(), b in nonzero_terms()) {
        let ctx = PolynomialContext::new(3);
        let (a, b) = (build(&ctx, &a), build(&ctx, &b));

        let mut first = a.clone();
        first.mul_assign(&b);
        let mut fresh = a.zero();
        MultivariatePolynomial::mul_into(&mut fresh, &a, &b);
        prop_assert_eq!(&first, &fresh);

        let mut second = b.clone();
        second.mul_assign(&a);
        prop_assert_eq!(&second, &fresh);

        let (q, r) = a.div_rem(&b);
        let mut d = a.clone();
        prop_assert_eq!(d.div_rem_assign(&b), r);
        prop_assert_eq!(&d, &q);

        let mut e = b.clone();
        e.rdiv_assign(&a);
        prop_assert_eq!(e, q);
    }

    #[test]
    fn coefficient_paths_agree(a in terms(), b in nonzero_terms()) {
        let fast = PolynomialContext::new(3);
        let slow = PolynomialContext::with_options(
            3,
            VariableOrder::Natural,
            CoefficientPath::MultiPrecision,
        );

        let (fa, fb) = (build(&fast, &a), build(&fast, &b));
        let (sa, sb) = (build(&slow, &a), build(&slow, &b));

        let (fp, sp) = (&fa * &fb, &sa * &sb);
        prop_assert_eq!(fp.coefficients(), sp.coefficients());
        prop_assert_eq!(fp.keys(), sp.keys());

        let (fq, fr) = fa.div_rem(&fb);
        let (sq, sr) = sa.div_rem(&sb);
        prop_assert_eq!(fq.coefficients(), sq.coefficients());
        prop_assert_eq!(fr.coefficients(), sr.coefficients());
        prop_assert_eq!(fr.keys(), sr.keys());
    }

    #[test]
    fn key_bijection(e in proptest::array::uniform3(0u32..200)) {
        let ctx = PolynomialContext::new(3);
        let key = ctx.encode(&e);
        let d = ctx.decode(&key);
        prop_assert_eq!(&d[..], &e[..]);
        prop_assert_eq!(ctx.encode(&d), key);
    }

    #[test]
    fn threaded_accumulation(groups in proptest::collection::vec(proptest::collection::vec(terms(), 0..3), 0..5)) {
        let ctx = PolynomialContext::new(3);
        let groups: Vec<Vec<_>> = groups
            .iter()
            .map(|g| g.iter().map(|t| build(&ctx, t)).collect())
            .collect();

        prop_assert_eq!(
            MultivariatePolynomial::addmul_multi(&ctx, &groups),
            MultivariatePolynomial::addmul_multi_threaded(&ctx, &groups)
        );
    }
}
