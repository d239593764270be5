use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use primepoly::{
    domains::integer::Integer,
    poly::{
        context::{CoefficientPath, PolynomialContext, VariableOrder},
        polynomial::MultivariatePolynomial,
    },
};

fn random_polynomial(
    ctx: &Arc<PolynomialContext>,
    rng: &mut StdRng,
    max_terms: usize,
    max_exp: u32,
    big: bool,
) -> MultivariatePolynomial {
    let nterms = rng.gen_range(0..=max_terms);
    let mut p = MultivariatePolynomial::new(ctx);
    for _ in 0..nterms {
        let exponents: Vec<u32> = (0..ctx.nvars()).map(|_| rng.gen_range(0..=max_exp)).collect();
        let mut c = Integer::from(rng.gen_range(-1000i64..1000));
        if big && rng.gen_bool(0.3) {
            c *= Integer::from(rng.gen::<i64>()).pow(3);
        }
        p.push_term(c, &exponents);
    }
    p.sort_terms();
    p.combine_like_terms();
    p.check_consistency();
    p
}

#[test]
fn monomial_keys() {
    let ctx = PolynomialContext::new(2);
    assert_eq!(ctx.encode(&[1, 0]), Integer::from(2));
    assert_eq!(ctx.encode(&[0, 1]), Integer::from(3));
    assert_eq!(ctx.encode(&[1, 1]), Integer::from(6));
    assert_eq!(ctx.encode(&[2, 0]), Integer::from(4));

    let x = MultivariatePolynomial::monomial(&ctx, Integer::one(), &[1, 0]);
    let y = MultivariatePolynomial::monomial(&ctx, Integer::one(), &[0, 1]);
    let xy = &x * &y;
    assert_eq!(xy.nterms(), 1);
    assert_eq!(xy.term_key(0), &Integer::from(6));
    assert_eq!(xy.term_coefficient(0), &Integer::one());
    assert_eq!(&xy.term_exponents(0)[..], &[1, 1]);
}

#[test]
fn univariate_division() {
    let ctx = PolynomialContext::new(1);
    let f = MultivariatePolynomial::from_terms(
        &ctx,
        [(Integer::one(), [2u32]), (Integer::from(-1), [0])],
    );
    let g = MultivariatePolynomial::from_terms(
        &ctx,
        [(Integer::one(), [1u32]), (Integer::from(-1), [0])],
    );

    let (q, r) = f.div_rem(&g);
    assert_eq!(
        q,
        MultivariatePolynomial::from_terms(&ctx, [(Integer::one(), [1u32]), (Integer::one(), [0])])
    );
    assert!(r.is_zero());
}

#[test]
fn dividend_below_divisor() {
    let ctx = PolynomialContext::new(2);
    let f = MultivariatePolynomial::from_terms(
        &ctx,
        [(Integer::from(5), [1u32, 0]), (Integer::from(-2), [0, 0])],
    );
    let g = MultivariatePolynomial::from_terms(
        &ctx,
        [(Integer::from(3), [0u32, 1]), (Integer::one(), [1, 0])],
    );

    let (q, r) = f.div_rem(&g);
    assert!(q.is_zero());
    assert_eq!(r, f);
    assert!(f.quotient(&g).is_zero());
}

#[test]
fn ring_laws() {
    let ctx = PolynomialContext::new(3);
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..50 {
        let f = random_polynomial(&ctx, &mut rng, 12, 5, true);
        let g = random_polynomial(&ctx, &mut rng, 12, 5, true);
        let h = random_polynomial(&ctx, &mut rng, 12, 5, false);

        let fg = &f * &g;
        fg.check_consistency();
        assert_eq!(fg, &g * &f);
        assert_eq!(&fg * &h, &f * &(&g * &h));
        assert_eq!(&f * &(&g + &h), &fg + &(&f * &h));
        assert_eq!(&(&f - &g) + &g, f);
    }
}

#[test]
fn division_laws() {
    let mut rng = StdRng::seed_from_u64(42);

    for nvars in 1..=4 {
        let ctx = PolynomialContext::new(nvars);
        for _ in 0..40 {
            let f = random_polynomial(&ctx, &mut rng, 15, 6, true);
            let g = random_polynomial(&ctx, &mut rng, 6, 3, false);
            if g.is_zero() {
                continue;
            }

            let (q, r) = f.div_rem(&g);
            q.check_consistency();
            r.check_consistency();
            assert_eq!(&(&q * &g) + &r, f);
            assert_eq!(f.quotient(&g), q);

            let (q2, r2) = (&f * &g).div_rem(&g);
            assert_eq!(q2, f);
            assert!(r2.is_zero());

            // with a unit leading coefficient the remainder of a univariate
            // division has a smaller degree than the divisor
            if nvars == 1 && g.lcoeff().abs().is_one() {
                if let (Some(rk), Some(gk)) = (r.lkey(), g.lkey()) {
                    assert!(rk < gk);
                }
            }
        }
    }
}

#[test]
fn aliased_results() {
    let ctx = PolynomialContext::new(2);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let f = random_polynomial(&ctx, &mut rng, 10, 4, true);
        let g = random_polynomial(&ctx, &mut rng, 5, 2, false);

        let mut out = MultivariatePolynomial::new(&ctx);
        MultivariatePolynomial::mul_into(&mut out, &f, &g);

        let mut first = f.clone();
        first.mul_assign(&g);
        assert_eq!(first, out);

        let mut second = g.clone();
        second.mul_assign(&f);
        assert_eq!(second, out);

        if g.is_zero() {
            continue;
        }

        let mut q = MultivariatePolynomial::new(&ctx);
        let mut r = MultivariatePolynomial::new(&ctx);
        MultivariatePolynomial::div_rem_into(&mut q, &mut r, &f, &g);

        let mut d = f.clone();
        d.div_assign(&g);
        assert_eq!(d, q);

        let mut e = g.clone();
        e.rdiv_assign(&f);
        assert_eq!(e, q);
    }
}

#[test]
fn coefficient_paths() {
    let fast = PolynomialContext::new(3);
    let slow =
        PolynomialContext::with_options(3, VariableOrder::Natural, CoefficientPath::MultiPrecision);

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..30 {
        let f = random_polynomial(&fast, &mut rng, 20, 4, false).mul_scalar(&Integer::from(i64::MAX / 3));
        let g = random_polynomial(&fast, &mut rng, 8, 2, false);
        if g.is_zero() {
            continue;
        }

        let to_slow = |p: &MultivariatePolynomial| {
            MultivariatePolynomial::from_terms(
                &slow,
                (0..p.nterms()).map(|i| (p.term_coefficient(i).clone(), p.term_exponents(i))),
            )
        };

        let (sf, sg) = (to_slow(&f), to_slow(&g));
        assert_eq!((&f * &g).coefficients(), (&sf * &sg).coefficients());

        let (q, r) = f.div_rem(&g);
        let (sq, sr) = sf.div_rem(&sg);
        assert_eq!(q.coefficients(), sq.coefficients());
        assert_eq!(q.keys(), sq.keys());
        assert_eq!(r.coefficients(), sr.coefficients());
        assert_eq!(r.keys(), sr.keys());
    }
}

#[test]
fn reversed_variable_order() {
    let ctx = PolynomialContext::with_options(2, VariableOrder::Reversed, CoefficientPath::Auto);
    let x = MultivariatePolynomial::gen(&ctx, 0);
    let y = MultivariatePolynomial::gen(&ctx, 1);

    // x now has the larger key
    let p = &x + &y;
    assert_eq!(&p.term_exponents(0)[..], &[1, 0]);

    let (q, r) = (&(&x * &x) - &(&y * &y)).div_rem(&(&x - &y));
    assert_eq!(q, p);
    assert!(r.is_zero());
}

#[test]
fn power_products() {
    let ctx = PolynomialContext::new(3);
    let x = MultivariatePolynomial::gen(&ctx, 0);
    let y = MultivariatePolynomial::gen(&ctx, 1);
    let z = MultivariatePolynomial::gen(&ctx, 2);
    let one = MultivariatePolynomial::one(&ctx);

    let f = &(&(&one - &x) * &(&one + &y)) * &(&one + &z);
    let g = &(&(&one + &x) * &(&one - &y)) * &(&one - &z);
    let h = &(&(&one - &(&x * &x)) * &(&one - &(&y * &y))) * &(&one - &(&z * &z));

    let groups = vec![vec![f.pow(6), g.pow(6)]];
    let expected = h.pow(6);
    assert_eq!(MultivariatePolynomial::addmul_multi(&ctx, &groups), expected);
    assert_eq!(
        MultivariatePolynomial::addmul_multi_threaded(&ctx, &groups),
        expected
    );
}

#[test]
fn sparse_high_degree() {
    let ctx = PolynomialContext::new(2);
    let one = MultivariatePolynomial::one(&ctx);
    let x10 = MultivariatePolynomial::monomial(&ctx, Integer::one(), &[10, 0]);
    let y10 = MultivariatePolynomial::monomial(&ctx, Integer::one(), &[0, 10]);

    let f = (&one + &x10).pow(50);
    let g = (&one + &y10).pow(50);
    let p = &f * &g;

    assert_eq!(p.nterms(), 51 * 51);
    let c = Integer::from(126410606437752i64);
    assert_eq!(p.get_coefficient(&[250, 250]), &c * &c);
    assert_eq!(p.degree(0), Some(500));

    let (q, r) = p.div_rem(&g);
    assert_eq!(q, f);
    assert!(r.is_zero());
}
