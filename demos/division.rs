use primepoly::{
    domains::integer::Integer,
    poly::{context::PolynomialContext, polynomial::MultivariatePolynomial},
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn product_and_quotient() {
    let ctx = PolynomialContext::new(3);
    let x = MultivariatePolynomial::gen(&ctx, 0);
    let y = MultivariatePolynomial::gen(&ctx, 1);
    let z = MultivariatePolynomial::gen(&ctx, 2);
    let one = MultivariatePolynomial::one(&ctx);

    let a = (&(&(&x + &y) + &z) + &one).pow(4);
    let b = &(&x * &y) - &z.clone().mul_scalar(&Integer::from(3));
    let p = &a * &b;

    println!("> ({}) * ({}) has {} terms", a, b, p.nterms());

    let (q, r) = p.div_rem(&b);
    println!("> quotient has {} terms, remainder = {}", q.nterms(), r);
}

fn remainder() {
    let ctx = PolynomialContext::new(2);
    let f = MultivariatePolynomial::from_terms(
        &ctx,
        [
            (Integer::from(3), [2u32, 1]),
            (Integer::from(-5), [1, 1]),
            (Integer::from(7), [0, 0]),
        ],
    );
    let g = MultivariatePolynomial::from_terms(
        &ctx,
        [(Integer::from(2), [1u32, 0]), (Integer::one(), [0, 0])],
    );

    let (q, r) = f.div_rem(&g);
    println!("> {} = ({}) * ({}) + {}", f, q, g, r);
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("PRIMEPOLY_LOG"))
        .init();

    product_and_quotient();
    remainder();
}
