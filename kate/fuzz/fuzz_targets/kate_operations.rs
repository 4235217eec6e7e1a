#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use commonware_kate::{
    group::{Element, Point, G1, G2},
    msm::lin_comb,
    pairing::pairings_verify,
    poly::eval_poly_at,
    scalar::{Scalar, SCALAR_LENGTH},
};
use libfuzzer_sys::fuzz_target;

const MAX_TERMS: usize = 32;

#[derive(Debug, Clone)]
enum FuzzOperation {
    G1Arithmetic { a: G1, b: G1 },
    G2Arithmetic { a: G2, b: G2 },
    G1ScalarMul { point: G1, a: Scalar, b: Scalar },
    G1LinComb { points: Vec<G1>, factors: Vec<Scalar> },
    G2LinComb { points: Vec<G2>, factors: Vec<Scalar> },
    EvalPolyAt { coeffs: Vec<Scalar>, x: Scalar },
    PairingsVerify { a: Scalar, b: Scalar },
}

impl<'a> Arbitrary<'a> for FuzzOperation {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self, arbitrary::Error> {
        let choice = u.int_in_range(0..=6)?;
        match choice {
            0 => Ok(FuzzOperation::G1Arithmetic {
                a: arbitrary_point(u)?,
                b: arbitrary_point(u)?,
            }),
            1 => Ok(FuzzOperation::G2Arithmetic {
                a: arbitrary_point(u)?,
                b: arbitrary_point(u)?,
            }),
            2 => Ok(FuzzOperation::G1ScalarMul {
                point: arbitrary_point(u)?,
                a: arbitrary_scalar(u)?,
                b: arbitrary_scalar(u)?,
            }),
            3 => {
                let n = u.int_in_range(0..=MAX_TERMS)?;
                Ok(FuzzOperation::G1LinComb {
                    points: (0..n)
                        .map(|_| arbitrary_point(u))
                        .collect::<Result<_, _>>()?,
                    factors: (0..n)
                        .map(|_| arbitrary_scalar(u))
                        .collect::<Result<_, _>>()?,
                })
            }
            4 => {
                let n = u.int_in_range(0..=MAX_TERMS)?;
                Ok(FuzzOperation::G2LinComb {
                    points: (0..n)
                        .map(|_| arbitrary_point(u))
                        .collect::<Result<_, _>>()?,
                    factors: (0..n)
                        .map(|_| arbitrary_scalar(u))
                        .collect::<Result<_, _>>()?,
                })
            }
            5 => {
                let n = u.int_in_range(0..=MAX_TERMS)?;
                Ok(FuzzOperation::EvalPolyAt {
                    coeffs: (0..n)
                        .map(|_| arbitrary_scalar(u))
                        .collect::<Result<_, _>>()?,
                    x: arbitrary_scalar(u)?,
                })
            }
            _ => Ok(FuzzOperation::PairingsVerify {
                a: arbitrary_scalar(u)?,
                b: arbitrary_scalar(u)?,
            }),
        }
    }
}

fn arbitrary_scalar(u: &mut Unstructured) -> Result<Scalar, arbitrary::Error> {
    let bytes: [u8; SCALAR_LENGTH] = u.arbitrary()?;
    Ok(Scalar::normalize(&bytes))
}

fn arbitrary_point<P: Point>(u: &mut Unstructured) -> Result<P, arbitrary::Error> {
    let mut point = P::generator();
    point.mul(&arbitrary_scalar(u)?);
    Ok(point)
}

fn naive<P: Point>(points: &[P], factors: &[Scalar]) -> P {
    let mut sum = P::zero();
    for (point, factor) in points.iter().zip(factors.iter()) {
        let mut term = *point;
        term.mul(factor);
        sum.add(&term);
    }
    sum
}

fn arithmetic<P: Point>(a: P, b: P) {
    let mut sum = a;
    sum.add(&b);
    let mut reversed = b;
    reversed.add(&a);
    assert_eq!(sum, reversed);

    sum.sub(&b);
    assert_eq!(sum, a);

    let mut neg = a;
    neg.neg();
    neg.add(&a);
    assert!(neg.is_zero());

    assert_eq!(P::from_bytes(&a.to_bytes()).unwrap(), a);
    assert_eq!(a.encode(), sum.encode());
}

fn fuzz(op: FuzzOperation) {
    match op {
        FuzzOperation::G1Arithmetic { a, b } => arithmetic(a, b),
        FuzzOperation::G2Arithmetic { a, b } => arithmetic(a, b),
        FuzzOperation::G1ScalarMul { point, a, b } => {
            let mut ab = a;
            ab.add(&b);
            let mut left = point;
            left.mul(&ab);
            let mut right = point;
            right.mul(&a);
            let mut bp = point;
            bp.mul(&b);
            right.add(&bp);
            assert_eq!(left, right);
        }
        FuzzOperation::G1LinComb { points, factors } => {
            assert_eq!(lin_comb(&points, &factors), naive(&points, &factors));
        }
        FuzzOperation::G2LinComb { points, factors } => {
            assert_eq!(lin_comb(&points, &factors), naive(&points, &factors));
        }
        FuzzOperation::EvalPolyAt { coeffs, x } => {
            let mut expected = Scalar::zero();
            let mut power = Scalar::one();
            for coeff in &coeffs {
                let mut term = *coeff;
                term.mul(&power);
                expected.add(&term);
                power.mul(&x);
            }
            assert_eq!(eval_poly_at(&coeffs, &x), expected);
        }
        FuzzOperation::PairingsVerify { a, b } => {
            // e([a]G1, G2) = e(G1, [b]G2) iff a = b
            let mut a1 = G1::generator();
            a1.mul(&a);
            let mut b2 = G2::generator();
            b2.mul(&b);
            assert_eq!(
                pairings_verify(&a1, &G2::generator(), &G1::generator(), &b2),
                a == b
            );
        }
    }
}

fuzz_target!(|ops: Vec<FuzzOperation>| {
    for op in ops {
        fuzz(op);
    }
});
