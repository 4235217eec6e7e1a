//! Evaluation of polynomials over the BLS12-381 scalar field.

use crate::{group::Element, scalar::Scalar};

/// Evaluates the polynomial `coeffs[0] + coeffs[1] * x + ... + coeffs[n-1] * x^(n-1)` at `x`.
///
/// An empty coefficient list is the zero polynomial. Evaluation at zero returns the constant
/// term directly; otherwise Horner's method is used (`n-1` multiplications and additions).
pub fn eval_poly_at(coeffs: &[Scalar], x: &Scalar) -> Scalar {
    let Some((leading, rest)) = coeffs.split_last() else {
        return Scalar::zero();
    };
    if x.is_zero() {
        return coeffs[0];
    }

    // Horner's method: work backwards from the leading coefficient
    rest.iter().rev().fold(*leading, |mut acc, coeff| {
        acc.mul(x);
        acc.add(coeff);
        acc
    })
}
