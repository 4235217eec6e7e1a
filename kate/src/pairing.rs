//! Bilinear pairings over BLS12-381 and the verification equation for Kate openings.
//!
//! [PairingEngine] accumulates the Miller loops of any number of `(G1, G2)` pairs and performs a
//! single final exponentiation when [PairingEngine::check] is called. `blst` has no primitive
//! that accumulates the inverse of a pairing, so [PairingEngine::add_pair_inv] negates the G1
//! side before accumulating (`e(-p, q) = e(p, q)^-1`).

use crate::group::{Element, G1, G2};
use blst::{
    blst_final_exp, blst_fp12, blst_fp12_is_one, blst_fp12_mul, blst_fp12_one, blst_miller_loop,
};

/// An element of the pairing target group.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GT(blst_fp12);

impl GT {
    /// Returns the identity of the target group.
    pub fn one() -> Self {
        Self(unsafe { *blst_fp12_one() })
    }

    /// Returns whether the element is the identity.
    pub fn is_one(&self) -> bool {
        unsafe { blst_fp12_is_one(&self.0) }
    }
}

/// Computes the Miller loop of a pair, or `None` if either side is the identity (in which case
/// the pairing is `1`).
fn miller_loop(p: &G1, q: &G2) -> Option<blst_fp12> {
    if p.is_zero() || q.is_zero() {
        return None;
    }
    let pa = p.as_blst_p1_affine();
    let qa = q.as_blst_p2_affine();
    let mut ml = blst_fp12::default();
    unsafe {
        blst_miller_loop(&mut ml, &qa, &pa);
    }
    Some(ml)
}

/// Computes the pairing `e(p, q)`.
pub fn pairing(p: &G1, q: &G2) -> GT {
    // Reference: https://github.com/MystenLabs/fastcrypto/blob/bd4999bd3e901eab34ae3dd96dbe38b86ac646a7/fastcrypto/src/groups/bls12381.rs#L223-L234
    let Some(ml) = miller_loop(p, q) else {
        return GT::one();
    };
    let mut res = blst_fp12::default();
    unsafe {
        blst_final_exp(&mut res, &ml);
    }
    GT(res)
}

/// Accumulates a product of pairings and checks whether it equals `1`.
#[derive(Debug, Clone, Default)]
pub struct PairingEngine {
    acc: Option<blst_fp12>,
}

impl PairingEngine {
    /// Creates an engine with an empty product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplies the product by `e(p, q)`.
    pub fn add_pair(&mut self, p: &G1, q: &G2) {
        let Some(ml) = miller_loop(p, q) else {
            return;
        };
        self.acc = Some(match self.acc {
            None => ml,
            Some(acc) => {
                let mut next = blst_fp12::default();
                unsafe {
                    blst_fp12_mul(&mut next, &acc, &ml);
                }
                next
            }
        });
    }

    /// Multiplies the product by `e(p, q)^-1`.
    pub fn add_pair_inv(&mut self, p: &G1, q: &G2) {
        let mut neg = *p;
        neg.neg();
        self.add_pair(&neg, q);
    }

    /// Returns whether the accumulated product is `1`.
    ///
    /// An engine with no (non-trivial) pairs holds the empty product and checks `true`.
    pub fn check(&self) -> bool {
        let Some(acc) = self.acc else {
            return true;
        };
        let mut res = blst_fp12::default();
        unsafe {
            blst_final_exp(&mut res, &acc);
        }
        GT(res).is_one()
    }
}

/// Returns whether `e(a1, a2)^-1 * e(b1, b2) = 1`, i.e. whether `e(a1, a2) = e(b1, b2)`.
///
/// A `false` result is the expected outcome for an invalid opening, not an error.
pub fn pairings_verify(a1: &G1, a2: &G2, b1: &G1, b2: &G2) -> bool {
    let mut engine = PairingEngine::new();
    engine.add_pair_inv(a1, a2);
    engine.add_pair(b1, b2);
    engine.check()
}
