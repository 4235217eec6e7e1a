//! Evaluate, combine, and pair BLS12-381 elements for Kate polynomial commitments.
//!
//! This crate provides the arithmetic that a KZG (Kate-Zaverucha-Goldberg) commitment scheme
//! spends nearly all of its time in: scalar-field arithmetic, group operations over G1 and G2,
//! multi-scalar multiplication ([msm::lin_comb]), polynomial evaluation ([poly::eval_poly_at]),
//! and the pairing check used to verify an opening ([pairing::pairings_verify]).
//!
//! Loading a trusted setup, serializing commitments for transport, and deciding what to do with
//! a failed verification are left to the caller.
//!
//! # Status
//!
//! `commonware-kate` is **ALPHA** software and is not yet recommended for production use. Developers should
//! expect breaking changes and occasional instability.
//!
//! # Features
//!
//! - `portable`: Enables `portable` feature on `blst` (<https://github.com/supranational/blst?tab=readme-ov-file#platform-and-language-compatibility>).
//!
//! # Example
//!
//! ```rust
//! use commonware_kate::{
//!     group::{Element, Point, G1, G2},
//!     msm::lin_comb,
//!     pairing::pairings_verify,
//!     poly::eval_poly_at,
//!     scalar::Scalar,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! // Toy setup: [tau^i]G1 and [tau]G2 (never do this with a known tau in production)
//! let tau = Scalar::random(&mut rng);
//! let powers: Vec<G1> = (0..3)
//!     .map(|i| {
//!         let mut p = G1::generator();
//!         p.mul(&tau.pow(i));
//!         p
//!     })
//!     .collect();
//! let mut tau_g2 = G2::generator();
//! tau_g2.mul(&tau);
//!
//! // f(x) = 5 + 3x + 2x^2
//! let coeffs = [Scalar::from(5u64), Scalar::from(3u64), Scalar::from(2u64)];
//! let commitment = lin_comb(&powers, &coeffs);
//!
//! // Open at z = 7: f(7) = 124, q(x) = (f(x) - 124) / (x - 7) = 17 + 2x
//! let z = Scalar::from(7u64);
//! let y = eval_poly_at(&coeffs, &z);
//! assert_eq!(y, Scalar::from(124u64));
//! let proof = lin_comb(&powers[..2], &[Scalar::from(17u64), Scalar::from(2u64)]);
//!
//! // e(C - [y]G1, G2) == e(proof, [tau - z]G2)
//! let mut lhs = G1::generator();
//! lhs.mul(&y);
//! lhs.neg();
//! lhs.add(&commitment);
//! let mut rhs = G2::generator();
//! rhs.mul(&z);
//! rhs.neg();
//! rhs.add(&tau_g2);
//! assert!(pairings_verify(&lhs, &G2::generator(), &proof, &rhs));
//! ```
//!
//! # Acknowledgements
//!
//! _The following resources were used as references when implementing this crate. If code is very similar
//! to the reference, it is accompanied by a comment and link._
//!
//! * <https://github.com/supranational/blst>: BLS12-381 field, group, and pairing arithmetic.
//! * <https://github.com/filecoin-project/blstrs> + <https://github.com/MystenLabs/fastcrypto>: Wrapping
//!   <https://github.com/supranational/blst> in safe types.
//! * <https://dankradfeist.de/ethereum/2020/06/16/kate-polynomial-commitments.html>: Kate polynomial commitments

pub mod curve;
pub mod debug;
pub mod group;
pub mod msm;
pub mod pairing;
pub mod poly;
pub mod scalar;

pub use curve::Curve;
pub use group::{Element, Point, G1, G2};
pub use scalar::Scalar;

use thiserror::Error;

/// Errors that can occur when converting raw bytes into field or group elements.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid scalar")]
    InvalidScalar,
    #[error("invalid point")]
    InvalidPoint,
    #[error("point not in subgroup")]
    NotInSubgroup,
}
