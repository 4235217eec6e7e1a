//! Process-wide curve constants.
//!
//! The generators and identities of G1 and G2 are built once by [Curve::init] and are immutable
//! afterwards. Calling [Curve::init] again (from any thread) returns the same instance.
//! [Point::generator] (and [Element::one]) for both groups read the generator from here.

use crate::group::{Element, G1, G2};
#[cfg(doc)]
use crate::group::Point;
use std::sync::OnceLock;
use tracing::debug;

static CURVE: OnceLock<Curve> = OnceLock::new();

/// Generators and identities of the BLS12-381 pairing groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    g1_generator: G1,
    g1_identity: G1,
    g2_generator: G2,
    g2_identity: G2,
}

impl Curve {
    /// Initializes the curve constants (if not already initialized) and returns them.
    pub fn init() -> &'static Self {
        CURVE.get_or_init(|| {
            debug!("initializing curve constants");
            Self {
                g1_generator: G1::base(),
                g1_identity: G1::zero(),
                g2_generator: G2::base(),
                g2_identity: G2::zero(),
            }
        })
    }

    /// Returns the generator of G1.
    pub fn g1_generator(&self) -> &G1 {
        &self.g1_generator
    }

    /// Returns the identity of G1.
    pub fn g1_identity(&self) -> &G1 {
        &self.g1_identity
    }

    /// Returns the generator of G2.
    pub fn g2_generator(&self) -> &G2 {
        &self.g2_generator
    }

    /// Returns the identity of G2.
    pub fn g2_identity(&self) -> &G2 {
        &self.g2_identity
    }
}
