//! Arithmetic over the BLS12-381 scalar field.
//!
//! Every [Scalar] holds a fully reduced residue modulo
//! `r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`. Integers supplied
//! from outside the crate enter through [Scalar::normalize] (reduce) or [Scalar::from_bytes]
//! (reject anything non-canonical), so arithmetic never sees an unreduced operand.

use crate::{group::Element, Error};
use blst::{
    blst_bendian_from_scalar, blst_fr, blst_fr_add, blst_fr_cneg, blst_fr_from_scalar,
    blst_fr_from_uint64, blst_fr_inverse, blst_fr_mul, blst_fr_sub, blst_keygen_v3, blst_scalar,
    blst_scalar_fr_check, blst_scalar_from_be_bytes, blst_scalar_from_bendian,
    blst_scalar_from_fr,
};
use rand::RngCore;
use std::ptr;
use zeroize::Zeroize;

/// Length of a canonically encoded [Scalar].
pub const SCALAR_LENGTH: usize = 32;

/// Number of bits in the scalar field modulus.
pub(crate) const SCALAR_BITS: usize = 255;

/// An element of the BLS12-381 scalar field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(transparent)]
pub struct Scalar(blst_fr);

/// `R = 2^256 mod q` in little-endian Montgomery form which is equivalent to 1 in little-endian
/// non-Montgomery form.
///
/// mod(2^256, 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001) = 0x1824b159acc5056f998c4fefecbc4ff55884b7fa0003480200000001fffffffe
// Reference: https://github.com/filecoin-project/blstrs/blob/ffbb41d1495d84e40a712583346439924603b49a/src/scalar.rs#L77-L89
const BLST_FR_ONE: Scalar = Scalar(blst_fr {
    l: [
        0x0000_0001_ffff_fffe,
        0x5884_b7fa_0003_4802,
        0x998c_4fef_ecbc_4ff5,
        0x1824_b159_acc5_056f,
    ],
});

impl Scalar {
    /// Generates a random scalar using the provided RNG.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        // Generate a random 64 byte buffer
        let mut ikm = [0u8; 64];
        rng.fill_bytes(&mut ikm);

        // Generate a scalar from the randomly populated buffer
        let mut ret = blst_fr::default();
        unsafe {
            let mut sc = blst_scalar::default();
            blst_keygen_v3(&mut sc, ikm.as_ptr(), ikm.len(), ptr::null(), 0);
            blst_fr_from_scalar(&mut ret, &sc);
        }
        ikm.zeroize();
        Self(ret)
    }

    /// Reduces an arbitrary 256-bit big-endian integer modulo `r`.
    ///
    /// Unlike [Scalar::from_bytes], this never fails: values at or above the modulus wrap.
    pub fn normalize(bytes: &[u8; SCALAR_LENGTH]) -> Self {
        let mut ret = blst_fr::default();
        unsafe {
            let mut scalar = blst_scalar::default();

            // The return value only reports whether the reduced value is non-zero, and zero
            // is a valid residue.
            blst_scalar_from_be_bytes(&mut scalar, bytes.as_ptr(), bytes.len());
            blst_fr_from_scalar(&mut ret, &scalar);
        }
        Self(ret)
    }

    /// Decodes a canonical big-endian encoding, rejecting values at or above the modulus.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SCALAR_LENGTH {
            return Err(Error::InvalidLength {
                expected: SCALAR_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut ret = blst_fr::default();
        unsafe {
            let mut scalar = blst_scalar::default();
            blst_scalar_from_bendian(&mut scalar, bytes.as_ptr());
            if !blst_scalar_fr_check(&scalar) {
                return Err(Error::InvalidScalar);
            }
            blst_fr_from_scalar(&mut ret, &scalar);
        }
        Ok(Self(ret))
    }

    /// Returns the canonical big-endian encoding.
    pub fn to_bytes(&self) -> [u8; SCALAR_LENGTH] {
        let mut bytes = [0u8; SCALAR_LENGTH];
        unsafe {
            let mut scalar = blst_scalar::default();
            blst_scalar_from_fr(&mut scalar, &self.0);
            blst_bendian_from_scalar(bytes.as_mut_ptr(), &scalar);
        }
        bytes
    }

    /// Computes the inverse of the scalar.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let mut ret = blst_fr::default();
        unsafe { blst_fr_inverse(&mut ret, &self.0) };
        Some(Self(ret))
    }

    /// Raises the scalar to the provided power.
    pub fn pow(&self, mut exp: u64) -> Self {
        let mut base = *self;
        let mut ret = Self::one();
        while exp > 0 {
            if exp & 1 == 1 {
                ret.mul(&base);
            }
            let square = base;
            base.mul(&square);
            exp >>= 1;
        }
        ret
    }

    /// Returns the canonical little-endian integer form consumed by `blst` point multiplication.
    pub(crate) fn as_blst_scalar(&self) -> blst_scalar {
        let mut scalar = blst_scalar::default();
        unsafe { blst_scalar_from_fr(&mut scalar, &self.0) };
        scalar
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        // blst requires a buffer of 4 uint64 values. Failure to provide one will
        // result in unexpected behavior (will read past the provided buffer).
        //
        // Reference: https://github.com/supranational/blst/blob/415d4f0e2347a794091836a3065206edfd9c72f3/bindings/blst.h#L102
        let buffer = [value, 0, 0, 0];
        let mut ret = blst_fr::default();
        unsafe { blst_fr_from_uint64(&mut ret, buffer.as_ptr()) };
        Self(ret)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.l.zeroize();
    }
}

impl Element for Scalar {
    fn zero() -> Self {
        Self(blst_fr::default())
    }

    fn one() -> Self {
        BLST_FR_ONE
    }

    fn add(&mut self, rhs: &Self) {
        unsafe {
            blst_fr_add(&mut self.0, &self.0, &rhs.0);
        }
    }

    fn sub(&mut self, rhs: &Self) {
        unsafe {
            blst_fr_sub(&mut self.0, &self.0, &rhs.0);
        }
    }

    fn neg(&mut self) {
        unsafe {
            blst_fr_cneg(&mut self.0, &self.0, true);
        }
    }

    fn mul(&mut self, rhs: &Self) {
        unsafe {
            blst_fr_mul(&mut self.0, &self.0, &rhs.0);
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}
