//! Group operations over BLS12-381 G1 and G2.
//!
//! Both groups implement [Point], so code that only needs "a group of prime order `r`" (the
//! multi-scalar multiplication in [crate::msm] or the diagnostics in [crate::debug]) is written
//! once and selected by type.
//!
//! # Warning
//!
//! Ensure that points are checked to belong to the correct subgroup
//! (G1 or G2) to prevent small subgroup attacks. This is particularly important
//! when handling deserialized points or points received from untrusted sources. This
//! is already taken care of for you if you use the provided `from_bytes` functions.

use crate::{
    curve::Curve,
    scalar::{Scalar, SCALAR_BITS},
    Error,
};
use blst::{
    blst_p1, blst_p1_add_or_double, blst_p1_affine, blst_p1_cneg, blst_p1_compress,
    blst_p1_from_affine, blst_p1_is_equal, blst_p1_is_inf, blst_p1_mult,
    blst_p1_serialize, blst_p1_to_affine, blst_p1_uncompress, blst_p1s_mult_pippenger,
    blst_p1s_mult_pippenger_scratch_sizeof, blst_p2, blst_p2_add_or_double, blst_p2_affine,
    blst_p2_cneg, blst_p2_compress, blst_p2_from_affine, blst_p2_is_equal,
    blst_p2_is_inf, blst_p2_mult, blst_p2_serialize, blst_p2_to_affine, blst_p2_uncompress,
    blst_p2s_mult_pippenger, blst_p2s_mult_pippenger_scratch_sizeof, blst_scalar, BLS12_381_G1,
    BLS12_381_G2, BLST_ERROR,
};
use num_bigint::BigUint;
use std::{fmt::Debug, mem::MaybeUninit};

/// An element of a group (or of the scalar field, which is a group under addition).
pub trait Element: Clone + Copy + Eq + PartialEq + Debug + Send + Sync {
    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns the multiplicative identity (for groups, the generator).
    fn one() -> Self;

    /// Adds to self in-place.
    fn add(&mut self, rhs: &Self);

    /// Subtracts from self in-place.
    fn sub(&mut self, rhs: &Self);

    /// Replaces self with its additive inverse.
    fn neg(&mut self);

    /// Multiplies self in-place.
    fn mul(&mut self, rhs: &Scalar);

    /// Returns whether self is the additive identity.
    fn is_zero(&self) -> bool;

    /// Resets self to the additive identity.
    ///
    /// This only re-zeroes the value, it is not cofactor clearing.
    fn clear(&mut self) {
        *self = Self::zero();
    }
}

/// An element of G1 or G2.
pub trait Point: Element {
    /// Length of the compressed encoding.
    const SIZE: usize;

    /// Returns the fixed generator of the group.
    fn generator() -> Self {
        Self::one()
    }

    /// Computes `sum(scalars[i] * points[i])` with Pippenger's algorithm.
    ///
    /// # Panics
    ///
    /// Panics if `points.len() != scalars.len()`.
    fn msm(points: &[Self], scalars: &[Scalar]) -> Self;

    /// Returns the compressed encoding.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decodes a compressed encoding, checking that the point is on the curve and in the
    /// prime-order subgroup.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>;

    /// Returns the uncompressed (`x || y`) big-endian encoding.
    fn to_uncompressed(&self) -> Vec<u8>;

    /// Returns both halves of the uncompressed encoding as decimal integers, one per line.
    ///
    /// The output is deterministic but is meant for logs, not for interchange.
    fn encode(&self) -> String {
        let data = self.to_uncompressed();
        let (x, y) = data.split_at(data.len() / 2);
        format!(
            "{}\n{}",
            BigUint::from_bytes_be(x),
            BigUint::from_bytes_be(y)
        )
    }
}

/// An element of G1.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct G1(blst_p1);

/// Length of a compressed G1 element.
pub const G1_ELEMENT_BYTE_LENGTH: usize = 48;

/// An element of G2.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct G2(blst_p2);

/// Length of a compressed G2 element.
pub const G2_ELEMENT_BYTE_LENGTH: usize = 96;

impl G1 {
    /// Builds the generator from its affine coordinates.
    pub(crate) fn base() -> Self {
        let mut ret = blst_p1::default();
        unsafe {
            blst_p1_from_affine(&mut ret, &BLS12_381_G1);
        }
        Self(ret)
    }

    pub(crate) fn as_blst_p1_affine(&self) -> blst_p1_affine {
        let mut affine = blst_p1_affine::default();
        unsafe { blst_p1_to_affine(&mut affine, &self.0) };
        affine
    }
}

impl G2 {
    /// Builds the generator from its affine coordinates.
    pub(crate) fn base() -> Self {
        let mut ret = blst_p2::default();
        unsafe {
            blst_p2_from_affine(&mut ret, &BLS12_381_G2);
        }
        Self(ret)
    }

    pub(crate) fn as_blst_p2_affine(&self) -> blst_p2_affine {
        let mut affine = blst_p2_affine::default();
        unsafe { blst_p2_to_affine(&mut affine, &self.0) };
        affine
    }
}

/// Drops terms that cannot contribute to a multi-scalar multiplication.
///
/// `blst`'s Pippenger implementation expects affine points that are not at infinity, so
/// identity points (and zero scalars, which would map any point to the identity) are
/// removed before the call.
fn filter_terms<P: Point, A>(
    points: &[P],
    scalars: &[Scalar],
    to_affine: impl Fn(&P) -> A,
) -> (Vec<A>, Vec<blst_scalar>) {
    assert_eq!(
        points.len(),
        scalars.len(),
        "mismatched points/scalars lengths"
    );
    let mut affine = Vec::with_capacity(points.len());
    let mut normalized = Vec::with_capacity(scalars.len());
    for (point, scalar) in points.iter().zip(scalars.iter()) {
        if point.is_zero() || scalar.is_zero() {
            continue;
        }
        affine.push(to_affine(point));
        normalized.push(scalar.as_blst_scalar());
    }
    (affine, normalized)
}

/// Maps a failed `blst` decompression to the decode error it represents.
fn decode_error(err: BLST_ERROR) -> Error {
    match err {
        BLST_ERROR::BLST_POINT_NOT_IN_GROUP => Error::NotInSubgroup,
        _ => Error::InvalidPoint,
    }
}

/// Returns whether the bytes are the compressed encoding of the identity (`0xc0` followed by zeros).
fn is_infinity(bytes: &[u8]) -> bool {
    bytes.first() == Some(&0xc0) && bytes.iter().skip(1).all(|b| *b == 0)
}

impl PartialEq for G1 {
    fn eq(&self, other: &Self) -> bool {
        unsafe { blst_p1_is_equal(&self.0, &other.0) }
    }
}

impl Eq for G1 {}

impl Element for G1 {
    fn zero() -> Self {
        Self(blst_p1::default())
    }

    fn one() -> Self {
        *Curve::init().g1_generator()
    }

    fn add(&mut self, rhs: &Self) {
        unsafe {
            blst_p1_add_or_double(&mut self.0, &self.0, &rhs.0);
        }
    }

    fn sub(&mut self, rhs: &Self) {
        let mut neg = *rhs;
        neg.neg();
        self.add(&neg);
    }

    fn neg(&mut self) {
        unsafe {
            blst_p1_cneg(&mut self.0, true);
        }
    }

    fn mul(&mut self, rhs: &Scalar) {
        let scalar = rhs.as_blst_scalar();
        unsafe {
            // To avoid leaking the scalar through timing, we always perform the same
            // number of iterations during scalar multiplication.
            blst_p1_mult(&mut self.0, &self.0, scalar.b.as_ptr(), SCALAR_BITS);
        }
    }

    fn is_zero(&self) -> bool {
        unsafe { blst_p1_is_inf(&self.0) }
    }
}

impl Point for G1 {
    const SIZE: usize = G1_ELEMENT_BYTE_LENGTH;

    fn msm(points: &[Self], scalars: &[Scalar]) -> Self {
        let (affine, scalars) = filter_terms(points, scalars, G1::as_blst_p1_affine);
        if affine.is_empty() {
            return Self::zero();
        }

        // blst consumes arrays of pointers
        let points: Vec<*const blst_p1_affine> = affine.iter().map(|p| p as *const _).collect();
        let scalars: Vec<*const u8> = scalars.iter().map(|s| s.b.as_ptr()).collect();

        // Allocate the scratch space Pippenger needs for the bucket sums
        let scratch_size = unsafe { blst_p1s_mult_pippenger_scratch_sizeof(points.len()) };
        let mut scratch = vec![MaybeUninit::<u64>::uninit(); scratch_size.div_ceil(8)];

        let mut ret = blst_p1::default();
        unsafe {
            blst_p1s_mult_pippenger(
                &mut ret,
                points.as_ptr(),
                points.len(),
                scalars.as_ptr(),
                SCALAR_BITS,
                scratch.as_mut_ptr() as *mut _,
            );
        }
        Self(ret)
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = [0u8; G1_ELEMENT_BYTE_LENGTH];
        unsafe {
            blst_p1_compress(bytes.as_mut_ptr(), &self.0);
        }
        bytes.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != G1_ELEMENT_BYTE_LENGTH {
            return Err(Error::InvalidLength {
                expected: G1_ELEMENT_BYTE_LENGTH,
                actual: bytes.len(),
            });
        }
        if is_infinity(bytes) {
            return Ok(Self::zero());
        }
        let mut ret = blst_p1::default();
        unsafe {
            // Decompression checks that the point is on the curve and in G1
            let mut affine = blst_p1_affine::default();
            match blst_p1_uncompress(&mut affine, bytes.as_ptr()) {
                BLST_ERROR::BLST_SUCCESS => {}
                err => return Err(decode_error(err)),
            }
            blst_p1_from_affine(&mut ret, &affine);

            // Verify that deserialized element isn't infinite
            if blst_p1_is_inf(&ret) {
                return Err(Error::InvalidPoint);
            }
        }
        Ok(Self(ret))
    }

    fn to_uncompressed(&self) -> Vec<u8> {
        let mut bytes = [0u8; 2 * G1_ELEMENT_BYTE_LENGTH];
        unsafe {
            blst_p1_serialize(bytes.as_mut_ptr(), &self.0);
        }
        bytes.to_vec()
    }
}

impl PartialEq for G2 {
    fn eq(&self, other: &Self) -> bool {
        unsafe { blst_p2_is_equal(&self.0, &other.0) }
    }
}

impl Eq for G2 {}

impl Element for G2 {
    fn zero() -> Self {
        Self(blst_p2::default())
    }

    fn one() -> Self {
        *Curve::init().g2_generator()
    }

    fn add(&mut self, rhs: &Self) {
        unsafe {
            blst_p2_add_or_double(&mut self.0, &self.0, &rhs.0);
        }
    }

    fn sub(&mut self, rhs: &Self) {
        let mut neg = *rhs;
        neg.neg();
        self.add(&neg);
    }

    fn neg(&mut self) {
        unsafe {
            blst_p2_cneg(&mut self.0, true);
        }
    }

    fn mul(&mut self, rhs: &Scalar) {
        let scalar = rhs.as_blst_scalar();
        unsafe {
            blst_p2_mult(&mut self.0, &self.0, scalar.b.as_ptr(), SCALAR_BITS);
        }
    }

    fn is_zero(&self) -> bool {
        unsafe { blst_p2_is_inf(&self.0) }
    }
}

impl Point for G2 {
    const SIZE: usize = G2_ELEMENT_BYTE_LENGTH;

    fn msm(points: &[Self], scalars: &[Scalar]) -> Self {
        let (affine, scalars) = filter_terms(points, scalars, G2::as_blst_p2_affine);
        if affine.is_empty() {
            return Self::zero();
        }
        let points: Vec<*const blst_p2_affine> = affine.iter().map(|p| p as *const _).collect();
        let scalars: Vec<*const u8> = scalars.iter().map(|s| s.b.as_ptr()).collect();
        let scratch_size = unsafe { blst_p2s_mult_pippenger_scratch_sizeof(points.len()) };
        let mut scratch = vec![MaybeUninit::<u64>::uninit(); scratch_size.div_ceil(8)];

        let mut ret = blst_p2::default();
        unsafe {
            blst_p2s_mult_pippenger(
                &mut ret,
                points.as_ptr(),
                points.len(),
                scalars.as_ptr(),
                SCALAR_BITS,
                scratch.as_mut_ptr() as *mut _,
            );
        }
        Self(ret)
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = [0u8; G2_ELEMENT_BYTE_LENGTH];
        unsafe {
            blst_p2_compress(bytes.as_mut_ptr(), &self.0);
        }
        bytes.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != G2_ELEMENT_BYTE_LENGTH {
            return Err(Error::InvalidLength {
                expected: G2_ELEMENT_BYTE_LENGTH,
                actual: bytes.len(),
            });
        }
        if is_infinity(bytes) {
            return Ok(Self::zero());
        }
        let mut ret = blst_p2::default();
        unsafe {
            let mut affine = blst_p2_affine::default();
            match blst_p2_uncompress(&mut affine, bytes.as_ptr()) {
                BLST_ERROR::BLST_SUCCESS => {}
                err => return Err(decode_error(err)),
            }
            blst_p2_from_affine(&mut ret, &affine);
            if blst_p2_is_inf(&ret) {
                return Err(Error::InvalidPoint);
            }
        }
        Ok(Self(ret))
    }

    fn to_uncompressed(&self) -> Vec<u8> {
        let mut bytes = [0u8; 2 * G2_ELEMENT_BYTE_LENGTH];
        unsafe {
            blst_p2_serialize(bytes.as_mut_ptr(), &self.0);
        }
        bytes.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn random_point<P: Point>(rng: &mut StdRng) -> P {
        let mut p = P::generator();
        p.mul(&Scalar::random(rng));
        p
    }

    fn group_axioms<P: Point>() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            let p: P = random_point(&mut rng);
            let q: P = random_point(&mut rng);
            let r: P = random_point(&mut rng);

            // P + 0 = P
            let mut sum = p;
            sum.add(&P::zero());
            assert_eq!(sum, p);

            // P + (-P) = 0
            let mut neg = p;
            neg.neg();
            let mut sum = p;
            sum.add(&neg);
            assert!(sum.is_zero());
            assert_eq!(sum, P::zero());

            // (P + Q) + R = P + (Q + R)
            let mut left = p;
            left.add(&q);
            left.add(&r);
            let mut right = q;
            right.add(&r);
            right.add(&p);
            assert_eq!(left, right);

            // P + Q = Q + P
            let mut pq = p;
            pq.add(&q);
            let mut qp = q;
            qp.add(&p);
            assert_eq!(pq, qp);

            // (P + Q) - Q = P
            pq.sub(&q);
            assert_eq!(pq, p);
        }
    }

    #[test]
    fn test_group_axioms_g1() {
        group_axioms::<G1>();
    }

    #[test]
    fn test_group_axioms_g2() {
        group_axioms::<G2>();
    }

    fn scalar_mul_distributes<P: Point>() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let p: P = random_point(&mut rng);
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);

            // (a + b) * P
            let mut ab = a;
            ab.add(&b);
            let mut left = p;
            left.mul(&ab);

            // a * P + b * P
            let mut right = p;
            right.mul(&a);
            let mut bp = p;
            bp.mul(&b);
            right.add(&bp);

            assert_eq!(left, right);
        }

        // 0 * P = 0 and 1 * P = P
        let p: P = random_point(&mut rng);
        let mut zero = p;
        zero.mul(&Scalar::zero());
        assert!(zero.is_zero());
        let mut one = p;
        one.mul(&Scalar::one());
        assert_eq!(one, p);
    }

    #[test]
    fn test_scalar_mul_distributes_g1() {
        scalar_mul_distributes::<G1>();
    }

    #[test]
    fn test_scalar_mul_distributes_g2() {
        scalar_mul_distributes::<G2>();
    }

    fn doubling<P: Point>() {
        let mut rng = StdRng::seed_from_u64(2);
        let s = Scalar::random(&mut rng);
        let mut s2 = s;
        s2.add(&s);

        // p1 = s2 * G = (s+s)G
        let mut p1 = P::generator();
        p1.mul(&s2);

        // p2 = sG + sG = s2 * G
        let mut p2 = P::generator();
        p2.mul(&s);
        p2.add(&p2.clone());
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_doubling() {
        doubling::<G1>();
        doubling::<G2>();
    }

    fn clear<P: Point>() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p: P = random_point(&mut rng);
        assert!(!p.is_zero());
        p.clear();
        assert!(p.is_zero());

        // Negating the identity leaves it unchanged
        p.neg();
        assert!(p.is_zero());
    }

    #[test]
    fn test_clear() {
        clear::<G1>();
        clear::<G2>();
    }

    fn bytes_roundtrip<P: Point>() {
        let mut rng = StdRng::seed_from_u64(4);
        let p: P = random_point(&mut rng);
        let bytes = p.to_bytes();
        assert_eq!(bytes.len(), P::SIZE);
        assert_eq!(P::from_bytes(&bytes).unwrap(), p);

        // Identity is accepted
        let zero = P::zero().to_bytes();
        assert_eq!(P::from_bytes(&zero).unwrap(), P::zero());

        // Wrong length
        assert_eq!(
            P::from_bytes(&bytes[1..]),
            Err(Error::InvalidLength {
                expected: P::SIZE,
                actual: P::SIZE - 1
            })
        );

        // Missing compression flag
        let invalid = vec![0u8; P::SIZE];
        assert_eq!(P::from_bytes(&invalid), Err(Error::InvalidPoint));
    }

    #[test]
    fn test_bytes_roundtrip() {
        bytes_roundtrip::<G1>();
        bytes_roundtrip::<G2>();
    }

    /// Compressed encoding (sign bit clear) of the point whose `x` has the given low byte.
    fn compressed_x<P: Point>(low: u8) -> Vec<u8> {
        let mut bytes = vec![0u8; P::SIZE];
        bytes[0] = 0x80;
        bytes[P::SIZE - 1] = low;
        bytes
    }

    fn rejects_invalid_points<P: Point>() {
        // Roughly half of all x have a point on the curve, and almost none of those lie in
        // the prime-order subgroup (the cofactor is large)
        let mut off_curve = 0;
        let mut outside_subgroup = 0;
        for low in 0..32u8 {
            match P::from_bytes(&compressed_x::<P>(low)) {
                Err(Error::InvalidPoint) => off_curve += 1,
                Err(Error::NotInSubgroup) => outside_subgroup += 1,
                other => panic!("unexpected decode of x={low}: {other:?}"),
            }
        }
        assert!(off_curve > 0);
        assert!(outside_subgroup > 0);
    }

    #[test]
    fn test_rejects_invalid_points() {
        rejects_invalid_points::<G1>();
        rejects_invalid_points::<G2>();
    }

    #[test]
    fn test_rejects_invalid_points_g1() {
        // (0, 2) is on y^2 = x^3 + 4 but outside G1
        assert_eq!(
            G1::from_bytes(&compressed_x::<G1>(0)),
            Err(Error::NotInSubgroup)
        );

        // x = 1 gives y^2 = 5, which has no square root
        assert_eq!(
            G1::from_bytes(&compressed_x::<G1>(1)),
            Err(Error::InvalidPoint)
        );
    }

    #[test]
    fn test_generator_from_curve() {
        let curve = Curve::init();
        assert_eq!(G1::generator(), *curve.g1_generator());
        assert_eq!(G2::generator(), *curve.g2_generator());
        assert_eq!(G1::generator(), G1::base());
        assert_eq!(G2::generator(), G2::base());
    }

    #[test]
    fn test_encode_generator_g1() {
        let expected = "3685416753713387016781088315183077757961620795782546409894578378688607592378376318836054947676345821548104185464507\n\
                        1339506544944476473020471379941921221584933875938349620426543736416511423956333506472724655353366534992391756441569";
        assert_eq!(G1::generator().encode(), expected);
    }

    fn encode_deterministic<P: Point>() {
        let generator = P::generator().encode();
        let identity = P::zero().encode();
        assert_ne!(generator, identity);
        for _ in 0..3 {
            assert_eq!(P::generator().encode(), generator);
            assert_eq!(P::zero().encode(), identity);
        }

        // Points with different projective coordinates encode identically
        let mut rng = StdRng::seed_from_u64(5);
        let s = Scalar::random(&mut rng);
        let mut direct = P::generator();
        direct.mul(&s);
        let mut indirect = P::generator();
        indirect.mul(&s);
        indirect.add(&P::generator());
        indirect.sub(&P::generator());
        assert_eq!(direct.encode(), indirect.encode());
        assert_eq!(direct.encode().lines().count(), 2);
    }

    #[test]
    fn test_encode_deterministic() {
        encode_deterministic::<G1>();
        encode_deterministic::<G2>();
    }

    #[test]
    fn test_encode_identity_g1() {
        // The uncompressed identity only carries the infinity flag (0x40) in its first byte
        let x = BigUint::from(1u8) << 382;
        assert_eq!(G1::zero().encode(), format!("{}\n0", x));
    }
}
