//! Multi-scalar multiplication ("linear combination") over G1 and G2.
//!
//! Computing `sum(factors[i] * points[i])` dominates the cost of producing a commitment or an
//! opening proof. [lin_comb] hands the whole batch to `blst`'s Pippenger implementation rather
//! than multiplying and accumulating term by term, and [lin_comb_par] splits large batches
//! across a [ThreadPool].

use crate::{group::Point, scalar::Scalar};
use rayon::{prelude::*, ThreadPool};

/// Computes `sum(factors[i] * points[i])`.
///
/// Returns the identity when both slices are empty.
///
/// # Panics
///
/// Panics if `points.len() != factors.len()`. A mismatch is a bug in the caller, not a data
/// error, so it is never silently truncated.
pub fn lin_comb<P: Point>(points: &[P], factors: &[Scalar]) -> P {
    assert_eq!(
        points.len(),
        factors.len(),
        "lin_comb points/factors length mismatch"
    );
    P::msm(points, factors)
}

/// Computes `sum(factors[i] * points[i])`, splitting the work into one contiguous chunk per
/// thread in `pool` and summing the partial results.
///
/// The result is identical to [lin_comb].
///
/// # Panics
///
/// Panics if `points.len() != factors.len()`.
pub fn lin_comb_par<P: Point>(points: &[P], factors: &[Scalar], pool: &ThreadPool) -> P {
    assert_eq!(
        points.len(),
        factors.len(),
        "lin_comb points/factors length mismatch"
    );
    let chunk = points.len().div_ceil(pool.current_num_threads()).max(1);
    pool.install(|| {
        points
            .par_chunks(chunk)
            .zip(factors.par_chunks(chunk))
            .map(|(points, factors)| P::msm(points, factors))
            .reduce(P::zero, |mut acc, partial| {
                acc.add(&partial);
                acc
            })
    })
}
