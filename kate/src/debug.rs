//! Human-readable dumps of point sets.

use crate::group::Point;
use tracing::debug;

/// Formats one `"{label} {index}: {encoding}"` line per point (see [Point::encode]) and emits
/// each line as a `debug` event.
///
/// Intended for logging only: the output is not a supported interchange format.
pub fn debug_points<P: Point>(label: &str, points: &[P]) -> String {
    let mut out = String::new();
    for (index, point) in points.iter().enumerate() {
        let encoded = point.encode();
        debug!(label, index, point = %encoded, "point");
        out.push_str(&format!("{label} {index}: {encoded}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        group::{Element, G1, G2},
        scalar::Scalar,
    };

    #[test]
    fn test_debug_points() {
        let mut two = G1::generator();
        two.mul(&Scalar::from(2u64));
        let points = [G1::generator(), two, G1::zero()];
        let out = debug_points("powers", &points);

        assert!(out.starts_with(&format!("powers 0: {}\n", G1::generator().encode())));
        assert!(out.contains(&format!("powers 1: {}\n", two.encode())));
        assert!(out.ends_with(&format!("powers 2: {}\n", G1::zero().encode())));

        // Each encoding spans two lines
        assert_eq!(out.lines().count(), 2 * points.len());
    }

    #[test]
    fn test_debug_points_empty() {
        assert!(debug_points::<G2>("empty", &[]).is_empty());
    }

    #[test]
    fn test_debug_points_deterministic() {
        let points = [G2::generator(), G2::zero()];
        assert_eq!(debug_points("g2", &points), debug_points("g2", &points));
    }
}
