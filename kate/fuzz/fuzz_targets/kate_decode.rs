#![no_main]

use commonware_kate::{
    group::{Point, G1, G2},
    scalar::Scalar,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to the same bytes
    if let Ok(scalar) = Scalar::from_bytes(data) {
        assert_eq!(scalar.to_bytes().as_slice(), data);
    }
    if let Ok(point) = G1::from_bytes(data) {
        assert_eq!(point.to_bytes(), data);
    }
    if let Ok(point) = G2::from_bytes(data) {
        assert_eq!(point.to_bytes(), data);
    }
});
