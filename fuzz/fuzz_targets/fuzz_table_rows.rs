//! Fuzz target for the table decoders.
//!
//! Tests that arbitrary rows produce either descriptors or an error, never a
//! panic, and that volume output stays ordered by primitive index.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ns_common::ReportNode;
use ns_decode::{decode_attributes, decode_sparse_volumes, decode_volumes, FieldMap};

fuzz_target!(|rows: Vec<Vec<String>>| {
    let _ = decode_attributes("Point Attributes", &rows);

    if let Ok(volumes) = decode_volumes("Volumes", &rows) {
        assert!(volumes
            .windows(2)
            .all(|w| w[0].primitive_index < w[1].primitive_index));
    }
    let _ = decode_sparse_volumes("Sparse Volumes", &rows);

    let node = ReportNode {
        rows,
        ..ReportNode::default()
    };
    if let Ok(fields) = FieldMap::from_section("SOP Info", &node) {
        for (key, _) in fields.iter() {
            let _ = fields.coerce(key);
        }
    }
});
