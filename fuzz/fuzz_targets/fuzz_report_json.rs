//! Fuzz target for captured report snapshots.
//!
//! Tests that any JSON snapshot either fails to load or decodes through the
//! full facade without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ns_core::{NodeCategory, NodeIdentity, NodestatConfig, ReportNode, SopInfo};

fuzz_target!(|data: &str| {
    let Ok(report) = ReportNode::from_json(data) else {
        return;
    };
    let identity = NodeIdentity::from_path("/obj/fuzz/node", NodeCategory::Sop);
    if let Ok(info) = SopInfo::from_snapshot(identity, report, NodestatConfig::default()) {
        let _ = info.summary();
        let _ = info.subnetwork_outputs(&|path: &str| Some(path.len()));
    }
});
