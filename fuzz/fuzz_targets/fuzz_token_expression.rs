//! Fuzz target for split-token arithmetic.
//!
//! Tests that `evaluate_tokens` never panics (overflow, division by zero,
//! deep nesting) and only ever yields numbers or tuples of numbers.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ns_decode::{evaluate_tokens, ScalarValue};

fn numeric(value: &ScalarValue) -> bool {
    match value {
        ScalarValue::Tuple(items) => items.iter().all(numeric),
        other => other.is_numeric(),
    }
}

fuzz_target!(|tokens: Vec<String>| {
    if let Ok(value) = evaluate_tokens(&tokens) {
        assert!(numeric(&value), "non-numeric result {:?}", value);
    }
});
