//! Nodestat decoding engine.
//!
//! This crate turns the string rows of a node info report into typed values:
//! - Literal coercion: a closed recursive-descent grammar with a lenient
//!   string fallback, plus a restricted arithmetic fold for split tokens
//! - Unit decoders for vectors, durations, sizes and timestamps
//! - Schema-checked decoders for attribute, volume and counts tables
//!
//! Nothing here evaluates host-provided text as code.

pub mod ast;
pub mod attribute;
pub mod coerce;
pub mod counts;
pub mod fields;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod token;
pub mod units;
pub mod value;
pub mod volume;

pub use attribute::{
    attributes_in, decode_attributes, AttributeDescriptor, BaseType, VectorSubtype,
};
pub use coerce::{coerce, coerce_text, evaluate_tokens, parse_literal, Raw};
pub use counts::{decode_counts, GeoCounts};
pub use fields::{FieldMap, FieldValue};
pub use parser::ParseError;
pub use units::{
    decode_date, decode_megabytes, decode_seconds, decode_vector2, decode_vector3, UnitScales,
    Vector2, Vector3, DEFAULT_DATE_FORMAT,
};
pub use value::ScalarValue;
pub use volume::{
    decode_sparse_volumes, decode_volumes, sparse_volumes_in, volumes_in, SparseVolumeDescriptor,
    VolumeDescriptor,
};
