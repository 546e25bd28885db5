//! Preset file codec.
//!
//! Follows the same layering as the rest of the crate's binary decoding:
//! - `layout`: byte offsets and sizes (source of truth)
//! - `reader` / `writer`: bounds-checked byte access
//! - `parser` / `builder`: domain-level decoding and encoding
//! - `error`: explicit, actionable errors
//!
//! A preset file is exactly 1440 bytes, little-endian throughout. The four
//! reserved header words are reproduced verbatim on build; their meaning is
//! unknown.

pub mod builder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod types;
pub mod writer;

pub use builder::{ParameterSpec, PresetBuilder, build_preset};
pub use error::PresetError;
pub use parser::parse_preset;
pub use types::{Parameter, ParameterType, ParameterValue, Preset};
