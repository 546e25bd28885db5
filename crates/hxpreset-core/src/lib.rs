//! hxpreset core library for HX One preset files.
//!
//! This crate reads and writes the pedal's fixed-layout `.hx1p` preset format
//! and compares two decoded presets. Decoding is byte-oriented and side-effect
//! free: callers hand in buffers and receive structured records (or buffers
//! back from the builder). File and device I/O live outside this crate.
//!
//! Invariants:
//! - A preset file is exactly [`PRESET_FILE_SIZE`] bytes.
//! - A [`Preset`] only exists as the result of a successful parse.
//! - Parameters are positional; comparison never looks at what a slot means.
//!
//! # Examples
//! ```
//! use hxpreset_core::{ParameterValue, PresetBuilder, compare_presets, parse_preset};
//!
//! let bytes = PresetBuilder::new(500, "70s Chorus")
//!     .with_parameter(ParameterValue::Float(0.5))
//!     .build()?;
//! let preset = parse_preset(&bytes)?;
//! let comparison = compare_presets(&preset, &preset);
//! assert_eq!(comparison.summary().changed_parameters, 0);
//! # Ok::<(), hxpreset_core::PresetError>(())
//! ```

mod compare;
mod preset;

pub use compare::{
    ComparisonSummary, FLOAT_EPSILON, PresetComparison, compare_presets, summarize,
};
pub use preset::layout::{MAX_PARAMETERS, NAME_MAX_LEN, PRESET_FILE_SIZE};
pub use preset::{
    Parameter, ParameterSpec, ParameterType, ParameterValue, Preset, PresetBuilder, PresetError,
    build_preset, parse_preset,
};

/// File extension used for preset files.
pub const PRESET_FILE_EXTENSION: &str = "hx1p";
