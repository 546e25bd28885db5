use thiserror::Error;

/// Errors returned by preset parsing and building.
///
/// Every variant describes an invalid preset format: either the input bytes
/// are not a preset file, or the builder describes a file that cannot be
/// written.
///
/// # Examples
/// ```
/// use hxpreset_core::{PresetError, parse_preset};
///
/// let err = parse_preset(&[0u8; 100]).unwrap_err();
/// assert!(matches!(err, PresetError::InvalidSize { actual: 100, .. }));
/// assert!(err.to_string().contains("1440"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresetError {
    #[error("invalid file size: {actual} bytes (expected {expected})")]
    InvalidSize { actual: usize, expected: usize },
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("preset name cannot be empty")]
    EmptyName,
    #[error("preset name too long: {len} bytes (max {max})")]
    NameTooLong { len: usize, max: usize },
    #[error("preset name contains a NUL byte at {position}")]
    NameContainsNul { position: usize },
    #[error("invalid effect ID: {value}")]
    InvalidEffectId { value: i64 },
    #[error("invalid parameter type at index {index}: {value}")]
    InvalidParameterType { index: usize, value: u32 },
    #[error("invalid parameter value at index {index}: {value} is not an unsigned 32-bit integer")]
    InvalidParameterValue { index: usize, value: f64 },
    #[error("too many parameters: {count} (max {max})")]
    TooManyParameters { count: usize, max: usize },
}
