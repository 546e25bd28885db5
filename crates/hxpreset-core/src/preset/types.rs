use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire tag describing how a parameter's value slot is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    Flag = 0,
    BoolOrIndex = 1,
    Integer = 2,
    Float = 3,
}

impl ParameterType {
    pub const ALL: [ParameterType; 4] = [
        ParameterType::Flag,
        ParameterType::BoolOrIndex,
        ParameterType::Integer,
        ParameterType::Float,
    ];

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(ParameterType::Flag),
            1 => Some(ParameterType::BoolOrIndex),
            2 => Some(ParameterType::Integer),
            3 => Some(ParameterType::Float),
            _ => None,
        }
    }

    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            ParameterType::Flag => "Flag",
            ParameterType::BoolOrIndex => "BoolOrIndex",
            ParameterType::Integer => "Integer",
            ParameterType::Float => "Float",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded value of a parameter slot. The variant is the parameter type.
///
/// # Examples
/// ```
/// use hxpreset_core::{ParameterType, ParameterValue};
///
/// let value = ParameterValue::Float(0.5);
/// assert_eq!(value.kind(), ParameterType::Float);
/// assert_eq!(value.as_f64(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ParameterValue {
    Flag(u32),
    BoolOrIndex(u32),
    Integer(u32),
    Float(f32),
}

impl ParameterValue {
    /// Builds a value from a type tag and the raw 4-byte slot.
    pub fn from_raw(kind: ParameterType, bits: u32) -> Self {
        match kind {
            ParameterType::Flag => ParameterValue::Flag(bits),
            ParameterType::BoolOrIndex => ParameterValue::BoolOrIndex(bits),
            ParameterType::Integer => ParameterValue::Integer(bits),
            ParameterType::Float => ParameterValue::Float(f32::from_bits(bits)),
        }
    }

    pub fn kind(&self) -> ParameterType {
        match self {
            ParameterValue::Flag(_) => ParameterType::Flag,
            ParameterValue::BoolOrIndex(_) => ParameterType::BoolOrIndex,
            ParameterValue::Integer(_) => ParameterType::Integer,
            ParameterValue::Float(_) => ParameterType::Float,
        }
    }

    /// The 4-byte slot as written on the wire.
    pub fn to_bits(&self) -> u32 {
        match *self {
            ParameterValue::Flag(v)
            | ParameterValue::BoolOrIndex(v)
            | ParameterValue::Integer(v) => v,
            ParameterValue::Float(v) => v.to_bits(),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            ParameterValue::Flag(v)
            | ParameterValue::BoolOrIndex(v)
            | ParameterValue::Integer(v) => f64::from(v),
            ParameterValue::Float(v) => f64::from(v),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Float(v) => write!(f, "{v:.6}"),
            other => write!(f, "{}", other.to_bits()),
        }
    }
}

/// One typed slot of a preset, identified by its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameter {
    /// Byte offset of the slot's type field within the preset file.
    pub offset: usize,
    #[serde(flatten)]
    pub value: ParameterValue,
}

impl Parameter {
    pub fn kind(&self) -> ParameterType {
        self.value.kind()
    }
}

/// A decoded preset file.
///
/// Presets are produced by [`crate::parse_preset`]; fields are read through
/// accessors so a record always reflects the bytes it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub(crate) effect_id: u32,
    pub(crate) name: String,
    pub(crate) data_size: u32,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) header_words: [u32; 4],
    #[serde(skip)]
    pub(crate) raw: Vec<u8>,
}

impl Preset {
    pub fn effect_id(&self) -> u32 {
        self.effect_id
    }

    /// Preset name, trimmed of surrounding whitespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter data size declared in the header, in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The four reserved header words as read from the file.
    pub fn header_words(&self) -> [u32; 4] {
        self.header_words
    }

    /// Exact bytes this preset was parsed from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_type_tags_are_stable() {
        for kind in ParameterType::ALL {
            assert_eq!(ParameterType::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ParameterType::Float.tag(), 3);
        assert_eq!(ParameterType::from_tag(4), None);
        assert_eq!(ParameterType::from_tag(999), None);
    }

    #[test]
    fn float_value_reinterprets_bits() {
        let bits = 0.75f32.to_bits();
        let value = ParameterValue::from_raw(ParameterType::Float, bits);
        assert_eq!(value, ParameterValue::Float(0.75));
        assert_eq!(value.to_bits(), bits);
    }

    #[test]
    fn integer_value_keeps_bits() {
        let value = ParameterValue::from_raw(ParameterType::Integer, 0x3f40_0000);
        assert_eq!(value, ParameterValue::Integer(0x3f40_0000));
        assert_eq!(value.as_f64(), f64::from(0x3f40_0000u32));
    }

    #[test]
    fn display_formats_floats_with_six_decimals() {
        assert_eq!(ParameterValue::Float(0.5).to_string(), "0.500000");
        assert_eq!(ParameterValue::BoolOrIndex(1).to_string(), "1");
        assert_eq!(ParameterType::BoolOrIndex.to_string(), "BoolOrIndex");
    }

    #[test]
    fn parameter_json_is_flat() {
        let param = Parameter {
            offset: 0x18,
            value: ParameterValue::Integer(10),
        };
        let value = serde_json::to_value(param).expect("parameter json");
        assert_eq!(value["offset"], 0x18);
        assert_eq!(value["type"], "Integer");
        assert_eq!(value["value"], 10);
    }
}
