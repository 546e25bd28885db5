use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::PresetError;
use super::layout;
use super::types::{ParameterType, ParameterValue, Preset};
use super::writer::PresetWriter;

/// Requested parameter slot: a raw type tag and a numeric value.
///
/// Integer-typed values must be whole numbers in `0..=u32::MAX`; Float values
/// are stored at single precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: u32,
    pub value: f64,
}

impl From<ParameterValue> for ParameterSpec {
    fn from(value: ParameterValue) -> Self {
        Self {
            kind: value.kind().tag(),
            value: value.as_f64(),
        }
    }
}

/// Description of a preset file to build.
///
/// # Examples
/// ```
/// use hxpreset_core::{ParameterValue, PresetBuilder};
///
/// let bytes = PresetBuilder::new(12345, "Round Trip Test")
///     .with_parameter(ParameterValue::Float(0.123))
///     .with_parameter(ParameterValue::Integer(456))
///     .build()?;
/// assert_eq!(bytes.len(), hxpreset_core::PRESET_FILE_SIZE);
/// # Ok::<(), hxpreset_core::PresetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetBuilder {
    pub effect_id: i64,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl PresetBuilder {
    pub fn new(effect_id: i64, name: impl Into<String>) -> Self {
        Self {
            effect_id,
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<ParameterSpec>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Builder that reproduces an existing preset's effect, name and
    /// parameters.
    pub fn from_preset(preset: &Preset) -> Self {
        Self {
            effect_id: i64::from(preset.effect_id()),
            name: preset.name().to_string(),
            parameters: preset
                .parameters()
                .iter()
                .map(|param| ParameterSpec::from(param.value))
                .collect(),
        }
    }

    pub fn build(&self) -> Result<Vec<u8>, PresetError> {
        build_preset(self)
    }
}

/// Encodes a builder description into a preset file.
///
/// The result is always [`layout::PRESET_FILE_SIZE`] bytes.
pub fn build_preset(builder: &PresetBuilder) -> Result<Vec<u8>, PresetError> {
    let effect_id = validate_header(builder)?;
    let values = validate_parameters(&builder.parameters)?;

    let mut writer = PresetWriter::new();
    for (offset, word) in layout::RESERVED_OFFSETS.into_iter().zip(layout::RESERVED_WORDS) {
        writer.write_u32_le(offset, word);
    }
    writer.write_u32_le(layout::EFFECT_ID_RANGE.start, effect_id);
    // Bounded by MAX_PARAMETERS, cannot overflow.
    let data_size = (values.len() * layout::PARAM_SLOT_SIZE) as u32;
    writer.write_u32_le(layout::DATA_SIZE_RANGE.start, data_size);

    let mut offset = layout::PARAMS_OFFSET;
    for value in &values {
        writer.write_u32_le(offset, value.kind().tag());
        writer.write_u32_le(offset + layout::PARAM_TYPE_SIZE, value.to_bits());
        offset += layout::PARAM_SLOT_SIZE;
    }

    let kept = writer.write_terminated_bytes(
        layout::NAME_OFFSET,
        layout::NAME_FIELD_END,
        clip_name(&builder.name).as_bytes(),
    );
    if kept < builder.name.len() {
        warn!(
            name = %builder.name,
            kept,
            "preset name truncated to fit the name field"
        );
    }

    debug!(effect_id, parameters = values.len(), "built preset");
    Ok(writer.finish())
}

fn validate_header(builder: &PresetBuilder) -> Result<u32, PresetError> {
    if builder.name.is_empty() {
        return Err(PresetError::EmptyName);
    }
    if builder.name.len() > layout::NAME_MAX_LEN {
        return Err(PresetError::NameTooLong {
            len: builder.name.len(),
            max: layout::NAME_MAX_LEN,
        });
    }
    // The name is zero-terminated on disk.
    if let Some(position) = builder.name.bytes().position(|b| b == 0) {
        return Err(PresetError::NameContainsNul { position });
    }
    u32::try_from(builder.effect_id).map_err(|_| PresetError::InvalidEffectId {
        value: builder.effect_id,
    })
}

fn validate_parameters(specs: &[ParameterSpec]) -> Result<Vec<ParameterValue>, PresetError> {
    let mut values = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let kind = ParameterType::from_tag(spec.kind).ok_or(PresetError::InvalidParameterType {
            index,
            value: spec.kind,
        })?;
        let value = match kind {
            ParameterType::Float => ParameterValue::Float(spec.value as f32),
            _ => {
                let bits = whole_u32(spec.value).ok_or(PresetError::InvalidParameterValue {
                    index,
                    value: spec.value,
                })?;
                ParameterValue::from_raw(kind, bits)
            }
        };
        values.push(value);
    }
    if values.len() > layout::MAX_PARAMETERS {
        return Err(PresetError::TooManyParameters {
            count: values.len(),
            max: layout::MAX_PARAMETERS,
        });
    }
    Ok(values)
}

fn whole_u32(value: f64) -> Option<u32> {
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Longest prefix of `name` that fits the name field on a character boundary.
fn clip_name(name: &str) -> &str {
    let field = layout::NAME_FIELD_END - layout::NAME_OFFSET;
    if name.len() <= field {
        return name;
    }
    let mut end = field;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
