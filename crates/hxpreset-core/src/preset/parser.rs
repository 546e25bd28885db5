use tracing::debug;

use super::error::PresetError;
use super::layout;
use super::reader::PresetReader;
use super::types::{Parameter, ParameterType, ParameterValue, Preset};

/// Parses a preset file.
///
/// The buffer must be exactly [`layout::PRESET_FILE_SIZE`] bytes. Parameters
/// are decoded from the header's declared data size; an unknown type tag
/// before that bound ends the parameter list instead of failing, since the
/// format carries no explicit parameter count.
///
/// # Examples
/// ```
/// use hxpreset_core::{PresetBuilder, ParameterValue, build_preset, parse_preset};
///
/// let builder = PresetBuilder::new(500, "70s Chorus")
///     .with_parameter(ParameterValue::Float(0.5));
/// let bytes = build_preset(&builder)?;
/// let preset = parse_preset(&bytes)?;
/// assert_eq!(preset.effect_id(), 500);
/// assert_eq!(preset.name(), "70s Chorus");
/// # Ok::<(), hxpreset_core::PresetError>(())
/// ```
pub fn parse_preset(data: &[u8]) -> Result<Preset, PresetError> {
    if data.len() != layout::PRESET_FILE_SIZE {
        return Err(PresetError::InvalidSize {
            actual: data.len(),
            expected: layout::PRESET_FILE_SIZE,
        });
    }

    let reader = PresetReader::new(data);
    let mut header_words = [0u32; 4];
    for (word, offset) in header_words.iter_mut().zip(layout::RESERVED_OFFSETS) {
        *word = reader.read_u32_le(offset)?;
    }
    let effect_id = reader.read_u32_le(layout::EFFECT_ID_RANGE.start)?;
    let data_size = reader.read_u32_le(layout::DATA_SIZE_RANGE.start)?;
    let name = reader.read_terminated_string(layout::NAME_OFFSET);
    let parameters = parse_parameters(&reader, data_size)?;

    debug!(
        effect_id,
        data_size,
        parameters = parameters.len(),
        "parsed preset"
    );

    Ok(Preset {
        effect_id,
        name,
        data_size,
        parameters,
        header_words,
        raw: data.to_vec(),
    })
}

fn parse_parameters(
    reader: &PresetReader<'_>,
    data_size: u32,
) -> Result<Vec<Parameter>, PresetError> {
    let declared_end = layout::PARAMS_OFFSET.saturating_add(data_size as usize);
    let end = declared_end.min(reader.buffer_len());

    let mut parameters = Vec::new();
    let mut offset = layout::PARAMS_OFFSET;
    while offset + layout::PARAM_SLOT_SIZE <= end {
        let tag = reader.read_u32_le(offset)?;
        let Some(kind) = ParameterType::from_tag(tag) else {
            debug!(tag, offset, "unknown parameter type, ending parameter list");
            break;
        };
        let bits = reader.read_u32_le(offset + layout::PARAM_TYPE_SIZE)?;
        parameters.push(Parameter {
            offset,
            value: ParameterValue::from_raw(kind, bits),
        });
        offset += layout::PARAM_SLOT_SIZE;
    }
    Ok(parameters)
}
