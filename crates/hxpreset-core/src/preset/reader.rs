use super::error::PresetError;

pub struct PresetReader<'a> {
    data: &'a [u8],
}

impl<'a> PresetReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn buffer_len(&self) -> usize {
        self.data.len()
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], PresetError> {
        self.data.get(range.clone()).ok_or(PresetError::TooShort {
            needed: range.end,
            actual: self.data.len(),
        })
    }

    pub fn read_u32_le(&self, offset: usize) -> Result<u32, PresetError> {
        let bytes = self.read_slice(offset..offset + 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads bytes from `offset` up to the first zero byte or the end of the
    /// buffer, decodes them as UTF-8 and trims surrounding whitespace.
    pub fn read_terminated_string(&self, offset: usize) -> String {
        let mut end = offset;
        while end < self.data.len() && self.data[end] != 0 {
            end += 1;
        }
        let bytes = self.data.get(offset..end).unwrap_or_default();
        String::from_utf8_lossy(bytes).trim().to_string()
    }
}
