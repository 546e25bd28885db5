use super::layout;

pub struct PresetWriter {
    data: Vec<u8>,
}

impl PresetWriter {
    /// Zero-filled buffer of the fixed preset file size.
    pub fn new() -> Self {
        Self {
            data: vec![0u8; layout::PRESET_FILE_SIZE],
        }
    }

    pub fn write_u32_le(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes `bytes` at `offset` followed by a zero terminator, clipped to
    /// `end`. Returns the number of string bytes written.
    pub fn write_terminated_bytes(&mut self, offset: usize, end: usize, bytes: &[u8]) -> usize {
        let end = end.min(self.data.len());
        let available = end.saturating_sub(offset);
        let written = bytes.len().min(available);
        self.data[offset..offset + written].copy_from_slice(&bytes[..written]);
        if offset + written < end {
            self.data[offset + written] = 0;
        }
        written
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

impl Default for PresetWriter {
    fn default() -> Self {
        Self::new()
    }
}
