pub const PRESET_FILE_SIZE: usize = 1440;

pub const RESERVED_OFFSETS: [usize; 4] = [0x00, 0x04, 0x08, 0x0C];
pub const RESERVED_WORDS: [u32; 4] = [0, 1, 0, 1];

pub const EFFECT_ID_RANGE: std::ops::Range<usize> = 0x10..0x14;
pub const DATA_SIZE_RANGE: std::ops::Range<usize> = 0x14..0x18;

pub const PARAMS_OFFSET: usize = 0x18;
pub const PARAM_SLOT_SIZE: usize = 8;
pub const PARAM_TYPE_SIZE: usize = 4;

pub const NAME_OFFSET: usize = 0x584;
pub const NAME_MAX_LEN: usize = 32;
pub const NAME_FIELD_END: usize = PRESET_FILE_SIZE;

pub const MAX_PARAMETERS: usize = (NAME_OFFSET - PARAMS_OFFSET) / PARAM_SLOT_SIZE;
