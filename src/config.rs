//! Decoder configuration.

/// HTTP/2 SETTINGS identifiers (RFC 7540 Section 6.5.2)
pub mod settings_id {
    pub const INITIAL_WINDOW_SIZE: u16 = 0x4;
    pub const MAX_HEADER_LIST_SIZE: u16 = 0x6;
}

/// Default header list budget (16 KB).
pub const DEFAULT_MAX_HEADER_LIST_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Upper bound on name + value + 32 summed over one header block
    pub max_header_list_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_header_list_size: DEFAULT_MAX_HEADER_LIST_SIZE,
        }
    }
}

impl DecoderConfig {
    pub fn with_max_header_list_size(mut self, size: usize) -> Self {
        self.max_header_list_size = size;
        self
    }

    /// Apply `(identifier, value)` pairs from a SETTINGS frame.
    /// Only SETTINGS_MAX_HEADER_LIST_SIZE affects the decoder.
    pub fn apply_settings(&mut self, settings: &[(u16, u32)]) {
        for &(id, value) in settings {
            if id == settings_id::MAX_HEADER_LIST_SIZE {
                self.max_header_list_size = value as usize;
            }
        }
    }
}
