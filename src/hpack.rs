//! HPACK: Header Compression for HTTP/2 (RFC 7541)
//!
//! Thin wrapper around `fluke-hpack` that feeds each decoded field into a
//! [`MetaDataBuilder`] and returns the typed metadata for the block.

use tracing::warn;

use crate::builder::MetaDataBuilder;
use crate::config::DecoderConfig;
use crate::error::{HpackError, SessionError};
use crate::field::{DecodedField, Header, ResolvedValue, Scheme};
use crate::metadata::MetaData;

/// `:status` values present in the HPACK static table (RFC 7541 Appendix A)
const STATIC_STATUS: [u16; 7] = [200, 204, 206, 304, 400, 404, 500];

/// HPACK decoder for HTTP/2 header blocks.
/// Wraps `fluke_hpack::Decoder` which maintains dynamic table state per-connection.
pub struct HpackDecoder {
    inner: fluke_hpack::Decoder<'static>,
    builder: MetaDataBuilder,
}

impl std::fmt::Debug for HpackDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HpackDecoder")
            .field("builder", &self.builder)
            .finish()
    }
}

impl Default for HpackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl HpackDecoder {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            inner: fluke_hpack::Decoder::new(),
            builder: MetaDataBuilder::new(config.max_header_list_size),
        }
    }

    pub fn max_size(&self) -> usize {
        self.builder.max_size()
    }

    pub fn size(&self) -> usize {
        self.builder.size()
    }

    /// Decode one complete HPACK header block into metadata.
    ///
    /// A [`HpackError::Session`] means the connection must be closed; a
    /// [`HpackError::Stream`] only fails this block.
    pub fn decode(&mut self, data: &[u8]) -> Result<MetaData, HpackError> {
        let pairs = match self.inner.decode(data) {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!(error = ?e, "HPACK decode error");
                self.builder.reset();
                return Err(SessionError::Compression(format!("{:?}", e)).into());
            }
        };

        for (name, value) in pairs {
            let emitted = match decoded_field(&name, &value) {
                Some(field) => self.builder.emit(field),
                None => self.builder.emit_undecodable(&name, &value),
            };
            if let Err(e) = emitted {
                self.builder.reset();
                return Err(e.into());
            }
        }

        Ok(self.builder.build()?)
    }
}

/// Turn a raw name/value pair into a field, resolving the values the
/// static table would carry pre-parsed. `None` if either is not UTF-8.
fn decoded_field(name: &[u8], value: &[u8]) -> Option<DecodedField> {
    let name = std::str::from_utf8(name).ok()?.to_string();
    let value = std::str::from_utf8(value).ok()?.to_string();
    let resolved = match Header::recognize(&name) {
        Header::Status => value
            .parse::<u16>()
            .ok()
            .filter(|status| STATIC_STATUS.contains(status))
            .map(ResolvedValue::Status),
        Header::Scheme => match value.as_str() {
            "http" => Some(ResolvedValue::Scheme(Scheme::Http)),
            "https" => Some(ResolvedValue::Scheme(Scheme::Https)),
            _ => None,
        },
        _ => None,
    };
    Some(match resolved {
        Some(resolved) => DecodedField::resolved(name, value, resolved),
        None => DecodedField::new(name, value),
    })
}

// ============================================================================
// Tests
// ============================================================================
