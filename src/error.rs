//! Error classification for header block decoding.
//!
//! [`SessionError`] means the shared HPACK state can no longer be trusted and
//! the connection must go away. [`StreamError`] fails a single header block;
//! the connection keeps decoding other streams.

use crate::field::Header;

/// HTTP/2 error codes (RFC 7540 Section 7)
pub mod error_code {
    pub const PROTOCOL_ERROR: u32 = 0x1;
    pub const COMPRESSION_ERROR: u32 = 0x9;
}

/// Connection-fatal error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Header size {size} > {max_size}")]
    HeaderTooLarge { size: usize, max_size: usize },
    #[error("HPACK decode error: {0}")]
    Compression(String),
}

/// A single recoverable problem found in a header block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("Pseudo header {0} after fields")]
    PseudoHeaderAfterFields(Header),
    #[error("Duplicate pseudo header {0}")]
    DuplicatePseudoHeader(Header),
    #[error("Unknown pseudo header {0}")]
    UnknownPseudoHeader(String),
    #[error("Unsupported TE value {0}")]
    UnsupportedTe(String),
    #[error("Connection specific field {0}")]
    ConnectionSpecific(String),
    #[error("Request and Response headers")]
    MixedRequestResponse,
    #[error("Header {0} is not valid UTF-8")]
    InvalidEncoding(String),
    #[error("Invalid {header} value {value:?}")]
    InvalidValue { header: Header, value: String },
}

/// Aggregated recoverable error for one header block: the first violation
/// plus every later one, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{primary}{}", render_suppressed(.suppressed))]
pub struct StreamError {
    pub primary: Violation,
    pub suppressed: Vec<Violation>,
}

fn render_suppressed(suppressed: &[Violation]) -> String {
    suppressed.iter().map(|v| format!("; {}", v)).collect()
}

impl StreamError {
    pub fn new(primary: Violation) -> Self {
        Self {
            primary,
            suppressed: Vec::new(),
        }
    }

    /// Attach a later violation to this error.
    pub fn suppress(&mut self, violation: Violation) {
        self.suppressed.push(violation);
    }

    /// All violations, primary first.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        std::iter::once(&self.primary).chain(self.suppressed.iter())
    }
}

/// Either class of header decoding error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HpackError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl HpackError {
    /// True when the whole connection must be torn down.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HpackError::Session(_))
    }

    /// Code for the GOAWAY (fatal) or RST_STREAM (recoverable) frame.
    pub fn error_code(&self) -> u32 {
        match self {
            HpackError::Session(_) => error_code::COMPRESSION_ERROR,
            HpackError::Stream(_) => error_code::PROTOCOL_ERROR,
        }
    }
}
