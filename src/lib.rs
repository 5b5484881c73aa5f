//! h2-metadata: HTTP/2 header block validation for HPACK decoders
//!
//! This crate turns the ordered fields of one HPACK-decoded header block into a
//! typed [`MetaData`] value: a request, a response, or a plain header set such
//! as trailers.
//!
//! # Features
//!
//! - **Sans-I/O Design**: No async runtime, no transport
//! - **Size Budget**: Pre-emptive and cumulative header list size limits
//!   guard against compression bombs
//! - **Pseudo Header Validation**: ordering, duplicates, request/response mixing
//! - **Error Classification**: connection-fatal [`SessionError`] vs. per-stream
//!   [`StreamError`] that aggregates every violation found in the block
//! - **HPACK Support**: Decoding via fluke-hpack
//!
//! # Quick Start
//!
//! ```rust
//! use h2_metadata::{HpackDecoder, MetaData};
//!
//! let mut decoder = HpackDecoder::new();
//!
//! // :method: GET, :scheme: http, :path: /
//! let metadata = decoder.decode(&[0x82, 0x86, 0x84]).unwrap();
//!
//! match metadata {
//!     MetaData::Request(request) => {
//!         assert_eq!(request.method.as_deref(), Some("GET"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Field sources that do their own decoding drive [`MetaDataBuilder`]
//! directly: `emit` each field, then `build` once per block.
//!
//! # Architecture
//!
//! It does NOT provide:
//! - Frame parsing or stream multiplexing
//! - Dynamic table management (owned by the HPACK decoder)
//! - Flow control

pub mod builder;
pub mod config;
pub mod error;
pub mod field;
pub mod hpack;
pub mod metadata;

pub use builder::MetaDataBuilder;
pub use config::{settings_id, DecoderConfig, DEFAULT_MAX_HEADER_LIST_SIZE};
pub use error::{error_code, HpackError, SessionError, StreamError, Violation};
pub use field::{
    DecodedField, Header, HeaderField, HeaderFields, HostPort, ResolvedValue, Scheme,
    FIELD_OVERHEAD,
};
pub use hpack::HpackDecoder;
pub use metadata::{Generic, HttpVersion, MetaData, Request, Response};
