//! Header block accumulator.
//!
//! The HPACK field source pushes decoded fields one at a time with
//! [`MetaDataBuilder::emit`], then calls [`MetaDataBuilder::build`] once per
//! header block. Size violations fail immediately and are fatal for the
//! connection. Every other problem is recorded and reported by `build`, so the
//! source keeps consuming the block and its dynamic table stays in sync.

use tracing::{debug, trace, warn};

use crate::error::{SessionError, StreamError, Violation};
use crate::field::{
    DecodedField, Header, HeaderField, HeaderFields, HostPort, ResolvedValue, Scheme, FIELD_OVERHEAD,
};
use crate::metadata::{Generic, HttpVersion, MetaData, Request, Response};

/// Minimum capacity of a fresh field collection
const MIN_FIELDS_CAPACITY: usize = 10;

/// Per-block state, replaced wholesale on reset.
#[derive(Debug, Default)]
struct Block {
    size: usize,
    status: Option<u16>,
    method: Option<String>,
    scheme: Option<Scheme>,
    authority: Option<HostPort>,
    path: Option<String>,
    content_length: Option<i64>,
    fields: HeaderFields,
    request: bool,
    response: bool,
    error: Option<StreamError>,
}

impl Block {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HeaderFields::with_capacity(capacity),
            ..Self::default()
        }
    }

    fn has_pseudo(&self, header: Header) -> bool {
        match header {
            Header::Status => self.status.is_some(),
            Header::Method => self.method.is_some(),
            Header::Scheme => self.scheme.is_some(),
            Header::Authority => self.authority.is_some(),
            Header::Path => self.path.is_some(),
            _ => false,
        }
    }
}

/// Builds [`MetaData`] from one header block at a time.
///
/// One instance serves one decode direction of one connection.
#[derive(Debug)]
pub struct MetaDataBuilder {
    max_size: usize,
    block: Block,
}

impl MetaDataBuilder {
    /// `max_size` bounds the sum of name + value + 32 over a block's fields.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            block: Block::with_capacity(MIN_FIELDS_CAPACITY),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Running size of the current block
    pub fn size(&self) -> usize {
        self.block.size
    }

    /// Pre-emptive check before a field of `length` encoded bytes is
    /// materialized. Huffman coded strings may expand by up to 4/3.
    /// Does not change the running size.
    pub fn check_size(&self, length: usize, huffman: bool) -> Result<(), SessionError> {
        let length = if huffman {
            length.saturating_mul(4) / 3
        } else {
            length
        };
        let size = self.block.size.saturating_add(length);
        if size > self.max_size {
            warn!(size, max_size = self.max_size, "header block would exceed size limit");
            return Err(SessionError::HeaderTooLarge {
                size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    /// Push one decoded field of the current block.
    pub fn emit(&mut self, field: DecodedField) -> Result<(), SessionError> {
        self.account(field.size())?;

        match field.header {
            Header::Status => {
                if self.check_pseudo(Header::Status) {
                    let status = match field.resolved {
                        Some(ResolvedValue::Status(status)) => Some(status),
                        _ => field.value_str().trim().parse().ok(),
                    };
                    match status {
                        Some(status) => {
                            self.block.status = Some(status);
                            self.block.response = true;
                        }
                        None => self.invalid(Header::Status, &field),
                    }
                }
            }
            Header::Method => {
                if self.check_pseudo(Header::Method) {
                    self.block.method = Some(field.value.unwrap_or_default());
                    self.block.request = true;
                }
            }
            Header::Scheme => {
                if self.check_pseudo(Header::Scheme) {
                    let scheme = match field.resolved {
                        Some(ResolvedValue::Scheme(scheme)) => scheme,
                        _ => Scheme::parse(field.value_str()),
                    };
                    self.block.scheme = Some(scheme);
                    self.block.request = true;
                }
            }
            Header::Authority => {
                if self.check_pseudo(Header::Authority) {
                    match authority_of(&field) {
                        Some(authority) => {
                            self.block.authority = Some(authority);
                            self.block.request = true;
                        }
                        None => self.invalid(Header::Authority, &field),
                    }
                }
            }
            Header::Path => {
                if self.check_pseudo(Header::Path) {
                    self.block.path = Some(field.value.unwrap_or_default());
                    self.block.request = true;
                }
            }
            Header::Host => {
                // :authority comes first; when present, host does not override it.
                if self.block.authority.is_none() && field.value.is_some() {
                    match authority_of(&field) {
                        Some(authority) => self.block.authority = Some(authority),
                        None => self.invalid(Header::Host, &field),
                    }
                }
                self.block.fields.push(field.into());
            }
            Header::ContentLength => {
                let length = match field.resolved {
                    Some(ResolvedValue::ContentLength(length)) => Some(length),
                    _ => field.value_str().trim().parse().ok(),
                };
                match length {
                    Some(length) => {
                        self.block.content_length = Some(length);
                        self.block.fields.push(field.into());
                    }
                    None => self.invalid(Header::ContentLength, &field),
                }
            }
            Header::Te => {
                if field.value_str().eq_ignore_ascii_case("trailers") {
                    self.block.fields.push(field.into());
                } else {
                    self.violation(Violation::UnsupportedTe(field.value_str().to_string()));
                }
            }
            // TODO: decide whether keep-alive, proxy-connection, transfer-encoding
            // and upgrade should be rejected here as well.
            Header::Connection => {
                self.violation(Violation::ConnectionSpecific(field.name));
            }
            Header::Other => {
                if field.name.starts_with(':') {
                    self.violation(Violation::UnknownPseudoHeader(field.name));
                } else {
                    self.block.fields.push(HeaderField::from(field));
                }
            }
        }
        Ok(())
    }

    /// Account for a field whose name or value is not valid UTF-8. Its raw
    /// size still counts against the budget; the field itself is dropped and
    /// fails the block.
    pub fn emit_undecodable(&mut self, name: &[u8], value: &[u8]) -> Result<(), SessionError> {
        self.account(name.len() + value.len() + FIELD_OVERHEAD)?;
        self.violation(Violation::InvalidEncoding(String::from_utf8_lossy(name).into_owned()));
        Ok(())
    }

    /// Add `field_size` to the running size. On overflow the running size is
    /// left unchanged.
    fn account(&mut self, field_size: usize) -> Result<(), SessionError> {
        let size = self.block.size.saturating_add(field_size);
        if size > self.max_size {
            warn!(size, max_size = self.max_size, "header block exceeds size limit");
            return Err(SessionError::HeaderTooLarge {
                size,
                max_size: self.max_size,
            });
        }
        self.block.size = size;
        Ok(())
    }

    /// Finish the current block. Per-block state is cleared whatever the
    /// outcome; the size limit carries over to the next block.
    pub fn build(&mut self) -> Result<MetaData, StreamError> {
        let block = self.take_block();

        if let Some(error) = block.error {
            return Err(error);
        }
        if block.request && block.response {
            debug!("header block mixes request and response pseudo headers");
            return Err(StreamError::new(Violation::MixedRequestResponse));
        }

        let version = HttpVersion::Http2;
        let metadata = if block.method.is_some()
            || block.path.is_some()
            || block.authority.is_some()
            || block.scheme.is_some()
        {
            MetaData::Request(Request {
                method: block.method,
                scheme: block.scheme,
                authority: block.authority,
                path: block.path,
                version,
                fields: block.fields,
                content_length: block.content_length,
            })
        } else if let Some(status) = block.status {
            MetaData::Response(Response {
                version,
                status,
                fields: block.fields,
                content_length: block.content_length,
            })
        } else {
            MetaData::Generic(Generic {
                version,
                fields: block.fields,
                content_length: block.content_length,
            })
        };
        trace!(
            request = metadata.is_request(),
            response = metadata.is_response(),
            fields = metadata.fields().len(),
            "built header block"
        );
        Ok(metadata)
    }

    /// Drop the current block without building it, e.g. after a fatal error.
    pub fn reset(&mut self) {
        self.take_block();
    }

    fn take_block(&mut self) -> Block {
        let capacity = MIN_FIELDS_CAPACITY.max(self.block.fields.len() + 5);
        std::mem::replace(&mut self.block, Block::with_capacity(capacity))
    }

    /// Whether a pseudo header may still be set in this block.
    fn check_pseudo(&mut self, header: Header) -> bool {
        if !self.block.fields.is_empty() {
            self.violation(Violation::PseudoHeaderAfterFields(header));
            return false;
        }
        if self.block.has_pseudo(header) {
            self.violation(Violation::DuplicatePseudoHeader(header));
            return false;
        }
        true
    }

    fn invalid(&mut self, header: Header, field: &DecodedField) {
        self.violation(Violation::InvalidValue {
            header,
            value: field.value_str().to_string(),
        });
    }

    fn violation(&mut self, violation: Violation) {
        debug!(%violation, "header block violation");
        match &mut self.block.error {
            Some(error) => error.suppress(violation),
            None => self.block.error = Some(StreamError::new(violation)),
        }
    }
}

fn authority_of(field: &DecodedField) -> Option<HostPort> {
    match &field.resolved {
        Some(ResolvedValue::Authority(authority)) => Some(authority.clone()),
        _ => HostPort::parse(field.value.as_deref()?),
    }
}
