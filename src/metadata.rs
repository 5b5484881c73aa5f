//! Typed result of one header block.

use std::fmt;

use crate::field::{HeaderFields, HostPort, Scheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVersion {
    Http2,
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpVersion::Http2 => f.write_str("HTTP/2.0"),
        }
    }
}

/// Request headers: at least one request pseudo header was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Option<String>,
    pub scheme: Option<Scheme>,
    pub authority: Option<HostPort>,
    pub path: Option<String>,
    pub version: HttpVersion,
    pub fields: HeaderFields,
    pub content_length: Option<i64>,
}

/// Response headers carrying `:status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub version: HttpVersion,
    pub status: u16,
    pub fields: HeaderFields,
    pub content_length: Option<i64>,
}

/// Header block without pseudo headers (trailers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generic {
    pub version: HttpVersion,
    pub fields: HeaderFields,
    pub content_length: Option<i64>,
}

/// Metadata built from one complete header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaData {
    Request(Request),
    Response(Response),
    Generic(Generic),
}

impl MetaData {
    pub fn fields(&self) -> &HeaderFields {
        match self {
            MetaData::Request(r) => &r.fields,
            MetaData::Response(r) => &r.fields,
            MetaData::Generic(g) => &g.fields,
        }
    }

    pub fn content_length(&self) -> Option<i64> {
        match self {
            MetaData::Request(r) => r.content_length,
            MetaData::Response(r) => r.content_length,
            MetaData::Generic(g) => g.content_length,
        }
    }

    pub fn version(&self) -> HttpVersion {
        match self {
            MetaData::Request(r) => r.version,
            MetaData::Response(r) => r.version,
            MetaData::Generic(g) => g.version,
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, MetaData::Request(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, MetaData::Response(_))
    }
}
