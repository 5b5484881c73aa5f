//! Decoded header fields as handed over by an HPACK field source.
//!
//! A field carries its raw name/value plus the recognized [`Header`] kind, and
//! optionally a [`ResolvedValue`] when the source already knows the typed value
//! (e.g. a static table entry such as `:status: 200`).

use std::fmt;

/// Per-entry overhead counted against the header list size (RFC 7541 Section 4.1)
pub const FIELD_OVERHEAD: usize = 32;

/// Recognized header names. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Header {
    Status,
    Method,
    Scheme,
    Authority,
    Path,
    Host,
    ContentLength,
    Te,
    Connection,
    Other,
}

impl Header {
    /// Recognize a header name, ignoring ASCII case.
    pub fn recognize(name: &str) -> Self {
        const KNOWN: [Header; 9] = [
            Header::Status,
            Header::Method,
            Header::Scheme,
            Header::Authority,
            Header::Path,
            Header::Host,
            Header::ContentLength,
            Header::Te,
            Header::Connection,
        ];
        KNOWN
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Header::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Header::Status => ":status",
            Header::Method => ":method",
            Header::Scheme => ":scheme",
            Header::Authority => ":authority",
            Header::Path => ":path",
            Header::Host => "host",
            Header::ContentLength => "content-length",
            Header::Te => "te",
            Header::Connection => "connection",
            Header::Other => "<other>",
        }
    }

    pub fn is_pseudo(&self) -> bool {
        matches!(
            self,
            Header::Status | Header::Method | Header::Scheme | Header::Authority | Header::Path
        )
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `:scheme` pseudo header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
    /// Unrecognized scheme, kept verbatim
    Other(String),
}

impl Scheme {
    pub fn parse(value: &str) -> Self {
        const TABLE: [(&str, Scheme); 4] = [
            ("http", Scheme::Http),
            ("https", Scheme::Https),
            ("ws", Scheme::Ws),
            ("wss", Scheme::Wss),
        ];
        TABLE
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|(_, scheme)| scheme)
            .unwrap_or_else(|| Scheme::Other(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
            Scheme::Other(s) => s,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host and optional port taken from `:authority` or `host`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPort {
    /// Host name; IPv6 literals keep their brackets
    pub host: String,
    pub port: Option<u16>,
}

impl HostPort {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse an authority string. Returns `None` for a malformed port or
    /// an unterminated IPv6 literal.
    pub fn parse(authority: &str) -> Option<Self> {
        if authority.starts_with('[') {
            let close = authority.find(']')?;
            let host = &authority[..=close];
            let rest = &authority[close + 1..];
            return match rest.strip_prefix(':') {
                Some(port) => Some(Self::new(host, Some(parse_port(port)?))),
                None if rest.is_empty() => Some(Self::new(host, None)),
                None => None,
            };
        }

        match authority.find(':') {
            None => Some(Self::new(authority, None)),
            Some(colon) if authority.rfind(':') == Some(colon) => {
                let port = parse_port(&authority[colon + 1..])?;
                Some(Self::new(&authority[..colon], Some(port)))
            }
            // Bare IPv6 literal
            Some(_) => Some(Self::new(format!("[{}]", authority), None)),
        }
    }
}

fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse().ok()
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => f.write_str(&self.host),
        }
    }
}

/// A typed value the field source resolved ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Status(u16),
    Scheme(Scheme),
    Authority(HostPort),
    ContentLength(i64),
}

/// One field as produced by the HPACK field source, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: String,
    pub value: Option<String>,
    pub header: Header,
    pub resolved: Option<ResolvedValue>,
}

impl DecodedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            header: Header::recognize(&name),
            name,
            value: Some(value.into()),
            resolved: None,
        }
    }

    /// A field whose value has no textual form (e.g. a name-only entry).
    pub fn without_value(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            header: Header::recognize(&name),
            name,
            value: None,
            resolved: None,
        }
    }

    /// Static table fast path: raw text plus its pre-resolved value.
    pub fn resolved(name: impl Into<String>, value: impl Into<String>, resolved: ResolvedValue) -> Self {
        Self {
            resolved: Some(resolved),
            ..Self::new(name, value)
        }
    }

    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Size counted against the header list budget.
    pub fn size(&self) -> usize {
        self.name.len() + self.value_str().len() + FIELD_OVERHEAD
    }
}

/// A regular header field as carried in the built metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<DecodedField> for HeaderField {
    fn from(field: DecodedField) -> Self {
        Self {
            name: field.name,
            value: field.value.unwrap_or_default(),
        }
    }
}

/// Ordered collection of regular header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    fields: Vec<HeaderField>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, field: HeaderField) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.fields.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderField> {
        self.fields.iter()
    }

    /// First value for `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<'a> IntoIterator for &'a HeaderFields {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for HeaderFields {
    type Item = HeaderField;
    type IntoIter = std::vec::IntoIter<HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
