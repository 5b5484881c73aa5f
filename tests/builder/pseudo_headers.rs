//! Tests for pseudo header ordering, uniqueness and classification

use h2_metadata::{
    DecodedField, Header, HostPort, MetaData, MetaDataBuilder, ResolvedValue, Scheme, Violation,
};

fn builder() -> MetaDataBuilder {
    MetaDataBuilder::new(8192)
}

#[test]
fn test_request_with_host_authority() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":method", "GET")).unwrap();
    builder.emit(DecodedField::new(":scheme", "https")).unwrap();
    builder.emit(DecodedField::new(":path", "/")).unwrap();
    builder.emit(DecodedField::new("host", "example.com:443")).unwrap();

    match builder.build().unwrap() {
        MetaData::Request(request) => {
            assert_eq!(request.method.as_deref(), Some("GET"));
            assert_eq!(request.scheme, Some(Scheme::Https));
            assert_eq!(request.path.as_deref(), Some("/"));
            assert_eq!(request.authority, Some(HostPort::new("example.com", Some(443))));
            assert_eq!(request.fields.len(), 1);
            assert_eq!(request.fields.get("host"), Some("example.com:443"));
            assert_eq!(request.content_length, None);
        }
        other => panic!("Expected Request, got {:?}", other),
    }
}

#[test]
fn test_pseudo_header_after_fields() {
    let mut builder = builder();

    builder.emit(DecodedField::new("foo", "bar")).unwrap();
    // Not reported at emit time
    builder.emit(DecodedField::new(":method", "GET")).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err.primary, Violation::PseudoHeaderAfterFields(Header::Method));
    assert!(err.to_string().contains(":method"));
}

#[test]
fn test_duplicate_pseudo_header() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":path", "/a")).unwrap();
    builder.emit(DecodedField::new(":path", "/b")).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err.primary, Violation::DuplicatePseudoHeader(Header::Path));
    assert!(err.to_string().contains("Duplicate"));
}

#[test]
fn test_resolved_status_response() {
    let mut builder = builder();

    builder
        .emit(DecodedField::resolved(":status", "200", ResolvedValue::Status(200)))
        .unwrap();

    match builder.build().unwrap() {
        MetaData::Response(response) => {
            assert_eq!(response.status, 200);
            assert!(response.fields.is_empty());
        }
        other => panic!("Expected Response, got {:?}", other),
    }
}

#[test]
fn test_raw_status_response() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":status", "404")).unwrap();
    builder.emit(DecodedField::new("content-type", "text/plain")).unwrap();

    match builder.build().unwrap() {
        MetaData::Response(response) => {
            assert_eq!(response.status, 404);
            assert_eq!(response.fields.get("content-type"), Some("text/plain"));
        }
        other => panic!("Expected Response, got {:?}", other),
    }
}

#[test]
fn test_no_pseudo_headers_is_generic() {
    let mut builder = builder();

    builder.emit(DecodedField::new("grpc-status", "0")).unwrap();

    let metadata = builder.build().unwrap();
    assert!(matches!(metadata, MetaData::Generic(_)));
    assert_eq!(metadata.fields().get("grpc-status"), Some("0"));
}

#[test]
fn test_mixed_request_and_response() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":status", "200")).unwrap();
    builder.emit(DecodedField::new(":method", "GET")).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err.primary, Violation::MixedRequestResponse);
    assert!(err.suppressed.is_empty());
}

#[test]
fn test_any_request_pseudo_header_makes_request() {
    let requests = [
        DecodedField::new(":method", "GET"),
        DecodedField::new(":scheme", "http"),
        DecodedField::new(":path", "/"),
        DecodedField::new(":authority", "example.com"),
    ];

    for field in requests {
        let mut builder = builder();
        let name = field.name.clone();
        builder.emit(field).unwrap();
        assert!(builder.build().unwrap().is_request(), "{} should make a request", name);
    }
}

#[test]
fn test_authority_wins_over_host() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":authority", "a.example:8443")).unwrap();
    builder.emit(DecodedField::new("host", "b.example")).unwrap();

    match builder.build().unwrap() {
        MetaData::Request(request) => {
            assert_eq!(request.authority, Some(HostPort::new("a.example", Some(8443))));
            assert_eq!(request.fields.get("host"), Some("b.example"));
        }
        other => panic!("Expected Request, got {:?}", other),
    }
}

#[test]
fn test_host_after_authority_is_still_a_field() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":authority", "example.com")).unwrap();
    builder.emit(DecodedField::new("host", "example.com")).unwrap();
    builder.emit(DecodedField::new("host", "other.example")).unwrap();

    let metadata = builder.build().unwrap();
    assert_eq!(metadata.fields().get_all("host").count(), 2);
}

#[test]
fn test_resolved_and_raw_paths_agree() {
    let mut raw = builder();
    raw.emit(DecodedField::new(":method", "POST")).unwrap();
    raw.emit(DecodedField::new(":scheme", "https")).unwrap();
    raw.emit(DecodedField::new(":authority", "[::1]:8080")).unwrap();
    raw.emit(DecodedField::new(":path", "/upload")).unwrap();
    raw.emit(DecodedField::new("content-length", "42")).unwrap();

    let mut resolved = builder();
    resolved.emit(DecodedField::new(":method", "POST")).unwrap();
    resolved
        .emit(DecodedField::resolved(":scheme", "https", ResolvedValue::Scheme(Scheme::Https)))
        .unwrap();
    resolved
        .emit(DecodedField::resolved(
            ":authority",
            "[::1]:8080",
            ResolvedValue::Authority(HostPort::new("[::1]", Some(8080))),
        ))
        .unwrap();
    resolved.emit(DecodedField::new(":path", "/upload")).unwrap();
    resolved
        .emit(DecodedField::resolved("content-length", "42", ResolvedValue::ContentLength(42)))
        .unwrap();

    assert_eq!(raw.size(), resolved.size());
    assert_eq!(raw.build().unwrap(), resolved.build().unwrap());
}

#[test]
fn test_unknown_scheme_is_retained() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":scheme", "coap")).unwrap();

    match builder.build().unwrap() {
        MetaData::Request(request) => {
            assert_eq!(request.scheme, Some(Scheme::Other("coap".to_string())));
        }
        other => panic!("Expected Request, got {:?}", other),
    }
}

#[test]
fn test_invalid_authority_is_recoverable() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":authority", "example.com:port")).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(
        err.primary,
        Violation::InvalidValue { header: Header::Authority, value: "example.com:port".to_string() }
    );
}

#[test]
fn test_recognition_ignores_case() {
    let mut builder = builder();

    builder.emit(DecodedField::new(":Method", "GET")).unwrap();
    builder.emit(DecodedField::new("Content-Length", "0")).unwrap();

    let metadata = builder.build().unwrap();
    assert!(metadata.is_request());
    assert_eq!(metadata.content_length(), Some(0));
}
