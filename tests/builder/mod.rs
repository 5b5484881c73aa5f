//! Integration tests for MetaDataBuilder

mod pseudo_headers;
