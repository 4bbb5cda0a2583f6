//! Test helper modules for folio-web integration tests
//!
//! Provides a seeded content store (SQLite or JSON), a content body tree and
//! a router built over them, plus small request/response helpers.

pub mod test_site;

pub use test_site::{body_text, extract_json, get, TestSite, SITE_URL, VISIBLE_RECORDS};
