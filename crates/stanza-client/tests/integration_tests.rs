//! Integration test suite for stanza-client.
//!
//! Runs discovery, asset resolution, and full pipeline passes against a
//! wiremock server standing in for both the static file store and the
//! directory-listing API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
mod integration;
