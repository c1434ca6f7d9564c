//! Integration tests that run against a disposable Postgres container.
//!
//! They need a Docker daemon and are ignored by default:
//! `cargo test -p suite-tests -- --ignored`.
