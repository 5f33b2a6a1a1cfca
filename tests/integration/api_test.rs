//! API endpoint integration tests
//!
//! Drives the composed router end to end over the in-memory team store:
//! authentication, membership mutations, listings. The `postgres` tests
//! run the database-backed stores when a test database is configured.

#![allow(dead_code)]

mod auth;
mod common;
mod listing;
mod memberships;
mod postgres;
