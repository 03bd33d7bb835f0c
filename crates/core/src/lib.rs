//! Apparels Core - Shared types library.
//!
//! This crate provides common types used across the apparels backend:
//! - `server` - HTTP API server backed by MongoDB
//! - `integration-tests` - Router-level test suite
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The moderator `Role` enum and the `Uid` newtype

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
