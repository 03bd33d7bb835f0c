//! Apparels backend - HTTP API server.
//!
//! A stateless CRUD mapping layer between an axum HTTP transport and a
//! MongoDB document store. Two collections (`product`, `moderators`) plus a
//! uid-to-role lookup endpoint and a plaintext liveness route.
//!
//! # Architecture
//!
//! - Axum web framework
//! - MongoDB driver for the `apparelsDB` database
//! - [`db`] store traits so handlers are independent of the driver
//! - [`auth`] pluggable bearer-token verification (stubbed by default)
//!
//! The binary lives in `main.rs`; everything else is exported here so the
//! integration-tests crate can drive the real router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
