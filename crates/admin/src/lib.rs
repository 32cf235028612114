//! Stockroom Admin library.
//!
//! This crate provides the admin API as a library, allowing it to be tested
//! and reused from the CLI.
//!
//! # Architecture
//!
//! - Axum web framework serving the JSON admin API
//! - `PostgreSQL` for entity storage and sessions
//! - External OAuth identity provider for sign-in
//! - External object storage for product images

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
