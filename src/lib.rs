//! Homestream - Local network video streaming server
//!
//! This library crate exposes the server and streaming engine for
//! integration testing.

pub mod config;
pub mod server;
pub mod streaming;
