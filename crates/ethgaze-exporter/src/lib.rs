//! ethgaze exporter library entry.
//!
//! This crate wires the env configuration, JSON-RPC chain client,
//! observation store, bounded sweep engine, refresh scheduler, and the HTTP
//! exposition surface into a cohesive daemon. It is intended to be consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod chain;
pub mod config;
pub mod ops;
pub mod router;
pub mod scheduler;
pub mod store;
pub mod sweep;
