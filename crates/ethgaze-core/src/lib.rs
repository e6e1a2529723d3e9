//! ethgaze core: chain-state observation primitives, error types, and the
//! exposition renderer.
//!
//! This crate defines the data model and pure logic shared by the exporter
//! daemon and its tests. It intentionally carries no runtime or transport
//! dependencies so the registry, unit conversion, and rendering can be
//! exercised without a chain endpoint or an HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `EthGazeError`/`Result` so a malformed
//! environment listing or a bad RPC payload cannot crash the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod observation;
pub mod registry;
pub mod render;
pub mod units;

/// Shared result type.
pub use error::{EthGazeError, Result};
