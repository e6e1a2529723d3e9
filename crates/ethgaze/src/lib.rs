//! Top-level facade crate for ethgaze.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use ethgaze_core::*;
}

pub mod exporter {
    pub use ethgaze_exporter::*;
}
