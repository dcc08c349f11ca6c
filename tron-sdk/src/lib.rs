#![deny(missing_docs)]

//! TRON SDK - Complete SDK.
//!
//! Re-exports all TRON SDK components for convenient single-crate usage.

pub use tron_address as address;
pub use tron_primitives as primitives;
pub use tron_wallet as wallet;
