//! This crate contains the protocol-critical parameters that dictate the behavior of the bridge
//! in a way that ensures all participants agree on which transfers and headers are acceptable.

pub mod bridge;
pub mod default;
pub mod errors;
pub mod prelude;
pub mod relay;
