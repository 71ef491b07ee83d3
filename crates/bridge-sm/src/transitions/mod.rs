//! The state transitions of the bridge, grouped by concern.
//!
//! Every operation follows the same shape: capability check, pause check, cheap validation,
//! conflict detection, external verification last, then a single atomic apply.

mod admin;
mod lifecycle;
