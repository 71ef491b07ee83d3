//! Re-exports of all the parameter types.

pub use crate::{
    bridge::BridgeParams,
    default::MAX_FEE_BPS,
    errors::ParamsError,
    relay::RelayParams,
};
