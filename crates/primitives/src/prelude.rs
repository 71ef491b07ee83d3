//! Convenience re-exports of the types used by nearly every crate in the workspace.

pub use crate::{
    address::{Address, AddressError},
    amount::{Amount, BasisPoints},
    buf::Buf32,
    hash::{sha256d, Sha256d},
    merkle::{build_proof, build_root, Direction, MerkleError, MerkleProof},
    roles::{AuthorizationError, Capability, Principal, RoleTable},
    time::{Clock, SystemClock, Timestamp},
};
