//! The bridge façade: owned stores, capabilities, and read-only queries.

use std::collections::BTreeMap;

use causeway_bridge_params::{bridge::BridgeParams, errors::ParamsError, relay::RelayParams};
use causeway_bridge_primitives::{
    buf::Buf32,
    roles::{Principal, RoleTable},
    time::{Clock, SystemClock, Timestamp},
};
use causeway_bridge_proof_registry::{ProofRecord, ProofRegistry, ProofVerifier};
use causeway_bridge_relay::{BlockHeader, HeaderRelay};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::BridgeError,
    transfer::{record::Transfer, stats::BridgeStatistics},
};

/// The pause record kept while the circuit breaker is tripped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyPause {
    /// The Admin that tripped the pause.
    pub paused_by: Principal,
    /// When the pause was tripped.
    pub paused_at: Timestamp,
}

/// The bridge: a transfer ledger plus the stores and capabilities every operation consults.
///
/// The bridge owns its stores; the stores never reach back into the bridge. All
/// externally-invoked operations live in the `transitions` module; this module holds
/// construction and the read-only queries, which need no capability and keep working while the
/// bridge is paused.
#[derive(Debug)]
pub struct Bridge<V, C = SystemClock>
where
    V: ProofVerifier,
    C: Clock,
{
    pub(crate) params: BridgeParams,
    pub(crate) relay: HeaderRelay,
    pub(crate) registry: ProofRegistry,
    pub(crate) roles: RoleTable,
    pub(crate) transfers: BTreeMap<Buf32, Transfer>,
    /// Source transaction id -> transfer id. Entries are never removed: a cancelled
    /// transfer's source id stays burned to close the double-spend race between a slow
    /// cancel and a fast resubmission.
    pub(crate) by_source: BTreeMap<Buf32, Buf32>,
    pub(crate) stats: BridgeStatistics,
    pub(crate) pause: Option<EmergencyPause>,
    pub(crate) verifier: V,
    pub(crate) clock: C,
}

impl<V, C> Bridge<V, C>
where
    V: ProofVerifier,
    C: Clock,
{
    /// Creates a bridge anchored at the given genesis header.
    ///
    /// The deployer receives all three capabilities, the bootstrap exception to
    /// Admin-gated role administration. Parameters are validated here so an invalid
    /// configuration never reaches a live state machine.
    pub fn new(
        deployer: Principal,
        params: BridgeParams,
        genesis: BlockHeader,
        relay_params: RelayParams,
        verifier: V,
        clock: C,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        info!(%deployer, fee_bps = params.fee_bps, "initializing bridge");
        Ok(Self {
            params,
            relay: HeaderRelay::new(genesis, relay_params),
            registry: ProofRegistry::new(),
            roles: RoleTable::bootstrap(deployer),
            transfers: BTreeMap::new(),
            by_source: BTreeMap::new(),
            stats: BridgeStatistics::default(),
            pause: None,
            verifier,
            clock,
        })
    }

    /// Looks up a transfer by identifier.
    pub fn transfer(&self, id: Buf32) -> Option<&Transfer> {
        self.transfers.get(&id)
    }

    /// Looks up a transfer by its source transaction identifier.
    pub fn transfer_by_source(&self, source_tx_id: Buf32) -> Option<&Transfer> {
        self.by_source
            .get(&source_tx_id)
            .and_then(|id| self.transfers.get(id))
    }

    /// Iterates over all transfer records, in identifier order.
    ///
    /// This is the surface the persistence/API layer reads for display; it writes nothing
    /// back except by invoking the bridge operations.
    pub fn transfers(&self) -> impl Iterator<Item = &Transfer> {
        self.transfers.values()
    }

    /// The current aggregate statistics.
    pub fn statistics(&self) -> &BridgeStatistics {
        &self.stats
    }

    /// True while the emergency pause is active.
    pub fn is_paused(&self) -> bool {
        self.pause.is_some()
    }

    /// The active pause record, if any.
    pub fn pause_state(&self) -> Option<&EmergencyPause> {
        self.pause.as_ref()
    }

    /// The current parameter set (the fee rate may have been updated since construction).
    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    /// Read-only view of the header relay.
    pub fn relay(&self) -> &HeaderRelay {
        &self.relay
    }

    /// Number of canonical headers above the given one.
    pub fn confirmations_of(&self, header_id: Buf32) -> u64 {
        self.relay.confirmations_of(header_id)
    }

    /// Read-only view of the proof registry.
    pub fn registry(&self) -> &ProofRegistry {
        &self.registry
    }

    /// Looks up a proof record by identifier.
    pub fn proof_record(&self, id: Buf32) -> Option<&ProofRecord> {
        self.registry.record(id)
    }

    /// True iff a verified proof record exists for the subject.
    pub fn is_proof_verified(&self, subject_id: Buf32) -> bool {
        self.registry.is_verified(subject_id)
    }

    /// Read-only view of the role table.
    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Rejects uniformly while the pause is active; state-changing operations call this
    /// right after their capability check.
    pub(crate) fn ensure_not_paused(&self) -> Result<(), BridgeError> {
        if self.pause.is_some() {
            Err(BridgeError::Halted)
        } else {
            Ok(())
        }
    }

    /// The current time as seen by the bridge's clock capability.
    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Asserts the incremental statistics equal the defining fold.
    pub(crate) fn debug_assert_stats(&self) {
        debug_assert_eq!(
            self.stats,
            BridgeStatistics::recompute(self.transfers.values()),
            "incremental statistics diverged from the ledger fold"
        );
    }
}
