//! Header relaying, proof submission, and the Admin-gated controls.

use causeway_bridge_params::default::MAX_FEE_BPS;
use causeway_bridge_primitives::{
    amount::BasisPoints,
    buf::Buf32,
    roles::{Capability, Principal},
    time::Clock,
};
use causeway_bridge_proof_registry::ProofVerifier;
use causeway_bridge_relay::BlockHeader;
use tracing::{info, warn};

use crate::{
    errors::{BridgeResult, ConflictError, ValidationError, VerificationError},
    machine::{Bridge, EmergencyPause},
};

impl<V, C> Bridge<V, C>
where
    V: ProofVerifier,
    C: Clock,
{
    /// Relays a source-chain header into the relay store.
    ///
    /// Requires the Relayer capability; header relaying is how confirmations accrue, and like
    /// every other state-changing entry point it is frozen while the bridge is paused.
    pub fn add_header(&mut self, by: Principal, header: BlockHeader) -> BridgeResult<Buf32> {
        self.roles.require(by, Capability::Relayer)?;
        self.ensure_not_paused()?;
        Ok(self.relay.add_header(header)?)
    }

    /// Posts an unverified proof record, stamped with the current relay tip height.
    ///
    /// Requires the Relayer or Operator capability: proof *data* may come from either role,
    /// while the authoritative verification step stays with the Relayer.
    pub fn submit_proof(
        &mut self,
        by: Principal,
        circuit_id: Buf32,
        proof_blob: Vec<u8>,
        public_inputs: Vec<Buf32>,
        subject_id: Buf32,
    ) -> BridgeResult<Buf32> {
        self.roles
            .require_any(by, &[Capability::Relayer, Capability::Operator])?;
        self.ensure_not_paused()?;

        let height = self.relay.tip().1;
        let now = self.now();
        Ok(self
            .registry
            .submit(circuit_id, proof_blob, public_inputs, subject_id, by, height, now)?)
    }

    /// Runs the external verifier over a submitted proof record.
    ///
    /// Requires the Relayer capability. A negative verifier result leaves the record
    /// unverified and retryable.
    pub fn verify_proof(&mut self, by: Principal, record_id: Buf32) -> BridgeResult<()> {
        self.roles.require(by, Capability::Relayer)?;
        self.ensure_not_paused()?;

        let now = self.clock.now();
        self.registry
            .verify_record(record_id, &self.verifier, by, now)?;
        Ok(())
    }

    /// Trips the emergency circuit breaker.
    ///
    /// Requires the Admin capability. Every state-changing entry point then rejects
    /// uniformly with a halt error until [`Bridge::resume`]; read-only queries keep working.
    pub fn emergency_pause(&mut self, by: Principal) -> BridgeResult<()> {
        self.roles.require(by, Capability::Admin)?;
        self.ensure_not_paused()?;

        let now = self.now();
        self.pause = Some(EmergencyPause {
            paused_by: by,
            paused_at: now,
        });
        warn!(by=%by, at=%now, "emergency pause engaged");
        Ok(())
    }

    /// Lifts the emergency pause after the minimum dwell.
    ///
    /// Requires the Admin capability. The dwell keeps a compromised Admin key from flapping
    /// the breaker: resuming is only possible once `pause_dwell_secs` have elapsed.
    pub fn resume(&mut self, by: Principal) -> BridgeResult<()> {
        self.roles.require(by, Capability::Admin)?;

        let pause = self.pause.as_ref().ok_or(ConflictError::NotPaused)?;
        let elapsed = self.clock.now().saturating_sub(pause.paused_at);
        let required = self.params.pause_dwell_secs;
        if elapsed < required {
            return Err(VerificationError::PauseDwellNotElapsed { elapsed, required }.into());
        }

        self.pause = None;
        info!(by=%by, %elapsed, "emergency pause lifted");
        Ok(())
    }

    /// Updates the fee rate charged at initiation.
    ///
    /// Requires the Admin capability and stays below the hard ceiling, so a compromised
    /// Admin key cannot set a confiscatory fee unnoticed.
    pub fn set_fee_rate(&mut self, by: Principal, fee_bps: BasisPoints) -> BridgeResult<()> {
        self.roles.require(by, Capability::Admin)?;
        self.ensure_not_paused()?;

        if fee_bps > MAX_FEE_BPS {
            return Err(ValidationError::FeeTooHigh {
                fee_bps,
                max_bps: MAX_FEE_BPS,
            }
            .into());
        }

        let previous = self.params.fee_bps;
        self.params.fee_bps = fee_bps;
        info!(%previous, current = %fee_bps, by=%by, "fee rate updated");
        Ok(())
    }

    /// Grants a capability to a principal. Requires the Admin capability.
    ///
    /// Returns false if the principal already held it.
    pub fn grant_role(
        &mut self,
        by: Principal,
        principal: Principal,
        capability: Capability,
    ) -> BridgeResult<bool> {
        self.roles.require(by, Capability::Admin)?;
        self.ensure_not_paused()?;

        let granted = self.roles.grant(principal, capability);
        info!(%principal, %capability, by=%by, %granted, "role granted");
        Ok(granted)
    }

    /// Revokes a capability from a principal. Requires the Admin capability.
    ///
    /// Returns false if the principal did not hold it.
    pub fn revoke_role(
        &mut self,
        by: Principal,
        principal: Principal,
        capability: Capability,
    ) -> BridgeResult<bool> {
        self.roles.require(by, Capability::Admin)?;
        self.ensure_not_paused()?;

        let revoked = self.roles.revoke(principal, capability);
        info!(%principal, %capability, by=%by, %revoked, "role revoked");
        Ok(revoked)
    }
}
