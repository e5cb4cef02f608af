//! Cross-chain proof authentication.
//!
//! A proof is only as good as the consensus root it is checked against,
//! so authentication is delegated to the light-client [`ProofChecker`]
//! bound to the zone's connection. Anything the checker rejects surfaces
//! as `VerificationFailed` tagged with the proof's position.
//!
//! [`ProofChecker`]: crate::keepers::ProofChecker

use zonedrop_types::{Proof, Result, ZoneConfig, ZonedropError};

use crate::verifier::Verifier;

impl Verifier<'_> {
    /// Authenticate `proof` against `zone` in the configured lockup store.
    pub fn authenticate_proof(&self, zone: &ZoneConfig, index: usize, proof: &Proof) -> Result<()> {
        self.views
            .proofs
            .validate_proof_ops(
                &zone.connection_id,
                &zone.chain_id,
                proof.height,
                &self.config.lockup_store_key,
                &proof.key,
                &proof.data,
                &proof.proof_ops,
            )
            .map_err(|err| ZonedropError::VerificationFailed {
                index,
                reason: err.to_string(),
            })?;

        tracing::debug!(
            index,
            zone = %zone.chain_id,
            height = proof.height,
            key = %proof.key_hex(),
            "Proof authenticated"
        );
        Ok(())
    }
}
