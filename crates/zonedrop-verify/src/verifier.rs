//! The verifier handle shared by all action checks.

use zonedrop_types::{EngineConfig, Result, ZoneConfig, ZonedropError};

use crate::keepers::ChainViews;

/// Read-only eligibility checker.
///
/// Each action check lives in its own module as an `impl Verifier` block;
/// all of them take the claim record by shared reference.
#[derive(Clone, Copy)]
pub struct Verifier<'a> {
    pub(crate) views: ChainViews<'a>,
    pub(crate) config: &'a EngineConfig,
}

impl<'a> Verifier<'a> {
    #[must_use]
    pub fn new(views: ChainViews<'a>, config: &'a EngineConfig) -> Self {
        Self { views, config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Look up a registered zone by chain id.
    pub(crate) fn zone(&self, chain_id: &str) -> Result<ZoneConfig> {
        self.views
            .zones
            .zone(chain_id)
            .ok_or_else(|| ZonedropError::not_found("zone", chain_id))
    }
}
