use crate::{
    client::ProgramClient,
    error::DonationError,
    model::{CampaignSnapshot, Donation},
};
use anchor_lang::prelude::Pubkey;
use std::sync::Arc;
use tracing::{debug, warn};

/// Local copy of one campaign page: the snapshot and its donations, newest
/// first. Always replaced as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignView {
    pub campaign: CampaignSnapshot,
    pub donations: Vec<Donation>,
}

/// Refetches authoritative campaign state from the program.
pub struct Reconciler {
    client: Arc<dyn ProgramClient>,
}

impl Reconciler {
    pub fn new(client: Arc<dyn ProgramClient>) -> Self {
        Self { client }
    }

    /// Fetches the campaign, then its donations. Either failure yields
    /// `RefetchFailed` and nothing partial.
    pub async fn load(&self, campaign: &Pubkey) -> Result<CampaignView, DonationError> {
        let snapshot = self
            .client
            .fetch_campaign(campaign)
            .await
            .map_err(|e| refetch_failed(campaign, e))?;
        let donations = self
            .client
            .fetch_donations(campaign, snapshot.cid)
            .await
            .map_err(|e| refetch_failed(campaign, e))?;

        debug!(
            campaign = %campaign,
            amount_raised = snapshot.amount_raised,
            donations = donations.len(),
            "campaign reloaded"
        );
        Ok(CampaignView {
            campaign: snapshot,
            donations,
        })
    }

    /// Replaces `view` in full on success; leaves it untouched on failure.
    pub async fn refresh(&self, view: &mut CampaignView) -> Result<(), DonationError> {
        let campaign = view.campaign.public_key;
        *view = self.load(&campaign).await?;
        Ok(())
    }
}

fn refetch_failed(campaign: &Pubkey, err: impl std::fmt::Display) -> DonationError {
    warn!(campaign = %campaign, error = %err, "campaign refetch failed");
    DonationError::RefetchFailed(err.to_string())
}
