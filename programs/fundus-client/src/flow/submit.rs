use crate::{client::ProgramClient, error::DonationError, flow::ValidAmount, wallet::Wallet};
use anchor_lang::prelude::Pubkey;
use solana_sdk::signature::Signature;
use std::sync::Arc;
use tracing::{info, warn};

/// Phase of a single donation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pending,
    Success(Signature),
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionOutcome::Pending)
    }
}

impl From<&Result<Signature, DonationError>> for SubmissionOutcome {
    fn from(result: &Result<Signature, DonationError>) -> Self {
        match result {
            Ok(signature) => SubmissionOutcome::Success(*signature),
            Err(err) => SubmissionOutcome::Failure(err.to_string()),
        }
    }
}

/// Sends one `donate` transaction per call. Never retries; whatever the
/// wallet or the RPC node reports is passed back as the rejection detail.
pub struct DonationSubmitter {
    client: Arc<dyn ProgramClient>,
}

impl DonationSubmitter {
    pub fn new(client: Arc<dyn ProgramClient>) -> Self {
        Self { client }
    }

    pub async fn submit(
        &self,
        wallet: &dyn Wallet,
        campaign: &Pubkey,
        amount: ValidAmount,
    ) -> Result<Signature, DonationError> {
        let Some(donor) = wallet.public_key() else {
            warn!(campaign = %campaign, "donation attempted without a connected wallet");
            return Err(DonationError::WalletUnavailable);
        };

        info!(
            donor = %donor,
            campaign = %campaign,
            lamports = amount.lamports(),
            "submitting donation"
        );
        match self.client.donate(wallet, campaign, amount.lamports()).await {
            Ok(signature) => {
                info!(%signature, campaign = %campaign, "donation confirmed");
                Ok(signature)
            }
            Err(err) => {
                warn!(
                    campaign = %campaign,
                    error = %err,
                    program_error = ?err.program_error(),
                    "donation rejected"
                );
                Err(DonationError::SubmissionRejected(err.to_string()))
            }
        }
    }
}
