use crate::{
    client::ProgramClient,
    error::DonationError,
    flow::{
        accepts_keystroke, validate_amount, CampaignView, DonationSubmitter, NotificationSink,
        Reconciler, StatusPresenter, ValidAmount,
    },
    model::OwnerActions,
    wallet::Wallet,
};
use anchor_lang::prelude::Pubkey;
use parking_lot::{Mutex, RwLock};
use solana_sdk::signature::Signature;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a confirmed donation. The transaction is final even when the
/// refetch that followed it failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationReceipt {
    pub signature: Signature,
    pub refetch_error: Option<DonationError>,
}

/// One donation form bound to one campaign page.
///
/// Holds the draft amount and the page's [`CampaignView`], and allows a
/// single submission in flight: from the first check of a submit until its
/// refetch settles, further submits fail with `SubmissionInFlight`.
pub struct DonationForm {
    draft: Mutex<String>,
    view: RwLock<CampaignView>,
    in_flight: tokio::sync::Mutex<()>,
    submitter: DonationSubmitter,
    reconciler: Reconciler,
    presenter: StatusPresenter,
}

impl DonationForm {
    pub fn new(
        view: CampaignView,
        client: Arc<dyn ProgramClient>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            draft: Mutex::new(String::new()),
            view: RwLock::new(view),
            in_flight: tokio::sync::Mutex::new(()),
            submitter: DonationSubmitter::new(client.clone()),
            reconciler: Reconciler::new(client),
            presenter: StatusPresenter::new(sink),
        }
    }

    /// Loads `campaign` and builds its form. A failed load is warned about
    /// and returned.
    pub async fn open(
        campaign: &Pubkey,
        client: Arc<dyn ProgramClient>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, DonationError> {
        let presenter = StatusPresenter::new(sink.clone());
        match Reconciler::new(client.clone()).load(campaign).await {
            Ok(view) => Ok(Self::new(view, client, sink)),
            Err(err) => {
                presenter.warn(&err);
                Err(err)
            }
        }
    }

    pub fn campaign_key(&self) -> Pubkey {
        self.view.read().campaign.public_key
    }

    pub fn view(&self) -> CampaignView {
        self.view.read().clone()
    }

    pub fn draft(&self) -> String {
        self.draft.lock().clone()
    }

    /// Applies a keystroke. Values the input pattern does not allow are
    /// ignored and the previous draft is kept.
    pub fn set_draft(&self, value: &str) -> bool {
        if !accepts_keystroke(value) {
            return false;
        }
        *self.draft.lock() = value.to_string();
        true
    }

    pub fn cancel(&self) {
        self.draft.lock().clear();
    }

    pub fn validate(&self) -> Result<ValidAmount, DonationError> {
        self.validate_draft(&self.draft())
    }

    fn validate_draft(&self, draft: &str) -> Result<ValidAmount, DonationError> {
        Ok(validate_amount(draft, &self.view.read().campaign)?)
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.draft.lock().is_empty()
            && self.view.read().campaign.accepts_donations()
            && !self.is_submitting()
    }

    pub fn owner_actions(&self, viewer: Option<&Pubkey>) -> Option<OwnerActions> {
        OwnerActions::for_viewer(&self.view.read().campaign, viewer)
    }

    /// Re-reads the campaign outside of a submission, e.g. a manual
    /// refresh after `RefetchFailed`.
    pub async fn reload(&self) -> Result<(), DonationError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| DonationError::SubmissionInFlight)?;
        match self.reconciler.load(&self.campaign_key()).await {
            Ok(view) => {
                *self.view.write() = view;
                Ok(())
            }
            Err(err) => {
                self.presenter.warn(&err);
                Err(err)
            }
        }
    }

    /// Validates the draft, donates it through `wallet`, then refetches the
    /// campaign.
    ///
    /// Validation and wallet problems are warned about without going
    /// pending or touching the network. Once pending, the notice ends in
    /// exactly one success or failure. A refetch failure after a confirmed
    /// donation is warned about separately and reported in the receipt.
    pub async fn submit(&self, wallet: &dyn Wallet) -> Result<DonationReceipt, DonationError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| DonationError::SubmissionInFlight)?;

        let draft = self.draft();
        let amount = match self.validate_draft(&draft) {
            Ok(amount) => amount,
            Err(err) => {
                debug!(error = %err, "donation draft rejected");
                self.presenter.warn(&err);
                return Err(err);
            }
        };
        if wallet.public_key().is_none() {
            let err = DonationError::WalletUnavailable;
            self.presenter.warn(&err);
            return Err(err);
        }

        let campaign = self.campaign_key();
        let mut notice = self.presenter.pending();
        let signature = match self.submitter.submit(wallet, &campaign, amount).await {
            Ok(signature) => signature,
            Err(err) => {
                notice.fail(err.to_string());
                return Err(err);
            }
        };
        notice.confirm(signature);
        {
            // keep anything typed while the donation was in flight
            let mut current = self.draft.lock();
            if *current == draft {
                current.clear();
            }
        }

        let refetch_error = match self.reconciler.load(&campaign).await {
            Ok(view) => {
                *self.view.write() = view;
                None
            }
            Err(err) => Some(err),
        };
        let outcome = notice.succeed(signature);
        if let Some(err) = &refetch_error {
            self.presenter.warn(err);
        }

        info!(campaign = %campaign, ?outcome, refreshed = refetch_error.is_none(), "donation settled");
        Ok(DonationReceipt {
            signature,
            refetch_error,
        })
    }
}
