use anchor_lang::error::ERROR_CODE_OFFSET;
use async_trait::async_trait;
use fundus_client::{
    client::{donate_instruction, sort_by_recency},
    error::FundusError,
    CampaignSnapshot, ClientError, Donation, ProgramClient, Wallet, WalletError,
};
use parking_lot::Mutex;
use solana_client::client_error::{ClientError as RpcError, ClientErrorKind};
use solana_sdk::{
    hash::Hash, instruction::InstructionError, pubkey::Pubkey, signature::Signature,
    transaction::{Transaction, TransactionError},
};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Donate,
    FetchCampaign,
    FetchDonations,
}

pub fn program_error(error: FundusError) -> ClientError {
    ClientError::Rpc(RpcError::from(ClientErrorKind::TransactionError(
        TransactionError::InstructionError(
            0,
            InstructionError::Custom(ERROR_CODE_OFFSET + error as u32),
        ),
    )))
}

pub fn network_error(message: &str) -> ClientError {
    ClientError::Rpc(RpcError::from(ClientErrorKind::Custom(message.to_string())))
}

/// In-memory stand-in for the fundus program behind an RPC node. Applies
/// the program's donate rules and records every call.
#[derive(Default)]
pub struct MockProgram {
    campaigns: Mutex<HashMap<Pubkey, CampaignSnapshot>>,
    donations: Mutex<HashMap<Pubkey, Vec<Donation>>>,
    ops: Mutex<Vec<Op>>,
    clock: Mutex<u64>,
    donating: AtomicBool,
    overlapped: AtomicBool,
    failing_fetches: AtomicBool,
    donate_delay: Mutex<Option<Duration>>,
    fetch_delay: Mutex<Option<Duration>>,
}

impl MockProgram {
    pub fn new() -> Self {
        Self {
            clock: Mutex::new(1_700_000_000),
            ..Self::default()
        }
    }

    pub fn add_campaign(&self, campaign: CampaignSnapshot) {
        self.donations.lock().insert(campaign.public_key, Vec::new());
        self.campaigns.lock().insert(campaign.public_key, campaign);
    }

    pub fn campaign(&self, key: &Pubkey) -> Option<CampaignSnapshot> {
        self.campaigns.lock().get(key).cloned()
    }

    pub fn donations(&self, key: &Pubkey) -> Vec<Donation> {
        self.donations.lock().get(key).cloned().unwrap_or_default()
    }

    /// Changes a campaign on "chain" behind the client's back.
    pub fn update_campaign(&self, key: &Pubkey, f: impl FnOnce(&mut CampaignSnapshot)) {
        if let Some(campaign) = self.campaigns.lock().get_mut(key) {
            f(campaign);
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.ops.lock().iter().filter(|o| **o == op).count()
    }

    pub fn network_calls(&self) -> usize {
        self.ops.lock().len()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().clear();
    }

    /// Whether a fetch was ever issued while a donate was unresolved.
    pub fn overlapped(&self) -> bool {
        self.overlapped.load(Ordering::SeqCst)
    }

    pub fn set_failing_fetches(&self, failing: bool) {
        self.failing_fetches.store(failing, Ordering::SeqCst);
    }

    pub fn set_donate_delay(&self, delay: Duration) {
        *self.donate_delay.lock() = Some(delay);
    }

    /// Slows every `fetch_campaign` down, e.g. a lagging RPC node.
    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock() = Some(delay);
    }

    fn record(&self, op: Op) {
        if op != Op::Donate && self.donating.load(Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        self.ops.lock().push(op);
    }

    fn apply_donation(
        &self,
        donor: Pubkey,
        key: &Pubkey,
        lamports: u64,
    ) -> Result<(), ClientError> {
        let mut campaigns = self.campaigns.lock();
        let campaign = campaigns
            .get_mut(key)
            .ok_or(ClientError::AccountNotFound(*key))?;
        if !campaign.active {
            return Err(program_error(FundusError::InactiveCampaign));
        }
        if campaign.amount_raised >= campaign.goal {
            return Err(program_error(FundusError::CampaignGoalActualized));
        }
        campaign.amount_raised += lamports;
        campaign.balance += lamports;
        campaign.donors += 1;

        let mut clock = self.clock.lock();
        *clock += 1;
        self.donations
            .lock()
            .entry(*key)
            .or_default()
            .push(Donation {
                owner: donor,
                amount: lamports,
                timestamp: *clock,
            });
        Ok(())
    }

    async fn donate_inner(
        &self,
        signer: &dyn Wallet,
        key: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ClientError> {
        let donor = signer.public_key().ok_or(WalletError::Disconnected)?;
        let campaign = self
            .campaign(key)
            .ok_or(ClientError::AccountNotFound(*key))?;

        let mut tx = Transaction::new_with_payer(
            &[donate_instruction(
                donor,
                *key,
                campaign.cid,
                campaign.donors,
                lamports,
            )],
            Some(&donor),
        );
        tx.message.recent_blockhash = Hash::new_unique();
        let tx = signer.sign_transaction(tx).await?;

        let delay = *self.donate_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.apply_donation(donor, key, lamports)?;
        Ok(tx.signatures[0])
    }
}

#[async_trait]
impl ProgramClient for MockProgram {
    async fn donate(
        &self,
        signer: &dyn Wallet,
        campaign: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ClientError> {
        self.record(Op::Donate);
        self.donating.store(true, Ordering::SeqCst);
        let result = self.donate_inner(signer, campaign, lamports).await;
        self.donating.store(false, Ordering::SeqCst);
        result
    }

    async fn fetch_campaign(&self, campaign: &Pubkey) -> Result<CampaignSnapshot, ClientError> {
        self.record(Op::FetchCampaign);
        let delay = *self.fetch_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_fetches.load(Ordering::SeqCst) {
            return Err(network_error("connection refused"));
        }
        self.campaign(campaign)
            .ok_or(ClientError::AccountNotFound(*campaign))
    }

    async fn fetch_donations(
        &self,
        campaign: &Pubkey,
        cid: u64,
    ) -> Result<Vec<Donation>, ClientError> {
        self.record(Op::FetchDonations);
        if self.failing_fetches.load(Ordering::SeqCst) {
            return Err(network_error("connection refused"));
        }
        // records are selected by cid, like the memcmp filter on chain
        if self.campaign(campaign).map(|c| c.cid) != Some(cid) {
            return Ok(Vec::new());
        }
        let mut donations = self.donations(campaign);
        sort_by_recency(&mut donations);
        Ok(donations)
    }
}
