use crate::{api::MockProgram, ctx::*};
use async_trait::async_trait;
use fundus_client::{
    config::LAMPORTS_PER_SOL, CampaignView, NoticeId, NotificationSink, Wallet, WalletError,
};
use parking_lot::Mutex;
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};
use std::sync::Arc;

pub fn sol(amount: u64) -> u64 {
    amount * LAMPORTS_PER_SOL
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Pending(NoticeId, String),
    Success(NoticeId, String),
    Failure(NoticeId, String),
    Warn(String),
}

#[derive(Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
    next_id: Mutex<NoticeId>,
}

impl RecordingSink {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn announce_pending(&self, message: &str) -> NoticeId {
        let mut next_id = self.next_id.lock();
        *next_id += 1;
        self.notices
            .lock()
            .push(Notice::Pending(*next_id, message.to_string()));
        *next_id
    }

    fn replace_with_success(&self, id: NoticeId, message: &str) {
        self.notices
            .lock()
            .push(Notice::Success(id, message.to_string()));
    }

    fn replace_with_failure(&self, id: NoticeId, message: &str) {
        self.notices
            .lock()
            .push(Notice::Failure(id, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.notices.lock().push(Notice::Warn(message.to_string()));
    }
}

/// Connected wallet whose user declines every signature request.
pub struct RejectingWallet(pub Pubkey);

#[async_trait]
impl Wallet for RejectingWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.0)
    }

    async fn sign_transaction(&self, _tx: Transaction) -> Result<Transaction, WalletError> {
        Err(WalletError::Rejected)
    }
}

pub fn get_program_and_ctx(goal: u64, amount_raised: u64) -> (Arc<MockProgram>, Ctx) {
    let ctx = Ctx::new();
    let program = Arc::new(MockProgram::new());
    program.add_campaign(ctx.campaign_snapshot(goal, amount_raised));
    (program, ctx)
}

pub fn view_of(program: &MockProgram, ctx: &Ctx) -> CampaignView {
    CampaignView {
        campaign: program.campaign(&ctx.campaign).unwrap(),
        donations: program.donations(&ctx.campaign),
    }
}
