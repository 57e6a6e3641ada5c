//! View-side copies of on-chain state. Amounts stay in lamports; SOL is a
//! display concern.

use crate::{state, utils::*};
use anchor_lang::prelude::Pubkey;
use serde::{Serialize, Serializer};

fn serialize_pubkey<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(key)
}

/// Snapshot of a campaign as last fetched from the program. Replaced
/// wholesale on refetch, never edited in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSnapshot {
    #[serde(serialize_with = "serialize_pubkey")]
    pub public_key: Pubkey,
    pub cid: u64,
    #[serde(serialize_with = "serialize_pubkey")]
    pub creator: Pubkey,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub goal: u64,
    pub amount_raised: u64,
    pub donors: u64,
    pub withdrawals: u64,
    pub balance: u64,
    pub active: bool,
    pub timestamp: u64,
}

impl CampaignSnapshot {
    pub fn from_account(public_key: Pubkey, account: &state::Campaign) -> Self {
        Self {
            public_key,
            cid: account.cid,
            creator: account.creator,
            title: account.title.clone(),
            description: account.description.clone(),
            image_url: account.image_url.clone(),
            goal: account.goal,
            amount_raised: account.amount_raised,
            donors: account.donors,
            withdrawals: account.withdrawals,
            balance: account.balance,
            active: account.active,
            timestamp: account.timestamp,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.goal.saturating_sub(self.amount_raised)
    }

    pub fn goal_reached(&self) -> bool {
        self.amount_raised >= self.goal
    }

    pub fn accepts_donations(&self) -> bool {
        self.active && !self.goal_reached()
    }

    /// Share of the goal raised, clamped to `0.0..=100.0`.
    pub fn progress_percentage(&self) -> f64 {
        if self.goal == 0 {
            return 100.0;
        }
        (self.amount_raised as f64 / self.goal as f64 * 100.0).min(100.0)
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Ended"
        }
    }

    pub fn goal_label(&self) -> &'static str {
        if self.goal_reached() {
            "Goal Reached!"
        } else {
            "In Progress"
        }
    }

    pub fn amount_placeholder(&self) -> String {
        format!("{:.2} SOL remaining", lamports_to_sol(self.remaining()))
    }

    pub fn is_creator(&self, viewer: Option<&Pubkey>) -> bool {
        viewer == Some(&self.creator)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Donation {
    #[serde(serialize_with = "serialize_pubkey")]
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: u64,
}

impl From<&state::Transaction> for Donation {
    fn from(tx: &state::Transaction) -> Self {
        Self {
            owner: tx.owner,
            amount: tx.amount,
            timestamp: tx.timestamp,
        }
    }
}

/// Controls offered to the campaign's creator. Scoped to one campaign and
/// one viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OwnerActions {
    pub edit: bool,
    pub delete: bool,
    pub payout: bool,
}

impl OwnerActions {
    pub fn for_viewer(campaign: &CampaignSnapshot, viewer: Option<&Pubkey>) -> Option<Self> {
        if !campaign.is_creator(viewer) {
            return None;
        }
        Some(Self {
            edit: true,
            delete: campaign.active,
            payout: true,
        })
    }
}
