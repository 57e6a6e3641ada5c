//! Client-side donation flow for the fundus crowdfunding program.
//!
//! The on-chain program is the ledger. This crate validates a donor's
//! draft amount, submits one `donate` instruction through a connected
//! wallet, refetches the campaign and its donations, and reports each
//! phase to a notification sink.

use anchor_lang::prelude::*;

pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod model;
pub mod state;
pub mod utils;
pub mod wallet;

pub use crate::{
    client::{ProgramClient, RpcProgramClient},
    error::{ClientError, DonationError, ValidationError, WalletError},
    flow::*,
    model::{CampaignSnapshot, Donation, OwnerActions},
    wallet::{KeypairWallet, Wallet},
};

declare_id!("BDMfW5Dt3dAuNU9shsXzzejVKZL2752vZmyBSV6ajkyS");
