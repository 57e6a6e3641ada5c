//! Call interface of the fundus program: instruction encoding, account
//! decoding, and the [`ProgramClient`] seam the donation flow talks to.

use crate::{
    config::ClientConfig,
    error::{ClientError, WalletError},
    model::{CampaignSnapshot, Donation},
    state::{self, find_donation},
    wallet::Wallet,
};
use anchor_lang::{prelude::*, Discriminator, InstructionData};
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_program::{instruction::Instruction, system_program};
use solana_sdk::{account::Account, signature::Signature, transaction::Transaction};
use tracing::debug;

/// Arguments of the program's `donate` instruction.
#[derive(AnchorSerialize)]
pub struct Donate {
    pub cid: u64,
    pub amount: u64,
}

impl Discriminator for Donate {
    // sha256("global:donate")[..8]
    const DISCRIMINATOR: [u8; 8] = [121, 186, 218, 211, 73, 70, 196, 180];
}

impl InstructionData for Donate {}

/// `donors` is the campaign's donor count before this donation.
pub fn donate_instruction(
    donor: Pubkey,
    campaign: Pubkey,
    cid: u64,
    donors: u64,
    lamports: u64,
) -> Instruction {
    Instruction {
        program_id: crate::ID,
        data: Donate {
            cid,
            amount: lamports,
        }
        .data(),
        accounts: vec![
            AccountMeta::new(campaign, false),
            AccountMeta::new(find_donation(donor, cid, donors), false),
            AccountMeta::new(donor, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
    }
}

/// Newest first; ties keep the order they arrived in.
pub fn sort_by_recency(donations: &mut [Donation]) {
    donations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// `getProgramAccounts` filters selecting the `Transaction` records of
/// campaign `cid`.
pub fn donation_filters(cid: u64) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            0,
            &state::Transaction::DISCRIMINATOR,
        )),
        RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            state::Transaction::CID_OFFSET,
            &cid.to_le_bytes(),
        )),
    ]
}

/// Decodes fetched `Transaction` accounts into the credited donations,
/// newest first. Any undecodable record fails the whole list.
pub fn decode_donations(
    accounts: impl IntoIterator<Item = (Pubkey, Account)>,
) -> std::result::Result<Vec<Donation>, ClientError> {
    let mut donations = Vec::new();
    for (address, account) in accounts {
        let record = state::Transaction::try_deserialize(&mut account.data.as_slice())
            .map_err(|_| ClientError::Deserialize(address))?;
        if record.credited {
            donations.push(Donation::from(&record));
        }
    }
    sort_by_recency(&mut donations);
    Ok(donations)
}

/// Calls into the fundus program. Each call is independently fallible and
/// is attempted exactly once.
#[async_trait]
pub trait ProgramClient: Send + Sync {
    /// Builds, signs through `signer`, sends and confirms one `donate`
    /// transaction.
    async fn donate(
        &self,
        signer: &dyn Wallet,
        campaign: &Pubkey,
        lamports: u64,
    ) -> std::result::Result<Signature, ClientError>;

    async fn fetch_campaign(
        &self,
        campaign: &Pubkey,
    ) -> std::result::Result<CampaignSnapshot, ClientError>;

    /// Credited donations to `campaign`, newest first. `cid` is the
    /// campaign's id, as read by `fetch_campaign`.
    async fn fetch_donations(
        &self,
        campaign: &Pubkey,
        cid: u64,
    ) -> std::result::Result<Vec<Donation>, ClientError>;
}

pub struct RpcProgramClient {
    rpc: RpcClient,
}

impl RpcProgramClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(
                config.rpc_url.clone(),
                config.commitment.to_config(),
            ),
        }
    }

    async fn fetch<T: AccountDeserialize>(
        &self,
        address: &Pubkey,
    ) -> std::result::Result<T, ClientError> {
        let account = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?
            .value
            .ok_or(ClientError::AccountNotFound(*address))?;
        T::try_deserialize(&mut account.data.as_slice())
            .map_err(|_| ClientError::Deserialize(*address))
    }
}

#[async_trait]
impl ProgramClient for RpcProgramClient {
    async fn donate(
        &self,
        signer: &dyn Wallet,
        campaign: &Pubkey,
        lamports: u64,
    ) -> std::result::Result<Signature, ClientError> {
        let donor = signer.public_key().ok_or(WalletError::Disconnected)?;
        let account: state::Campaign = self.fetch(campaign).await?;

        let mut tx = Transaction::new_with_payer(
            &[donate_instruction(
                donor,
                *campaign,
                account.cid,
                account.donors,
                lamports,
            )],
            Some(&donor),
        );
        tx.message.recent_blockhash = self.rpc.get_latest_blockhash().await?;

        let tx = signer.sign_transaction(tx).await?;
        let signature = self.rpc.send_and_confirm_transaction(&tx).await?;
        debug!(%signature, campaign = %campaign, lamports, "donate confirmed");
        Ok(signature)
    }

    async fn fetch_campaign(
        &self,
        campaign: &Pubkey,
    ) -> std::result::Result<CampaignSnapshot, ClientError> {
        let account: state::Campaign = self.fetch(campaign).await?;
        Ok(CampaignSnapshot::from_account(*campaign, &account))
    }

    async fn fetch_donations(
        &self,
        campaign: &Pubkey,
        cid: u64,
    ) -> std::result::Result<Vec<Donation>, ClientError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(donation_filters(cid)),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.rpc.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&crate::ID, config)
            .await?;
        debug!(campaign = %campaign, records = accounts.len(), "donation records fetched");
        decode_donations(accounts)
    }
}
