use anchor_lang::{error::ERROR_CODE_OFFSET, prelude::*};
use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use thiserror::Error;

/// Errors raised by the fundus program itself.
#[error_code]
pub enum FundusError {
    /// 6000 0x1770
    #[msg("Title exceeds the maximum length of 64 characters.")]
    TitleTooLong,
    /// 6001 0x1771
    #[msg("Description exceeds the maximum length of 512 characters.")]
    DescriptionTooLong,
    /// 6002 0x1772
    #[msg("Image URL exceeds the maximum length of 256 characters.")]
    ImageUrlTooLong,
    /// 6003 0x1773
    #[msg("Invalid goal amount. Goal must be greater than zero.")]
    InvalidGoalAmount,
    /// 6004 0x1774
    #[msg("Unauthorized access.")]
    Unauthorized,
    /// 6005 0x1775
    #[msg("Campaign not found.")]
    CampaignNotFound,
    /// 6006 0x1776
    #[msg("Campaign is inactive.")]
    InactiveCampaign,
    /// 6007 0x1777
    #[msg("Donation amount must be at least 1 SOL.")]
    InvalidDonationAmount,
    /// 6008 0x1778
    #[msg("Campaign goal reached.")]
    CampaignGoalActualized,
}

impl FundusError {
    pub fn from_code(code: u32) -> Option<Self> {
        let error = match code.checked_sub(ERROR_CODE_OFFSET)? {
            0 => FundusError::TitleTooLong,
            1 => FundusError::DescriptionTooLong,
            2 => FundusError::ImageUrlTooLong,
            3 => FundusError::InvalidGoalAmount,
            4 => FundusError::Unauthorized,
            5 => FundusError::CampaignNotFound,
            6 => FundusError::InactiveCampaign,
            7 => FundusError::InvalidDonationAmount,
            8 => FundusError::CampaignGoalActualized,
            _ => return None,
        };
        Some(error)
    }
}

/// Local rejection of a draft amount. Never reaches the network.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("not a number")]
    NotANumber,
    #[error("must be positive")]
    NotPositive,
    #[error("exceeds goal")]
    ExceedsGoal,
    #[error("campaign inactive")]
    CampaignInactive,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet not connected")]
    Disconnected,
    #[error("user rejected the request")]
    Rejected,
    #[error("signing failed: {0}")]
    Signing(String),
}

/// Failures of a single program-client call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Rpc(#[from] solana_client::client_error::ClientError),
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("failed to deserialize account {0}")]
    Deserialize(Pubkey),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl ClientError {
    /// The fundus error code carried by a failed transaction, if any.
    pub fn program_error(&self) -> Option<FundusError> {
        let ClientError::Rpc(err) = self else {
            return None;
        };
        match err.get_transaction_error()? {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                FundusError::from_code(code)
            }
            _ => None,
        }
    }
}

/// Everything the donation flow reports to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DonationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no wallet connected")]
    WalletUnavailable,
    #[error("transaction rejected: {0}")]
    SubmissionRejected(String),
    #[error("failed to refresh campaign: {0}")]
    RefetchFailed(String),
    #[error("a donation is already being submitted")]
    SubmissionInFlight,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown commitment level: {0}")]
    InvalidCommitment(String),
}
