use crate::config::*;
use anchor_lang::prelude::*;

#[account]
pub struct Campaign {
    pub cid: u64,
    pub creator: Pubkey,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub goal: u64,
    pub amount_raised: u64,
    pub timestamp: u64,
    pub donors: u64,
    pub withdrawals: u64,
    pub balance: u64,
    pub active: bool,
}
impl Campaign {
    pub const SPACE: usize = 8
        + 32
        + (4 + MAX_TITLE_LEN)
        + (4 + MAX_DESCRIPTION_LEN)
        + (4 + MAX_IMAGE_URL_LEN)
        + 8
        + 8
        + 8
        + 8
        + 8
        + 8
        + 1;
}

/// A single donation or withdrawal record. Only `credited` records are
/// donations.
#[account]
pub struct Transaction {
    pub owner: Pubkey,
    pub cid: u64,
    pub amount: u64,
    pub timestamp: u64,
    pub credited: bool,
}
impl Transaction {
    pub const SPACE: usize = 32 + 8 + 8 + 8 + 1;
    /// Byte offset of `cid` in account data, past the discriminator and `owner`.
    pub const CID_OFFSET: usize = 8 + 32;
}

pub fn find_campaign(cid: u64) -> Pubkey {
    Pubkey::find_program_address(&[CAMPAIGN_SEED, &cid.to_le_bytes()], &crate::ID).0
}

/// PDA of the record created by a donor's next donation. `donors` is the
/// campaign's donor count before the donation lands.
pub fn find_donation(donor: Pubkey, cid: u64, donors: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[
            DONOR_SEED,
            &donor.to_bytes(),
            &cid.to_le_bytes(),
            &(donors + 1).to_le_bytes(),
        ],
        &crate::ID,
    )
    .0
}
