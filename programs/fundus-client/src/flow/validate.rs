use crate::{config::*, error::ValidationError, model::CampaignSnapshot};

const LAMPORTS_PER_INPUT_UNIT: u64 = LAMPORTS_PER_SOL / 10u64.pow(INPUT_DECIMALS);

/// A draft amount that passed [`validate_amount`] against a campaign
/// snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidAmount(u64);

impl ValidAmount {
    pub fn lamports(self) -> u64 {
        self.0
    }
}

/// Whether the input may hold `value` at all: optional integer digits, an
/// optional point, at most two fractional digits. Empty passes so the field
/// can be cleared.
pub fn accepts_keystroke(value: &str) -> bool {
    let (whole, frac) = match value.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (value, ""),
    };
    whole.bytes().all(|b| b.is_ascii_digit())
        && frac.len() <= INPUT_DECIMALS as usize
        && frac.bytes().all(|b| b.is_ascii_digit())
}

/// `None` on overflow. Expects input that passed [`accepts_keystroke`].
fn to_lamports(value: &str) -> Option<u64> {
    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    let mut units: u64 = 0;
    for digit in whole.bytes().chain(frac.bytes()) {
        units = units.checked_mul(10)?.checked_add(u64::from(digit - b'0'))?;
    }
    for _ in frac.len()..INPUT_DECIMALS as usize {
        units = units.checked_mul(10)?;
    }
    units.checked_mul(LAMPORTS_PER_INPUT_UNIT)
}

/// Checks a draft against `campaign`. Rules apply in order: format,
/// positivity, goal, activity.
pub fn validate_amount(
    draft: &str,
    campaign: &CampaignSnapshot,
) -> Result<ValidAmount, ValidationError> {
    if !accepts_keystroke(draft) || !draft.bytes().any(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotANumber);
    }
    // an amount too large for u64 can only exceed the goal
    let lamports = to_lamports(draft).ok_or(ValidationError::ExceedsGoal)?;
    if lamports == 0 {
        return Err(ValidationError::NotPositive);
    }
    match lamports.checked_add(campaign.amount_raised) {
        Some(total) if total <= campaign.goal => {}
        _ => return Err(ValidationError::ExceedsGoal),
    }
    if !campaign.active {
        return Err(ValidationError::CampaignInactive);
    }
    Ok(ValidAmount(lamports))
}
