use crate::config::*;
use anchor_lang::prelude::Pubkey;

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Exact decimal rendering of a lamport amount in SOL, trailing zeros
/// trimmed: `1_500_000_000` becomes `"1.5"`.
pub fn format_sol(lamports: u64) -> String {
    let whole = lamports / LAMPORTS_PER_SOL;
    let frac = lamports % LAMPORTS_PER_SOL;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = SOL_DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// `AbCd...WxYz` form of an address. Short inputs are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= ADDRESS_EDGE_CHARS * 2 + 3 {
        return address.to_string();
    }
    let head: String = chars[..ADDRESS_EDGE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - ADDRESS_EDGE_CHARS..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn explorer_address_url(cluster: Cluster, address: &Pubkey) -> String {
    format!(
        "{}/address/{}?cluster={}",
        EXPLORER_URL,
        address,
        cluster.explorer_param()
    )
}
