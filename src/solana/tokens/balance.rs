use anyhow::{anyhow, Result};
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use spl_associated_token_account::get_associated_token_address;

use crate::solana::tokens::constants::SOL_MINT;
use crate::solana::wallet::parse_pubkey;
use crate::utils::parse_base_units;

/// Get the raw (base unit) balance an owner holds of `mint`.
///
/// Native SOL is read from the account lamports. SPL tokens are read from the
/// owner's associated token account; `None` means that account does not exist.
pub async fn get_raw_token_balance(
    client: &RpcClient,
    owner: &str,
    mint: &str,
) -> Result<Option<u128>> {
    let owner_pubkey = parse_pubkey(owner)?;

    if mint == SOL_MINT {
        let lamports = client
            .get_balance(&owner_pubkey)
            .await
            .map_err(|e| anyhow!("Failed to get balance: {}", e))?;

        return Ok(Some(lamports as u128));
    }

    let mint_pubkey = parse_pubkey(mint)?;
    let token_account = get_associated_token_address(&owner_pubkey, &mint_pubkey);

    let account = client
        .get_account_with_commitment(&token_account, client.commitment())
        .await
        .map_err(|e| anyhow!("Failed to get token account: {}", e))?
        .value;

    if account.is_none() {
        debug!("No token account {} for mint {}", token_account, mint);
        return Ok(None);
    }

    let balance = client
        .get_token_account_balance(&token_account)
        .await
        .map_err(|e| anyhow!("Failed to get token balance: {}", e))?;

    let raw = parse_base_units(&balance.amount)
        .ok_or_else(|| anyhow!("Invalid token balance amount: {}", balance.amount))?;

    Ok(Some(raw))
}
