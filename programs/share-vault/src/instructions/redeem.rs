use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    accounting::{self, Route},
    constants::{SHARES_SEED, VAULT_SEED},
    error::VaultError,
    ledger::TokenLedger,
    state::{ShareAccount, ShareAllowance, Vault},
};

#[derive(Accounts)]
pub struct Redeem<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        constraint = asset_mint.key() == vault.asset_mint,
    )]
    pub asset_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = asset_vault.key() == vault.asset_vault,
    )]
    pub asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// Receiver is the owner of this token account
    #[account(
        mut,
        constraint = receiver_asset_account.mint == vault.asset_mint,
        constraint = receiver_asset_account.key() != vault.asset_vault @ VaultError::VaultAsReceiver,
    )]
    pub receiver_asset_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SHARES_SEED, vault.key().as_ref(), owner_shares.owner.as_ref()],
        bump = owner_shares.bump,
    )]
    pub owner_shares: Account<'info, ShareAccount>,

    /// Required when the caller is not the owner
    #[account(mut)]
    pub allowance: Option<Account<'info, ShareAllowance>>,

    pub asset_token_program: Interface<'info, TokenInterface>,
}

/// Redeem shares for assets (floor rounding - protects vault)
pub fn handler(ctx: Context<Redeem>, shares: u64) -> Result<()> {
    let asset_mint_key = ctx.accounts.vault.asset_mint;
    let bump = ctx.accounts.vault.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, asset_mint_key.as_ref(), &[bump]]];

    let route = Route {
        vault: ctx.accounts.vault.key(),
        caller: ctx.accounts.caller.key(),
        receiver: ctx.accounts.receiver_asset_account.owner,
        asset_account: ctx.accounts.receiver_asset_account.key(),
    };

    let mut ledger = TokenLedger {
        token_program: ctx.accounts.asset_token_program.to_account_info(),
        asset_mint: ctx.accounts.asset_mint.to_account_info(),
        decimals: ctx.accounts.asset_mint.decimals,
        asset_vault: ctx.accounts.asset_vault.to_account_info(),
        counterparty: ctx.accounts.receiver_asset_account.to_account_info(),
        authority: ctx.accounts.caller.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        signer_seeds,
    };

    let assets = accounting::redeem(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.owner_shares,
        ctx.accounts.allowance.as_deref_mut(),
        &mut ledger,
        &route,
        shares,
    )?;

    set_return_data(&assets.to_le_bytes());
    Ok(())
}
