use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    accounting::{self, Route},
    constants::{SHARES_SEED, VAULT_SEED},
    ledger::TokenLedger,
    state::{ShareAccount, Vault},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
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
        constraint = caller_asset_account.mint == vault.asset_mint,
        constraint = caller_asset_account.owner == caller.key(),
    )]
    pub caller_asset_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = asset_vault.key() == vault.asset_vault,
    )]
    pub asset_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: any address may receive shares
    pub receiver: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = caller,
        space = ShareAccount::LEN,
        seeds = [SHARES_SEED, vault.key().as_ref(), receiver.key().as_ref()],
        bump
    )]
    pub receiver_shares: Account<'info, ShareAccount>,

    pub asset_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Deposit exact assets, crediting shares to the receiver (floor rounding - favors vault)
pub fn handler(ctx: Context<Deposit>, assets: u64) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let receiver_key = ctx.accounts.receiver.key();

    if !ctx.accounts.receiver_shares.is_initialized() {
        ctx.accounts.receiver_shares.set_inner(ShareAccount::new(
            vault_key,
            receiver_key,
            ctx.bumps.receiver_shares,
        ));
    }

    let route = Route {
        vault: vault_key,
        caller: ctx.accounts.caller.key(),
        receiver: receiver_key,
        asset_account: ctx.accounts.caller_asset_account.key(),
    };

    let mut ledger = TokenLedger {
        token_program: ctx.accounts.asset_token_program.to_account_info(),
        asset_mint: ctx.accounts.asset_mint.to_account_info(),
        decimals: ctx.accounts.asset_mint.decimals,
        asset_vault: ctx.accounts.asset_vault.to_account_info(),
        counterparty: ctx.accounts.caller_asset_account.to_account_info(),
        authority: ctx.accounts.caller.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        signer_seeds: &[],
    };

    let shares = accounting::deposit(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.receiver_shares,
        &mut ledger,
        &route,
        assets,
    )?;

    set_return_data(&shares.to_le_bytes());
    Ok(())
}
