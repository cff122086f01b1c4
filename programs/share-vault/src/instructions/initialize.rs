use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{constants::VAULT_SEED, events::VaultInitialized, state::Vault};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = Vault::LEN,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    pub asset_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = vault,
        associated_token::token_program = asset_token_program,
    )]
    pub asset_vault: InterfaceAccount<'info, TokenAccount>,

    pub asset_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, name: String, symbol: String) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.set_inner(Vault::new(
        ctx.accounts.asset_mint.key(),
        ctx.accounts.asset_vault.key(),
        name,
        symbol,
        ctx.bumps.vault,
    )?);

    emit!(VaultInitialized {
        vault: vault.key(),
        asset_mint: vault.asset_mint,
        asset_vault: vault.asset_vault,
        name: vault.name.clone(),
        symbol: vault.symbol.clone(),
    });

    msg!("Vault initialized: {} ({})", vault.name, vault.symbol);

    Ok(())
}
