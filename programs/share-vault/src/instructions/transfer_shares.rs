use anchor_lang::prelude::*;

use crate::{
    constants::SHARES_SEED,
    error::VaultError,
    events::SharesTransferred,
    state::{ShareAccount, Vault},
};

#[derive(Accounts)]
pub struct TransferShares<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [SHARES_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump = owner_shares.bump,
    )]
    pub owner_shares: Account<'info, ShareAccount>,

    /// CHECK: any address may receive shares
    #[account(
        constraint = recipient.key() != owner.key() @ VaultError::SelfTransfer,
    )]
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = ShareAccount::LEN,
        seeds = [SHARES_SEED, vault.key().as_ref(), recipient.key().as_ref()],
        bump
    )]
    pub recipient_shares: Account<'info, ShareAccount>,

    pub system_program: Program<'info, System>,
}

/// Move shares to another holder. Depositor records are left untouched.
pub fn handler(ctx: Context<TransferShares>, shares: u64) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let recipient_key = ctx.accounts.recipient.key();

    if !ctx.accounts.recipient_shares.is_initialized() {
        ctx.accounts.recipient_shares.set_inner(ShareAccount::new(
            vault_key,
            recipient_key,
            ctx.bumps.recipient_shares,
        ));
    }

    ctx.accounts
        .owner_shares
        .transfer_to(&mut ctx.accounts.recipient_shares, shares)?;

    emit!(SharesTransferred {
        vault: vault_key,
        from: ctx.accounts.owner.key(),
        to: recipient_key,
        shares,
    });

    Ok(())
}
