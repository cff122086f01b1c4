use anchor_lang::prelude::*;

use crate::{
    constants::ALLOWANCE_SEED,
    events::Approval,
    state::{ShareAllowance, Vault},
};

#[derive(Accounts)]
pub struct Approve<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub vault: Account<'info, Vault>,

    /// CHECK: any address may be approved as spender
    pub spender: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = ShareAllowance::LEN,
        seeds = [
            ALLOWANCE_SEED,
            vault.key().as_ref(),
            owner.key().as_ref(),
            spender.key().as_ref(),
        ],
        bump
    )]
    pub allowance: Account<'info, ShareAllowance>,

    pub system_program: Program<'info, System>,
}

/// Set how many of the owner's shares the spender may withdraw or redeem.
/// Overwrites any previous amount; u64::MAX never decreases.
pub fn handler(ctx: Context<Approve>, shares: u64) -> Result<()> {
    let vault_key = ctx.accounts.vault.key();
    let owner_key = ctx.accounts.owner.key();
    let spender_key = ctx.accounts.spender.key();

    let allowance = &mut ctx.accounts.allowance;
    if allowance.vault == Pubkey::default() {
        allowance.set_inner(ShareAllowance::new(
            vault_key,
            owner_key,
            spender_key,
            ctx.bumps.allowance,
        ));
    }
    allowance.amount = shares;

    emit!(Approval {
        vault: vault_key,
        owner: owner_key,
        spender: spender_key,
        shares,
    });

    Ok(())
}
