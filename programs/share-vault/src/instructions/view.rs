use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;

use crate::{
    constants::SHARES_SEED,
    state::{ShareAccount, Vault},
};

#[derive(Accounts)]
pub struct VaultView<'info> {
    pub vault: Account<'info, Vault>,
}

#[derive(Accounts)]
pub struct VaultViewWithOwner<'info> {
    pub vault: Account<'info, Vault>,

    /// CHECK: only used to derive the share account address
    pub owner: UncheckedAccount<'info>,

    /// CHECK: may not exist yet; loaded by `load_share_account`
    #[account(
        seeds = [SHARES_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump,
    )]
    pub owner_shares: UncheckedAccount<'info>,
}

/// Share account behind `info`, or `None` for an owner that never held shares.
pub fn load_share_account(info: &AccountInfo) -> Result<Option<ShareAccount>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    // Same checks as `Account::<ShareAccount>::try_from`, without its `&'a AccountInfo<'a>` bound
    if info.owner == &anchor_lang::system_program::ID && info.lamports() == 0 {
        return Err(ErrorCode::AccountNotInitialized.into());
    }
    if info.owner != &ShareAccount::owner() {
        return Err(Error::from(ErrorCode::AccountOwnedByWrongProgram)
            .with_pubkeys((*info.owner, ShareAccount::owner())));
    }
    let mut data: &[u8] = &info.try_borrow_data()?;
    Ok(Some(ShareAccount::try_deserialize(&mut data)?))
}

/// Preview how many shares would be minted for given assets (floor rounding)
pub fn preview_deposit(ctx: Context<VaultView>, assets: u64) -> Result<()> {
    let shares = ctx.accounts.vault.preview_deposit(assets)?;
    set_return_data(&shares.to_le_bytes());
    Ok(())
}

/// Preview how many assets are required to mint exact shares (ceiling rounding)
pub fn preview_mint(ctx: Context<VaultView>, shares: u64) -> Result<()> {
    let assets = ctx.accounts.vault.preview_mint(shares)?;
    set_return_data(&assets.to_le_bytes());
    Ok(())
}

/// Preview how many shares must be burned to withdraw exact assets (ceiling rounding)
pub fn preview_withdraw(ctx: Context<VaultView>, assets: u64) -> Result<()> {
    let shares = ctx.accounts.vault.preview_withdraw(assets)?;
    set_return_data(&shares.to_le_bytes());
    Ok(())
}

/// Preview how many assets would be received for redeeming shares (floor rounding)
pub fn preview_redeem(ctx: Context<VaultView>, shares: u64) -> Result<()> {
    let assets = ctx.accounts.vault.preview_redeem(shares)?;
    set_return_data(&assets.to_le_bytes());
    Ok(())
}

pub fn convert_to_shares_view(ctx: Context<VaultView>, assets: u64) -> Result<()> {
    let shares = ctx.accounts.vault.convert_to_shares(assets)?;
    set_return_data(&shares.to_le_bytes());
    Ok(())
}

pub fn convert_to_assets_view(ctx: Context<VaultView>, shares: u64) -> Result<()> {
    let assets = ctx.accounts.vault.convert_to_assets(shares)?;
    set_return_data(&assets.to_le_bytes());
    Ok(())
}

pub fn get_asset(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(ctx.accounts.vault.asset_mint.as_ref());
    Ok(())
}

pub fn get_total_assets(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&ctx.accounts.vault.total_assets.to_le_bytes());
    Ok(())
}

pub fn get_total_shares(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&ctx.accounts.vault.total_shares.to_le_bytes());
    Ok(())
}

pub fn max_deposit(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&ctx.accounts.vault.max_deposit().to_le_bytes());
    Ok(())
}

pub fn max_mint(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&ctx.accounts.vault.max_mint().to_le_bytes());
    Ok(())
}

/// Maximum assets that owner can withdraw (limited by their shares)
pub fn max_withdraw(ctx: Context<VaultViewWithOwner>) -> Result<()> {
    let max = match load_share_account(&ctx.accounts.owner_shares)? {
        Some(owner) => ctx.accounts.vault.max_withdraw(&owner)?,
        None => 0,
    };
    set_return_data(&max.to_le_bytes());
    Ok(())
}

/// Maximum shares that owner can redeem (their share balance)
pub fn max_redeem(ctx: Context<VaultViewWithOwner>) -> Result<()> {
    let max = load_share_account(&ctx.accounts.owner_shares)?
        .map_or(0, |owner| ctx.accounts.vault.max_redeem(&owner));
    set_return_data(&max.to_le_bytes());
    Ok(())
}

/// Assets recorded against the owner through deposit/mint
pub fn address_to_user(ctx: Context<VaultViewWithOwner>) -> Result<()> {
    let assets = load_share_account(&ctx.accounts.owner_shares)?.map_or(0, |owner| owner.assets);
    set_return_data(&assets.to_le_bytes());
    Ok(())
}
