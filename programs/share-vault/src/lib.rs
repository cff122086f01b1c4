use anchor_lang::prelude::*;

pub mod accounting;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod state;

#[cfg(test)]
mod test_utils;

use instructions::*;

declare_id!("D5tdwQBbqaBu664W6HHzysqW78yKsUdLka4n8uTYZk8G");

#[program]
pub mod share_vault {
    use super::*;

    /// Initialize a new vault for the given asset
    pub fn initialize(ctx: Context<Initialize>, name: String, symbol: String) -> Result<()> {
        instructions::initialize::handler(ctx, name, symbol)
    }

    /// Deposit assets and credit shares to the receiver
    /// Returns shares minted (floor rounding - favors vault)
    pub fn deposit(ctx: Context<Deposit>, assets: u64) -> Result<()> {
        instructions::deposit::handler(ctx, assets)
    }

    /// Mint exact shares to the receiver by depositing required assets
    /// Returns assets paid (ceiling rounding - favors vault)
    pub fn mint(ctx: Context<MintShares>, shares: u64) -> Result<()> {
        instructions::mint::handler(ctx, shares)
    }

    /// Withdraw exact assets from the owner's shares
    /// Returns shares burned (ceiling rounding - favors vault)
    pub fn withdraw(ctx: Context<Withdraw>, assets: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, assets)
    }

    /// Redeem the owner's shares for assets
    /// Returns assets paid out (floor rounding - favors vault)
    pub fn redeem(ctx: Context<Redeem>, shares: u64) -> Result<()> {
        instructions::redeem::handler(ctx, shares)
    }

    /// Allow a spender to withdraw/redeem up to `shares` of the owner's shares
    pub fn approve(ctx: Context<Approve>, shares: u64) -> Result<()> {
        instructions::approve::handler(ctx, shares)
    }

    /// Transfer shares to another holder
    pub fn transfer_shares(ctx: Context<TransferShares>, shares: u64) -> Result<()> {
        instructions::transfer_shares::handler(ctx, shares)
    }

    // ============ View Functions (CPI composable) ============

    /// Preview shares for deposit (floor rounding)
    pub fn preview_deposit(ctx: Context<VaultView>, assets: u64) -> Result<()> {
        instructions::view::preview_deposit(ctx, assets)
    }

    /// Preview assets required for mint (ceiling rounding)
    pub fn preview_mint(ctx: Context<VaultView>, shares: u64) -> Result<()> {
        instructions::view::preview_mint(ctx, shares)
    }

    /// Preview shares to burn for withdraw (ceiling rounding)
    pub fn preview_withdraw(ctx: Context<VaultView>, assets: u64) -> Result<()> {
        instructions::view::preview_withdraw(ctx, assets)
    }

    /// Preview assets for redeem (floor rounding)
    pub fn preview_redeem(ctx: Context<VaultView>, shares: u64) -> Result<()> {
        instructions::view::preview_redeem(ctx, shares)
    }

    /// Convert assets to shares (floor rounding)
    pub fn convert_to_shares(ctx: Context<VaultView>, assets: u64) -> Result<()> {
        instructions::view::convert_to_shares_view(ctx, assets)
    }

    /// Convert shares to assets (floor rounding)
    pub fn convert_to_assets(ctx: Context<VaultView>, shares: u64) -> Result<()> {
        instructions::view::convert_to_assets_view(ctx, shares)
    }

    /// Underlying asset mint
    pub fn asset(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::get_asset(ctx)
    }

    /// Get total assets in vault
    pub fn total_assets(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::get_total_assets(ctx)
    }

    /// Get total shares outstanding
    pub fn total_shares(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::get_total_shares(ctx)
    }

    /// Max assets depositable (u64::MAX)
    pub fn max_deposit(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::max_deposit(ctx)
    }

    /// Max shares mintable (u64::MAX)
    pub fn max_mint(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::max_mint(ctx)
    }

    /// Max assets owner can withdraw
    pub fn max_withdraw(ctx: Context<VaultViewWithOwner>) -> Result<()> {
        instructions::view::max_withdraw(ctx)
    }

    /// Max shares owner can redeem
    pub fn max_redeem(ctx: Context<VaultViewWithOwner>) -> Result<()> {
        instructions::view::max_redeem(ctx)
    }

    /// Assets recorded for the owner through deposit/mint
    pub fn address_to_user(ctx: Context<VaultViewWithOwner>) -> Result<()> {
        instructions::view::address_to_user(ctx)
    }
}
