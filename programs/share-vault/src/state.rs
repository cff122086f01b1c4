use anchor_lang::prelude::*;

use crate::{
    constants::{ALLOWANCE_SEED, MAX_NAME_LEN, MAX_SYMBOL_LEN, SHARES_SEED, VAULT_SEED},
    error::VaultError,
    math::{convert_to_assets, convert_to_shares, Rounding},
};

#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Vault {
    /// Underlying asset mint
    pub asset_mint: Pubkey,
    /// Token account holding assets
    pub asset_vault: Pubkey,
    /// Assets attributed to share holders
    pub total_assets: u64,
    /// Shares outstanding across all share accounts
    pub total_shares: u64,
    /// PDA bump seed
    pub bump: u8,
    /// Share class name
    pub name: String,
    /// Share class symbol
    pub symbol: String,
    /// Reserved for future upgrades
    pub _reserved: [u8; 32],
}

impl Vault {
    pub const LEN: usize = 8 +  // discriminator
        32 +  // asset_mint
        32 +  // asset_vault
        8 +   // total_assets
        8 +   // total_shares
        1 +   // bump
        4 + MAX_NAME_LEN +   // name
        4 + MAX_SYMBOL_LEN + // symbol
        32; // _reserved

    pub const SEED_PREFIX: &'static [u8] = VAULT_SEED;

    pub fn new(
        asset_mint: Pubkey,
        asset_vault: Pubkey,
        name: String,
        symbol: String,
        bump: u8,
    ) -> Result<Self> {
        require!(name.len() <= MAX_NAME_LEN, VaultError::NameTooLong);
        require!(symbol.len() <= MAX_SYMBOL_LEN, VaultError::SymbolTooLong);

        Ok(Self {
            asset_mint,
            asset_vault,
            total_assets: 0,
            total_shares: 0,
            bump,
            name,
            symbol,
            _reserved: [0u8; 32],
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0 && self.total_assets == 0
    }

    pub fn convert_to_shares(&self, assets: u64) -> Result<u64> {
        convert_to_shares(assets, self.total_assets, self.total_shares, Rounding::Floor)
    }

    pub fn convert_to_assets(&self, shares: u64) -> Result<u64> {
        convert_to_assets(shares, self.total_assets, self.total_shares, Rounding::Floor)
    }

    /// Shares minted for `assets` (floor - depositor gets no more than paid for)
    pub fn preview_deposit(&self, assets: u64) -> Result<u64> {
        self.convert_to_shares(assets)
    }

    /// Assets charged for exactly `shares` (ceiling - minter pays at least the value)
    pub fn preview_mint(&self, shares: u64) -> Result<u64> {
        convert_to_assets(shares, self.total_assets, self.total_shares, Rounding::Ceiling)
    }

    /// Shares burned to release exactly `assets` (ceiling)
    pub fn preview_withdraw(&self, assets: u64) -> Result<u64> {
        convert_to_shares(assets, self.total_assets, self.total_shares, Rounding::Ceiling)
    }

    /// Assets released for `shares` (floor)
    pub fn preview_redeem(&self, shares: u64) -> Result<u64> {
        self.convert_to_assets(shares)
    }

    /// No capacity ceiling.
    pub fn max_deposit(&self) -> u64 {
        u64::MAX
    }

    pub fn max_mint(&self) -> u64 {
        u64::MAX
    }

    pub fn max_withdraw(&self, owner: &ShareAccount) -> Result<u64> {
        self.convert_to_assets(owner.shares)
    }

    pub fn max_redeem(&self, owner: &ShareAccount) -> u64 {
        owner.shares
    }

    /// Record `shares` issued to `account` against `assets` paid in.
    ///
    /// All sums are checked before any field is written.
    pub fn issue_shares(
        &mut self,
        account: &mut ShareAccount,
        assets: u64,
        shares: u64,
    ) -> Result<()> {
        let total_assets = self
            .total_assets
            .checked_add(assets)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let account_shares = account
            .shares
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let account_assets = account
            .assets
            .checked_add(assets)
            .ok_or(VaultError::ArithmeticOverflow)?;

        self.total_assets = total_assets;
        self.total_shares = total_shares;
        account.shares = account_shares;
        account.assets = account_assets;

        Ok(())
    }

    /// Burn `shares` from `account` releasing `assets` out of the pool.
    ///
    /// The depositor record is floored at zero: it is bookkeeping, the share
    /// balance is what the burn is checked against.
    pub fn burn_shares(
        &mut self,
        account: &mut ShareAccount,
        assets: u64,
        shares: u64,
    ) -> Result<()> {
        require!(account.shares >= shares, VaultError::InsufficientBalance);

        let total_shares = self
            .total_shares
            .checked_sub(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let total_assets = self
            .total_assets
            .checked_sub(assets)
            .ok_or(VaultError::ArithmeticOverflow)?;

        require!(
            (total_shares == 0) == (total_assets == 0),
            VaultError::InvalidVaultState
        );

        self.total_shares = total_shares;
        self.total_assets = total_assets;
        account.shares -= shares;
        account.assets = account.assets.saturating_sub(assets);

        Ok(())
    }
}

/// Share balance and depositor record of one owner in one vault.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct ShareAccount {
    pub vault: Pubkey,
    pub owner: Pubkey,
    /// Shares held (authoritative)
    pub shares: u64,
    /// Assets attributed through deposit/mint, reduced on withdraw/redeem
    pub assets: u64,
    pub bump: u8,
}

impl ShareAccount {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // owner
        8 +  // shares
        8 +  // assets
        1; // bump

    pub const SEED_PREFIX: &'static [u8] = SHARES_SEED;

    pub fn new(vault: Pubkey, owner: Pubkey, bump: u8) -> Self {
        Self {
            vault,
            owner,
            shares: 0,
            assets: 0,
            bump,
        }
    }

    /// `init_if_needed` leaves a fresh account zeroed.
    pub fn is_initialized(&self) -> bool {
        self.vault != Pubkey::default()
    }

    pub fn transfer_to(&mut self, to: &mut ShareAccount, shares: u64) -> Result<()> {
        require!(self.shares >= shares, VaultError::InsufficientBalance);
        let to_shares = to
            .shares
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;

        self.shares -= shares;
        to.shares = to_shares;

        Ok(())
    }
}

/// Shares `spender` may withdraw or redeem on behalf of `owner`.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct ShareAllowance {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub spender: Pubkey,
    /// u64::MAX is an unlimited approval
    pub amount: u64,
    pub bump: u8,
}

impl ShareAllowance {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // owner
        32 + // spender
        8 +  // amount
        1; // bump

    pub const SEED_PREFIX: &'static [u8] = ALLOWANCE_SEED;

    pub fn new(vault: Pubkey, owner: Pubkey, spender: Pubkey, bump: u8) -> Self {
        Self {
            vault,
            owner,
            spender,
            amount: 0,
            bump,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.amount == u64::MAX
    }

    pub fn spend(&mut self, shares: u64) -> Result<()> {
        if self.is_unlimited() {
            return Ok(());
        }

        self.amount = self
            .amount
            .checked_sub(shares)
            .ok_or(VaultError::InsufficientAllowance)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_with(total_assets: u64, total_shares: u64) -> Vault {
        let mut vault = Vault::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            "Pooled USDC".to_string(),
            "pUSDC".to_string(),
            255,
        )
        .unwrap();
        vault.total_assets = total_assets;
        vault.total_shares = total_shares;
        vault
    }

    #[test]
    fn test_new_vault_is_empty() {
        let vault = vault_with(0, 0);
        assert!(vault.is_empty());
        assert_eq!(vault.total_assets, 0);
    }

    #[test]
    fn test_metadata_limits() {
        let long_name = "n".repeat(MAX_NAME_LEN + 1);
        let err = Vault::new(Pubkey::default(), Pubkey::default(), long_name, "S".into(), 0)
            .unwrap_err();
        assert_eq!(err, VaultError::NameTooLong.into());

        let long_symbol = "S".repeat(MAX_SYMBOL_LEN + 1);
        let err = Vault::new(Pubkey::default(), Pubkey::default(), "N".into(), long_symbol, 0)
            .unwrap_err();
        assert_eq!(err, VaultError::SymbolTooLong.into());
    }

    #[test]
    fn test_previews_at_uneven_rate() {
        // 3 assets per 2 shares
        let vault = vault_with(3_000, 2_000);
        assert_eq!(vault.preview_deposit(10).unwrap(), 6);
        assert_eq!(vault.preview_mint(7).unwrap(), 11);
        assert_eq!(vault.preview_withdraw(10).unwrap(), 7);
        assert_eq!(vault.preview_redeem(7).unwrap(), 10);
    }

    #[test]
    fn test_previews_are_pure() {
        let vault = vault_with(1_234, 1_001);
        let before = vault.clone();
        assert_eq!(vault.preview_deposit(77).unwrap(), vault.preview_deposit(77).unwrap());
        assert_eq!(vault.preview_redeem(77).unwrap(), vault.preview_redeem(77).unwrap());
        assert_eq!(vault, before);
    }

    #[test]
    fn test_limits() {
        let vault = vault_with(200, 100);
        let mut owner = ShareAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        owner.shares = 40;

        assert_eq!(vault.max_deposit(), u64::MAX);
        assert_eq!(vault.max_mint(), u64::MAX);
        assert_eq!(vault.max_withdraw(&owner).unwrap(), 80);
        assert_eq!(vault.max_redeem(&owner), 40);
    }

    #[test]
    fn test_burn_rejects_shortfall() {
        let mut vault = vault_with(100, 100);
        let mut owner = ShareAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        owner.shares = 10;

        let err = vault.burn_shares(&mut owner, 11, 11).unwrap_err();
        assert_eq!(err, VaultError::InsufficientBalance.into());
        assert_eq!(owner.shares, 10);
        assert_eq!(vault.total_shares, 100);
    }

    #[test]
    fn test_burn_keeps_empty_state_consistent() {
        // last share burned while assets would remain behind
        let mut vault = vault_with(100, 1);
        let mut owner = ShareAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        owner.shares = 1;

        let err = vault.burn_shares(&mut owner, 50, 1).unwrap_err();
        assert_eq!(err, VaultError::InvalidVaultState.into());
        assert_eq!(vault.total_assets, 100);
        assert_eq!(owner.shares, 1);
    }

    #[test]
    fn test_burn_floors_depositor_record() {
        let mut vault = vault_with(300, 100);
        let mut owner = ShareAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        owner.shares = 50;
        owner.assets = 50;

        vault.burn_shares(&mut owner, 150, 50).unwrap();
        assert_eq!(owner.assets, 0);
        assert_eq!(vault.total_assets, 150);
        assert_eq!(vault.total_shares, 50);
    }

    #[test]
    fn test_issue_overflow_writes_nothing() {
        let mut vault = vault_with(u64::MAX - 1, 10);
        let mut owner = ShareAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);

        let err = vault.issue_shares(&mut owner, 2, 1).unwrap_err();
        assert_eq!(err, VaultError::ArithmeticOverflow.into());
        assert_eq!(vault.total_shares, 10);
        assert_eq!(owner.shares, 0);
    }

    #[test]
    fn test_allowance_spend() {
        let mut allowance =
            ShareAllowance::new(Pubkey::default(), Pubkey::new_unique(), Pubkey::new_unique(), 1);
        allowance.amount = 30;
        allowance.spend(20).unwrap();
        assert_eq!(allowance.amount, 10);

        let err = allowance.spend(11).unwrap_err();
        assert_eq!(err, VaultError::InsufficientAllowance.into());
        assert_eq!(allowance.amount, 10);

        allowance.amount = u64::MAX;
        allowance.spend(1_000).unwrap();
        assert!(allowance.is_unlimited());
    }
}
