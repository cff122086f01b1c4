use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::{error::VaultError, ledger::AssetLedger, state::ShareAccount, state::Vault};

/// In-memory asset ledger. Accounts are plain keys; `approve` grants the
/// vault a pull allowance over an account.
#[derive(Default)]
pub struct MemoryLedger {
    vault_account: Pubkey,
    balances: HashMap<Pubkey, u64>,
    allowances: HashMap<Pubkey, u64>,
    /// Withheld from every inbound transfer, like a fee-charging asset
    pub withhold: u64,
}

impl MemoryLedger {
    pub fn new(vault_account: Pubkey) -> Self {
        Self {
            vault_account,
            ..Default::default()
        }
    }

    pub fn fund(&mut self, account: Pubkey, amount: u64) {
        *self.balances.entry(account).or_default() += amount;
    }

    pub fn approve(&mut self, owner: Pubkey, amount: u64) {
        self.allowances.insert(owner, amount);
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Pubkey) -> u64 {
        self.allowances.get(owner).copied().unwrap_or_default()
    }

    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balance(account);
        require!(balance >= amount, VaultError::InsufficientBalance);
        self.balances.insert(*account, balance - amount);
        Ok(())
    }
}

impl AssetLedger for MemoryLedger {
    fn vault_account(&self) -> Pubkey {
        self.vault_account
    }

    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.balance(account))
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let allowance = self.allowance(from);
        require!(allowance >= amount, VaultError::InsufficientAllowance);
        self.debit(from, amount)?;
        self.allowances.insert(*from, allowance - amount);
        self.fund(*to, amount.saturating_sub(self.withhold));
        Ok(())
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let vault_account = self.vault_account;
        self.debit(&vault_account, amount)?;
        self.fund(*to, amount);
        Ok(())
    }
}

pub fn create_vault() -> Vault {
    Vault::new(
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        "Pooled Test Asset".to_string(),
        "pTEST".to_string(),
        255,
    )
    .unwrap()
}

pub fn create_share_account(vault: Pubkey, owner: Pubkey) -> ShareAccount {
    ShareAccount::new(vault, owner, 254)
}

pub fn create_account_info<'a>(
    key: &'a Pubkey,
    is_writable: bool,
    lamports: &'a mut u64,
    bytes: &'a mut [u8],
    owner: &'a Pubkey,
) -> AccountInfo<'a> {
    AccountInfo::new(key, false, is_writable, lamports, bytes, owner, false, 0)
}
