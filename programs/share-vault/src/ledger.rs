use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TokenAccount, TransferChecked};

use crate::error::VaultError;

/// The underlying asset's ledger as seen by the vault.
///
/// Accounts are token account addresses. The vault only moves assets through
/// these calls.
pub trait AssetLedger {
    /// Account holding the vault's assets
    fn vault_account(&self) -> Pubkey;

    fn balance_of(&self, account: &Pubkey) -> Result<u64>;

    /// Move `amount` from `from` to `to` under the caller's authority.
    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;

    /// Move `amount` out of the vault account to `to`.
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL Token / Token-2022 ledger for a single instruction.
///
/// Only two accounts take part: the vault's asset account and the caller-side
/// `counterparty` account. Inbound transfers are signed by `authority`,
/// outbound transfers by the vault PDA through `signer_seeds`.
pub struct TokenLedger<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub asset_mint: AccountInfo<'info>,
    pub decimals: u8,
    pub asset_vault: AccountInfo<'info>,
    pub counterparty: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> TokenLedger<'a, 'info> {
    fn account_info(&self, account: &Pubkey) -> Result<&AccountInfo<'info>> {
        if *account == self.asset_vault.key() {
            Ok(&self.asset_vault)
        } else if *account == self.counterparty.key() {
            Ok(&self.counterparty)
        } else {
            err!(VaultError::InvalidLedgerAccount)
        }
    }
}

impl<'a, 'info> AssetLedger for TokenLedger<'a, 'info> {
    fn vault_account(&self) -> Pubkey {
        self.asset_vault.key()
    }

    /// Reads the account data directly so balances reflect earlier CPIs in
    /// the same instruction.
    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        let info = self.account_info(account)?;
        let data = info.try_borrow_data()?;
        let token_account = TokenAccount::try_deserialize(&mut &data[..])?;
        Ok(token_account.amount)
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*from, self.counterparty.key(), VaultError::InvalidLedgerAccount);
        require_keys_eq!(*to, self.asset_vault.key(), VaultError::InvalidLedgerAccount);

        transfer_checked(
            CpiContext::new(
                self.token_program.clone(),
                TransferChecked {
                    from: self.counterparty.clone(),
                    to: self.asset_vault.clone(),
                    mint: self.asset_mint.clone(),
                    authority: self.authority.clone(),
                },
            ),
            amount,
            self.decimals,
        )
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*to, self.counterparty.key(), VaultError::InvalidLedgerAccount);

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: self.asset_vault.clone(),
                    to: self.counterparty.clone(),
                    mint: self.asset_mint.clone(),
                    authority: self.vault.clone(),
                },
                self.signer_seeds,
            ),
            amount,
            self.decimals,
        )
    }
}

#[cfg(test)]
mod tests {
    use anchor_lang::solana_program::program_pack::Pack;
    use anchor_spl::token::spl_token::{
        self,
        state::{Account as SplTokenAccount, AccountState},
    };

    use super::*;
    use crate::test_utils::create_account_info;

    fn token_account_bytes(mint: Pubkey, owner: Pubkey, amount: u64) -> Vec<u8> {
        let account = SplTokenAccount {
            mint,
            owner,
            amount,
            state: AccountState::Initialized,
            ..Default::default()
        };
        let mut bytes = vec![0u8; SplTokenAccount::LEN];
        SplTokenAccount::pack(account, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_token_ledger_accounts() {
        let token_program = spl_token::ID;
        let mint = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let asset_vault = Pubkey::new_unique();
        let user_account = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();

        let (mut l0, mut l1, mut l2, mut l3, mut l4, mut l5) = (0u64, 0u64, 0u64, 0u64, 0u64, 0u64);
        let mut vault_bytes = token_account_bytes(mint, vault, 700);
        let mut user_bytes = token_account_bytes(mint, user, 300);
        let mut program_bytes: Vec<u8> = vec![];
        let mut mint_bytes: Vec<u8> = vec![];
        let mut user_key_bytes: Vec<u8> = vec![];
        let mut vault_key_bytes: Vec<u8> = vec![];

        let mut ledger = TokenLedger {
            token_program: create_account_info(
                &token_program,
                false,
                &mut l0,
                &mut program_bytes,
                &token_program,
            ),
            asset_mint: create_account_info(&mint, false, &mut l1, &mut mint_bytes, &token_program),
            decimals: 6,
            asset_vault: create_account_info(
                &asset_vault,
                true,
                &mut l2,
                &mut vault_bytes,
                &token_program,
            ),
            counterparty: create_account_info(
                &user_account,
                true,
                &mut l3,
                &mut user_bytes,
                &token_program,
            ),
            authority: create_account_info(&user, false, &mut l4, &mut user_key_bytes, &user),
            vault: create_account_info(&vault, false, &mut l5, &mut vault_key_bytes, &crate::ID),
            signer_seeds: &[],
        };

        assert_eq!(ledger.vault_account(), asset_vault);
        assert_eq!(ledger.balance_of(&asset_vault).unwrap(), 700);
        assert_eq!(ledger.balance_of(&user_account).unwrap(), 300);

        let err = ledger.balance_of(&stranger).unwrap_err();
        assert_eq!(err, VaultError::InvalidLedgerAccount.into());

        let err = ledger.transfer(&stranger, 1).unwrap_err();
        assert_eq!(err, VaultError::InvalidLedgerAccount.into());
        let err = ledger.transfer(&asset_vault, 1).unwrap_err();
        assert_eq!(err, VaultError::InvalidLedgerAccount.into());

        let err = ledger.transfer_from(&stranger, &asset_vault, 1).unwrap_err();
        assert_eq!(err, VaultError::InvalidLedgerAccount.into());
        let err = ledger.transfer_from(&user_account, &stranger, 1).unwrap_err();
        assert_eq!(err, VaultError::InvalidLedgerAccount.into());
    }
}
