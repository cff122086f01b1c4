use std::collections::HashMap;

use anchor_lang::prelude::{Pubkey, Result};
use fuzz_accounts::*;
use share_vault::accounting::{self, Route};
use share_vault::error::VaultError;
use share_vault::ledger::AssetLedger;
use share_vault::state::{ShareAccount, ShareAllowance, Vault};
use trident_fuzz::fuzzing::*;
mod fuzz_accounts;

const HOLDERS: usize = 3;
const STARTING_BALANCE: u64 = 1_000_000_000_000;

/// Asset ledger kept in memory; every holder pre-approves the vault in full.
#[derive(Default)]
struct FuzzLedger {
    vault_account: Pubkey,
    balances: HashMap<Pubkey, u64>,
}

impl AssetLedger for FuzzLedger {
    fn vault_account(&self) -> Pubkey {
        self.vault_account
    }

    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.balances.get(account).copied().unwrap_or_default())
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let from_balance = self.balance_of(from)?;
        if from_balance < amount {
            return Err(VaultError::InsufficientBalance.into());
        }
        self.balances.insert(*from, from_balance - amount);
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }

    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let vault_account = self.vault_account;
        self.transfer_from(&vault_account, to, amount)
    }
}

/// Vault state tracking for invariant checks
struct VaultModel {
    vault_key: Pubkey,
    vault: Vault,
    holders: Vec<ShareAccount>,
    ledger: FuzzLedger,
}

impl VaultModel {
    fn new() -> Self {
        let vault_key = Pubkey::new_unique();
        let vault = Vault::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            "Fuzz Vault".to_string(),
            "FUZZ".to_string(),
            255,
        )
        .unwrap();

        let mut ledger = FuzzLedger {
            vault_account: vault.asset_vault,
            ..Default::default()
        };
        let holders = (0..HOLDERS)
            .map(|_| {
                let owner = Pubkey::new_unique();
                ledger.balances.insert(owner, STARTING_BALANCE);
                ShareAccount::new(vault_key, owner, 254)
            })
            .collect();

        Self {
            vault_key,
            vault,
            holders,
            ledger,
        }
    }

    /// A vault already holding `assets` against `shares`, all owned by the
    /// first holder, so flows run at a rate other than 1:1.
    fn seeded(assets: u64, shares: u64) -> Self {
        let mut model = Self::new();
        model.vault.total_assets = assets;
        model.vault.total_shares = shares;
        model.holders[0].shares = shares;
        model.holders[0].assets = assets;
        model
            .ledger
            .balances
            .insert(model.ledger.vault_account, assets);
        model
    }

    fn route(&self, caller: usize, receiver: usize) -> Route {
        Route {
            vault: self.vault_key,
            caller: self.holders[caller].owner,
            receiver: self.holders[receiver].owner,
            asset_account: self.holders[caller].owner,
        }
    }

    fn totals(&self) -> (u64, u64) {
        (self.vault.total_assets, self.vault.total_shares)
    }
}

#[derive(FuzzTestMethods)]
struct FuzzTest {
    trident: Trident,
    fuzz_accounts: AccountAddresses,
    model: Option<VaultModel>,
}

#[flow_executor]
impl FuzzTest {
    fn new() -> Self {
        Self {
            trident: Trident::default(),
            fuzz_accounts: AccountAddresses::default(),
            model: None,
        }
    }

    #[init]
    fn start(&mut self) {
        let model = if rand::random::<bool>() {
            let assets = 1 + rand::random::<u64>() % 1_000_000_000;
            let shares = 1 + rand::random::<u64>() % 1_000_000;
            VaultModel::seeded(assets, shares)
        } else {
            VaultModel::new()
        };
        self.model = Some(model);
    }

    #[flow]
    fn flow_deposit(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };

        let holder = rand::random::<usize>() % HOLDERS;
        let assets = rand::random::<u64>() % 1_000_000_000;
        let expected = model.vault.preview_deposit(assets).unwrap();
        let before = model.totals();

        let route = model.route(holder, holder);
        let result = accounting::deposit(
            &mut model.vault,
            &mut model.holders[holder],
            &mut model.ledger,
            &route,
            assets,
        );

        match result {
            Ok(shares) => {
                assert_eq!(shares, expected, "deposit must mint the previewed shares");
                assert!(shares > 0, "deposit must never mint zero shares");
            }
            Err(_) => assert_eq!(model.totals(), before, "failed deposit must not mutate"),
        }
    }

    #[flow]
    fn flow_mint(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };

        let holder = rand::random::<usize>() % HOLDERS;
        let shares = rand::random::<u64>() % 1_000_000_000;
        let before = model.totals();

        let route = model.route(holder, holder);
        let result = accounting::mint(
            &mut model.vault,
            &mut model.holders[holder],
            &mut model.ledger,
            &route,
            shares,
        );

        match result {
            Ok(assets) => {
                // Ceiling rounding: the minter never pays less than the shares are worth
                let worth = model.vault.convert_to_assets(shares).unwrap();
                assert!(assets >= worth, "mint undercharged: paid {assets}, worth {worth}");
            }
            Err(_) => assert_eq!(model.totals(), before, "failed mint must not mutate"),
        }
    }

    #[flow]
    fn flow_redeem(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };

        let holder = rand::random::<usize>() % HOLDERS;
        let held = model.holders[holder].shares;
        // Occasionally ask for more than is held
        let shares = rand::random::<u64>() % (held.saturating_add(2));
        let before = model.totals();

        let route = model.route(holder, holder);
        let result = accounting::redeem(
            &mut model.vault,
            &mut model.holders[holder],
            None,
            &mut model.ledger,
            &route,
            shares,
        );

        match result {
            Ok(assets) => {
                assert!(assets > 0, "redeem must never pay zero assets");
                assert!(assets <= before.0, "cannot redeem more assets than available");
            }
            Err(_) => {
                assert_eq!(model.totals(), before, "failed redeem must not mutate");
                assert_eq!(model.holders[holder].shares, held);
            }
        }
    }

    #[flow]
    fn flow_delegated_withdraw(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };

        let owner = rand::random::<usize>() % HOLDERS;
        let spender = (owner + 1) % HOLDERS;
        let max = model.vault.max_withdraw(&model.holders[owner]).unwrap();
        let assets = rand::random::<u64>() % (max.saturating_add(2));

        let mut allowance = ShareAllowance::new(
            model.vault_key,
            model.holders[owner].owner,
            model.holders[spender].owner,
            253,
        );
        allowance.amount = rand::random::<u64>() % (model.holders[owner].shares.saturating_add(2));
        let approved = allowance.amount;
        let before = model.totals();

        let route = model.route(spender, spender);
        let result = accounting::withdraw(
            &mut model.vault,
            &mut model.holders[owner],
            Some(&mut allowance),
            &mut model.ledger,
            &route,
            assets,
        );

        match result {
            Ok(shares) => {
                assert!(shares <= approved, "burned beyond the allowance");
                assert_eq!(allowance.amount, approved - shares);
            }
            Err(_) => {
                assert_eq!(model.totals(), before, "failed withdraw must not mutate");
                assert_eq!(allowance.amount, approved);
            }
        }
    }

    /// Test conversion consistency
    #[flow]
    fn flow_conversion_check(&mut self) {
        let Some(model) = self.model.as_ref() else {
            return;
        };

        let test_amount = rand::random::<u64>() % 1_000_000_000;
        let shares = model.vault.convert_to_shares(test_amount).unwrap();
        let assets_back = model.vault.convert_to_assets(shares).unwrap();

        // Invariant: Round-trip should not create assets (rounding favors vault)
        assert!(
            assets_back <= test_amount,
            "Invariant: round-trip should not create free assets"
        );
    }

    #[end]
    fn end(&mut self) {
        let Some(model) = self.model.as_ref() else {
            return;
        };

        let held: u64 = model.holders.iter().map(|h| h.shares).sum();
        assert_eq!(held, model.vault.total_shares, "Invariant: share conservation");

        assert_eq!(
            model.vault.total_shares == 0,
            model.vault.total_assets == 0,
            "Invariant: vault is empty in both totals or neither"
        );

        let vault_balance = model
            .ledger
            .balance_of(&model.ledger.vault_account())
            .unwrap();
        assert!(
            vault_balance >= model.vault.total_assets,
            "Invariant: vault holds the assets it accounts for"
        );
    }
}

fn main() {
    // Run 1000 iterations with up to 100 flows per iteration
    FuzzTest::fuzz(1000, 100);
}
