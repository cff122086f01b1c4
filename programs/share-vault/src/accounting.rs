//! Deposit, mint, withdraw and redeem against a [`Vault`].
//!
//! Every operation finalizes vault, share and allowance state before it
//! touches the asset ledger, and puts that state back if the ledger step or
//! the solvency check after it fails.

use anchor_lang::prelude::*;

use crate::{
    error::VaultError,
    events::{Deposit, DepositViaMint, Redeemed, Withdraw},
    ledger::AssetLedger,
    state::{ShareAccount, ShareAllowance, Vault},
};

/// Parties to one operation.
#[derive(Clone, Copy, Debug)]
pub struct Route {
    /// Vault account key, carried into events
    pub vault: Pubkey,
    /// Signer of the instruction
    pub caller: Pubkey,
    /// Receiver of shares (deposit/mint) or of assets (withdraw/redeem)
    pub receiver: Pubkey,
    /// Caller-side asset account: funds source on the way in, destination on the way out
    pub asset_account: Pubkey,
}

struct Snapshot {
    total_assets: u64,
    total_shares: u64,
    shares: u64,
    assets: u64,
    allowance: Option<u64>,
}

impl Snapshot {
    fn take(vault: &Vault, account: &ShareAccount, allowance: Option<&ShareAllowance>) -> Self {
        Self {
            total_assets: vault.total_assets,
            total_shares: vault.total_shares,
            shares: account.shares,
            assets: account.assets,
            allowance: allowance.map(|a| a.amount),
        }
    }

    fn restore(
        self,
        vault: &mut Vault,
        account: &mut ShareAccount,
        allowance: Option<&mut ShareAllowance>,
    ) {
        vault.total_assets = self.total_assets;
        vault.total_shares = self.total_shares;
        account.shares = self.shares;
        account.assets = self.assets;
        if let (Some(allowance), Some(amount)) = (allowance, self.allowance) {
            allowance.amount = amount;
        }
    }
}

/// Deposit exactly `assets`, crediting floor-rounded shares to the receiver.
pub fn deposit<L: AssetLedger>(
    vault: &mut Vault,
    receiver: &mut ShareAccount,
    ledger: &mut L,
    route: &Route,
    assets: u64,
) -> Result<u64> {
    let shares = vault.preview_deposit(assets)?;
    require!(shares > 0, VaultError::ZeroShares);

    enter(vault, receiver, ledger, route, assets, shares)?;

    emit!(Deposit {
        vault: route.vault,
        caller: route.caller,
        receiver: route.receiver,
        assets,
        shares,
    });

    Ok(shares)
}

/// Mint exactly `shares`, charging ceiling-rounded assets to the caller.
pub fn mint<L: AssetLedger>(
    vault: &mut Vault,
    receiver: &mut ShareAccount,
    ledger: &mut L,
    route: &Route,
    shares: u64,
) -> Result<u64> {
    require!(shares > 0, VaultError::ZeroShares);
    let assets = vault.preview_mint(shares)?;

    enter(vault, receiver, ledger, route, assets, shares)?;

    emit!(DepositViaMint {
        vault: route.vault,
        caller: route.caller,
        receiver: route.receiver,
        shares,
        assets,
    });

    Ok(assets)
}

/// Withdraw exactly `assets` from `owner`, burning ceiling-rounded shares.
pub fn withdraw<L: AssetLedger>(
    vault: &mut Vault,
    owner: &mut ShareAccount,
    allowance: Option<&mut ShareAllowance>,
    ledger: &mut L,
    route: &Route,
    assets: u64,
) -> Result<u64> {
    require!(assets > 0, VaultError::ZeroAssets);
    let shares = vault.preview_withdraw(assets)?;

    exit(vault, owner, allowance, ledger, route, assets, shares)?;

    emit!(Withdraw {
        vault: route.vault,
        caller: route.caller,
        receiver: route.receiver,
        owner: owner.owner,
        assets,
        shares,
    });

    Ok(shares)
}

/// Redeem exactly `shares` from `owner` for floor-rounded assets.
pub fn redeem<L: AssetLedger>(
    vault: &mut Vault,
    owner: &mut ShareAccount,
    allowance: Option<&mut ShareAllowance>,
    ledger: &mut L,
    route: &Route,
    shares: u64,
) -> Result<u64> {
    let assets = vault.preview_redeem(shares)?;
    require!(assets > 0, VaultError::ZeroAssets);

    exit(vault, owner, allowance, ledger, route, assets, shares)?;

    emit!(Redeemed {
        vault: route.vault,
        caller: route.caller,
        receiver: route.receiver,
        owner: owner.owner,
        shares,
        assets,
    });

    Ok(assets)
}

fn enter<L: AssetLedger>(
    vault: &mut Vault,
    receiver: &mut ShareAccount,
    ledger: &mut L,
    route: &Route,
    assets: u64,
    shares: u64,
) -> Result<()> {
    let snapshot = Snapshot::take(vault, receiver, None);

    vault.issue_shares(receiver, assets, shares)?;

    let vault_account = ledger.vault_account();
    let pulled = ledger
        .transfer_from(&route.asset_account, &vault_account, assets)
        .and_then(|_| ensure_solvent(vault, ledger));

    if let Err(err) = pulled {
        msg!("Deposit of {} assets reverted", assets);
        snapshot.restore(vault, receiver, None);
        return Err(err);
    }

    Ok(())
}

fn exit<L: AssetLedger>(
    vault: &mut Vault,
    owner: &mut ShareAccount,
    mut allowance: Option<&mut ShareAllowance>,
    ledger: &mut L,
    route: &Route,
    assets: u64,
    shares: u64,
) -> Result<()> {
    require_keys_neq!(
        route.asset_account,
        ledger.vault_account(),
        VaultError::VaultAsReceiver
    );

    let snapshot = Snapshot::take(vault, owner, allowance.as_deref());

    let result = spend_allowance(route.caller, owner, allowance.as_deref_mut(), shares)
        .and_then(|_| vault.burn_shares(owner, assets, shares))
        .and_then(|_| ledger.transfer(&route.asset_account, assets))
        .and_then(|_| ensure_solvent(vault, ledger));

    if let Err(err) = result {
        msg!("Exit of {} shares for {} assets reverted", shares, assets);
        snapshot.restore(vault, owner, allowance);
        return Err(err);
    }

    Ok(())
}

/// A caller acting on someone else's shares needs an allowance from them.
fn spend_allowance(
    caller: Pubkey,
    owner: &ShareAccount,
    allowance: Option<&mut ShareAllowance>,
    shares: u64,
) -> Result<()> {
    if caller == owner.owner {
        return Ok(());
    }

    let allowance = allowance.ok_or(VaultError::InsufficientAllowance)?;
    require!(
        allowance.vault == owner.vault
            && allowance.owner == owner.owner
            && allowance.spender == caller,
        VaultError::InsufficientAllowance
    );

    allowance.spend(shares)
}

fn ensure_solvent<L: AssetLedger>(vault: &Vault, ledger: &L) -> Result<()> {
    let held = ledger.balance_of(&ledger.vault_account())?;
    require!(held >= vault.total_assets, VaultError::VaultInsolvent);
    Ok(())
}
