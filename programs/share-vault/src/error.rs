use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Operation would create zero shares")]
    ZeroShares,

    #[msg("Operation would return zero assets")]
    ZeroAssets,

    #[msg("Insufficient share allowance from owner")]
    InsufficientAllowance,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Vault totals are inconsistent (shares and assets must be empty together)")]
    InvalidVaultState,

    #[msg("Vault asset balance does not cover total assets")]
    VaultInsolvent,

    #[msg("Ledger account is not part of this transfer")]
    InvalidLedgerAccount,

    #[msg("Share name exceeds 32 bytes")]
    NameTooLong,

    #[msg("Share symbol exceeds 10 bytes")]
    SymbolTooLong,

    #[msg("Cannot transfer shares to the same account")]
    SelfTransfer,

    #[msg("Assets cannot be paid out to the vault's own asset account")]
    VaultAsReceiver,
}
