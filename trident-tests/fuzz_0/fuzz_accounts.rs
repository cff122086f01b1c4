use trident_fuzz::fuzzing::*;

/// Storage for all account addresses used in fuzz testing.
///
/// Docs: https://ackee.xyz/trident/docs/latest/trident-api-macro/trident-types/fuzz-accounts/
#[derive(Default)]
pub struct AccountAddresses {
    pub payer: AddressStorage,

    pub vault: AddressStorage,

    pub asset_mint: AddressStorage,

    pub asset_vault: AddressStorage,

    pub caller: AddressStorage,

    pub caller_asset_account: AddressStorage,

    pub receiver: AddressStorage,

    pub receiver_shares: AddressStorage,

    pub receiver_asset_account: AddressStorage,

    pub owner_shares: AddressStorage,

    pub allowance: AddressStorage,

    pub asset_token_program: AddressStorage,

    pub associated_token_program: AddressStorage,

    pub system_program: AddressStorage,
}
