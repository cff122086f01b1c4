pub const VAULT_SEED: &[u8] = b"vault";
pub const SHARES_SEED: &[u8] = b"shares";
pub const ALLOWANCE_SEED: &[u8] = b"allowance";

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
