use anchor_lang::prelude::*;

use crate::error::VaultError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rounding {
    Floor,
    Ceiling,
}

/// Convert assets to shares at the current exchange rate.
///
/// Formula: shares = assets × total_shares / total_assets
///
/// An empty vault (no shares outstanding) converts 1:1 so the first depositor
/// bootstraps the rate.
pub fn convert_to_shares(
    assets: u64,
    total_assets: u64,
    total_shares: u64,
    rounding: Rounding,
) -> Result<u64> {
    if total_shares == 0 {
        return Ok(assets);
    }

    mul_div(assets, total_shares, total_assets, rounding)
}

/// Convert shares to assets at the current exchange rate.
///
/// Formula: assets = shares × total_assets / total_shares
pub fn convert_to_assets(
    shares: u64,
    total_assets: u64,
    total_shares: u64,
    rounding: Rounding,
) -> Result<u64> {
    if total_shares == 0 {
        return Ok(shares);
    }

    mul_div(shares, total_assets, total_shares, rounding)
}

/// Safe multiplication then division with configurable rounding.
///
/// Computes: (value × numerator) / denominator
/// Uses u128 intermediate to prevent overflow.
pub fn mul_div(value: u64, numerator: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    require!(denominator > 0, VaultError::DivisionByZero);

    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(VaultError::ArithmeticOverflow)?;

    let denom = denominator as u128;
    let result = match rounding {
        Rounding::Floor => product / denom,
        Rounding::Ceiling => {
            let quotient = product / denom;
            if product % denom == 0 {
                quotient
            } else {
                quotient + 1
            }
        }
    };

    u64::try_from(result).map_err(|_| error!(VaultError::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor() {
        assert_eq!(mul_div(100, 3, 2, Rounding::Floor).unwrap(), 150);
        // 100 * 1 / 3 = 33.3
        assert_eq!(mul_div(100, 1, 3, Rounding::Floor).unwrap(), 33);
    }

    #[test]
    fn test_mul_div_ceiling() {
        assert_eq!(mul_div(100, 3, 2, Rounding::Ceiling).unwrap(), 150);
        assert_eq!(mul_div(100, 1, 3, Rounding::Ceiling).unwrap(), 34);
        assert_eq!(mul_div(0, 7, 3, Rounding::Ceiling).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // u64::MAX * u64::MAX does not fit in u64 but the quotient does
        let result = mul_div(u64::MAX, u64::MAX, u64::MAX, Rounding::Floor).unwrap();
        assert_eq!(result, u64::MAX);
    }

    #[test]
    fn test_mul_div_result_overflow() {
        let err = mul_div(u64::MAX, 2, 1, Rounding::Floor).unwrap_err();
        assert_eq!(err, VaultError::ArithmeticOverflow.into());
    }

    #[test]
    fn test_division_by_zero() {
        let err = mul_div(100, 100, 0, Rounding::Floor).unwrap_err();
        assert_eq!(err, VaultError::DivisionByZero.into());
    }

    #[test]
    fn test_empty_vault_converts_one_to_one() {
        assert_eq!(convert_to_shares(1_000_000, 0, 0, Rounding::Floor).unwrap(), 1_000_000);
        assert_eq!(convert_to_assets(1_000_000, 0, 0, Rounding::Ceiling).unwrap(), 1_000_000);
    }

    #[test]
    fn test_one_to_one_rate() {
        assert_eq!(convert_to_shares(100, 500, 500, Rounding::Floor).unwrap(), 100);
        assert_eq!(convert_to_assets(100, 500, 500, Rounding::Floor).unwrap(), 100);
    }

    #[test]
    fn test_convert_proportional() {
        // 2 assets per share
        assert_eq!(convert_to_shares(100, 2_000, 1_000, Rounding::Floor).unwrap(), 50);
        assert_eq!(convert_to_assets(50, 2_000, 1_000, Rounding::Floor).unwrap(), 100);
    }

    #[test]
    fn test_small_deposit_rounds_to_zero() {
        // 1 asset into a pool worth 1000 assets per share
        let shares = convert_to_shares(1, 1_000_000, 1_000, Rounding::Floor).unwrap();
        assert_eq!(shares, 0);
    }

    #[test]
    fn test_rounding_favors_vault() {
        // 3 assets backing 2 shares
        let deposit_shares = convert_to_shares(10, 3, 2, Rounding::Floor).unwrap();
        let withdraw_shares = convert_to_shares(10, 3, 2, Rounding::Ceiling).unwrap();
        let redeem_assets = convert_to_assets(7, 3, 2, Rounding::Floor).unwrap();
        let mint_assets = convert_to_assets(7, 3, 2, Rounding::Ceiling).unwrap();

        assert_eq!(deposit_shares, 6);
        assert_eq!(withdraw_shares, 7);
        assert_eq!(redeem_assets, 10);
        assert_eq!(mint_assets, 11);
    }

    #[test]
    fn test_round_trip_never_creates_assets() {
        let states = [(1_000, 1_000), (1_001, 997), (7, 3), (999_999_937, 13), (5, 1_000_003)];
        for (total_assets, total_shares) in states {
            for assets in [1u64, 2, 3, 10, 99, 1_000, 123_457] {
                let shares =
                    convert_to_shares(assets, total_assets, total_shares, Rounding::Floor).unwrap();
                let back =
                    convert_to_assets(shares, total_assets, total_shares, Rounding::Floor).unwrap();
                assert!(back <= assets, "{assets} -> {shares} -> {back}");
            }
        }
    }

    #[test]
    fn test_max_values() {
        let large = u64::MAX / 2;
        let result = convert_to_shares(large, large, large, Rounding::Floor);
        assert_eq!(result.unwrap(), large);
    }
}
