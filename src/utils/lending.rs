// src/utils/lending.rs
use serde::{Deserialize, Serialize};

use crate::utils::token_conversion::{format_balance, BaseUnitAmount, FormatOptions};

/// Lending positions are denominated in 18-decimal note units.
pub const POSITION_DECIMALS: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LendingTxType {
    Supply,
    Withdraw,
    Borrow,
    Repay,
    Collateralize,
    Decollateralize,
}

impl LendingTxType {
    /// Transaction that flips the collateral flag of a market.
    pub fn collateral_toggle(is_collateral: bool) -> Self {
        if is_collateral {
            LendingTxType::Decollateralize
        } else {
            LendingTxType::Collateralize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingToken {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CTokenUserDetails {
    pub balance_of_c_token: BaseUnitAmount,
    pub balance_of_underlying: BaseUnitAmount,
    pub borrow_balance: BaseUnitAmount,
    pub rewards: BaseUnitAmount,
    pub is_collateral: bool,
    pub supply_balance_in_underlying: BaseUnitAmount,
    pub underlying_allowance: BaseUnitAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CToken {
    pub address: String,
    pub symbol: String,
    pub underlying: UnderlyingToken,
    #[serde(default)]
    pub user_details: Option<CTokenUserDetails>,
}

/// Withdraw and borrow ceilings in underlying base units, produced by the
/// position calculator for the user's current liquidity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LendingLimits {
    pub withdraw: BaseUnitAmount,
    pub borrow: BaseUnitAmount,
}

/// Largest amount the user can enter for `tx_type`, in base units.
///
/// Withdraw and borrow come from `limits` even for markets the user has never
/// entered; supply and repay need the user's balances.
pub fn max_base_units(
    ctoken: &CToken,
    tx_type: LendingTxType,
    limits: &LendingLimits,
) -> BaseUnitAmount {
    let details = ctoken.user_details.as_ref();
    match tx_type {
        LendingTxType::Withdraw => limits.withdraw.clone(),
        LendingTxType::Borrow => limits.borrow.clone(),
        LendingTxType::Supply => details
            .map(|d| d.balance_of_underlying.clone())
            .unwrap_or_default(),
        LendingTxType::Repay => details
            .map(|d| d.borrow_balance.clone().min(d.balance_of_underlying.clone()))
            .unwrap_or_default(),
        LendingTxType::Collateralize | LendingTxType::Decollateralize => BaseUnitAmount::zero(),
    }
}

/// The "max" button value: [`max_base_units`] rendered at full token precision
/// so it can be fed straight back into the amount input.
pub fn max_input_amount(
    ctoken: &CToken,
    tx_type: LendingTxType,
    limits: &LendingLimits,
) -> String {
    let decimals = ctoken.underlying.decimals;
    let raw = max_base_units(ctoken, tx_type, limits);
    format_balance(&raw, decimals, &FormatOptions::default().with_precision(decimals))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPosition {
    pub total_borrow: BaseUnitAmount,
    pub total_supply: BaseUnitAmount,
    pub liquidity: BaseUnitAmount,
    pub shortfall: BaseUnitAmount,
    pub total_rewards: BaseUnitAmount,
    pub avg_apr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub total_borrow: String,
    pub total_supply: String,
    pub liquidity: String,
    pub shortfall: String,
    pub total_rewards: String,
    pub avg_apr: String,
}

/// Display figures for a user position: totals grouped with two decimals,
/// everything else at dynamic precision.
pub fn summarize_position(position: &UserPosition) -> PositionSummary {
    let totals = FormatOptions::default().commified().with_precision(2);
    let dynamic = FormatOptions::default();
    PositionSummary {
        total_borrow: format_balance(&position.total_borrow, POSITION_DECIMALS, &totals),
        total_supply: format_balance(&position.total_supply, POSITION_DECIMALS, &totals),
        liquidity: format_balance(&position.liquidity, POSITION_DECIMALS, &dynamic),
        shortfall: format_balance(&position.shortfall, POSITION_DECIMALS, &dynamic),
        total_rewards: format_balance(&position.total_rewards, POSITION_DECIMALS, &dynamic),
        avg_apr: position.avg_apr.clone(),
    }
}
