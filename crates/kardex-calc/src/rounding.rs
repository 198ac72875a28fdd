//! 數值捨入

use rust_decimal::{Decimal, RoundingStrategy};

/// 金額小數位
pub const MONEY_DP: u32 = 2;

/// 週轉率小數位
pub const ROTATION_DP: u32 = 2;

/// 日均消耗小數位
pub const CONSUMPTION_DP: u32 = 4;

/// 覆蓋天數小數位
pub const COVERAGE_DP: u32 = 1;

/// 四捨五入（遠離零方向），冪等：`round(round(x)) == round(x)`
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// 金額捨入到 2 位
pub fn round_money(value: Decimal) -> Decimal {
    round_half_away(value, MONEY_DP)
}
