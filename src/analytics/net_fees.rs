use rust_decimal::{Decimal, RoundingStrategy};

/// 扣除費用後淨額
pub fn net_after_fees(net_total: Decimal, stripe_fee: Decimal) -> Decimal {
    net_total - stripe_fee
}

/// 金額顯示字串：零顯示 `-`，其餘為貨幣符號加兩位小數
///
/// ```
/// use rust_decimal_macros::dec;
/// use stripe_fee_analytics::analytics::display_amount;
///
/// assert_eq!(display_amount(dec!(96.8), "$"), "$96.80");
/// assert_eq!(display_amount(dec!(-1.5), "$"), "-$1.50");
/// assert_eq!(display_amount(dec!(0), "$"), "-");
/// ```
pub fn display_amount(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "-".to_string();
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{}{}{:.2}", sign, currency_symbol, rounded.abs())
}

/// 淨額顯示字串，費用或結果為零時顯示 `-`
pub fn display_net_after_fees(net_total: Decimal, stripe_fee: Decimal, currency_symbol: &str) -> String {
    if stripe_fee.is_zero() {
        return "-".to_string();
    }

    display_amount(net_after_fees(net_total, stripe_fee), currency_symbol)
}
