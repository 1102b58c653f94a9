//! 巴西格式的數值解析與金額格式化。
//!
//! 兩個函式都是全域的：解析失敗時回傳 0，不會把錯誤拋給呼叫端。

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub const CURRENCY_PREFIX: &str = "R$ ";

// 千分位暫存字元，不可與 '.' 或 ',' 相同
const GROUPING_PLACEHOLDER: char = 'X';

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// 解析使用者輸入的單價，例如 `"12,50"`。
///
/// 只把第一個逗號換成小數點，再以一般十進位格式解析，
/// 四捨五入到兩位小數 (half away from zero)。空字串、非數字、多個分隔符號
/// (`"1,2,3"`、`"1.234,56"`) 以及負數都得到 `0.00`。
pub fn parse_price(text: &str) -> Decimal {
    let normalized = text.trim().replacen(',', ".", 1);

    let parsed = Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized));

    match parsed {
        Ok(value) if value.is_sign_negative() => {
            tracing::debug!("Negative price '{}' coerced to zero", text);
            Decimal::ZERO
        }
        Ok(value) => round_cents(value),
        Err(_) => {
            tracing::debug!("Unparseable price '{}' coerced to zero", text);
            Decimal::ZERO
        }
    }
}

/// 兩位小數、千分位分組、巴西分隔符號，不含貨幣前綴
pub fn format_decimal(value: Decimal) -> String {
    let rounded = round_cents(value);

    // 整數部分很長時 rescale 無法補足小數位，自行補零到兩位
    let text = rounded.abs().to_string();
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = format!("{:0<2}", frac);

    // 先產生 "1,234.50" 形式
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let provisional = format!("{}.{}", grouped, frac_part);

    // 兩段式替換：',' -> 暫存字元，'.' -> ','，暫存字元 -> '.'
    let swapped = provisional
        .replace(',', &GROUPING_PLACEHOLDER.to_string())
        .replace('.', ",")
        .replace(GROUPING_PLACEHOLDER, ".");

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", swapped)
    } else {
        swapped
    }
}

/// 例如 `1234.5` -> `"R$ 1.234,50"`
pub fn format_currency(value: Decimal) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_decimal(value))
}
