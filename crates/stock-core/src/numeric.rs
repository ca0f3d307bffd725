//! 安全數值轉換

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 取出可選數值，缺漏時回傳預設值
///
/// 盤點資料本質上是逐步輸入的，未填寫的欄位一律視為預設值（通常為 0），
/// 不向外拋出錯誤。
pub fn decimal_or(value: Option<Decimal>, fallback: Decimal) -> Decimal {
    value.unwrap_or(fallback)
}

/// 從寬鬆類型的文件欄位解析數值
///
/// 文件儲存層讀回的欄位可能是數字、數字字串或任意其他值；
/// 無法解析（包含非有限浮點數）時回傳預設值，永不 panic。
pub fn decimal_from_value(value: &serde_json::Value, fallback: Decimal) -> Decimal {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                // as_f64 對 JSON 數字必有值；NaN/Infinity 無法表示為 JSON，
                // 但 from_f64 仍會擋下超出範圍的值
                n.as_f64()
                    .and_then(Decimal::from_f64)
                    .unwrap_or(fallback)
            }
        }
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().unwrap_or(fallback),
        _ => fallback,
    }
}

/// 安全除法：分母為零時回傳零
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// 四捨五入到整數毫升（0.5 進位）
pub fn round_half_up_ml(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_decimal_or() {
        assert_eq!(decimal_or(Some(Decimal::from(5)), Decimal::ZERO), Decimal::from(5));
        assert_eq!(decimal_or(None, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(decimal_or(None, Decimal::from(7)), Decimal::from(7));
    }

    #[rstest]
    #[case(serde_json::json!(700), "700")]
    #[case(serde_json::json!(12.5), "12.5")]
    #[case(serde_json::json!("40"), "40")]
    #[case(serde_json::json!("  2.75  "), "2.75")]
    #[case(serde_json::json!("not a number"), "0")]
    #[case(serde_json::json!(null), "0")]
    #[case(serde_json::json!({"ml": 700}), "0")]
    fn test_decimal_from_value(#[case] value: serde_json::Value, #[case] expected: &str) {
        let expected: Decimal = expected.parse().unwrap();
        assert_eq!(decimal_from_value(&value, Decimal::ZERO), expected);
    }

    #[test]
    fn test_decimal_from_value_fallback() {
        let fallback = Decimal::from(99);
        assert_eq!(decimal_from_value(&serde_json::json!(true), fallback), fallback);
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(
            safe_div(Decimal::from(10), Decimal::from(4)),
            "2.5".parse().unwrap()
        );
        // 分母為零不得 panic
        assert_eq!(safe_div(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[rstest]
    #[case("199.8", "200")]
    #[case("133.2", "133")]
    #[case("0.5", "1")]
    #[case("-0.5", "-1")]
    #[case("42", "42")]
    fn test_round_half_up_ml(#[case] input: &str, #[case] expected: &str) {
        let input: Decimal = input.parse().unwrap();
        let expected: Decimal = expected.parse().unwrap();
        assert_eq!(round_half_up_ml(input), expected);
    }
}
