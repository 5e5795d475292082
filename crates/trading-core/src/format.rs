//! Display helpers shared by notifiers and render layers.

use rust_decimal::Decimal;

/// Render a price as dollars with two decimals and thousands separators.
pub fn format_price(price: f64) -> String {
    let Some(value) = Decimal::from_f64_retain(price) else {
        return format!("${price}");
    };
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(37050.5), "$37,050.50");
        assert_eq!(format_price(0.123456), "$0.12");
        assert_eq!(format_price(1234567.899), "$1,234,567.90");
        assert_eq!(format_price(999.994), "$999.99");
        assert_eq!(format_price(100.0), "$100.00");
    }

    #[test]
    fn test_format_price_sub_cent_and_negative() {
        // Banker's rounding on the exact decimal value
        assert_eq!(format!("{:.2}", dec!(0.125).round_dp(2)), "0.12");
        assert_eq!(format_price(0.004), "$0.00");
        assert_eq!(format_price(-1500.256), "-$1,500.26");
    }

    #[test]
    fn test_format_price_non_finite() {
        assert_eq!(format_price(f64::NAN), "$NaN");
    }
}
