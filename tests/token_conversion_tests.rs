#[cfg(test)]
mod tests {
    use balance_api::{add_token_balances, format_balance, parse_units, AmountError, BaseUnitAmount, FormatOptions};
    use serde_json::json;

    fn units(amount: &str, decimals: u32) -> String {
        parse_units(amount, decimals).unwrap().to_string()
    }

    fn fmt(amount: &str, decimals: u32) -> String {
        format_balance(amount, decimals, &FormatOptions::default())
    }

    // ========== Tests for `parse_units()` - Valid inputs ==========

    #[test]
    fn test_parse_units_truncates_instead_of_rounding() {
        assert_eq!(units("1.23456", 2), "123");
        assert_eq!(units("1.999", 0), "1");
        assert_eq!(units("0.129", 2), "12");
    }

    #[test]
    fn test_parse_units_whole_number() {
        assert_eq!(units("100", 18), "100000000000000000000");
    }

    #[test]
    fn test_parse_units_decimal() {
        assert_eq!(units("1.5", 18), "1500000000000000000");
        assert_eq!(units("1.5", 6), "1500000");
    }

    #[test]
    fn test_parse_units_small_decimal() {
        assert_eq!(units("0.001", 18), "1000000000000000");
    }

    #[test]
    fn test_parse_units_zero() {
        assert_eq!(units("0", 18), "0");
        assert_eq!(units("0.0", 18), "0");
    }

    #[test]
    fn test_parse_units_leading_zeros() {
        assert_eq!(units("0001.5", 18), "1500000000000000000");
    }

    #[test]
    fn test_parse_units_bare_point_sides() {
        assert_eq!(units(".5", 6), "500000");
        assert_eq!(units("5.", 6), "5000000");
    }

    #[test]
    fn test_parse_units_beyond_native_integer_range() {
        assert_eq!(
            units("123456789012345678901234567890.123456789012345678901", 18),
            "123456789012345678901234567890123456789012345678"
        );
    }

    #[test]
    fn test_parse_units_never_uses_exponent_notation() {
        let raw = units("1000000000000000000000000000000000000", 18);
        assert!(!raw.contains('e') && !raw.contains('E'));
        assert_eq!(raw.len(), 37 + 18);
    }

    // ========== Tests for `parse_units()` - Error cases ==========

    #[test]
    fn test_parse_units_rejects_empty_and_non_numeric() {
        for bad in ["", "abc", ".", "1.2.3", "-1", "1e5", " 1", "1,000", "0x10"] {
            let err = parse_units(bad, 18).unwrap_err();
            assert!(
                matches!(err, AmountError::InvalidAmount { .. }),
                "{:?} should be invalid, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_parse_units_error_names_operation() {
        let err = parse_units("abc", 6).unwrap_err();
        assert!(err.to_string().starts_with("parse_units:"));
        assert!(err.to_string().contains("abc"));
    }

    // ========== Tests for `format_balance()` ==========

    #[test]
    fn test_format_non_positive_is_zero() {
        assert_eq!(fmt("0", 18), "0");
        assert_eq!(fmt("-5", 18), "0");
        assert_eq!(fmt("-5000000000000000000", 18), "0");
    }

    #[test]
    fn test_format_unparsable_is_zero() {
        assert_eq!(fmt("abc", 18), "0");
        assert_eq!(fmt("", 18), "0");
    }

    #[test]
    fn test_format_commify_with_fixed_precision() {
        let options = FormatOptions::default().commified().with_precision(2);
        assert_eq!(format_balance("1234567000000000000000", 18, &options), "1,234.56");
    }

    #[test]
    fn test_format_dynamic_precision_small_values_keep_more_digits() {
        assert_eq!(fmt("500000000000000000", 18), "0.5");
        assert_eq!(fmt("123456000000000000", 18), "0.123");
        assert_eq!(fmt("1234567", 6), "1.23");
        assert_eq!(fmt("12345678", 6), "12.3");
        assert_eq!(fmt("5000123000000000000000", 18), "5000");
    }

    #[test]
    fn test_format_dynamic_precision_at_powers_of_ten() {
        assert_eq!(fmt("1000000000", 6), "1000");
        assert_eq!(fmt("100", 2), "1");
        assert_eq!(fmt("10000", 6), "0.01");
        assert_eq!(fmt("9999", 6), "0.00999");
    }

    #[test]
    fn test_format_dynamic_precision_clamped_to_decimals() {
        assert_eq!(fmt("1", 18), "0.000000000000000001");
        assert_eq!(fmt("10000", 18), "0.00000000000001");
    }

    #[test]
    fn test_format_explicit_precision_clamped_to_decimals() {
        let options = FormatOptions::default().with_precision(5);
        assert_eq!(format_balance("123456", 2, &options), "1234.56");
    }

    #[test]
    fn test_format_zero_precision_drops_point() {
        let options = FormatOptions::default().with_precision(0);
        assert_eq!(format_balance("1999", 3, &options), "1");
    }

    #[test]
    fn test_format_drops_trailing_zeros() {
        let options = FormatOptions::default().with_precision(18);
        assert_eq!(format_balance("1500000000000000000", 18, &options), "1.5");
    }

    #[test]
    fn test_format_symbol_appended_after_space() {
        let options = FormatOptions::default().with_symbol("USDC");
        assert_eq!(format_balance("1500000", 6, &options), "1.5 USDC");

        let empty = FormatOptions::default().with_symbol("");
        assert_eq!(format_balance("1500000", 6, &empty), "1.5");
    }

    #[test]
    fn test_format_commify_only_touches_integer_part() {
        let options = FormatOptions::default().commified().with_precision(6);
        let formatted = format_balance("1234567123456789", 6, &options);
        assert_eq!(formatted, "1,234,567,123.456789");
        let (_, fraction) = formatted.split_once('.').unwrap();
        assert!(!fraction.contains(','));
    }

    #[test]
    fn test_format_large_values_stay_plain() {
        let raw = format!("1{}", "0".repeat(40));
        let formatted = fmt(&raw, 18);
        assert_eq!(formatted, format!("1{}", "0".repeat(22)));
        assert!(!formatted.contains('e'));
    }

    #[test]
    fn test_format_accepts_base_unit_amount() {
        let amount = BaseUnitAmount::from(1_500_000u64);
        assert_eq!(format_balance(&amount, 6, &FormatOptions::default()), "1.5");
    }

    #[test]
    fn test_format_then_parse_recovers_base_units() {
        let cases = [
            ("1", 18),
            ("1500000000000000000", 18),
            ("123456789012345678901234567890", 18),
            ("1000000", 6),
            ("999999", 6),
            ("42", 0),
            ("0", 6),
        ];
        for (raw, decimals) in cases {
            let options = FormatOptions::default().with_precision(decimals);
            let displayed = format_balance(raw, decimals, &options);
            assert_eq!(units(&displayed, decimals), raw, "round trip of {} at {}", raw, decimals);
        }
    }

    // ========== Tests for `add_token_balances()` ==========

    #[test]
    fn test_add_token_balances() {
        assert_eq!(add_token_balances("100", "200"), "300");
        assert_eq!(
            add_token_balances("99999999999999999999999999999999", "1"),
            "100000000000000000000000000000000"
        );
    }

    #[test]
    fn test_add_token_balances_truncates_fractions() {
        assert_eq!(add_token_balances("1.5", "2"), "3");
    }

    #[test]
    fn test_add_token_balances_falls_back_to_zero() {
        assert_eq!(add_token_balances("bad", "200"), "0");
        assert_eq!(add_token_balances("100", ""), "0");
    }

    // ========== Tests for `BaseUnitAmount` ==========

    #[test]
    fn test_base_unit_amount_from_str() {
        assert_eq!("12".parse::<BaseUnitAmount>().unwrap(), BaseUnitAmount::from(12u64));
        assert!("-1".parse::<BaseUnitAmount>().is_err());
        assert!("1.0".parse::<BaseUnitAmount>().is_err());
        assert!("".parse::<BaseUnitAmount>().is_err());
    }

    #[test]
    fn test_base_unit_amount_serde() {
        let from_string: BaseUnitAmount = serde_json::from_value(json!("123")).unwrap();
        let from_number: BaseUnitAmount = serde_json::from_value(json!(123)).unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(serde_json::to_value(&from_string).unwrap(), json!("123"));
        assert!(serde_json::from_value::<BaseUnitAmount>(json!("abc")).is_err());
    }
}
