use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// parse_price
// -----------------------------------------------------------------------

#[test]
fn price_from_json_number() {
    assert_eq!(parse_price(&json!(129)), Some(129.0));
    assert_eq!(parse_price(&json!(89.9)), Some(89.9));
}

#[test]
fn price_from_dot_decimal_string() {
    assert_eq!(parse_price(&json!("89.90")), Some(89.9));
}

#[test]
fn price_from_comma_decimal_string() {
    assert_eq!(parse_price(&json!("89,90")), Some(89.9));
}

#[test]
fn price_with_currency_and_thousands_separator() {
    assert_eq!(parse_price(&json!("€ 1.299,00")), Some(1299.0));
    assert_eq!(parse_price(&json!("1,299.50 EUR")), Some(1299.5));
}

#[test]
fn price_rejects_non_numeric() {
    assert_eq!(parse_price(&json!("on request")), None);
    assert_eq!(parse_price(&json!(null)), None);
    assert_eq!(parse_price(&json!([12])), None);
}

#[test]
fn price_keeps_zero_and_negative_values() {
    assert_eq!(parse_price(&json!("0")), Some(0.0));
    assert_eq!(parse_price(&json!(-3)), Some(-3.0));
}

// -----------------------------------------------------------------------
// parse_epoch_millis
// -----------------------------------------------------------------------

#[test]
fn epoch_from_number() {
    assert_eq!(
        parse_epoch_millis(&json!(1_700_000_000_000_i64)),
        Some(1_700_000_000_000)
    );
}

#[test]
fn epoch_from_numeric_string() {
    assert_eq!(
        parse_epoch_millis(&json!("1700000000000")),
        Some(1_700_000_000_000)
    );
}

#[test]
fn epoch_from_rfc3339() {
    assert_eq!(
        parse_epoch_millis(&json!("1970-01-01T00:00:01Z")),
        Some(1_000)
    );
    assert_eq!(
        parse_epoch_millis(&json!("1970-01-01T02:00:00+02:00")),
        Some(0)
    );
}

#[test]
fn epoch_from_naive_datetime() {
    assert_eq!(
        parse_epoch_millis(&json!("1970-01-02 00:00:00")),
        Some(86_400_000)
    );
    assert_eq!(
        parse_epoch_millis(&json!("1970-01-02T00:00:00.500")),
        Some(86_400_500)
    );
}

#[test]
fn epoch_from_plain_date() {
    assert_eq!(parse_epoch_millis(&json!("1970-01-03")), Some(172_800_000));
}

#[test]
fn epoch_rejects_garbage() {
    assert_eq!(parse_epoch_millis(&json!("last tuesday")), None);
    assert_eq!(parse_epoch_millis(&json!("")), None);
    assert_eq!(parse_epoch_millis(&json!(null)), None);
}

// -----------------------------------------------------------------------
// resolve_title
// -----------------------------------------------------------------------

#[test]
fn title_plain_string() {
    assert_eq!(
        resolve_title(&json!("Aviator Classic"), "el").as_deref(),
        Some("Aviator Classic")
    );
}

#[test]
fn title_prefers_requested_locale() {
    let title = json!({"en": "Sunglasses", "el": "Γυαλιά ηλίου"});
    assert_eq!(resolve_title(&title, "el").as_deref(), Some("Γυαλιά ηλίου"));
}

#[test]
fn title_falls_back_to_english() {
    let title = json!({"en": "Sunglasses", "el": ""});
    assert_eq!(resolve_title(&title, "el").as_deref(), Some("Sunglasses"));
}

#[test]
fn title_falls_back_to_any_value() {
    let title = json!({"de": "Sonnenbrille"});
    assert_eq!(resolve_title(&title, "el").as_deref(), Some("Sonnenbrille"));
}

#[test]
fn title_missing() {
    assert!(resolve_title(&json!(null), "el").is_none());
    assert!(resolve_title(&json!({}), "el").is_none());
}
