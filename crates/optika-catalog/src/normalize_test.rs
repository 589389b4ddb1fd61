use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawItem {
    RawItem::from_value(value)
}

// -----------------------------------------------------------------------
// source kind detection
// -----------------------------------------------------------------------

#[test]
fn storefront_product_is_product() {
    let item = normalize_item(
        &raw(json!({"slug": "ray-ban-aviator", "title": "Aviator", "sku": "RB3025"})),
        "el",
    );
    assert_eq!(item.source_kind, SourceKind::Product);
}

#[test]
fn row_with_variant_label_is_lens_variant() {
    let item = normalize_item(
        &raw(json!({"slug": "acuvue-oasys", "variantLabel": "-2.00"})),
        "el",
    );
    assert_eq!(item.source_kind, SourceKind::LensVariant);
    assert_eq!(item.variant_label.as_deref(), Some("-2.00"));
}

#[test]
fn lens_variant_label_composed_from_attributes() {
    let item = normalize_item(
        &raw(json!({"title": "Dailies Total1", "attributes": {"power": "-1.25", "packSize": 30}})),
        "el",
    );
    assert_eq!(item.source_kind, SourceKind::LensVariant);
    assert_eq!(item.variant_label.as_deref(), Some("-1.25 / 30"));
}

#[test]
fn row_with_only_sku_and_name_is_erp_row() {
    let item = normalize_item(
        &raw(json!({"sku": 100_234, "name": "OAKLEY HOLBROOK 9102", "price": "145,00"})),
        "el",
    );
    assert_eq!(item.source_kind, SourceKind::ErpRow);
    assert_eq!(item.identity.sku.as_deref(), Some("100234"));
    assert_eq!(item.title.as_deref(), Some("OAKLEY HOLBROOK 9102"));
    assert_eq!(item.price, Some(145.0));
}

// -----------------------------------------------------------------------
// field resolution
// -----------------------------------------------------------------------

#[test]
fn identity_reads_top_level_and_attribute_candidates() {
    let item = normalize_item(
        &raw(json!({
            "slug": " ",
            "id": 42,
            "_id": "65f0c0ffee",
            "barcode": "5201234567890",
            "attributes": {"slug": "attr-slug", "sku": "A-1", "barcode": "B-1"}
        })),
        "el",
    );
    assert!(item.identity.slug.is_none());
    assert_eq!(item.identity.id.as_deref(), Some("42"));
    assert_eq!(item.identity.legacy_id.as_deref(), Some("65f0c0ffee"));
    assert_eq!(item.identity.attr_slug.as_deref(), Some("attr-slug"));
    assert_eq!(item.identity.attr_sku.as_deref(), Some("A-1"));
    assert_eq!(item.identity.attr_barcode.as_deref(), Some("B-1"));
    assert_eq!(item.identity.barcode.as_deref(), Some("5201234567890"));
}

#[test]
fn brand_and_color_fall_back_to_attributes() {
    let item = normalize_item(
        &raw(json!({"attributes": {"brand": "Persol", "color": "Havana"}})),
        "el",
    );
    assert_eq!(item.brand.as_deref(), Some("Persol"));
    assert_eq!(item.color.as_deref(), Some("Havana"));
}

#[test]
fn top_level_brand_wins_over_attribute() {
    let item = normalize_item(
        &raw(json!({"brand": "Ray-Ban", "attributes": {"brand": "Luxottica"}})),
        "el",
    );
    assert_eq!(item.brand.as_deref(), Some("Ray-Ban"));
}

#[test]
fn category_fields_and_tags_are_collected() {
    let item = normalize_item(
        &raw(json!({
            "category": "sunglasses",
            "attributes": {"category": "stock-sunglasses", "tags": ["summer", "", "polarized"]}
        })),
        "el",
    );
    assert_eq!(item.category.as_deref(), Some("sunglasses"));
    assert_eq!(item.attr_category.as_deref(), Some("stock-sunglasses"));
    assert_eq!(item.tags, vec!["summer", "polarized"]);
}

#[test]
fn audiences_are_merged_in_lookup_order() {
    let item = normalize_item(
        &raw(json!({
            "audience": "women",
            "attributes": {"audience": "unisex", "audiences": ["kids", "teens"]}
        })),
        "el",
    );
    assert_eq!(item.audiences, vec!["women", "unisex", "kids", "teens"]);
}

#[test]
fn localized_title_uses_requested_locale() {
    let item = normalize_item(
        &raw(json!({"title": {"el": "Γυαλιά ηλίου Aviator", "en": "Aviator sunglasses"}})),
        "en",
    );
    assert_eq!(item.title.as_deref(), Some("Aviator sunglasses"));
}

#[test]
fn created_at_prefers_camel_case_then_snake_case() {
    let camel = normalize_item(
        &raw(json!({"createdAt": 2_000, "created_at": 1_000})),
        "el",
    );
    assert_eq!(camel.created_at_ms, 2_000);

    let snake = normalize_item(&raw(json!({"created_at": "1970-01-01T00:00:01Z"})), "el");
    assert_eq!(snake.created_at_ms, 1_000);
}

#[test]
fn unparseable_created_at_defaults_to_zero() {
    let item = normalize_item(&raw(json!({"createdAt": "soon"})), "el");
    assert_eq!(item.created_at_ms, 0);
}

#[test]
fn prices_are_parsed_independently() {
    let item = normalize_item(
        &raw(json!({"price": "120.00", "discountPrice": 99})),
        "el",
    );
    assert_eq!(item.price, Some(120.0));
    assert_eq!(item.discount_price, Some(99.0));
}

#[test]
fn empty_record_normalizes_without_panicking() {
    let item = normalize_item(&RawItem::default(), "el");
    assert_eq!(item.source_kind, SourceKind::Product);
    assert!(item.title.is_none());
    assert!(item.identity.in_priority_order().iter().all(Option::is_none));
}
