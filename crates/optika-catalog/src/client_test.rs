use super::*;

fn client(api_base: &str) -> CatalogClient {
    CatalogClient::new(api_base, 5, "optika-test/0.1").expect("valid test client")
}

fn params(categories: &[&str], audiences: &[&str]) -> CoarseParams {
    CoarseParams {
        categories: categories.iter().map(|s| (*s).to_string()).collect(),
        audiences: audiences.iter().map(|s| (*s).to_string()).collect(),
    }
}

#[test]
fn listing_url_without_coarse_filters() {
    let url = client("https://api.optika.test/api").listing_url(0, 12, &CoarseParams::default());
    assert_eq!(
        url,
        "https://api.optika.test/api/shop-products?limit=12&offset=0"
    );
}

#[test]
fn listing_url_repeats_category_and_audience() {
    let url = client("https://api.optika.test/api").listing_url(
        24,
        60,
        &params(&["sunglasses", "sun-glasses"], &["women", "unisex"]),
    );
    assert_eq!(
        url,
        "https://api.optika.test/api/shop-products?limit=60&offset=24&category=sunglasses&category=sun-glasses&audience=women&audience=unisex"
    );
}

#[test]
fn listing_url_handles_trailing_slash_and_bare_host() {
    let with_slash = client("https://api.optika.test/api/").listing_url(0, 12, &CoarseParams::default());
    assert_eq!(
        with_slash,
        "https://api.optika.test/api/shop-products?limit=12&offset=0"
    );

    let bare = client("https://api.optika.test").listing_url(0, 12, &CoarseParams::default());
    assert_eq!(bare, "https://api.optika.test/shop-products?limit=12&offset=0");
}

#[test]
fn listing_url_encodes_non_ascii_aliases() {
    let url = client("https://api.optika.test").listing_url(0, 12, &params(&["γυαλιά ηλίου"], &[]));
    assert!(url.contains("category=%CE%B3"), "unexpected url: {url}");
    assert!(!url.contains(' '));
}

#[test]
fn new_rejects_invalid_api_base() {
    let err = CatalogClient::new("not-a-url", 5, "ua").unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidApiBase { .. }),
        "expected InvalidApiBase, got: {err:?}"
    );
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = CatalogClient::new("ftp://api.optika.test", 5, "ua").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidApiBase { ref reason, .. } if reason.contains("ftp")));
}

#[test]
fn parse_listing_body_accepts_array() {
    let rows = parse_listing_body(r#"[{"slug": "a"}, {"slug": "b"}, 7]"#).unwrap();
    assert_eq!(rows.len(), 3, "non-object elements still count toward page length");
}

#[test]
fn parse_listing_body_rejects_object() {
    let err = parse_listing_body(r#"{"items": []}"#).unwrap_err();
    assert!(err.contains("an object"));
}

#[test]
fn parse_listing_body_rejects_invalid_json() {
    assert!(parse_listing_body("<html>").is_err());
}
