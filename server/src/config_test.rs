use super::*;

#[test]
fn parse_port_defaults_when_unset() {
    assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
}

#[test]
fn parse_port_accepts_number() {
    assert_eq!(parse_port(Some("8080")).unwrap(), 8080);
}

#[test]
fn parse_port_rejects_garbage() {
    let err = parse_port(Some("eighty")).unwrap_err().to_string();
    assert!(err.contains("invalid PORT"));
    assert!(err.contains("eighty"));
}

#[test]
fn parse_port_rejects_out_of_range() {
    assert!(parse_port(Some("70000")).is_err());
}

#[test]
fn base_url_strips_trailing_slash() {
    assert_eq!(base_url(Some("http://127.0.0.1:9000/".into()), DEFAULT_GEOAPIFY_BASE_URL), "http://127.0.0.1:9000");
}

#[test]
fn base_url_falls_back_to_default() {
    assert_eq!(base_url(None, DEFAULT_UNSPLASH_BASE_URL), DEFAULT_UNSPLASH_BASE_URL);
}

// =============================================================================
// env_non_empty: unique var names so parallel tests do not race.
// =============================================================================

#[test]
fn env_non_empty_unset_returns_none() {
    assert_eq!(env_non_empty("__WAYFARER_TEST_SURELY_UNSET_31__"), None);
}

#[test]
fn env_non_empty_blank_returns_none() {
    let key = "__WAYFARER_TEST_BLANK_32__";
    unsafe { std::env::set_var(key, "   ") };
    assert_eq!(env_non_empty(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_non_empty_trims_value() {
    let key = "__WAYFARER_TEST_TRIM_33__";
    unsafe { std::env::set_var(key, "  secret \n") };
    assert_eq!(env_non_empty(key).as_deref(), Some("secret"));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn default_upstream_urls_point_at_providers() {
    let urls = UpstreamUrls::default();
    assert_eq!(urls.geoapify, "https://api.geoapify.com");
    assert_eq!(urls.unsplash, "https://api.unsplash.com");
}

#[test]
fn default_public_dir_is_inside_crate() {
    assert!(default_public_dir().ends_with("public"));
}
