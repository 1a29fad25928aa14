use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CATALOG_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_path.to_str(), Some("./data/products.json"));
    assert_eq!(cfg.cors_origins.len(), 4);
    assert!(cfg
        .cors_origins
        .contains(&"http://localhost:5173".to_string()));
    assert!(!cfg.allows_any_origin());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("CATALOG_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATALOG_BIND_ADDR"),
        "expected InvalidEnvVar(CATALOG_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_on_invalid_catalog_env() {
    let mut map = HashMap::new();
    map.insert("CATALOG_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATALOG_ENV"),
        "expected InvalidEnvVar(CATALOG_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_data_path_and_log_level() {
    let mut map = HashMap::new();
    map.insert("CATALOG_DATA_PATH", "/srv/catalog/products.json");
    map.insert("CATALOG_LOG_LEVEL", "debug,tower_http=info");
    map.insert("CATALOG_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_path.to_str(), Some("/srv/catalog/products.json"));
    assert_eq!(cfg.log_level, "debug,tower_http=info");
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn build_app_config_rejects_blank_data_path() {
    let mut map = HashMap::new();
    map.insert("CATALOG_DATA_PATH", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATALOG_DATA_PATH"),
        "expected InvalidEnvVar(CATALOG_DATA_PATH), got: {result:?}"
    );
}

#[test]
fn cors_origins_are_trimmed_and_split() {
    let mut map = HashMap::new();
    map.insert(
        "CATALOG_CORS_ORIGINS",
        " https://shop.example.com , ,https://admin.example.com",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.cors_origins,
        vec![
            "https://shop.example.com".to_string(),
            "https://admin.example.com".to_string()
        ]
    );
}

#[test]
fn cors_wildcard_allows_any_origin() {
    let mut map = HashMap::new();
    map.insert("CATALOG_CORS_ORIGINS", "*");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.allows_any_origin());
}

#[test]
fn cors_origins_empty_list_fails() {
    let mut map = HashMap::new();
    map.insert("CATALOG_CORS_ORIGINS", " , ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATALOG_CORS_ORIGINS"),
        "expected InvalidEnvVar(CATALOG_CORS_ORIGINS), got: {result:?}"
    );
}
