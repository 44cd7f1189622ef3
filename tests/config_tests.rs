// Tests for layered configuration loading
//
// Store credentials are injected through `load_with_env` so tests never touch
// the process environment.

use pet_relay::config::{Config, StoreBackend, STORE_KEY_ENV, STORE_URL_ENV};
use pet_relay::store;
use std::io::Write;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");

    let cfg = Config::load_with_env(missing.to_str().unwrap(), no_env).unwrap();

    assert_eq!(cfg.service.name, "pet-relay");
    assert_eq!(cfg.service.http.bind, "0.0.0.0");
    assert_eq!(cfg.service.http.port, 8787);
    assert_eq!(cfg.store.backend, StoreBackend::Postgrest);
    assert_eq!(cfg.store.table, "pets");
    assert_eq!(cfg.store.timeout_secs, 10);
    assert!(cfg.store.url.is_none());
    assert!(cfg.store.service_role_key.is_none());
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[service.http]
port = 9100

[store]
backend = "memory"
table = "pets_staging"
"#
    )
    .unwrap();

    let cfg = Config::load_with_env(file.path().to_str().unwrap(), no_env).unwrap();

    assert_eq!(cfg.service.http.port, 9100);
    assert_eq!(cfg.service.http.bind, "0.0.0.0", "unset keys keep defaults");
    assert_eq!(cfg.store.backend, StoreBackend::Memory);
    assert_eq!(cfg.store.table, "pets_staging");
}

#[test]
fn test_credentials_come_from_environment() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[store]
url = "https://from-file.example"
"#
    )
    .unwrap();

    let cfg = Config::load_with_env(file.path().to_str().unwrap(), |key| match key {
        k if k == STORE_URL_ENV => Some("https://project.supabase.co".to_string()),
        k if k == STORE_KEY_ENV => Some("service-role".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(cfg.store.url.as_deref(), Some("https://project.supabase.co"));
    assert_eq!(cfg.store.service_role_key.as_deref(), Some("service-role"));
}

#[test]
fn test_debug_output_redacts_key() {
    let cfg = Config::load_with_env("does/not/exist", |key| {
        (key == STORE_KEY_ENV).then(|| "super-secret".to_string())
    })
    .unwrap();

    let rendered = format!("{:?}", cfg.store);
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_invalid_backend_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[store]\nbackend = \"sqlite\"").unwrap();

    assert!(Config::load_with_env(file.path().to_str().unwrap(), no_env).is_err());
}

#[test]
fn test_postgrest_backend_requires_credentials() {
    let cfg = Config::load_with_env("does/not/exist", no_env).unwrap();
    let err = store::connect(&cfg.store).err().unwrap();
    assert!(err.to_string().contains(STORE_URL_ENV));

    let cfg = Config::load_with_env("does/not/exist", |key| {
        (key == STORE_URL_ENV).then(|| "https://project.supabase.co".to_string())
    })
    .unwrap();
    let err = store::connect(&cfg.store).err().unwrap();
    assert!(err.to_string().contains(STORE_KEY_ENV));
}

#[test]
fn test_connect_builds_each_backend() {
    let cfg = Config::load_with_env("does/not/exist", |key| match key {
        k if k == STORE_URL_ENV => Some("https://project.supabase.co".to_string()),
        k if k == STORE_KEY_ENV => Some("service-role".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(store::connect(&cfg.store).unwrap().name(), "postgrest");

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[store]\nbackend = \"memory\"").unwrap();
    let cfg = Config::load_with_env(file.path().to_str().unwrap(), no_env).unwrap();
    assert_eq!(store::connect(&cfg.store).unwrap().name(), "memory");
}
