//! Tests for loading `RouterConfig` from the environment and from TOML files

use brrtmux::config::{ConfigError, RouterConfig, ENV_HEAD_ON_GET, ENV_OPTIONS, ENV_TRACE};
use std::fs;
use std::path::PathBuf;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("brrtmux-{}-{name}.toml", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

// Environment variables are process-global, so every env case lives in one test.
#[test]
fn test_from_env() {
    std::env::remove_var(ENV_OPTIONS);
    std::env::remove_var(ENV_TRACE);
    std::env::remove_var(ENV_HEAD_ON_GET);
    let config = RouterConfig::from_env();
    assert!(config.options_enabled);
    assert!(!config.trace_enabled);
    assert!(config.add_head_on_get);

    std::env::set_var(ENV_OPTIONS, "off");
    std::env::set_var(ENV_TRACE, "TRUE");
    std::env::set_var(ENV_HEAD_ON_GET, "not-a-bool");
    let config = RouterConfig::from_env();
    assert!(!config.options_enabled);
    assert!(config.trace_enabled);
    assert!(config.add_head_on_get);

    std::env::remove_var(ENV_OPTIONS);
    std::env::remove_var(ENV_TRACE);
    std::env::remove_var(ENV_HEAD_ON_GET);
}

#[test]
fn test_from_toml_file() {
    let path = temp_config("ok", "options = false\ntrace = true\n");
    let config = RouterConfig::from_toml_file(&path).unwrap();
    assert!(!config.options_enabled);
    assert!(config.trace_enabled);
    assert!(config.add_head_on_get);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_from_toml_file_missing() {
    let path = std::env::temp_dir().join("brrtmux-does-not-exist.toml");
    let err = RouterConfig::from_toml_file(&path).unwrap_err();
    match &err {
        ConfigError::Io { path: p, .. } => assert!(p.ends_with("brrtmux-does-not-exist.toml")),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(err.to_string().contains("cannot read"));
}

#[test]
fn test_from_toml_file_wrong_type() {
    let path = temp_config("bad", "trace = \"sometimes\"\n");
    let err = RouterConfig::from_toml_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_loaded_config_drives_router() {
    let path = temp_config("router", "trace = true\nhead_on_get = false\n");
    let config = RouterConfig::from_toml_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let mut mux = brrtmux::Router::with_config(config);
    mux.route("/r").get(|_w, _req| {});

    let mut res = brrtmux::RecordedResponse::new();
    mux.serve(&mut res, &brrtmux::Request::new(http::Method::TRACE, "/r"));
    assert_eq!(res.status(), 200);

    let mut res = brrtmux::RecordedResponse::new();
    mux.serve(&mut res, &brrtmux::Request::new(http::Method::HEAD, "/r"));
    assert_eq!(res.status(), 405);
}
