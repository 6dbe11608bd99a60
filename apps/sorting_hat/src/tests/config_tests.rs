use super::{apply_env, apply_file, load_settings, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_the_local_predictor() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "http://127.0.0.1:5000");
    assert_eq!(settings.loading_delay(), Duration::from_millis(2000));
    assert_eq!(settings.request_timeout(), Duration::from_secs(15));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "api_base_url = \"http://hat.internal:8080/api\"\nloading_delay_ms = 250\n",
    )
    .expect("parse");

    assert_eq!(settings.api_base_url, "http://hat.internal:8080/api");
    assert_eq!(settings.loading_delay_ms, 250);
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "bind_addr = \"0.0.0.0:1\"\n").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("SORTING_HAT_API_URL", "http://short:1"),
            ("APP__API_BASE_URL", "http://prefixed:2"),
            ("APP__REQUEST_TIMEOUT_SECS", "3"),
        ]),
    );

    assert_eq!(settings.api_base_url, "http://prefixed:2");
    assert_eq!(settings.request_timeout_secs, 3);
}

#[test]
fn unparsable_env_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[("APP__LOADING_DELAY_MS", "soon")]),
    );
    assert_eq!(settings.loading_delay_ms, 2000);
}

#[test]
fn zero_request_timeout_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "request_timeout_secs = 0\n").expect("parse");
    assert_eq!(settings.request_timeout_secs, 15);

    apply_env(
        &mut settings,
        lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]),
    );
    assert_eq!(settings.request_timeout(), Duration::from_secs(15));
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("sorting_hat_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("custom.toml");
    fs::write(&path, "request_timeout_secs = 42\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.request_timeout_secs, 42);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let path = env::temp_dir().join("sorting_hat_definitely_missing.toml");
    let err = load_settings(Some(&path)).expect_err("must fail");
    assert!(err.to_string().contains("failed to read config file"));
}
