use super::{
    apply_args, load_settings, resolve_settings, Args, RejectedValue, Settings,
    DEFAULT_API_BASE_URL,
};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_hosted_service() {
    let settings = resolve_settings(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.request_timeout(), client_core::DEFAULT_REQUEST_TIMEOUT);
    assert!(settings.rejected().is_empty());
}

#[test]
fn file_values_accept_strings_and_integers() {
    let file = r#"
api_base_url = "http://127.0.0.1:8000/"
request_timeout_secs = 5
log_filter = "debug"
"#;
    let settings = resolve_settings(Some(file), env_from(&[])).expect("settings");
    assert_eq!(settings.api_base_url, "http://127.0.0.1:8000");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn environment_overrides_file() {
    let file = r#"api_base_url = "http://file.example""#;
    let settings = resolve_settings(
        Some(file),
        env_from(&[
            ("HEARTGUARD_API_URL", "http://env.example"),
            ("HEARTGUARD_REQUEST_TIMEOUT_SECS", "12"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.api_base_url, "http://env.example");
    assert_eq!(settings.request_timeout_secs, 12);
}

#[test]
fn app_prefixed_variable_wins_over_plain_variable() {
    let settings = resolve_settings(
        None,
        env_from(&[
            ("HEARTGUARD_API_URL", "http://plain.example"),
            ("APP__API_BASE_URL", "http://app.example"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.api_base_url, "http://app.example");
}

#[test]
fn invalid_or_blank_values_keep_previous_layer() {
    let settings = resolve_settings(
        Some(r#"request_timeout_secs = "soon""#),
        env_from(&[
            ("HEARTGUARD_REQUEST_TIMEOUT_SECS", "0"),
            ("HEARTGUARD_API_URL", "   "),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(
        settings.rejected(),
        &[
            RejectedValue {
                source: "file",
                key: "request_timeout_secs",
                value: "soon".to_string(),
            },
            RejectedValue {
                source: "env",
                key: "request_timeout_secs",
                value: "0".to_string(),
            },
        ]
    );
}

#[test]
fn zero_timeout_on_command_line_is_reported() {
    let mut settings = resolve_settings(
        None,
        env_from(&[("HEARTGUARD_REQUEST_TIMEOUT_SECS", "9")]),
    )
    .expect("settings");
    assert!(settings.rejected().is_empty());

    let args = Args {
        request_timeout_secs: Some(0),
        ..Args::default()
    };
    apply_args(&mut settings, &args);
    assert_eq!(settings.request_timeout_secs, 9);
    assert_eq!(settings.rejected().len(), 1);
    assert_eq!(settings.rejected()[0].source, "cli");
    assert_eq!(settings.rejected()[0].value, "0");
}

#[test]
fn malformed_file_is_an_error() {
    let err = resolve_settings(Some("api_base_url = "), env_from(&[])).expect_err("must fail");
    assert!(format!("{err:#}").contains("not valid TOML"));
}

#[test]
fn command_line_overrides_everything() {
    let mut settings = resolve_settings(
        None,
        env_from(&[("HEARTGUARD_API_URL", "http://env.example")]),
    )
    .expect("settings");
    let args = Args {
        api_base_url: Some("http://cli.example/".to_string()),
        request_timeout_secs: Some(3),
        ..Args::default()
    };
    apply_args(&mut settings, &args);
    assert_eq!(settings.api_base_url, "http://cli.example");
    assert_eq!(settings.request_timeout_secs, 3);
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let args = Args {
        config: env::temp_dir().join(format!("heartguard_missing_{suffix}.toml")),
        ..Args::default()
    };
    let settings = load_settings(&args).expect("settings");
    assert_eq!(settings.request_timeout_secs, Settings::default().request_timeout_secs);
}

#[test]
fn reads_settings_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("heartguard_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp dir");
    let path = temp_root.join("heartguard.toml");
    fs::write(&path, "request_timeout_secs = 7\n").expect("write");

    let args = Args {
        config: path,
        ..Args::default()
    };
    let settings = load_settings(&args).expect("settings");
    assert_eq!(settings.request_timeout_secs, 7);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
