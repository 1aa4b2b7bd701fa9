use dx_core::config::{BackendMode, Config, MAX_LATENCY_SCALE};

#[test]
fn default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.general.log_level, "info");
    assert_eq!(cfg.general.log_format, "text");
    assert_eq!(cfg.api.mode, BackendMode::Mock);
    assert_eq!(cfg.api.base_url, "http://localhost:3000/api/v1");
    assert_eq!(cfg.api.timeout_secs, 30);
    assert_eq!(cfg.mock.latency_scale, 1.0);
    assert!(cfg.mock.faults_enabled);
    assert!(cfg.mock.fault_probability.is_none());
    assert!(cfg.session.dir.is_none());
    assert_eq!(cfg.bridge.port, 3000);
    cfg.validate().expect("defaults validate");
}

#[test]
fn config_roundtrip() {
    let cfg = Config::default();
    let toml_str = cfg.to_toml().expect("serialize to toml");
    assert!(toml_str.contains("localhost:3000"));

    let parsed: Config = toml::from_str(&toml_str).expect("parse toml back");
    assert_eq!(parsed.api.base_url, cfg.api.base_url);
    assert_eq!(parsed.api.mode, cfg.api.mode);
    assert_eq!(parsed.bridge.host, cfg.bridge.host);
    parsed.validate().expect("config validates");
}

#[test]
fn config_partial_toml() {
    let partial = r#"
[api]
mode = "http"

[mock]
latency_scale = 0.25
fault_seed = 7
"#;
    let cfg: Config = toml::from_str(partial).expect("parse partial");
    assert_eq!(cfg.api.mode, BackendMode::Http);
    assert_eq!(cfg.mock.latency_scale, 0.25);
    assert_eq!(cfg.mock.fault_seed, Some(7));
    // defaults should fill in the rest
    assert_eq!(cfg.api.timeout_secs, 30);
    assert_eq!(cfg.general.log_level, "info");
    cfg.validate().expect("config validates");
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bridge]\nport = 4100\n").unwrap();
    let cfg = Config::load_from(&path).expect("load");
    assert_eq!(cfg.bridge.port, 4100);
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from(dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().starts_with("io:"));
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nmode = ").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("parse:"));
}

#[test]
fn negative_latency_scale_fails_validation() {
    let mut cfg = Config::default();
    cfg.mock.latency_scale = -1.0;
    let err = cfg.validate().expect_err("validation should fail");
    assert!(err.to_string().contains("latency_scale"));
}

#[test]
fn oversized_latency_scale_fails_validation() {
    let mut cfg = Config::default();
    cfg.apply_overrides_from(|key| (key == "DEXTER_LATENCY_SCALE").then(|| "1e300".to_string()));
    assert_eq!(cfg.mock.latency_scale, 1e300);
    let err = cfg.validate().expect_err("validation should fail");
    assert!(err.to_string().contains("latency_scale"));

    cfg.mock.latency_scale = MAX_LATENCY_SCALE;
    assert!(cfg.validate().is_ok());
    cfg.mock.latency_scale = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn fault_probability_out_of_range_fails_validation() {
    let mut cfg = Config::default();
    cfg.mock.fault_probability = Some(1.5);
    let err = cfg.validate().expect_err("validation should fail");
    assert!(err.to_string().contains("fault_probability"));
}

#[test]
fn non_http_base_url_fails_validation() {
    let mut cfg = Config::default();
    cfg.api.base_url = "ftp://example.com".into();
    let err = cfg.validate().expect_err("validation should fail");
    assert!(err.to_string().contains("base_url"));
}

#[test]
fn unknown_log_format_fails_validation() {
    let mut cfg = Config::default();
    cfg.general.log_format = "xml".into();
    assert!(cfg.validate().is_err());
}
