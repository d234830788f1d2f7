use archiver_core::config::{self, AppConfig, ConflictPolicy};
use std::fs;

#[test]
fn defaults_match_printer_layout() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.server.host, "localhost");
    assert_eq!(cfg.server.port, 7125);
    assert_eq!(
        cfg.server.endpoint,
        "/server/database/item?namespace=gcode_metadata"
    );
    assert_eq!(cfg.server.timeout_secs, 10.0);
    assert_eq!(cfg.retention.keep, 42);
    assert!(!cfg.safety.dry_run);
    assert_eq!(cfg.safety.conflict, ConflictPolicy::Overwrite);
    assert!(cfg.validate().is_ok());
}

#[test]
fn file_overrides_selected_keys() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("settings.toml");
    fs::write(
        &path,
        r#"
        [server]
        host = "printer.local"
        port = 7130

        [retention]
        keep = 5

        [safety]
        conflict = "rename"
        "#,
    )
    .unwrap();
    let cfg = config::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(cfg.server.host, "printer.local");
    assert_eq!(cfg.server.port, 7130);
    assert_eq!(cfg.server.timeout_secs, 10.0);
    assert_eq!(cfg.retention.keep, 5);
    assert_eq!(cfg.paths.gcode_dir, "~/printer_data/gcode");
    assert_eq!(cfg.safety.conflict, ConflictPolicy::Rename);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nope.toml");
    assert!(config::load(Some(path.to_str().unwrap())).is_err());
}

#[test]
fn rejects_non_positive_timeout() {
    let mut cfg = AppConfig::default();
    cfg.server.timeout_secs = 0.0;
    assert!(cfg.validate().is_err());
    cfg.server.timeout_secs = f64::NAN;
    assert!(cfg.validate().is_err());
    cfg.server.timeout_secs = 1e30;
    assert!(cfg.validate().is_err());
    assert!(cfg.timeout().is_err());
    cfg.server.timeout_secs = 2.5;
    assert_eq!(cfg.timeout().unwrap(), std::time::Duration::from_millis(2500));
}

#[test]
fn bad_file_timeout_can_be_replaced_before_validation() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("settings.toml");
    fs::write(&path, "[server]\ntimeout_secs = 0.0\n").unwrap();
    let mut cfg = config::load(Some(path.to_str().unwrap())).unwrap();
    assert!(cfg.validate().is_err());
    cfg.server.timeout_secs = 5.0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn expands_home_prefix() {
    let expanded = config::expand_home("~/printer_data/gcode");
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expanded, home.join("printer_data/gcode"));
    }
    assert_eq!(
        config::expand_home("/srv/gcode"),
        std::path::PathBuf::from("/srv/gcode")
    );
}

#[test]
fn conflict_policy_parses_case_insensitively() {
    assert_eq!("Overwrite".parse::<ConflictPolicy>(), Ok(ConflictPolicy::Overwrite));
    assert!("merge".parse::<ConflictPolicy>().is_err());
}
