//! Configuration layering tests
//!
//! Each test runs inside a `figment::Jail`, which gives it a scratch working
//! directory and restores the environment afterwards.

use config_engine::{ConfigError, ConfigLoader, ParsePolicy};
use figment::Jail;

#[test]
fn test_defaults_without_sources() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().expect("defaults load");
        assert_eq!(config.billing.parse_policy, ParsePolicy::Lenient);
        assert_eq!(config.billing.decimals, 2);
        assert_eq!(config.billing.currency_symbol, "₹");
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn test_yaml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bedcare.yaml",
            r#"
billing:
  parse_policy: strict
  currency_symbol: "Rs. "
logging:
  level: debug
  json: true
"#,
        )?;

        let config = ConfigLoader::new().file("bedcare.yaml").load().expect("yaml loads");
        assert_eq!(config.billing.parse_policy, ParsePolicy::Strict);
        assert_eq!(config.billing.currency_symbol, "Rs. ");
        // Keys absent from the file keep their defaults
        assert_eq!(config.billing.decimals, 2);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(config.logging.redaction_enabled);
        Ok(())
    });
}

#[test]
fn test_toml_file_is_supported() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bedcare.toml",
            r#"
[billing]
decimals = 3
"#,
        )?;

        let config = ConfigLoader::new().file("bedcare.toml").load().expect("toml loads");
        assert_eq!(config.billing.decimals, 3);
        Ok(())
    });
}

#[test]
fn test_environment_wins_over_file() {
    Jail::expect_with(|jail| {
        jail.create_file("bedcare.yaml", "billing:\n  parse_policy: lenient\n")?;
        jail.set_env("BEDCARE_BILLING__PARSE_POLICY", "strict");
        jail.set_env("BEDCARE_LOGGING__LEVEL", "warn");

        let config = ConfigLoader::new().file("bedcare.yaml").load().expect("env merges");
        assert_eq!(config.billing.parse_policy, ParsePolicy::Strict);
        assert_eq!(config.logging.level, "warn");
        Ok(())
    });
}

#[test]
fn test_optional_file_may_be_absent() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new()
            .optional_file("missing.yaml")
            .load()
            .expect("absent optional file is fine");
        assert_eq!(config.billing.parse_policy, ParsePolicy::Lenient);
        Ok(())
    });
}

#[test]
fn test_required_file_must_exist() {
    Jail::expect_with(|_jail| {
        let err = ConfigLoader::new().file("missing.yaml").load().unwrap_err();
        assert!(matches!(err, ConfigError::SourceNotFound(_)));
        assert_eq!(err.code(), "CONFIG_5001");
        Ok(())
    });
}

#[test]
fn test_unknown_extension_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("bedcare.ini", "decimals=2")?;
        let err = ConfigLoader::new().file("bedcare.ini").load().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        Ok(())
    });
}

#[test]
fn test_excessive_decimals_fail_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("BEDCARE_BILLING__DECIMALS", "9");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        Ok(())
    });
}

#[test]
fn test_unknown_policy_is_a_parse_error() {
    Jail::expect_with(|jail| {
        jail.set_env("BEDCARE_BILLING__PARSE_POLICY", "paranoid");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        Ok(())
    });
}
