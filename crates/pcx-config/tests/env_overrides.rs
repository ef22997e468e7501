use figment::Jail;
use pcx_config::PcxConfig;

#[test]
fn env_var_overrides_default_threshold() {
    Jail::expect_with(|jail| {
        jail.set_env("PCX_VARIANCE__MINOR_DELAY_DAYS", "2");

        let config = PcxConfig::load().expect("config loads");
        assert_eq!(config.variance.minor_delay_days, 2);
        Ok(())
    });
}

#[test]
fn env_var_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pcx")?;
        jail.create_file(".pcx/config.toml", "[general]\ncurrency = \"GBP\"\n")?;
        jail.set_env("PCX_GENERAL__CURRENCY", "JPY");

        let config = PcxConfig::load().expect("config loads");
        assert_eq!(config.general.currency, "JPY");
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("PCX_WBS__WEIGHTAGE_TOLERANCE", "-3");

        assert!(PcxConfig::load().is_err());
        Ok(())
    });
}
