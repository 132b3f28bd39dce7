//! Example data configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "mossy-owl";

/// Configuration values controlling example data seeding at startup.
///
/// The seed value and the client, coin and transaction counts come from the
/// named registry entry; only the choice of entry is configurable here.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable example data seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Seed name to load from the registry.
    pub seed_name: Option<String>,
    /// Registry file to read instead of the bundled registry.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Whether seeding should run.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the registry path override, if any.
    #[must_use]
    pub fn registry_path(&self) -> Option<&std::path::Path> {
        self.registry_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for example data configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ExampleDataSettings {
        ExampleDataSettings::load_from_iter([OsString::from("bitslow")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", None::<String>),
            ("EXAMPLE_DATA_SEED_NAME", None::<String>),
            ("EXAMPLE_DATA_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.is_enabled());
        assert_eq!(settings.seed_name(), DEFAULT_SEED_NAME);
        assert!(settings.registry_path().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            ("EXAMPLE_DATA_SEED_NAME", Some("rainbow-fox".to_owned())),
            (
                "EXAMPLE_DATA_REGISTRY_PATH",
                Some("/tmp/example_registry.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.is_enabled());
        assert_eq!(settings.seed_name(), "rainbow-fox");
        assert_eq!(
            settings.registry_path(),
            Some(PathBuf::from("/tmp/example_registry.json").as_path())
        );
    }
}
