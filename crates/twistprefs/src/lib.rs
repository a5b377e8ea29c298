//! User preferences.
//!
//! Preferences are layered from lowest to highest priority: the built-in
//! defaults in `default.yaml`, an optional user YAML file, and environment
//! variables such as `TWISTCUBE_ANIMATION__TWIST_DURATION=400`.

#![allow(missing_docs)] // field names are self-explanatory

use std::path::Path;

use eyre::{Result, WrapErr, bail};
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
mod puzzle;
mod view;

pub use animation::*;
pub use interaction::*;
pub use puzzle::*;
pub use view::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "TWISTCUBE";
/// Separator between nested keys in environment variable overrides.
pub const ENV_SEPARATOR: &str = "__";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub puzzle: PuzzlePreferences,
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub view: ViewPreferences,
}
impl Preferences {
    /// Loads preferences from the defaults, `user_file` (if any), and the
    /// environment. If loading fails, then the error is logged and the
    /// default preferences are returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        let user_source = user_file.map(config::File::from);
        Self::try_load(user_source, None).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            Self::defaults()
        })
    }

    /// Loads preferences from the defaults, `user_source` (if any), and the
    /// environment.
    ///
    /// If `env` is `None`, then the process environment is used.
    pub fn try_load(
        user_source: Option<impl config::Source + Send + Sync + 'static>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(source) = user_source {
            config = config.add_source(source);
        }
        config = config.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let prefs = config
            .build()
            .wrap_err("error reading preferences")?
            .try_deserialize::<Self>()
            .wrap_err("error deserializing preferences")?;
        prefs.validate()?;
        log::debug!("loaded preferences: {prefs:?}");
        Ok(prefs)
    }

    /// Returns an error if a numeric preference is outside its valid range.
    pub fn validate(&self) -> Result<()> {
        let duration = self.animation.twist_duration;
        if !duration.is_finite() || duration < 0.0 {
            bail!("animation.twist_duration must be finite and non-negative, not {duration}");
        }
        let tolerance = self.interaction.ambiguity_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            bail!("interaction.ambiguity_tolerance must be finite and positive, not {tolerance}");
        }
        Ok(())
    }

    /// Returns the built-in default preferences.
    pub fn defaults() -> Self {
        serde_norway::from_str(DEFAULT_PREFS_STR).unwrap_or_else(|e| {
            log::error!("Error parsing built-in preferences: {e}");
            Self::default()
        })
    }

    /// Serializes the preferences to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).wrap_err("error serializing preferences")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    type UserSource = config::File<config::FileSourceString, config::FileFormat>;

    fn user_yaml(s: &str) -> Option<UserSource> {
        Some(config::File::from_str(s, PREFS_FILE_FORMAT))
    }

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    #[test]
    fn test_default_yaml_matches_default_impl() {
        assert_eq!(
            serde_norway::from_str::<Preferences>(DEFAULT_PREFS_STR).unwrap(),
            Preferences::default(),
        );
        assert_eq!(
            Preferences::try_load(None::<UserSource>, no_env()).unwrap(),
            Preferences::default(),
        );
    }

    #[test]
    fn test_layering() {
        let user = user_yaml(
            "puzzle:\n  order: 4\nanimation:\n  twist_duration: 100\n  twist_interpolation: cosine\n",
        );
        let env = config::Map::from_iter([
            ("TWISTCUBE_ANIMATION__TWIST_DURATION".to_owned(), "400".to_owned()),
            ("TWISTCUBE_INTERACTION__SNAP_AFTER_TWIST".to_owned(), "false".to_owned()),
            ("UNRELATED".to_owned(), "1".to_owned()),
        ]);
        let prefs = Preferences::try_load(user, Some(env)).unwrap();

        assert_eq!(prefs.puzzle.order, 4);
        assert_eq!(prefs.puzzle.edge_length, 10.0);
        assert_eq!(prefs.animation.twist_duration, 400.0);
        assert_eq!(prefs.animation.twist_interpolation, InterpolateFn::Cosine);
        assert!(!prefs.interaction.snap_after_twist);
        assert_eq!(prefs.interaction.ambiguity_tolerance, 0.8);
    }

    #[test]
    fn test_bad_user_file() {
        let result = Preferences::try_load(user_yaml("puzzle:\n  order: three\n"), no_env());
        assert!(result.is_err());

        let missing = Path::new("/nonexistent/twistcube.yaml");
        assert_eq!(Preferences::load(Some(missing)), Preferences::defaults());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let env = |key: &str, value: &str| {
            Some(config::Map::from_iter([(key.to_owned(), value.to_owned())]))
        };
        for (key, value) in [
            ("TWISTCUBE_ANIMATION__TWIST_DURATION", "inf"),
            ("TWISTCUBE_ANIMATION__TWIST_DURATION", "-1"),
            ("TWISTCUBE_INTERACTION__AMBIGUITY_TOLERANCE", "0"),
        ] {
            let result = Preferences::try_load(None::<UserSource>, env(key, value));
            assert!(result.is_err(), "{key}={value}");
        }
        Preferences::defaults().validate().unwrap();
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut prefs = Preferences::default();
        prefs.view.tilt_degrees = 10.0;
        let yaml = prefs.to_yaml().unwrap();
        assert_eq!(serde_norway::from_str::<Preferences>(&yaml).unwrap(), prefs);
    }
}
