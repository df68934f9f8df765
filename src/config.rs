//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::pose::DEFAULT_VISIBILITY_THRESHOLD;
use crate::tracking::Exercise;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Minimum landmark visibility for angle extraction
    pub visibility_threshold: f32,

    /// Exercise selected when the server starts
    pub default_exercise: Exercise,

    /// Optional JSON file overriding built-in exercise profiles
    pub profiles_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "development".to_string(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            default_exercise: Exercise::BicepCurl,
            profiles_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            environment: lookup("ENVIRONMENT")
                .unwrap_or(defaults.environment),

            visibility_threshold: lookup("VISIBILITY_THRESHOLD")
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|v| (0.0..=1.0).contains(v))
                .unwrap_or(defaults.visibility_threshold),

            default_exercise: lookup("DEFAULT_EXERCISE")
                .and_then(|name| match name.parse() {
                    Ok(exercise) => Some(exercise),
                    Err(e) => {
                        tracing::warn!("Ignoring DEFAULT_EXERCISE: {}", e);
                        None
                    }
                })
                .unwrap_or(defaults.default_exercise),

            profiles_path: lookup("EXERCISE_PROFILES_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.visibility_threshold, 0.6);
        assert_eq!(config.default_exercise, Exercise::BicepCurl);
        assert!(config.profiles_path.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("ENVIRONMENT", "production"),
            ("VISIBILITY_THRESHOLD", "0.75"),
            ("DEFAULT_EXERCISE", "Squat"),
            ("EXERCISE_PROFILES_PATH", "/etc/repcount/profiles.json"),
        ]);
        assert_eq!(config.port, 9000);
        assert!(config.is_production());
        assert_eq!(config.visibility_threshold, 0.75);
        assert_eq!(config.default_exercise, Exercise::Squat);
        assert_eq!(config.profiles_path, Some(PathBuf::from("/etc/repcount/profiles.json")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("VISIBILITY_THRESHOLD", "1.7"),
            ("DEFAULT_EXERCISE", "deadlift"),
            ("EXERCISE_PROFILES_PATH", "  "),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.visibility_threshold, 0.6);
        assert_eq!(config.default_exercise, Exercise::BicepCurl);
        assert!(config.profiles_path.is_none());
    }
}
