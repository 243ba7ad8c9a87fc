//! Service configuration from environment variables.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOTRACK_PORT` | HTTP server port | 8080 |
//! | `GEOTRACK_STRICT_COORDINATES` | Reject coordinates outside ±90° / ±180° | false |

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings of the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port to listen on.
    pub port: u16,
    /// When true, out-of-range coordinates are rejected with 400 instead of
    /// being stored and geohashed as the nearest edge.
    pub strict_coordinates: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            strict_coordinates: false,
        }
    }
}

impl ServiceConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a variable lookup function.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("GEOTRACK_PORT") {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Invalid GEOTRACK_PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        let strict_coordinates = match lookup("GEOTRACK_STRICT_COORDINATES") {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" | "" => false,
                _ => {
                    tracing::warn!(
                        value = %value,
                        "Invalid GEOTRACK_STRICT_COORDINATES, using default"
                    );
                    defaults.strict_coordinates
                }
            },
            None => defaults.strict_coordinates,
        };

        Self {
            port,
            strict_coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8080);
        assert!(!config.strict_coordinates);
    }

    #[test]
    fn test_with_values() {
        let config = config_from(&[
            ("GEOTRACK_PORT", "3000"),
            ("GEOTRACK_STRICT_COORDINATES", "TRUE"),
        ]);
        assert_eq!(config.port, 3000);
        assert!(config.strict_coordinates);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("GEOTRACK_PORT", "not-a-port"),
            ("GEOTRACK_STRICT_COORDINATES", "maybe"),
        ]);
        assert_eq!(config, ServiceConfig::default());
    }
}
