//! Provides `SolverConfig`, a bundle of solver settings that can be loaded
//! from and written to [TOML][toml] or [JSON][serde_json].
//!
//! Every section and key is optional; anything left out takes its default.
//! ```toml
//! [newton]
//! epsilon = 1e-8
//! maxiters = 200
//!
//! [damped]
//! alpha0 = 10.0
//! c1 = 0.25
//! policy = "accept_on_decrease"
//! ```

use std::{
    ffi::OsStr,
    fs,
    path::Path,
};
use serde::{ Deserialize, Serialize };
use serde_json as json;
use thiserror::Error;
use crate::{
    error::Violation,
    math::{ DampedOptions, NewtonOptions, SearchOptions },
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config: invalid value for key '{0}': expected value to satisfy '{1}' but got {2}")]
    InvalidValue(String, String, String),

    #[error("config: couldn't read file '{0}': {1}")]
    FileRead(String, String),

    #[error("config: couldn't write to file '{0}': {1}")]
    FileWrite(String, String),

    #[error("config: unrecognized file format for '{0}'")]
    UnknownFormat(String),

    #[error("config: TOML parse error '{0}'")]
    TomlParse(#[from] toml::de::Error),

    #[error("config: TOML error '{0}'")]
    TomlError(#[from] toml::ser::Error),

    #[error("config: JSON error '{0}'")]
    JsonError(#[from] json::Error),
}
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Config file formats, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Pick a format from the extension of `path` (`.toml` or `.json`).
    pub fn from_path<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path: &Path = path.as_ref();
        return match path.extension().and_then(OsStr::to_str) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(path.display().to_string())),
        };
    }
}

/// Settings for every solver in [`math`][crate::math].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub newton: NewtonOptions,
    pub damped: DampedOptions,
    pub search: SearchOptions,
}

fn in_section(section: &str, violation: Option<Violation>) -> ConfigResult<()> {
    return match violation {
        Some((field, constraint, value)) => Err(ConfigError::InvalidValue(
            format!("{}.{}", section, field), constraint.to_string(), value)),
        None => Ok(()),
    };
}

impl SolverConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        return Ok(config);
    }

    /// Parse and validate a JSON string.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = json::from_str(s)?;
        config.validate()?;
        return Ok(config);
    }

    /// Read, parse, and validate a `.toml` or `.json` file.
    pub fn from_file<P>(infile: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let infile: &Path = infile.as_ref();
        let format: Format = Format::from_path(infile)?;
        let contents: String = fs::read_to_string(infile)
            .map_err(|err| {
                ConfigError::FileRead(infile.display().to_string(), err.to_string())
            })?;
        log::debug!("config: loading {}", infile.display());
        return match format {
            Format::Toml => Self::from_toml_str(&contents),
            Format::Json => Self::from_json_str(&contents),
        };
    }

    pub fn as_toml_string(&self) -> ConfigResult<String> {
        return Ok(toml::to_string(self)?);
    }

    pub fn as_json_string(&self) -> ConfigResult<String> {
        return Ok(json::to_string(self)?);
    }

    pub fn as_json_string_pretty(&self) -> ConfigResult<String> {
        return Ok(json::to_string_pretty(self)?);
    }

    /// Write to `outfile` in the format given by its extension.
    pub fn write<P>(&self, outfile: P) -> ConfigResult<()>
    where P: AsRef<Path>
    {
        let outfile: &Path = outfile.as_ref();
        let contents: String = match Format::from_path(outfile)? {
            Format::Toml => self.as_toml_string()?,
            Format::Json => self.as_json_string_pretty()?,
        };
        return fs::write(outfile, contents)
            .map_err(|err| {
                ConfigError::FileWrite(outfile.display().to_string(), err.to_string())
            });
    }

    /// Check every value against the constraints its solver imposes.
    pub fn validate(&self) -> ConfigResult<()> {
        in_section("newton", self.newton.violation())?;
        in_section("damped", self.damped.violation())?;
        in_section("search", self.search.violation())?;
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::StepPolicy;

    #[test]
    fn defaults_from_empty() {
        assert_eq!(SolverConfig::from_toml_str("").unwrap(), SolverConfig::default());
        assert_eq!(SolverConfig::from_json_str("{}").unwrap(), SolverConfig::default());
    }

    #[test]
    fn partial_toml() {
        let config = SolverConfig::from_toml_str(
            r#"
            [newton]
            epsilon = 1e-8

            [damped]
            c1 = 0.25
            policy = "accept_on_decrease"
            "#
        ).unwrap();
        assert_eq!(config.newton.epsilon, 1e-8);
        assert_eq!(config.newton.maxiters, NewtonOptions::default().maxiters);
        assert_eq!(config.damped.c1, 0.25);
        assert_eq!(config.damped.alpha0, 100.0);
        assert_eq!(config.damped.policy, StepPolicy::AcceptOnDecrease);
        assert_eq!(config.search, SearchOptions::default());
    }

    #[test]
    fn string_round_trip() {
        let mut config = SolverConfig::default();
        config.damped.alpha0 = 3.5;
        config.search.maxiters = 64;
        let toml_str = config.as_toml_string().unwrap();
        assert_eq!(SolverConfig::from_toml_str(&toml_str).unwrap(), config);
        let json_str = config.as_json_string().unwrap();
        assert_eq!(SolverConfig::from_json_str(&json_str).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = SolverConfig::from_toml_str("[damped]\nc1 = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _, _) if key == "damped.c1"));
        let err = SolverConfig::from_json_str(r#"{"newton": {"epsilon": -1.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _, _) if key == "newton.epsilon"));
        let err = SolverConfig::from_toml_str("[search]\nmaxiters = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _, ref got) if key == "search.maxiters" && got == "0"));
        assert!(matches!(
            SolverConfig::from_toml_str("[newton]\nepsilon = \"small\"").unwrap_err(),
            ConfigError::TomlParse(_),
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir();
        let config = SolverConfig {
            newton: NewtonOptions { epsilon: 1e-9, maxiters: 50 },
            ..SolverConfig::default()
        };
        for name in ["numan-config-test.toml", "numan-config-test.json"] {
            let path = dir.join(name);
            config.write(&path).unwrap();
            assert_eq!(SolverConfig::from_file(&path).unwrap(), config);
            fs::remove_file(&path).unwrap();
        }
        assert!(matches!(
            SolverConfig::from_file(dir.join("numan-config-test.yaml")).unwrap_err(),
            ConfigError::UnknownFormat(_),
        ));
    }
}
