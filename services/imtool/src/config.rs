//! Analysis configuration loading.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment overrides. The result is validated before any image is read.

use anyhow::{anyhow, Context, Result};
use image_analysis::AnalysisConfig;
use std::fs;
use std::path::Path;

/// Load the analysis configuration, applying environment overrides on top.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit override source.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<AnalysisConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read analysis config from {:?}", path))?;
            parse_config(&content)
                .with_context(|| format!("Failed to parse analysis config from {:?}", path))?
        }
        None => AnalysisConfig::default(),
    };

    config.apply_overrides(lookup);
    config
        .validate()
        .map_err(|e| anyhow!("Invalid analysis config: {}", e))?;
    Ok(config)
}

/// Parse YAML; an empty document yields the defaults.
fn parse_config(content: &str) -> Result<AnalysisConfig> {
    if content.trim().is_empty() {
        return Ok(AnalysisConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_analysis::FootprintKind;
    use radio_common::AngularUnit;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_config_with(None, no_env).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let file = write_yaml(
            r#"
axes_unit: rad
radial:
  azimuth: [300.0, 60.0]
  inclination_deg: 35.0
peaks:
  footprint: beam
"#,
        );
        let config = load_config_with(Some(file.path()), no_env).unwrap();

        assert_eq!(config.axes_unit, AngularUnit::Rad);
        assert_eq!(config.radial.azimuth, Some((300.0, 60.0)));
        assert_eq!(config.radial.inclination_deg, 35.0);
        assert_eq!(config.radial.sampling_factor, 0.5);
        assert_eq!(config.peaks.footprint, FootprintKind::Beam);
        assert_eq!(config.peaks.cell, 3);
        assert_eq!(config.ticks.precision, 3);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_yaml("peaks:\n  cell: 5\n");
        let config = load_config_with(Some(file.path()), |key| match key {
            "PEAK_CELL" => Some("7".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.peaks.cell, 7);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_yaml("peaks:\n  cell: 4\n");
        let err = load_config_with(Some(file.path()), no_env).unwrap_err();
        assert!(err.to_string().contains("Invalid analysis config"));
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_yaml("\n");
        let config = load_config_with(Some(file.path()), no_env).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_with(Some(Path::new("/nonexistent/imtool.yaml")), no_env)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read analysis config"));
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_yaml("radial: [not, a, map]\n");
        assert!(load_config_with(Some(file.path()), no_env).is_err());
    }
}
