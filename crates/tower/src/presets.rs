//! JSON parameter presets.
//!
//! A preset is a (possibly partial) `BuildingParameters` object; missing
//! fields take their default values.

use std::path::Path;

use bevy::prelude::*;

use crate::config::PARAMS_ENV_VAR;
use crate::error::TowerError;
use crate::params::BuildingParameters;

/// Parse a preset from a JSON string and validate it.
pub fn parse_preset(json: &str) -> Result<BuildingParameters, TowerError> {
    let params: BuildingParameters = serde_json::from_str(json)?;
    params.validate()?;
    Ok(params)
}

/// Read and validate a preset file.
pub fn load_preset(path: impl AsRef<Path>) -> Result<BuildingParameters, TowerError> {
    let contents = std::fs::read_to_string(path)?;
    parse_preset(&contents)
}

/// Parameters to start with: the preset named by `SKYLINE_PARAMS` if it is
/// set and loads cleanly, the defaults otherwise.
pub fn startup_parameters() -> BuildingParameters {
    let Ok(path) = std::env::var(PARAMS_ENV_VAR) else {
        return BuildingParameters::default();
    };
    match load_preset(&path) {
        Ok(params) => {
            info!("Loaded tower preset from {}", path);
            params
        }
        Err(e) => {
            warn!(
                "Failed to load tower preset '{}', using defaults: {}",
                path, e
            );
            BuildingParameters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_preset() {
        let params = parse_preset(r#"{ "floors": 12, "fin_count": 0 }"#).expect("valid preset");
        assert_eq!(params.floors, 12);
        assert_eq!(params.fin_count, 0);
        assert_eq!(params.base_width, BuildingParameters::default().base_width);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_preset(r#"{ "taper": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TowerError::InvalidParameters { .. }));
    }

    #[test]
    fn test_parse_rejects_out_of_range_values() {
        for (json, expected) in [
            (r#"{ "floors": 4000000000 }"#, "floors"),
            (r#"{ "floor_height": 3e38 }"#, "floor_height"),
            (r#"{ "fin_count": 500 }"#, "fin_count"),
            (r#"{ "seed": 100000 }"#, "seed"),
        ] {
            match parse_preset(json) {
                Err(TowerError::InvalidParameters { field, .. }) => {
                    assert_eq!(field, expected, "preset {json}, got: {field}")
                }
                other => panic!("preset {json} should be rejected, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_out_of_range_preset_from_disk() {
        let path = std::env::temp_dir().join("skyline_preset_out_of_range.json");
        std::fs::write(&path, r#"{ "floors": 4000000000, "floor_height": 3e38 }"#)
            .expect("write");
        let err = load_preset(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(
            matches!(err, TowerError::InvalidParameters { field: "floors", .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_preset("{ floors: ").unwrap_err();
        assert!(matches!(err, TowerError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_preset("/nonexistent/skyline/preset.json").unwrap_err();
        assert!(matches!(err, TowerError::Io(_)));
    }

    #[test]
    fn test_load_preset_from_disk() {
        let path = std::env::temp_dir().join("skyline_preset_test.json");
        std::fs::write(&path, r#"{ "floors": 30, "total_twist_deg": 90.0 }"#).expect("write");
        let params = load_preset(&path).expect("valid preset");
        assert_eq!(params.floors, 30);
        assert_eq!(params.total_twist_deg, 90.0);
        let _ = std::fs::remove_file(&path);
    }
}
