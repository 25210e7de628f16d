use crate::orientation::OrientationOptions;
use crate::pipeline::DetectionParams;
use crate::projection::ProjectionOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitDetectConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub orientation: OrientationOptions,
    /// Skip estimation and use these orientations (degrees).
    #[serde(default)]
    pub orientations_deg: Option<Vec<f64>>,
    #[serde(default)]
    pub projection: ProjectionOptions,
    #[serde(default = "default_export_margin")]
    pub export_margin: f64,
    pub output: TraitDetectOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitDetectOutputConfig {
    pub result_json: PathBuf,
}

fn default_export_margin() -> f64 {
    1.0
}

impl TraitDetectConfig {
    pub fn params(&self) -> DetectionParams {
        DetectionParams {
            orientation: self.orientation,
            orientations_deg: self.orientations_deg.clone(),
            projection: self.projection,
            export_margin: self.export_margin,
        }
    }
}

pub fn load_config(path: &Path) -> Result<TraitDetectConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<TraitDetectConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionSource;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "input": "a.png", "output": { "resultJson": "out.json" } }"#)
            .unwrap();
        assert_eq!(cfg.input, PathBuf::from("a.png"));
        assert_eq!(cfg.output.result_json, PathBuf::from("out.json"));
        let params = cfg.params();
        assert_eq!(params, DetectionParams::default());
    }

    #[test]
    fn nested_sections_override_defaults() {
        let cfg = parse_config(
            r#"{
                "input": "plan.png",
                "orientationsDeg": [0.0, 90.0],
                "orientation": { "numBins": 360 },
                "projection": {
                    "source": { "kind": "binary", "threshold": 0.5, "inverted": true },
                    "peaks": { "minPeakDistance": 4 }
                },
                "exportMargin": 0.0,
                "output": { "resultJson": "out/traits.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.orientation.num_bins, 360);
        assert_eq!(cfg.orientations_deg, Some(vec![0.0, 90.0]));
        assert_eq!(
            cfg.projection.source,
            ProjectionSource::Binary {
                threshold: 0.5,
                inverted: true
            }
        );
        assert_eq!(cfg.projection.peaks.min_peak_distance, 4);
        assert_eq!(cfg.params().export_margin, 0.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/trait_detect.json")).unwrap_err();
        assert!(err.starts_with("Failed to read config"), "{err}");
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/trait_detect.json");
        let cfg = load_config(&path).unwrap();
        assert!(cfg.orientation.peaks.circular);
        assert!(!cfg.projection.peaks.circular);
    }
}
