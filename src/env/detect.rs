//! Environment backend detection for existing project directories.
//!
//! Used by `init` to pick a sensible backend when the user does not name
//! one. Detection is marker-file based and never runs any tool.

use log::*;
use std::path::Path;

use crate::{env::EnvBackend, result::Result};

/// Backend detection result.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendDetection {
    /// Detected backend.
    pub backend: EnvBackend,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Files that contributed to detection.
    pub evidence: Vec<String>,
}

trait BackendDetector {
    fn name(&self) -> &str;
    fn detect(&self, path: &Path) -> Result<BackendDetection>;
}

/// Detect the environment backend for a project directory.
///
/// Returns the highest-confidence detection, or an
/// [`EnvBackend::None`] detection when no marker matched.
pub fn detect_backend(path: &Path) -> BackendDetection {
    let detectors: Vec<Box<dyn BackendDetector>> =
        vec![Box::new(VenvDetector {}), Box::new(CondaDetector {})];

    let mut best: Option<BackendDetection> = None;

    for detector in detectors.iter() {
        match detector.detect(path) {
            Ok(detection) => {
                debug!(
                    "backend {} detection confidence: {:.2}",
                    detection.backend.name(),
                    detection.confidence
                );
                if detection.confidence
                    > best.as_ref().map(|b| b.confidence).unwrap_or(0.0)
                {
                    best = Some(detection);
                }
            }
            Err(e) => {
                debug!("detector {} failed: {}", detector.name(), e);
            }
        }
    }

    best.unwrap_or(BackendDetection {
        backend: EnvBackend::None,
        confidence: 0.0,
        evidence: vec![],
    })
}

struct VenvDetector {}

impl BackendDetector for VenvDetector {
    fn name(&self) -> &str {
        "venv"
    }

    fn detect(&self, path: &Path) -> Result<BackendDetection> {
        let mut confidence: f32 = 0.0;
        let mut evidence = vec![];

        // An existing environment directory beats any spec file.
        for env_dir in [".venv", "venv"] {
            if path.join(env_dir).join("pyvenv.cfg").is_file() {
                confidence = 0.9;
                evidence.push(format!("{env_dir}/pyvenv.cfg"));
                break;
            }
        }

        if path.join("requirements.txt").is_file() {
            confidence = (confidence + 0.4).min(1.0);
            evidence.push("requirements.txt".to_string());
        }

        Ok(BackendDetection {
            backend: EnvBackend::Venv,
            confidence,
            evidence,
        })
    }
}

struct CondaDetector {}

impl BackendDetector for CondaDetector {
    fn name(&self) -> &str {
        "conda"
    }

    fn detect(&self, path: &Path) -> Result<BackendDetection> {
        let mut confidence: f32 = 0.0;
        let mut evidence = vec![];

        if path.join(".conda").join("conda-meta").is_dir() {
            confidence = 0.9;
            evidence.push(".conda/conda-meta".to_string());
        }

        for spec in ["environment.yml", "environment.yaml"] {
            if path.join(spec).is_file() {
                confidence = (confidence + 0.5).min(1.0);
                evidence.push(spec.to_string());
                break;
            }
        }

        Ok(BackendDetection {
            backend: EnvBackend::Conda,
            confidence,
            evidence,
        })
    }
}
