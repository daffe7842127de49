//! Session configuration
//!
//! Routes, cards and tuning are fixed when a session is built. Loading from
//! JSON is supported so a driver can swap in a different layout; any field
//! left out falls back to the default free kick scene.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Axis;
use crate::consts::*;
use crate::sim::path::{Path, PathSet};
use crate::sim::state::{CardKind, Marker};

/// Configuration rejected at session construction
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one path is required")]
    NoPaths,
    #[error("path {index} has a non-finite control point")]
    NonFinitePath { index: usize },
    #[error("marker {index} references path {path}, but only {count} paths exist")]
    UnknownPath {
        index: usize,
        path: usize,
        count: usize,
    },
    #[error("start path {path} is out of range, only {count} paths exist")]
    UnknownStartPath { path: usize, count: usize },
    #[error("marker {index} has t = {t}, expected a value in [0, 1]")]
    MarkerOutOfRange { index: usize, t: f32 },
    #[error("marker {index} has a non-finite or negative weight {weight}")]
    InvalidWeight { index: usize, weight: f32 },
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("penalty weights must be finite and non-negative, got {0:?}")]
    InvalidPenalty(PenaltyWeights),
    #[error("spin speed must be finite, got {0}")]
    NonFiniteSpin(f32),
    #[error("continuity search needs at least one sample step")]
    NoSamples,
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Control points of one route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    pub start: [f32; 3],
    pub control: [f32; 3],
    pub end: [f32; 3],
}

impl PathSpec {
    /// A route from the penalty spot to the goal bent through `control`
    pub fn kick(control: [f32; 3]) -> Self {
        Self {
            start: ROUTE_START,
            control,
            end: ROUTE_END,
        }
    }

    pub fn to_path(&self) -> Path {
        Path::new(
            Vec3::from_array(self.start),
            Vec3::from_array(self.control),
            Vec3::from_array(self.end),
        )
    }

    fn is_finite(&self) -> bool {
        self.start
            .iter()
            .chain(&self.control)
            .chain(&self.end)
            .all(|v| v.is_finite())
    }
}

fn default_weight() -> f32 {
    1.0
}

/// A card placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub path: usize,
    pub t: f32,
    pub kind: CardKind,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl MarkerSpec {
    pub fn new(path: usize, t: f32, kind: CardKind) -> Self {
        Self {
            path,
            t,
            kind,
            weight: default_weight(),
        }
    }
}

/// How card weights turn into penalty units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Units per minor card weight
    pub minor: f32,
    /// Units per major card weight
    pub major: f32,
    /// Units that halve the score
    pub halving: f32,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            minor: MINOR_PENALTY,
            major: MAJOR_PENALTY,
            halving: PENALTY_HALVING,
        }
    }
}

/// Everything a session needs, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub paths: Vec<PathSpec>,
    pub markers: Vec<MarkerSpec>,
    /// Route the ball starts on
    pub start_path: usize,
    /// Progress per tick
    pub speed: f32,
    /// Spin per tick (radians)
    pub spin_speed: f32,
    pub hit_window: f32,
    /// Continuity search resolution K
    pub continuity_samples: u32,
    /// Coordinate matched when switching routes
    pub continuity_axis: Axis,
    pub penalties: PenaltyWeights,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                // Right winger
                PathSpec::kick([ROUTE_BEND, 0.0, 50.0]),
                // Centre forward
                PathSpec::kick([0.0, ROUTE_BEND, 50.0]),
                // Left winger
                PathSpec::kick([-ROUTE_BEND, 0.0, 50.0]),
            ],
            markers: vec![
                MarkerSpec::new(0, 0.25, CardKind::Major),
                MarkerSpec::new(0, 0.75, CardKind::Minor),
                MarkerSpec::new(1, 0.5, CardKind::Major),
                MarkerSpec::new(1, 0.9, CardKind::Minor),
                MarkerSpec::new(2, 0.33, CardKind::Minor),
                MarkerSpec::new(2, 0.66, CardKind::Major),
            ],
            start_path: 0,
            speed: BALL_SPEED,
            spin_speed: SPIN_SPEED,
            hit_window: HIT_WINDOW,
            continuity_samples: CONTINUITY_SAMPLES,
            continuity_axis: Axis::Z,
            penalties: PenaltyWeights::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.is_empty() {
            return Err(ConfigError::NoPaths);
        }
        if let Some(index) = self.paths.iter().position(|p| !p.is_finite()) {
            return Err(ConfigError::NonFinitePath { index });
        }
        if self.start_path >= self.paths.len() {
            return Err(ConfigError::UnknownStartPath {
                path: self.start_path,
                count: self.paths.len(),
            });
        }

        for (index, marker) in self.markers.iter().enumerate() {
            if marker.path >= self.paths.len() {
                return Err(ConfigError::UnknownPath {
                    index,
                    path: marker.path,
                    count: self.paths.len(),
                });
            }
            if !(0.0..=1.0).contains(&marker.t) {
                return Err(ConfigError::MarkerOutOfRange { index, t: marker.t });
            }
            if !marker.weight.is_finite() || marker.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    index,
                    weight: marker.weight,
                });
            }
        }

        check_positive("speed", self.speed)?;
        check_positive("hit window", self.hit_window)?;
        check_positive("penalty halving", self.penalties.halving)?;
        let PenaltyWeights { minor, major, .. } = self.penalties;
        if ![minor, major].iter().all(|w| w.is_finite() && *w >= 0.0) {
            return Err(ConfigError::InvalidPenalty(self.penalties));
        }
        if !self.spin_speed.is_finite() {
            return Err(ConfigError::NonFiniteSpin(self.spin_speed));
        }
        if self.continuity_samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        Ok(())
    }

    pub fn build_paths(&self) -> PathSet {
        PathSet::new(self.paths.iter().map(PathSpec::to_path).collect())
    }

    /// Markers with ids 1..=n in declaration order
    pub fn build_markers(&self) -> Vec<Marker> {
        self.markers
            .iter()
            .zip(1u32..)
            .map(|(spec, id)| Marker::new(id, spec.path, spec.t, spec.kind, spec.weight))
            .collect()
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paths.len(), 3);
        assert_eq!(config.markers.len(), 6);
        assert_eq!(config.continuity_samples, 100);
    }

    #[test]
    fn test_routes_share_anchors() {
        let paths = SessionConfig::default().build_paths();
        for path in paths.iter() {
            assert_eq!(path.start, Vec3::new(0.0, 0.0, 100.0));
            assert_eq!(path.end, Vec3::ZERO);
        }
    }

    #[test]
    fn test_build_markers_ids() {
        let markers = SessionConfig::default().build_markers();
        let ids: Vec<u32> = markers.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(markers.iter().all(|m| !m.consumed));
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "speed": 0.01, "hit_window": 0.1 }"#).unwrap();
        assert_eq!(config.speed, 0.01);
        assert_eq!(config.hit_window, 0.1);
        assert_eq!(config.paths, SessionConfig::default().paths);
    }

    #[test]
    fn test_json_markers() {
        let json = r#"{
            "markers": [
                { "path": 1, "t": 0.5, "kind": "Major" },
                { "path": 2, "t": 0.1, "kind": "Minor", "weight": 2.0 }
            ]
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.markers[0].weight, 1.0);
        assert_eq!(config.markers[1].weight, 2.0);
        assert_eq!(config.markers[1].kind, CardKind::Minor);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SessionConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SessionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SessionConfig::load("/nonexistent/curve-kick.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("curve-kick.json"));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            SessionConfig::from_json("{ speed: "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_invalid() {
        let mut config = SessionConfig::default();
        config.paths.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoPaths)));

        let mut config = SessionConfig::default();
        config.markers.push(MarkerSpec::new(3, 0.5, CardKind::Minor));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownPath { index: 6, path: 3, count: 3 })
        ));

        let mut config = SessionConfig::default();
        config.markers[0].t = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MarkerOutOfRange { index: 0, .. })
        ));

        let mut config = SessionConfig::default();
        config.speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "speed", .. })
        ));

        let mut config = SessionConfig::default();
        config.hit_window = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.continuity_samples = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoSamples)));

        let mut config = SessionConfig::default();
        config.paths[1].control[0] = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinitePath { index: 1 })
        ));

        let mut config = SessionConfig::default();
        config.start_path = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownStartPath { path: 5, count: 3 })
        ));
    }
}
