//! Runtime configuration.
//!
//! [`RenderConfig`] is the small per-call knob set the compositor reads every frame.
//! [`TryOnConfig`] is the file-level configuration loaded once at startup.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::error::{TryOnError, TryOnResult};
use crate::garment::catalog::{Catalog, GarmentDescriptor};
use crate::pose::anatomy::{AnatomyBuilder, DEFAULT_VISIBILITY_THRESHOLD, Proportions};

pub const MIN_GARMENT_SCALE: f32 = 0.5;
pub const MAX_GARMENT_SCALE: f32 = 2.0;

/// Clamp a user-supplied garment scale to the supported range; non-finite input resets to `1.0`.
pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_GARMENT_SCALE, MAX_GARMENT_SCALE)
    } else {
        1.0
    }
}

fn deserialize_scale<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
    f32::deserialize(d).map(clamp_scale)
}

/// Per-frame render switches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Draw the pose skeleton under the garment.
    pub show_skeleton: bool,
    #[serde(deserialize_with = "deserialize_scale")]
    garment_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_skeleton: false,
            garment_scale: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn scale(&self) -> f32 {
        self.garment_scale
    }

    /// Set the garment scale, clamped to `[0.5, 2.0]`.
    pub fn set_scale(&mut self, scale: f32) {
        self.garment_scale = clamp_scale(scale);
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_skeleton(mut self, show: bool) -> Self {
        self.show_skeleton = show;
        self
    }

    pub fn toggle_skeleton(&mut self) {
        self.show_skeleton = !self.show_skeleton;
    }
}

/// Startup configuration, usually read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TryOnConfig {
    pub render: RenderConfig,
    pub proportions: Proportions,
    pub visibility_threshold: f32,
    /// Replaces the built-in garments when present.
    pub catalog: Option<Vec<GarmentDescriptor>>,
    /// Garment selected on start instead of the catalog's first entry.
    pub default_garment: Option<u32>,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            proportions: Proportions::default(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            catalog: None,
            default_garment: None,
        }
    }
}

impl TryOnConfig {
    pub fn from_reader(reader: impl Read) -> TryOnResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| TryOnError::serde(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> TryOnResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn validate(&self) -> TryOnResult<()> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(TryOnError::validation(format!(
                "visibility_threshold must be within [0, 1], got {}",
                self.visibility_threshold
            )));
        }
        let p = &self.proportions;
        for (name, v) in [
            ("width_ratio", p.width_ratio),
            ("length_ratio", p.length_ratio),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TryOnError::validation(format!(
                    "proportions.{name} must be > 0, got {v}"
                )));
            }
        }
        let catalog = self.catalog()?;
        if let Some(id) = self.default_garment
            && catalog.get(id).is_none()
        {
            return Err(TryOnError::validation(format!(
                "default_garment {id} is not in the catalog"
            )));
        }
        Ok(())
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> TryOnResult<Catalog> {
        match &self.catalog {
            Some(garments) => Catalog::new(garments.clone()),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn anatomy_builder(&self) -> AnatomyBuilder {
        AnatomyBuilder {
            proportions: self.proportions,
            visibility_threshold: self.visibility_threshold,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
