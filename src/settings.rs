//! Output settings and preferences
//!
//! Controls how much geometry each frame carries; persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Line segments per tessellated disk
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 24,
            QualityPreset::Medium => 64,
            QualityPreset::High => 180,
        }
    }

    /// Opacity bands the faded trace is split into
    pub fn trace_bands(&self) -> usize {
        match self {
            QualityPreset::Low => 1,
            QualityPreset::Medium => 8,
            QualityPreset::High => 32,
        }
    }
}

/// Frame output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tessellation quality preset
    pub quality: QualityPreset,

    // === Geometry ===
    /// Emit the two disk circles
    pub show_disks: bool,
    /// Emit the six rods
    pub show_rods: bool,
    /// Emit the pen trace polyline
    pub show_trace: bool,

    // === Strokes ===
    /// Fade older parts of the trace
    pub trace_fade: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_disks: true,
            show_rods: true,
            show_trace: true,
            trace_fade: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // A single band cannot fade
        if preset == QualityPreset::Low {
            self.trace_fade = false;
        }
    }

    pub fn circle_segments(&self) -> u32 {
        self.quality.circle_segments()
    }

    /// Effective trace band count (1 when fading is off)
    pub fn trace_bands(&self) -> usize {
        if self.trace_fade {
            self.quality.trace_bands()
        } else {
            1
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
