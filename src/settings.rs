//! User settings and preferences
//!
//! Read-only JSON: from LocalStorage on the web, and natively from the file
//! named by `TRISPIN_SETTINGS`, if set. Anything unreadable falls back to
//! defaults.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BOOST;

/// Frame pacing preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PresentModePreference {
    #[default]
    Vsync,
    NoVsync,
}

impl PresentModePreference {
    /// The wgpu present mode; the `Auto*` modes are supported everywhere
    pub fn to_wgpu(&self) -> wgpu::PresentMode {
        match self {
            PresentModePreference::Vsync => wgpu::PresentMode::AutoVsync,
            PresentModePreference::NoVsync => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

/// App settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Velocity multiplier applied by a kick
    pub boost_factor: f32,
    /// Clear color (RGBA)
    pub background: [f32; 4],
    /// Brighten shapes as they spin faster
    pub velocity_tint: bool,
    pub present_mode: PresentModePreference,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boost_factor: DEFAULT_BOOST,
            background: [0.0, 0.0, 0.0, 1.0],
            velocity_tint: true,
            present_mode: PresentModePreference::Vsync,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.boost_factor.is_finite() || self.boost_factor < 0.0 {
            log::warn!(
                "Invalid boost factor {}, using {}",
                self.boost_factor,
                defaults.boost_factor
            );
            self.boost_factor = defaults.boost_factor;
        }
        if self.background.iter().any(|c| !c.is_finite()) {
            log::warn!("Invalid background color, using default");
            self.background = defaults.background;
        }
        for c in &mut self.background {
            *c = c.clamp(0.0, 1.0);
        }
        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "trispin_settings";

    /// Environment variable naming a JSON settings file (native only)
    pub const ENV_VAR: &'static str = "TRISPIN_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `TRISPIN_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(path) => Self::load_from_path(&path),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {e}", path);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {e}", path);
                Self::default()
            }
        }
    }
}
