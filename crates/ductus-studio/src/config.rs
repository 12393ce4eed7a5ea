use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use ductus_engine::paint::Color;
use ductus_engine::window::RuntimeConfig;
use ductus_sketch::SketchConfig;

pub const TITLE_ENV: &str = "DUCTUS_TITLE";
pub const WIDTH_ENV: &str = "DUCTUS_WIDTH";
pub const HEIGHT_ENV: &str = "DUCTUS_HEIGHT";

/// Studio settings: window, background and sketch defaults.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub clear: Color,
    pub sketch: SketchConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "ductus".to_string(),
            width: 800.0,
            height: 800.0,
            clear: Color::from_straight(0.07, 0.07, 0.09, 1.0),
            sketch: SketchConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Defaults overridden by `DUCTUS_TITLE`, `DUCTUS_WIDTH` and `DUCTUS_HEIGHT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(title) = lookup(TITLE_ENV) {
            config.title = title;
        }
        if let Some(raw) = lookup(WIDTH_ENV) {
            config.width = parse_extent(&raw).with_context(|| format!("invalid {WIDTH_ENV}"))?;
        }
        if let Some(raw) = lookup(HEIGHT_ENV) {
            config.height = parse_extent(&raw).with_context(|| format!("invalid {HEIGHT_ENV}"))?;
        }
        Ok(config)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }
}

fn parse_extent(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("`{raw}` is not a number"))?;
    anyhow::ensure!(value.is_finite() && value >= 1.0, "`{raw}` must be at least 1");
    Ok(value)
}
