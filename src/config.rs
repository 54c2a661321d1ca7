use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::filter::SiteFilterComposition;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Upper bound on slider tick marks before the settings are rejected.
const MAX_SLIDER_MARKS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "DashboardConfig::default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "DashboardConfig::default_slider_min")]
    pub slider_min: f64,
    #[serde(default = "DashboardConfig::default_slider_max")]
    pub slider_max: f64,
    #[serde(default = "DashboardConfig::default_slider_step")]
    pub slider_step: f64,
    /// How a chosen site combines with the payload range in the scatter view.
    #[serde(default)]
    pub composition: SiteFilterComposition,
    #[serde(default = "DashboardConfig::default_window_size")]
    pub window_size: [f32; 2],
}

impl DashboardConfig {
    fn default_data_path() -> PathBuf {
        PathBuf::from("spacex_launch_dash.csv")
    }
    fn default_slider_min() -> f64 {
        0.0
    }
    fn default_slider_max() -> f64 {
        10_000.0
    }
    fn default_slider_step() -> f64 {
        1_000.0
    }
    fn default_window_size() -> [f32; 2] {
        [1100.0, 900.0]
    }

    /// Slider bounds as a `(min, max)` pair.
    pub fn slider_bounds(&self) -> (f64, f64) {
        (self.slider_min, self.slider_max)
    }

    /// Tick positions every `slider_step` from `slider_min` to `slider_max`.
    pub fn slider_marks(&self) -> Vec<f64> {
        if self.slider_step <= 0.0 || self.slider_max < self.slider_min {
            return vec![self.slider_min];
        }
        let n = ((self.slider_max - self.slider_min) / self.slider_step).floor() as usize;
        (0..=n)
            .map(|i| self.slider_min + i as f64 * self.slider_step)
            .collect()
    }

    /// Read `path` if it exists; fall back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(cfg) => {
                    log::info!("Using settings from {}", path.display());
                    cfg.validated()
                }
                Err(err) => {
                    log::warn!("Failed to parse {}: {err}. Using defaults.", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Failed to read {}: {err}. Using defaults.", path.display());
                Self::default()
            }
        }
    }
}

impl DashboardConfig {
    /// Replace unusable slider settings with the defaults.
    fn validated(mut self) -> Self {
        let span = self.slider_max - self.slider_min;
        let usable = self.slider_min.is_finite()
            && self.slider_max.is_finite()
            && self.slider_step.is_finite()
            && self.slider_step > 0.0
            && span >= 0.0
            && span / self.slider_step <= MAX_SLIDER_MARKS;
        if !usable {
            log::warn!(
                "Slider settings min={} max={} step={} are unusable. Using defaults.",
                self.slider_min,
                self.slider_max,
                self.slider_step
            );
            self.slider_min = Self::default_slider_min();
            self.slider_max = Self::default_slider_max();
            self.slider_step = Self::default_slider_step();
        }
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: Self::default_data_path(),
            slider_min: Self::default_slider_min(),
            slider_max: Self::default_slider_max(),
            slider_step: Self::default_slider_step(),
            composition: SiteFilterComposition::default(),
            window_size: Self::default_window_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "launch_dashboard_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = DashboardConfig::load_or_default(&unique_path("missing.json"));
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.composition, SiteFilterComposition::Intersect);
        assert_eq!(cfg.data_path, PathBuf::from("spacex_launch_dash.csv"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = unique_path("partial.json");
        fs::write(&path, r#"{ "composition": "override", "slider_max": 12000 }"#).unwrap();
        let cfg = DashboardConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(cfg.composition, SiteFilterComposition::Override);
        assert_eq!(cfg.slider_max, 12_000.0);
        assert_eq!(cfg.slider_step, 1_000.0);
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let path = unique_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let cfg = DashboardConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn unusable_slider_settings_fall_back() {
        for (name, body) in [
            ("tiny_step.json", r#"{ "slider_step": 0.01 }"#),
            ("zero_step.json", r#"{ "slider_step": 0 }"#),
            ("reversed.json", r#"{ "slider_min": 5000, "slider_max": 1000 }"#),
        ] {
            let path = unique_path(name);
            fs::write(&path, body).unwrap();
            let cfg = DashboardConfig::load_or_default(&path);
            let _ = fs::remove_file(&path);
            assert_eq!(cfg.slider_bounds(), (0.0, 10_000.0), "{name}");
            assert_eq!(cfg.slider_step, 1_000.0, "{name}");
            assert_eq!(cfg.slider_marks().len(), 11, "{name}");
        }
    }

    #[test]
    fn marks_every_thousand_kg() {
        let marks = DashboardConfig::default().slider_marks();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks[0], 0.0);
        assert_eq!(marks[10], 10_000.0);
    }
}
