//! Scene configuration

use crate::constants::*;
use wasm_bindgen::prelude::*;

/// Configurable parameters for the current scene.
///
/// `width` and `height` track the drawable area in device pixels and are
/// rewritten by the renderer on every resize; everything else comes from the
/// embedder.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,

    /// Percentage scaling of particle density (100 = default).
    pub intensity: f64,
    /// Bounds (px/s) for each flake's random base fall speed.
    pub min_speed: f64,
    pub max_speed: f64,
    /// Max amplitude (px) of horizontal oscillation.
    pub sway: f64,
    /// Max flake radius (px).
    pub size: f64,
    /// Magnitude (px/s) of directional drift.
    pub wind_force: f64,
    /// Wind direction in degrees; 90 is straight down.
    pub wind_angle: f64,
    /// Target animation rate, used to throttle frame scheduling.
    pub fps: f64,

    // 0-1 floats to tune color.
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            intensity: DEFAULT_INTENSITY,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            sway: DEFAULT_SWAY,
            size: DEFAULT_SIZE,
            wind_force: DEFAULT_WIND_FORCE,
            wind_angle: DEFAULT_WIND_ANGLE,
            fps: DEFAULT_FPS,
            red: DEFAULT_TINT,
            green: DEFAULT_TINT,
            blue: DEFAULT_TINT,
        }
    }
}

#[wasm_bindgen]
impl SceneConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneConfig {
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            if let Some(intensity) = value.as_f64() {
                config.intensity = intensity;
            }
            return config;
        }

        macro_rules! extract {
            ($field:ident, $key:expr) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num;
                    }
                }
            };
        }

        extract!(intensity, "intensity");
        extract!(min_speed, "minSpeed");
        extract!(max_speed, "maxSpeed");
        extract!(sway, "sway");
        extract!(size, "size");
        extract!(wind_force, "windForce");
        extract!(wind_angle, "windAngle");
        extract!(fps, "fps");
        extract!(red, "red");
        extract!(green, "green");
        extract!(blue, "blue");

        config
    }

    /// Target number of flakes for the current viewport.
    pub fn particle_count(&self) -> usize {
        let width = self.width.max(0.0);
        let height = self.height.max(0.0);
        let density = width / COUNT_WIDTH_DIVISOR + height / COUNT_HEIGHT_DIVISOR;
        (density * (self.intensity.max(0.0) / 100.0)).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_matches_constants() {
        let scene = SceneConfig::default();
        assert_eq!(scene.intensity, 100.0);
        assert_eq!(scene.min_speed, 20.0);
        assert_eq!(scene.max_speed, 100.0);
        assert_eq!(scene.sway, 50.0);
        assert_eq!(scene.size, 4.0);
        assert_eq!(scene.wind_force, 30.0);
        assert_eq!(scene.wind_angle, 90.0);
        assert_eq!(scene.fps, 45.0);
        assert_eq!((scene.red, scene.green, scene.blue), (1.0, 1.0, 1.0));
    }

    #[test]
    fn particle_count_scales_with_area_and_intensity() {
        let mut scene = SceneConfig {
            width: 800.0,
            height: 600.0,
            ..SceneConfig::default()
        };
        // 800/40 + 600/60 = 30 at 100% intensity.
        assert_eq!(scene.particle_count(), 30);

        scene.intensity = 50.0;
        assert_eq!(scene.particle_count(), 15);

        scene.intensity = 150.0;
        assert_eq!(scene.particle_count(), 45);
    }

    #[test]
    fn particle_count_tolerates_degenerate_dimensions() {
        let mut scene = SceneConfig::default();
        assert_eq!(scene.particle_count(), 0);

        scene.width = -100.0;
        scene.height = -100.0;
        assert_eq!(scene.particle_count(), 0);

        scene.intensity = -10.0;
        scene.width = 800.0;
        scene.height = 600.0;
        assert_eq!(scene.particle_count(), 0);
    }
}
