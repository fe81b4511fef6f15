//! Scene defaults and tuning constants
//!
//! With the `configurable` feature enabled, scene parameters can be changed
//! at runtime through the API. Without it they are fixed at construction.

// Scene defaults
pub const DEFAULT_INTENSITY: f64 = 100.0;
pub const DEFAULT_MIN_SPEED: f64 = 20.0;
pub const DEFAULT_MAX_SPEED: f64 = 100.0;
pub const DEFAULT_SWAY: f64 = 50.0;
pub const DEFAULT_SIZE: f64 = 4.0;
pub const DEFAULT_WIND_FORCE: f64 = 30.0;
pub const DEFAULT_WIND_ANGLE: f64 = 90.0;
pub const DEFAULT_FPS: f64 = 45.0;
pub const DEFAULT_TINT: f64 = 1.0;

// Particle density: one flake per 40px of width plus one per 60px of height,
// scaled by intensity percent.
pub const COUNT_WIDTH_DIVISOR: f64 = 40.0;
pub const COUNT_HEIGHT_DIVISOR: f64 = 60.0;

// Color generation: random base brightness in [0, 0xEF), offset by a floor
// of 0x10 per channel so flakes are never fully black.
pub const BRIGHTNESS_RANGE: f64 = 0xEF as f64;
pub const BRIGHTNESS_FLOOR: u32 = 0x10;

// Vertical distance (px) per radian of sway phase.
pub const SWAY_WAVELENGTH: f64 = 100.0;

// Ceiling on per-frame elapsed time. Resuming after a long gap (backgrounded
// tab, timer drift) must not teleport flakes across the screen.
pub const MAX_FRAME_SECONDS: f64 = 0.5;

// localStorage key for the persisted active flag.
pub const STORAGE_KEY: &str = "snowscape.active";

// Feature flag
pub const RUNTIME_CONFIGURABLE: bool = cfg!(feature = "configurable");
