//! Knife Hit - A rotating-target knife throwing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scene flow, rounds, collision, speed ramp)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound effects
//! - `settings`: Presentation settings read at startup

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, speeds are degrees per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Fixed timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical screen size (the renderer letterboxes to this)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 716.0;

    /// Target placement
    pub const TARGET_X: f32 = SCREEN_WIDTH / 2.0;
    pub const TARGET_Y: f32 = 220.0;
    pub const TARGET_DIAMETER: f32 = 230.0;
    /// Horizontal gap opened between the halves when the target breaks
    pub const TARGET_HALF_GAP: f32 = 10.0;

    /// Knife resting position (y) before a throw
    pub const KNIFE_REST_Y: f32 = SCREEN_HEIGHT - 88.0;
    /// Knife length for drawing
    pub const KNIFE_LENGTH: f32 = 90.0;

    /// Lives at the start of a run; also the number of levels
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LEVEL: u32 = STARTING_LIVES as u32;
    /// Knives that must land to clear a level
    pub const SLOT_COUNT: usize = 6;

    /// Two knives closer than this (degrees) collide
    pub const COLLISION_THRESHOLD_DEG: f32 = 15.0;
    /// Minimum time between accepted throws
    pub const THROW_DEBOUNCE_MS: f64 = 300.0;
    /// Seconds on the clock at round start
    pub const ROUND_COUNTDOWN: u32 = 30;
    pub const COUNTDOWN_INTERVAL_MS: f64 = 1000.0;

    /// Rotation speed (degrees per tick)
    pub const INITIAL_SPEED: f32 = 1.0;
    pub const INITIAL_SPEED_STEP: f32 = 0.02;
    pub const SPEED_LIMIT: f32 = 6.0;
    /// Range for the re-randomized step after each bounce
    pub const BOUNCE_STEP_MIN: f32 = 0.01;
    pub const BOUNCE_STEP_MAX: f32 = 0.05;

    /// Animation durations
    pub const FLIGHT_MS: f64 = 150.0;
    pub const KNOCK_OFF_MS: f64 = 1000.0;
    /// Spin applied to a knocked-off knife (radians)
    pub const KNOCK_OFF_SPIN: f32 = 6.0;
    pub const BREAK_MIN_MS: f64 = 800.0;
    pub const BREAK_MAX_MS: f64 = 1000.0;
    /// Falling pieces end below the screen
    pub const FALL_END_Y: f32 = SCREEN_HEIGHT * 1.5;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Convert polar (r, degrees) to cartesian offset in screen space (y down)
#[inline]
pub fn polar_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(r * rad.cos(), r * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(190.0) - (-170.0)).abs() < 1e-4);
        assert!((normalize_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert!((normalize_degrees(720.0)).abs() < 1e-4);
        assert!((normalize_degrees(180.0) - (-180.0)).abs() < 1e-4);
        assert!((normalize_degrees(-180.0) - (-180.0)).abs() < 1e-4);
    }

    #[test]
    fn test_polar_to_cartesian_screen_down() {
        // 90 degrees points down in screen space
        let p = polar_to_cartesian(100.0, 90.0);
        assert!(p.x.abs() < 1e-3);
        assert!((p.y - 100.0).abs() < 1e-3);
    }
}
