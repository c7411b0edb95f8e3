//! Timed property animations
//!
//! A tween only tracks time and easing; the caller maps `eased()` onto
//! whatever property it animates. Completion is reported once by `advance`,
//! which is what sequences the next step of game logic.

/// Slack for accumulated frame time rounding
const COMPLETION_EPSILON_MS: f64 = 1e-6;

/// Easing curves used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Decelerating sine, used for the knife knocked off the target
    SineOut,
    /// Pull back then accelerate, used for falling target pieces
    BackIn,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::BackIn => {
                const OVERSHOOT: f32 = 1.70158;
                t * t * ((OVERSHOOT + 1.0) * t - OVERSHOOT)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tween {
    pub elapsed_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    done: bool,
}

impl Tween {
    pub fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            elapsed_ms: 0.0,
            duration_ms,
            easing,
            done: false,
        }
    }

    /// Advance by `dt_ms`; returns true on the call that completes the tween
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.done {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms + COMPLETION_EPSILON_MS >= self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            self.done = true;
            return true;
        }
        false
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms) as f32
    }

    /// Eased progress
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    /// Interpolate between `from` and `to` with this tween's easing
    pub fn lerp(&self, from: f32, to: f32) -> f32 {
        from + (to - from) * self.eased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_once() {
        let mut tween = Tween::new(100.0, Easing::Linear);
        assert!(!tween.advance(60.0));
        assert!(tween.advance(60.0));
        assert!(tween.is_done());
        assert!(!tween.advance(60.0));
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::SineOut, Easing::BackIn] {
            assert!(easing.apply(0.0).abs() < 1e-5);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_back_in_pulls_back_first() {
        assert!(Easing::BackIn.apply(0.2) < 0.0);
    }

    #[test]
    fn test_lerp() {
        let mut tween = Tween::new(150.0, Easing::Linear);
        tween.advance(75.0);
        assert!((tween.lerp(628.0, 335.0) - 481.5).abs() < 1e-3);
    }
}
