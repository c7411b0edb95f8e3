//! Game and round state
//!
//! `GameState` lives for a whole run; `RoundState` is rebuilt for every
//! round, so dropping it also drops any animation still in flight.

use super::tween::{Easing, Tween};
use crate::consts::*;

/// Active scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Start screen, waiting for the platform to be ready and a tap
    Load,
    /// A round is in progress
    Play,
    /// All levels cleared, waiting for a tap
    Pass,
    /// Out of lives, waiting for a tap
    Over,
}

impl Scene {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::Load => "load",
            Scene::Play => "play",
            Scene::Pass => "pass",
            Scene::Over => "over",
        }
    }

    /// Scenes that only wait for an acknowledgement tap
    pub fn is_terminal(&self) -> bool {
        matches!(self, Scene::Pass | Scene::Over)
    }
}

/// Things the platform reacts to (sounds, HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A throw was accepted
    Throw,
    /// The thrown knife struck a stuck knife
    Collide,
    /// The knife landed in a free spot
    KnifeStuck { slot: usize },
    /// The target broke after its last slot was filled
    Broken,
    LifeLost { lives_left: u8 },
    LevelCleared { level: u32 },
    CountdownExpired,
    SceneChanged(Scene),
}

/// Run progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Current level (1-based); `level - 1` picks the target variant
    pub level: u32,
    /// Remaining lives
    pub lives: u8,
    /// Set once the level counter passes the last level
    pub passed: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            level: 1,
            lives: STARTING_LIVES,
            passed: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance a level; flags the run as passed past the last level
    pub fn record_level_clear(&mut self) {
        self.level += 1;
        if self.level > MAX_LEVEL {
            self.passed = true;
        }
    }

    pub fn record_life_lost(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_lost(&self) -> bool {
        self.lives < 1
    }

    /// Target variant index for rendering
    pub fn target_variant(&self) -> u32 {
        (self.level.saturating_sub(1)).min(MAX_LEVEL - 1)
    }
}

/// A knife stuck in the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knife {
    /// Target angle at the moment this knife landed (collision reference)
    pub anchor: f32,
    /// Rotation since landing, advanced with the target (rendering)
    pub angle: f32,
}

/// Which piece of a broken target a falling tween drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    LeftHalf,
    RightHalf,
    /// Index into `RoundState::knives`
    Knife(usize),
}

#[derive(Debug, Clone)]
pub struct BreakPiece {
    pub kind: PieceKind,
    pub tween: Tween,
}

/// Where the current knife is in its throw sequence
#[derive(Debug, Clone)]
pub enum ThrowPhase {
    /// Knife waiting at its rest position
    Idle,
    /// Knife flying towards the target
    Flying { tween: Tween },
    /// Knife bounced off a stuck knife and is falling away
    KnockOff { tween: Tween },
    /// Target broke; the round restarts when the last piece lands
    Breaking { pieces: Vec<BreakPiece> },
}

/// Per-round state
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Current target rotation (degrees, [-180, 180))
    pub target_angle: f32,
    /// Rotation speed (degrees per tick)
    pub rotation_speed: f32,
    /// Added to the speed every tick, scaled by level
    pub speed_step: f32,
    /// Seconds left on the round clock
    pub countdown: u32,
    /// Knives stuck so far, in landing order
    pub knives: Vec<Knife>,
    /// Round clock (ms since the round started)
    pub clock_ms: f64,
    /// Round clock time of the last countdown decrement
    pub countdown_mark_ms: f64,
    /// Round clock time of the last accepted throw
    pub last_throw_ms: Option<f64>,
    /// Break animation running; freezes the target and the clock
    pub animating: bool,
    /// A knife is at rest and may be thrown
    pub ready: bool,
    /// Outcome decided; only the closing animation remains
    pub over: bool,
    pub phase: ThrowPhase,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            target_angle: 0.0,
            rotation_speed: INITIAL_SPEED,
            speed_step: INITIAL_SPEED_STEP,
            countdown: ROUND_COUNTDOWN,
            knives: Vec::with_capacity(SLOT_COUNT),
            clock_ms: 0.0,
            countdown_mark_ms: 0.0,
            last_throw_ms: None,
            animating: false,
            ready: true,
            over: false,
            phase: ThrowPhase::Idle,
        }
    }

    /// Anchors of every stuck knife
    pub fn placed_angles(&self) -> impl Iterator<Item = f32> + '_ {
        self.knives.iter().map(|k| k.anchor)
    }

    pub fn slots_left(&self) -> usize {
        SLOT_COUNT.saturating_sub(self.knives.len())
    }

    pub fn is_full(&self) -> bool {
        self.knives.len() >= SLOT_COUNT
    }

    /// Whether a tap right now would throw a knife
    pub fn can_throw(&self) -> bool {
        if !self.ready || self.over || self.animating {
            return false;
        }
        if !matches!(self.phase, ThrowPhase::Idle) {
            return false;
        }
        match self.last_throw_ms {
            Some(last) => self.clock_ms - last >= THROW_DEBOUNCE_MS,
            None => true,
        }
    }

    /// Accept a throw: lock input and start the flight
    pub fn begin_throw(&mut self) {
        self.ready = false;
        self.last_throw_ms = Some(self.clock_ms);
        self.phase = ThrowPhase::Flying {
            tween: Tween::new(FLIGHT_MS, Easing::Linear),
        };
    }

    /// Stick the knife at the current target angle; returns its slot index
    pub fn stick_knife(&mut self) -> usize {
        self.knives.push(Knife {
            anchor: self.target_angle,
            angle: 0.0,
        });
        self.knives.len() - 1
    }

    /// Bring a new knife to the rest position within the same round
    pub fn ready_next_knife(&mut self) {
        self.phase = ThrowPhase::Idle;
        self.ready = true;
    }
}
