//! Fixed timestep simulation tick
//!
//! Advances the scene flow deterministically: animations first (their
//! completions drive the next logic step), then the round clock and target
//! rotation, then input.

use super::collision::nearest_gap;
use super::flow::SceneFlow;
use super::speed::tick_speed;
use super::state::{GameEvent, RoundState, Scene, ThrowPhase};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer down / tap / space
    pub tap: bool,
    /// Idle/demo mode - the game throws and acknowledges screens by itself
    pub autoplay: bool,
}

/// Extra clearance (degrees) autoplay keeps beyond the collision threshold
const AUTOPLAY_MARGIN_DEG: f32 = 10.0;

/// What an animation finishing this tick asks for
enum Completion {
    None,
    KnifeArrived,
    KnockedOff,
    BreakFinished,
}

/// Advance the game by one fixed timestep of `dt_ms` milliseconds
pub fn tick(flow: &mut SceneFlow, input: &TickInput, dt_ms: f64) {
    flow.time_ticks += 1;
    let tap = input.tap || input.autoplay;

    match flow.scene {
        Scene::Load => {
            if tap && flow.assets_ready {
                flow.enter(Scene::Play);
            }
        }
        Scene::Pass | Scene::Over => {
            if tap {
                flow.restart_run();
            }
        }
        Scene::Play => tick_play(flow, input, dt_ms),
    }
}

fn tick_play(flow: &mut SceneFlow, input: &TickInput, dt_ms: f64) {
    flow.round.clock_ms += dt_ms;

    match advance_animation(&mut flow.round, dt_ms) {
        Completion::None => {}
        Completion::KnifeArrived => flow.resolve_throw(),
        Completion::KnockedOff => {
            flow.lose_life();
            return;
        }
        Completion::BreakFinished => {
            flow.enter(Scene::Play);
            return;
        }
    }
    // Resolving a throw can end the run (Pass)
    if flow.scene != Scene::Play {
        return;
    }

    if flow.round.animating {
        return;
    }

    if !flow.round.over && tick_countdown(&mut flow.round) {
        log::info!("Countdown expired on level {}", flow.game.level);
        flow.emit(GameEvent::CountdownExpired);
        flow.lose_life();
        return;
    }

    let level = flow.game.level;
    tick_speed(&mut flow.round, level, &mut flow.rng);

    let wants_throw = input.tap || (input.autoplay && autoplay_should_throw(&flow.round));
    if wants_throw && flow.round.can_throw() {
        flow.round.begin_throw();
        flow.emit(GameEvent::Throw);
    }
}

/// Step the current throw animation, reporting a completion at most once
fn advance_animation(round: &mut RoundState, dt_ms: f64) -> Completion {
    match &mut round.phase {
        ThrowPhase::Idle => Completion::None,
        ThrowPhase::Flying { tween } => {
            if tween.advance(dt_ms) {
                Completion::KnifeArrived
            } else {
                Completion::None
            }
        }
        ThrowPhase::KnockOff { tween } => {
            if tween.advance(dt_ms) {
                Completion::KnockedOff
            } else {
                Completion::None
            }
        }
        ThrowPhase::Breaking { pieces } => {
            let last = pieces.len().saturating_sub(1);
            let mut finished = false;
            for (i, piece) in pieces.iter_mut().enumerate() {
                if piece.tween.advance(dt_ms) && i == last {
                    finished = true;
                }
            }
            if finished {
                Completion::BreakFinished
            } else {
                Completion::None
            }
        }
    }
}

/// Tick the round clock; returns true when it has run out
fn tick_countdown(round: &mut RoundState) -> bool {
    if round.countdown > 0 && round.clock_ms - round.countdown_mark_ms >= COUNTDOWN_INTERVAL_MS {
        round.countdown_mark_ms = round.clock_ms;
        round.countdown -= 1;
    }
    round.countdown == 0
}

/// Throw only if the knife would land clear of every stuck knife
fn autoplay_should_throw(round: &RoundState) -> bool {
    let flight_ticks = (FLIGHT_MS / SIM_DT_MS).ceil() as f32;
    let predicted = round.target_angle + round.rotation_speed * flight_ticks;
    match nearest_gap(predicted, round.placed_angles()) {
        Some(gap) => gap > COLLISION_THRESHOLD_DEG + AUTOPLAY_MARGIN_DEG,
        None => true,
    }
}
