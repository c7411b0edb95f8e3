//! Scene flow controller
//!
//! Owns the run and round state, the seeded RNG, and the event queue drained
//! by the platform each frame. Scene changes go through `enter` so they are
//! logged and reported exactly once.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{
    BreakPiece, GameEvent, GameState, PieceKind, RoundState, Scene, ThrowPhase,
};
use super::tween::{Easing, Tween};
use crate::consts::*;

pub struct SceneFlow {
    pub scene: Scene,
    pub game: GameState,
    pub round: RoundState,
    /// Set by the platform once rendering/audio are up
    pub assets_ready: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl SceneFlow {
    pub fn new(seed: u64) -> Self {
        log::info!("Scene flow seeded with {}", seed);
        Self {
            scene: Scene::Load,
            game: GameState::new(),
            round: RoundState::new(),
            assets_ready: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn mark_ready(&mut self) {
        if !self.assets_ready {
            log::info!("Assets ready, waiting for start tap");
        }
        self.assets_ready = true;
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Switch scene; entering Play always starts a fresh round
    pub fn enter(&mut self, scene: Scene) {
        if scene == Scene::Play {
            self.round = RoundState::new();
        }
        if scene != self.scene {
            log::info!(
                "Scene {} -> {} (level {}, lives {})",
                self.scene.as_str(),
                scene.as_str(),
                self.game.level,
                self.game.lives
            );
        } else {
            log::debug!("Restarting scene {}", scene.as_str());
        }
        self.scene = scene;
        self.emit(GameEvent::SceneChanged(scene));
    }

    /// Player acknowledged Pass/Over: new run from level 1
    pub fn restart_run(&mut self) {
        self.game.reset();
        self.enter(Scene::Play);
    }

    /// Lose a life and either restart the round or end the run
    pub(crate) fn lose_life(&mut self) {
        self.game.record_life_lost();
        self.emit(GameEvent::LifeLost {
            lives_left: self.game.lives,
        });
        if self.game.is_lost() {
            self.enter(Scene::Over);
        } else {
            self.enter(Scene::Play);
        }
    }

    /// Resolve a knife that just reached the target
    pub(crate) fn resolve_throw(&mut self) {
        let hit = super::collision::is_hit(
            self.round.target_angle,
            self.round.placed_angles(),
            COLLISION_THRESHOLD_DEG,
        );
        log::debug!(
            "Knife arrived at {:.1} deg: {}",
            self.round.target_angle,
            if hit { "hit" } else { "stuck" }
        );

        if hit {
            self.emit(GameEvent::Collide);
            self.round.over = true;
            self.round.phase = ThrowPhase::KnockOff {
                tween: Tween::new(KNOCK_OFF_MS, Easing::SineOut),
            };
            return;
        }

        let slot = self.round.stick_knife();
        self.emit(GameEvent::KnifeStuck { slot });

        if !self.round.is_full() {
            self.round.ready_next_knife();
            return;
        }

        self.round.over = true;
        self.game.record_level_clear();
        self.emit(GameEvent::LevelCleared {
            level: self.game.level - 1,
        });
        log::info!("Level {} cleared", self.game.level - 1);

        if self.game.passed {
            self.enter(Scene::Pass);
        } else {
            self.start_break();
        }
    }

    /// Split the target and drop every piece off screen
    fn start_break(&mut self) {
        self.emit(GameEvent::Broken);
        self.round.animating = true;

        let kinds = [PieceKind::LeftHalf, PieceKind::RightHalf]
            .into_iter()
            .chain((0..self.round.knives.len()).map(PieceKind::Knife))
            .collect::<Vec<_>>();
        let pieces = kinds
            .into_iter()
            .map(|kind| BreakPiece {
                kind,
                tween: Tween::new(
                    self.rng.random_range(BREAK_MIN_MS..=BREAK_MAX_MS),
                    Easing::BackIn,
                ),
            })
            .collect();
        self.round.phase = ThrowPhase::Breaking { pieces };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Knife;

    fn playing(seed: u64) -> SceneFlow {
        let mut flow = SceneFlow::new(seed);
        flow.mark_ready();
        flow.enter(Scene::Play);
        flow.drain_events();
        flow
    }

    #[test]
    fn test_starts_in_load() {
        let flow = SceneFlow::new(1);
        assert_eq!(flow.scene, Scene::Load);
        assert!(!flow.assets_ready);
    }

    #[test]
    fn test_life_lost_restarts_round() {
        let mut flow = playing(1);
        flow.round.countdown = 3;
        flow.lose_life();
        assert_eq!(flow.scene, Scene::Play);
        assert_eq!(flow.game.lives, 2);
        assert_eq!(flow.round.countdown, ROUND_COUNTDOWN);
        let events = flow.drain_events();
        assert!(events.contains(&GameEvent::LifeLost { lives_left: 2 }));
    }

    #[test]
    fn test_last_life_goes_over() {
        let mut flow = playing(1);
        flow.game.lives = 1;
        flow.lose_life();
        assert_eq!(flow.scene, Scene::Over);
    }

    #[test]
    fn test_filling_last_slot_breaks_target() {
        let mut flow = playing(5);
        for i in 0..SLOT_COUNT - 1 {
            flow.round.knives.push(Knife {
                anchor: -150.0 + i as f32 * 40.0,
                angle: 0.0,
            });
        }
        flow.round.target_angle = 170.0;
        flow.resolve_throw();

        assert_eq!(flow.game.level, 2);
        assert!(flow.round.animating);
        match &flow.round.phase {
            ThrowPhase::Breaking { pieces } => {
                assert_eq!(pieces.len(), 2 + SLOT_COUNT);
                for piece in pieces {
                    assert!(piece.tween.duration_ms >= BREAK_MIN_MS);
                    assert!(piece.tween.duration_ms <= BREAK_MAX_MS);
                }
            }
            other => panic!("expected break animation, got {other:?}"),
        }
        assert!(flow.drain_events().contains(&GameEvent::Broken));
    }

    #[test]
    fn test_seed_drives_break_durations() {
        let durations = |seed: u64| {
            let mut flow = playing(seed);
            flow.round.knives.push(Knife {
                anchor: 0.0,
                angle: 0.0,
            });
            flow.start_break();
            match &flow.round.phase {
                ThrowPhase::Breaking { pieces } => pieces
                    .iter()
                    .map(|p| p.tween.duration_ms)
                    .collect::<Vec<_>>(),
                other => panic!("expected break animation, got {other:?}"),
            }
        };
        assert_eq!(durations(42), durations(42));
        assert_eq!(durations(42).len(), 3);
    }

    #[test]
    fn test_restart_run_resets_game() {
        let mut flow = playing(1);
        flow.game.level = 4;
        flow.game.passed = true;
        flow.enter(Scene::Pass);
        flow.restart_run();
        assert_eq!(flow.scene, Scene::Play);
        assert_eq!(flow.game, GameState::new());
    }
}
