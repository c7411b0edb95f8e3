//! Scene layout for drawing
//!
//! Turns simulation state into screen-space positions (logical 1280x716,
//! y down). Kept free of GPU types so it can be tested natively.

use glam::Vec2;

use crate::consts::*;
use crate::polar_to_cartesian;
use crate::sim::{PieceKind, RoundState, Scene, SceneFlow, ThrowPhase};

/// A knife to draw; rotation 0 means blade pointing up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnifeSprite {
    pub pos: Vec2,
    /// Radians, clockwise on screen
    pub rotation: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub scene: Scene,
    pub target_pos: Vec2,
    /// Radians
    pub target_rotation: f32,
    pub target_variant: u32,
    /// Whole target drawn (false while broken)
    pub target_visible: bool,
    /// Y of each half when the target is broken
    pub halves_y: Option<(f32, f32)>,
    pub knives: Vec<KnifeSprite>,
}

fn target_center() -> Vec2 {
    Vec2::new(TARGET_X, TARGET_Y)
}

/// Knife stuck in the rim, rotated with the target since it landed
fn stuck_knife(angle_deg: f32) -> KnifeSprite {
    let offset = polar_to_cartesian(TARGET_DIAMETER / 2.0, angle_deg + 90.0);
    KnifeSprite {
        pos: target_center() + offset,
        rotation: angle_deg.to_radians(),
    }
}

fn rest_knife() -> KnifeSprite {
    KnifeSprite {
        pos: Vec2::new(TARGET_X, KNIFE_REST_Y),
        rotation: 0.0,
    }
}

/// Y where a thrown knife meets the target rim
fn impact_y() -> f32 {
    TARGET_Y + TARGET_DIAMETER / 2.0
}

fn layout_round(round: &RoundState, layout: &mut FrameLayout) {
    match &round.phase {
        ThrowPhase::Idle => {
            layout.knives.extend(round.knives.iter().map(|k| stuck_knife(k.angle)));
            if round.ready {
                layout.knives.push(rest_knife());
            }
        }
        ThrowPhase::Flying { tween } => {
            layout.knives.extend(round.knives.iter().map(|k| stuck_knife(k.angle)));
            layout.knives.push(KnifeSprite {
                pos: Vec2::new(TARGET_X, tween.lerp(KNIFE_REST_Y, impact_y())),
                rotation: 0.0,
            });
        }
        ThrowPhase::KnockOff { tween } => {
            layout.knives.extend(round.knives.iter().map(|k| stuck_knife(k.angle)));
            layout.knives.push(KnifeSprite {
                pos: Vec2::new(TARGET_X, tween.lerp(impact_y(), FALL_END_Y)),
                rotation: tween.lerp(0.0, KNOCK_OFF_SPIN),
            });
        }
        ThrowPhase::Breaking { pieces } => {
            layout.target_visible = false;
            let mut left = TARGET_Y;
            let mut right = TARGET_Y;
            for piece in pieces {
                match piece.kind {
                    PieceKind::LeftHalf => left = piece.tween.lerp(TARGET_Y, FALL_END_Y),
                    PieceKind::RightHalf => right = piece.tween.lerp(TARGET_Y, FALL_END_Y),
                    PieceKind::Knife(index) => {
                        if let Some(knife) = round.knives.get(index) {
                            let mut sprite = stuck_knife(knife.angle);
                            sprite.pos.y = piece.tween.lerp(sprite.pos.y, FALL_END_Y);
                            layout.knives.push(sprite);
                        }
                    }
                }
            }
            layout.halves_y = Some((left, right));
        }
    }
}

impl FrameLayout {
    pub fn from_flow(flow: &SceneFlow) -> Self {
        let mut layout = Self {
            scene: flow.scene,
            target_pos: target_center(),
            target_rotation: flow.round.target_angle.to_radians(),
            target_variant: flow.game.target_variant(),
            target_visible: flow.scene == Scene::Play,
            halves_y: None,
            knives: Vec::new(),
        };
        if flow.scene == Scene::Play {
            layout_round(&flow.round, &mut layout);
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Knife, TickInput, tick};

    fn playing() -> SceneFlow {
        let mut flow = SceneFlow::new(1);
        flow.mark_ready();
        flow.enter(Scene::Play);
        flow
    }

    #[test]
    fn test_load_draws_nothing() {
        let flow = SceneFlow::new(1);
        let layout = FrameLayout::from_flow(&flow);
        assert!(!layout.target_visible);
        assert!(layout.knives.is_empty());
    }

    #[test]
    fn test_ready_knife_at_rest() {
        let layout = FrameLayout::from_flow(&playing());
        assert!(layout.target_visible);
        assert_eq!(layout.knives, vec![rest_knife()]);
    }

    #[test]
    fn test_stuck_knife_starts_below_center() {
        let sprite = stuck_knife(0.0);
        assert!((sprite.pos.x - TARGET_X).abs() < 1e-3);
        assert!((sprite.pos.y - impact_y()).abs() < 1e-3);

        // A quarter turn clockwise moves it to the left side
        let sprite = stuck_knife(90.0);
        assert!((sprite.pos.x - (TARGET_X - TARGET_DIAMETER / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_flying_knife_moves_up() {
        let mut flow = playing();
        let tap = TickInput {
            tap: true,
            ..Default::default()
        };
        tick(&mut flow, &tap, SIM_DT_MS);
        tick(&mut flow, &TickInput::default(), SIM_DT_MS);
        let layout = FrameLayout::from_flow(&flow);
        let knife = layout.knives.last().unwrap();
        assert!(knife.pos.y < KNIFE_REST_Y);
        assert!(knife.pos.y > impact_y());
    }

    #[test]
    fn test_breaking_hides_target() {
        let mut flow = playing();
        flow.round.knives.push(Knife {
            anchor: 0.0,
            angle: 30.0,
        });
        flow.round.phase = ThrowPhase::Breaking {
            pieces: vec![
                crate::sim::BreakPiece {
                    kind: PieceKind::LeftHalf,
                    tween: crate::sim::Tween::new(900.0, crate::sim::Easing::BackIn),
                },
                crate::sim::BreakPiece {
                    kind: PieceKind::Knife(0),
                    tween: crate::sim::Tween::new(900.0, crate::sim::Easing::BackIn),
                },
            ],
        };
        let layout = FrameLayout::from_flow(&flow);
        assert!(!layout.target_visible);
        assert_eq!(layout.halves_y, Some((TARGET_Y, TARGET_Y)));
        assert_eq!(layout.knives.len(), 1);
    }
}
