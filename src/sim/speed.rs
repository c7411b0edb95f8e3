//! Target rotation and speed ramp
//!
//! Speed grows linearly (scaled by level) until it reaches the limit, then the
//! step flips sign with a freshly rolled magnitude. The result swings between
//! clockwise and counter-clockwise without a fixed period.

use rand::Rng;

use super::state::RoundState;
use crate::consts::*;
use crate::normalize_degrees;

/// Roll a new step magnitude after a bounce
fn bounce_step<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(BOUNCE_STEP_MIN..=BOUNCE_STEP_MAX)
}

/// Rotate the target (and its knives) by one tick, then ramp the speed
pub fn tick_speed<R: Rng + ?Sized>(round: &mut RoundState, level: u32, rng: &mut R) {
    let speed = round.rotation_speed;
    round.target_angle = normalize_degrees(round.target_angle + speed);
    for knife in &mut round.knives {
        knife.angle = normalize_degrees(knife.angle + speed);
    }

    round.rotation_speed += round.speed_step * level as f32;
    if round.rotation_speed >= SPEED_LIMIT {
        round.speed_step = -bounce_step(rng);
    } else if round.rotation_speed <= -SPEED_LIMIT {
        round.speed_step = bounce_step(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rotates_target_and_knives() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut round = RoundState::new();
        round.stick_knife();
        tick_speed(&mut round, 1, &mut rng);
        assert!((round.target_angle - INITIAL_SPEED).abs() < 1e-5);
        assert!((round.knives[0].angle - INITIAL_SPEED).abs() < 1e-5);
        // Anchor never moves
        assert_eq!(round.knives[0].anchor, 0.0);
        assert!((round.rotation_speed - (INITIAL_SPEED + INITIAL_SPEED_STEP)).abs() < 1e-5);
    }

    #[test]
    fn test_level_scales_ramp() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut round = RoundState::new();
        tick_speed(&mut round, 3, &mut rng);
        assert!((round.rotation_speed - (INITIAL_SPEED + INITIAL_SPEED_STEP * 3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_speed_oscillates() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut round = RoundState::new();

        let mut ticks = 0;
        while round.rotation_speed < SPEED_LIMIT {
            tick_speed(&mut round, 1, &mut rng);
            ticks += 1;
            assert!(ticks < 10_000, "never reached upper bound");
        }
        assert!(round.speed_step < 0.0);
        assert!(-round.speed_step >= BOUNCE_STEP_MIN && -round.speed_step <= BOUNCE_STEP_MAX);

        while round.rotation_speed > -SPEED_LIMIT {
            tick_speed(&mut round, 1, &mut rng);
            ticks += 1;
            assert!(ticks < 10_000, "never reached lower bound");
        }
        assert!(round.speed_step > 0.0);
        assert!(round.speed_step >= BOUNCE_STEP_MIN && round.speed_step <= BOUNCE_STEP_MAX);
    }

    #[test]
    fn test_target_angle_stays_normalized() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut round = RoundState::new();
        for _ in 0..5_000 {
            tick_speed(&mut round, 2, &mut rng);
            assert!(round.target_angle >= -180.0 && round.target_angle < 180.0);
        }
    }
}
