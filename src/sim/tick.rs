//! Fixed timestep simulation tick
//!
//! Advances the game by one frame and applies collision outcomes to score,
//! lives and level. The only place `GameState` counters change.

use glam::IVec2;
use rand::Rng;

use super::collision::{CollisionEvent, resolve};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::BRICK_SCORE;

/// Horizontal bat step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Bat steps, applied in order with clamping after each
    pub moves: Vec<Move>,
    /// Leave the intro screen
    pub confirm: bool,
    /// Start over after game over
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Start { ticks_left } => {
            if ticks_left <= 1 {
                state.phase = GamePhase::Intro;
                events.push(GameEvent::IntroShown);
            } else {
                state.phase = GamePhase::Start {
                    ticks_left: ticks_left - 1,
                };
            }
        }

        GamePhase::Intro => {
            if input.confirm {
                log::info!("Game started");
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Started);
            }
        }

        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
        }

        GamePhase::GameOver => {
            if input.restart {
                state.restart();
                log::info!("Game restarted");
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Restarted);
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            } else {
                play(state, input, &mut events);
            }
        }
    }

    events
}

fn play(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let step = state.tuning.bat_speed;
    for mv in &input.moves {
        let dx = match mv {
            Move::Left => -step,
            Move::Right => step,
        };
        state.bat.shift(dx, state.field.width);
    }

    state.ball.advance();

    let collisions = resolve(&mut state.ball, &state.bat, &mut state.wall, state.field);
    for collision in collisions {
        match collision {
            CollisionEvent::Bounce(surface) => events.push(GameEvent::Bounce(surface)),
            CollisionEvent::BrickHit { .. } => {
                state.score += BRICK_SCORE;
                events.push(GameEvent::BrickHit { score: state.score });
            }
            CollisionEvent::LifeLost => {
                lose_life(state, events);
                return;
            }
        }
    }

    if state.wall.is_empty() {
        level_up(state, events);
    }
}

/// Respawn at a random x a third of the way down, heading down at initial speed
fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);

    let direction = if state.rng.random_bool(0.5) { 1 } else { -1 };
    state.ball.vel = IVec2::new(
        state.tuning.xspeed_init * direction,
        state.tuning.yspeed_init,
    );
    let x = state.rng.random_range(0..state.field.width);
    state
        .ball
        .rect
        .set_center(IVec2::new(x, state.field.height / 3));

    log::info!("Life lost, {} remaining", state.lives);
    events.push(GameEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        log::info!("Game over: score {} at level {}", state.score, state.level);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    }
}

fn level_up(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.level += 1;
    state.rebuild_wall();
    state.ball.speed_up(1);
    state.ball.rect.set_center(state.field.level_spawn());

    log::info!(
        "Level {}: {} bricks, ball speed {:?}",
        state.level,
        state.wall.len(),
        state.ball.vel
    );
    events.push(GameEvent::LevelUp { level: state.level });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::Surface;
    use crate::sim::state::{Playfield, Tuning};
    use crate::sim::wall::brick_count;
    use proptest::prelude::*;

    const FIELD: Playfield = Playfield::new(800, 600);

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(Tuning::default(), FIELD, seed, 0);
        state.phase = GamePhase::Playing;
        state
    }

    /// Place the ball so that after moving it overlaps the first brick
    fn aim_at_first_brick(state: &mut GameState) {
        let target = state.wall.bricks()[0].rect.center();
        state.ball.rect.set_center(target - state.ball.vel);
    }

    fn drop_ball_below_floor(state: &mut GameState) {
        state.ball.rect.y = FIELD.height + 1 - state.ball.vel.y;
    }

    #[test]
    fn test_splash_counts_down_then_intro() {
        let mut state = GameState::new(Tuning::default(), FIELD, 1, 3);
        let input = TickInput {
            confirm: true,
            ..Default::default()
        };

        assert!(tick(&mut state, &input).is_empty());
        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(state.phase, GamePhase::Start { ticks_left: 1 });
        assert_eq!(tick(&mut state, &input), vec![GameEvent::IntroShown]);
        assert_eq!(state.phase, GamePhase::Intro);
    }

    #[test]
    fn test_intro_waits_for_confirm() {
        let mut state = GameState::new(Tuning::default(), FIELD, 1, 0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Intro);

        let ball_before = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.ball, ball_before);

        let events = tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ball_advances_by_velocity() {
        let mut state = playing_state(1);
        let before = state.ball.rect.center();
        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.ball.rect.center(),
            before + IVec2::new(XSPEED_INIT, YSPEED_INIT)
        );
    }

    #[test]
    fn test_moves_apply_in_order_with_clamping() {
        let mut state = playing_state(1);
        state.bat.rect.x = 10;
        let input = TickInput {
            moves: vec![Move::Left, Move::Right],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bat.rect.x, BAT_SPEED);
    }

    #[test]
    fn test_pause_toggles_and_freezes() {
        let mut state = playing_state(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        assert_eq!(tick(&mut state, &pause), vec![GameEvent::Paused]);
        let frozen = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, frozen);

        assert_eq!(tick(&mut state, &pause), vec![GameEvent::Resumed]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_brick_hit_scores_ten() {
        let mut state = playing_state(1);
        aim_at_first_brick(&mut state);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::BrickHit { score: 10 }]);
        assert_eq!(state.score, 10);
        assert_eq!(state.wall.len(), 19);
    }

    #[test]
    fn test_clearing_level_one_scores_200_and_builds_30_bricks() {
        let mut state = playing_state(1);
        assert_eq!(state.wall.len(), 20);

        let mut level_ups = 0;
        for _ in 0..20 {
            aim_at_first_brick(&mut state);
            let events = tick(&mut state, &TickInput::default());
            level_ups += events
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
                .count();
        }

        assert_eq!(state.score, 200);
        assert_eq!(level_ups, 1);
        assert_eq!(state.level, 2);
        assert_eq!(state.wall.len(), 30);
        assert_eq!(state.ball.rect.center(), FIELD.level_spawn());
    }

    #[test]
    fn test_level_up_speeds_up_by_one_keeping_direction() {
        let mut state = playing_state(1);
        state.ball.vel = IVec2::new(-10, 10);
        while state.wall.len() > 1 {
            state.wall.remove(1);
        }
        aim_at_first_brick(&mut state);
        tick(&mut state, &TickInput::default());

        // The hit flipped y before the level-up bumped both magnitudes
        assert_eq!(state.ball.vel, IVec2::new(-11, -11));
    }

    #[test]
    fn test_life_lost_respawns_and_resets_speed() {
        let mut state = playing_state(3);
        state.ball.vel = IVec2::new(13, 13);
        drop_ball_below_floor(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::LifeLost { lives: MAX_LIVES - 1 }]);
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert_eq!(state.ball.vel.x.abs(), XSPEED_INIT);
        assert_eq!(state.ball.vel.y, YSPEED_INIT);

        let center = state.ball.rect.center();
        assert!((0..FIELD.width).contains(&center.x));
        assert_eq!(center.y, FIELD.height / 3);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_respawn_is_reproducible_for_a_seed() {
        let mut a = playing_state(99);
        let mut b = playing_state(99);
        drop_ball_below_floor(&mut a);
        drop_ball_below_floor(&mut b);
        tick(&mut a, &TickInput::default());
        tick(&mut b, &TickInput::default());
        assert_eq!(a.ball, b.ball);
    }

    #[test]
    fn test_last_life_ends_game_and_restart_resets() {
        let mut state = playing_state(5);
        state.lives = 1;
        state.score = 340;
        state.level = 3;
        drop_ball_below_floor(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![
                GameEvent::LifeLost { lives: 0 },
                GameEvent::GameOver {
                    score: 340,
                    level: 3
                }
            ]
        );
        assert_eq!(state.phase, GamePhase::GameOver);

        // Anything but restart is ignored
        let idle = TickInput {
            moves: vec![Move::Left],
            confirm: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &idle).is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &restart), vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.wall.len(), 20);
        assert_eq!(state.ball.rect.center(), FIELD.game_spawn());
        assert_eq!(state.ball.vel, IVec2::new(XSPEED_INIT, YSPEED_INIT));
    }

    #[test]
    fn test_wall_bounce_reported() {
        let mut state = playing_state(1);
        state.ball.rect.x = FIELD.width - state.ball.rect.width - 5;
        state.ball.rect.y = 300;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Bounce(Surface::SideWall)]);
        assert_eq!(state.ball.vel.x, -XSPEED_INIT);
    }

    proptest! {
        #[test]
        fn prop_clearing_any_level_advances_exactly_one(
            level in 1u32..10,
            speed_x in 1i32..30,
            speed_y in 1i32..30,
            left in any::<bool>(),
            up in any::<bool>(),
        ) {
            let mut state = playing_state(5);
            state.level = level;
            state.rebuild_wall();
            prop_assert_eq!(state.wall.len(), brick_count(level));
            while state.wall.len() > 1 {
                state.wall.remove(1);
            }

            let vx = if left { -speed_x } else { speed_x };
            let vy = if up { -speed_y } else { speed_y };
            state.ball.vel = IVec2::new(vx, vy);
            aim_at_first_brick(&mut state);

            let events = tick(&mut state, &TickInput::default());
            let expected_level_up = GameEvent::LevelUp { level: level + 1 };
            prop_assert!(events.contains(&expected_level_up));
            prop_assert_eq!(state.level, level + 1);
            prop_assert_eq!(state.wall.len(), 10 * (2 + level as usize));
            prop_assert_eq!(state.wall.len(), brick_count(level + 1));

            // The hit flipped y; the level-up grew both magnitudes by one
            prop_assert_eq!(state.ball.vel, IVec2::new(
                vx.signum() * (speed_x + 1),
                -vy.signum() * (speed_y + 1),
            ));
            prop_assert_eq!(state.ball.rect.center(), FIELD.level_spawn());
        }
    }
}
