//! Fixed timestep simulation tick
//!
//! One call advances the whole world by exactly one step: player controller,
//! coin pickups, enemy patrol/stomp interactions, the goal flag, and the
//! render camera, in that order. Everything a host needs to react to comes
//! back as the returned event list.

use super::collision::resolve_tile_collisions;
use super::grid::tile_center;
use super::level::Level;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{TILE, VIEW_W};
use crate::lerp;

/// Extra world height below the grid before a fall counts as death, in tiles
const FALL_OUT_MARGIN: f32 = 2.0;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump is held-state, not an edge; the jump buffer derives the press
    pub jump: bool,
}

/// Advance the game state by one fixed timestep, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    debug_assert!(dt > 0.0, "dt must be positive");

    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time += dt;
    update_player(state, input, dt, &mut events);
    collect_coins(state, &mut events);
    update_enemies(state, dt, &mut events);
    check_flag(state, &mut events);
    update_camera(state, dt);
    events
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let t = state.tuning;

    {
        let p = &mut state.player;
        p.anim += dt;
        if p.invuln > 0.0 {
            p.invuln = (p.invuln - dt).max(0.0);
        }

        // Jump buffer re-arms while held; coyote re-arms while grounded
        p.jump_buffer = if input.jump {
            t.jump_buffer_window
        } else {
            (p.jump_buffer - dt).max(0.0)
        };
        p.coyote = if p.body.on_ground {
            t.coyote_window
        } else {
            (p.coyote - dt).max(0.0)
        };

        if input.left && !input.right {
            p.body.vel.x -= t.run_accel * dt;
            p.face = -1;
        } else if input.right && !input.left {
            p.body.vel.x += t.run_accel * dt;
            p.face = 1;
        } else {
            p.body.vel.x = lerp(p.body.vel.x, 0.0, t.friction * dt);
            if p.body.vel.x.abs() < t.stop_threshold {
                p.body.vel.x = 0.0;
            }
        }
        p.body.vel.x = p.body.vel.x.clamp(-t.max_run_speed, t.max_run_speed);

        // A jump needs both windows open and consumes both, so one press
        // can never fire twice
        if p.jump_buffer > 0.0 && p.coyote > 0.0 {
            p.body.vel.y = -t.jump_speed;
            p.jump_buffer = 0.0;
            p.coyote = 0.0;
            events.push(GameEvent::Jumped { pos: p.body.feet() });
        }

        p.body.vel.y = (p.body.vel.y + t.gravity * dt).min(t.terminal_velocity);
    }

    let sweep = resolve_tile_collisions(&mut state.player.body, dt, &mut state.level.grid);
    if let Some((tx, ty)) = sweep.broken_brick {
        state.score += t.brick_score;
        events.push(GameEvent::BrickBroken {
            pos: tile_center(tx, ty),
        });
    }

    let fall_limit = (state.level.grid.height() as f32 + FALL_OUT_MARGIN) * TILE;
    if state.player.body.pos.y > fall_limit {
        // Falling out of the world kills through the invulnerability window
        state.damage(true, events);
    }
}

fn collect_coins(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let t = state.tuning;
    let center = state.player.body.center();
    for coin in state.level.coins.iter_mut() {
        if coin.taken {
            continue;
        }
        let reach = coin.radius + t.coin_pickup_slack;
        if center.distance_squared(coin.pos) <= reach * reach {
            coin.taken = true;
            state.coins += 1;
            state.score += t.coin_score;
            events.push(GameEvent::CoinTaken { pos: coin.pos });
        }
    }
}

fn update_enemies(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let t = state.tuning;
    let mut stomp_score = 0;
    let mut player_hit = false;

    {
        let Level { grid, enemies, .. } = &mut state.level;
        let player = &mut state.player;

        for enemy in enemies.iter_mut() {
            if !enemy.alive {
                enemy.stomped_timer -= dt;
                continue;
            }

            enemy.body.vel.y = (enemy.body.vel.y + t.gravity * dt).min(t.terminal_velocity);
            enemy.body.vel.x = enemy.patrol_vx;
            let sweep = resolve_tile_collisions(&mut enemy.body, dt, grid);

            // Walls reverse the patrol; ledges do not (the enemy just falls)
            if sweep.blocked_x {
                enemy.patrol_vx = -enemy.patrol_vx;
            }

            if player.body.overlaps(&enemy.body) {
                let falling = player.body.vel.y > t.stomp_fall_threshold;
                let overlap = player.body.bottom() - enemy.body.pos.y;
                if falling && overlap < t.stomp_max_overlap {
                    enemy.alive = false;
                    enemy.stomped_timer = t.stomp_squash_time;
                    player.body.vel.y = -t.stomp_bounce;
                    stomp_score += t.stomp_score;
                    events.push(GameEvent::Stomped {
                        pos: enemy.body.center(),
                    });
                } else {
                    player_hit = true;
                }
            }
        }
    }

    state.score += stomp_score;
    if player_hit {
        state.damage(false, events);
    }
}

fn check_flag(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let (zone_pos, zone_size) = state.level.flag.pole_zone();
    if state.player.body.overlaps_rect(zone_pos, zone_size) {
        state.win(events);
    }
}

fn update_camera(state: &mut GameState, dt: f32) {
    let world_w = state.level.grid.width() as f32 * TILE;
    let target = state.player.body.center().x - VIEW_W / 2.0;
    let smoothing = 1.0 - (-state.tuning.camera_stiffness * dt).exp();
    state.camera_x = lerp(state.camera_x, target, smoothing).clamp(0.0, (world_w - VIEW_W).max(0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::grid::{Tile, TileGrid};
    use super::super::level::Enemy;
    use crate::consts::SIM_DT;
    use glam::Vec2;

    /// Session with the hand-authored level swapped for a big empty grid,
    /// player floating mid-air with timers cleared
    fn airborne_state() -> GameState {
        let mut state = GameState::new();
        state.level.grid = TileGrid::new(60, 30);
        state.level.enemies.clear();
        state.level.coins.clear();
        state.player.body.pos = Vec2::new(300.0, 100.0);
        state.player.body.vel = Vec2::ZERO;
        state.player.body.on_ground = false;
        state.player.invuln = 0.0;
        state.player.jump_buffer = 0.0;
        state.player.coyote = 0.0;
        state
    }

    fn count_jumps(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Jumped { .. }))
            .count()
    }

    #[test]
    fn jump_within_coyote_window_succeeds() {
        let mut state = airborne_state();
        state.player.coyote = state.tuning.coyote_window;

        // 0.05s of falling with no input
        for _ in 0..6 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(count_jumps(&events), 1);
        assert!(state.player.body.vel.y < -400.0);
    }

    #[test]
    fn jump_after_coyote_window_fails() {
        let mut state = airborne_state();
        state.player.coyote = state.tuning.coyote_window;

        // 0.15s of falling, past the 0.12s window
        for _ in 0..18 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(count_jumps(&events), 0);
        assert!(state.player.body.vel.y > 0.0);
    }

    #[test]
    fn jump_consumes_both_timers() {
        let mut state = airborne_state();
        state.player.coyote = state.tuning.coyote_window;
        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };

        // Hold jump for a quarter second; still airborne throughout
        let mut jumps = 0;
        for _ in 0..30 {
            jumps += count_jumps(&tick(&mut state, &input, SIM_DT));
        }
        assert_eq!(jumps, 1);
    }

    #[test]
    fn buffered_jump_fires_on_landing() {
        let mut state = airborne_state();
        for tx in 0..60 {
            state.level.grid.set(tx, 10, Tile::Ground);
        }
        // Floor top is y=240; start just above it, falling, jump held
        state.player.body.pos = Vec2::new(300.0, 210.0);
        state.player.body.vel.y = 300.0;

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        let mut jumps = 0;
        for _ in 0..12 {
            jumps += count_jumps(&tick(&mut state, &input, SIM_DT));
        }
        // Lands with the buffer armed, coyote re-arms on the ground tick
        assert_eq!(jumps, 1);
    }

    #[test]
    fn damping_snaps_slow_speeds_to_zero() {
        let mut state = airborne_state();
        state.player.body.vel.x = 3.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.body.vel.x, 0.0);
    }

    #[test]
    fn run_speed_is_clamped() {
        let mut state = airborne_state();
        state.player.body.vel.x = 500.0;
        let input = TickInput {
            right: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.body.vel.x, state.tuning.max_run_speed);
    }

    #[test]
    fn facing_follows_input_and_holds_when_idle() {
        let mut state = airborne_state();
        let left = TickInput {
            left: true,
            ..TickInput::default()
        };
        tick(&mut state, &left, SIM_DT);
        assert_eq!(state.player.face, -1);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.face, -1);
    }

    #[test]
    fn coin_pickup_is_one_shot() {
        let mut state = GameState::new();
        // Stand on the first platform run, centered on the first coin
        let coin = state.level.coins[0];
        state.player.body.pos = coin.pos - state.player.body.size * 0.5;
        state.player.body.vel = Vec2::ZERO;
        state.player.invuln = 0.0;

        let mut taken = 0;
        for _ in 0..10 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT);
            taken += events
                .iter()
                .filter(|e| matches!(e, GameEvent::CoinTaken { .. }))
                .count();
        }

        assert_eq!(taken, 1);
        assert_eq!(state.coins, 1);
        assert_eq!(state.score, state.tuning.coin_score);
    }

    #[test]
    fn shallow_falling_contact_stomps() {
        let mut state = airborne_state();
        state.player.body.vel.y = 150.0;
        // Player bottom starts 5 above the enemy top; both fall a little
        // during the tick but the overlap stays shallow
        let enemy_y = state.player.body.bottom() - 5.0;
        state
            .level
            .enemies
            .push(Enemy::new(Vec2::new(296.0, enemy_y), 0.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!state.level.enemies[0].alive);
        assert_eq!(
            state.level.enemies[0].stomped_timer,
            state.tuning.stomp_squash_time
        );
        assert_eq!(state.player.body.vel.y, -state.tuning.stomp_bounce);
        assert_eq!(state.score, state.tuning.stomp_score);
        assert_eq!(state.lives, 3);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Stomped { .. })));
    }

    #[test]
    fn deep_falling_contact_hurts() {
        let mut state = airborne_state();
        state.player.body.vel.y = 150.0;
        // Overlap well past the stomp threshold
        let enemy_y = state.player.body.bottom() - 18.0;
        state
            .level
            .enemies
            .push(Enemy::new(Vec2::new(296.0, enemy_y), 0.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.level.enemies[0].alive);
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Hurt { .. })));
    }

    #[test]
    fn enemy_reverses_at_walls_with_magnitude_kept() {
        let mut state = airborne_state();
        for tx in 0..20 {
            state.level.grid.set(tx, 10, Tile::Ground);
        }
        for ty in 5..10 {
            state.level.grid.set(10, ty, Tile::Ground);
        }
        // Keep the player far away from the patrol
        state.player.body.pos = Vec2::new(30.0, 100.0);
        state
            .level
            .enemies
            .push(Enemy::new(Vec2::new(168.0, 220.0), 55.0));

        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        let enemy = &state.level.enemies[0];
        assert_eq!(enemy.patrol_vx, -55.0);
        // Rests against the wall face at x=240, never inside it
        assert!(enemy.body.pos.x + enemy.body.size.x <= 240.0 + 1e-3);
    }

    #[test]
    fn enemy_falls_off_ledges_instead_of_turning() {
        let mut state = airborne_state();
        for tx in 0..5 {
            state.level.grid.set(tx, 10, Tile::Ground);
        }
        state.player.body.pos = Vec2::new(1000.0, 100.0);
        state
            .level
            .enemies
            .push(Enemy::new(Vec2::new(48.0, 220.0), 55.0));

        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        let enemy = &state.level.enemies[0];
        assert_eq!(enemy.patrol_vx, 55.0);
        assert!(enemy.body.pos.x > 5.0 * TILE);
        assert!(enemy.body.pos.y > 220.0);
    }

    #[test]
    fn stomped_enemy_skips_physics_and_counts_down() {
        let mut state = airborne_state();
        let mut enemy = Enemy::new(Vec2::new(30.0, 200.0), 55.0);
        enemy.alive = false;
        enemy.stomped_timer = 0.1;
        state.level.enemies.push(enemy);
        state.player.body.pos = Vec2::new(1000.0, 100.0);

        for _ in 0..24 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        let enemy = &state.level.enemies[0];
        assert_eq!(enemy.body.pos, Vec2::new(30.0, 200.0));
        assert!(enemy.stomped_timer <= 0.0);
        assert!(!enemy.visible());
    }

    #[test]
    fn falling_out_of_the_world_kills_through_invulnerability() {
        let mut state = airborne_state();
        state.player.invuln = 5.0;
        state.player.body.pos.y = 800.0; // past (30 + 2) tiles
        state.player.body.vel.y = 100.0;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.lives, 2);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Hurt { .. })));
        // Respawned at the level spawn point
        assert_eq!(state.player.body.pos, Vec2::new(3.0 * TILE, 10.0 * TILE));
    }

    #[test]
    fn reaching_the_flag_wins_exactly_once() {
        let mut state = GameState::new();
        let (zone_pos, _) = state.level.flag.pole_zone();
        state.player.body.pos = Vec2::new(zone_pos.x - 10.0, 300.0);
        state.player.body.vel = Vec2::ZERO;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(events.contains(&GameEvent::Won));

        // Terminal: further ticks do nothing
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn paused_sessions_do_not_advance() {
        let mut state = GameState::new();
        state.toggle_pause();
        let before = state.clone();
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn camera_chases_the_player_within_world_bounds() {
        let mut state = airborne_state();
        state.level.grid = TileGrid::new(160, 18);
        for tx in 0..160 {
            state.level.grid.set(tx, 16, Tile::Ground);
            state.level.grid.set(tx, 17, Tile::Ground);
        }
        state.player.body.pos.x = 2000.0;
        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let target = state.player.body.center().x - VIEW_W / 2.0;
        assert!((state.camera_x - target).abs() < 30.0);
        assert!(state.camera_x >= 0.0);
    }
}
