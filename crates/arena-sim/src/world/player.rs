//! Path: crates/arena-sim/src/world/player.rs
//! Summary: プレイヤー状態（座標・入力・HP）とアップグレード対象ステータス

use arena_core::constants::{
    ATTRACT_RADIUS, BASE_DAMAGE, FIELD_HEIGHT, FIELD_WIDTH, FIRE_INTERVAL, PLAYER_MAX_HP,
    PLAYER_SPEED, PROJECTILE_COUNT, TARGET_RADIUS,
};

/// プレイヤー状態
pub struct PlayerState {
    pub x:           f32,
    pub y:           f32,
    pub input_dx:    f32,
    pub input_dy:    f32,
    pub hp:          i32,
    pub max_hp:      i32,
    /// 被弾後の無敵時間の残り（秒）
    pub mercy_timer: f32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
            y: FIELD_HEIGHT / 2.0,
            input_dx: 0.0,
            input_dy: 0.0,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            mercy_timer: 0.0,
        }
    }
}

/// レベルアップで変化するプレイヤーステータス。
/// 上限・下限はアップグレード適用側（upgrade モジュール）が守る。
#[derive(Clone, Copy, Debug)]
pub struct PlayerStats {
    pub move_speed:       f32,
    pub fire_interval:    f32,
    pub projectile_count: usize,
    pub target_radius:    f32,
    pub attract_radius:   f32,
    pub base_damage:      f32,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self {
            move_speed:       PLAYER_SPEED,
            fire_interval:    FIRE_INTERVAL,
            projectile_count: PROJECTILE_COUNT,
            target_radius:    TARGET_RADIUS,
            attract_radius:   ATTRACT_RADIUS,
            base_damage:      BASE_DAMAGE,
        }
    }
}
