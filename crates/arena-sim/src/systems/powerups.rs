//! Path: crates/arena-sim/src/systems/powerups.rs
//! Summary: パワーアップの期限ポーリングと実効ステータスの導出

use crate::world::World;
use arena_core::constants::{DAMAGE_POWERUP_MULT, SPEED_POWERUP_MULT};
use arena_core::powerup::PowerUpKind;

/// 期限切れのポーリング。シミュレーション時計に乗るため、
/// ポーズ中に期限が進むことはない。
pub(crate) fn poll(w: &mut World) {
    w.powerups.poll(w.clock);
}

/// 移動速度（Speed パワーアップで 1.5×）
pub(crate) fn effective_move_speed(w: &World) -> f32 {
    if w.powerups.is_active(PowerUpKind::Speed) {
        w.stats.move_speed * SPEED_POWERUP_MULT
    } else {
        w.stats.move_speed
    }
}

/// 弾丸・AOE のダメージ（Damage パワーアップで 2×）
pub(crate) fn effective_damage(w: &World) -> f32 {
    if w.powerups.is_active(PowerUpKind::Damage) {
        w.stats.base_damage * DAMAGE_POWERUP_MULT
    } else {
        w.stats.base_damage
    }
}

/// ジェム吸引半径（Magnet パワーアップ中はフィールド全域）
pub(crate) fn effective_attract_radius(w: &World) -> f32 {
    if w.powerups.is_active(PowerUpKind::Magnet) {
        f32::MAX
    } else {
        w.stats.attract_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::constants::{ATTRACT_RADIUS, BASE_DAMAGE, PLAYER_SPEED, POWERUP_DURATION};

    #[test]
    fn speed_powerup_scales_move_speed() {
        let mut w = World::new(1);
        assert!((effective_move_speed(&w) - PLAYER_SPEED).abs() < 0.001);
        w.powerups.activate(PowerUpKind::Speed, w.clock);
        assert!((effective_move_speed(&w) - PLAYER_SPEED * SPEED_POWERUP_MULT).abs() < 0.001);
    }

    #[test]
    fn damage_powerup_doubles_damage() {
        let mut w = World::new(1);
        w.powerups.activate(PowerUpKind::Damage, w.clock);
        assert!((effective_damage(&w) - BASE_DAMAGE * 2.0).abs() < 0.001);
    }

    #[test]
    fn magnet_powerup_covers_the_whole_field() {
        let mut w = World::new(1);
        assert!((effective_attract_radius(&w) - ATTRACT_RADIUS).abs() < 0.001);
        w.powerups.activate(PowerUpKind::Magnet, w.clock);
        assert!(effective_attract_radius(&w) > 10_000.0);
    }

    #[test]
    fn effects_expire_on_the_simulated_clock() {
        let mut w = World::new(1);
        w.powerups.activate(PowerUpKind::Speed, w.clock);
        w.clock += POWERUP_DURATION as f64 + 0.1;
        poll(&mut w);
        assert!(!w.powerups.is_active(PowerUpKind::Speed));
    }
}
