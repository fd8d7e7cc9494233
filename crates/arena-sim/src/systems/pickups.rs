//! Path: crates/arena-sim/src/systems/pickups.rs
//! Summary: ピックアップの寿命・吸引・回収処理

use crate::systems::powerups;
use crate::world::{FrameEvent, PickupKind, Sound, World};
use arena_core::constants::{PLAYER_RADIUS, XP_PER_GEM};

/// 吸引中のピックアップがプレイヤーへ向かう速度（px/s）
const ATTRACT_SPEED: f32 = 300.0;
/// ピックアップ自体の回収半径
const PICKUP_RADIUS: f32 = 12.0;

/// ピックアップの 1 フレーム分の更新: 寿命 → 吸引 → 回収。
/// 寿命はシミュレーション時計に乗るため、ポーズ中は減らない。
pub(crate) fn update_pickups(w: &mut World, dt: f32) {
    let attract_radius = powerups::effective_attract_radius(w);
    let attract_sq = if attract_radius == f32::MAX {
        f32::MAX
    } else {
        attract_radius * attract_radius
    };
    let collect_reach = PLAYER_RADIUS + PICKUP_RADIUS;
    let collect_sq = collect_reach * collect_reach;

    for i in 0..w.pickups.len() {
        if !w.pickups.alive[i] {
            continue;
        }
        w.pickups.lifetime[i] -= dt;
        if w.pickups.lifetime[i] <= 0.0 {
            w.pickups.kill(i);
            continue;
        }

        let dx = w.player.x - w.pickups.positions_x[i];
        let dy = w.player.y - w.pickups.positions_y[i];
        let d_sq = dx * dx + dy * dy;

        if d_sq <= attract_sq && d_sq > collect_sq {
            // オーバーシュートしないようにステップをクランプ
            let dist = d_sq.sqrt();
            let step = (ATTRACT_SPEED * dt).min(dist);
            w.pickups.positions_x[i] += dx / dist * step;
            w.pickups.positions_y[i] += dy / dist * step;
        }

        let dx = w.player.x - w.pickups.positions_x[i];
        let dy = w.player.y - w.pickups.positions_y[i];
        if dx * dx + dy * dy <= collect_sq {
            collect(w, i);
        }
    }
}

fn collect(w: &mut World, i: usize) {
    let kind = w.pickups.kinds[i];
    w.pickups.kill(i);
    w.frame_events.push(FrameEvent::PickupCollected { kind });
    match kind {
        PickupKind::Gem => {
            w.grant_xp(XP_PER_GEM);
            w.push_sound(Sound::XpCollect);
        }
        PickupKind::Health => {
            w.player.hp = (w.player.hp + 1).min(w.player.max_hp);
            w.push_sound(Sound::HealthCollect);
        }
        PickupKind::Power(p) => {
            w.powerups.activate(p, w.clock);
            w.frame_events.push(FrameEvent::PowerUpActivated { kind: p });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::constants::GEM_LIFETIME;
    use arena_core::powerup::PowerUpKind;

    #[test]
    fn expired_pickup_disappears() {
        let mut w = World::new(1);
        w.pickups.spawn(10.0, 10.0, PickupKind::Gem);
        update_pickups(&mut w, GEM_LIFETIME + 0.1);
        assert_eq!(w.pickups.count, 0);
        // 回収されたわけではない
        assert_eq!(w.xp, 0);
    }

    #[test]
    fn gem_in_reach_grants_xp() {
        let mut w = World::new(1);
        w.pickups.spawn(w.player.x + 10.0, w.player.y, PickupKind::Gem);
        update_pickups(&mut w, 0.016);
        assert_eq!(w.pickups.count, 0);
        assert_eq!(w.xp, XP_PER_GEM);
    }

    #[test]
    fn gem_inside_attract_radius_moves_toward_the_player() {
        let mut w = World::new(1);
        // 吸引半径 60 の内側、回収半径の外側
        let start_x = w.player.x + 50.0;
        w.pickups.spawn(start_x, w.player.y, PickupKind::Gem);
        update_pickups(&mut w, 0.016);
        assert!(w.pickups.alive[0]);
        assert!(w.pickups.positions_x[0] < start_x);
    }

    #[test]
    fn gem_outside_attract_radius_stays_put() {
        let mut w = World::new(1);
        let start_x = w.player.x + 200.0;
        w.pickups.spawn(start_x, w.player.y, PickupKind::Gem);
        update_pickups(&mut w, 0.016);
        assert!((w.pickups.positions_x[0] - start_x).abs() < 0.001);
    }

    #[test]
    fn magnet_pulls_from_across_the_field() {
        let mut w = World::new(1);
        w.powerups.activate(PowerUpKind::Magnet, w.clock);
        let start_x = w.player.x + 500.0;
        w.pickups.spawn(start_x, w.player.y, PickupKind::Gem);
        update_pickups(&mut w, 0.016);
        assert!(w.pickups.positions_x[0] < start_x);
    }

    #[test]
    fn health_heals_but_never_over_the_cap() {
        let mut w = World::new(1);
        w.player.hp = w.player.max_hp - 1;
        w.pickups.spawn(w.player.x, w.player.y, PickupKind::Health);
        update_pickups(&mut w, 0.016);
        assert_eq!(w.player.hp, w.player.max_hp);

        w.pickups.spawn(w.player.x, w.player.y, PickupKind::Health);
        update_pickups(&mut w, 0.016);
        assert_eq!(w.player.hp, w.player.max_hp);
    }

    #[test]
    fn powerup_pickup_activates_the_effect() {
        let mut w = World::new(1);
        w.pickups.spawn(w.player.x, w.player.y, PickupKind::Power(PowerUpKind::Speed));
        update_pickups(&mut w, 0.016);
        assert!(w.powerups.is_active(PowerUpKind::Speed));
        assert!(w
            .frame_events
            .iter()
            .any(|e| matches!(e, FrameEvent::PowerUpActivated { kind: PowerUpKind::Speed })));
    }
}
