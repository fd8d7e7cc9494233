//! Path: crates/arena-sim/src/systems/aoe.rs
//! Summary: 範囲攻撃（AOE）武器のパルス判定

use crate::systems::{combat, powerups};
use crate::world::{FrameEvent, Sound, World};

/// AOE 武器の更新。タイマーが切れて武装状態になったら毎フレーム
/// 索敵半径を走査し、ヒットが 1 体以上成立したときだけクールダウンを
/// 再装填する。空振りしている間は武装状態のままになる。
pub(crate) fn update_aoe(w: &mut World, dt: f32) {
    if !w.aoe.active {
        return;
    }
    if w.aoe.timer > 0.0 {
        w.aoe.timer -= dt;
        if w.aoe.timer > 0.0 {
            return;
        }
    }

    let px = w.player.x;
    let py = w.player.y;
    let radius = w.stats.target_radius;
    let radius_sq = radius * radius;
    let damage = powerups::effective_damage(w);

    // ヒット確定前に対象を集める（キル処理が敵配列を書き換えるため）
    let mut targets: Vec<usize> = Vec::new();
    let nearby = w.collision.query_nearby(px, py, radius);
    for i in nearby {
        if !w.enemies.live[i] {
            continue;
        }
        let dx = w.enemies.positions_x[i] - px;
        let dy = w.enemies.positions_y[i] - py;
        if dx * dx + dy * dy <= radius_sq {
            targets.push(i);
        }
    }
    if targets.is_empty() {
        return;
    }

    for i in targets {
        combat::hit_enemy(w, i, damage, true, true);
    }
    // クールダウンはヒット成立からしか始まらない
    w.aoe.timer = w.aoe.cooldown;
    w.frame_events.push(FrameEvent::AoePulse { x: px, y: py, radius });
    w.push_sound(Sound::AoeActivate);
}
