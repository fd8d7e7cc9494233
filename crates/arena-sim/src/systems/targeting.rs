//! Path: crates/arena-sim/src/systems/targeting.rs
//! Summary: オートファイアの索敵とボレー発射

use crate::world::{Sound, World};
use arena_core::constants::PROJECTILE_BOUNCES;

/// 索敵半径内の生存敵を近い順に選び、弾数分だけ同時発射する。
/// 候補が弾数より少なければその分だけ撃ち、ゼロならこのボレーは流れる。
/// 距離が同じ場合はスロット番号の小さい方（先に登録された方）が勝つ。
pub(crate) fn fire_volley(w: &mut World) {
    let px = w.player.x;
    let py = w.player.y;
    let radius = w.stats.target_radius;
    let radius_sq = radius * radius;

    let mut candidates: Vec<(usize, f32)> = Vec::new();
    let nearby = w.collision.query_nearby(px, py, radius);
    for i in nearby {
        if !w.enemies.live[i] {
            continue;
        }
        let dx = w.enemies.positions_x[i] - px;
        let dy = w.enemies.positions_y[i] - py;
        let d_sq = dx * dx + dy * dy;
        if d_sq <= radius_sq {
            candidates.push((i, d_sq));
        }
    }
    // セル走査の順序はハッシュ依存なので、まずスロット順に正規化してから
    // 距離で安定ソートする（同距離タイはスロット順で決定的）
    candidates.sort_by_key(|&(i, _)| i);
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    let shots = w.stats.projectile_count.min(candidates.len());
    for &(i, d_sq) in candidates.iter().take(shots) {
        let dx = w.enemies.positions_x[i] - px;
        let dy = w.enemies.positions_y[i] - py;
        let dist = d_sq.sqrt();
        // プレイヤーに重なった敵には真上方向へ撃つ
        let (ux, uy) = if dist > 1e-3 { (dx / dist, dy / dist) } else { (0.0, -1.0) };
        w.projectiles.spawn(px, py, ux, uy, PROJECTILE_BOUNCES);
    }
    if shots > 0 {
        w.push_sound(Sound::Fire);
    }
}
