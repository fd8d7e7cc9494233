//! Path: crates/arena-sim/src/systems/projectiles.rs
//! Summary: 弾丸の移動・場外クリーンアップ・接触ヒット・バウンス再索敵

use crate::systems::{combat, powerups};
use crate::world::World;
use arena_core::constants::{
    FIELD_HEIGHT, FIELD_MARGIN, FIELD_WIDTH, MAX_ENEMY_HALF_SIZE, PROJECTILE_RADIUS,
    PROJECTILE_SPEED,
};

/// 全弾丸を 1 フレーム分進め、接触ヒットとバウンスを解決する。
/// 1 フレームにつき 1 弾丸 1 ヒットまで（最初の接触のみ）。
pub(crate) fn update_projectiles(w: &mut World, dt: f32) {
    let damage = powerups::effective_damage(w);
    let mut nearby: Vec<usize> = Vec::new();

    for p in 0..w.projectiles.len() {
        if !w.projectiles.alive[p] {
            continue;
        }
        w.projectiles.positions_x[p] += w.projectiles.dir_x[p] * PROJECTILE_SPEED * dt;
        w.projectiles.positions_y[p] += w.projectiles.dir_y[p] * PROJECTILE_SPEED * dt;
        let x = w.projectiles.positions_x[p];
        let y = w.projectiles.positions_y[p];

        if x < -FIELD_MARGIN
            || x > FIELD_WIDTH + FIELD_MARGIN
            || y < -FIELD_MARGIN
            || y > FIELD_HEIGHT + FIELD_MARGIN
        {
            w.projectiles.kill(p);
            continue;
        }

        // 最大の敵（ボス）の半径まで届く粗いクエリ
        w.collision
            .query_nearby_into(x, y, PROJECTILE_RADIUS + MAX_ENEMY_HALF_SIZE, &mut nearby);
        let mut contact = None;
        for &i in &nearby {
            if !w.enemies.live[i] {
                continue;
            }
            // 同じ敵への二重ヒットは世代付きハンドルで防ぐ
            if w.projectiles.hit_ids[p].contains(&w.enemies.id_at(i)) {
                continue;
            }
            let reach = PROJECTILE_RADIUS + w.enemies.kinds[i].size() / 2.0;
            let dx = w.enemies.positions_x[i] - x;
            let dy = w.enemies.positions_y[i] - y;
            if dx * dx + dy * dy <= reach * reach {
                contact = Some(i);
                break;
            }
        }

        let Some(i) = contact else { continue };
        let id = w.enemies.id_at(i);
        w.projectiles.hit_ids[p].push(id);
        combat::hit_enemy(w, i, damage, true, true);

        if w.projectiles.bounces_left[p] > 0 {
            w.projectiles.bounces_left[p] -= 1;
            if !retarget(w, p) {
                // 跳ね先がいなければ消滅
                w.projectiles.kill(p);
            }
        } else {
            w.projectiles.kill(p);
        }
    }
}

/// バウンス: 衝突地点から最も近い未ヒットの生存敵に向き直す。
/// 索敵半径は発射時と同じ。見つからなければ false。
fn retarget(w: &mut World, p: usize) -> bool {
    let x = w.projectiles.positions_x[p];
    let y = w.projectiles.positions_y[p];
    let radius_sq = w.stats.target_radius * w.stats.target_radius;

    let mut best: Option<(usize, f32)> = None;
    for i in 0..w.enemies.len() {
        if !w.enemies.live[i] {
            continue;
        }
        if w.projectiles.hit_ids[p].contains(&w.enemies.id_at(i)) {
            continue;
        }
        let dx = w.enemies.positions_x[i] - x;
        let dy = w.enemies.positions_y[i] - y;
        let d_sq = dx * dx + dy * dy;
        if d_sq > radius_sq {
            continue;
        }
        if best.map_or(true, |(_, b)| d_sq < b) {
            best = Some((i, d_sq));
        }
    }

    let Some((i, d_sq)) = best else { return false };
    let dist = d_sq.sqrt().max(1e-3);
    w.projectiles.dir_x[p] = (w.enemies.positions_x[i] - x) / dist;
    w.projectiles.dir_y[p] = (w.enemies.positions_y[i] - y) / dist;
    true
}
