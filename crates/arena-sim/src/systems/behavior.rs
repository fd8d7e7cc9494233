//! Path: crates/arena-sim/src/systems/behavior.rs
//! Summary: 敵挙動（追尾・スローフィールド・チャージ突進・分離・死亡アニメ）

use crate::world::{BarColor, BossBar, World};
use arena_core::constants::{
    CHARGE_COOLDOWN, CHARGE_DURATION, CHARGE_RANGE, FIELD_HEIGHT, FIELD_MARGIN, FIELD_WIDTH,
    SEPARATION_REFRESH,
};
use arena_core::enemy::EnemyKind;
use arena_core::physics::separation::refresh_separation;
use rayon::prelude::*;

/// 生存中（live かつ非 dying）の全敵を 1 フレーム分更新する。
/// ポーズ中は呼ばれない。
pub(crate) fn update_enemies(w: &mut World, dt: f32) {
    // 死亡アニメーションの進行とスロット解放
    w.enemies.update_dying(dt);

    // 分離ベクトルは毎フレームではなくスロットリング間隔で再計算し、
    // 間のフレームはキャッシュを使う
    w.sep_refresh_timer -= dt;
    if w.sep_refresh_timer <= 0.0 {
        refresh_separation(&mut w.enemies);
        w.sep_refresh_timer = SEPARATION_REFRESH;
    }

    let px = w.player.x;
    let py = w.player.y;
    let slow_active = w.slow_field.active;
    let slow_factor = 1.0 - w.slow_field.pct / 100.0;
    let slow_radius_sq = w.stats.target_radius * w.stats.target_radius;

    // スカラーパス: チャージ制御と速度意図の決定。
    // 速度意図は毎フレーム導出し直す（保存状態はチャージ方向のみ）。
    let len = w.enemies.len();
    for i in 0..len {
        if !w.enemies.live[i] {
            w.enemies.vel_x[i] = 0.0;
            w.enemies.vel_y[i] = 0.0;
            continue;
        }
        let dx = px - w.enemies.positions_x[i];
        let dy = py - w.enemies.positions_y[i];
        let dist_sq = dx * dx + dy * dy;

        if w.enemies.kinds[i] == EnemyKind::Charger {
            if w.enemies.charge_timer[i] > 0.0 {
                // 突進中: ロック済みの方向に 3 倍速、通常移動を上書き
                w.enemies.charge_timer[i] -= dt;
                let burst = w.enemies.speeds[i] * EnemyKind::Charger.charge_mult();
                w.enemies.vel_x[i] = w.enemies.charge_dx[i] * burst;
                w.enemies.vel_y[i] = w.enemies.charge_dy[i] * burst;
                continue;
            }
            w.enemies.charge_cooldown[i] -= dt;
            if w.enemies.charge_cooldown[i] <= 0.0
                && dist_sq <= CHARGE_RANGE * CHARGE_RANGE
                && dist_sq > 1e-6
            {
                let dist = dist_sq.sqrt();
                w.enemies.charge_dx[i] = dx / dist;
                w.enemies.charge_dy[i] = dy / dist;
                w.enemies.charge_timer[i] = CHARGE_DURATION;
                w.enemies.charge_cooldown[i] = CHARGE_COOLDOWN;
                let burst = w.enemies.speeds[i] * EnemyKind::Charger.charge_mult();
                w.enemies.vel_x[i] = w.enemies.charge_dx[i] * burst;
                w.enemies.vel_y[i] = w.enemies.charge_dy[i] * burst;
                continue;
            }
        }

        // 距離ゼロではゼロ除算を避けて動かない
        if dist_sq <= 1e-6 {
            w.enemies.vel_x[i] = 0.0;
            w.enemies.vel_y[i] = 0.0;
            continue;
        }
        let dist = dist_sq.sqrt();
        let mut speed = w.enemies.speeds[i];
        if slow_active && dist_sq <= slow_radius_sq {
            speed *= slow_factor;
        }
        w.enemies.vel_x[i] = (dx / dist) * speed;
        w.enemies.vel_y[i] = (dy / dist) * speed;
    }

    // 並列統合パス: 位置 += (追尾速度 + 分離ベクトル) × dt
    {
        let e = &mut w.enemies;
        let n = e.positions_x.len();
        let positions_x = &mut e.positions_x[..n];
        let positions_y = &mut e.positions_y[..n];
        let vel_x = &e.vel_x[..n];
        let vel_y = &e.vel_y[..n];
        let sep_x = &e.sep_x[..n];
        let sep_y = &e.sep_y[..n];
        let live  = &e.live[..n];

        (positions_x, positions_y, vel_x, vel_y, sep_x, sep_y, live)
            .into_par_iter()
            .for_each(|(x, y, vx, vy, sx, sy, is_live)| {
                if !*is_live {
                    return;
                }
                *x += (*vx + *sx) * dt;
                *y += (*vy + *sy) * dt;
            });
    }

    // フィールド外クリーンアップ（突進のオーバーシュート等）
    for i in 0..len {
        if !w.enemies.live[i] {
            continue;
        }
        let x = w.enemies.positions_x[i];
        let y = w.enemies.positions_y[i];
        if x < -FIELD_MARGIN
            || x > FIELD_WIDTH + FIELD_MARGIN
            || y < -FIELD_MARGIN
            || y > FIELD_HEIGHT + FIELD_MARGIN
        {
            log::debug!("enemy {i} left the playfield, despawning");
            w.enemies.despawn(i);
        }
    }

    update_boss_bars(w);
}

/// ボス HP バーを生存中のボスから作り直す。
/// dying になったボスはここに現れないため、バーはその時点で消える。
fn update_boss_bars(w: &mut World) {
    w.boss_bars.clear();
    for i in 0..w.enemies.len() {
        if !w.enemies.live[i] || !w.enemies.kinds[i].is_boss() {
            continue;
        }
        let frac = (w.enemies.hp[i] / w.enemies.max_hp[i]).clamp(0.0, 1.0);
        w.boss_bars.push(BossBar {
            target:   w.enemies.id_at(i),
            x:        w.enemies.positions_x[i],
            // バーはボスの頭上に追従する
            y:        w.enemies.positions_y[i] - w.enemies.kinds[i].size(),
            fraction: frac,
            color:    BarColor::for_fraction(frac),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::level::LevelConfig;

    fn world_with_enemy(x: f32, y: f32, kind: EnemyKind) -> World {
        let mut w = World::new(42);
        w.enemies.spawn(x, y, kind, LevelConfig::get(1), None);
        w
    }

    #[test]
    fn enemy_seeks_the_player() {
        let mut w = world_with_enemy(100.0, 360.0, EnemyKind::Normal);
        let before = w.enemies.positions_x[0];
        update_enemies(&mut w, 0.1);
        // プレイヤーはフィールド中央 (640, 360) にいる
        assert!(w.enemies.positions_x[0] > before);
        assert!((w.enemies.positions_y[0] - 360.0).abs() < 1.0);
    }

    #[test]
    fn enemy_at_player_position_does_not_move() {
        let mut w = World::new(1);
        let (px, py) = (w.player.x, w.player.y);
        w.enemies.spawn(px, py, EnemyKind::Normal, LevelConfig::get(1), None);
        update_enemies(&mut w, 0.1);
        assert!((w.enemies.positions_x[0] - px).abs() < 0.001);
        assert!((w.enemies.positions_y[0] - py).abs() < 0.001);
    }

    #[test]
    fn slow_field_reduces_speed_inside_the_zone() {
        let mut w = world_with_enemy(540.0, 360.0, EnemyKind::Normal);
        let dt = 0.1;
        update_enemies(&mut w, dt);
        let normal_step = (w.enemies.positions_x[0] - 540.0).abs();

        let mut w2 = world_with_enemy(540.0, 360.0, EnemyKind::Normal);
        w2.slow_field.active = true;
        w2.slow_field.pct = 50.0;
        update_enemies(&mut w2, dt);
        let slowed_step = (w2.enemies.positions_x[0] - 540.0).abs();

        assert!((slowed_step - normal_step * 0.5).abs() < 0.01);
    }

    #[test]
    fn charger_bursts_toward_locked_direction() {
        let mut w = world_with_enemy(540.0, 360.0, EnemyKind::Charger);
        // クールダウンを消化して射程内で突進を誘発
        w.enemies.charge_cooldown[0] = 0.0;
        update_enemies(&mut w, 0.016);
        assert!(w.enemies.charge_timer[0] > 0.0);
        // 突進方向はプレイヤー方向（+x）にロックされる
        assert!(w.enemies.charge_dx[0] > 0.99);

        // 突進中の速度は通常の 3 倍
        let burst_vx = w.enemies.vel_x[0];
        let base_speed = w.enemies.speeds[0];
        assert!((burst_vx - base_speed * 3.0).abs() < 0.1);
    }

    #[test]
    fn charger_waits_for_cooldown_before_first_dash() {
        let mut w = world_with_enemy(540.0, 360.0, EnemyKind::Charger);
        update_enemies(&mut w, 0.016);
        assert_eq!(w.enemies.charge_timer[0], 0.0);
    }

    #[test]
    fn dying_enemy_does_not_move() {
        let mut w = world_with_enemy(100.0, 100.0, EnemyKind::Normal);
        w.enemies.start_dying(0);
        update_enemies(&mut w, 0.05);
        assert!((w.enemies.positions_x[0] - 100.0).abs() < 0.001);
    }

    #[test]
    fn boss_bar_tracks_and_recolors() {
        let mut w = World::new(9);
        let cfg = LevelConfig::get(1);
        w.enemies.spawn(200.0, 200.0, EnemyKind::Boss, cfg, Some(100.0));
        update_enemies(&mut w, 0.0);
        assert_eq!(w.boss_bars.len(), 1);
        assert_eq!(w.boss_bars[0].color, BarColor::Green);

        w.enemies.hp[0] = 30.0;
        update_enemies(&mut w, 0.0);
        assert_eq!(w.boss_bars[0].color, BarColor::Yellow);

        w.enemies.hp[0] = 10.0;
        update_enemies(&mut w, 0.0);
        assert_eq!(w.boss_bars[0].color, BarColor::Red);

        // dying でバーは撤去される
        w.enemies.start_dying(0);
        update_enemies(&mut w, 0.0);
        assert!(w.boss_bars.is_empty());
    }
}
