//! Path: crates/arena-sim/src/systems/spawn.rs
//! Summary: 敵スポーン（エッジ・ホードリング・ボス同時出現・分裂子）

use crate::world::World;
use arena_core::constants::{
    FIELD_HEIGHT, FIELD_WIDTH, HORDE_BASE, HORDE_INCREMENT, HORDE_RING_RADIUS,
    HORDE_STRONG_CHANCE, SPLIT_COUNT, SPLIT_OFFSET, SWARM_BURST,
};
use arena_core::enemy::EnemyKind;
use arena_core::util::{ring_positions, spawn_position_on_edge};

/// フィールド境界上に 1 体スポーンする。
/// Swarm はまとめて出現する（バースト内は位置を散らす）。
pub(crate) fn spawn_edge(w: &mut World, kind: EnemyKind) {
    let (x, y) = spawn_position_on_edge(&mut w.rng, FIELD_WIDTH, FIELD_HEIGHT);
    let cfg = w.config();
    let burst = if kind == EnemyKind::Swarm { SWARM_BURST } else { 1 };
    for _ in 0..burst {
        let jx = w.rng.next_range(-20.0, 20.0);
        let jy = w.rng.next_range(-20.0, 20.0);
        w.enemies.spawn(x + jx, y + jy, kind, cfg, None);
    }
    log::trace!("spawned {burst} x {kind:?} at edge ({x:.0}, {y:.0})");
}

/// 指定座標にスポーンする（管理サーフェス用）。
/// Boss はステージテーブルの HP を持つ。
pub(crate) fn spawn_at(w: &mut World, kind: EnemyKind, x: f32, y: f32) {
    let cfg = w.config();
    let hp = kind.is_boss().then_some(cfg.boss_health);
    w.enemies.spawn(x, y, kind, cfg, hp);
}

/// ホード: プレイヤーを中心としたリング上に等間隔で一斉出現。
/// 規模は波数ごとに増え、一定確率で Strong が混じる。
pub(crate) fn spawn_horde(w: &mut World, wave: usize) {
    let count = HORDE_BASE + HORDE_INCREMENT * wave;
    let points = ring_positions(w.player.x, w.player.y, HORDE_RING_RADIUS, count);
    let cfg = w.config();
    for (x, y) in points {
        let kind = if w.rng.chance(HORDE_STRONG_CHANCE) {
            EnemyKind::Strong
        } else {
            EnemyKind::Normal
        };
        w.enemies.spawn(x, y, kind, cfg, None);
    }
    log::debug!("horde wave {wave}: {count} enemies");
}

/// ボスをフィールド境界上に `count` 体同時スポーンする。
/// HP はステージテーブル由来。
pub(crate) fn spawn_bosses(w: &mut World, count: usize) {
    let cfg = w.config();
    for _ in 0..count {
        let (x, y) = spawn_position_on_edge(&mut w.rng, FIELD_WIDTH, FIELD_HEIGHT);
        w.enemies.spawn(x, y, EnemyKind::Boss, cfg, Some(cfg.boss_health));
    }
    log::debug!("spawned {count} boss(es) with {} hp each", cfg.boss_health);
}

/// Splitter の死亡位置から左右オフセットに Normal の分裂子を出す。
/// 子の HP は呼び出し側が渡す（親の最大 HP の半分）。
pub(crate) fn spawn_split_children(w: &mut World, x: f32, y: f32, child_hp: f32) {
    let cfg = w.config();
    let offsets = [-SPLIT_OFFSET, SPLIT_OFFSET];
    for k in 0..SPLIT_COUNT {
        let dx = offsets[k % offsets.len()];
        w.enemies.spawn(x + dx, y, EnemyKind::Normal, cfg, Some(child_hp));
    }
}
