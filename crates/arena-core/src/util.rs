//! Path: crates/arena-core/src/util.rs
//! Summary: 経験値しきい値・スポーン位置などの共通ユーティリティ

use crate::constants::{XP_BASE_THRESHOLD, XP_THRESHOLD_STEP};
use crate::physics::rng::SimpleRng;

/// 現在のプレイヤーレベルから次のレベルアップに必要な経験値しきい値を返す。
/// レベルに対して単調非減少。
pub fn xp_threshold(level: u32) -> u32 {
    XP_BASE_THRESHOLD + XP_THRESHOLD_STEP * level.saturating_sub(1)
}

/// プレイフィールド四辺のいずれかの境界上に一様ランダムな点を返す。
/// 辺の選択は周長比例ではなく等確率（元実装準拠）。
pub fn spawn_position_on_edge(rng: &mut SimpleRng, width: f32, height: f32) -> (f32, f32) {
    match rng.next_u32() % 4 {
        0 => (rng.next_f32() * width, 0.0),
        1 => (rng.next_f32() * width, height),
        2 => (0.0, rng.next_f32() * height),
        _ => (width, rng.next_f32() * height),
    }
}

/// 中心の周囲、半径 `radius` のリング上に `count` 個の点を等間隔に返す（ホード用）
pub fn ring_positions(cx: f32, cy: f32, radius: f32, count: usize) -> Vec<(f32, f32)> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / count.max(1) as f32;
            (cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}
