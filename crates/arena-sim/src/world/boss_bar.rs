//! Path: crates/arena-sim/src/world/boss_bar.rs
//! Summary: ボス HP バーのオーバーレイデータ（UI コラボレータに渡す平データ）

use super::enemy::EnemyId;

/// HP 残量に応じたバーの色。毎フレーム再判定される。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BarColor {
    Green,
    Yellow,
    Red,
}

impl BarColor {
    /// 残量割合から色を決める（>50% 緑、>25% 黄、それ以外 赤）
    pub fn for_fraction(frac: f32) -> Self {
        if frac > 0.5 {
            Self::Green
        } else if frac > 0.25 {
            Self::Yellow
        } else {
            Self::Red
        }
    }
}

/// ボス 1 体分の 2 パート HP バー（背景 + 残量）。
/// ボス位置に追従し、ボスが dying になった時点で消える。
#[derive(Clone, Copy, Debug)]
pub struct BossBar {
    pub target:   EnemyId,
    pub x:        f32,
    pub y:        f32,
    pub fraction: f32,
    pub color:    BarColor,
}
