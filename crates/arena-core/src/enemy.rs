//! Path: crates/arena-core/src/enemy.rs
//! Summary: 敵種類・基礎パラメータ・タイプ別特性の共通定義

use crate::constants::{BOSS_DEFAULT_HP, CHARGE_SPEED_MULT};

/// 敵の種類
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum EnemyKind {
    #[default]
    Normal   = 0,
    Strong   = 1,
    Elite    = 2,
    Swarm    = 3,
    Charger  = 4,
    Splitter = 5,
    Exploder = 6,
    Boss     = 7,
}

impl EnemyKind {
    /// 未知の ID は Normal にフォールバックする（防御的デフォルト）
    pub fn from_u8(id: u8) -> Self {
        match id {
            1 => Self::Strong,
            2 => Self::Elite,
            3 => Self::Swarm,
            4 => Self::Charger,
            5 => Self::Splitter,
            6 => Self::Exploder,
            7 => Self::Boss,
            _ => Self::Normal,
        }
    }

    /// レベル倍率適用後の最大 HP。
    /// Normal/Swarm=1×, Strong=2×, Elite=3×。
    /// Charger/Splitter/Exploder は固定低 HP、Boss は呼び出し側が上書きする。
    pub fn max_hp(&self, health_mult: f32) -> f32 {
        match self {
            Self::Normal   => 2.0 * health_mult,
            Self::Strong   => 4.0 * health_mult,
            Self::Elite    => 6.0 * health_mult,
            Self::Swarm    => 2.0 * health_mult,
            Self::Charger  => 2.0,
            Self::Splitter => 2.0,
            Self::Exploder => 1.0,
            Self::Boss     => BOSS_DEFAULT_HP,
        }
    }

    /// レベル倍率適用後の移動速度。Boss は 0.7×、Charger は 1.5×。
    pub fn speed(&self, speed_mult: f32) -> f32 {
        let base = match self {
            Self::Normal   => 70.0,
            Self::Strong   => 55.0,
            Self::Elite    => 50.0,
            Self::Swarm    => 110.0,
            Self::Charger  => 80.0,
            Self::Splitter => 65.0,
            Self::Exploder => 90.0,
            Self::Boss     => 60.0,
        };
        let factor = match self {
            Self::Boss    => 0.7,
            Self::Charger => 1.5,
            _ => 1.0,
        };
        base * speed_mult * factor
    }

    /// 当たり判定・分離計算に使うサイズ（直径 px）。Boss は 2×。
    pub fn size(&self) -> f32 {
        match self {
            Self::Swarm => 24.0,
            Self::Boss  => 80.0,
            _ => 40.0,
        }
    }

    /// プレイヤー接触時のダメージ
    pub fn contact_damage(&self) -> i32 {
        match self {
            Self::Boss => 2,
            _ => 1,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Self::Boss)
    }

    /// チャージ突進中の速度倍率（Charger 専用）
    pub fn charge_mult(&self) -> f32 {
        match self {
            Self::Charger => CHARGE_SPEED_MULT,
            _ => 1.0,
        }
    }
}

/// 敵タイプの解禁スケジュール（経過秒, 種類）。
/// Normal は最初から、各タイプは一度だけ独立したスポーンループを開始する。
pub const UNLOCK_SCHEDULE: &[(f32, EnemyKind)] = &[
    ( 30.0, EnemyKind::Strong),
    ( 60.0, EnemyKind::Splitter),
    ( 90.0, EnemyKind::Exploder),
    (120.0, EnemyKind::Swarm),
    (150.0, EnemyKind::Elite),
    (180.0, EnemyKind::Charger),
];
