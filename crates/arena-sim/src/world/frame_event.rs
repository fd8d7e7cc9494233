//! Path: crates/arena-sim/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（UI/オーディオコラボレータ用）

use super::pickup::PickupKind;
use arena_core::enemy::EnemyKind;
use arena_core::powerup::PowerUpKind;

/// 名前付き効果音。オーディオコラボレータへの fire-and-forget 通知。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sound {
    Hit,
    Death,
    PlayerHit,
    XpCollect,
    LevelUp,
    Fire,
    AoeActivate,
    HealthCollect,
}

/// ゲームオーバーの到達経路
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOverReason {
    Death,
    TimeUp,
}

/// フレーム内で発生したイベント。毎フレーム drain され、
/// コラボレータは平データのみを受け取る（戻り値は見ない）。
#[derive(Clone, Copy, Debug)]
pub enum FrameEvent {
    EnemyKilled     { kind: EnemyKind },
    BossDefeated    { kills_this_stage: u32 },
    PlayerDamaged   { damage: i32 },
    LevelUp         { new_level: u32 },
    StageTransition { new_stage: u32 },
    GameOver        { reason: GameOverReason },
    PickupCollected { kind: PickupKind },
    PowerUpActivated { kind: PowerUpKind },
    AoePulse        { x: f32, y: f32, radius: f32 },
    /// フローティングダメージ数字（クリティカルは強調表示）
    DamageNumber    { x: f32, y: f32, amount: u32, crit: bool },
    Sound(Sound),
}
