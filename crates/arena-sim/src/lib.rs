//! Path: crates/arena-sim/src/lib.rs
//! Summary: サバイバルアリーナのシミュレーションコア（進行制御・敵挙動・戦闘解決）
//!
//! 外部コラボレータ（描画・オーディオ・管理サーフェス）は [`Director`] を
//! 1 つ所有し、毎フレーム [`Director::run_frame`] を呼んでから
//! [`Director::events`] を読む。ワールドへの直接書き込みは公開しない。

pub mod director;
pub mod error;
pub mod sched;
mod systems;
pub mod upgrade;
pub mod world;

pub use director::{Director, PauseReason, Phase};
pub use error::SimError;
pub use upgrade::UpgradeKind;
pub use world::{FrameEvent, GameOverReason, Sound, World};
