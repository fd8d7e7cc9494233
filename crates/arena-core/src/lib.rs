//! Path: crates/arena-core/src/lib.rs
//! Summary: アリーナコア共通ロジック（定数・難易度テーブル・敵パラメータ・物理プリミティブ）

pub mod constants;
pub mod enemy;
pub mod level;
pub mod physics;
pub mod powerup;
pub mod util;
