//! Path: crates/arena-sim/src/error.rs
//! Summary: シミュレーション操作のエラー型

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    #[error("game already started")]
    AlreadyStarted,
    #[error("game is not running")]
    NotRunning,
    #[error("no level-up menu is open")]
    NoPendingLevelUp,
    #[error("upgrade choice out of range")]
    InvalidChoice,
}
