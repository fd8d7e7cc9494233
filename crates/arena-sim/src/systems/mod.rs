//! Path: crates/arena-sim/src/systems/mod.rs
//! Summary: フレーム内システム（挙動・索敵・弾丸・AOE・戦闘解決・ピックアップ・スポーン）

pub(crate) mod aoe;
pub(crate) mod behavior;
pub(crate) mod combat;
pub(crate) mod pickups;
pub(crate) mod powerups;
pub(crate) mod projectiles;
pub(crate) mod spawn;
pub(crate) mod targeting;
