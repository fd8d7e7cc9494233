//! Path: crates/arena-sim/src/world/mod.rs
//! Summary: ワールド型（PlayerState, EnemyWorld, ProjectileWorld, PickupWorld, World）

mod boss_bar;
mod enemy;
mod frame_event;
mod game_world;
mod pickup;
mod player;
mod projectile;

pub use boss_bar::{BarColor, BossBar};
pub use enemy::{EnemyId, EnemyWorld};
pub use frame_event::{FrameEvent, GameOverReason, Sound};
pub use game_world::{AoeWeapon, SlowField, World};
pub use pickup::{PickupKind, PickupWorld};
pub use player::{PlayerState, PlayerStats};
pub use projectile::ProjectileWorld;
