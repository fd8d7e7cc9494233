//! Path: crates/arena-core/src/physics/mod.rs
//! Summary: 物理プリミティブ（RNG・空間ハッシュ・分離パス）

pub mod rng;
pub mod separation;
pub mod spatial_hash;
