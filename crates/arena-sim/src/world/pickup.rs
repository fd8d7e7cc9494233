//! Path: crates/arena-sim/src/world/pickup.rs
//! Summary: ピックアップ SoA（XP ジェム・回復・パワーアップ）と寿命管理

use arena_core::constants::{GEM_LIFETIME, HEALTH_LIFETIME, POWERUP_LIFETIME};
use arena_core::powerup::PowerUpKind;

/// ピックアップの種類
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PickupKind {
    Gem,
    Health,
    Power(PowerUpKind),
}

impl PickupKind {
    /// スポーン時に設定される固定寿命（秒）。未回収なら自壊する。
    pub fn lifetime(&self) -> f32 {
        match self {
            Self::Gem      => GEM_LIFETIME,
            Self::Health   => HEALTH_LIFETIME,
            Self::Power(_) => POWERUP_LIFETIME,
        }
    }
}

/// ピックアップ SoA（Structure of Arrays）
pub struct PickupWorld {
    pub positions_x: Vec<f32>,
    pub positions_y: Vec<f32>,
    pub kinds:       Vec<PickupKind>,
    pub lifetime:    Vec<f32>,
    pub alive:       Vec<bool>,
    pub count:       usize,
    free_list:       Vec<usize>,
}

impl PickupWorld {
    pub fn new() -> Self {
        Self {
            positions_x: Vec::new(),
            positions_y: Vec::new(),
            kinds:       Vec::new(),
            lifetime:    Vec::new(),
            alive:       Vec::new(),
            count:       0,
            free_list:   Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn spawn(&mut self, x: f32, y: f32, kind: PickupKind) {
        let lifetime = kind.lifetime();
        if let Some(i) = self.free_list.pop() {
            self.positions_x[i] = x;
            self.positions_y[i] = y;
            self.kinds[i]       = kind;
            self.lifetime[i]    = lifetime;
            self.alive[i]       = true;
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.kinds.push(kind);
            self.lifetime.push(lifetime);
            self.alive.push(true);
        }
        self.count += 1;
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    pub fn clear_all(&mut self) {
        for i in 0..self.len() {
            self.kill(i);
        }
    }
}
