//! Path: crates/arena-core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（シミュレーション再現性の基盤）

pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// [lo, hi) の一様乱数
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// 確率 p で true（クリティカル判定・ドロップ判定用）
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}
