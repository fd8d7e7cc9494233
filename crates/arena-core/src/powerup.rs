//! Path: crates/arena-core/src/powerup.rs
//! Summary: パワーアップの種類と時限エフェクトの状態機械

use crate::constants::POWERUP_DURATION;

/// パワーアップの種類
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum PowerUpKind {
    Speed        = 0,
    Magnet       = 1,
    Invincibility = 2,
    Damage       = 3,
}

pub const POWERUP_KINDS: [PowerUpKind; 4] = [
    PowerUpKind::Speed,
    PowerUpKind::Magnet,
    PowerUpKind::Invincibility,
    PowerUpKind::Damage,
];

impl PowerUpKind {
    pub fn from_u8(id: u8) -> Self {
        match id {
            1 => Self::Magnet,
            2 => Self::Invincibility,
            3 => Self::Damage,
            _ => Self::Speed,
        }
    }
}

/// 1 種類分の時限エフェクト状態。
/// 取得で有効化し、毎フレームのポーリングで期限切れを検出する。
/// 外部からの直接書き込みはしない。
#[derive(Clone, Copy, Debug, Default)]
pub struct PowerUpState {
    pub active:   bool,
    pub end_time: f64,
}

/// 全パワーアップの状態（種類ごとに 1 レコード）
#[derive(Clone, Debug, Default)]
pub struct PowerUpSet {
    states: [PowerUpState; 4],
}

impl PowerUpSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得時に有効化する。再取得は現在時刻から期限を延長する。
    pub fn activate(&mut self, kind: PowerUpKind, now: f64) {
        let s = &mut self.states[kind as usize];
        s.active = true;
        s.end_time = now + POWERUP_DURATION as f64;
    }

    /// 期限切れのポーリング（フレームごとに 1 回呼ぶ）
    pub fn poll(&mut self, now: f64) {
        for s in &mut self.states {
            if s.active && now >= s.end_time {
                s.active = false;
            }
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.states[kind as usize].active
    }

    /// 全エフェクトを解除する（ステージ遷移・リスタート用）
    pub fn clear(&mut self) {
        self.states = [PowerUpState::default(); 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_and_expiry() {
        let mut set = PowerUpSet::new();
        set.activate(PowerUpKind::Speed, 10.0);
        assert!(set.is_active(PowerUpKind::Speed));
        assert!(!set.is_active(PowerUpKind::Magnet));

        set.poll(10.0 + POWERUP_DURATION as f64 - 0.1);
        assert!(set.is_active(PowerUpKind::Speed));

        set.poll(10.0 + POWERUP_DURATION as f64);
        assert!(!set.is_active(PowerUpKind::Speed));
    }

    #[test]
    fn repickup_extends_from_now() {
        let mut set = PowerUpSet::new();
        set.activate(PowerUpKind::Damage, 0.0);
        set.activate(PowerUpKind::Damage, 5.0);
        set.poll(5.0 + POWERUP_DURATION as f64 - 0.1);
        assert!(set.is_active(PowerUpKind::Damage));
    }

    #[test]
    fn clear_deactivates_everything() {
        let mut set = PowerUpSet::new();
        for kind in POWERUP_KINDS {
            set.activate(kind, 0.0);
        }
        set.clear();
        for kind in POWERUP_KINDS {
            assert!(!set.is_active(kind));
        }
    }
}
