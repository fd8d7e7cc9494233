//! Path: crates/arena-sim/src/upgrade.rs
//! Summary: レベルアップ時のアップグレード候補・適用・上限管理

use crate::world::World;
use arena_core::constants::{
    AOE_COOLDOWN, AOE_COOLDOWN_FLOOR, AOE_COOLDOWN_STEP, ATTRACT_RADIUS_CAP, FIRE_INTERVAL_FLOOR,
    PROJECTILE_COUNT_CAP, SLOW_PCT, SLOW_PCT_CAP, SLOW_PCT_STEP, TARGET_RADIUS_CAP,
};

const FIRE_RATE_STEP:    f32 = 0.1;
const TARGET_RANGE_STEP: f32 = 50.0;
const MAGNET_STEP:       f32 = 40.0;
const MOVE_SPEED_STEP:   f32 = 20.0;
const MOVE_SPEED_CAP:    f32 = 400.0;
const DAMAGE_STEP:       f32 = 0.5;
const DAMAGE_CAP:        f32 = 5.0;
const MAX_HP_CAP:        i32 = 6;

/// レベルアップメニューに並ぶアップグレードの種類
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UpgradeKind {
    /// 発射間隔 −0.1 秒（下限あり）
    FireRate,
    /// 同時発射数 +1（上限あり）
    MultiShot,
    /// 索敵半径 +50（上限あり）
    TargetRange,
    /// 移動速度 +20（上限あり）
    MoveSpeed,
    /// 基礎ダメージ +0.5（上限あり）
    Damage,
    /// 最大 HP +1（現在 HP も +1）
    MaxHp,
    /// HP +1 回復（満タンなら候補に出ない）
    Heal,
    /// ジェム吸引半径 +40（上限あり）
    Magnet,
    /// スローフィールド解禁 / 減速率 +10%（上限あり）
    SlowField,
    /// AOE 武器解禁 / クールダウン −0.2 秒（下限あり）
    AoeWeapon,
}

const ALL: [UpgradeKind; 10] = [
    UpgradeKind::FireRate,
    UpgradeKind::MultiShot,
    UpgradeKind::TargetRange,
    UpgradeKind::MoveSpeed,
    UpgradeKind::Damage,
    UpgradeKind::MaxHp,
    UpgradeKind::Heal,
    UpgradeKind::Magnet,
    UpgradeKind::SlowField,
    UpgradeKind::AoeWeapon,
];

/// 上限に達した（これ以上効果のない）アップグレードは候補から外す
fn is_available(w: &World, kind: UpgradeKind) -> bool {
    match kind {
        UpgradeKind::FireRate    => w.stats.fire_interval > FIRE_INTERVAL_FLOOR,
        UpgradeKind::MultiShot   => w.stats.projectile_count < PROJECTILE_COUNT_CAP,
        UpgradeKind::TargetRange => w.stats.target_radius < TARGET_RADIUS_CAP,
        UpgradeKind::MoveSpeed   => w.stats.move_speed < MOVE_SPEED_CAP,
        UpgradeKind::Damage      => w.stats.base_damage < DAMAGE_CAP,
        UpgradeKind::MaxHp       => w.player.max_hp < MAX_HP_CAP,
        UpgradeKind::Heal        => w.player.hp < w.player.max_hp,
        UpgradeKind::Magnet      => w.stats.attract_radius < ATTRACT_RADIUS_CAP,
        UpgradeKind::SlowField   => !w.slow_field.active || w.slow_field.pct < SLOW_PCT_CAP,
        UpgradeKind::AoeWeapon   => !w.aoe.active || w.aoe.cooldown > AOE_COOLDOWN_FLOOR,
    }
}

/// アップグレードを適用する。全ての変化は上限・下限でクランプされる。
/// 管理サーフェスからも同じ経路で呼ばれる。
pub fn apply(w: &mut World, kind: UpgradeKind) {
    match kind {
        UpgradeKind::FireRate => {
            w.stats.fire_interval =
                (w.stats.fire_interval - FIRE_RATE_STEP).max(FIRE_INTERVAL_FLOOR);
        }
        UpgradeKind::MultiShot => {
            w.stats.projectile_count = (w.stats.projectile_count + 1).min(PROJECTILE_COUNT_CAP);
        }
        UpgradeKind::TargetRange => {
            w.stats.target_radius =
                (w.stats.target_radius + TARGET_RANGE_STEP).min(TARGET_RADIUS_CAP);
        }
        UpgradeKind::MoveSpeed => {
            w.stats.move_speed = (w.stats.move_speed + MOVE_SPEED_STEP).min(MOVE_SPEED_CAP);
        }
        UpgradeKind::Damage => {
            w.stats.base_damage = (w.stats.base_damage + DAMAGE_STEP).min(DAMAGE_CAP);
        }
        UpgradeKind::MaxHp => {
            w.player.max_hp = (w.player.max_hp + 1).min(MAX_HP_CAP);
            w.player.hp = (w.player.hp + 1).min(w.player.max_hp);
        }
        UpgradeKind::Heal => {
            w.player.hp = (w.player.hp + 1).min(w.player.max_hp);
        }
        UpgradeKind::Magnet => {
            w.stats.attract_radius =
                (w.stats.attract_radius + MAGNET_STEP).min(ATTRACT_RADIUS_CAP);
        }
        UpgradeKind::SlowField => {
            if w.slow_field.active {
                w.slow_field.pct = (w.slow_field.pct + SLOW_PCT_STEP).min(SLOW_PCT_CAP);
            } else {
                w.slow_field.active = true;
                w.slow_field.pct = SLOW_PCT;
            }
        }
        UpgradeKind::AoeWeapon => {
            if w.aoe.active {
                w.aoe.cooldown = (w.aoe.cooldown - AOE_COOLDOWN_STEP).max(AOE_COOLDOWN_FLOOR);
            } else {
                w.aoe.active = true;
                w.aoe.cooldown = AOE_COOLDOWN;
                // 初回は 1 クールダウン分のワインドアップ後に武装する
                w.aoe.timer = w.aoe.cooldown;
            }
        }
    }
}

/// 有効な候補から最大 3 件を重複なしで抽選する（部分 Fisher-Yates）
pub fn roll_choices(w: &mut World) -> Vec<UpgradeKind> {
    let mut pool: Vec<UpgradeKind> = ALL.iter().copied().filter(|&k| is_available(w, k)).collect();
    let picks = pool.len().min(3);
    for i in 0..picks {
        let j = i + (w.rng.next_u32() as usize) % (pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(picks);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::constants::FIRE_INTERVAL;

    #[test]
    fn fire_rate_clamps_to_the_floor() {
        let mut w = World::new(1);
        for _ in 0..20 {
            apply(&mut w, UpgradeKind::FireRate);
        }
        assert!((w.stats.fire_interval - FIRE_INTERVAL_FLOOR).abs() < 0.001);
        assert!(!is_available(&w, UpgradeKind::FireRate));
    }

    #[test]
    fn multishot_clamps_to_the_cap() {
        let mut w = World::new(1);
        for _ in 0..20 {
            apply(&mut w, UpgradeKind::MultiShot);
        }
        assert_eq!(w.stats.projectile_count, PROJECTILE_COUNT_CAP);
    }

    #[test]
    fn heal_is_hidden_at_full_hp() {
        let mut w = World::new(1);
        assert!(!is_available(&w, UpgradeKind::Heal));
        w.player.hp -= 1;
        assert!(is_available(&w, UpgradeKind::Heal));
    }

    #[test]
    fn slow_field_unlocks_then_strengthens() {
        let mut w = World::new(1);
        assert!(!w.slow_field.active);
        apply(&mut w, UpgradeKind::SlowField);
        assert!(w.slow_field.active);
        assert!((w.slow_field.pct - SLOW_PCT).abs() < 0.001);

        for _ in 0..20 {
            apply(&mut w, UpgradeKind::SlowField);
        }
        assert!((w.slow_field.pct - SLOW_PCT_CAP).abs() < 0.001);
        assert!(!is_available(&w, UpgradeKind::SlowField));
    }

    #[test]
    fn aoe_unlocks_with_a_windup_then_speeds_up() {
        let mut w = World::new(1);
        apply(&mut w, UpgradeKind::AoeWeapon);
        assert!(w.aoe.active);
        assert!(w.aoe.timer > 0.0);

        for _ in 0..20 {
            apply(&mut w, UpgradeKind::AoeWeapon);
        }
        assert!((w.aoe.cooldown - AOE_COOLDOWN_FLOOR).abs() < 0.001);
    }

    #[test]
    fn choices_are_distinct_and_at_most_three() {
        let mut w = World::new(99);
        for _ in 0..50 {
            let c = roll_choices(&mut w);
            assert!(c.len() <= 3);
            for (a, b) in [(0, 1), (0, 2), (1, 2)] {
                if c.len() > b {
                    assert_ne!(c[a], c[b]);
                }
            }
        }
    }

    #[test]
    fn fire_interval_starts_at_the_default() {
        let w = World::new(1);
        assert!((w.stats.fire_interval - FIRE_INTERVAL).abs() < 0.001);
    }
}
