//! Path: crates/arena-sim/src/world/game_world.rs
//! Summary: ゲームワールド（World）。Director が専有するミュータブル状態

use super::boss_bar::BossBar;
use super::enemy::EnemyWorld;
use super::frame_event::{FrameEvent, Sound};
use super::pickup::PickupWorld;
use super::player::{PlayerState, PlayerStats};
use super::projectile::ProjectileWorld;
use arena_core::constants::{AOE_COOLDOWN, CELL_SIZE, SLOW_PCT};
use arena_core::level::LevelConfig;
use arena_core::physics::rng::SimpleRng;
use arena_core::physics::spatial_hash::SpatialHash;
use arena_core::powerup::PowerUpSet;
use arena_core::util::xp_threshold;

/// スローフィールド武器（有効フラグ + 減速率 %）
#[derive(Clone, Copy, Debug)]
pub struct SlowField {
    pub active: bool,
    pub pct:    f32,
}

/// 範囲攻撃（AOE）武器。
/// `timer` はヒット成立時にのみ `cooldown` へ再装填される:
/// 射程内に敵がいないままタイマーが切れた場合、次のヒットが出るまで
/// 毎フレーム判定を続ける。クールダウンはヒットからしか進まない。
#[derive(Clone, Copy, Debug)]
pub struct AoeWeapon {
    pub active:   bool,
    pub cooldown: f32,
    pub timer:    f32,
}

/// ゲームワールド内部状態。
/// Director が専有所有し、各システムは `&mut World` を受け取って
/// フレーム内で順番に処理する。グローバル共有はしない。
pub struct World {
    pub frame_id:    u64,
    pub player:      PlayerState,
    pub stats:       PlayerStats,
    pub slow_field:  SlowField,
    pub aoe:         AoeWeapon,
    pub enemies:     EnemyWorld,
    pub projectiles: ProjectileWorld,
    pub pickups:     PickupWorld,
    pub powerups:    PowerUpSet,
    pub rng:         SimpleRng,
    /// 敵の動的空間ハッシュ（毎フレーム再構築）
    pub collision:   SpatialHash,
    /// シミュレーション累積時間（秒）。ポーズ中は進まない。
    /// パワーアップの期限・ピックアップ寿命はこの時計に乗る。
    pub clock:            f64,
    /// ステージの残り時間（秒、ゼロに向かって減る）
    pub remaining_time:   f32,
    /// 現在のステージ番号（1 始まり）
    pub stage:            u32,
    /// プレイヤーレベル（経験値レベル、1 始まり）
    pub level:            u32,
    pub xp:               u32,
    /// レベルアップメニュー表示待ち（Director が消費する）
    pub level_up_pending: bool,
    /// このステージで倒したボスの数
    pub boss_kills:       u32,
    pub kill_count:       u32,
    pub score:            u32,
    /// 分離ベクトル再計算のスロットリングタイマー
    pub sep_refresh_timer: f32,
    pub boss_bars:        Vec<BossBar>,
    pub frame_events:     Vec<FrameEvent>,
    /// 直近フレームの処理時間（ミリ秒、予算超過の警告用）
    pub last_frame_time_ms: f64,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            frame_id:    0,
            player:      PlayerState::new(),
            stats:       PlayerStats::new(),
            slow_field:  SlowField { active: false, pct: SLOW_PCT },
            aoe:         AoeWeapon { active: false, cooldown: AOE_COOLDOWN, timer: 0.0 },
            enemies:     EnemyWorld::new(),
            projectiles: ProjectileWorld::new(),
            pickups:     PickupWorld::new(),
            powerups:    PowerUpSet::new(),
            rng:         SimpleRng::new(seed),
            collision:   SpatialHash::new(CELL_SIZE),
            clock:            0.0,
            remaining_time:   0.0,
            stage:            1,
            level:            1,
            xp:               0,
            level_up_pending: false,
            boss_kills:       0,
            kill_count:       0,
            score:            0,
            sep_refresh_timer: 0.0,
            boss_bars:        Vec::new(),
            frame_events:     Vec::new(),
            last_frame_time_ms: 0.0,
        }
    }

    pub fn config(&self) -> &'static LevelConfig {
        LevelConfig::get(self.stage)
    }

    /// 現在のレベルのレベルアップしきい値
    pub fn xp_threshold(&self) -> u32 {
        xp_threshold(self.level)
    }

    /// 経験値を加算し、しきい値を越えた瞬間にレベルを上げて経験値を
    /// リセットする。メニュー表示は `level_up_pending` 経由で Director が行う。
    pub fn grant_xp(&mut self, amount: u32) {
        self.xp += amount;
        if self.xp >= self.xp_threshold() {
            self.xp = 0;
            self.level += 1;
            self.level_up_pending = true;
            self.frame_events.push(FrameEvent::LevelUp { new_level: self.level });
            self.frame_events.push(FrameEvent::Sound(Sound::LevelUp));
        }
    }

    /// 衝突判定用の空間ハッシュを生存中の敵で再構築する
    pub fn rebuild_collision(&mut self) {
        self.collision.clear();
        for i in 0..self.enemies.len() {
            if self.enemies.live[i] {
                self.collision
                    .insert(i, self.enemies.positions_x[i], self.enemies.positions_y[i]);
            }
        }
    }

    pub fn push_sound(&mut self, sound: Sound) {
        self.frame_events.push(FrameEvent::Sound(sound));
    }

    /// ステージ遷移時のレジストリクリア: 敵・弾丸・ピックアップを全消去し、
    /// ステージ時計とステージ内カウンタをリセットする。
    /// プレイヤーステータス・経験値・キル累計は持ち越す。
    pub fn reset_for_stage(&mut self, stage: u32) {
        self.stage = stage;
        self.enemies.clear_all();
        self.projectiles.clear_all();
        self.pickups.clear_all();
        self.boss_bars.clear();
        self.boss_kills = 0;
        self.remaining_time = self.config().duration;
        self.sep_refresh_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_crossing_increments_level_and_resets() {
        let mut w = World::new(1);
        // しきい値 40 に対して 10 ずつ 4 回
        for _ in 0..3 {
            w.grant_xp(10);
            assert_eq!(w.level, 1);
            assert!(!w.level_up_pending);
        }
        w.grant_xp(10);
        assert_eq!(w.level, 2);
        assert_eq!(w.xp, 0);
        assert_eq!(w.xp_threshold(), 55);
        assert!(w.level_up_pending);
    }

    #[test]
    fn xp_stays_below_threshold_after_processing() {
        let mut w = World::new(2);
        for _ in 0..100 {
            w.grant_xp(10);
            assert!(w.xp < w.xp_threshold());
        }
        // レベルは単調非減少
        assert!(w.level > 1);
    }

    #[test]
    fn stage_reset_clears_registry_but_keeps_progress() {
        let mut w = World::new(3);
        let cfg = LevelConfig::get(1);
        w.enemies.spawn(0.0, 0.0, arena_core::enemy::EnemyKind::Normal, cfg, None);
        w.pickups.spawn(0.0, 0.0, super::super::pickup::PickupKind::Gem);
        w.projectiles.spawn(0.0, 0.0, 1.0, 0.0, 1);
        w.kill_count = 9;
        w.level = 3;
        w.boss_kills = 1;

        w.reset_for_stage(2);
        assert_eq!(w.enemies.count, 0);
        assert_eq!(w.projectiles.count, 0);
        assert_eq!(w.pickups.count, 0);
        assert_eq!(w.boss_kills, 0);
        assert_eq!(w.kill_count, 9);
        assert_eq!(w.level, 3);
        assert!((w.remaining_time - LevelConfig::get(2).duration).abs() < 0.001);
    }
}
