//! Path: crates/arena-sim/src/world/enemy.rs
//! Summary: 敵 SoA（EnemyWorld）と世代付きハンドル（EnemyId）

use arena_core::constants::{CHARGE_COOLDOWN, DEATH_ANIM_DURATION};
use arena_core::enemy::EnemyKind;
use arena_core::level::LevelConfig;
use arena_core::physics::separation::EnemySeparation;

/// 敵への安定ハンドル。スロットは再利用されるため、世代が一致しない
/// ハンドルは失効している（同フレーム内でも他システムが敵を消し得る）。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EnemyId {
    pub index:      u32,
    pub generation: u32,
}

/// 敵 SoA（Structure of Arrays）
///
/// `live` が「enemy タグ」に相当する: false になった敵は衝突・分離・
/// 索敵から即座に外れる。`dying` の間は死亡アニメーション再生中で、
/// タイマーが切れたらスロットをフリーリストに返却し世代を進める。
pub struct EnemyWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub vel_x:        Vec<f32>,
    pub vel_y:        Vec<f32>,
    pub speeds:       Vec<f32>,
    pub hp:           Vec<f32>,
    pub max_hp:       Vec<f32>,
    pub kinds:        Vec<EnemyKind>,
    pub live:         Vec<bool>,
    pub dying:        Vec<bool>,
    pub death_timer:  Vec<f32>,
    pub generations:  Vec<u32>,
    // Charger 専用の一時フィールド
    pub charge_cooldown: Vec<f32>,
    pub charge_timer:    Vec<f32>,
    pub charge_dx:       Vec<f32>,
    pub charge_dy:       Vec<f32>,
    /// 分離パス用のキャッシュ（スロットリング間隔で再計算）
    pub sep_x:        Vec<f32>,
    pub sep_y:        Vec<f32>,
    pub neighbor_buf: Vec<usize>,
    /// 生存数（live のみ、dying は含まない）
    pub count:        usize,
    free_list:        Vec<usize>,
}

impl EnemyWorld {
    pub fn new() -> Self {
        Self {
            positions_x:  Vec::new(),
            positions_y:  Vec::new(),
            vel_x:        Vec::new(),
            vel_y:        Vec::new(),
            speeds:       Vec::new(),
            hp:           Vec::new(),
            max_hp:       Vec::new(),
            kinds:        Vec::new(),
            live:         Vec::new(),
            dying:        Vec::new(),
            death_timer:  Vec::new(),
            generations:  Vec::new(),
            charge_cooldown: Vec::new(),
            charge_timer:    Vec::new(),
            charge_dx:       Vec::new(),
            charge_dy:       Vec::new(),
            sep_x:        Vec::new(),
            sep_y:        Vec::new(),
            neighbor_buf: Vec::new(),
            count:        0,
            free_list:    Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn id_at(&self, i: usize) -> EnemyId {
        EnemyId {
            index:      i as u32,
            generation: self.generations[i],
        }
    }

    /// ハンドルが現在も生存中の敵を指しているか検証してインデックスを返す
    pub fn index_of(&self, id: EnemyId) -> Option<usize> {
        let i = id.index as usize;
        if i < self.len() && self.generations[i] == id.generation && self.live[i] {
            Some(i)
        } else {
            None
        }
    }

    /// 敵をスポーンする。HP はタイプとステージ倍率から決まり、
    /// `hp_override` があればそれを使う（ボス HP はステージテーブル由来）。
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        kind: EnemyKind,
        cfg: &LevelConfig,
        hp_override: Option<f32>,
    ) -> EnemyId {
        let hp = hp_override.unwrap_or_else(|| kind.max_hp(cfg.health_mult)).max(1.0);
        let speed = kind.speed(cfg.speed_mult);
        // Charger は初回突進までフルクールダウンを待つ
        let charge_cd = if kind == EnemyKind::Charger { CHARGE_COOLDOWN } else { 0.0 };

        let i = if let Some(i) = self.free_list.pop() {
            // O(1): フリーリストから再利用
            self.positions_x[i] = x;
            self.positions_y[i] = y;
            self.vel_x[i]       = 0.0;
            self.vel_y[i]       = 0.0;
            self.speeds[i]      = speed;
            self.hp[i]          = hp;
            self.max_hp[i]      = hp;
            self.kinds[i]       = kind;
            self.live[i]        = true;
            self.dying[i]       = false;
            self.death_timer[i] = 0.0;
            self.charge_cooldown[i] = charge_cd;
            self.charge_timer[i]    = 0.0;
            self.charge_dx[i]       = 0.0;
            self.charge_dy[i]       = 0.0;
            self.sep_x[i] = 0.0;
            self.sep_y[i] = 0.0;
            i
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.vel_x.push(0.0);
            self.vel_y.push(0.0);
            self.speeds.push(speed);
            self.hp.push(hp);
            self.max_hp.push(hp);
            self.kinds.push(kind);
            self.live.push(true);
            self.dying.push(false);
            self.death_timer.push(0.0);
            self.generations.push(0);
            self.charge_cooldown.push(charge_cd);
            self.charge_timer.push(0.0);
            self.charge_dx.push(0.0);
            self.charge_dy.push(0.0);
            self.sep_x.push(0.0);
            self.sep_y.push(0.0);
            self.positions_x.len() - 1
        };
        self.count += 1;
        self.id_at(i)
    }

    /// 死亡遷移: enemy タグを即座に外し、死亡アニメーションを開始する。
    /// アニメーション終了までスロットは保持される。
    pub fn start_dying(&mut self, i: usize) {
        if self.live[i] {
            self.live[i] = false;
            self.dying[i] = true;
            self.death_timer[i] = DEATH_ANIM_DURATION;
            self.count = self.count.saturating_sub(1);
        }
    }

    /// 死亡アニメーションのタイマーを進め、終了したスロットを解放する
    pub fn update_dying(&mut self, dt: f32) {
        for i in 0..self.len() {
            if !self.dying[i] {
                continue;
            }
            self.death_timer[i] -= dt;
            if self.death_timer[i] <= 0.0 {
                self.dying[i] = false;
                self.generations[i] = self.generations[i].wrapping_add(1);
                self.free_list.push(i);
            }
        }
    }

    /// フィールド外クリーンアップ用の即時消去。アニメーションなしで
    /// スロットを解放し、既存ハンドルを失効させる。
    pub fn despawn(&mut self, i: usize) {
        if self.live[i] {
            self.live[i] = false;
            self.count = self.count.saturating_sub(1);
            self.generations[i] = self.generations[i].wrapping_add(1);
            self.free_list.push(i);
        }
    }

    /// 全敵を即座に消す（ステージ遷移用）。アニメーションは再生しない。
    pub fn clear_all(&mut self) {
        for i in 0..self.len() {
            if self.live[i] || self.dying[i] {
                self.live[i] = false;
                self.dying[i] = false;
                self.generations[i] = self.generations[i].wrapping_add(1);
                self.free_list.push(i);
            }
        }
        self.count = 0;
    }

    /// 生存中のボスの数
    pub fn live_boss_count(&self) -> usize {
        (0..self.len())
            .filter(|&i| self.live[i] && self.kinds[i].is_boss())
            .count()
    }
}

impl EnemySeparation for EnemyWorld {
    fn enemy_count(&self) -> usize        { self.positions_x.len() }
    fn is_live(&self, i: usize) -> bool   { self.live[i] }
    fn pos_x(&self, i: usize) -> f32      { self.positions_x[i] }
    fn pos_y(&self, i: usize) -> f32      { self.positions_y[i] }
    fn size(&self, i: usize) -> f32       { self.kinds[i].size() }
    fn sep_buf_x(&mut self) -> &mut Vec<f32>      { &mut self.sep_x }
    fn sep_buf_y(&mut self) -> &mut Vec<f32>      { &mut self.sep_y }
    fn neighbor_buf(&mut self) -> &mut Vec<usize> { &mut self.neighbor_buf }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> &'static LevelConfig {
        LevelConfig::get(1)
    }

    #[test]
    fn spawn_and_handle_roundtrip() {
        let mut w = EnemyWorld::new();
        let id = w.spawn(10.0, 20.0, EnemyKind::Normal, cfg(), None);
        assert_eq!(w.index_of(id), Some(0));
        assert_eq!(w.count, 1);
    }

    #[test]
    fn dying_detags_immediately_but_keeps_the_slot() {
        let mut w = EnemyWorld::new();
        let id = w.spawn(0.0, 0.0, EnemyKind::Normal, cfg(), None);
        w.start_dying(0);
        // enemy タグからは即座に外れる
        assert_eq!(w.index_of(id), None);
        assert_eq!(w.count, 0);
        assert!(w.dying[0]);

        // アニメーション中はスロットが再利用されない
        let id2 = w.spawn(5.0, 5.0, EnemyKind::Strong, cfg(), None);
        assert_ne!(id2.index, id.index);

        // アニメーション終了でスロット解放・世代が進む
        w.update_dying(DEATH_ANIM_DURATION + 0.01);
        let id3 = w.spawn(1.0, 1.0, EnemyKind::Normal, cfg(), None);
        assert_eq!(id3.index, id.index);
        assert_ne!(id3.generation, id.generation);
        // 旧ハンドルは失効したまま
        assert_eq!(w.index_of(id), None);
    }

    #[test]
    fn stale_handle_does_not_resolve_after_reuse() {
        let mut w = EnemyWorld::new();
        let old = w.spawn(0.0, 0.0, EnemyKind::Normal, cfg(), None);
        w.start_dying(0);
        w.update_dying(1.0);
        let new = w.spawn(0.0, 0.0, EnemyKind::Normal, cfg(), None);
        assert_eq!(old.index, new.index);
        assert_eq!(w.index_of(old), None);
        assert_eq!(w.index_of(new), Some(0));
    }

    #[test]
    fn clear_all_invalidates_everything() {
        let mut w = EnemyWorld::new();
        let a = w.spawn(0.0, 0.0, EnemyKind::Normal, cfg(), None);
        let b = w.spawn(1.0, 1.0, EnemyKind::Boss, cfg(), Some(cfg().boss_health));
        assert_eq!(w.live_boss_count(), 1);
        w.clear_all();
        assert_eq!(w.count, 0);
        assert_eq!(w.index_of(a), None);
        assert_eq!(w.index_of(b), None);
        assert_eq!(w.live_boss_count(), 0);
    }

    #[test]
    fn boss_hp_comes_from_override() {
        let mut w = EnemyWorld::new();
        w.spawn(0.0, 0.0, EnemyKind::Boss, cfg(), Some(123.0));
        assert!((w.hp[0] - 123.0).abs() < 0.001);
        assert!((w.max_hp[0] - 123.0).abs() < 0.001);
    }
}
