//! Path: crates/arena-sim/src/director.rs
//! Summary: ゲーム進行の司令塔（フェーズ状態機械・フレーム駆動・ステージ遷移・管理サーフェス）

use crate::error::SimError;
use crate::sched::{Scheduler, Task, TimerId};
use crate::systems::{aoe, behavior, combat, pickups, powerups, projectiles, spawn, targeting};
use crate::upgrade::{self, UpgradeKind};
use crate::world::{FrameEvent, GameOverReason, World};
use arena_core::constants::{
    BANNER_DURATION, BOSS_MIN_ELAPSED, FIELD_HEIGHT, FIELD_WIDTH, FRAME_BUDGET_MS, HORDE_INTERVAL,
    PLAYER_RADIUS, SPAWN_ACCEL_FACTOR, SPAWN_ACCEL_INTERVAL, SPAWN_INTERVAL_FLOOR,
};
use arena_core::enemy::{EnemyKind, UNLOCK_SCHEDULE};
use std::time::Instant;

/// ポーズの理由。手動ポーズのみプレイヤーが解除でき、
/// モーダルポーズ（レベルアップ・遷移バナー）は専用経路で解ける。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PauseReason {
    Manual,
    LevelUp,
    Transition,
}

/// ゲーム全体のフェーズ
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    NotStarted,
    Running,
    Paused(PauseReason),
    GameOver(GameOverReason),
}

/// シミュレーションの司令塔。ワールドを専有所有し、外部（UI・管理
/// サーフェス）は Director のメソッド経由でのみ状態を変更できる。
pub struct Director {
    world: World,
    sched: Scheduler,
    phase: Phase,
    /// 現在のステージの経過秒（解禁スケジュール・ボス解禁に使う）
    stage_elapsed:  f32,
    /// 現在のスポーン間隔（加速で縮む、ステージ開始時にテーブル値へ戻る）
    spawn_interval: f32,
    unlock_cursor:  usize,
    boss_timer:     f32,
    horde_wave:     usize,
    /// 遷移バナーの残り表示時間。実時間 dt で減る唯一のタイマー。
    banner_timer: f32,
    fire_timer:   Option<TimerId>,
    spawn_timers: Vec<(EnemyKind, TimerId)>,
    accel_timer:  Option<TimerId>,
    horde_timer:  Option<TimerId>,
    task_buf: Vec<Task>,
    choices:  Vec<UpgradeKind>,
}

impl Director {
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(seed),
            sched: Scheduler::new(),
            phase: Phase::NotStarted,
            stage_elapsed:  0.0,
            spawn_interval: 0.0,
            unlock_cursor:  0,
            boss_timer:     0.0,
            horde_wave:     0,
            banner_timer:   0.0,
            fire_timer:   None,
            spawn_timers: Vec::new(),
            accel_timer:  None,
            horde_timer:  None,
            task_buf: Vec::new(),
            choices:  Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 直近のシミュレーションフレームのイベント
    /// （Running フレームごとに上書き、ポーズ中は据え置き）
    pub fn events(&self) -> &[FrameEvent] {
        &self.world.frame_events
    }

    /// レベルアップメニューの現在の候補
    pub fn upgrade_choices(&self) -> &[UpgradeKind] {
        &self.choices
    }

    /// 移動入力（正規化はフレーム側で行う）
    pub fn set_input(&mut self, dx: f32, dy: f32) {
        self.world.player.input_dx = dx;
        self.world.player.input_dy = dy;
    }

    /// ゲーム開始。二重開始はエラー。
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.phase != Phase::NotStarted {
            return Err(SimError::AlreadyStarted);
        }
        self.setup_stage(1);
        let fire = self.sched.schedule_interval(Task::FireLoop, self.world.stats.fire_interval);
        self.fire_timer = Some(fire);
        self.phase = Phase::Running;
        log::info!("run started (stage 1)");
        Ok(())
    }

    /// 手動ポーズ。既にポーズ中なら何もしない（冪等）。
    /// モーダルポーズ中は手動ポーズを受け付けない。
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused(PauseReason::Manual);
        }
    }

    /// 手動ポーズの解除。手動以外のポーズはここでは解けない。
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused(PauseReason::Manual) {
            self.phase = Phase::Running;
        }
    }

    /// レベルアップメニューの選択を確定して再開する
    pub fn choose_upgrade(&mut self, index: usize) -> Result<(), SimError> {
        if self.phase != Phase::Paused(PauseReason::LevelUp) {
            return Err(SimError::NoPendingLevelUp);
        }
        let Some(&kind) = self.choices.get(index) else {
            return Err(SimError::InvalidChoice);
        };
        self.apply_upgrade(kind);
        self.choices.clear();
        self.phase = Phase::Running;
        Ok(())
    }

    /// 1 フレーム進める。Running 以外ではシミュレーションは一切進まず、
    /// 遷移バナーのカウントダウンだけが実時間で進む。
    pub fn run_frame(&mut self, dt: f32) {
        // シミュレーションしないフレームではワールドに一切触れない。
        // イベントは直近のシミュレーションフレームのものが残る。
        match self.phase {
            Phase::Paused(PauseReason::Transition) => {
                self.banner_timer -= dt;
                if self.banner_timer <= 0.0 {
                    self.phase = Phase::Running;
                }
                return;
            }
            Phase::Running => {}
            _ => return,
        }

        let t0 = Instant::now();
        self.world.frame_events.clear();
        self.world.frame_id += 1;

        // シミュレーション時計（ポーズ中はここに到達しないので進まない）
        self.world.clock += dt as f64;
        self.stage_elapsed += dt;
        self.world.remaining_time -= dt;
        if self.world.remaining_time <= 0.0 {
            self.finish(GameOverReason::TimeUp);
            return;
        }

        self.move_player(dt);
        self.process_unlocks();

        self.sched.advance(dt, &mut self.task_buf);
        let tasks = std::mem::take(&mut self.task_buf);
        for &task in &tasks {
            self.handle_task(task);
        }
        self.task_buf = tasks;

        self.update_boss_cadence(dt);

        behavior::update_enemies(&mut self.world, dt);
        self.world.rebuild_collision();
        combat::resolve_player_contact(&mut self.world, dt);
        projectiles::update_projectiles(&mut self.world, dt);
        aoe::update_aoe(&mut self.world, dt);
        pickups::update_pickups(&mut self.world, dt);
        powerups::poll(&mut self.world);

        if self.world.player.hp <= 0 {
            self.finish(GameOverReason::Death);
            return;
        }

        // ステージ遷移はレベルアップメニューより優先。保留中のメニューは
        // バナー解除後の次フレームで開く（level_up_pending は持ち越す）。
        if self.world.boss_kills >= self.world.stage {
            self.begin_transition(self.world.stage + 1);
        } else if self.world.level_up_pending {
            self.world.level_up_pending = false;
            self.choices = upgrade::roll_choices(&mut self.world);
            // 全候補が上限に達していたらメニューは開かない
            if !self.choices.is_empty() {
                self.phase = Phase::Paused(PauseReason::LevelUp);
            }
        }

        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        self.world.last_frame_time_ms = ms;
        if ms > FRAME_BUDGET_MS {
            log::warn!(
                "frame {} over budget: {ms:.2}ms ({} enemies, {} projectiles)",
                self.world.frame_id,
                self.world.enemies.count,
                self.world.projectiles.count,
            );
        } else {
            log::trace!("frame {} took {ms:.3}ms", self.world.frame_id);
        }
    }

    // ---- 管理サーフェス（通常プレイと同じ変更経路を通す）----

    /// 任意のステージへ即時ジャンプする。通常の遷移と同じ経路を通り、
    /// 同じイベント・同じバナーが出る。
    pub fn admin_jump_to_stage(&mut self, stage: u32) -> Result<(), SimError> {
        if !matches!(self.phase, Phase::Running | Phase::Paused(_)) {
            return Err(SimError::NotRunning);
        }
        self.begin_transition(stage.max(1));
        Ok(())
    }

    /// 抽選を迂回して任意のアップグレードを適用する（適用経路は同一）
    pub fn admin_apply_upgrade(&mut self, kind: UpgradeKind) -> Result<(), SimError> {
        if !matches!(self.phase, Phase::Running | Phase::Paused(_)) {
            return Err(SimError::NotRunning);
        }
        self.apply_upgrade(kind);
        Ok(())
    }

    /// 任意の敵を任意座標にスポーンする
    pub fn admin_spawn(&mut self, kind: EnemyKind, x: f32, y: f32) -> Result<(), SimError> {
        if !matches!(self.phase, Phase::Running | Phase::Paused(_)) {
            return Err(SimError::NotRunning);
        }
        spawn::spawn_at(&mut self.world, kind, x, y);
        Ok(())
    }

    /// 経験値を直接付与する（レベルアップ判定は通常と同じ）
    pub fn admin_grant_xp(&mut self, amount: u32) -> Result<(), SimError> {
        if !matches!(self.phase, Phase::Running | Phase::Paused(_)) {
            return Err(SimError::NotRunning);
        }
        self.world.grant_xp(amount);
        Ok(())
    }

    // ---- 内部 ----

    fn move_player(&mut self, dt: f32) {
        let p = &mut self.world.player;
        let (dx, dy) = (p.input_dx, p.input_dy);
        let mag_sq = dx * dx + dy * dy;
        if mag_sq <= 1e-6 {
            return;
        }
        // 斜め移動が速くならないように正規化する
        let mag = mag_sq.sqrt();
        let speed = powerups::effective_move_speed(&self.world);
        let p = &mut self.world.player;
        p.x = (p.x + dx / mag * speed * dt).clamp(PLAYER_RADIUS, FIELD_WIDTH - PLAYER_RADIUS);
        p.y = (p.y + dy / mag * speed * dt).clamp(PLAYER_RADIUS, FIELD_HEIGHT - PLAYER_RADIUS);
    }

    /// ステージ経過時間に応じて敵タイプを解禁し、タイプごとの独立した
    /// スポーンループを開始する（各タイプ一度だけ）。
    fn process_unlocks(&mut self) {
        while let Some(&(at, kind)) = UNLOCK_SCHEDULE.get(self.unlock_cursor) {
            if self.stage_elapsed < at {
                break;
            }
            let id = self.sched.schedule_interval(Task::SpawnLoop(kind), self.spawn_interval);
            self.spawn_timers.push((kind, id));
            self.unlock_cursor += 1;
            log::info!("unlocked {kind:?} at {:.0}s", self.stage_elapsed);
        }
    }

    fn handle_task(&mut self, task: Task) {
        match task {
            Task::SpawnLoop(kind) => spawn::spawn_edge(&mut self.world, kind),
            Task::FireLoop => targeting::fire_volley(&mut self.world),
            Task::SpawnAccel => self.accelerate_spawns(),
            Task::Horde => {
                spawn::spawn_horde(&mut self.world, self.horde_wave);
                self.horde_wave += 1;
            }
        }
    }

    /// スポーン間隔を 10% 短縮し、全スポーンループを新しい周期で
    /// 作り直す（タイマーの周期はインプレースでは変えない）。
    fn accelerate_spawns(&mut self) {
        let next = (self.spawn_interval * SPAWN_ACCEL_FACTOR).max(SPAWN_INTERVAL_FLOOR);
        if (next - self.spawn_interval).abs() < f32::EPSILON {
            return;
        }
        self.spawn_interval = next;
        let timers = std::mem::take(&mut self.spawn_timers);
        for (kind, id) in timers {
            self.sched.cancel(id);
            let new_id = self.sched.schedule_interval(Task::SpawnLoop(kind), next);
            self.spawn_timers.push((kind, new_id));
        }
        log::debug!("spawn interval accelerated to {next:.2}s");
    }

    /// ボスの出現管理。解禁時刻を過ぎてから boss_interval ごとに、
    /// 「ステージ番号 −（撃破済み + 生存中）」体を同時スポーンする。
    /// ステージ N の突破には N 体の撃破が必要になる。
    fn update_boss_cadence(&mut self, dt: f32) {
        self.boss_timer += dt;
        if self.stage_elapsed < BOSS_MIN_ELAPSED {
            return;
        }
        let cfg = self.world.config();
        if self.boss_timer < cfg.boss_interval {
            return;
        }
        self.boss_timer = 0.0;
        let outstanding =
            self.world.boss_kills as usize + self.world.enemies.live_boss_count();
        let needed = (self.world.stage as usize).saturating_sub(outstanding);
        if needed > 0 {
            spawn::spawn_bosses(&mut self.world, needed);
        }
    }

    /// ステージ遷移。レジストリのクリアとカウンタのリセットは
    /// reset_for_stage に集約されているため、再入しても二重には進まない。
    fn begin_transition(&mut self, new_stage: u32) {
        self.world.frame_events.push(FrameEvent::StageTransition { new_stage });
        // レベルアップメニューを開いたまま遷移した場合、その候補は失効する
        self.choices.clear();
        self.setup_stage(new_stage);
        self.banner_timer = BANNER_DURATION;
        self.phase = Phase::Paused(PauseReason::Transition);
        log::info!("stage transition -> {new_stage}");
    }

    /// ステージのスポーン体制を組み直す: 既存のスポーン系タイマーを全て
    /// キャンセルし、テーブル値の間隔で Normal ループから再出発する。
    fn setup_stage(&mut self, stage: u32) {
        for (_, id) in self.spawn_timers.drain(..) {
            self.sched.cancel(id);
        }
        if let Some(id) = self.accel_timer.take() {
            self.sched.cancel(id);
        }
        if let Some(id) = self.horde_timer.take() {
            self.sched.cancel(id);
        }

        self.world.reset_for_stage(stage);
        self.stage_elapsed = 0.0;
        self.unlock_cursor = 0;
        self.boss_timer = 0.0;
        self.horde_wave = 0;
        self.spawn_interval = self.world.config().spawn_interval;

        let id = self
            .sched
            .schedule_interval(Task::SpawnLoop(EnemyKind::Normal), self.spawn_interval);
        self.spawn_timers.push((EnemyKind::Normal, id));
        self.accel_timer =
            Some(self.sched.schedule_interval(Task::SpawnAccel, SPAWN_ACCEL_INTERVAL));
        self.horde_timer = Some(self.sched.schedule_interval(Task::Horde, HORDE_INTERVAL));
    }

    /// アップグレード適用の共通経路。発射間隔が変わったときだけ
    /// ファイアタイマーを作り直す。
    fn apply_upgrade(&mut self, kind: UpgradeKind) {
        let before = self.world.stats.fire_interval;
        upgrade::apply(&mut self.world, kind);
        if kind == UpgradeKind::FireRate && self.world.stats.fire_interval != before {
            if let Some(id) = self.fire_timer.take() {
                self.sched.cancel(id);
            }
            let id = self
                .sched
                .schedule_interval(Task::FireLoop, self.world.stats.fire_interval);
            self.fire_timer = Some(id);
        }
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.world.frame_events.push(FrameEvent::GameOver { reason });
        self.phase = Phase::GameOver(reason);
        log::info!(
            "game over ({reason:?}): stage {}, level {}, {} kills, score {}",
            self.world.stage,
            self.world.level,
            self.world.kill_count,
            self.world.score,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> Director {
        let mut d = Director::new(seed);
        d.start().unwrap();
        d
    }

    #[test]
    fn double_start_is_rejected() {
        let mut d = started(1);
        assert_eq!(d.start(), Err(SimError::AlreadyStarted));
    }

    #[test]
    fn frames_do_not_advance_before_start() {
        let mut d = Director::new(1);
        d.run_frame(1.0);
        assert_eq!(d.world().clock, 0.0);
    }

    #[test]
    fn pause_freezes_the_simulated_clock() {
        let mut d = started(1);
        d.run_frame(0.5);
        let clock = d.world().clock;
        d.pause();
        // 冪等: 二重ポーズは状態を変えない
        d.pause();
        assert_eq!(d.phase(), Phase::Paused(PauseReason::Manual));
        d.run_frame(5.0);
        assert_eq!(d.world().clock, clock);
        d.resume();
        d.run_frame(0.5);
        assert!(d.world().clock > clock);
    }

    #[test]
    fn paused_frames_do_not_touch_the_world() {
        let mut d = started(1);
        d.run_frame(0.5);
        let frame_id = d.world().frame_id;
        let events_before = d.events().len();
        d.pause();
        for _ in 0..10 {
            d.run_frame(0.5);
        }
        // フレームカウンタもイベント列も据え置き
        assert_eq!(d.world().frame_id, frame_id);
        assert_eq!(d.events().len(), events_before);
    }

    #[test]
    fn stage_jump_discards_an_open_upgrade_menu() {
        let mut d = started(13);
        d.run_frame(0.016);
        d.admin_grant_xp(40).unwrap();
        d.run_frame(0.016);
        assert_eq!(d.phase(), Phase::Paused(PauseReason::LevelUp));
        assert!(!d.upgrade_choices().is_empty());

        d.admin_jump_to_stage(2).unwrap();
        assert!(d.upgrade_choices().is_empty());
        assert_eq!(d.choose_upgrade(0), Err(SimError::NoPendingLevelUp));
    }

    #[test]
    fn spawn_loop_produces_enemies() {
        let mut d = started(2);
        // ステージ 1 のスポーン間隔は 2 秒
        for _ in 0..50 {
            d.run_frame(0.1);
        }
        assert!(d.world().enemies.count > 0);
    }

    #[test]
    fn player_movement_is_clamped_to_the_field() {
        let mut d = started(3);
        d.set_input(-1.0, 0.0);
        for _ in 0..600 {
            d.run_frame(0.016);
        }
        assert!((d.world().player.x - PLAYER_RADIUS).abs() < 0.001);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut d = started(3);
        let x0 = d.world().player.x;
        d.set_input(1.0, 1.0);
        d.run_frame(0.1);
        let dx = d.world().player.x - x0;
        let expected = d.world().stats.move_speed * 0.1 / std::f32::consts::SQRT_2;
        assert!((dx - expected).abs() < 0.01);
    }

    #[test]
    fn admin_jump_follows_the_normal_transition_path() {
        let mut d = started(4);
        d.run_frame(0.016);
        d.admin_jump_to_stage(3).unwrap();
        assert_eq!(d.world().stage, 3);
        assert_eq!(d.phase(), Phase::Paused(PauseReason::Transition));
        assert!(d
            .events()
            .iter()
            .any(|e| matches!(e, FrameEvent::StageTransition { new_stage: 3 })));
        // バナー経過で自動再開
        d.run_frame(BANNER_DURATION + 0.1);
        assert_eq!(d.phase(), Phase::Running);
    }

    #[test]
    fn admin_upgrade_requires_a_started_game() {
        let mut d = Director::new(5);
        assert_eq!(
            d.admin_apply_upgrade(UpgradeKind::MoveSpeed),
            Err(SimError::NotRunning)
        );
        d.start().unwrap();
        let before = d.world().stats.move_speed;
        d.admin_apply_upgrade(UpgradeKind::MoveSpeed).unwrap();
        assert!(d.world().stats.move_speed > before);
    }

    #[test]
    fn level_up_opens_the_menu_and_choice_resumes() {
        let mut d = started(6);
        d.run_frame(0.016);
        d.admin_grant_xp(40).unwrap();
        d.run_frame(0.016);
        assert_eq!(d.phase(), Phase::Paused(PauseReason::LevelUp));
        let n = d.upgrade_choices().len();
        assert!(n >= 1 && n <= 3);

        assert_eq!(d.choose_upgrade(99), Err(SimError::InvalidChoice));
        d.choose_upgrade(0).unwrap();
        assert_eq!(d.phase(), Phase::Running);
        assert_eq!(d.choose_upgrade(0), Err(SimError::NoPendingLevelUp));
    }

    #[test]
    fn stage_advances_exactly_once_per_boss_quota() {
        let mut d = started(10);
        d.run_frame(0.016);
        d.world.boss_kills = 1;
        d.run_frame(0.016);
        assert_eq!(d.world.stage, 2);
        assert_eq!(d.phase(), Phase::Paused(PauseReason::Transition));
        // 遷移でステージ内カウンタはリセットされる
        assert_eq!(d.world.boss_kills, 0);

        // バナー消化後に再度フレームを回しても二重には進まない
        d.run_frame(BANNER_DURATION + 0.1);
        assert_eq!(d.phase(), Phase::Running);
        d.run_frame(0.016);
        assert_eq!(d.world.stage, 2);
    }

    #[test]
    fn stage_two_requires_two_boss_kills() {
        let mut d = started(11);
        d.run_frame(0.016);
        d.world.boss_kills = 1;
        d.run_frame(0.016);
        d.run_frame(BANNER_DURATION + 0.1);
        assert_eq!(d.world.stage, 2);

        d.world.boss_kills = 1;
        d.run_frame(0.016);
        assert_eq!(d.world.stage, 2);
        d.world.boss_kills = 2;
        d.run_frame(0.016);
        assert_eq!(d.world.stage, 3);
    }

    #[test]
    fn transition_outranks_a_pending_level_up_menu() {
        let mut d = started(12);
        d.run_frame(0.016);
        // 同フレームでボス規定数とレベルアップが同時に成立した状況
        d.world.boss_kills = 1;
        d.world.grant_xp(40);
        assert!(d.world.level_up_pending);

        d.run_frame(0.016);
        assert_eq!(d.phase(), Phase::Paused(PauseReason::Transition));

        // バナー解除後の次フレームで保留中のメニューが開く
        d.run_frame(BANNER_DURATION + 0.1);
        d.run_frame(0.016);
        assert_eq!(d.phase(), Phase::Paused(PauseReason::LevelUp));
    }

    #[test]
    fn time_up_ends_the_run() {
        let mut d = started(7);
        let duration = d.world().config().duration;
        d.run_frame(duration + 1.0);
        assert_eq!(d.phase(), Phase::GameOver(GameOverReason::TimeUp));
    }

    #[test]
    fn player_death_ends_the_run() {
        let mut d = started(8);
        d.run_frame(0.016);
        let (px, py) = (d.world().player.x, d.world().player.y);
        // ボス（接触 2 ダメージ）を重ねて無敵時間を挟みつつ 2 回被弾させる
        d.admin_spawn(EnemyKind::Boss, px, py).unwrap();
        for _ in 0..200 {
            d.run_frame(0.016);
            if matches!(d.phase(), Phase::GameOver(_)) {
                break;
            }
        }
        assert_eq!(d.phase(), Phase::GameOver(GameOverReason::Death));
    }

    #[test]
    fn game_over_frames_are_inert() {
        let mut d = started(9);
        let duration = d.world().config().duration;
        d.run_frame(duration + 1.0);
        let clock = d.world().clock;
        d.run_frame(1.0);
        assert_eq!(d.world().clock, clock);
    }
}
