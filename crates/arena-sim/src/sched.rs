//! Path: crates/arena-sim/src/sched.rs
//! Summary: フレーム時計に乗るキャンセル可能なインターバルタイマー

use arena_core::enemy::EnemyKind;

/// タイマーが発火したときに Director が処理するタスク。
/// クロージャではなく明示的なメッセージ型にする。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Task {
    /// 敵タイプ別の独立スポーンループ
    SpawnLoop(EnemyKind),
    /// オートファイアのボレー
    FireLoop,
    /// スポーン間隔の短縮（20 秒ごと）
    SpawnAccel,
    /// ホードスポーン（30 秒ごと）
    Horde,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerId(u64);

struct Timer {
    id:       TimerId,
    next_due: f64,
    period:   f64,
    task:     Task,
}

/// シミュレーション時計に乗るスケジューラ。
/// ポーズ中は `advance` が呼ばれないので全タイマーが止まる。
/// 周期の変更手段は「キャンセルして作り直す」のみ（インプレース変更なし）。
pub struct Scheduler {
    now:     f64,
    next_id: u64,
    timers:  Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now:     0.0,
            next_id: 0,
            timers:  Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// 周期タイマーを登録する。初回発火は `now + period`。
    pub fn schedule_interval(&mut self, task: Task, period: f32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            next_due: self.now + period as f64,
            period:   period as f64,
            task,
        });
        id
    }

    /// タイマーをデタッチする。以後発火しない。
    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    /// 時計を進め、発火したタスクを登録順で `due` に書き出す。
    /// dt が周期より大きい場合は周期ごとに複数回発火する。
    pub fn advance(&mut self, dt: f32, due: &mut Vec<Task>) {
        due.clear();
        self.now += dt as f64;
        for t in &mut self.timers {
            while t.next_due <= self.now {
                due.push(t.task);
                t.next_due += t.period;
            }
        }
    }
}
