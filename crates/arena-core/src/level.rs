//! Path: crates/arena-core/src/level.rs
//! Summary: ステージ別の難易度テーブル（倍率・スポーン間隔・ボス設定）

/// ステージ設定（ステージ番号 1 始まりで参照）
#[derive(Clone, Copy, Debug)]
pub struct LevelConfig {
    /// 敵の移動速度倍率
    pub speed_mult:     f32,
    /// 敵の HP 倍率
    pub health_mult:    f32,
    /// スポーンループの初期間隔（秒）
    pub spawn_interval: f32,
    /// ボスの最大 HP
    pub boss_health:    f32,
    /// ボススポーンの最短間隔（秒）
    pub boss_interval:  f32,
    /// ステージの制限時間（秒）
    pub duration:       f32,
}

static LEVEL_TABLE: [LevelConfig; 5] = [
    LevelConfig { speed_mult: 1.0,  health_mult: 1.0, spawn_interval: 2.0,  boss_health:  50.0, boss_interval: 60.0, duration: 300.0 },
    LevelConfig { speed_mult: 1.1,  health_mult: 1.5, spawn_interval: 1.7,  boss_health:  80.0, boss_interval: 55.0, duration: 300.0 },
    LevelConfig { speed_mult: 1.2,  health_mult: 2.0, spawn_interval: 1.4,  boss_health: 120.0, boss_interval: 50.0, duration: 330.0 },
    LevelConfig { speed_mult: 1.35, health_mult: 2.5, spawn_interval: 1.1,  boss_health: 170.0, boss_interval: 45.0, duration: 330.0 },
    LevelConfig { speed_mult: 1.5,  health_mult: 3.0, spawn_interval: 0.9,  boss_health: 230.0, boss_interval: 40.0, duration: 360.0 },
];

impl LevelConfig {
    /// ステージ番号で設定を引く。テーブル範囲外は最終ステージにクランプする。
    pub fn get(stage: u32) -> &'static LevelConfig {
        let idx = (stage.max(1) as usize - 1).min(LEVEL_TABLE.len() - 1);
        &LEVEL_TABLE[idx]
    }

    pub fn last_stage() -> u32 {
        LEVEL_TABLE.len() as u32
    }
}
