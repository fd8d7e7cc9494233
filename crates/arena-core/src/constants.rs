//! Path: crates/arena-core/src/constants.rs
//! Summary: プレイフィールド・戦闘・進行スケジュールのグローバル定数

// Playfield
pub const FIELD_WIDTH:  f32 = 1280.0;
pub const FIELD_HEIGHT: f32 = 720.0;
/// 弾丸・敵のクリーンアップ境界（フィールド外マージン）
pub const FIELD_MARGIN: f32 = 100.0;

// Player
pub const PLAYER_SIZE:     f32 = 48.0;
pub const PLAYER_RADIUS:   f32 = PLAYER_SIZE / 2.0;
pub const PLAYER_SPEED:    f32 = 220.0;
pub const PLAYER_MAX_HP:   i32 = 3;
/// 被弾後の無敵時間（秒）
pub const MERCY_DURATION:  f32 = 0.5;

// Combat
pub const BASE_DAMAGE:      f32 = 1.0;
pub const CRIT_CHANCE:      f32 = 0.10;
pub const CRIT_MULTIPLIER:  f32 = 3.0;
pub const PROJECTILE_SPEED:  f32 = 500.0;
pub const PROJECTILE_RADIUS: f32 = 6.0;
/// 弾丸の初期バウンス回数（ヒット後に次の未ヒット敵へ跳ねる）
pub const PROJECTILE_BOUNCES: u32 = 1;

// Auto-fire defaults / caps
pub const FIRE_INTERVAL:        f32 = 1.0;
pub const FIRE_INTERVAL_FLOOR:  f32 = 0.2;
pub const PROJECTILE_COUNT:     usize = 1;
pub const PROJECTILE_COUNT_CAP: usize = 8;
pub const TARGET_RADIUS:        f32 = 250.0;
pub const TARGET_RADIUS_CAP:    f32 = 500.0;
pub const ATTRACT_RADIUS:       f32 = 60.0;
pub const ATTRACT_RADIUS_CAP:   f32 = 300.0;

// AOE weapon（クールダウンはヒット成立時のみ開始する）
pub const AOE_COOLDOWN:       f32 = 1.5;
pub const AOE_COOLDOWN_FLOOR: f32 = 0.5;
pub const AOE_COOLDOWN_STEP:  f32 = 0.2;

// Slow field
pub const SLOW_PCT:      f32 = 30.0;
pub const SLOW_PCT_STEP: f32 = 10.0;
pub const SLOW_PCT_CAP:  f32 = 80.0;

// Separation（1.5×サイズ以内の隣接敵から反発、固定上限でクランプ）
pub const SEPARATION_SIZE_FACTOR: f32 = 1.5;
pub const SEPARATION_CAP:         f32 = 80.0;
/// 分離ベクトルの再計算間隔（毎フレームではなくスロットリング）
pub const SEPARATION_REFRESH:     f32 = 0.1;

// Charger
pub const CHARGE_COOLDOWN:   f32 = 3.0;
pub const CHARGE_RANGE:      f32 = 200.0;
pub const CHARGE_DURATION:   f32 = 0.5;
pub const CHARGE_SPEED_MULT: f32 = 3.0;

// Splitter / Exploder
pub const SPLIT_COUNT:      usize = 2;
pub const SPLIT_OFFSET:     f32 = 24.0;
pub const EXPLOSION_RADIUS: f32 = 80.0;
pub const EXPLOSION_DAMAGE: f32 = 1.0;

// Death animation（この間は dying 状態で衝突から除外される）
pub const DEATH_ANIM_DURATION: f32 = 0.2;

// Spawn schedule
pub const SPAWN_ACCEL_INTERVAL: f32 = 20.0;
pub const SPAWN_ACCEL_FACTOR:   f32 = 0.9;
pub const SPAWN_INTERVAL_FLOOR: f32 = 0.3;
/// Swarm は 1 回のスポーンでまとめて出現する
pub const SWARM_BURST: usize = 5;

// Horde
pub const HORDE_INTERVAL:      f32 = 30.0;
pub const HORDE_BASE:          usize = 6;
pub const HORDE_INCREMENT:     usize = 2;
pub const HORDE_RING_RADIUS:   f32 = 420.0;
pub const HORDE_STRONG_CHANCE: f32 = 0.3;

// Boss
pub const BOSS_DEFAULT_HP:  f32 = 50.0;
/// ボススポーンが解禁される最低経過時間（秒）
pub const BOSS_MIN_ELAPSED: f32 = 45.0;

// Pickups
pub const XP_PER_GEM:          u32 = 10;
pub const GEM_LIFETIME:        f32 = 15.0;
pub const HEALTH_LIFETIME:     f32 = 10.0;
pub const POWERUP_LIFETIME:    f32 = 10.0;
pub const HEALTH_DROP_CHANCE:  f32 = 0.05;
pub const POWERUP_DROP_CHANCE: f32 = 0.02;
pub const BOSS_HEALTH_DROP_CHANCE: f32 = 0.5;
pub const BOSS_EXTRA_GEMS:     usize = 5;
pub const BOSS_GEM_SCATTER:    f32 = 100.0;

// Power-ups
pub const POWERUP_DURATION:   f32 = 8.0;
pub const SPEED_POWERUP_MULT: f32 = 1.5;
pub const DAMAGE_POWERUP_MULT: f32 = 2.0;

// Experience
pub const XP_BASE_THRESHOLD: u32 = 40;
pub const XP_THRESHOLD_STEP: u32 = 15;

// Spatial hash cell size
pub const CELL_SIZE: f32 = 80.0;
/// 粗い近傍クエリの余白。最大の敵（ボス）の半径と一致させること
pub const MAX_ENEMY_HALF_SIZE: f32 = 40.0;

// Frame budget (60 fps)
pub const FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;

// Level transition banner
pub const BANNER_DURATION: f32 = 2.0;
