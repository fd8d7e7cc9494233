//! Path: crates/arena-sim/src/systems/combat.rs
//! Summary: ヒット解決（クリティカル・死亡効果・ドロップ・プレイヤー接触）

use crate::systems::spawn;
use crate::world::{FrameEvent, PickupKind, Sound, World};
use arena_core::constants::{
    BOSS_EXTRA_GEMS, BOSS_GEM_SCATTER, BOSS_HEALTH_DROP_CHANCE, CRIT_CHANCE, CRIT_MULTIPLIER,
    EXPLOSION_DAMAGE, EXPLOSION_RADIUS, HEALTH_DROP_CHANCE, MAX_ENEMY_HALF_SIZE, MERCY_DURATION,
    PLAYER_RADIUS, POWERUP_DROP_CHANCE,
};
use arena_core::enemy::EnemyKind;
use arena_core::powerup::{PowerUpKind, POWERUP_KINDS};

/// キル時のスコア
fn score_value(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Boss   => 100,
        EnemyKind::Elite  => 30,
        EnemyKind::Strong => 20,
        _ => 10,
    }
}

/// 敵 `i` にダメージを与える。HP がゼロ以下になったらキル処理まで行う。
/// 戻り値はキルが成立したかどうか。
///
/// `can_crit` は弾丸・AOE のみ true（爆発の連鎖ダメージはクリティカルしない）。
/// `allow_explosion` は Exploder の爆発が再帰しないためのガード。
pub(crate) fn hit_enemy(
    w: &mut World,
    i: usize,
    damage: f32,
    can_crit: bool,
    allow_explosion: bool,
) -> bool {
    if !w.enemies.live[i] {
        return false;
    }
    let crit = can_crit && w.rng.chance(CRIT_CHANCE);
    let dmg = if crit { damage * CRIT_MULTIPLIER } else { damage };

    w.enemies.hp[i] -= dmg;
    w.frame_events.push(FrameEvent::DamageNumber {
        x:      w.enemies.positions_x[i],
        y:      w.enemies.positions_y[i],
        amount: dmg.round() as u32,
        crit,
    });
    w.push_sound(Sound::Hit);

    if w.enemies.hp[i] <= 0.0 {
        kill_enemy(w, i, allow_explosion);
        true
    } else {
        false
    }
}

/// キル処理: カウンタ更新 → enemy タグ除去（死亡アニメ開始）→ 死亡効果 → ドロップ。
/// ボスのカウントは detag より前に確定する。
pub(crate) fn kill_enemy(w: &mut World, i: usize, allow_explosion: bool) {
    let kind = w.enemies.kinds[i];
    let x = w.enemies.positions_x[i];
    let y = w.enemies.positions_y[i];
    let max_hp = w.enemies.max_hp[i];

    if kind.is_boss() {
        w.boss_kills += 1;
        w.frame_events.push(FrameEvent::BossDefeated { kills_this_stage: w.boss_kills });
    }
    w.kill_count += 1;
    w.score += score_value(kind);
    w.frame_events.push(FrameEvent::EnemyKilled { kind });
    w.push_sound(Sound::Death);

    w.enemies.start_dying(i);

    match kind {
        EnemyKind::Splitter => {
            spawn::spawn_split_children(w, x, y, max_hp * 0.5);
        }
        EnemyKind::Exploder if allow_explosion => {
            explode(w, x, y);
        }
        _ => {}
    }

    drop_pickups(w, kind, x, y);
}

/// Exploder の爆発: 半径内の生存敵に固定ダメージ。
/// 巻き込まれた Exploder は死んでも再爆発しない（連鎖なし）。
fn explode(w: &mut World, x: f32, y: f32) {
    w.frame_events.push(FrameEvent::AoePulse { x, y, radius: EXPLOSION_RADIUS });
    let nearby = w.collision.query_nearby(x, y, EXPLOSION_RADIUS);
    for j in nearby {
        if !w.enemies.live[j] {
            continue;
        }
        let dx = w.enemies.positions_x[j] - x;
        let dy = w.enemies.positions_y[j] - y;
        if dx * dx + dy * dy <= EXPLOSION_RADIUS * EXPLOSION_RADIUS {
            hit_enemy(w, j, EXPLOSION_DAMAGE, false, false);
        }
    }
}

/// 死亡ドロップ。通常はジェム 1 個 + 低確率の回復/パワーアップ。
/// ボスは追加ジェムを散布し、パワーアップを確定でドロップする。
fn drop_pickups(w: &mut World, kind: EnemyKind, x: f32, y: f32) {
    w.pickups.spawn(x, y, PickupKind::Gem);

    if kind.is_boss() {
        for _ in 0..BOSS_EXTRA_GEMS {
            let gx = x + w.rng.next_range(-BOSS_GEM_SCATTER, BOSS_GEM_SCATTER);
            let gy = y + w.rng.next_range(-BOSS_GEM_SCATTER, BOSS_GEM_SCATTER);
            w.pickups.spawn(gx, gy, PickupKind::Gem);
        }
        let p = random_powerup(w);
        w.pickups.spawn(x, y, PickupKind::Power(p));
        if w.rng.chance(BOSS_HEALTH_DROP_CHANCE) {
            w.pickups.spawn(x, y, PickupKind::Health);
        }
        return;
    }

    if w.rng.chance(HEALTH_DROP_CHANCE) {
        w.pickups.spawn(x, y, PickupKind::Health);
    }
    if w.rng.chance(POWERUP_DROP_CHANCE) {
        let p = random_powerup(w);
        w.pickups.spawn(x, y, PickupKind::Power(p));
    }
}

fn random_powerup(w: &mut World) -> PowerUpKind {
    POWERUP_KINDS[(w.rng.next_u32() as usize) % POWERUP_KINDS.len()]
}

/// プレイヤーと敵の接触判定。被弾は 1 フレームに 1 回までで、
/// 被弾後は無敵時間（mercy）が走る。Invincibility パワーアップ中は無効。
pub(crate) fn resolve_player_contact(w: &mut World, dt: f32) {
    if w.player.mercy_timer > 0.0 {
        w.player.mercy_timer -= dt;
    }
    if w.player.mercy_timer > 0.0 || w.powerups.is_active(PowerUpKind::Invincibility) {
        return;
    }

    let px = w.player.x;
    let py = w.player.y;
    // 最大の敵（ボス）の半径まで届く粗いクエリ
    let nearby = w.collision.query_nearby(px, py, PLAYER_RADIUS + MAX_ENEMY_HALF_SIZE);
    for i in nearby {
        if !w.enemies.live[i] {
            continue;
        }
        let reach = PLAYER_RADIUS + w.enemies.kinds[i].size() / 2.0;
        let dx = w.enemies.positions_x[i] - px;
        let dy = w.enemies.positions_y[i] - py;
        if dx * dx + dy * dy <= reach * reach {
            let damage = w.enemies.kinds[i].contact_damage();
            w.player.hp -= damage;
            w.player.mercy_timer = MERCY_DURATION;
            w.frame_events.push(FrameEvent::PlayerDamaged { damage });
            w.push_sound(Sound::PlayerHit);
            break;
        }
    }
}
