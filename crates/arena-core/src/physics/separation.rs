//! Path: crates/arena-core/src/physics/separation.rs
//! Summary: 敵同士の重なり解消（Separation）トレイトと分離ベクトル更新

use super::spatial_hash::SpatialHash;
use crate::constants::{SEPARATION_CAP, SEPARATION_SIZE_FACTOR};

/// 分離パスが必要とする敵コレクションへのアクセス。
/// dying 状態の敵は `is_live` を false にすることで暗黙に計算から外れる。
pub trait EnemySeparation {
    fn enemy_count(&self) -> usize;
    fn is_live(&self, i: usize) -> bool;
    fn pos_x(&self, i: usize) -> f32;
    fn pos_y(&self, i: usize) -> f32;
    /// 当たりサイズ（直径）。分離半径は `SEPARATION_SIZE_FACTOR × size`。
    fn size(&self, i: usize) -> f32;
    fn sep_buf_x(&mut self) -> &mut Vec<f32>;
    fn sep_buf_y(&mut self) -> &mut Vec<f32>;
    fn neighbor_buf(&mut self) -> &mut Vec<usize>;
}

/// 分離ベクトルを再計算してキャッシュバッファに書き込む。
/// 毎フレームではなくスロットリング間隔で呼ばれ、移動側は
/// キャッシュ済みベクトルを dt スケールで加算する。
/// 合力は正規化して固定上限にクランプするため、密集地帯でも暴走しない。
pub fn refresh_separation<W: EnemySeparation>(world: &mut W) {
    let len = world.enemy_count();
    world.sep_buf_x().iter_mut().for_each(|v| *v = 0.0);
    world.sep_buf_y().iter_mut().for_each(|v| *v = 0.0);
    if len < 2 {
        return;
    }

    // 最大の分離半径をセルサイズにして 1 セル近傍で足りるようにする
    let mut max_radius = 0.0_f32;
    for i in 0..len {
        if world.is_live(i) {
            max_radius = max_radius.max(world.size(i) * SEPARATION_SIZE_FACTOR);
        }
    }
    if max_radius <= 0.0 {
        return;
    }

    let mut hash = SpatialHash::new(max_radius);
    for i in 0..len {
        if world.is_live(i) {
            hash.insert(i, world.pos_x(i), world.pos_y(i));
        }
    }

    for i in 0..len {
        if !world.is_live(i) {
            continue;
        }
        let ix = world.pos_x(i);
        let iy = world.pos_y(i);
        let ir = world.size(i) * SEPARATION_SIZE_FACTOR;

        hash.query_nearby_into(ix, iy, max_radius, world.neighbor_buf());
        let nb_len = world.neighbor_buf().len();
        for ni in 0..nb_len {
            let j = world.neighbor_buf()[ni];
            if j <= i || !world.is_live(j) {
                continue;
            }
            let jx = world.pos_x(j);
            let jy = world.pos_y(j);
            let radius = ir.max(world.size(j) * SEPARATION_SIZE_FACTOR);

            let dx = ix - jx;
            let dy = iy - jy;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq < radius * radius && dist_sq > 1e-6 {
                let dist = dist_sq.sqrt();
                let overlap = radius - dist;
                let nx = (dx / dist) * overlap;
                let ny = (dy / dist) * overlap;
                world.sep_buf_x()[i] += nx;
                world.sep_buf_y()[i] += ny;
                world.sep_buf_x()[j] -= nx;
                world.sep_buf_y()[j] -= ny;
            }
        }
    }

    // 隣接数に関係なく合力を固定上限にクランプ
    for i in 0..len {
        let sx = world.sep_buf_x()[i];
        let sy = world.sep_buf_y()[i];
        let mag_sq = sx * sx + sy * sy;
        if mag_sq > SEPARATION_CAP * SEPARATION_CAP {
            let mag = mag_sq.sqrt();
            world.sep_buf_x()[i] = (sx / mag) * SEPARATION_CAP;
            world.sep_buf_y()[i] = (sy / mag) * SEPARATION_CAP;
        }
    }
}
