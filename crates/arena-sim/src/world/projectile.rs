//! Path: crates/arena-sim/src/world/projectile.rs
//! Summary: 弾丸 SoA（ProjectileWorld）とバウンス・既ヒット集合の管理

use super::enemy::EnemyId;

/// 弾丸 SoA（Structure of Arrays）
///
/// `hit_ids` は二重ヒット防止とバウンス先選択のための既ヒット敵集合。
/// 世代付きハンドルなので、スロット再利用後の別の敵を誤って除外しない。
pub struct ProjectileWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    /// 進行方向（単位ベクトル、バウンス時のみ書き換わる）
    pub dir_x:        Vec<f32>,
    pub dir_y:        Vec<f32>,
    pub bounces_left: Vec<u32>,
    pub hit_ids:      Vec<Vec<EnemyId>>,
    pub alive:        Vec<bool>,
    pub count:        usize,
    free_list:        Vec<usize>,
}

impl ProjectileWorld {
    pub fn new() -> Self {
        Self {
            positions_x:  Vec::new(),
            positions_y:  Vec::new(),
            dir_x:        Vec::new(),
            dir_y:        Vec::new(),
            bounces_left: Vec::new(),
            hit_ids:      Vec::new(),
            alive:        Vec::new(),
            count:        0,
            free_list:    Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn spawn(&mut self, x: f32, y: f32, dir_x: f32, dir_y: f32, bounces: u32) {
        if let Some(i) = self.free_list.pop() {
            // O(1): フリーリストから再利用（hit_ids の確保済み容量も再利用）
            self.positions_x[i]  = x;
            self.positions_y[i]  = y;
            self.dir_x[i]        = dir_x;
            self.dir_y[i]        = dir_y;
            self.bounces_left[i] = bounces;
            self.hit_ids[i].clear();
            self.alive[i]        = true;
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.dir_x.push(dir_x);
            self.dir_y.push(dir_y);
            self.bounces_left.push(bounces);
            self.hit_ids.push(Vec::new());
            self.alive.push(true);
        }
        self.count += 1;
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    pub fn clear_all(&mut self) {
        for i in 0..self.len() {
            self.kill(i);
        }
    }
}
