//! # 由坐标直接计算结构因子
//!
//! 对波矢网格中的每个 q 计算单粒子结构振幅 F(q) = Σ_j exp(i·q·x_j) 的模方：
//!
//! ```text
//! I(q) = (Σ_j cos(q·x_j))² + (Σ_j sin(q·x_j))²
//! S(q) = I(q) / N
//! ```
//!
//! ## 性能
//! 复杂度 O(K·N)，K = nmax³，是整个工具中开销最大的部分。
//! 外层对波矢用 rayon 并行；每个波矢内部按粒子顺序串行累加，
//! 结果与逐个串行计算逐位一致。
//!
//! ## 依赖关系
//! - 被 `commands/reciprocal.rs` 调用
//! - 使用 `structure/lattice.rs` 生成波矢
//! - 使用 `models/frame.rs` 的 ParticleSet

use crate::error::{FsmscError, Result};
use crate::models::{ParticleSet, Profile};
use crate::structure::lattice::WaveVectorGrid;
use crate::structure::transform::StructureFactor;

use rayon::prelude::*;

/// 直接计算得到的结构因子
#[derive(Debug, Clone)]
pub struct DirectStructureFactor {
    /// 波矢模 |q|，与波矢网格按位置对应
    pub q: Vec<f64>,
    /// 按粒子数归一化后的强度 I(q)/N
    pub s: Vec<f64>,
    /// 参与计算的粒子数
    pub particle_count: usize,
}

impl Profile for DirectStructureFactor {
    fn column_names(&self) -> (&'static str, &'static str) {
        ("q", "S_q")
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        ("|q|", "S(q)")
    }

    fn x(&self) -> &[f64] {
        &self.q
    }

    fn y(&self) -> &[f64] {
        &self.s
    }
}

/// 每个波矢的未归一化强度 |F(q)|²
pub fn evaluate(wave_vectors: &[[f64; 3]], positions: &[[f64; 3]]) -> Vec<f64> {
    wave_vectors
        .par_iter()
        .map(|q| intensity(q, positions))
        .collect()
}

/// 单个波矢的 |F(q)|²，按粒子顺序累加
#[inline]
fn intensity(q: &[f64; 3], positions: &[[f64; 3]]) -> f64 {
    let (re, im) = positions.iter().fold((0.0, 0.0), |(re, im), x| {
        let phase = q[0] * x[0] + q[1] * x[1] + q[2] * x[2];
        (re + phase.cos(), im + phase.sin())
    });
    re * re + im * im
}

/// 生成波矢网格并计算粒子集合的 S(q)
pub fn structure_factor<P: ParticleSet + ?Sized>(
    nmax: usize,
    set: &P,
) -> Result<DirectStructureFactor> {
    let n = set.count();
    if n == 0 {
        return Err(FsmscError::invalid(
            "cannot evaluate a structure factor without particles",
        ));
    }

    let grid = WaveVectorGrid::generate(nmax, &set.simulation_box())?;
    let intensities = evaluate(&grid.vectors, set.positions());

    Ok(DirectStructureFactor {
        q: grid.magnitudes(),
        s: intensities.into_iter().map(|i| i / n as f64).collect(),
        particle_count: n,
    })
}

impl DirectStructureFactor {
    /// 按 (|q|, S) 升序排列的副本
    pub fn sorted_by_magnitude(&self) -> DirectStructureFactor {
        let mut pairs: Vec<(f64, f64)> = self.points();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        DirectStructureFactor {
            q: pairs.iter().map(|p| p.0).collect(),
            s: pairs.iter().map(|p| p.1).collect(),
            particle_count: self.particle_count,
        }
    }

    /// 按 |q| 分壳平均，用于与 g(r) 变换结果对比
    ///
    /// 壳层为 (0, q_max] 上的 `num_shells` 个等宽区间，q = 0 不计入，
    /// 空壳层被丢弃；返回的 q 为壳层中心。
    pub fn shell_average(&self, num_shells: usize, q_max: f64) -> Result<StructureFactor> {
        if num_shells == 0 {
            return Err(FsmscError::invalid("number of shells must be >= 1"));
        }
        if !(q_max.is_finite() && q_max > 0.0) {
            return Err(FsmscError::invalid(format!(
                "shell q_max must be positive, got {}",
                q_max
            )));
        }

        let width = q_max / num_shells as f64;
        let mut sums = vec![0.0; num_shells];
        let mut counts = vec![0usize; num_shells];

        for (&q, &s) in self.q.iter().zip(self.s.iter()) {
            if q <= 0.0 || q > q_max {
                continue;
            }
            let shell = ((q / width).ceil() as usize).clamp(1, num_shells) - 1;
            sums[shell] += s;
            counts[shell] += 1;
        }

        let (q, s) = sums
            .iter()
            .zip(counts.iter())
            .enumerate()
            .filter(|(_, (_, c))| **c > 0)
            .map(|(i, (&sum, &c))| ((i as f64 + 0.5) * width, sum / c as f64))
            .unzip();

        Ok(StructureFactor { q, s })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frame, SimulationBox};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn simple_cubic(spacing: f64, per_axis: usize) -> Frame {
        let mut positions = Vec::new();
        for i in 0..per_axis {
            for j in 0..per_axis {
                for k in 0..per_axis {
                    positions.push([i as f64 * spacing, j as f64 * spacing, k as f64 * spacing]);
                }
            }
        }
        let n = positions.len();
        Frame::new(
            0,
            positions,
            vec![1; n],
            SimulationBox::cubic(spacing * per_axis as f64),
        )
        .unwrap()
    }

    fn random_positions(n: usize, length: f64, seed: u64) -> Vec<[f64; 3]> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                [
                    rng.gen_range(0.0..length),
                    rng.gen_range(0.0..length),
                    rng.gen_range(0.0..length),
                ]
            })
            .collect()
    }

    #[test]
    fn test_zero_vector_gives_n_squared() {
        let positions = random_positions(37, 10.0, 11);
        let raw = evaluate(&[[0.0, 0.0, 0.0]], &positions);
        assert_eq!(raw[0], 37.0 * 37.0);

        let frame = Frame::new(0, positions, vec![1; 37], SimulationBox::cubic(10.0)).unwrap();
        let sq = structure_factor(3, &frame).unwrap();
        assert_eq!(sq.q.len(), 27);
        assert_eq!(sq.q[0], 0.0);
        assert_eq!(sq.s[0], 37.0);
        assert!(sq.s.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_bragg_peak_of_simple_cubic() {
        // 间距 5、盒长 10：(2,0,0) 处全部同相，(1,0,0) 处两两抵消
        let frame = simple_cubic(5.0, 2);
        let sq = structure_factor(3, &frame).unwrap();
        let grid = WaveVectorGrid::generate(3, &frame.simulation_box).unwrap();

        let bragg = grid.position_of(2, 0, 0).unwrap();
        let extinct = grid.position_of(1, 0, 0).unwrap();
        assert!((sq.s[bragg] - 8.0).abs() < 1e-9);
        assert!(sq.s[extinct].abs() < 1e-9);
        assert!((sq.s[grid.position_of(2, 2, 2).unwrap()] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let positions = random_positions(200, 12.0, 5);
        let grid = WaveVectorGrid::generate(5, &SimulationBox::cubic(12.0)).unwrap();

        let parallel = evaluate(&grid.vectors, &positions);
        let serial: Vec<f64> = grid.vectors.iter().map(|q| intensity(q, &positions)).collect();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let frame = Frame::new(0, vec![], vec![], SimulationBox::cubic(10.0)).unwrap();
        assert!(matches!(
            structure_factor(2, &frame),
            Err(FsmscError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sorted_by_magnitude() {
        let positions = random_positions(50, 10.0, 9);
        let frame = Frame::new(0, positions, vec![1; 50], SimulationBox::cubic(10.0)).unwrap();
        let sorted = structure_factor(4, &frame).unwrap().sorted_by_magnitude();

        assert_eq!(sorted.q.len(), 64);
        assert!(sorted.q.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sorted.s[0], 50.0);
    }

    #[test]
    fn test_shell_average() {
        let sq = DirectStructureFactor {
            q: vec![0.0, 0.5, 0.8, 1.5, 3.5],
            s: vec![9.0, 1.0, 3.0, 4.0, 7.0],
            particle_count: 9,
        };
        let shells = sq.shell_average(3, 3.0).unwrap();

        // q = 0 与 q > q_max 的点不计入；第三个壳层为空被丢弃
        assert_eq!(shells.q, vec![0.5, 1.5]);
        assert_eq!(shells.s, vec![2.0, 4.0]);
        assert!(sq.shell_average(0, 3.0).is_err());
    }
}
