//! # 径向分布函数 g(r)
//!
//! 从单帧坐标计算径向分布函数。
//!
//! ## 算法概述
//! 1. 按类型筛选粒子，坐标折回盒内 [0, L)（未折回坐标也能正确处理）
//! 2. 以每个粒子为参考，计算到其余粒子的最小镜像距离
//! 3. 距离严格小于截断半径的计入 [0, r_cut] 上的等宽直方图
//! 4. 累加所有参考粒子的直方图，除以粒子数
//! 5. 除以球壳体积 4/3·π·(r_hi³ − r_lo³) 和理想气体数密度 N/V
//!
//! 直方图计数为整数，参考粒子之间用 rayon 并行 fold/reduce，结果与串行完全一致。
//!
//! ## 依赖关系
//! - 被 `commands/real.rs` 调用
//! - 使用 `structure/periodic.rs` 计算最小镜像距离
//! - 使用 `models/frame.rs` 的 Frame, ParticleSet

use crate::error::{FsmscError, Result};
use crate::models::{Frame, ParticleSet, Profile};
use crate::structure::linspace;
use crate::structure::periodic;

use rayon::prelude::*;
use std::f64::consts::PI;

/// 径向分布函数
#[derive(Debug, Clone)]
pub struct Rdf {
    /// 半径（各 bin 的上边界）
    pub r: Vec<f64>,
    /// g(r)
    pub g: Vec<f64>,
    /// 全部 bin 边界（长度 = bin 数 + 1）
    pub edges: Vec<f64>,
    /// 归一化使用的数密度 N/V
    pub density: f64,
    /// 参与统计的粒子数
    pub particle_count: usize,
}

impl Profile for Rdf {
    fn column_names(&self) -> (&'static str, &'static str) {
        ("r", "g_r")
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        ("r", "g(r)")
    }

    fn x(&self) -> &[f64] {
        &self.r
    }

    fn y(&self) -> &[f64] {
        &self.g
    }
}

/// 计算一帧中某类粒子的 g(r)
pub fn compute_rdf(frame: &Frame, kind: i32, cutoff: f64, num_bins: usize) -> Result<Rdf> {
    let selection = frame.select(kind);
    if selection.is_empty() {
        return Err(FsmscError::invalid(format!(
            "no particles of type {} in frame {}",
            kind, frame.index
        )));
    }
    rdf_from_set(&selection, cutoff, num_bins)
}

/// 计算任意粒子集合的 g(r)
pub fn rdf_from_set<P: ParticleSet + ?Sized>(set: &P, cutoff: f64, num_bins: usize) -> Result<Rdf> {
    let simulation_box = set.simulation_box();
    simulation_box.validate()?;

    let n = set.count();
    if n == 0 {
        return Err(FsmscError::invalid("empty particle set"));
    }
    if num_bins == 0 {
        return Err(FsmscError::invalid("number of histogram bins must be >= 1"));
    }
    if !(cutoff.is_finite() && cutoff > 0.0) {
        return Err(FsmscError::invalid(format!(
            "cutoff radius must be positive, got {}",
            cutoff
        )));
    }
    let half_box = 0.5 * simulation_box.min_length();
    if cutoff > half_box {
        return Err(FsmscError::invalid(format!(
            "cutoff radius {} exceeds half of the shortest box length ({})",
            cutoff, half_box
        )));
    }

    let edges = linspace(0.0, cutoff, num_bins + 1);
    let lengths = simulation_box.lengths;
    let wrapped: Vec<[f64; 3]> = set
        .positions()
        .iter()
        .map(|&x| periodic::wrap_position(x, lengths))
        .collect();
    let counts = pair_histogram(&wrapped, lengths, &edges);

    let density = n as f64 / simulation_box.volume();
    let g: Vec<f64> = counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&c, w)| {
            let per_particle = c as f64 / n as f64;
            let shell = 4.0 / 3.0 * PI * (w[1].powi(3) - w[0].powi(3));
            per_particle / (shell * density)
        })
        .collect();

    Ok(Rdf {
        r: edges[1..].to_vec(),
        g,
        edges,
        density,
        particle_count: n,
    })
}

/// 所有参考粒子的距离直方图之和，只统计严格小于截断半径的距离
fn pair_histogram(positions: &[[f64; 3]], lengths: [f64; 3], edges: &[f64]) -> Vec<u64> {
    let num_bins = edges.len() - 1;
    let cutoff = edges[num_bins];
    let n = positions.len();

    (0..n)
        .into_par_iter()
        .fold(
            || vec![0u64; num_bins],
            |mut hist, i| {
                for r in periodic::neighbor_distances(i, positions, 0..n, lengths) {
                    if r < cutoff {
                        hist[bin_index(r, edges)] += 1;
                    }
                }
                hist
            },
        )
        .reduce(
            || vec![0u64; num_bins],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        )
}

/// 等宽 bin 的下标：区间左闭右开，最后一个 bin 右闭
fn bin_index(value: f64, edges: &[f64]) -> usize {
    let num_bins = edges.len() - 1;
    let first = edges[0];
    let last = edges[num_bins];

    let mut idx = ((value - first) * (num_bins as f64 / (last - first))) as usize;
    if idx >= num_bins {
        idx = num_bins - 1;
    }
    // 浮点舍入可能落到相邻 bin，用边界再校正一次
    if idx > 0 && value < edges[idx] {
        idx -= 1;
    } else if idx + 1 < num_bins && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}

/// 多帧 g(r) 的逐 bin 平均
pub fn average_rdfs(rdfs: &[Rdf]) -> Result<Rdf> {
    let first = rdfs
        .first()
        .ok_or_else(|| FsmscError::invalid("no RDFs to average"))?;

    for other in &rdfs[1..] {
        if other.edges.len() != first.edges.len()
            || other
                .edges
                .iter()
                .zip(first.edges.iter())
                .any(|(a, b)| (a - b).abs() > 1e-12)
        {
            return Err(FsmscError::invalid(
                "cannot average RDFs computed on different histogram grids",
            ));
        }
    }

    let count = rdfs.len() as f64;
    let mut g = vec![0.0; first.g.len()];
    let mut r = vec![0.0; first.r.len()];
    let mut density = 0.0;
    for rdf in rdfs {
        for (acc, v) in g.iter_mut().zip(rdf.g.iter()) {
            *acc += v;
        }
        for (acc, v) in r.iter_mut().zip(rdf.r.iter()) {
            *acc += v;
        }
        density += rdf.density;
    }
    g.iter_mut().for_each(|v| *v /= count);
    r.iter_mut().for_each(|v| *v /= count);

    Ok(Rdf {
        r,
        g,
        edges: first.edges.clone(),
        density: density / count,
        particle_count: first.particle_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimulationBox;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_frame(n: usize, length: f64, seed: u64) -> Frame {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = (0..n)
            .map(|_| {
                [
                    rng.gen_range(0.0..length),
                    rng.gen_range(0.0..length),
                    rng.gen_range(0.0..length),
                ]
            })
            .collect();
        Frame::new(0, positions, vec![1; n], SimulationBox::cubic(length)).unwrap()
    }

    #[test]
    fn test_uniform_random_approaches_one() {
        let frame = random_frame(1000, 10.0, 42);
        let rdf = compute_rdf(&frame, 1, 5.0, 50).unwrap();

        assert_eq!(rdf.r.len(), 50);
        assert_eq!(rdf.g.len(), 50);
        assert!((rdf.r[49] - 5.0).abs() < 1e-12);

        let tail = rdf.g[49];
        assert!((tail - 1.0).abs() < 0.1, "g(r -> 5) = {}", tail);

        // 外层 bin 的平均更稳定
        let mean_tail: f64 = rdf.g[40..].iter().sum::<f64>() / 10.0;
        assert!((mean_tail - 1.0).abs() < 0.05, "mean tail = {}", mean_tail);
    }

    #[test]
    fn test_normalization_counts_neighbors() {
        let frame = random_frame(500, 10.0, 7);
        let cutoff = 4.0;
        let rdf = compute_rdf(&frame, 1, cutoff, 40).unwrap();

        // Σ g·V_shell·ρ = 每个粒子在截断半径内的平均邻居数
        let neighbors: f64 = rdf
            .g
            .iter()
            .zip(rdf.edges.windows(2))
            .map(|(g, w)| g * 4.0 / 3.0 * PI * (w[1].powi(3) - w[0].powi(3)) * rdf.density)
            .sum();

        let expected = (500.0 - 1.0) / 1000.0 * 4.0 / 3.0 * PI * cutoff.powi(3);
        assert!(
            (neighbors - expected).abs() / expected < 0.05,
            "neighbors = {}, expected ~ {}",
            neighbors,
            expected
        );
    }

    #[test]
    fn test_single_pair_lands_in_expected_bin() {
        // 跨边界的一对粒子，最小镜像距离 0.25
        let frame = Frame::new(
            0,
            vec![[0.1, 5.0, 5.0], [9.85, 5.0, 5.0]],
            vec![1, 1],
            SimulationBox::cubic(10.0),
        )
        .unwrap();
        let rdf = compute_rdf(&frame, 1, 1.0, 10).unwrap();

        let nonzero: Vec<usize> = rdf
            .g
            .iter()
            .enumerate()
            .filter(|(_, g)| **g > 0.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(nonzero, vec![2]);
        assert!(rdf.g.iter().all(|g| g.is_finite() && *g >= 0.0));
    }

    #[test]
    fn test_type_filter_and_errors() {
        let frame = random_frame(20, 10.0, 1);
        assert!(matches!(
            compute_rdf(&frame, 2, 3.0, 10),
            Err(FsmscError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_rdf(&frame, 1, 5.5, 10),
            Err(FsmscError::InvalidInput(_))
        ));
        assert!(compute_rdf(&frame, 1, 0.0, 10).is_err());
        assert!(compute_rdf(&frame, 1, 3.0, 0).is_err());
    }

    #[test]
    fn test_cutoff_limited_by_shortest_axis() {
        let frame = Frame::new(
            0,
            vec![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]],
            vec![1, 1],
            SimulationBox::new([20.0, 20.0, 6.0]),
        )
        .unwrap();
        assert!(compute_rdf(&frame, 1, 3.0, 5).is_ok());
        assert!(compute_rdf(&frame, 1, 3.5, 5).is_err());
    }

    #[test]
    fn test_bin_index_edges() {
        let edges = linspace(0.0, 1.0, 11);
        assert_eq!(bin_index(0.0, &edges), 0);
        assert_eq!(bin_index(0.1, &edges), 1);
        assert_eq!(bin_index(0.35, &edges), 3);
        assert_eq!(bin_index(0.99, &edges), 9);
    }

    #[test]
    fn test_pair_at_cutoff_is_dropped() {
        let frame = Frame::new(
            0,
            vec![[1.0, 5.0, 5.0], [2.0, 5.0, 5.0]],
            vec![1, 1],
            SimulationBox::cubic(10.0),
        )
        .unwrap();
        let rdf = compute_rdf(&frame, 1, 1.0, 4).unwrap();
        assert!(rdf.g.iter().all(|&g| g == 0.0), "g = {:?}", rdf.g);

        // 略大的截断半径时这对粒子落在最后一个 bin
        let rdf = compute_rdf(&frame, 1, 1.2, 4).unwrap();
        assert!(rdf.g[3] > 0.0);
    }

    #[test]
    fn test_unwrapped_dump_coordinates() {
        use crate::models::FrameSource;
        use crate::parsers::lammps_dump::parse_dump_content;

        // 只有 xu 列，两粒子相隔两个多盒长，最小镜像距离 0.5
        let content = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0 10
0 10
0 10
ITEM: ATOMS id type xu yu zu
1 1 1.0 5.0 5.0
2 1 21.5 5.0 5.0
";
        let traj = parse_dump_content(content, "unwrapped").unwrap();
        let frame = traj.get_frame(0).unwrap();
        let rdf = compute_rdf(&frame, 1, 1.0, 4).unwrap();

        let nonzero: Vec<usize> = (0..4).filter(|&i| rdf.g[i] > 0.0).collect();
        assert_eq!(nonzero, vec![2]);
    }

    #[test]
    fn test_average_rdfs() {
        let a = compute_rdf(&random_frame(200, 10.0, 3), 1, 4.0, 20).unwrap();
        let b = compute_rdf(&random_frame(200, 10.0, 4), 1, 4.0, 20).unwrap();
        let avg = average_rdfs(&[a.clone(), b.clone()]).unwrap();
        for i in 0..20 {
            assert!((avg.g[i] - 0.5 * (a.g[i] + b.g[i])).abs() < 1e-12);
        }

        let c = compute_rdf(&random_frame(200, 10.0, 5), 1, 4.0, 10).unwrap();
        assert!(average_rdfs(&[a, c]).is_err());
        assert!(average_rdfs(&[]).is_err());
    }
}
