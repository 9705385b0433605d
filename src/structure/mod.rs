//! # 结构表征计算模块
//!
//! 实空间与倒空间的结构函数计算。
//!
//! ## 子模块
//! - `periodic`: 最小镜像位移
//! - `rdf`: 径向分布函数 g(r)
//! - `transform`: g(r) ↔ S(q) 的 Fourier-Bessel 变换
//! - `lattice`: 倒空间波矢采样
//! - `direct`: 由坐标直接计算 S(q)
//! - `intermediate`: 自中间散射函数 F_s(q,t)
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 的 Frame, ParticleSet, Profile

pub mod direct;
pub mod export;
pub mod intermediate;
pub mod lattice;
pub mod periodic;
pub mod plot;
pub mod rdf;
pub mod transform;

pub use direct::DirectStructureFactor;
pub use intermediate::IntermediateScattering;
pub use lattice::WaveVectorGrid;
pub use rdf::Rdf;
pub use transform::{PairCorrelation, StructureFactor};

/// 线性等分网格：`start + i·step`，最后一点固定为 `stop`
///
/// `num == 1` 时只返回 `[start]`，`num == 0` 时返回空。
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut grid: Vec<f64> = (0..num).map(|i| i as f64 * step + start).collect();
            grid[num - 1] = stop;
            grid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        let grid = linspace(1.0, 8.0, 8);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0], 1.0);
        assert_eq!(grid[7], 8.0);
        assert!((grid[3] - 4.0).abs() < 1e-12);

        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(2.0, 5.0, 0).is_empty());
    }
}
