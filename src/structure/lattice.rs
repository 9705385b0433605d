//! # 倒空间波矢采样
//!
//! 生成周期盒子允许的波矢 q = (2π/Lx·nx, 2π/Ly·ny, 2π/Lz·nz)，
//! nx, ny, nz ∈ [0, nmax)，嵌套顺序 nx → ny → nz（nz 最内层）。
//!
//! 这个枚举顺序是对外约定：`direct.rs` 的输出与网格按位置一一对应。
//!
//! 注意：指数从 0 开始，只覆盖倒格子的一个卦限，而不是对称的整个球；
//! 零矢量 (0,0,0) 总是第一个元素。
//!
//! ## 依赖关系
//! - 被 `structure/direct.rs` 调用
//! - 使用 `models/frame.rs` 的 SimulationBox

use crate::error::{FsmscError, Result};
use crate::models::SimulationBox;
use crate::structure::periodic::norm;

use std::f64::consts::PI;

/// 网格波矢个数 nmax³，溢出或超出可分配大小时报错
pub fn grid_size(nmax: usize) -> Result<usize> {
    nmax.checked_pow(3)
        .filter(|&count| count <= isize::MAX as usize / std::mem::size_of::<[f64; 3]>())
        .ok_or_else(|| {
            FsmscError::invalid(format!("nmax = {} gives too many wave vectors", nmax))
        })
}

/// 波矢网格
#[derive(Debug, Clone)]
pub struct WaveVectorGrid {
    /// 每轴的整数指数上限（不含）
    pub nmax: usize,
    /// 波矢列表，长度 nmax³
    pub vectors: Vec<[f64; 3]>,
}

impl WaveVectorGrid {
    /// 按盒子尺寸生成 nmax³ 个波矢
    pub fn generate(nmax: usize, simulation_box: &SimulationBox) -> Result<Self> {
        if nmax == 0 {
            return Err(FsmscError::invalid("nmax must be >= 1"));
        }
        let count = grid_size(nmax)?;
        simulation_box.validate()?;

        let factor = simulation_box.lengths.map(|l| 2.0 * PI / l);

        let mut vectors = Vec::with_capacity(count);
        for nx in 0..nmax {
            for ny in 0..nmax {
                for nz in 0..nmax {
                    vectors.push([
                        factor[0] * nx as f64,
                        factor[1] * ny as f64,
                        factor[2] * nz as f64,
                    ]);
                }
            }
        }

        Ok(WaveVectorGrid { nmax, vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// 各波矢的模 |q|
    pub fn magnitudes(&self) -> Vec<f64> {
        self.vectors.iter().map(|&v| norm(v)).collect()
    }

    /// 整数指数 (nx, ny, nz) 在网格中的位置
    pub fn position_of(&self, nx: usize, ny: usize, nz: usize) -> Option<usize> {
        if nx < self.nmax && ny < self.nmax && nz < self.nmax {
            Some((nx * self.nmax + ny) * self.nmax + nz)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order() {
        let grid = WaveVectorGrid::generate(2, &SimulationBox::cubic(10.0)).unwrap();
        let k = 2.0 * PI / 10.0;
        let expected = [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
        ];

        assert_eq!(grid.len(), 8);
        for (v, e) in grid.vectors.iter().zip(expected.iter()) {
            for axis in 0..3 {
                assert!((v[axis] - k * e[axis]).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_no_duplicates_and_zero_first() {
        let grid = WaveVectorGrid::generate(4, &SimulationBox::new([10.0, 12.0, 8.0])).unwrap();
        assert_eq!(grid.len(), 64);
        assert_eq!(grid.vectors[0], [0.0, 0.0, 0.0]);
        assert_eq!(grid.magnitudes()[0], 0.0);

        for i in 0..grid.len() {
            for j in (i + 1)..grid.len() {
                assert_ne!(grid.vectors[i], grid.vectors[j]);
            }
        }
    }

    #[test]
    fn test_anisotropic_scaling() {
        let grid = WaveVectorGrid::generate(3, &SimulationBox::new([10.0, 20.0, 5.0])).unwrap();
        let idx = grid.position_of(1, 2, 1).unwrap();
        let v = grid.vectors[idx];
        assert!((v[0] - 2.0 * PI / 10.0).abs() < 1e-12);
        assert!((v[1] - 2.0 * 2.0 * PI / 20.0).abs() < 1e-12);
        assert!((v[2] - 2.0 * PI / 5.0).abs() < 1e-12);
        assert_eq!(grid.position_of(3, 0, 0), None);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(WaveVectorGrid::generate(0, &SimulationBox::cubic(10.0)).is_err());
        assert!(WaveVectorGrid::generate(2, &SimulationBox::cubic(-1.0)).is_err());
    }

    #[test]
    fn test_oversized_nmax() {
        assert_eq!(grid_size(4).unwrap(), 64);
        assert!(grid_size(usize::MAX).is_err());
        assert!(grid_size(1 << 21).is_err());
        assert!(matches!(
            WaveVectorGrid::generate(usize::MAX, &SimulationBox::cubic(10.0)),
            Err(FsmscError::InvalidInput(_))
        ));
    }
}
