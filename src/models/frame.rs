//! # 模拟帧数据模型
//!
//! 定义粒子模拟的快照表示：正交周期盒子、帧（坐标 + 类型）、按类型筛选的粒子子集，
//! 以及帧数据源接口。
//!
//! ## 依赖关系
//! - 被 `parsers/` 构造
//! - 被 `structure/` 的所有计算模块通过 `ParticleSet` 只读访问
//! - 无外部模块依赖

use crate::error::{FsmscError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 正交周期盒子
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationBox {
    /// 各轴盒长 (Lx, Ly, Lz)
    pub lengths: [f64; 3],
}

impl SimulationBox {
    pub fn new(lengths: [f64; 3]) -> Self {
        SimulationBox { lengths }
    }

    /// 立方盒子
    pub fn cubic(length: f64) -> Self {
        SimulationBox {
            lengths: [length; 3],
        }
    }

    /// 盒子体积
    pub fn volume(&self) -> f64 {
        self.lengths[0] * self.lengths[1] * self.lengths[2]
    }

    /// 最短盒长
    pub fn min_length(&self) -> f64 {
        self.lengths.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// 检查盒长均为正的有限值
    pub fn validate(&self) -> Result<()> {
        for (axis, &l) in ["x", "y", "z"].iter().zip(self.lengths.iter()) {
            if !(l.is_finite() && l > 0.0) {
                return Err(FsmscError::invalid(format!(
                    "box length along {} must be positive and finite, got {}",
                    axis, l
                )));
            }
        }
        Ok(())
    }
}

/// 只读粒子集合
///
/// 几何、g(r)、直接结构因子与 F_s(q,t) 只通过这个接口读取坐标和盒子。
pub trait ParticleSet {
    /// 粒子坐标
    fn positions(&self) -> &[[f64; 3]];

    /// 周期盒子
    fn simulation_box(&self) -> SimulationBox;

    /// 各轴盒长
    fn box_lengths(&self) -> [f64; 3] {
        self.simulation_box().lengths
    }

    /// 粒子数
    fn count(&self) -> usize {
        self.positions().len()
    }

    /// 理想气体数密度 N / V
    fn number_density(&self) -> f64 {
        self.count() as f64 / self.simulation_box().volume()
    }
}

/// 单帧快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// 帧序号（从 0 开始）
    pub index: usize,

    /// 模拟步数（数据源没有时为 0）
    pub timestep: u64,

    /// 粒子坐标
    pub positions: Vec<[f64; 3]>,

    /// 粒子类型标签，与 `positions` 一一对应
    pub types: Vec<i32>,

    /// 周期盒子
    pub simulation_box: SimulationBox,
}

impl Frame {
    pub fn new(
        index: usize,
        positions: Vec<[f64; 3]>,
        types: Vec<i32>,
        simulation_box: SimulationBox,
    ) -> Result<Self> {
        if positions.len() != types.len() {
            return Err(FsmscError::invalid(format!(
                "frame {} has {} positions but {} type tags",
                index,
                positions.len(),
                types.len()
            )));
        }
        simulation_box.validate()?;

        Ok(Frame {
            index,
            timestep: 0,
            positions,
            types,
            simulation_box,
        })
    }

    pub fn with_timestep(mut self, timestep: u64) -> Self {
        self.timestep = timestep;
        self
    }

    /// 按类型筛选粒子（保持原有顺序）
    pub fn select(&self, kind: i32) -> Selection {
        let positions = self
            .positions
            .iter()
            .zip(self.types.iter())
            .filter(|(_, &t)| t == kind)
            .map(|(p, _)| *p)
            .collect();

        Selection {
            kind,
            frame_index: self.index,
            positions,
            simulation_box: self.simulation_box,
        }
    }

    /// 各类型粒子计数
    pub fn type_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for &t in &self.types {
            *counts.entry(t).or_insert(0) += 1;
        }
        counts
    }
}

impl ParticleSet for Frame {
    fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    fn simulation_box(&self) -> SimulationBox {
        self.simulation_box
    }
}

/// 单一类型的粒子子集
#[derive(Debug, Clone)]
pub struct Selection {
    /// 筛选的类型标签
    pub kind: i32,
    /// 来源帧序号
    pub frame_index: usize,
    positions: Vec<[f64; 3]>,
    simulation_box: SimulationBox,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl ParticleSet for Selection {
    fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    fn simulation_box(&self) -> SimulationBox {
        self.simulation_box
    }
}

/// 帧数据源
pub trait FrameSource {
    /// 帧总数
    fn frame_count(&self) -> usize;

    /// 读取第 `index` 帧
    fn get_frame(&self, index: usize) -> Result<Frame>;
}

/// 已载入内存的轨迹
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    /// 轨迹名称（通常为文件名）
    pub name: String,
    pub frames: Vec<Frame>,
}

impl Trajectory {
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Self {
        Trajectory {
            name: name.into(),
            frames,
        }
    }
}

impl FrameSource for Trajectory {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn get_frame(&self, index: usize) -> Result<Frame> {
        self.frames.get(index).cloned().ok_or_else(|| {
            FsmscError::invalid(format!(
                "frame {} out of range ({} frames in '{}')",
                index,
                self.frames.len(),
                self.name
            ))
        })
    }
}
