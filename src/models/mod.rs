//! # 数据模型模块
//!
//! 定义模拟帧、周期盒子和一维曲线的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `structure/` 和 `commands/` 使用
//! - 子模块: frame, profile

pub mod frame;
pub mod profile;

pub use frame::{Frame, FrameSource, ParticleSet, Selection, SimulationBox, Trajectory};
pub use profile::Profile;
