//! # 批量处理模块
//!
//! 多帧轨迹的逐帧并行计算。
//!
//! ## 功能
//! - 并行处理
//! - 进度反馈与统计
//! - 失败帧跳过并汇总
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;

pub use runner::{BatchResult, BatchRunner, FrameOutcome};
