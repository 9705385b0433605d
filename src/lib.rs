//! # fsmsc - 模拟流体与软物质的结构表征
//!
//! 从分子模拟轨迹计算结构函数：
//!
//! - 径向分布函数 g(r)（最小镜像、直方图归一化、多帧平均）
//! - g(r) ↔ S(q) 的 Fourier-Bessel 变换
//! - 倒空间直接求和的 S(q)（波矢网格、排序、分壳平均）
//! - 自中间散射函数 F_s(q, t)
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── models/     (帧、盒子、曲线数据模型)
//!   ├── parsers/    (LAMMPS dump、坐标表、曲线数据表)
//!   ├── structure/  (计算核心、导出与绘图)
//!   ├── batch/      (逐帧并行执行)
//!   ├── utils/      (终端输出、进度条)
//!   └── error.rs    (错误处理)
//! ```
//!
//! ## 示例
//! ```no_run
//! use fsmsc::models::FrameSource;
//! use fsmsc::parsers::lammps_dump::parse_dump_file;
//! use fsmsc::structure::rdf::compute_rdf;
//! use std::path::Path;
//!
//! fn main() -> fsmsc::error::Result<()> {
//!     let trajectory = parse_dump_file(Path::new("dump.lammpstrj"))?;
//!     let frame = trajectory.get_frame(0)?;
//!     let rdf = compute_rdf(&frame, 1, 5.0, 80)?;
//!     println!("{} bins", rdf.g.len());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod error;
pub mod models;
pub mod parsers;
pub mod structure;
pub mod utils;
