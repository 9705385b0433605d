//! # real 子命令 CLI 定义
//!
//! 实空间分析入口：
//! - `rdf`: 从轨迹计算 g(r)，可对多帧取平均
//! - `rdf2sq`: 读取 g(r) 数据表，Fourier-Bessel 变换到 S(q)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/real.rs`

use super::OutputFormat;

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// real 主命令参数
#[derive(Args, Debug)]
pub struct RealArgs {
    #[command(subcommand)]
    pub command: RealCommands,
}

/// real 子命令
#[derive(Subcommand, Debug)]
pub enum RealCommands {
    /// Radial distribution function g(r) from a trajectory
    Rdf(RdfArgs),

    /// Transform a g(r) table to S(q)
    Rdf2sq(Rdf2sqArgs),
}

/// rdf 子命令参数
#[derive(Args, Debug)]
pub struct RdfArgs {
    /// Trajectory: LAMMPS dump (.dump, .lammpstrj, dump.*) or x,y,z,type CSV
    pub input: PathBuf,

    /// Particle type to analyze
    #[arg(short = 't', long = "type", default_value_t = 1)]
    pub kind: i32,

    /// Cutoff radius (must not exceed half the shortest box length)
    #[arg(long, default_value_t = 5.0)]
    pub cutoff: f64,

    /// Number of histogram bins
    #[arg(long, default_value_t = 80)]
    pub bins: usize,

    /// Inclusive frame range to average over (e.g., "0-9"), or a single index
    #[arg(long, default_value = "0-0")]
    pub frames: String,

    /// Cubic box length, required for CSV coordinate input
    #[arg(long)]
    pub box_length: Option<f64>,

    /// Output file
    #[arg(short, long, default_value = "rdf.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "FSMSC_JOBS")]
    pub jobs: usize,
}

/// rdf2sq 子命令参数
#[derive(Args, Debug)]
pub struct Rdf2sqArgs {
    /// g(r) table (two columns r, g; CSV or whitespace-separated)
    pub input: PathBuf,

    /// Number density of the analyzed species
    #[arg(long)]
    pub density: f64,

    /// q range (e.g., "1-8")
    #[arg(short = 'q', long, default_value = "1-8")]
    pub q_range: String,

    /// Number of q points
    #[arg(long, default_value_t = 1000)]
    pub points: usize,

    /// Output file
    #[arg(short, long, default_value = "sq.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}
