//! # reciprocal 子命令 CLI 定义
//!
//! 倒空间分析入口：
//! - `sq`: 直接格点求和计算 S(q)
//! - `sq2rdf`: 读取 S(q) 数据表，变换回 g(r)
//! - `fsq`: 自中间散射函数 F_s(q,t)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/reciprocal.rs`

use super::OutputFormat;

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// reciprocal 主命令参数
#[derive(Args, Debug)]
pub struct ReciprocalArgs {
    #[command(subcommand)]
    pub command: ReciprocalCommands,
}

/// reciprocal 子命令
#[derive(Subcommand, Debug)]
pub enum ReciprocalCommands {
    /// Structure factor by direct summation over reciprocal lattice vectors
    Sq(SqArgs),

    /// Transform an S(q) table back to g(r)
    Sq2rdf(Sq2rdfArgs),

    /// Self-intermediate scattering function F_s(q,t) of a trajectory
    Fsq(FsqArgs),
}

/// sq 子命令参数
#[derive(Args, Debug)]
pub struct SqArgs {
    /// Trajectory (LAMMPS dump) or x,y,z,type CSV snapshot
    pub input: PathBuf,

    /// Particle type to analyze
    #[arg(short = 't', long = "type", default_value_t = 1)]
    pub kind: i32,

    /// Wave-vector indices run over 0..nmax on each axis (one octant, q = 0 included)
    #[arg(long, default_value_t = 10)]
    pub nmax: usize,

    /// Frame index to analyze
    #[arg(long, default_value_t = 0)]
    pub frame: usize,

    /// Cubic box length, required for CSV coordinate input
    #[arg(long)]
    pub box_length: Option<f64>,

    /// Sort the output by |q|
    #[arg(long, default_value_t = false)]
    pub sorted: bool,

    /// Average into this many |q| shells instead of listing every wave vector
    #[arg(long)]
    pub shells: Option<usize>,

    /// Output file
    #[arg(short, long, default_value = "sq_direct.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// sq2rdf 子命令参数
#[derive(Args, Debug)]
pub struct Sq2rdfArgs {
    /// S(q) table (two columns q, S; CSV or whitespace-separated)
    pub input: PathBuf,

    /// Number density of the analyzed species
    #[arg(long)]
    pub density: f64,

    /// r range (e.g., "0.1-5")
    #[arg(short = 'r', long, default_value = "0.1-5")]
    pub r_range: String,

    /// Number of r points
    #[arg(long, default_value_t = 1000)]
    pub points: usize,

    /// Output file
    #[arg(short, long, default_value = "gr.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// fsq 子命令参数
#[derive(Args, Debug)]
pub struct FsqArgs {
    /// Trajectory with unwrapped coordinates (LAMMPS dump, xu yu zu preferred)
    pub input: PathBuf,

    /// Particle type to analyze
    #[arg(short = 't', long = "type", default_value_t = 1)]
    pub kind: i32,

    /// Wave-vector index: q = 2π/L · n on each axis
    #[arg(short, long, default_value_t = 1)]
    pub n: usize,

    /// Time per simulation step
    #[arg(long, default_value_t = 1.0)]
    pub time_step: f64,

    /// Output file
    #[arg(short, long, default_value = "fsq.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}
