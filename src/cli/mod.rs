//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `real`: 实空间分析（嵌套子命令）
//!   - `rdf`: 径向分布函数 g(r)
//!   - `rdf2sq`: g(r) → S(q) 变换
//! - `reciprocal`: 倒空间分析（嵌套子命令）
//!   - `sq`: 直接格点求和 S(q)
//!   - `sq2rdf`: S(q) → g(r) 变换
//!   - `fsq`: 自中间散射函数 F_s(q,t)
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: real, reciprocal

pub mod real;
pub mod reciprocal;

use clap::{Parser, Subcommand, ValueEnum};

/// fsmsc - 模拟流体与软物质的结构表征工具
#[derive(Parser)]
#[command(name = "fsmsc")]
#[command(version)]
#[command(
    about = "Structure characterization of simulated fluids and soft materials",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Real-space analysis: g(r) and its transform to S(q)
    Real(real::RealArgs),

    /// Reciprocal-space analysis: direct S(q), transform to g(r), F_s(q,t)
    Reciprocal(reciprocal::ReciprocalArgs),
}

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// CSV data file with header
    Csv,
    /// XY data file with '#' comment header
    Xy,
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}
