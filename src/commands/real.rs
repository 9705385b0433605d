//! # real 子命令实现
//!
//! - `rdf`: 读取轨迹，逐帧并行计算 g(r)，多帧取平均后输出
//! - `rdf2sq`: 读取 g(r) 数据表，变换到 S(q)
//!
//! ## 依赖关系
//! - 使用 `cli/real.rs` 定义的参数
//! - 使用 `batch/` 模块逐帧并行
//! - 使用 `structure/` 模块计算
//! - 使用 `parsers/` 读取轨迹和数据表

use super::{load_trajectory, parse_frame_range, parse_range, save_profile};
use crate::cli::real::{Rdf2sqArgs, RdfArgs, RealArgs, RealCommands};
use fsmsc::batch::BatchRunner;
use fsmsc::error::{FsmscError, Result};
use fsmsc::models::FrameSource;
use fsmsc::parsers::{self, CoordinateColumns};
use fsmsc::structure::plot::PlotStyle;
use fsmsc::structure::{rdf, transform};
use fsmsc::utils::output;

use tabled::{Table, Tabled};

/// 执行 real 子命令
pub fn execute(args: RealArgs) -> Result<()> {
    match args.command {
        RealCommands::Rdf(args) => execute_rdf(args),
        RealCommands::Rdf2sq(args) => execute_rdf2sq(args),
    }
}

fn execute_rdf(args: RdfArgs) -> Result<()> {
    output::print_header("Radial Distribution Function g(r)");

    let trajectory = load_trajectory(&args.input, args.box_length, CoordinateColumns::Wrapped)?;
    let indices = parse_frame_range(&args.frames, trajectory.frame_count())?;

    output::print_param("type", args.kind);
    output::print_param("cutoff", args.cutoff);
    output::print_param("bins", args.bins);
    output::print_param("frames", format!("{} ({} frames)", args.frames, indices.len()));

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} threads", runner.jobs()));

    let result = runner.run(&indices, |i| {
        let frame = trajectory.get_frame(i)?;
        rdf::compute_rdf(&frame, args.kind, args.cutoff, args.bins)
    })?;

    if !result.failures.is_empty() {
        output::print_separator();
        output::print_warning(&format!(
            "{} of {} frames failed and were skipped:",
            result.failed(),
            result.total()
        ));
        for (index, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  frame {}: {}", index, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    let rdfs = result.into_values();
    if rdfs.is_empty() {
        return Err(FsmscError::Other(
            "no frame produced a g(r); nothing to write".to_string(),
        ));
    }

    let averaged = rdf::average_rdfs(&rdfs)?;
    output::print_success(&format!(
        "Averaged g(r) over {} frames ({} particles, ρ = {:.6})",
        rdfs.len(),
        averaged.particle_count,
        averaged.density
    ));

    save_profile(
        &averaged,
        &args.output,
        args.format,
        &format!("g(r) type {}", args.kind),
        PlotStyle::Line,
        Some(1.0),
    )?;

    print_peak_table("g(r)", &averaged.r, &averaged.g, 5);
    Ok(())
}

fn execute_rdf2sq(args: Rdf2sqArgs) -> Result<()> {
    output::print_header("Structure Factor from g(r)");

    let (r, g) = parsers::profile::parse_profile_file(&args.input)?;
    output::print_success(&format!(
        "Loaded g(r) from '{}' ({} points)",
        args.input.display(),
        r.len()
    ));

    let (q_min, q_max) = parse_range(&args.q_range)?;
    output::print_param("density", args.density);
    output::print_param("q range", format!("{} - {}", q_min, q_max));
    output::print_param("points", args.points);

    let sq = transform::rdf_to_structure_factor(&r, &g, args.density, q_min, q_max, args.points)?;

    save_profile(
        &sq,
        &args.output,
        args.format,
        "S(q) from g(r)",
        PlotStyle::Line,
        Some(1.0),
    )?;

    print_peak_table("S(q)", &sq.q, &sq.s, 5);
    Ok(())
}

/// 局部极大值，按高度降序
pub(crate) fn find_peaks(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    let mut peaks: Vec<(f64, f64)> = (1..y.len().saturating_sub(1))
        .filter(|&i| y[i] > y[i - 1] && y[i] >= y[i + 1] && y[i].is_finite())
        .map(|i| (x[i], y[i]))
        .collect();
    peaks.sort_by(|a, b| b.1.total_cmp(&a.1));
    peaks
}

/// 打印主要峰位表格
pub(crate) fn print_peak_table(name: &str, x: &[f64], y: &[f64], count: usize) {
    #[derive(Tabled)]
    struct PeakRow {
        #[tabled(rename = "#")]
        rank: usize,
        #[tabled(rename = "Position")]
        position: String,
        #[tabled(rename = "Height")]
        height: String,
    }

    let rows: Vec<PeakRow> = find_peaks(x, y)
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, (px, py))| PeakRow {
            rank: i + 1,
            position: format!("{:.4}", px),
            height: format!("{:.4}", py),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Top {} {} Peaks", rows.len(), name));
        let table = Table::new(&rows);
        println!("{}", table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_peaks() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [0.0, 2.0, 1.0, 1.5, 3.0, 1.0, 4.0];
        let peaks = find_peaks(&x, &y);
        // 端点不计入
        assert_eq!(peaks, vec![(4.0, 3.0), (1.0, 2.0)]);
        assert!(find_peaks(&[0.0], &[1.0]).is_empty());
    }
}
