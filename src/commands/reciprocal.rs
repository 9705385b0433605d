//! # reciprocal 子命令实现
//!
//! - `sq`: 单帧直接求和 S(q)，可按 |q| 排序或分壳平均
//! - `sq2rdf`: 读取 S(q) 数据表，变换回 g(r)
//! - `fsq`: 全轨迹的自中间散射函数 F_s(q,t)
//!
//! ## 依赖关系
//! - 使用 `cli/reciprocal.rs` 定义的参数
//! - 使用 `structure/` 模块计算
//! - 使用 `parsers/` 读取轨迹和数据表

use super::real::print_peak_table;
use super::{load_trajectory, parse_range, save_profile};
use crate::cli::reciprocal::{FsqArgs, ReciprocalArgs, ReciprocalCommands, Sq2rdfArgs, SqArgs};
use fsmsc::error::{FsmscError, Result};
use fsmsc::models::{FrameSource, ParticleSet};
use fsmsc::parsers::{self, CoordinateColumns};
use fsmsc::structure::plot::PlotStyle;
use fsmsc::structure::{direct, intermediate, lattice, transform};
use fsmsc::utils::output;

/// 执行 reciprocal 子命令
pub fn execute(args: ReciprocalArgs) -> Result<()> {
    match args.command {
        ReciprocalCommands::Sq(args) => execute_sq(args),
        ReciprocalCommands::Sq2rdf(args) => execute_sq2rdf(args),
        ReciprocalCommands::Fsq(args) => execute_fsq(args),
    }
}

fn execute_sq(args: SqArgs) -> Result<()> {
    output::print_header("Structure Factor S(q) by Direct Summation");

    let trajectory = load_trajectory(&args.input, args.box_length, CoordinateColumns::Wrapped)?;
    let frame = trajectory.get_frame(args.frame)?;
    let selection = frame.select(args.kind);
    if selection.is_empty() {
        return Err(FsmscError::invalid(format!(
            "no particles of type {} in frame {}",
            args.kind, args.frame
        )));
    }

    output::print_param("type", args.kind);
    output::print_param("selected", selection.count());
    output::print_param("nmax", args.nmax);
    let count = lattice::grid_size(args.nmax)?;
    output::print_param("wave vectors", count);
    output::print_warning("Wave-vector indices start at 0; the q = 0 entry equals N");

    let sf = direct::structure_factor(args.nmax, &selection)?;
    output::print_success(&format!("Evaluated S(q) at {} wave vectors", sf.q.len()));

    if let Some(num_shells) = args.shells {
        let q_max = sf.q.iter().copied().fold(0.0_f64, f64::max);
        let averaged = sf.shell_average(num_shells, q_max)?;
        output::print_info(&format!(
            "Averaged into {} non-empty |q| shells up to {:.4}",
            averaged.q.len(),
            q_max
        ));
        save_profile(
            &averaged,
            &args.output,
            args.format,
            &format!("S(q) type {} (shell average)", args.kind),
            PlotStyle::Line,
            Some(1.0),
        )?;
        print_peak_table("S(q)", &averaged.q, &averaged.s, 5);
    } else {
        let view = if args.sorted {
            sf.sorted_by_magnitude()
        } else {
            sf
        };
        save_profile(
            &view,
            &args.output,
            args.format,
            &format!("S(q) type {}", args.kind),
            PlotStyle::Scatter,
            Some(1.0),
        )?;
    }

    Ok(())
}

fn execute_sq2rdf(args: Sq2rdfArgs) -> Result<()> {
    output::print_header("Pair Correlation from S(q)");

    let (q, s) = parsers::profile::parse_profile_file(&args.input)?;
    output::print_success(&format!(
        "Loaded S(q) from '{}' ({} points)",
        args.input.display(),
        q.len()
    ));

    let (r_min, r_max) = parse_range(&args.r_range)?;
    output::print_param("density", args.density);
    output::print_param("r range", format!("{} - {}", r_min, r_max));
    output::print_param("points", args.points);

    let gr = transform::structure_factor_to_rdf(&q, &s, args.density, r_min, r_max, args.points)?;

    save_profile(
        &gr,
        &args.output,
        args.format,
        "g(r) from S(q)",
        PlotStyle::Line,
        Some(1.0),
    )?;

    print_peak_table("g(r)", &gr.r, &gr.g, 5);
    Ok(())
}

fn execute_fsq(args: FsqArgs) -> Result<()> {
    output::print_header("Self-Intermediate Scattering Function F_s(q, t)");

    let trajectory = load_trajectory(&args.input, None, CoordinateColumns::Unwrapped)?;
    if trajectory.frame_count() < 2 {
        output::print_warning("Trajectory has a single frame; F_s(q, t) is trivially 1");
    }

    output::print_param("type", args.kind);
    output::print_param("n", args.n);
    output::print_param("time step", args.time_step);

    let fs = intermediate::self_intermediate_scattering(
        &trajectory.frames,
        args.kind,
        args.n,
        args.time_step,
    )?;

    let [qx, qy, qz] = fs.wave_vector;
    output::print_info(&format!("q = ({:.4}, {:.4}, {:.4})", qx, qy, qz));
    if let (Some(t), Some(v)) = (fs.time.last(), fs.fs.last()) {
        output::print_info(&format!("F_s(q, t = {}) = {:.6}", t, v));
    }

    save_profile(
        &fs,
        &args.output,
        args.format,
        &format!("F_s(q, t) type {}", args.kind),
        PlotStyle::Line,
        None,
    )?;

    Ok(())
}
