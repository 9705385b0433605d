//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及它们共用的范围解析和结果输出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `structure/`, `batch/`, `utils/`
//! - 子模块: real, reciprocal

pub mod real;
pub mod reciprocal;

use crate::cli::{Commands, OutputFormat};
use fsmsc::error::{FsmscError, Result};
use fsmsc::models::{FrameSource, Profile, Trajectory};
use fsmsc::parsers::{self, CoordinateColumns};
use fsmsc::structure::export;
use fsmsc::structure::plot::{self, PlotOptions, PlotStyle};
use fsmsc::utils::{output, progress};

use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Real(args) => real::execute(args),
        Commands::Reciprocal(args) => reciprocal::execute(args),
    }
}

/// 读取轨迹并报告帧数和各类型粒子数
pub fn load_trajectory(
    path: &Path,
    box_length: Option<f64>,
    columns: CoordinateColumns,
) -> Result<Trajectory> {
    let spinner = progress::spinner(&format!("Reading '{}'", path.display()));
    let trajectory = parsers::parse_trajectory_file(path, box_length, columns);
    spinner.finish_and_clear();
    let trajectory = trajectory?;

    output::print_success(&format!(
        "Loaded '{}' ({} frames)",
        trajectory.name,
        trajectory.frame_count()
    ));
    if let Some(first) = trajectory.frames.first() {
        let counts: Vec<String> = first
            .type_counts()
            .iter()
            .map(|(kind, count)| format!("{}×{}", count, kind))
            .collect();
        output::print_param("particles", counts.join(", "));
    }
    Ok(trajectory)
}

/// 从文件扩展名推断输出格式
pub fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => OutputFormat::Png,
        Some("svg") => OutputFormat::Svg,
        Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
        _ => OutputFormat::Csv,
    }
}

/// 解析 "min-max" 形式的数值范围
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = range.split('-').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(FsmscError::InvalidRange(range.to_string()));
    }

    let min: f64 = parts[0]
        .parse()
        .map_err(|_| FsmscError::InvalidRange(range.to_string()))?;
    let max: f64 = parts[1]
        .parse()
        .map_err(|_| FsmscError::InvalidRange(range.to_string()))?;

    if !(min.is_finite() && max.is_finite()) || max <= min {
        return Err(FsmscError::InvalidRange(format!(
            "{} (must be min < max)",
            range
        )));
    }

    Ok((min, max))
}

/// 解析帧范围，"a-b" 为闭区间，单个数字表示一帧
pub fn parse_frame_range(range: &str, frame_count: usize) -> Result<Vec<usize>> {
    let bad = || FsmscError::InvalidRange(format!("{} (expected 'first-last' frame indices)", range));

    let (first, last) = match range.split_once('-') {
        Some((a, b)) => (
            a.trim().parse::<usize>().map_err(|_| bad())?,
            b.trim().parse::<usize>().map_err(|_| bad())?,
        ),
        None => {
            let i = range.trim().parse::<usize>().map_err(|_| bad())?;
            (i, i)
        }
    };

    if last < first {
        return Err(bad());
    }
    if last >= frame_count {
        return Err(FsmscError::InvalidRange(format!(
            "{} (trajectory has {} frames)",
            range, frame_count
        )));
    }

    Ok((first..=last).collect())
}

/// 按格式写出数据表或图像
pub fn save_profile<P: Profile + ?Sized>(
    profile: &P,
    path: &Path,
    format: Option<OutputFormat>,
    title: &str,
    style: PlotStyle,
    baseline: Option<f64>,
) -> Result<()> {
    let format = format.unwrap_or_else(|| guess_format_from_extension(path));

    match format {
        OutputFormat::Csv => export::to_csv(profile, path)?,
        OutputFormat::Xy => export::to_xy(profile, title, path)?,
        OutputFormat::Png | OutputFormat::Svg => {
            let options = PlotOptions {
                title: title.to_string(),
                width: 1200,
                height: 800,
                style,
                baseline,
                use_svg: format == OutputFormat::Svg,
            };
            plot::generate_profile_plot(profile, path, &options)?;
        }
    }

    output::print_saved(&format!("{} ({:?})", title, format), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format_from_extension(Path::new("a.PNG")), OutputFormat::Png);
        assert_eq!(guess_format_from_extension(Path::new("a.svg")), OutputFormat::Svg);
        assert_eq!(guess_format_from_extension(Path::new("a.dat")), OutputFormat::Xy);
        assert_eq!(guess_format_from_extension(Path::new("rdf")), OutputFormat::Csv);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("1-8").unwrap(), (1.0, 8.0));
        assert_eq!(parse_range("0.1 - 5").unwrap(), (0.1, 5.0));
        assert!(parse_range("8-1").is_err());
        assert!(parse_range("1-2-3").is_err());
        assert!(parse_range("a-b").is_err());
    }

    #[test]
    fn test_parse_frame_range() {
        assert_eq!(parse_frame_range("0-0", 1).unwrap(), vec![0]);
        assert_eq!(parse_frame_range("2-4", 10).unwrap(), vec![2, 3, 4]);
        assert_eq!(parse_frame_range("7", 10).unwrap(), vec![7]);
        assert!(parse_frame_range("0-10", 10).is_err());
        assert!(parse_frame_range("5-2", 10).is_err());
        assert!(parse_frame_range("x", 10).is_err());
    }
}
