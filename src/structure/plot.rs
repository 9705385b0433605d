//! # 曲线图表生成
//!
//! 使用 `plotters` 库绘制 g(r)、S(q)、F_s(q,t)。
//!
//! ## 功能
//! - 连续曲线（g(r)、变换得到的 S(q)、F_s）
//! - 散点（直接计算的 S(q)，同一 |q| 上有多个点）
//! - 可选水平参考线（g = 1 或 S = 1）
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/profile.rs` 的 Profile 接口
//! - 使用 `plotters` 渲染图表

use crate::error::{FsmscError, Result};
use crate::models::Profile;

use plotters::prelude::*;
use std::path::Path;

/// 绘图样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStyle {
    Line,
    Scatter,
}

/// 图表参数
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub style: PlotStyle,
    /// 水平参考线
    pub baseline: Option<f64>,
    pub use_svg: bool,
}

/// 生成曲线图
pub fn generate_profile_plot<P: Profile + ?Sized>(
    profile: &P,
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_profile_chart(&root, profile, options)?;
        root.present()
            .map_err(|e| FsmscError::Other(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_profile_chart(&root, profile, options)?;
        root.present()
            .map_err(|e| FsmscError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 数据范围，留 5% 边距；只统计有限值
fn axis_range(values: impl Iterator<Item = f64>, include: Option<f64>) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if let Some(v) = include {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < 1e-12 {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad, hi + pad)
}

/// 绘制图表的核心逻辑
fn draw_profile_chart<DB: DrawingBackend, P: Profile + ?Sized>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    profile: &P,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| FsmscError::Other(format!("{:?}", e)))?;

    let points: Vec<(f64, f64)> = profile
        .points()
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let (x_min, x_max) = axis_range(points.iter().map(|p| p.0), None);
    let (y_min, y_max) = axis_range(points.iter().map(|p| p.1), options.baseline);
    let (x_desc, y_desc) = profile.axis_labels();

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| FsmscError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| FsmscError::Other(format!("{:?}", e)))?;

    if let Some(level) = options.baseline {
        chart
            .draw_series(LineSeries::new(
                vec![(x_min, level), (x_max, level)],
                BLACK.mix(0.4).stroke_width(1),
            ))
            .map_err(|e| FsmscError::Other(format!("{:?}", e)))?;
    }

    let color = RGBColor(0, 102, 204);
    match options.style {
        PlotStyle::Line => {
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(|e| FsmscError::Other(format!("{:?}", e)))?;
        }
        PlotStyle::Scatter => {
            chart
                .draw_series(
                    points
                        .into_iter()
                        .map(|(x, y)| Circle::new((x, y), 2, color.mix(0.4).filled())),
                )
                .map_err(|e| FsmscError::Other(format!("{:?}", e)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_padding() {
        let (lo, hi) = axis_range(vec![0.0, 10.0].into_iter(), None);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_axis_range_degenerate() {
        assert_eq!(axis_range(vec![f64::NAN].into_iter(), None), (0.0, 1.0));
        assert_eq!(axis_range(vec![2.0, 2.0].into_iter(), None), (1.5, 2.5));

        let (lo, _) = axis_range(vec![2.0, 3.0].into_iter(), Some(1.0));
        assert!(lo < 1.0);
    }
}
