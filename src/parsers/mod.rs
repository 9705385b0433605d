//! # 解析器模块
//!
//! 提供轨迹文件和曲线数据表的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: lammps_dump, coords, profile

pub mod coords;
pub mod lammps_dump;
pub mod profile;

use crate::error::{FsmscError, Result};
use crate::models::{SimulationBox, Trajectory};
use std::path::Path;

pub use lammps_dump::CoordinateColumns;

/// 从文件路径推断格式并读取轨迹
///
/// 坐标表（`.csv`）没有盒子信息，需要 `box_length`，读出来是单帧轨迹。
/// `columns` 只影响 dump：同时有盒内和未折回坐标时取哪一组。
pub fn parse_trajectory_file(
    path: &Path,
    box_length: Option<f64>,
    columns: CoordinateColumns,
) -> Result<Trajectory> {
    if !path.exists() {
        return Err(FsmscError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => {
            let length = box_length.ok_or_else(|| {
                FsmscError::invalid(format!(
                    "{}: coordinate tables need --box-length",
                    path.display()
                ))
            })?;
            let frame = coords::parse_coords_file(path, SimulationBox::cubic(length))?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown");
            Ok(Trajectory::new(name, vec![frame]))
        }
        "dump" | "lammpstrj" => lammps_dump::parse_dump_file_with(path, columns),
        _ => {
            // 无扩展名的 dump 文件（如 dump.atom）
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with("dump") {
                    return lammps_dump::parse_dump_file_with(path, columns);
                }
            }
            Err(FsmscError::UnsupportedFormat(format!(
                "Cannot determine trajectory format for: {}",
                path.display()
            )))
        }
    }
}
