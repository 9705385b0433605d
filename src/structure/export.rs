//! # 曲线数据导出
//!
//! 导出 g(r)、S(q)、F_s(q,t) 到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 带表头的两列数据，数值按最短无损表示写出
//! - XY: `#` 注释头 + 制表符分隔的两列数据
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/profile.rs` 的 Profile 接口
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{FsmscError, Result};
use crate::models::Profile;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 导出为 CSV 格式
pub fn to_csv<P: Profile + ?Sized>(profile: &P, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let (x_name, y_name) = profile.column_names();
    wtr.write_record([x_name, y_name])?;

    for (x, y) in profile.points() {
        wtr.write_record(&[x.to_string(), y.to_string()])?;
    }

    wtr.flush().map_err(|e| FsmscError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY 格式
pub fn to_xy<P: Profile + ?Sized>(profile: &P, title: &str, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| FsmscError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    let (x_name, y_name) = profile.column_names();
    writeln!(out, "# {}", title).map_err(write_err)?;
    writeln!(out, "# Points: {}", profile.len()).map_err(write_err)?;
    writeln!(out, "# Columns: {}, {}", x_name, y_name).map_err(write_err)?;
    writeln!(out, "#").map_err(write_err)?;

    for (x, y) in profile.points() {
        writeln!(out, "{:.6}\t{:.6}", x, y).map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;
    Ok(())
}
