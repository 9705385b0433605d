//! # 两列曲线数据解析器
//!
//! 读取 g(r) 或 S(q) 数据表，作为 Fourier-Bessel 变换的输入。
//!
//! ## 支持格式
//! - CSV（`.csv`）：逗号分隔，首行若不是数值则视为表头
//! - XY（`.xy`, `.dat`, `.txt`）：空白分隔，`#` 开头的行为注释
//!
//! 默认读取前两列，也可以指定列号（从 0 开始）。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/` 使用
//! - 使用 `csv` 库读取 CSV 文件

use crate::error::{FsmscError, Result};

use std::fs;
use std::path::Path;

/// 读取前两列
pub fn parse_profile_file(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    parse_profile_columns(path, 0, 1)
}

/// 读取指定的两列
pub fn parse_profile_columns(
    path: &Path,
    x_column: usize,
    y_column: usize,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(true);

    let content = fs::read_to_string(path).map_err(|e| FsmscError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let name = path.display().to_string();

    let rows = if is_csv {
        csv_rows(&content, &name)?
    } else {
        whitespace_rows(&content)
    };

    select_columns(rows, x_column, y_column, &name)
}

/// CSV 内容拆分为字符串行
fn csv_rows(content: &str, name: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|r| {
            r.map(|rec| rec.iter().map(str::to_string).collect())
                .map_err(|e| FsmscError::ParseError {
                    format: "csv".to_string(),
                    path: name.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// 空白分隔内容拆分为字符串行
fn whitespace_rows(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.split_whitespace().map(str::to_string).collect())
        .collect()
}

fn select_columns(
    rows: Vec<Vec<String>>,
    x_column: usize,
    y_column: usize,
    name: &str,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let parse_err = |reason: String| FsmscError::ParseError {
        format: "profile".to_string(),
        path: name.to_string(),
        reason,
    };

    let mut x = Vec::with_capacity(rows.len());
    let mut y = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let (xs, ys) = match (row.get(x_column), row.get(y_column)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(parse_err(format!(
                    "row {} has {} columns, need columns {} and {}",
                    i + 1,
                    row.len(),
                    x_column,
                    y_column
                )))
            }
        };
        match (xs.parse::<f64>(), ys.parse::<f64>()) {
            (Ok(a), Ok(b)) => {
                x.push(a);
                y.push(b);
            }
            // 首行非数值：表头
            _ if i == 0 => continue,
            _ => {
                return Err(parse_err(format!(
                    "row {}: non-numeric values '{}', '{}'",
                    i + 1,
                    xs,
                    ys
                )))
            }
        }
    }

    if x.len() < 2 {
        return Err(parse_err(format!(
            "need at least two data rows, found {}",
            x.len()
        )));
    }

    Ok((x, y))
}
