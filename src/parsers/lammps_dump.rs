//! # LAMMPS 文本 dump 轨迹解析器
//!
//! 解析 LAMMPS `dump atom/custom` 文本轨迹，每帧转换为一个 `Frame`。
//!
//! ## 格式说明
//! ```text
//! ITEM: TIMESTEP
//! 1000
//! ITEM: NUMBER OF ATOMS
//! 3
//! ITEM: BOX BOUNDS pp pp pp
//! 0.0 10.0
//! 0.0 10.0
//! 0.0 10.0
//! ITEM: ATOMS id type x y z
//! 1 1 0.5 0.5 0.5
//! ...
//! ```
//!
//! - 坐标列按表头查找：`x y z`、`xu yu zu`（未折回）、`xs ys zs`（分数坐标）、
//!   `xsu ysu zsu`（未折回分数坐标）；同时存在时由 `CoordinateColumns` 决定优先顺序
//! - 原子按 `id` 排序，保证各帧粒子顺序一致；没有 `id` 列时保持文件顺序
//! - 没有 `type` 列时所有粒子类型为 1
//! - 坐标平移到以盒子下界为原点
//! - 三斜盒子（BOX BOUNDS 含 xy xz yz）不支持
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/frame.rs`

use crate::error::{FsmscError, Result};
use crate::models::{Frame, SimulationBox, Trajectory};

use std::fs;
use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;

/// 多组坐标列同时存在时优先使用哪一组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateColumns {
    /// 盒内坐标优先：x → xs → xu → xsu（g(r)、直接 S(q)）
    #[default]
    Wrapped,
    /// 未折回坐标优先：xu → xsu → x → xs（F_s(q,t) 需要真实位移）
    Unwrapped,
}

impl CoordinateColumns {
    /// (列名, 是否为分数坐标)，按优先顺序
    fn candidates(self) -> [([&'static str; 3], bool); 4] {
        const X: ([&str; 3], bool) = (["x", "y", "z"], false);
        const XS: ([&str; 3], bool) = (["xs", "ys", "zs"], true);
        const XU: ([&str; 3], bool) = (["xu", "yu", "zu"], false);
        const XSU: ([&str; 3], bool) = (["xsu", "ysu", "zsu"], true);
        match self {
            CoordinateColumns::Wrapped => [X, XS, XU, XSU],
            CoordinateColumns::Unwrapped => [XU, XSU, X, XS],
        }
    }
}

/// 解析 LAMMPS dump 文件，优先使用盒内坐标
pub fn parse_dump_file(path: &Path) -> Result<Trajectory> {
    parse_dump_file_with(path, CoordinateColumns::Wrapped)
}

/// 解析 LAMMPS dump 文件，指定坐标列优先顺序
pub fn parse_dump_file_with(path: &Path, columns: CoordinateColumns) -> Result<Trajectory> {
    let content = fs::read_to_string(path).map_err(|e| FsmscError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_dump_content_with(
        &content,
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
        columns,
    )
}

/// 从字符串内容解析 LAMMPS dump
pub fn parse_dump_content(content: &str, name: &str) -> Result<Trajectory> {
    parse_dump_content_with(content, name, CoordinateColumns::Wrapped)
}

/// 从字符串内容解析 LAMMPS dump，指定坐标列优先顺序
pub fn parse_dump_content_with(
    content: &str,
    name: &str,
    columns: CoordinateColumns,
) -> Result<Trajectory> {
    let mut reader = DumpReader {
        lines: content.lines().enumerate(),
        name,
        columns,
    };
    let mut frames = Vec::new();

    while let Some((line_no, line)) = reader.next_nonblank() {
        if !line.starts_with("ITEM: TIMESTEP") {
            return Err(reader.error(line_no, "expected 'ITEM: TIMESTEP'"));
        }
        let frame = reader.read_frame(frames.len())?;
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(reader.error(0, "no frames found"));
    }

    Ok(Trajectory::new(name, frames))
}

/// 按行读取 dump 内容
struct DumpReader<'a> {
    lines: Enumerate<Lines<'a>>,
    name: &'a str,
    columns: CoordinateColumns,
}

impl<'a> DumpReader<'a> {
    fn error(&self, line_no: usize, reason: impl Into<String>) -> FsmscError {
        let reason = reason.into();
        FsmscError::ParseError {
            format: "lammps dump".to_string(),
            path: self.name.to_string(),
            reason: if line_no > 0 {
                format!("line {}: {}", line_no + 1, reason)
            } else {
                reason
            },
        }
    }

    fn next_nonblank(&mut self) -> Option<(usize, &'a str)> {
        self.lines
            .by_ref()
            .map(|(i, l)| (i, l.trim()))
            .find(|(_, l)| !l.is_empty())
    }

    fn expect_line(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.next_nonblank().ok_or_else(|| {
            self.error(0, format!("unexpected end of file while reading {}", what))
        })
    }

    fn expect_item(&mut self, item: &str) -> Result<(usize, &'a str)> {
        let (line_no, line) = self.expect_line(item)?;
        if !line.starts_with(item) {
            return Err(self.error(line_no, format!("expected '{}', found '{}'", item, line)));
        }
        Ok((line_no, line))
    }

    fn expect_value<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let (line_no, line) = self.expect_line(what)?;
        line.parse()
            .map_err(|_| self.error(line_no, format!("invalid {}: '{}'", what, line)))
    }

    /// 读取 `ITEM: TIMESTEP` 之后的一帧
    fn read_frame(&mut self, index: usize) -> Result<Frame> {
        let timestep: u64 = self.expect_value("timestep")?;

        self.expect_item("ITEM: NUMBER OF ATOMS")?;
        let num_atoms: usize = self.expect_value("number of atoms")?;

        let (line_no, header) = self.expect_item("ITEM: BOX BOUNDS")?;
        let flags: Vec<&str> = header["ITEM: BOX BOUNDS".len()..]
            .split_whitespace()
            .collect();
        if flags.iter().any(|f| matches!(*f, "xy" | "xz" | "yz")) {
            return Err(FsmscError::UnsupportedFormat(format!(
                "{} line {}: triclinic boxes are not supported",
                self.name,
                line_no + 1
            )));
        }

        let mut lower = [0.0; 3];
        let mut lengths = [0.0; 3];
        for axis in 0..3 {
            let (line_no, line) = self.expect_line("box bounds")?;
            let bounds: Vec<f64> = line
                .split_whitespace()
                .take(2)
                .filter_map(|s| s.parse().ok())
                .collect();
            if bounds.len() < 2 {
                return Err(self.error(line_no, format!("invalid box bounds '{}'", line)));
            }
            lower[axis] = bounds[0];
            lengths[axis] = bounds[1] - bounds[0];
        }

        let (line_no, header) = self.expect_item("ITEM: ATOMS")?;
        let columns: Vec<&str> = header["ITEM: ATOMS".len()..].split_whitespace().collect();
        let layout = ColumnLayout::from_header(&columns, self.columns)
            .map_err(|reason| self.error(line_no, reason))?;

        let mut records: Vec<(i64, i32, [f64; 3])> = Vec::with_capacity(num_atoms);
        for row in 0..num_atoms {
            let (line_no, line) = self.expect_line("atom records")?;
            let record = layout
                .parse_row(line, row, lower, lengths)
                .map_err(|reason| self.error(line_no, reason))?;
            records.push(record);
        }
        records.sort_by_key(|r| r.0);

        let positions = records.iter().map(|r| r.2).collect();
        let types = records.iter().map(|r| r.1).collect();

        Frame::new(index, positions, types, SimulationBox::new(lengths))
            .map(|f| f.with_timestep(timestep))
    }
}

/// ATOMS 表头中各列的位置
#[derive(Debug)]
struct ColumnLayout {
    id: Option<usize>,
    kind: Option<usize>,
    coords: [usize; 3],
    scaled: bool,
}

impl ColumnLayout {
    fn from_header(
        columns: &[&str],
        preference: CoordinateColumns,
    ) -> std::result::Result<Self, String> {
        let find = |name: &str| columns.iter().position(|c| *c == name);

        for (names, scaled) in preference.candidates() {
            if let (Some(x), Some(y), Some(z)) = (find(names[0]), find(names[1]), find(names[2])) {
                return Ok(ColumnLayout {
                    id: find("id"),
                    kind: find("type"),
                    coords: [x, y, z],
                    scaled,
                });
            }
        }

        Err(format!(
            "no coordinate columns (x y z, xu yu zu, xs ys zs or xsu ysu zsu) in '{}'",
            columns.join(" ")
        ))
    }

    fn parse_row(
        &self,
        line: &str,
        row: usize,
        lower: [f64; 3],
        lengths: [f64; 3],
    ) -> std::result::Result<(i64, i32, [f64; 3]), String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let field = |i: usize| {
            fields
                .get(i)
                .copied()
                .ok_or_else(|| format!("atom record has only {} columns", fields.len()))
        };

        let id = match self.id {
            Some(i) => field(i)?
                .parse::<i64>()
                .map_err(|_| format!("invalid atom id '{}'", fields[i]))?,
            None => row as i64,
        };
        let kind = match self.kind {
            Some(i) => field(i)?
                .parse::<i32>()
                .map_err(|_| format!("invalid atom type '{}'", fields[i]))?,
            None => 1,
        };

        let mut position = [0.0; 3];
        for axis in 0..3 {
            let raw = field(self.coords[axis])?;
            let value: f64 = raw
                .parse()
                .map_err(|_| format!("invalid coordinate '{}'", raw))?;
            position[axis] = if self.scaled {
                value * lengths[axis]
            } else {
                value - lower[axis]
            };
        }

        Ok((id, kind, position))
    }
}
