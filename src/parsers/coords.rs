//! # 坐标表解析器
//!
//! 解析无表头的 `x,y,z,type` CSV 坐标表（单帧快照），盒子尺寸由调用方给出。
//! 类型列允许写成浮点数（如 `2.0`），读入后取整。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `csv` + `serde` 按位置反序列化记录

use crate::error::{FsmscError, Result};
use crate::models::{Frame, SimulationBox};

use serde::Deserialize;
use std::path::Path;

/// 单行坐标记录
#[derive(Debug, Deserialize)]
struct CoordRecord {
    x: f64,
    y: f64,
    z: f64,
    kind: f64,
}

/// 解析坐标表文件
pub fn parse_coords_file(path: &Path, simulation_box: SimulationBox) -> Result<Frame> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| FsmscError::ParseError {
            format: "coordinate table".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    parse_coords_reader(reader, simulation_box, &path.display().to_string())
}

/// 从字符串内容解析坐标表
pub fn parse_coords_content(content: &str, simulation_box: SimulationBox) -> Result<Frame> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    parse_coords_reader(reader, simulation_box, "<memory>")
}

fn parse_coords_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    simulation_box: SimulationBox,
    name: &str,
) -> Result<Frame> {
    let mut positions = Vec::new();
    let mut types = Vec::new();

    for (row, record) in reader.deserialize::<CoordRecord>().enumerate() {
        let record = record.map_err(|e| FsmscError::ParseError {
            format: "coordinate table".to_string(),
            path: name.to_string(),
            reason: format!("row {}: {}", row + 1, e),
        })?;
        positions.push([record.x, record.y, record.z]);
        types.push(record.kind.round() as i32);
    }

    if positions.is_empty() {
        return Err(FsmscError::ParseError {
            format: "coordinate table".to_string(),
            path: name.to_string(),
            reason: "no coordinate rows".to_string(),
        });
    }

    Frame::new(0, positions, types, simulation_box)
}
