//! # 统一错误处理模块
//!
//! 定义 fsmsc 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - `InvalidInput`: 参数不合法（网格参数、截断半径超过半盒长、空粒子集合等）
//! - `NumericDegenerate`: 计算结果非有限值（例如 q = 0 处的 S(q)）
//! - I/O 与格式错误：读写文件、解析轨迹或数据表
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// fsmsc 统一错误类型
#[derive(Error, Debug)]
pub enum FsmscError {
    // ─────────────────────────────────────────────────────────────
    // 计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Numerically degenerate result: {0}")]
    NumericDegenerate(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl FsmscError {
    /// 构造 `InvalidInput` 错误
    pub fn invalid(msg: impl Into<String>) -> Self {
        FsmscError::InvalidInput(msg.into())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, FsmscError>;
