//! # 美化输出工具
//!
//! 提供统一的终端输出样式。库层模块不打印，只有 `commands/` 和 `main.rs` 使用。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::path::Path;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印参数：`  key : value`
pub fn print_param(key: &str, value: impl std::fmt::Display) {
    println!("    {:<14}{} {}", key.dimmed(), ":".dimmed(), value);
}

/// 打印输出文件
pub fn print_saved(what: &str, path: &Path) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        what,
        "->".cyan(),
        path.display()
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
