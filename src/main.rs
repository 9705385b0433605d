//! # fsmsc 命令行入口
//!
//! ## 子命令
//! - `real` - 实空间分析
//!   - `rdf` - 径向分布函数 g(r)
//!   - `rdf2sq` - g(r) → S(q)
//! - `reciprocal` - 倒空间分析
//!   - `sq` - 直接求和 S(q)
//!   - `sq2rdf` - S(q) → g(r)
//!   - `fsq` - 自中间散射函数 F_s(q, t)
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   └── commands/   (命令执行逻辑)
//!         └── fsmsc (库：parsers, structure, batch, utils)
//! ```

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use fsmsc::utils::output;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
