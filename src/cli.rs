//! src/cli.rs
use clap::Parser;
use std::path::PathBuf;

/// 一个扫描本地 Git 仓库并自动生成工作日报的 CLI 工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where to write the generated report. Overwritten on every run.
    #[arg(short, long, default_value = "report.md")]
    pub output: PathBuf,
}
