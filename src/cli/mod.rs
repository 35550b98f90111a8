//! 命令行界面模块

mod printer;

pub use printer::Printer;
