//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("状态无效: {0}")]
    InvalidState(String),

    #[error("无可行解: {0}")]
    Infeasible(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}
