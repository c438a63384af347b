use thiserror::Error;

/// 服务器启动/运行阶段的错误
///
/// 请求处理阶段的错误用 [`crate::utils::AppError`]；这里只覆盖
/// 启动序列（目录、数据库、监听端口）。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 启动序列的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
