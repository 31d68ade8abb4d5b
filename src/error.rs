use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
///
/// 单只股票管线里出现的错误都会收敛到这里，
/// 由批量驱动在股票粒度上捕获并记录。
#[derive(Debug, Error)]
pub enum AppError {
    /// 公告编号查询错误
    #[error("查询错误: {0}")]
    Resolve(#[from] ResolveError),
    /// 持股比例提取错误
    #[error("提取错误: {0}")]
    Extract(#[from] ExtractError),
    /// 网络层错误（超时、连接失败等），由 reqwest 透出
    #[error("网络错误: {0}")]
    Fetch(#[from] reqwest::Error),
    /// 文件操作错误
    #[error("文件错误 ({path:?}): {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON 解析失败 ({path:?}): {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// 正则表达式编译失败
    #[error("正则错误: {0}")]
    Regex(#[from] regex::Error),
}

/// 公告编号查询错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 搜索结果里没有出现公告链接
    #[error("没有找到 '{stock_code}' 的搜索结果")]
    NoResult { stock_code: String },
    /// 搜索结果的股票代码与查询不一致（结果页漂移）
    #[error("'{expected}' 的搜索结果不匹配，实际返回 '{actual}'")]
    Mismatch { expected: String, actual: String },
}

/// 持股比例提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 公告里没有股东表标记
    #[error("公告中没有出现 '{marker}'")]
    MarkerNotFound { marker: &'static str },
    /// 递减数字不足 10 个，不是一张完整的股东表
    #[error("递减数字不足 10 个，只找到 {found} 个")]
    InsufficientData { found: usize },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 创建文件操作错误
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}
