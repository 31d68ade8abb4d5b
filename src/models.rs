//! 数据模型与输入加载
//!
//! 启动时从 JSON 文件读入待处理列表；输入文件缺失或损坏
//! 是唯一的致命启动错误，其余错误都停留在单只股票粒度。

use std::fmt;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 一份公告的定位信息：股票代码 + 公告编号
///
/// 由 `resolver` 查出，或直接从预解析列表加载；创建后不再修改。
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StockReference {
    /// 股票代码，如 "600000"
    pub stock_code: String,
    /// 公告在站内的编号
    pub bulletin_id: String,
}

impl fmt::Display for StockReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stock_code)
    }
}

/// 读取股票代码列表（JSON 字符串数组）
pub async fn load_stock_codes(path: &str) -> AppResult<Vec<String>> {
    let text = read_input(path).await?;
    serde_json::from_str(&text).map_err(|e| AppError::JsonParse {
        path: path.into(),
        source: e,
    })
}

/// 读取预解析的 {stock_code, bulletin_id} 列表
pub async fn load_stock_refs(path: &str) -> AppResult<Vec<StockReference>> {
    let text = read_input(path).await?;
    serde_json::from_str(&text).map_err(|e| AppError::JsonParse {
        path: path.into(),
        source: e,
    })
}

async fn read_input(path: &str) -> AppResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_reference_from_json() {
        let raw = r#"[{"stock_code": "600000", "bulletin_id": "12345"},
                      {"stock_code": "600004", "bulletin_id": "23456"}]"#;
        let refs: Vec<StockReference> = serde_json::from_str(raw).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].stock_code, "600000");
        assert_eq!(refs[0].bulletin_id, "12345");
        assert_eq!(refs[0].to_string(), "600000");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let ret = load_stock_codes("data/不存在的文件.json").await;
        assert!(matches!(ret, Err(AppError::File { .. })));
    }

    #[tokio::test]
    async fn test_load_stock_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stocks.json");
        std::fs::write(&path, r#"["600000", "600004"]"#).unwrap();
        let codes = load_stock_codes(path.to_str().unwrap()).await.unwrap();
        assert_eq!(codes, vec!["600000", "600004"]);
    }
}
