//! 公告编号查询 - 业务能力层
//!
//! 在 Google 里搜索 "<股票代码> 首次公开发行股票上市公告 新浪"，
//! 结果页里新浪的公告链接会带上 stockid/id 两个参数，
//! 其中 id 就是我们要的公告编号。

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::error::{AppResult, ResolveError};
use crate::fetcher::EncodedFetcher;
use crate::models::StockReference;

const SEARCH_BASE: &str = "https://www.google.ch/search";

/// 固定查询词 "首次公开发行股票上市公告 新浪"（已 URL 编码）
const SEARCH_QUERY: &str = "%E9%A6%96%E6%AC%A1%E5%85%AC%E5%BC%80%E5%8F%91%E8%A1\
                            %8C%E8%82%A1%E7%A5%A8%E4%B8%8A%E5%B8%82%E5%85%AC%E5\
                            %91%8A+%E6%96%B0%E6%B5%AA";

/// 公告链接里的 stockid/id 参数对（结果页里 & 可能被转义成 &amp;）
const LINK_PATTERN: &str = r"stockid=([0-9]+)&(?:amp;)?id=([0-9]+)";

/// 公告编号查询服务
pub struct IdentifierResolver {
    fetcher: Arc<EncodedFetcher>,
}

impl IdentifierResolver {
    pub fn new(fetcher: Arc<EncodedFetcher>) -> Self {
        Self { fetcher }
    }

    /// 查询股票代码对应的公告编号
    pub async fn resolve(&self, stock_code: &str) -> AppResult<StockReference> {
        let url = format!("{}?q={}+{}", SEARCH_BASE, stock_code, SEARCH_QUERY);
        let body = self.fetcher.fetch(&url, encoding_rs::UTF_8).await?;
        parse_search_page(stock_code, &body)
    }
}

/// 从结果页正文里解析第一个 stockid/id 对，并核对股票代码。
///
/// 搜索结果可能被顶替成别的股票的公告，所以代码对不上时
/// 宁可报错也不往下走。
fn parse_search_page(stock_code: &str, body: &str) -> AppResult<StockReference> {
    let re = Regex::new(LINK_PATTERN)?;

    let no_result = || ResolveError::NoResult {
        stock_code: stock_code.to_string(),
    };
    let caps = re.captures(body).ok_or_else(no_result)?;
    let (actual, bulletin_id) = match (caps.get(1), caps.get(2)) {
        (Some(code), Some(id)) => (code.as_str(), id.as_str()),
        _ => return Err(no_result().into()),
    };

    if actual != stock_code {
        return Err(ResolveError::Mismatch {
            expected: stock_code.to_string(),
            actual: actual.to_string(),
        }
        .into());
    }

    debug!("'{}' 对应公告编号 {}", stock_code, bulletin_id);
    Ok(StockReference {
        stock_code: actual.to_string(),
        bulletin_id: bulletin_id.to_string(),
    })
}
