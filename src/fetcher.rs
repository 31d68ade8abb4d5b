//! 带编码解码的 HTTP 抓取 - 基础设施层
//!
//! 公告页面是 GBK 编码，搜索结果页是 UTF-8，所以响应体
//! 先整体读成字节，再按调用方指定的编码解码。

use std::time::Duration;

use encoding_rs::Encoding;
use reqwest::{header, Client};

use crate::error::AppResult;

/// 桌面版 Chrome 的 User-Agent，公告站点对默认 UA 返回空页面
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_8_5) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/31.0.1650.63 Safari/537.36";

/// 按指定编码抓取页面的 HTTP 客户端
///
/// 固定请求头、固定超时、不复用连接；所有网络请求都经过这里。
#[derive(Debug, Clone)]
pub struct EncodedFetcher {
    client: Client,
}

impl EncodedFetcher {
    pub fn new(timeout_secs: u64) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "User-Agent",
            header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            "Accept",
            header::HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }

    /// 抓取 url，把完整响应体按 encoding 解码成字符串
    pub async fn fetch(&self, url: &str, encoding: &'static Encoding) -> AppResult<String> {
        let resp = self.client.get(url).send().await?;
        let bytes = resp.bytes().await?;
        let (text, _, _) = encoding.decode(&bytes);
        Ok(text.into_owned())
    }
}
