//! 持股比例抓取 - 业务能力层
//!
//! 取回公告正文（网络抓取或本地缓存），定位股东表标记，
//! 再交给 `extract` 提取递减数字序列。

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::{AppError, AppResult, ExtractError};
use crate::extract::extract_numbers_after;
use crate::fetcher::EncodedFetcher;
use crate::models::StockReference;

const BULLETIN_BASE: &str =
    "http://vip.stock.finance.sina.com.cn/corp/view/vISSUE_MarketBulletinDetail.php";

/// 股东表前面的标记短语
const MARKER: &str = "前十名股东";
/// 部分公告排版不同，只出现短版本
const MARKER_SHORT: &str = "十名股东";
/// 一张完整的股东表至少有 10 行比例
const MIN_NUMBERS: usize = 10;

/// 持股比例抓取服务
pub struct PercentageExtractor {
    fetcher: Arc<EncodedFetcher>,
    cache_dir: PathBuf,
    offline: bool,
    save_pages: bool,
}

impl PercentageExtractor {
    pub fn new(
        fetcher: Arc<EncodedFetcher>,
        cache_dir: impl Into<PathBuf>,
        offline: bool,
        save_pages: bool,
    ) -> Self {
        Self {
            fetcher,
            cache_dir: cache_dir.into(),
            offline,
            save_pages,
        }
    }

    /// 提取一只股票的前十名股东持股比例
    pub async fn get_percentages(&self, stock: &StockReference) -> AppResult<Vec<f64>> {
        let body = self.load_document(stock).await?;

        let pos = body
            .find(MARKER)
            .or_else(|| body.find(MARKER_SHORT))
            .ok_or(ExtractError::MarkerNotFound { marker: MARKER })?;

        let nums = extract_numbers_after(&body, pos);
        if nums.len() < MIN_NUMBERS {
            return Err(ExtractError::InsufficientData { found: nums.len() }.into());
        }

        debug!("'{}' 提取到 {} 个比例", stock.stock_code, nums.len());
        Ok(nums)
    }

    /// 取回公告正文：离线模式读缓存文件，否则抓取并按 GBK 解码
    async fn load_document(&self, stock: &StockReference) -> AppResult<String> {
        if self.offline {
            let path = self.cache_path(&stock.stock_code);
            return tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| AppError::file(path, e));
        }

        let url = bulletin_url(stock);
        let body = self.fetcher.fetch(&url, encoding_rs::GBK).await?;
        if self.save_pages {
            self.save_page(&stock.stock_code, &body).await?;
        }
        Ok(body)
    }

    /// 把解码后的公告写入缓存目录，供离线模式重跑
    async fn save_page(&self, stock_code: &str, body: &str) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| AppError::file(&self.cache_dir, e))?;
        let path = self.cache_path(stock_code);
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| AppError::file(path, e))?;
        debug!("公告已缓存: {}", stock_code);
        Ok(())
    }

    fn cache_path(&self, stock_code: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.html", stock_code))
    }
}

/// 公告详情页 URL
fn bulletin_url(stock: &StockReference) -> String {
    format!(
        "{}?stockid={}&id={}",
        BULLETIN_BASE, stock.stock_code, stock.bulletin_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_extractor(cache_dir: &std::path::Path) -> PercentageExtractor {
        let fetcher = Arc::new(EncodedFetcher::new(10).unwrap());
        PercentageExtractor::new(fetcher, cache_dir, true, false)
    }

    fn stock(code: &str) -> StockReference {
        StockReference {
            stock_code: code.to_string(),
            bulletin_id: "1".to_string(),
        }
    }

    fn write_page(dir: &std::path::Path, code: &str, body: &str) {
        std::fs::write(dir.join(format!("{}.html", code)), body).unwrap();
    }

    #[test]
    fn test_bulletin_url() {
        assert_eq!(
            bulletin_url(&stock("600000")),
            "http://vip.stock.finance.sina.com.cn/corp/view/vISSUE_MarketBulletinDetail.php?stockid=600000&id=1"
        );
    }

    #[tokio::test]
    async fn test_extracts_from_cached_page() {
        let dir = tempfile::tempdir().unwrap();
        let body = "……发行情况……前十名股东持股情况 \
                    22.50 18.30 10.05 9.80 7.77 5.50 4.25 3.33 2.10 1.05 其他内容";
        write_page(dir.path(), "600000", body);

        let nums = offline_extractor(dir.path())
            .get_percentages(&stock("600000"))
            .await
            .unwrap();
        assert_eq!(nums.len(), 10);
        assert_eq!(nums[0], 22.5);
        assert!(nums.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_falls_back_to_short_marker() {
        let dir = tempfile::tempdir().unwrap();
        let body = "……十名股东名单 \
                    22.50 18.30 10.05 9.80 7.77 5.50 4.25 3.33 2.10 1.05";
        write_page(dir.path(), "600004", body);

        let nums = offline_extractor(dir.path())
            .get_percentages(&stock("600004"))
            .await
            .unwrap();
        assert_eq!(nums.len(), 10);
    }

    #[tokio::test]
    async fn test_marker_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "600006", "这份公告里没有股东表 22.50 18.30");

        let ret = offline_extractor(dir.path())
            .get_percentages(&stock("600006"))
            .await;
        assert!(matches!(
            ret,
            Err(AppError::Extract(ExtractError::MarkerNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_insufficient_numbers() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "600007", "前十名股东 22.50 18.30 10.05 之后没有了");

        let ret = offline_extractor(dir.path())
            .get_percentages(&stock("600007"))
            .await;
        match ret {
            Err(AppError::Extract(ExtractError::InsufficientData { found })) => {
                assert_eq!(found, 3)
            }
            other => panic!("应该返回 InsufficientData，实际是 {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let ret = offline_extractor(dir.path())
            .get_percentages(&stock("600008"))
            .await;
        assert!(matches!(ret, Err(AppError::File { .. })));
    }
}
