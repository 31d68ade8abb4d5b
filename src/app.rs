//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **装配资源**：创建共享的 HTTP 客户端、查询和提取服务
//! 2. **选择模式**：搜索模式（先查公告编号）或预解析模式
//! 3. **驱动批次**：把单只股票的管线交给批量驱动执行
//! 4. **输出**：成功的股票在 stdout 打一行制表符分隔的比例，
//!    最后汇总统计写入日志

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::batch::{self, ProcessingStats};
use crate::config::Config;
use crate::delay::delayed;
use crate::error::AppResult;
use crate::fetcher::EncodedFetcher;
use crate::models::{self, StockReference};
use crate::percentages::PercentageExtractor;
use crate::resolver::IdentifierResolver;

/// 应用主结构
pub struct App {
    config: Config,
    resolver: Arc<IdentifierResolver>,
    extractor: Arc<PercentageExtractor>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let fetcher = Arc::new(EncodedFetcher::new(config.fetch_timeout_secs)?);
        let resolver = Arc::new(IdentifierResolver::new(fetcher.clone()));
        let extractor = Arc::new(PercentageExtractor::new(
            fetcher,
            config.cache_dir.clone(),
            config.offline,
            config.save_pages,
        ));

        Ok(Self {
            config,
            resolver,
            extractor,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let stats = if self.config.use_resolved {
            self.run_resolved().await?
        } else {
            self.run_search().await?
        };

        print_final_stats(&stats);
        Ok(())
    }

    /// 搜索模式：先查公告编号，再抓公告提取比例
    async fn run_search(&self) -> Result<ProcessingStats> {
        let codes = models::load_stock_codes(&self.config.stocks_file).await?;
        if codes.is_empty() {
            warn!("⚠️ 股票列表为空，程序结束");
            return Ok(ProcessingStats::default());
        }
        info!("✓ 共 {} 只股票待处理", codes.len());

        let resolver = self.resolver.clone();
        let extractor = self.extractor.clone();
        let worker = delayed(
            move |code: String| {
                let resolver = resolver.clone();
                let extractor = extractor.clone();
                async move { print_line(&resolver, &extractor, code).await }
            },
            Duration::from_millis(self.config.request_delay_ms),
        );

        batch::run_all(codes, worker, self.config.max_concurrent).await
    }

    /// 预解析模式：直接用 {stock_code, bulletin_id} 列表，跳过搜索
    async fn run_resolved(&self) -> Result<ProcessingStats> {
        let refs = models::load_stock_refs(&self.config.pairs_file).await?;
        if refs.is_empty() {
            warn!("⚠️ 预解析列表为空，程序结束");
            return Ok(ProcessingStats::default());
        }
        info!("✓ 共 {} 份公告待处理（预解析模式）", refs.len());

        let extractor = self.extractor.clone();
        let worker = delayed(
            move |stock: StockReference| {
                let extractor = extractor.clone();
                async move { print_percentages(&extractor, stock).await }
            },
            Duration::from_millis(self.config.request_delay_ms),
        );

        batch::run_all(refs, worker, self.config.max_concurrent).await
    }
}

/// 单只股票的完整管线：查公告编号 → 抓公告 → 打印一行
async fn print_line(
    resolver: &IdentifierResolver,
    extractor: &PercentageExtractor,
    code: String,
) -> AppResult<()> {
    let stock = resolver.resolve(&code).await?;
    print_percentages(extractor, stock).await
}

/// 提取比例并在 stdout 打一行制表符分隔的结果
async fn print_percentages(
    extractor: &PercentageExtractor,
    stock: StockReference,
) -> AppResult<()> {
    let nums = extractor.get_percentages(&stock).await?;
    let joined = nums
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\t");
    println!("{}\t{}", stock.stock_code, joined);
    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 公告持股比例抓取");
    info!("📊 最大并发数: {}", config.max_concurrent);
    if config.offline {
        info!("📁 离线模式: 从 {} 读取缓存", config.cache_dir);
    }
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats) {
    info!("{}", "=".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
