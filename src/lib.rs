//! # Top10 Holders
//!
//! 批量抓取新浪财经上市公告里"前十名股东"持股比例的小工具
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `fetcher` - 带编码解码的 HTTP 抓取（搜索页 UTF-8 / 公告页 GBK）
//!
//! ### ② 业务能力层（Services）
//! - `resolver` - 通过搜索引擎查出股票对应的公告编号
//! - `percentages` - 抓取公告、定位股东表、提取比例
//! - `extract` - 递减数字序列提取（纯函数，无隐藏状态）
//!
//! ### ③ 编排层（Orchestration）
//! - `batch` - 并发上限 + 单项错误隔离的批量驱动
//! - `app` - 装配资源、选择运行模式、输出统计
//!
//! 每只股票的处理互相独立：任何一只失败只在 stderr 打一行
//! `<code>\tERROR: <msg>`，不影响其他股票。

pub mod app;
pub mod batch;
pub mod config;
pub mod delay;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod logger;
pub mod models;
pub mod percentages;
pub mod resolver;

// 重新导出常用类型
pub use app::App;
pub use batch::ProcessingStats;
pub use config::Config;
pub use error::{AppError, AppResult, ExtractError, ResolveError};
pub use models::StockReference;
