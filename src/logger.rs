//! 日志初始化
//!
//! 进度和错误走 tracing；抓取结果本身直接写 stdout/stderr，
//! 不混进日志里。

use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志，`RUST_LOG` 可覆盖默认的 info 级别
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
