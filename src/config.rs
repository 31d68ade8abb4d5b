/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的股票数量
    pub max_concurrent: usize,
    /// 单次请求的总超时（秒）
    pub fetch_timeout_secs: u64,
    /// 每次请求前的固定延迟（毫秒），用来放慢抓取节奏
    pub request_delay_ms: u64,
    /// 股票代码列表文件（JSON 数组）
    pub stocks_file: String,
    /// 预解析的 {stock_code, bulletin_id} 列表文件
    pub pairs_file: String,
    /// 是否使用预解析列表（跳过搜索步骤）
    pub use_resolved: bool,
    /// 离线模式：从缓存目录读公告，不访问网络
    pub offline: bool,
    /// 公告缓存目录
    pub cache_dir: String,
    /// 抓取后是否把解码完的公告写入缓存目录
    pub save_pages: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent: 3,
            fetch_timeout_secs: 10,
            request_delay_ms: 0,
            stocks_file: "data/stocks.json".to_string(),
            pairs_file: "data/stock_ids.json".to_string(),
            use_resolved: false,
            offline: false,
            cache_dir: "files".to_string(),
            save_pages: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent: std::env::var("MAX_CONCURRENT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            request_delay_ms: std::env::var("REQUEST_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_delay_ms),
            stocks_file: std::env::var("STOCKS_FILE").unwrap_or(default.stocks_file),
            pairs_file: std::env::var("PAIRS_FILE").unwrap_or(default.pairs_file),
            use_resolved: std::env::var("USE_RESOLVED").ok().and_then(|v| v.parse().ok()).unwrap_or(default.use_resolved),
            offline: std::env::var("OFFLINE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.offline),
            cache_dir: std::env::var("CACHE_DIR").unwrap_or(default.cache_dir),
            save_pages: std::env::var("SAVE_PAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.save_pages),
        }
    }
}
