//! 批量驱动 - 编排层
//!
//! ## 职责
//!
//! 1. **并发控制**：用 Semaphore 把在途任务数压在上限以内
//! 2. **错误隔离**：单个任务失败只记录，不中断批次
//! 3. **结果上报**：每个任务的结果恰好上报一次，全部结束后返回统计
//!
//! 派发按输入顺序进行；一个任务结束（无论成败）立刻放行下一个
//! 排队任务，所以输出顺序跟随完成顺序，不保证与输入一致。

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Semaphore;
use tracing::error;

use crate::error::AppError;

/// 处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 驱动全部任务，最多 `concurrency` 个同时在途。
///
/// 失败的任务在 stderr 打一行 `<item>\tERROR: <msg>` 并记入日志，
/// 批次继续；函数在所有任务结束后才返回。
pub async fn run_all<T, F, Fut, R>(
    items: Vec<T>,
    worker: F,
    concurrency: usize,
) -> Result<ProcessingStats>
where
    T: Display + Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, AppError>> + Send + 'static,
    R: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut stats = ProcessingStats {
        total: items.len(),
        ..Default::default()
    };
    let mut handles = Vec::with_capacity(stats.total);

    for item in items {
        // 先拿许可再派发，保证在途任务不超上限
        let permit = semaphore.clone().acquire_owned().await?;
        let label = item.to_string();
        let task_label = label.clone();
        let fut = worker(item);

        let handle = tokio::spawn(async move {
            let _permit = permit;
            match fut.await {
                Ok(_) => Ok(()),
                Err(e) => {
                    eprintln!("{}\tERROR: {}", task_label, e);
                    error!("[{}] 处理失败: {}", task_label, e);
                    Err(e)
                }
            }
        });
        handles.push((label, handle));
    }

    // 等待所有任务完成
    for (label, handle) in handles {
        match handle.await {
            Ok(Ok(())) => stats.success += 1,
            Ok(Err(_)) => stats.failed += 1,
            Err(e) => {
                error!("[{}] 任务执行失败: {}", label, e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}
