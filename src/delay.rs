//! 固定延迟包装
//!
//! 把一个异步函数包装成"先等一段时间再执行"的版本，
//! 用来给抓取限速。

use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;

/// 包装 `f`：每次调用先睡 `wait`，再执行原函数。
///
/// 每次调用各用一个计时器；原函数的返回值（包括错误）
/// 原样从返回的 future 里传出。
pub fn delayed<A, R, F, Fut>(f: F, wait: Duration) -> impl Fn(A) -> BoxFuture<'static, R>
where
    F: Fn(A) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    A: Send + 'static,
    R: 'static,
{
    move |arg| -> BoxFuture<'static, R> {
        let f = f.clone();
        Box::pin(async move {
            tokio::time::sleep(wait).await;
            f(arg).await
        })
    }
}
