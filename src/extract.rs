//! 递减数字序列提取 - 纯函数
//!
//! 公告里的股东表按持股比例从大到小排列，提取逻辑靠这一点
//! 区分表内数字和正文噪音。

use regex::Regex;

/// 一次最多接受的数字个数（前十名股东 + 合计行等，留足余量）
const MAX_NUMBERS: usize = 20;
/// 相邻两次匹配之间允许的最大间隔（字节），超过视为已经离开股东表
const MAX_GAP: usize = 500;
/// 数字 token：前面必须是空白，形如 12.345 或 12%
const NUMBER_PATTERN: &str = r"\s([0-9]{1,2}\.[0-9]{1,5}|[0-9]{1,2}%)";

/// 从 start（字节偏移）开始扫描正文，收集一段递减的数字序列。
///
/// 只接受不大于上一个已接受值的数字，不符合的当作噪音跳过；
/// 接受与否都不中断扫描。间隔窗口以最近一次"扫描到"的匹配为
/// 基准，而不是最近一次"接受"的匹配——这是线上脚本的既有行为，
/// 这里原样保留（被拒绝的匹配也会刷新窗口）。
///
/// 返回的序列保证单调不增，长度 0..=20。
pub fn extract_numbers_after(body: &str, start: usize) -> Vec<f64> {
    let Ok(re) = Regex::new(NUMBER_PATTERN) else {
        return Vec::new();
    };

    let mut nums = Vec::new();
    let mut last_accepted = f64::INFINITY;
    let mut last_end = 0usize;

    for caps in re.captures_iter(&body[start..]) {
        if nums.len() >= MAX_NUMBERS {
            break;
        }
        let Some(m) = caps.get(0) else {
            continue;
        };
        if m.end() - last_end > MAX_GAP {
            break;
        }
        last_end = m.end();

        let Some(token) = caps.get(1) else {
            continue;
        };
        let token = token.as_str();
        let digits = token.strip_suffix('%').unwrap_or(token);
        let Ok(value) = digits.parse::<f64>() else {
            continue;
        };
        if value <= last_accepted {
            last_accepted = value;
            nums.push(value);
        }
    }
    nums
}
