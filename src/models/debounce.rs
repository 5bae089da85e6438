//! 防抖
//!
//! 纯数据结构：时间由调用方传入，不依赖真实定时器，测试可以直接构造 `Instant`。

use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Pending<V> {
    value: V,
    last_touch: Instant,
}

pub struct Debouncer<K, V> {
    quiet: Duration,
    pending: FxHashMap<K, Pending<V>>,
}

impl<K, V> Debouncer<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: FxHashMap::default(),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// 记录最新值并重新开始静默计时
    pub fn touch(&mut self, key: K, value: V, now: Instant) {
        self.pending.insert(
            key,
            Pending {
                value,
                last_touch: now,
            },
        );
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        self.pending.get(key).map(|p| &p.value)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 取出单个条目（失焦、保存时立即提交）
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.pending.remove(key).map(|p| p.value)
    }

    /// 取出所有静默期已满的条目
    pub fn due(&mut self, now: Instant) -> Vec<(K, V)> {
        let ready: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| now.saturating_duration_since(p.last_touch) >= self.quiet)
            .map(|(k, _)| k.clone())
            .collect();

        ready
            .into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|p| (k, p.value)))
            .collect()
    }

    pub fn drain(&mut self) -> Vec<(K, V)> {
        self.pending.drain().map(|(k, p)| (k, p.value)).collect()
    }

    /// 距离最早一个条目到期还剩多久；没有待处理条目时返回 None
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .values()
            .map(|p| (p.last_touch + self.quiet).saturating_duration_since(now))
            .min()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/debounce.rs"]
mod tests;
