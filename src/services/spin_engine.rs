use chrono::{DateTime, Utc};

use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::services::PrizePool;

/// 转盘决策核心（纯计算，随机数由调用方提供）
///
/// 两条时间曲线方向相反，不要混用：
/// - 全局中奖率看 elapsed（紧迫度，窗口越接近结束越高，保证临期清库存）
/// - 单品权重看 remaining（余期越长权重越高，优先消耗还有跑道的奖品）
#[derive(Debug, Clone, Copy)]
pub struct SpinEngine {
    base_win_rate: f64,
}

impl SpinEngine {
    /// 基础中奖率必须落在 [0, 1]，否则拒绝构造
    pub fn new(base_win_rate: f64) -> AppResult<Self> {
        if !(0.0..=1.0).contains(&base_win_rate) {
            return Err(AppError::ConfigError(format!(
                "base_win_rate must be within [0, 1], got {base_win_rate}"
            )));
        }
        Ok(Self { base_win_rate })
    }

    pub fn base_win_rate(&self) -> f64 {
        self.base_win_rate
    }

    /// 单品紧迫度 1 - exp(-3 * elapsed / total)，窗口走完约 95% 饱和
    fn urgency(record: &prizes::Model, now: DateTime<Utc>) -> f64 {
        let total = record.total_duration().num_seconds() as f64;
        let elapsed = record.elapsed_duration(now).num_seconds() as f64;
        1.0 - (-3.0 * elapsed / total).exp()
    }

    /// 全奖池紧迫度：各记录紧迫度的算术平均（与库存无关）。
    /// 空奖池定义为 0，此时全局中奖率退化为基础中奖率。
    pub fn time_lapse_factor(&self, pool: &PrizePool, now: DateTime<Utc>) -> f64 {
        let count = pool.record_count();
        if count == 0 {
            return 0.0;
        }
        let sum: f64 = pool.records().iter().map(|r| Self::urgency(r, now)).sum();
        sum / count as f64
    }

    /// 全局中奖率 = base + (1 - base) * 紧迫度均值。
    /// 紧迫度趋于 1 时收敛到 1，与配置的基础中奖率无关。
    pub fn global_win_rate(&self, pool: &PrizePool, now: DateTime<Utc>) -> f64 {
        self.base_win_rate + (1.0 - self.base_win_rate) * self.time_lapse_factor(pool, now)
    }

    /// u1 为均匀随机数，u1 <= 全局中奖率即中奖
    pub fn is_win(&self, pool: &PrizePool, now: DateTime<Utc>, u1: f64) -> bool {
        u1 <= self.global_win_rate(pool, now)
    }

    /// 单品权重因子 2 - exp(-3 * remaining / total)：
    /// 余期越长越接近 2，临期趋于 1
    pub fn prize_factor(record: &prizes::Model, now: DateTime<Utc>) -> f64 {
        let total = record.total_duration().num_seconds() as f64;
        let remaining = record.remaining_duration(now).num_seconds() as f64;
        2.0 - (-3.0 * remaining / total).exp()
    }

    fn total_weight(records: &[prizes::Model], now: DateTime<Utc>) -> f64 {
        records
            .iter()
            .map(|r| r.quantity() as f64 * Self::prize_factor(r, now))
            .sum()
    }

    /// 轮盘选择：按 库存×权重因子 占比游走累积分布，
    /// 返回第一个累积占比不小于 u2 的记录下标。
    ///
    /// 无库存记录权重为 0，直接跳过。浮点边界上的平手归遍历序先到者；
    /// 累积和因舍入略小于 1 时兜底取最后一个有库存记录。
    pub fn pick_prize_index(
        &self,
        records: &[prizes::Model],
        now: DateTime<Utc>,
        u2: f64,
    ) -> Option<usize> {
        let total = Self::total_weight(records, now);
        if total <= 0.0 {
            return None;
        }
        let mut cumulative = 0.0;
        let mut fallback = None;
        for (index, record) in records.iter().enumerate() {
            if !record.is_available() {
                continue;
            }
            cumulative += record.quantity() as f64 * Self::prize_factor(record, now) / total;
            if u2 <= cumulative {
                return Some(index);
            }
            fallback = Some(index);
        }
        fallback
    }

    /// 同 pick_prize_index，返回记录引用
    pub fn pick_prize<'a>(
        &self,
        records: &'a [prizes::Model],
        now: DateTime<Utc>,
        u2: f64,
    ) -> Option<&'a prizes::Model> {
        self.pick_prize_index(records, now, u2).map(|i| &records[i])
    }
}
