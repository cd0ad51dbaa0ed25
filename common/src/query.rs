//! 记录列表筛选
//!
//! 关键字 / 状态 / 时间三个条件按 AND 组合；输出保持调用方给出的
//! 顺序（存储层的“最近保存在前”），本层不重新排序。

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone};

use crate::types::{InspectionRecord, InspectionStatus};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// 时间范围筛选
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeFilter {
    #[default]
    All,
    /// 本地今日 00:00 起
    Today,
    /// 本地昨日 00:00 起、今日 00:00 止（不含）
    Yesterday,
    /// 截止当前时刻的过去 7×24 小时（非自然周）
    Week,
    /// 本自然月 1 日 00:00 起
    Month,
    /// 自定义闭区间 [start 00:00, end 23:59:59.999]；缺省一侧不设界
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl TimeFilter {
    fn contains(&self, timestamp: i64, now: DateTime<Local>) -> bool {
        match self {
            TimeFilter::All => true,
            TimeFilter::Today => timestamp >= day_start_ms(now.date_naive()),
            TimeFilter::Yesterday => {
                let today_start = day_start_ms(now.date_naive());
                timestamp >= today_start - DAY_MS && timestamp < today_start
            }
            TimeFilter::Week => timestamp >= now.timestamp_millis() - 7 * DAY_MS,
            TimeFilter::Month => {
                let month_start = now
                    .date_naive()
                    .with_day(1)
                    .map(day_start_ms)
                    .unwrap_or_else(|| day_start_ms(now.date_naive()));
                timestamp >= month_start
            }
            TimeFilter::Custom { start, end } => {
                let lower = start.map(day_start_ms).unwrap_or(i64::MIN);
                let upper = end
                    .map(|d| day_start_ms(d) + DAY_MS - 1)
                    .unwrap_or(i64::MAX);
                timestamp >= lower && timestamp <= upper
            }
        }
    }
}

/// 本地日期的 00:00 对应的 epoch 毫秒
fn day_start_ms(date: NaiveDate) -> i64 {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// 组合筛选条件
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// 匹配地点名称或点位编码的子串，不区分大小写；空串不过滤
    pub keyword: String,
    /// None 表示全部状态
    pub status: Option<InspectionStatus>,
    pub time: TimeFilter,
}

impl RecordFilter {
    pub fn matches(&self, record: &InspectionRecord, now: DateTime<Local>) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        let matches_keyword = keyword.is_empty()
            || record.location.to_lowercase().contains(&keyword)
            || record
                .location_code
                .as_deref()
                .map(|code| code.to_lowercase().contains(&keyword))
                .unwrap_or(false);

        let matches_status = self
            .status
            .map(|status| record.overall_status == status)
            .unwrap_or(true);

        matches_keyword && matches_status && self.time.contains(record.timestamp, now)
    }

    /// 按存储顺序返回命中的记录引用
    pub fn apply<'a>(
        &self,
        records: &'a [InspectionRecord],
        now: DateTime<Local>,
    ) -> Vec<&'a InspectionRecord> {
        records.iter().filter(|r| self.matches(r, now)).collect()
    }
}
