//! 時間窗口解析

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 已解析的時間窗口
///
/// 日期區間 `[from, to]` 含兩端，過濾時使用半開區間 `[from, to_exclusive)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// 起始日期（含）
    pub from: NaiveDate,

    /// 結束日期（含）
    pub to: NaiveDate,

    /// 結束日期的次日（不含）
    pub to_exclusive: NaiveDate,

    /// 窗口長度（天），最小為 1
    pub window_length_days: i64,
}

impl TimeWindow {
    /// 解析呼叫端的日期過濾條件
    ///
    /// - 兩者皆空：`[today - (default_days - 1), today]`
    /// - 只有 `from`：結束日期為 `today`
    /// - 只有 `to`：起始日期為 `to - (default_days - 1)`
    ///
    /// 起始日期晚於結束日期時不報錯，得到不含任何時間點的窗口。
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
        default_days: u32,
    ) -> Self {
        let span = Days::new(u64::from(default_days.max(1) - 1));

        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, today),
            (None, Some(to)) => (Self::subtract(to, span), to),
            (None, None) => (Self::subtract(today, span), today),
        };

        // 日期上限無次日，以上限本身為界
        let to_exclusive = to.succ_opt().unwrap_or(NaiveDate::MAX);

        let window_length_days = (to - from).num_days().max(1);

        Self {
            from,
            to,
            to_exclusive,
            window_length_days,
        }
    }

    /// 以本地時鐘的今天為基準解析
    pub fn resolve_from_clock(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        default_days: u32,
    ) -> Self {
        let today = chrono::Local::now().date_naive();
        Self::resolve(from, to, today, default_days)
    }

    /// 檢查時間點是否落在 `[from, to_exclusive)`
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let date = timestamp.date();
        date >= self.from && date < self.to_exclusive
    }

    fn subtract(date: NaiveDate, span: Days) -> NaiveDate {
        date.checked_sub_days(span).unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_trailing_window() {
        let today = date(2025, 3, 30);
        let window = TimeWindow::resolve(None, None, today, 30);

        assert_eq!(window.from, date(2025, 3, 1));
        assert_eq!(window.to, today);
        assert_eq!(window.to_exclusive, date(2025, 3, 31));
        assert_eq!(window.window_length_days, 29);
    }

    #[test]
    fn test_explicit_window() {
        let window =
            TimeWindow::resolve(Some(date(2025, 3, 1)), Some(date(2025, 3, 31)), date(2025, 6, 1), 30);

        assert_eq!(window.window_length_days, 30);
        assert_eq!(window.to_exclusive, date(2025, 4, 1));
    }

    #[test]
    fn test_single_day_window_floor() {
        let day = date(2025, 3, 10);
        let window = TimeWindow::resolve(Some(day), Some(day), day, 30);

        // 同一天：長度下限為 1，避免除以零
        assert_eq!(window.window_length_days, 1);
    }

    #[rstest]
    #[case(Some(date(2025, 3, 10)), None, date(2025, 3, 10), date(2025, 3, 20))]
    #[case(None, Some(date(2025, 3, 20)), date(2025, 2, 19), date(2025, 3, 20))]
    fn test_one_sided_window(
        #[case] from: Option<NaiveDate>,
        #[case] to: Option<NaiveDate>,
        #[case] expected_from: NaiveDate,
        #[case] expected_to: NaiveDate,
    ) {
        let window = TimeWindow::resolve(from, to, date(2025, 3, 20), 30);

        assert_eq!(window.from, expected_from);
        assert_eq!(window.to, expected_to);
    }

    #[test]
    fn test_inverted_window_matches_nothing() {
        let window =
            TimeWindow::resolve(Some(date(2025, 3, 20)), Some(date(2025, 3, 1)), date(2025, 3, 20), 30);

        assert_eq!(window.window_length_days, 1);
        for day in 1..=31 {
            assert!(!window.contains(date(2025, 3, day).and_hms_opt(12, 0, 0).unwrap()));
        }
    }

    #[test]
    fn test_future_from_with_default_end_matches_nothing() {
        // 只給起始日期且晚於今天，結束日期取今天
        let window = TimeWindow::resolve(Some(date(2025, 3, 25)), None, date(2025, 3, 10), 30);

        assert_eq!(window.to, date(2025, 3, 10));
        assert!(!window.contains(date(2025, 3, 25).and_hms_opt(9, 0, 0).unwrap()));
        assert!(!window.contains(date(2025, 3, 10).and_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn test_extreme_dates_saturate() {
        let window = TimeWindow::resolve(None, None, NaiveDate::MIN, 30);

        assert_eq!(window.from, NaiveDate::MIN);
        assert_eq!(window.window_length_days, 1);
    }

    #[test]
    fn test_contains_half_open() {
        let window =
            TimeWindow::resolve(Some(date(2025, 3, 1)), Some(date(2025, 3, 31)), date(2025, 3, 31), 30);

        let last_moment = date(2025, 3, 31).and_hms_opt(23, 59, 59).unwrap();
        let next_day = date(2025, 4, 1).and_hms_opt(0, 0, 0).unwrap();
        let day_before = date(2025, 2, 28).and_hms_opt(23, 59, 59).unwrap();

        assert!(window.contains(date(2025, 3, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(window.contains(last_moment));
        assert!(!window.contains(next_day));
        assert!(!window.contains(day_before));
    }
}
