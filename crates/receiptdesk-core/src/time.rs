//! Time-period phrases for the receipt search box
//!
//! Typing "last month" into the search box filters by date instead of text.
//! Phrases resolve to closed date intervals relative to the day the query is
//! evaluated.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A recognised time phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

/// Phrase vocabulary. Fuzzy matching walks it in this order and the first hit
/// wins, so the order is part of the behavior.
pub const VOCABULARY: [(&str, TimePeriod); 8] = [
    ("today", TimePeriod::Today),
    ("yesterday", TimePeriod::Yesterday),
    ("this week", TimePeriod::ThisWeek),
    ("last week", TimePeriod::LastWeek),
    ("this month", TimePeriod::ThisMonth),
    ("last month", TimePeriod::LastMonth),
    ("this year", TimePeriod::ThisYear),
    ("last year", TimePeriod::LastYear),
];

/// Shortest query that may fuzzy-match a phrase
const MIN_FUZZY_LEN: usize = 3;

impl TimePeriod {
    pub fn phrase(self) -> &'static str {
        VOCABULARY
            .iter()
            .find(|(_, period)| *period == self)
            .map(|(phrase, _)| *phrase)
            .unwrap_or("")
    }

    /// Resolve to a closed `[start, end]` interval relative to `today`
    pub fn interval(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            TimePeriod::Today => (today, today),
            TimePeriod::Yesterday => {
                let day = today - Duration::days(1);
                (day, day)
            }
            TimePeriod::ThisWeek => {
                let start = week_start(today);
                (start, start + Duration::days(6))
            }
            TimePeriod::LastWeek => {
                let start = week_start(today) - Duration::days(7);
                (start, start + Duration::days(6))
            }
            TimePeriod::ThisMonth => month_bounds(today.year(), today.month()),
            TimePeriod::LastMonth => {
                if today.month() == 1 {
                    month_bounds(today.year() - 1, 12)
                } else {
                    month_bounds(today.year(), today.month() - 1)
                }
            }
            TimePeriod::ThisYear => year_bounds(today.year()),
            TimePeriod::LastYear => year_bounds(today.year() - 1),
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

/// Weeks start on Sunday
fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_sunday() as i64)
}

fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .and_then(|d| d.pred_opt())
    .unwrap_or(start);
    (start, end)
}

fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(start);
    (start, end)
}

/// Date filter produced by a time phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFilter {
    pub period: TimePeriod,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeFilter {
    pub fn new(period: TimePeriod, today: NaiveDate) -> Self {
        let (start, end) = period.interval(today);
        Self { period, start, end }
    }

    /// Check if a date is within the interval, both ends inclusive
    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.start && *date <= self.end
    }

    pub fn description(&self) -> String {
        format!("{} ({} to {})", self.period, self.start, self.end)
    }
}

/// Filter currently applied to the receipt table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchFilter {
    Time(TimeFilter),
    Text { query: String },
}

/// Recognise a time phrase in a search query.
///
/// Exact matches win. Otherwise a query of at least three characters matches
/// the first phrase that starts with or contains it.
pub fn parse_time_period(query: &str, today: NaiveDate) -> Option<TimeFilter> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    if let Some((_, period)) = VOCABULARY.iter().find(|(phrase, _)| *phrase == query) {
        return Some(TimeFilter::new(*period, today));
    }

    if query.chars().count() < MIN_FUZZY_LEN {
        return None;
    }

    VOCABULARY
        .iter()
        .find(|(phrase, _)| phrase.starts_with(&query) || phrase.contains(&query))
        .map(|(_, period)| TimeFilter::new(*period, today))
}

/// Parse a table date in `MM-DD-YY` form; the century is always 2000
pub fn parse_row_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('-');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year_part = parts.next()?;
    if parts.next().is_some() || year_part.len() != 2 {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Render a date the way the table shows it
pub fn format_row_date(date: NaiveDate) -> String {
    date.format("%m-%d-%y").to_string()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_phrases() {
        let today = ymd(2024, 3, 14);
        for (phrase, period) in VOCABULARY {
            let filter = parse_time_period(phrase, today).unwrap();
            assert_eq!(filter.period, period);
        }
        assert_eq!(parse_time_period("  This Year ", today).unwrap().period, TimePeriod::ThisYear);
    }

    #[test]
    fn test_fuzzy_match_uses_vocabulary_order() {
        let today = ymd(2024, 3, 14);
        assert_eq!(parse_time_period("this", today).unwrap().period, TimePeriod::ThisWeek);
        assert_eq!(parse_time_period("las", today).unwrap().period, TimePeriod::LastWeek);
        assert_eq!(parse_time_period("month", today).unwrap().period, TimePeriod::ThisMonth);
        assert_eq!(parse_time_period("yest", today).unwrap().period, TimePeriod::Yesterday);
    }

    #[test]
    fn test_short_or_unknown_queries_are_text() {
        let today = ymd(2024, 3, 14);
        assert!(parse_time_period("to", today).is_none());
        assert!(parse_time_period("smith", today).is_none());
        assert!(parse_time_period("", today).is_none());
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-03-14 is a Thursday
        let filter = TimeFilter::new(TimePeriod::ThisWeek, ymd(2024, 3, 14));
        assert_eq!(filter.start, ymd(2024, 3, 10));
        assert_eq!(filter.end, ymd(2024, 3, 16));

        let last = TimeFilter::new(TimePeriod::LastWeek, ymd(2024, 3, 14));
        assert_eq!(last.start, ymd(2024, 3, 3));
        assert_eq!(last.end, ymd(2024, 3, 9));
    }

    #[test]
    fn test_month_intervals() {
        let filter = TimeFilter::new(TimePeriod::ThisMonth, ymd(2024, 2, 10));
        assert_eq!(filter.start, ymd(2024, 2, 1));
        assert_eq!(filter.end, ymd(2024, 2, 29));

        let last = TimeFilter::new(TimePeriod::LastMonth, ymd(2024, 1, 10));
        assert_eq!(last.start, ymd(2023, 12, 1));
        assert_eq!(last.end, ymd(2023, 12, 31));
    }

    #[test]
    fn test_year_and_day_intervals() {
        let today = ymd(2024, 1, 1);
        assert_eq!(TimePeriod::Yesterday.interval(today), (ymd(2023, 12, 31), ymd(2023, 12, 31)));
        assert_eq!(TimePeriod::LastYear.interval(today), (ymd(2023, 1, 1), ymd(2023, 12, 31)));
        assert!(TimeFilter::new(TimePeriod::ThisYear, today).contains(&ymd(2024, 12, 31)));
    }

    #[test]
    fn test_parse_row_date() {
        assert_eq!(parse_row_date("01-15-24"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_row_date("12-31-99"), Some(ymd(2099, 12, 31)));
        assert_eq!(parse_row_date("2024-01-15"), None);
        assert_eq!(parse_row_date("13-01-24"), None);
        assert_eq!(parse_row_date("garbage"), None);
        assert_eq!(format_row_date(ymd(2024, 2, 1)), "02-01-24");
    }

    #[test]
    fn test_filter_serializes_with_type_tag() {
        let filter = SearchFilter::Text { query: "smith".to_string() };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["type"], "text");
    }
}
