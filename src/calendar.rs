// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month grid marking logged days, with today flagged while it has no record.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Months, NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::BTreeSet;

pub const DEFAULT_REVIEW_TIME: &str = "21:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMark {
    Logged,
    NeedsReminder,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub mark: DayMark,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Sunday-first weeks; `None` pads days outside the month.
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

impl MonthCalendar {
    pub fn build(month: NaiveDate, logged: &BTreeSet<NaiveDate>, today: NaiveDate) -> Result<Self> {
        let first = month
            .with_day(1)
            .ok_or_else(|| anyhow!("Invalid month {}", month))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| anyhow!("Month after {} is out of range", first))?;

        let mut weeks = Vec::new();
        let mut week: [Option<CalendarDay>; 7] = [None; 7];
        for date in first.iter_days().take_while(|d| *d < next) {
            let col = date.weekday().num_days_from_sunday() as usize;
            let mark = if logged.contains(&date) {
                DayMark::Logged
            } else if date == today {
                DayMark::NeedsReminder
            } else {
                DayMark::Plain
            };
            week[col] = Some(CalendarDay {
                date,
                mark,
                is_today: date == today,
            });
            if col == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        Ok(Self {
            year: first.year(),
            month: first.month(),
            weeks,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn logged_count(&self) -> usize {
        self.days().filter(|d| d.mark == DayMark::Logged).count()
    }

    /// Plain-text grid: `●` logged, `!` today without a record, a leading `[` marks today.
    pub fn render(&self) -> String {
        let mut out = format!("{:^28}\n", format!("{}年{}月", self.year, self.month));
        out.push_str(" 日  一  二  三  四  五  六\n");
        for week in &self.weeks {
            for cell in week {
                let text = match cell {
                    None => "    ".to_string(),
                    Some(day) => {
                        let marker = match day.mark {
                            DayMark::Logged => '●',
                            DayMark::NeedsReminder => '!',
                            DayMark::Plain => ' ',
                        };
                        if day.is_today {
                            format!("[{:>2}{}", day.date.day(), marker)
                        } else {
                            format!("{:>3}{}", day.date.day(), marker)
                        }
                    }
                };
                out.push_str(&text);
            }
            out.push('\n');
        }
        out
    }
}

/// Status line for a selected day.
pub fn reminder_message(date: NaiveDate, today: NaiveDate, has_records: bool) -> String {
    match (date == today, has_records) {
        (true, true) => "今天已完成記帳".to_string(),
        (true, false) => "今天尚未記帳，記得完成今日記帳".to_string(),
        (false, true) => format!("{} 已完成記帳", date.format("%Y/%m/%d")),
        (false, false) => format!("{} 沒有記帳紀錄", date.format("%Y/%m/%d")),
    }
}

pub fn validate_review_time(raw: &str) -> Result<String> {
    let t = crate::utils::parse_time(raw)?;
    Ok(format_review_time(t))
}

pub fn format_review_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn lays_out_sunday_first_weeks() {
        // June 2025 starts on a Sunday and has 30 days.
        let cal = MonthCalendar::build(d(2025, 6, 15), &BTreeSet::new(), d(2025, 1, 1)).unwrap();
        assert_eq!((cal.year, cal.month), (2025, 6));
        assert_eq!(cal.weeks.len(), 5);
        assert_eq!(cal.weeks[0][0].unwrap().date, d(2025, 6, 1));
        assert_eq!(cal.weeks[4][1].unwrap().date, d(2025, 6, 30));
        assert!(cal.weeks[4][2].is_none());
        assert_eq!(cal.days().count(), 30);
    }

    #[test]
    fn marks_logged_days_and_flags_unlogged_today() {
        let logged: BTreeSet<_> = [d(2025, 2, 3), d(2025, 2, 4)].into_iter().collect();
        let cal = MonthCalendar::build(d(2025, 2, 1), &logged, d(2025, 2, 10)).unwrap();
        assert_eq!(cal.logged_count(), 2);
        let today = cal.days().find(|c| c.is_today).unwrap();
        assert_eq!(today.mark, DayMark::NeedsReminder);
        assert_eq!(
            cal.days().filter(|c| c.mark == DayMark::NeedsReminder).count(),
            1
        );

        let cal = MonthCalendar::build(d(2025, 2, 1), &logged, d(2025, 2, 4)).unwrap();
        assert!(cal.days().all(|c| c.mark != DayMark::NeedsReminder));
        assert!(cal.render().contains("[ 4●"));
    }

    #[test]
    fn reminder_lines() {
        let today = d(2025, 6, 1);
        assert_eq!(reminder_message(today, today, true), "今天已完成記帳");
        assert!(reminder_message(today, today, false).starts_with("今天尚未記帳"));
        assert_eq!(
            reminder_message(d(2025, 5, 31), today, false),
            "2025/05/31 沒有記帳紀錄"
        );
    }

    #[test]
    fn review_time_normalizes() {
        assert_eq!(validate_review_time(" 07:05 ").unwrap(), "07:05");
        assert!(validate_review_time("noon").is_err());
    }
}
