//! Company and period selection passed explicitly into batch operations.

use crate::core::transaction::{RawTransaction, SourceEntity};
use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(anyhow!("Period end {end} is before start {start}"));
        }
        Ok(Self { start, end })
    }

    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start,
            end: next.pred_opt()?,
        })
    }

    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole_month = Period::month(self.start.year(), self.start.month()) == Some(*self);
        if whole_month {
            write!(f, "{}", self.start.format("%Y-%m"))
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    /// Accepts `YYYY`, `YYYY-MM` or `YYYY-MM-DD..YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
                .with_context(|| format!("Invalid period start: {start}"))?;
            let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
                .with_context(|| format!("Invalid period end: {end}"))?;
            return Period::new(start, end);
        }

        match s.split_once('-') {
            Some((year, month)) => {
                let year: i32 = year
                    .parse()
                    .with_context(|| format!("Invalid period year: {s}"))?;
                let month: u32 = month
                    .parse()
                    .with_context(|| format!("Invalid period month: {s}"))?;
                Period::month(year, month).ok_or_else(|| anyhow!("Invalid period: {s}"))
            }
            None => {
                let year: i32 = s
                    .parse()
                    .with_context(|| format!("Invalid period year: {s}"))?;
                Period::year(year).ok_or_else(|| anyhow!("Invalid period: {s}"))
            }
        }
    }
}

/// Selection of which transactions a batch operation looks at.
///
/// An empty context includes everything. With a period set, undated
/// transactions are excluded since they cannot be attributed to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingContext {
    pub company: Option<String>,
    pub period: Option<Period>,
}

impl ReportingContext {
    pub fn new(company: Option<String>, period: Option<Period>) -> Self {
        Self { company, period }
    }

    pub fn includes(&self, raw: &RawTransaction) -> bool {
        if let Some(company) = &self.company {
            if SourceEntity::parse(&raw.source).company() != company {
                return false;
            }
        }

        match (&self.period, raw.date) {
            (Some(period), Some(date)) => period.contains(date),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}
