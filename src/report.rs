use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use chrono::{Datelike, NaiveDateTime};
use itertools::Itertools;
use serde::Serialize;
use crate::entities::{MediaType, Record};
use crate::error::MediaLogError;
use crate::filter::ALL;

pub const TOP_TAGS_LIMIT: usize = 18;
pub const EMPTY_SENTINEL: &str = "—";

/// A calendar year, optionally narrowed to one month.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportWindow {
    pub year: i32,
    pub month: Option<u32>,
}

impl ReportWindow {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Result<Self, MediaLogError> {
        if !(1..=12).contains(&month) {
            return Err(MediaLogError::InvalidMonth(month.to_string()));
        }
        Ok(Self { year, month: Some(month) })
    }

    /// `month` is `"all"` (or empty) for a yearly window, else `1`-`12`.
    pub fn parse(year: i32, month: &str) -> Result<Self, MediaLogError> {
        let month = month.trim();
        if month.is_empty() || month == ALL {
            return Ok(Self::year(year));
        }
        let number = month.parse::<u32>().map_err(|_| MediaLogError::InvalidMonth(month.to_string()))?;
        Self::month(year, number)
    }

    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        date.year() == self.year && self.month.map_or(true, |m| date.month() == m)
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{}-{:02} (monthly)", self.year, month),
            None => write!(f, "{} (yearly)", self.year),
        }
    }
}

/// One value per known media type.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct PerType<T> {
    pub book: T,
    pub movie: T,
    pub podcast: T,
    pub song: T,
}

impl<T> PerType<T> {
    pub fn get_mut(&mut self, media_type: &MediaType) -> Option<&mut T> {
        match media_type {
            MediaType::Book => Some(&mut self.book),
            MediaType::Movie => Some(&mut self.movie),
            MediaType::Podcast => Some(&mut self.podcast),
            MediaType::Song => Some(&mut self.song),
            MediaType::Other(_) => None,
        }
    }

    pub fn values(&self) -> [&T; 4] {
        [&self.book, &self.movie, &self.podcast, &self.song]
    }
}

pub type TypeCounts = PerType<usize>;

impl TypeCounts {
    /// Counts a record's type; unknown types are ignored.
    pub fn record(&mut self, media_type: &MediaType) {
        if let Some(count) = self.get_mut(media_type) {
            *count += 1;
        }
    }

    pub fn sum(&self) -> usize {
        self.values().into_iter().sum()
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct RatingTally {
    pub sum: f64,
    pub count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Report {
    pub window: ReportWindow,
    pub records: Vec<Record>,
    pub total: usize,
    pub count_by_type: TypeCounts,
    pub rating_by_type: PerType<RatingTally>,
    pub average_rating: Option<f64>,
    pub total_minutes: f64,
    pub top_tags: Vec<TagCount>,
}

impl Report {
    pub fn compute(records: &[Record], window: ReportWindow) -> Self {
        let mut dated = records.iter()
            .filter_map(|x| x.completion_date().map(|date| (date, x)))
            .filter(|(date, _)| window.contains(date))
            .collect::<Vec<(NaiveDateTime, &Record)>>();
        dated.sort_by(|a, b| b.0.cmp(&a.0));
        let records = dated.into_iter().map(|(_, x)| x).collect::<Vec<&Record>>();

        let mut count_by_type = TypeCounts::default();
        let mut rating_by_type = PerType::<RatingTally>::default();
        let mut total_minutes = 0.0;
        for record in &records {
            count_by_type.record(&record.media_type);
            if let (Some(rating), Some(tally)) = (record.rating, rating_by_type.get_mut(&record.media_type)) {
                tally.sum += rating;
                tally.count += 1;
            }
            total_minutes += record.duration_min;
        }

        let rating_sum: f64 = rating_by_type.values().iter().map(|x| x.sum).sum();
        let rating_count: usize = rating_by_type.values().iter().map(|x| x.count).sum();
        let average_rating = if rating_count > 0 { Some(rating_sum / rating_count as f64) } else { None };

        Self {
            window,
            total: records.len(),
            top_tags: top_tags(&records, TOP_TAGS_LIMIT),
            records: records.into_iter().cloned().collect(),
            count_by_type,
            rating_by_type,
            average_rating,
            total_minutes,
        }
    }

    pub fn average_rating_text(&self) -> String {
        match self.average_rating {
            Some(rating) => format!("{:.2}", rating),
            None => EMPTY_SENTINEL.to_string(),
        }
    }

    pub fn total_minutes_text(&self) -> String {
        if self.total_minutes > 0.0 {
            format_minutes(self.total_minutes)
        } else {
            EMPTY_SENTINEL.to_string()
        }
    }

    /// E.g. `1h 30m`; the sentinel when nothing was recorded.
    pub fn total_time_humanized(&self) -> String {
        humanize_minutes(self.total_minutes).unwrap_or_else(|| EMPTY_SENTINEL.to_string())
    }
}

/// Tag frequency, most frequent first; ties keep first-encounter order.
pub fn top_tags(records: &[&Record], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for tag in records.iter().flat_map(|x| x.clean_tags()) {
        match positions.get(tag) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(tag, counts.len());
                counts.push(TagCount { tag: tag.to_string(), count: 1 });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Distinct years of dated records, newest first; the fallback year when none exist.
pub fn report_years(records: &[Record], fallback_year: i32) -> Vec<i32> {
    let years = records.iter()
        .filter_map(|x| x.completion_date())
        .map(|x| x.year())
        .unique()
        .sorted_by(|a, b| b.cmp(a))
        .collect::<Vec<i32>>();
    if years.is_empty() {
        vec![fallback_year]
    } else {
        years
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{}", minutes as i64)
    } else {
        format!("{:.1}", minutes)
    }
}

pub fn humanize_minutes(minutes: f64) -> Option<String> {
    if minutes <= 0.0 {
        return None;
    }
    let seconds = (minutes * 60.0).round() as u64;
    Some(humantime::format_duration(Duration::from_secs(seconds)).to_string())
}
