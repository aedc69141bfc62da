use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::entities::MediaType;
use crate::utils::date_utils::parse_date;
use crate::utils::str_utils::StringExtensions;
use crate::utils::value_utils::ValueExtensions;

pub const MAX_RATING: f64 = 5.0;

/// One logged media item.
///
/// Every field is coerced on the way in: a record with missing or mistyped
/// fields still loads, with blanks where the data was unusable.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(from = "Value")]
pub struct Record {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub creator: String,
    pub note: String,
    pub status: String,
    pub date: String,
    pub link: String,
    pub cover: String,
    pub year: String,
    pub rating: Option<f64>,
    pub duration_min: f64,
    pub tags: Vec<String>,
}

impl From<&Value> for Record {
    fn from(value: &Value) -> Self {
        let field = |key: &str| value.get(key).unwrap_or(&Value::Null);
        Self {
            media_type: MediaType::from(field("type").to_text().as_str()),
            title: field("title").to_text(),
            creator: field("creator").to_text(),
            note: field("note").to_text(),
            status: field("status").to_text(),
            date: field("date").to_text(),
            link: field("link").to_text(),
            cover: field("cover").to_text(),
            year: field("year").to_text(),
            rating: field("rating").to_number(),
            duration_min: field("duration_min").to_number().unwrap_or(0.0),
            tags: field("tags").to_text_vec(),
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Record::from(&value)
    }
}

impl Record {
    pub fn completion_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }

    pub fn has_completion_date(&self) -> bool {
        self.completion_date().is_some()
    }

    /// Year marker used when there is no completion date. Non-numeric is 0.
    pub fn numeric_year(&self) -> f64 {
        self.year.trim().parse::<f64>().ok().filter(|x| x.is_finite()).unwrap_or(0.0)
    }

    pub fn trimmed_status(&self) -> &str {
        self.status.trim()
    }

    /// Whole stars to display, clamped into `0..=5`.
    pub fn star_count(&self) -> usize {
        self.rating.unwrap_or(0.0).clamp(0.0, MAX_RATING).floor() as usize
    }

    pub fn stars(&self) -> String {
        let filled = self.star_count();
        format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_RATING as usize - filled))
    }

    /// Exact (whitespace-trimmed) membership, never a substring match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.clean_tags().any(|x| x == tag)
    }

    /// Trimmed, non-empty tags in record order, duplicates included.
    pub fn clean_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|x| x.trim()).filter(|x| !x.is_empty())
    }

    /// Lower-cased text searched by the keyword filter.
    pub fn search_text(&self) -> String {
        [
            self.title.as_str(),
            self.creator.as_str(),
            self.note.as_str(),
            self.status.as_str(),
            self.tags.join(" ").as_str(),
        ]
        .iter()
        .map(|x| x.normalize())
        .join(" | ")
    }
}
