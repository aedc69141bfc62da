use chrono::Month;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use crate::entities::Record;
use crate::filter::{FilterState, Selection, ALL};
use crate::report::{ReportWindow, TagCount};
use crate::utils::hash_utils::MurMurHasher;

pub const TYPE_TABS: [(&str, &str); 5] = [
    (ALL, "All"),
    ("book", "Books"),
    ("movie", "Movies"),
    ("podcast", "Podcasts"),
    ("song", "Songs"),
];

#[derive(Debug, Default, Serialize)]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    /// The "all" sentinel followed by every value.
    pub fn with_all(all_label: &str, values: &[String], current: Option<&str>) -> Vec<SelectOption> {
        let mut options = vec![SelectOption {
            value: ALL.to_string(),
            label: all_label.to_string(),
            selected: current.is_none(),
        }];
        options.extend(values.iter().map(|value| SelectOption {
            value: value.clone(),
            label: value.clone(),
            selected: current == Some(value.as_str()),
        }));
        options
    }
}

#[derive(Debug, Default, Serialize)]
pub struct TagView {
    pub name: String,
    pub href: String,
    pub active: bool,
    pub bg_color: String,
    pub fg_color: String,
}

impl TagView {
    /// A tag chip linking to the catalog narrowed to this tag, keeping the other criteria.
    pub fn create(tag: &str, filter: &FilterState) -> Self {
        let target = filter.clone().with_tag(Selection::Only(tag.to_string()));
        let bg_color = get_bg_color(tag);
        let fg_color = get_fg_color(&bg_color);
        Self {
            name: tag.to_string(),
            href: catalog_href(&target),
            active: filter.active_tag() == Some(tag),
            bg_color,
            fg_color,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct RecordView {
    pub title: String,
    pub type_label: String,
    pub status: String,
    pub date: String,
    pub creator: String,
    pub year: String,
    pub stars: String,
    pub note: String,
    pub link: String,
    pub cover: String,
    pub tags: Vec<TagView>,
}

impl RecordView {
    pub fn create(record: &Record, filter: &FilterState) -> Self {
        let title = if record.title.is_empty() { "(untitled)".to_string() } else { record.title.clone() };
        let status = match record.trimmed_status() {
            "" => "unmarked".to_string(),
            status => status.to_string(),
        };
        Self {
            title,
            type_label: record.media_type.label().to_string(),
            status,
            date: record.date.trim().to_string(),
            creator: record.creator.clone(),
            year: record.year.clone(),
            stars: record.stars(),
            note: record.note.clone(),
            link: record.link.clone(),
            cover: record.cover.clone(),
            tags: record.tags.iter().map(|x| TagView::create(x, filter)).collect(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct TagCountView {
    pub label: String,
    pub bg_color: String,
    pub fg_color: String,
}

impl From<&TagCount> for TagCountView {
    fn from(value: &TagCount) -> Self {
        let bg_color = get_bg_color(&value.tag);
        let fg_color = get_fg_color(&bg_color);
        Self { label: format!("{} · {}", value.tag, value.count), bg_color, fg_color }
    }
}

pub fn type_tabs(filter: &FilterState) -> Vec<LinkView> {
    TYPE_TABS.iter()
        .map(|(value, label)| {
            let selection = Selection::parse(value);
            let active = filter.media_type() == &selection;
            LinkView {
                label: label.to_string(),
                href: catalog_href(&filter.clone().with_type(selection)),
                active,
            }
        })
        .collect()
}

pub fn year_options(years: &[i32], window: &ReportWindow) -> Vec<SelectOption> {
    years.iter()
        .map(|year| SelectOption {
            value: year.to_string(),
            label: year.to_string(),
            selected: *year == window.year,
        })
        .collect()
}

pub fn month_options(window: &ReportWindow) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: ALL.to_string(),
        label: "All months".to_string(),
        selected: window.month.is_none(),
    }];
    options.extend((1..=12u8).map(|month| SelectOption {
        value: format!("{:02}", month),
        label: Month::try_from(month).map(|x| x.name().to_string()).unwrap_or_else(|_| month.to_string()),
        selected: window.month == Some(u32::from(month)),
    }));
    options
}

/// Catalog URL reproducing a filter state; inactive criteria are omitted.
pub fn catalog_href(filter: &FilterState) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(media_type) = filter.media_type().as_only() {
        params.push(("type", media_type.as_str().to_string()));
    }
    if let Some(status) = filter.status().as_only() {
        params.push(("status", status.clone()));
    }
    if let Some(tag) = filter.tag().as_only() {
        params.push(("tag", tag.clone()));
    }
    if !filter.keyword().is_empty() {
        params.push(("q", filter.keyword().to_string()));
    }
    if params.is_empty() {
        return "/".to_string();
    }
    let query = params.iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC)))
        .collect::<Vec<String>>()
        .join("&");
    format!("/?{}", query)
}

pub fn get_bg_color(text: &str) -> String {
    const MAX_VALUE: u128 = 0xFFFFFF;
    let color = MurMurHasher::hash_str(text) % MAX_VALUE;
    format!("#{:06x}", color)
}

pub fn get_fg_color(bg_color: &str) -> String {
    let bg_color = bg_color.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        bg_color.get(range).and_then(|x| u8::from_str_radix(x, 16).ok()).unwrap_or(0) as f32
    };
    let yiq = (channel(0..2) * 299.0 + channel(2..4) * 587.0 + channel(4..6) * 114.0) / 1000.0;
    let fg_color = if yiq >= 128.0 { "black" } else { "white" };
    fg_color.to_string()
}
