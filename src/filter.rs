use serde::Serialize;
use crate::entities::{MediaType, Record};
use crate::utils::str_utils::StringExtensions;

pub const ALL: &str = "all";

/// A single filter criterion: either inactive (`All`) or pinned to one value.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(x) => Some(x),
        }
    }
}

impl<T: for<'a> From<&'a str>> Selection<T> {
    /// Reads a raw UI value; empty or `"all"` means no restriction.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL {
            Selection::All
        } else {
            Selection::Only(T::from(raw))
        }
    }
}

/// Current catalog filter. Every transition returns a new state.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    media_type: Selection<MediaType>,
    status: Selection<String>,
    tag: Selection<String>,
    keyword: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(self, media_type: Selection<MediaType>) -> Self {
        Self { media_type, ..self }
    }

    pub fn with_status(self, status: Selection<String>) -> Self {
        Self { status, ..self }
    }

    pub fn with_tag(self, tag: Selection<String>) -> Self {
        Self { tag, ..self }
    }

    pub fn with_keyword(self, keyword: &str) -> Self {
        Self { keyword: keyword.normalize(), ..self }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn media_type(&self) -> &Selection<MediaType> {
        &self.media_type
    }

    pub fn status(&self) -> &Selection<String> {
        &self.status
    }

    pub fn tag(&self) -> &Selection<String> {
        &self.tag
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Tag to highlight in a tag cloud, if any.
    pub fn active_tag(&self) -> Option<&str> {
        self.tag.as_only().map(|x| x.as_str())
    }

    pub fn is_identity(&self) -> bool {
        self.media_type.is_all() && self.status.is_all() && self.tag.is_all() && self.keyword.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Selection::Only(media_type) = &self.media_type {
            if &record.media_type != media_type {
                return false;
            }
        }
        if let Selection::Only(status) = &self.status {
            if record.trimmed_status() != status.as_str() {
                return false;
            }
        }
        if let Selection::Only(tag) = &self.tag {
            if !record.has_tag(tag) {
                return false;
            }
        }
        if self.keyword.is_empty() {
            return true;
        }
        record.search_text().contains(&self.keyword)
    }

    /// Records passing the filter, in input order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|x| self.matches(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(media_type: &str, status: &str, tags: &[&str]) -> Record {
        Record {
            media_type: MediaType::from(media_type),
            status: status.to_string(),
            tags: tags.iter().map(|x| x.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_identity_filter_matches_everything() {
        let filter = FilterState::new();
        assert!(filter.is_identity());
        assert!(filter.matches(&Record::default()));
        assert!(filter.matches(&record("comic", "", &[])));
    }

    #[test]
    fn test_type_filter() {
        let filter = FilterState::new().with_type(Selection::Only(MediaType::Book));
        assert!(filter.matches(&record("book", "", &[])));
        assert!(!filter.matches(&record("movie", "", &[])));
        assert!(!filter.matches(&record("Book", "", &[])));
    }

    #[test]
    fn test_status_filter_compares_trimmed_status() {
        let filter = FilterState::new().with_status(Selection::parse("done"));
        assert!(filter.matches(&record("book", " done ", &[])));
        assert!(!filter.matches(&record("book", "done-ish", &[])));
        assert!(!filter.matches(&record("book", "", &[])));
    }

    #[test]
    fn test_tag_filter_is_exact_membership() {
        let filter = FilterState::new().with_tag(Selection::parse("sci-fi"));
        assert!(filter.matches(&record("book", "", &["classic", "sci-fi"])));
        assert!(!filter.matches(&record("book", "", &["sci-fi-noir"])));
        assert!(!filter.matches(&record("book", "", &[])));
        assert_eq!(filter.active_tag(), Some("sci-fi"));
    }

    #[test]
    fn test_keyword_is_normalized_and_searches_all_text_fields() {
        let filter = FilterState::new().with_keyword("  HERBERT ");
        assert_eq!(filter.keyword(), "herbert");
        let dune = Record { creator: "Frank Herbert".to_string(), ..Default::default() };
        assert!(filter.matches(&dune));

        let by_tag = FilterState::new().with_keyword("noir");
        assert!(by_tag.matches(&record("movie", "", &["neo-noir"])));
        let by_status = FilterState::new().with_keyword("progress");
        assert!(by_status.matches(&record("book", "In Progress", &[])));
        assert!(!by_status.matches(&record("book", "done", &[])));
    }

    #[test]
    fn test_criteria_are_a_conjunction() {
        let filter = FilterState::new()
            .with_type(Selection::parse("book"))
            .with_tag(Selection::parse("sci-fi"));
        assert!(filter.matches(&record("book", "", &["sci-fi"])));
        assert!(!filter.matches(&record("movie", "", &["sci-fi"])));
        assert!(!filter.matches(&record("book", "", &["fantasy"])));
    }

    #[test]
    fn test_parse_all_sentinel() {
        assert_eq!(Selection::<String>::parse("all"), Selection::All);
        assert_eq!(Selection::<String>::parse(""), Selection::All);
        assert_eq!(Selection::<MediaType>::parse("podcast"), Selection::Only(MediaType::Podcast));
        assert_eq!(Selection::<MediaType>::parse(" all "), Selection::All);
    }

    #[test]
    fn test_reset_restores_identity() {
        let filter = FilterState::new()
            .with_type(Selection::parse("song"))
            .with_status(Selection::parse("done"))
            .with_tag(Selection::parse("jazz"))
            .with_keyword("blue");
        assert!(!filter.is_identity());
        assert!(filter.reset().is_identity());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let records = vec![
            record("book", "done", &["a"]),
            record("movie", "done", &["a"]),
            record("book", "todo", &["b"]),
        ];
        let filter = FilterState::new().with_status(Selection::parse("done"));
        let first = filter.apply(&records);
        let second = filter.apply(&records);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
