use itertools::Itertools;
use serde::Serialize;
use crate::entities::Record;
use crate::utils::collation_utils::TextCollator;

/// Selectable tag and status values, derived from the full collection.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub tags: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record], collator: &TextCollator) -> Self {
        Self {
            tags: tag_options(records, collator),
            statuses: status_options(records, collator),
        }
    }
}

pub fn tag_options(records: &[Record], collator: &TextCollator) -> Vec<String> {
    collate_unique(records.iter().flat_map(|x| x.clean_tags()), collator)
}

pub fn status_options(records: &[Record], collator: &TextCollator) -> Vec<String> {
    collate_unique(records.iter().map(|x| x.trimmed_status()).filter(|x| !x.is_empty()), collator)
}

fn collate_unique<'a>(values: impl Iterator<Item = &'a str>, collator: &TextCollator) -> Vec<String> {
    values
        .unique()
        .sorted_by(|a, b| collator.compare(a, b))
        .map(|x| x.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterState, Selection};
    use crate::utils::collation_utils::DEFAULT_COLLATION_LOCALE;

    fn zh() -> TextCollator {
        TextCollator::new(DEFAULT_COLLATION_LOCALE).unwrap()
    }

    fn record(status: &str, tags: &[&str]) -> Record {
        Record {
            status: status.to_string(),
            tags: tags.iter().map(|x| x.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tags_are_deduplicated_trimmed_and_sorted() {
        let records = vec![
            record("", &["sci-fi", "Classic", " sci-fi "]),
            record("", &["", "audio", "sci-fi"]),
            record("", &[]),
        ];
        assert_eq!(tag_options(&records, &zh()), vec!["audio", "Classic", "sci-fi"]);
    }

    #[test]
    fn test_statuses_skip_blanks() {
        let records = vec![
            record("done", &[]),
            record("  ", &[]),
            record(" reading ", &[]),
            record("done", &[]),
        ];
        assert_eq!(status_options(&records, &zh()), vec!["done", "reading"]);
    }

    #[test]
    fn test_chinese_options_follow_pinyin_order() {
        let records = vec![
            record("在读", &["中文", "阿城"]),
            record("已读", &["白话"]),
            record("想读", &["阿城"]),
        ];
        assert_eq!(tag_options(&records, &zh()), vec!["阿城", "白话", "中文"]);
        assert_eq!(status_options(&records, &zh()), vec!["想读", "已读", "在读"]);
    }

    #[test]
    fn test_locale_is_configurable() {
        let records = vec![record("", &["Zebra", "apple", "Mango"])];
        let en = TextCollator::new("en").unwrap();
        assert_eq!(tag_options(&records, &en), vec!["apple", "Mango", "Zebra"]);
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(FilterOptions::from_records(&[], &zh()), FilterOptions::default());
    }

    #[test]
    fn test_every_tagged_record_matches_its_own_tag_options() {
        let records = vec![
            record("done", &["sci-fi", "classic"]),
            record("todo", &["jazz"]),
            record("done", &[]),
        ];
        let options = FilterOptions::from_records(&records, &zh());
        for record in records.iter().filter(|x| !x.tags.is_empty()) {
            for tag in &record.tags {
                assert!(options.tags.contains(tag));
                let filter = FilterState::new().with_tag(Selection::parse(tag));
                assert!(filter.matches(record));
            }
        }
        for status in &options.statuses {
            let filter = FilterState::new().with_status(Selection::parse(status));
            assert!(!filter.apply(&records).is_empty());
        }
    }
}
