use std::io::Write;
use medialog_lib::catalog::Catalog;
use medialog_lib::client::{LoadState, MediaLogClient};
use medialog_lib::entities::MediaType;
use medialog_lib::filter::{FilterState, Selection};
use medialog_lib::report::{ReportWindow, TagCount};
use medialog_lib::storage::{FileStorage, InMemoryStorage};

const SAMPLE: &str = r#"[
    {"type": "book", "title": "Dune", "date": "2024-01-05", "rating": 4, "tags": ["sci-fi"]},
    {"type": "movie", "title": "Heat", "date": "2024-02-10", "rating": 5},
    {"type": "book", "title": "Solaris", "year": "2023"}
]"#;

async fn load(payload: &str) -> Catalog {
    match MediaLogClient::new(InMemoryStorage::new(payload)).load().await {
        LoadState::Ready(catalog) => catalog,
        LoadState::Unavailable(message) => panic!("catalog unavailable: {}", message),
    }
}

fn titles(catalog: &Catalog, filter: &FilterState) -> Vec<String> {
    catalog.query(filter).into_iter().map(|x| x.title.clone()).collect()
}

#[tokio::test]
async fn type_filter_puts_dated_book_first() {
    let catalog = load(SAMPLE).await;
    let filter = FilterState::new().with_type(Selection::Only(MediaType::Book));
    assert_eq!(titles(&catalog, &filter), vec!["Dune", "Solaris"]);
}

#[tokio::test]
async fn tag_filter_yields_tagged_record() {
    let catalog = load(SAMPLE).await;
    let filter = FilterState::new().with_tag(Selection::parse("sci-fi"));
    assert_eq!(titles(&catalog, &filter), vec!["Dune"]);
}

#[tokio::test]
async fn identity_filter_matches_everything_in_display_order() {
    let catalog = load(SAMPLE).await;
    assert_eq!(titles(&catalog, &FilterState::new()), vec!["Heat", "Dune", "Solaris"]);
    let narrowed = FilterState::new().with_keyword("dune").reset();
    assert_eq!(titles(&catalog, &narrowed), vec!["Heat", "Dune", "Solaris"]);
}

#[tokio::test]
async fn yearly_report() {
    let catalog = load(SAMPLE).await;
    let report = catalog.report(ReportWindow::parse(2024, "all").unwrap());
    assert_eq!(report.total, 2);
    assert_eq!(report.count_by_type.book, 1);
    assert_eq!(report.count_by_type.movie, 1);
    assert_eq!(report.count_by_type.sum(), report.total);
    assert_eq!(report.average_rating, Some(4.5));
    assert_eq!(report.top_tags, vec![TagCount { tag: "sci-fi".to_string(), count: 1 }]);
    assert_eq!(report.records.iter().map(|x| x.title.as_str()).collect::<Vec<&str>>(), vec!["Heat", "Dune"]);
}

#[tokio::test]
async fn monthly_report_without_ratings() {
    let catalog = load(r#"[{"type": "song", "date": "2024-03-02", "duration_min": 4}]"#).await;
    let report = catalog.report(ReportWindow::parse(2024, "3").unwrap());
    assert_eq!(report.total, 1);
    assert_eq!(report.average_rating_text(), "—");
    assert!(ReportWindow::parse(2024, "13").is_err());
}

#[tokio::test]
async fn missing_file_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let client = MediaLogClient::new(FileStorage::new(dir.path().join("missing.json")));
    match client.load().await {
        LoadState::Ready(_) => panic!("expected degraded state"),
        LoadState::Unavailable(message) => assert!(message.contains("Failed to read data file")),
    }
}

#[tokio::test]
async fn file_storage_loads_records() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", SAMPLE).unwrap();
    let client = MediaLogClient::new(FileStorage::new(file.path().to_path_buf()));
    let state = client.load().await;
    assert!(state.is_ready());
    if let LoadState::Ready(catalog) = state {
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.options().tags, vec!["sci-fi"]);
        assert_eq!(catalog.report_years().first(), Some(&2024));
    }
}
