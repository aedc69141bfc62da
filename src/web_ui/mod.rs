mod api;
pub mod views;

use std::sync::Arc;
use askama::Template;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_macros::FromRef;
use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::HeaderValue;
use log::info;
use random_port::{PortPicker, Protocol};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::client::{LoadState, MediaLogClient};
use crate::config::AppConfig;
use crate::cli::build_filter;
use crate::filter::FilterState;
use crate::report::ReportWindow;
use crate::storage::FileStorage;
use crate::web_ui::api::ApiError;
use crate::web_ui::views::*;

const STYLES: &str = include_str!("assets/styles.css");

pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let port = match config.port {
        Some(port) => port,
        None => PortPicker::new().protocol(Protocol::Tcp).pick()
            .map_err(|e| anyhow::anyhow!("failed to pick a free port: {:?}", e))?,
    };
    let client = MediaLogClient::new(FileStorage::new(config.data_path.clone()))
        .with_collation_locale(&config.collation_locale);
    let app_state = AppState { config: Arc::new(config), client: Arc::new(client) };

    info!("initializing router...");
    let router = router(app_state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{}", &addr);
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/records", get(api::get_records))
        .route("/options", get(api::get_options))
        .route("/stats", get(api::get_stats))
        .route("/report", get(api::get_report))
        .route("/report/years", get(api::get_report_years))
        .layer(CorsLayer::new().allow_methods(Any).allow_headers(Any).allow_origin(Any));

    Router::new()
        .route("/", get(catalog_page))
        .route("/report", get(report_page))
        .route("/styles.css", get(get_styles))
        .route("/ping", get(ping))
        .nest("/api", api)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Arc<MediaLogClient<FileStorage>>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
    where
        T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {}", err),
            ).into_response(),
        }
    }
}

#[derive(Template)]
#[template(path = "unavailable.html")]
struct UnavailableTemplate {
    message: String,
}

fn unavailable(message: String) -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, HtmlTemplate(UnavailableTemplate { message })).into_response()
}

async fn ping() -> &'static str {
    "pong"
}

async fn get_styles() -> impl IntoResponse {
    let mut response = Response::new(Body::from(STYLES));
    response.headers_mut().insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/css"));
    response
}

#[derive(Deserialize, Debug, Default)]
pub struct CatalogQuery {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
}

impl CatalogQuery {
    pub fn to_filter(&self) -> FilterState {
        build_filter(self.media_type.as_deref(), self.status.as_deref(), self.tag.as_deref(), self.q.as_deref())
    }
}

#[derive(Template)]
#[template(path = "catalog.html")]
struct CatalogTemplate {
    keyword: String,
    media_type: String,
    tabs: Vec<LinkView>,
    status_options: Vec<SelectOption>,
    tag_options: Vec<SelectOption>,
    tag_cloud: Vec<TagView>,
    records: Vec<RecordView>,
    count: usize,
    total: usize,
    completed: usize,
    books: usize,
    movies: usize,
    podcasts: usize,
    songs: usize,
    minutes: String,
}

async fn catalog_page(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let catalog = match state.client.load().await {
        LoadState::Ready(catalog) => catalog,
        LoadState::Unavailable(message) => return unavailable(message),
    };
    let filter = query.to_filter();
    let records = catalog.query(&filter)
        .into_iter()
        .map(|x| RecordView::create(x, &filter))
        .collect::<Vec<RecordView>>();
    let options = catalog.options();
    let stats = catalog.quick_stats(state.config.done_markers.as_slice());

    HtmlTemplate(CatalogTemplate {
        keyword: query.q.clone().unwrap_or_default(),
        media_type: filter.media_type().as_only().map(|x| x.as_str().to_string()).unwrap_or_default(),
        tabs: type_tabs(&filter),
        status_options: SelectOption::with_all("All statuses", &options.statuses, filter.status().as_only().map(|x| x.as_str())),
        tag_options: SelectOption::with_all("All tags", &options.tags, filter.active_tag()),
        tag_cloud: options.tags.iter().map(|x| TagView::create(x, &filter)).collect(),
        count: records.len(),
        records,
        total: stats.total,
        completed: stats.completed,
        books: stats.count_by_type.book,
        movies: stats.count_by_type.movie,
        podcasts: stats.count_by_type.podcast,
        songs: stats.count_by_type.song,
        minutes: stats.total_minutes_text(),
    }).into_response()
}

#[derive(Deserialize, Debug, Default)]
pub struct ReportQuery {
    pub year: Option<i32>,
    pub month: Option<String>,
}

impl ReportQuery {
    pub fn to_window(&self, default_year: i32) -> Result<ReportWindow, ApiError> {
        let year = self.year.unwrap_or(default_year);
        Ok(ReportWindow::parse(year, self.month.as_deref().unwrap_or_default())?)
    }
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    range_text: String,
    year_options: Vec<SelectOption>,
    month_options: Vec<SelectOption>,
    total: usize,
    books: usize,
    movies: usize,
    podcasts: usize,
    songs: usize,
    average_rating: String,
    minutes: String,
    minutes_note: String,
    top_tags: Vec<TagCountView>,
    records: Vec<RecordView>,
}

async fn report_page(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let catalog = match state.client.load().await {
        LoadState::Ready(catalog) => catalog,
        LoadState::Unavailable(message) => return unavailable(message),
    };
    let window = match query.to_window(catalog.default_window().year) {
        Ok(window) => window,
        Err(err) => return err.into_response(),
    };
    let report = catalog.report(window);
    let filter = FilterState::new();
    let minutes_note = if report.total_minutes > 0.0 {
        format!("From duration_min, about {}", report.total_time_humanized())
    } else {
        "No duration_min recorded".to_string()
    };

    HtmlTemplate(ReportTemplate {
        range_text: window.to_string(),
        year_options: year_options(&catalog.report_years(), &window),
        month_options: month_options(&window),
        total: report.total,
        books: report.count_by_type.book,
        movies: report.count_by_type.movie,
        podcasts: report.count_by_type.podcast,
        songs: report.count_by_type.song,
        average_rating: report.average_rating_text(),
        minutes: report.total_minutes_text(),
        minutes_note,
        top_tags: report.top_tags.iter().map(TagCountView::from).collect(),
        records: report.records.iter().map(|x| RecordView::create(x, &filter)).collect(),
    }).into_response()
}
