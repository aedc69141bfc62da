use anyhow::{bail, Context};
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;
use crate::catalog::Catalog;
use crate::client::{LoadState, MediaLogClient};
use crate::config::{self, AppConfig};
use crate::entities::Record;
use crate::filter::{FilterState, Selection};
use crate::options::FilterOptions;
use crate::report::{Report, ReportWindow};
use crate::stats::QuickStats;
use crate::storage::FileStorage;
use crate::utils::collation_utils::TextCollator;

const NO_MATCHES: &str = "No matching records. Try another type, tag or status, or clear the keyword.";
const NO_DATED_RECORDS: &str = "No records with a completion date in this period.";

pub async fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let client = MediaLogClient::new(FileStorage::new(config.data_path.clone()))
        .with_collation_locale(&config.collation_locale);
    match client.load().await {
        LoadState::Ready(catalog) => Ok(catalog),
        LoadState::Unavailable(message) => bail!(message),
    }
}

pub fn build_filter(media_type: Option<&str>, status: Option<&str>, tag: Option<&str>, keyword: Option<&str>) -> FilterState {
    FilterState::new()
        .with_type(Selection::parse(media_type.unwrap_or_default()))
        .with_status(Selection::parse(status.unwrap_or_default()))
        .with_tag(Selection::parse(tag.unwrap_or_default()))
        .with_keyword(keyword.unwrap_or_default())
}

pub async fn list_records(config: AppConfig, filter: FilterState, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(&config).await?;
    let records = catalog.query(&filter);
    if json {
        return print_json(&records);
    }
    println!("{}", format_record_list(&records));
    println!("{} {}", "Matches:".bold(), records.len());
    Ok(())
}

pub async fn show_options(config: AppConfig, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(&config).await?;
    if json {
        return print_json(catalog.options());
    }
    println!("{}", format_options(catalog.options()));
    Ok(())
}

pub async fn show_stats(config: AppConfig, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(&config).await?;
    let stats = catalog.quick_stats(config.done_markers.as_slice());
    if json {
        return print_json(&stats);
    }
    println!("{}", format_quick_stats(&stats));
    Ok(())
}

pub async fn show_report(config: AppConfig, year: Option<i32>, month: &str, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(&config).await?;
    let year = year.unwrap_or_else(|| catalog.default_window().year);
    let window = ReportWindow::parse(year, month)?;
    let report = catalog.report(window);
    if json {
        return print_json(&report);
    }
    println!("{}", format_report(&report));
    Ok(())
}

pub fn get_config_value(config: AppConfig, key: &str) -> anyhow::Result<()> {
    match key {
        "data-path" => println!("Data path: {}", config.data_path.display()),
        "port" => match config.port {
            Some(port) => println!("Port: {}", port),
            None => println!("Port: (random)"),
        },
        "done-markers" => println!("Done markers: {}", config.done_markers.join(",")),
        "collation-locale" => println!("Collation locale: {}", config.collation_locale),
        _ => bail!("Invalid key: {}", key),
    }
    Ok(())
}

pub fn set_config_value(mut config: AppConfig, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "data-path" => {
            let path = std::path::PathBuf::from(value);
            if !path.is_file() {
                bail!("File does not exist: {:?}", path);
            }
            let path = path.canonicalize().with_context(|| format!("Invalid path: {}", value))?;
            config.file_config.data_path = Some(path.display().to_string());
        }
        "port" => {
            let port = value.parse::<u16>().with_context(|| format!("Invalid port: {}", value))?;
            config.file_config.port = Some(port);
        }
        "done-markers" => {
            let markers = value.split(',').map(|x| x.trim()).filter(|x| !x.is_empty()).map(|x| x.to_string()).collect::<Vec<String>>();
            if markers.is_empty() {
                bail!("At least one done marker is required");
            }
            config.file_config.done_markers = Some(markers);
        }
        "collation-locale" => {
            TextCollator::new(value)?;
            config.file_config.collation_locale = Some(value.trim().to_string());
        }
        _ => bail!("Invalid key: {}", key),
    }
    config::write_file_config(&config.config_path, &config.file_config)?;
    println!("{} set to: {:?}", key, value);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn format_record(record: &Record) -> String {
    let title = if record.title.is_empty() { "(untitled)" } else { record.title.as_str() };
    let status = match record.trimmed_status() {
        "" => "unmarked",
        status => status,
    };
    let mut header = format!("{} [{}] [{}]", title.bold(), record.media_type.label().cyan(), status.yellow());
    let date = record.date.trim();
    if !date.is_empty() {
        header.push_str(&format!(" [{}]", date));
    }
    let mut lines = vec![
        header,
        format!("  {} · {} · {}", record.creator, record.year, record.stars()),
    ];
    if !record.note.is_empty() {
        lines.push(format!("  {}", record.note.dimmed()));
    }
    if !record.tags.is_empty() {
        lines.push(format!("  {}", record.tags.iter().map(|x| format!("#{}", x)).join(" ").green()));
    }
    if !record.link.is_empty() {
        lines.push(format!("  {}", record.link.underline()));
    }
    lines.join("\n")
}

pub fn format_record_list(records: &[&Record]) -> String {
    if records.is_empty() {
        return NO_MATCHES.to_string();
    }
    records.iter().map(|x| format_record(x)).join("\n\n")
}

pub fn format_options(options: &FilterOptions) -> String {
    let tags = if options.tags.is_empty() { "(none)".to_string() } else { options.tags.join(", ") };
    let statuses = if options.statuses.is_empty() { "(none)".to_string() } else { options.statuses.join(", ") };
    format!("{} all, {}\n{} all, {}", "Tags:".bold(), tags, "Statuses:".bold(), statuses)
}

pub fn format_quick_stats(stats: &QuickStats) -> String {
    let counts = &stats.count_by_type;
    [
        format!("{} {}", "Total entries:".bold(), stats.total),
        format!("{} {}", "Completed (dated):".bold(), stats.completed),
        format!("{} {} / {} / {} / {}", "Books / Movies / Podcasts / Songs:".bold(), counts.book, counts.movie, counts.podcast, counts.song),
        format!("{} {}", "Recorded time (minutes):".bold(), stats.total_minutes_text()),
    ]
    .join("\n")
}

pub fn format_report(report: &Report) -> String {
    let counts = &report.count_by_type;
    let mut lines = vec![
        format!("{} {}", "Report:".bold(), report.window),
        format!("{} {} (records with a completion date)", "Completed:".bold(), report.total),
        format!("{} {} / {}", "Books / Movies:".bold(), counts.book, counts.movie),
        format!("{} {} / {}", "Podcasts / Songs:".bold(), counts.podcast, counts.song),
        format!("{} {}", "Average rating:".bold(), report.average_rating_text()),
    ];
    let minutes = if report.total_minutes > 0.0 {
        format!("{} ({})", report.total_minutes_text(), report.total_time_humanized())
    } else {
        report.total_minutes_text()
    };
    lines.push(format!("{} {}", "Time invested (minutes):".bold(), minutes));
    let top_tags = if report.top_tags.is_empty() {
        "(none)".to_string()
    } else {
        report.top_tags.iter().map(|x| format!("{} · {}", x.tag, x.count)).join(", ")
    };
    lines.push(format!("{} {}", "Top tags:".bold(), top_tags));
    lines.push(String::new());
    if report.records.is_empty() {
        lines.push(NO_DATED_RECORDS.to_string());
    } else {
        lines.extend(report.records.iter().map(format_report_line));
    }
    lines.join("\n")
}

fn format_report_line(record: &Record) -> String {
    format!(
        "{} {} · {} · {} · {} · {}",
        record.date.trim(),
        record.title.bold(),
        record.creator,
        record.year,
        record.status,
        record.stars()
    )
}
