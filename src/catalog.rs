use crate::entities::Record;
use crate::filter::FilterState;
use crate::options::FilterOptions;
use crate::report::{current_year, report_years, Report, ReportWindow};
use crate::sorting::sort_for_display;
use crate::stats::QuickStats;
use crate::utils::collation_utils::TextCollator;

/// An immutable snapshot of the log for one load cycle.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    options: FilterOptions,
}

impl Catalog {
    /// Option lists are ordered with `collator`.
    pub fn new(records: Vec<Record>, collator: &TextCollator) -> Self {
        let options = FilterOptions::from_records(&records, collator);
        Self { records, options }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Filtered records in display order.
    pub fn query(&self, filter: &FilterState) -> Vec<&Record> {
        let mut records = filter.apply(&self.records);
        sort_for_display(&mut records);
        records
    }

    pub fn quick_stats<S: AsRef<str>>(&self, done_markers: &[S]) -> QuickStats {
        QuickStats::compute(&self.records, done_markers)
    }

    pub fn report_years(&self) -> Vec<i32> {
        report_years(&self.records, current_year())
    }

    /// Newest year with any completion, all months.
    pub fn default_window(&self) -> ReportWindow {
        let year = self.report_years().first().copied().unwrap_or_else(current_year);
        ReportWindow::year(year)
    }

    pub fn report(&self, window: ReportWindow) -> Report {
        Report::compute(&self.records, window)
    }
}
