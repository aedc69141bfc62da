use serde::Serialize;
use crate::entities::Record;
use crate::report::{format_minutes, TypeCounts, EMPTY_SENTINEL};
use crate::utils::str_utils::StringExtensions;

pub const DEFAULT_DONE_MARKERS: &[&str] = &["已", "done", "finished"];

/// Collection-wide summary shown next to the catalog.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct QuickStats {
    pub total: usize,
    pub completed: usize,
    pub count_by_type: TypeCounts,
    pub total_minutes: f64,
}

impl QuickStats {
    /// A record is completed when its status carries a done marker and it has a completion date.
    pub fn compute<S: AsRef<str>>(records: &[Record], done_markers: &[S]) -> Self {
        let markers = done_markers.iter()
            .map(|x| x.as_ref().normalize())
            .filter(|x| !x.is_empty())
            .collect::<Vec<String>>();
        let mut stats = QuickStats { total: records.len(), ..Default::default() };
        for record in records {
            let status = record.status.normalize();
            if markers.iter().any(|x| status.contains(x.as_str())) && record.has_completion_date() {
                stats.completed += 1;
            }
            stats.count_by_type.record(&record.media_type);
            stats.total_minutes += record.duration_min;
        }
        stats
    }

    pub fn total_minutes_text(&self) -> String {
        if self.total_minutes > 0.0 {
            format_minutes(self.total_minutes)
        } else {
            EMPTY_SENTINEL.to_string()
        }
    }
}
