use std::cmp::Ordering;
use crate::entities::Record;

/// Dated records first, newest first; undated ones follow by descending year.
pub fn compare_for_display(a: &Record, b: &Record) -> Ordering {
    match (a.completion_date(), b.completion_date()) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.numeric_year().total_cmp(&a.numeric_year()),
    }
}

/// Stable sort, so records with equal keys keep their input order.
pub fn sort_for_display(records: &mut [&Record]) {
    records.sort_by(|a, b| compare_for_display(a, b));
}
