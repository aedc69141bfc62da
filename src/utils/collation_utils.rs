use std::cmp::Ordering;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use crate::error::MediaLogError;

/// Most logs are kept in Chinese, so option lists follow pinyin order by default.
pub const DEFAULT_COLLATION_LOCALE: &str = "zh";

/// Locale-aware ordering for user-facing option lists.
pub struct TextCollator {
    collator: Collator,
}

impl TextCollator {
    pub fn new(locale: &str) -> Result<Self, MediaLogError> {
        let parsed = locale.trim().parse::<Locale>()
            .map_err(|e| MediaLogError::InvalidLocale(format!("{}: {}", locale, e)))?;
        let collator = Collator::try_new(&(&parsed).into(), CollatorOptions::new())
            .map_err(|e| MediaLogError::InvalidLocale(format!("{}: {}", locale, e)))?;
        Ok(Self { collator })
    }

    /// Collation order, with raw code points breaking ties so the order is total.
    pub fn compare(&self, lhs: &str, rhs: &str) -> Ordering {
        self.collator.compare(lhs, rhs).then_with(|| lhs.cmp(rhs))
    }
}
