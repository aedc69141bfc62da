use log::{error, info};
use crate::catalog::Catalog;
use crate::error::MediaLogError;
use crate::storage::Storage;
use crate::utils::collation_utils::{TextCollator, DEFAULT_COLLATION_LOCALE};

/// Outcome of a load: either a usable catalog or the single degraded state.
#[derive(Debug)]
pub enum LoadState {
    Ready(Catalog),
    Unavailable(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

pub struct MediaLogClient<S: Storage> {
    storage: S,
    collation_locale: String,
}

impl<S: Storage> MediaLogClient<S> {
    pub fn new(storage: S) -> Self {
        Self { storage, collation_locale: DEFAULT_COLLATION_LOCALE.to_string() }
    }

    pub fn with_collation_locale(self, locale: &str) -> Self {
        Self { collation_locale: locale.to_string(), ..self }
    }

    /// Reads a fresh snapshot. Nothing is cached between loads.
    pub async fn try_load(&self) -> Result<Catalog, MediaLogError> {
        let records = self.storage.read_all().await?;
        info!("loaded {} records", records.len());
        let collator = TextCollator::new(&self.collation_locale)?;
        Ok(Catalog::new(records, &collator))
    }

    pub async fn load(&self) -> LoadState {
        match self.try_load().await {
            Ok(catalog) => LoadState::Ready(catalog),
            Err(err) => {
                error!("failed to load records: {}", err);
                LoadState::Unavailable(err.user_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    #[tokio::test]
    async fn test_load_ready() {
        let client = MediaLogClient::new(InMemoryStorage::new(r#"[{"type": "podcast"}]"#));
        match client.load().await {
            LoadState::Ready(catalog) => assert_eq!(catalog.len(), 1),
            LoadState::Unavailable(msg) => panic!("unexpected degraded state: {}", msg),
        }
    }

    #[tokio::test]
    async fn test_load_degrades_on_bad_payload() {
        for payload in ["not json", r#"{"records": []}"#, ""] {
            let client = MediaLogClient::new(InMemoryStorage::new(payload));
            let state = client.load().await;
            assert!(!state.is_ready());
            if let LoadState::Unavailable(msg) = state {
                assert!(!msg.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_options_use_client_locale() {
        let payload = r#"[{"tags": ["中文", "阿城"]}, {"tags": ["白话"]}]"#;
        match MediaLogClient::new(InMemoryStorage::new(payload)).load().await {
            LoadState::Ready(catalog) => assert_eq!(catalog.options().tags, vec!["阿城", "白话", "中文"]),
            LoadState::Unavailable(msg) => panic!("unexpected degraded state: {}", msg),
        }

        let client = MediaLogClient::new(InMemoryStorage::new(payload)).with_collation_locale("not a locale!");
        assert!(matches!(client.try_load().await, Err(MediaLogError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_empty_array_is_not_degraded() {
        let client = MediaLogClient::new(InMemoryStorage::new("[]"));
        assert!(client.load().await.is_ready());
    }
}
