use thiserror::Error;

use crate::catalog::levels::LevelCatalog;

/// Levels compiled into the binary, served when the catalog document is missing.
const DEFAULT_LEVELS: &str = include_str!("../../data/default_levels.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog request failed with HTTP status {0}")]
    Status(u16),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no levels")]
    Empty,
}

/// Where the catalog document comes from (network, file, fixture).
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch the raw catalog document.
    async fn fetch_text(&self) -> Result<String, CatalogError>;
}

/// Load the catalog, falling back to the embedded levels on any failure.
/// Never retries and never fails.
pub async fn load<S: CatalogSource>(source: &S) -> LevelCatalog {
    match try_load(source).await {
        Ok(catalog) => {
            log::info!("catalog: loaded {} level(s)", catalog.len());
            catalog
        }
        Err(e) => {
            log::warn!("catalog: {e}; using embedded default levels");
            default_catalog()
        }
    }
}

async fn try_load<S: CatalogSource>(source: &S) -> Result<LevelCatalog, CatalogError> {
    let text = source.fetch_text().await?;
    let catalog = LevelCatalog::from_json(&text)?;
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(catalog)
}

/// The embedded default catalog.
pub fn default_catalog() -> LevelCatalog {
    LevelCatalog::from_json(DEFAULT_LEVELS).unwrap_or_else(|e| {
        log::error!("catalog: embedded levels are corrupt: {e}");
        LevelCatalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PartOfSpeech;

    struct Fixture(Option<&'static str>);

    impl CatalogSource for Fixture {
        async fn fetch_text(&self) -> Result<String, CatalogError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| CatalogError::Unavailable("no such file".into()))
        }
    }

    #[test]
    fn embedded_levels_parse() {
        let catalog = default_catalog();
        let level = catalog.level("1").expect("level 1 is embedded");
        assert_eq!(level.len(), 41);
        assert_eq!(level.words[0].word, "anticipate");
        assert_eq!(level.words[0].part_of_speech, PartOfSpeech::Verb);
        assert_eq!(level.words[1].part_of_speech, PartOfSpeech::Adjective);
    }

    #[tokio::test]
    async fn uses_the_fetched_document() {
        let source = Fixture(Some(r#"{ "A": [{ "word": "mitigate", "pos": "verb" }] }"#));
        let catalog = load(&source).await;
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["A"]);
    }

    #[tokio::test]
    async fn missing_document_falls_back_to_defaults() {
        let catalog = load(&Fixture(None)).await;
        assert_eq!(catalog, default_catalog());
    }

    #[tokio::test]
    async fn malformed_or_empty_document_falls_back_to_defaults() {
        assert_eq!(load(&Fixture(Some("<html>404</html>"))).await, default_catalog());
        assert_eq!(load(&Fixture(Some("{}"))).await, default_catalog());
    }
}
