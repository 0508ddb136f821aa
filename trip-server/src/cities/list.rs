//! City list loading and search.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::CityListError;

/// A city known to the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub country: String,
    pub name: String,
}

impl City {
    /// Display label, e.g. "Seoul, South Korea".
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Parse a city list.
///
/// Each non-blank line is `country,city[,...]`. Fields past the second are
/// ignored, and lines with fewer than two fields are skipped.
pub fn parse_cities(text: &str) -> Vec<City> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| {
            let mut fields = line.split(',');
            let country = fields.next()?.trim();
            let name = fields.next()?.trim();
            Some(City {
                country: country.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// City with pre-lowercased search keys.
#[derive(Debug, Clone)]
struct Entry {
    city: City,
    name_key: String,
    country_key: String,
}

impl Entry {
    fn new(city: City) -> Self {
        Self {
            name_key: city.name.to_lowercase(),
            country_key: city.country.to_lowercase(),
            city,
        }
    }
}

#[derive(Debug, Default)]
struct Contents {
    raw: String,
    entries: Vec<Entry>,
}

impl Contents {
    fn from_text(raw: String) -> Self {
        let entries = parse_cities(&raw).into_iter().map(Entry::new).collect();
        Self { raw, entries }
    }
}

/// Thread-safe city list backed by a file.
///
/// Clones share the same contents, so a background reload is visible to
/// every handle.
#[derive(Clone)]
pub struct CityList {
    inner: Arc<RwLock<Arc<Contents>>>,
    path: PathBuf,
}

impl CityList {
    /// Create an empty list that will read from `path` on [`reload`](Self::reload).
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Contents::default()))),
            path: path.into(),
        }
    }

    /// Load the list from `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CityListError> {
        let list = Self::empty(path);
        list.reload().await?;
        Ok(list)
    }

    /// Re-read the file.
    ///
    /// On success the contents are replaced and the city count returned. On
    /// failure the existing contents are kept.
    pub async fn reload(&self) -> Result<usize, CityListError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CityListError::Read {
                path: self.path.clone(),
                source,
            })?;

        let contents = Arc::new(Contents::from_text(raw));
        let count = contents.entries.len();

        let mut guard = self.inner.write().await;
        *guard = contents;

        Ok(count)
    }

    async fn snapshot(&self) -> Arc<Contents> {
        self.inner.read().await.clone()
    }

    /// Suggest cities matching `query`, case-insensitively.
    ///
    /// Cities whose name starts with the query come first, then cities whose
    /// name or country contains it. File order is kept within each group.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<City> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let contents = self.snapshot().await;
        let prefix = contents
            .entries
            .iter()
            .filter(|e| e.name_key.starts_with(&query));
        let contains = contents.entries.iter().filter(|e| {
            !e.name_key.starts_with(&query)
                && (e.name_key.contains(&query) || e.country_key.contains(&query))
        });

        prefix
            .chain(contains)
            .take(limit)
            .map(|e| e.city.clone())
            .collect()
    }

    /// The file contents as last loaded.
    pub async fn raw(&self) -> String {
        self.snapshot().await.raw.clone()
    }

    /// Get the number of cities in the list.
    pub async fn len(&self) -> usize {
        self.snapshot().await.entries.len()
    }

    /// Check if the list is empty.
    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.entries.is_empty()
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CITIES: &str = "\
France,Paris,48.8566,2.3522
France,Marseille,43.2965,5.3698
South Korea,Seoul,37.5665,126.9780

Japan,Tokyo,35.6762,139.6503
Japan,Osaka,34.6937,135.5023
Portugal,Porto,41.1579,-8.6291
Malformed line
";

    async fn list_with(text: &str) -> (tempfile::TempDir, CityList) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        std::fs::write(&path, text).unwrap();
        let list = CityList::load(&path).await.unwrap();
        (dir, list)
    }

    #[test]
    fn parse_uses_first_two_fields() {
        let cities = parse_cities(CITIES);

        assert_eq!(cities.len(), 6);
        assert_eq!(
            cities[2],
            City {
                country: "South Korea".into(),
                name: "Seoul".into(),
            }
        );
        assert_eq!(cities[2].label(), "Seoul, South Korea");
    }

    #[test]
    fn parse_trims_fields_and_skips_short_lines() {
        let cities = parse_cities("  Italy ,  Rome \nnocomma\n\n  \nSpain,Madrid");

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].country, "Italy");
        assert_eq!(cities[0].name, "Rome");
        assert_eq!(cities[1].name, "Madrid");
    }

    #[tokio::test]
    async fn load_counts_cities() {
        let (_dir, list) = list_with(CITIES).await;
        assert_eq!(list.len().await, 6);
        assert!(!list.is_empty().await);
        assert_eq!(list.raw().await, CITIES);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let result = CityList::load("/nonexistent/cities.csv").await;
        assert!(matches!(result, Err(CityListError::Read { .. })));
    }

    #[tokio::test]
    async fn search_ranks_prefix_matches_first() {
        let (_dir, list) = list_with(CITIES).await;

        let names: Vec<String> = list
            .search("po", 10)
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        // Porto starts with "po"; Portugal only matches by country.
        assert_eq!(names, ["Porto"]);

        let names: Vec<String> = list
            .search("o", 10)
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Osaka", "Seoul", "Tokyo", "Porto"]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_matches_country() {
        let (_dir, list) = list_with(CITIES).await;

        let names: Vec<String> = list
            .search("JAPAN", 10)
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Tokyo", "Osaka"]);
    }

    #[tokio::test]
    async fn search_respects_limit_and_blank_query() {
        let (_dir, list) = list_with(CITIES).await;

        assert_eq!(list.search("a", 2).await.len(), 2);
        assert!(list.search("   ", 10).await.is_empty());
        assert!(list.search("paris", 0).await.is_empty());
    }

    #[tokio::test]
    async fn reload_replaces_contents() {
        let (dir, list) = list_with(CITIES).await;
        std::fs::write(dir.path().join("cities.csv"), "Italy,Rome\n").unwrap();

        assert_eq!(list.reload().await.unwrap(), 1);
        assert_eq!(list.search("rome", 5).await[0].country, "Italy");
        assert!(list.search("paris", 5).await.is_empty());
    }

    #[tokio::test]
    async fn failed_reload_keeps_contents() {
        let (dir, list) = list_with(CITIES).await;
        let clone = list.clone();
        std::fs::remove_file(dir.path().join("cities.csv")).unwrap();

        assert!(list.reload().await.is_err());
        assert_eq!(clone.len().await, 6);
    }

    #[tokio::test]
    async fn empty_list_has_no_matches() {
        let list = CityList::empty("cities.csv");
        assert!(list.is_empty().await);
        assert!(list.search("paris", 10).await.is_empty());
        assert_eq!(list.path(), Path::new("cities.csv"));
    }
}
