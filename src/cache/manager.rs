//! Cache manager for persisting ASCII art to disk
//!
//! Provides an `ArtCache` that stores art as plain text files with JSON metadata
//! sidecars and a single ordered index. The index is bounded: `save` evicts the
//! oldest entries once the configured capacity is exceeded.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::id::{content_id, validate_id};
use super::index::{ArtRecord, CacheIndex, IndexEntry};
use crate::config::CacheConfig;

/// File name of the cache index
const INDEX_FILE: &str = "metadata.json";

/// Temporary file the index is written to before being renamed into place
const INDEX_TMP_FILE: &str = "metadata.json.tmp";

/// Errors that can occur while reading or writing the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be serialized or parsed
    #[error("Failed to serialize cache record: {0}")]
    Json(#[from] serde_json::Error),

    /// `metadata.json` exists but is not a valid index
    #[error("Cache index {path} is corrupt: {source}")]
    CorruptIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An imported id contains characters other than letters, digits and underscores
    #[error("ID must be alphanumeric (underscores allowed): '{0}'")]
    InvalidId(String),

    /// An imported id is already taken by art on disk
    #[error("Art with ID '{0}' already exists")]
    DuplicateId(String),
}

/// Descriptive fields for a manually imported artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Explicit id; derived from the content hash when `None`
    pub id: Option<String>,
    /// Stored as the record's `prompt`
    pub description: String,
    pub theme: String,
    pub style: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            id: None,
            description: "Manually imported art".to_string(),
            theme: "custom".to_string(),
            style: "ASCII art".to_string(),
        }
    }
}

/// Bounded on-disk store of ASCII art
///
/// Layout of the cache directory:
/// - `<id>.txt` holds the raw art
/// - `<id>.json` holds an [`ArtRecord`]
/// - `metadata.json` holds the [`CacheIndex`] in insertion order
#[derive(Debug)]
pub struct ArtCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Maximum number of entries retained by `save`
    capacity: usize,
    /// In-memory copy of `metadata.json`
    index: CacheIndex,
}

impl ArtCache {
    /// Opens the cache described by `config`, creating the directory if needed
    ///
    /// # Returns
    /// * `Ok(ArtCache)` with the index loaded from disk (empty if no index exists yet)
    /// * `Err(CacheError)` if the directory cannot be created or the index is unreadable
    pub fn open(config: &CacheConfig) -> Result<Self, CacheError> {
        fs::create_dir_all(&config.dir)?;
        let index = Self::load_index(&config.dir)?;
        tracing::debug!(
            dir = %config.dir.display(),
            entries = index.items.len(),
            capacity = config.capacity,
            "opened art cache"
        );
        Ok(Self {
            cache_dir: config.dir.clone(),
            capacity: config.capacity,
            index,
        })
    }

    /// Creates a cache in `cache_dir` with the given capacity
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf, capacity: usize) -> Result<Self, CacheError> {
        Self::open(&CacheConfig {
            dir: cache_dir,
            capacity,
        })
    }

    fn load_index(dir: &Path) -> Result<CacheIndex, CacheError> {
        let path = dir.join(INDEX_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CacheIndex::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|source| CacheError::CorruptIndex { path, source })
    }

    /// Returns the directory backing this cache
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the current index
    pub fn index(&self) -> &CacheIndex {
        &self.index
    }

    fn art_path(&self, id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.txt", id))
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", id))
    }

    /// Writes `value` as pretty JSON to `path`
    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Persists the index by writing a temporary file and renaming it over `metadata.json`
    fn persist_index(&self) -> Result<(), CacheError> {
        let tmp = self.cache_dir.join(INDEX_TMP_FILE);
        Self::write_json(&tmp, &self.index)?;
        fs::rename(&tmp, self.cache_dir.join(INDEX_FILE))?;
        Ok(())
    }

    /// Writes art text and its metadata record, returning the record
    fn write_entry(
        &self,
        id: &str,
        art: &str,
        prompt: &str,
        theme: &str,
        style: &str,
    ) -> Result<ArtRecord, CacheError> {
        fs::write(self.art_path(id), art)?;
        let record = ArtRecord {
            id: id.to_string(),
            created: Utc::now(),
            prompt: prompt.to_string(),
            theme: theme.to_string(),
            style: style.to_string(),
        };
        Self::write_json(&self.record_path(id), &record)?;
        Ok(record)
    }

    /// Deletes the art and metadata files for `id`, ignoring files that are already gone
    fn remove_files(&self, id: &str) -> Result<(), CacheError> {
        for path in [self.art_path(id), self.record_path(id)] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn push_entry(&mut self, record: &ArtRecord) {
        self.index.items.push(IndexEntry {
            id: record.id.clone(),
            created: record.created,
        });
        self.index.last_updated = Some(Utc::now());
    }

    /// Saves freshly fetched art and returns its id
    ///
    /// The id is derived from the art text, so saving identical art twice yields
    /// the same id. Art that is already indexed is left untouched. Otherwise the
    /// art, its metadata and a new index entry are written, and the oldest entries
    /// are evicted while the index holds more than `capacity` items.
    ///
    /// # Returns
    /// * `Ok(String)` - the art id
    /// * `Err(CacheError)` - if any write fails
    pub fn save(
        &mut self,
        art: &str,
        prompt: &str,
        theme: &str,
        style: &str,
    ) -> Result<String, CacheError> {
        let id = content_id(art);
        if self.index.contains(&id) {
            tracing::debug!(%id, "art already cached");
            return Ok(id);
        }

        let record = self.write_entry(&id, art, prompt, theme, style)?;
        self.push_entry(&record);

        for evicted in self.index.evict_over(self.capacity) {
            tracing::info!(id = %evicted.id, "evicting oldest art");
            self.remove_files(&evicted.id)?;
        }

        self.persist_index()?;
        tracing::info!(%id, size = self.size(), "saved art");
        Ok(id)
    }

    /// Imports user-supplied art under an explicit or derived id
    ///
    /// The import is rejected without touching the cache if the id is malformed or
    /// an artwork with that id already exists on disk. Imports are not subject to
    /// the capacity limit; the next `save` trims the index back down.
    pub fn import(&mut self, art: &str, options: &ImportOptions) -> Result<String, CacheError> {
        let id = options.id.clone().unwrap_or_else(|| content_id(art));
        if !validate_id(&id) {
            return Err(CacheError::InvalidId(id));
        }
        if self.index.contains(&id) || self.art_path(&id).exists() {
            return Err(CacheError::DuplicateId(id));
        }

        let record = self.write_entry(
            &id,
            art,
            &options.description,
            &options.theme,
            &options.style,
        )?;
        self.push_entry(&record);
        self.persist_index()?;
        tracing::info!(%id, size = self.size(), "imported art");
        Ok(id)
    }

    /// Returns a uniformly chosen artwork, or `None` if the cache is empty
    pub fn get_random(&self) -> Option<String> {
        self.get_random_with(&mut rand::thread_rng())
    }

    /// Like [`ArtCache::get_random`] with a caller-supplied random source
    pub fn get_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let entry = self.index.items.choose(rng)?;
        self.get_by_id(&entry.id)
    }

    /// Reads the art stored under `id`
    ///
    /// Looks at the file system only; the index is not consulted. A missing or
    /// unreadable art file is reported as `None`.
    pub fn get_by_id(&self, id: &str) -> Option<String> {
        match fs::read_to_string(self.art_path(id)) {
            Ok(art) => Some(art),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(%id, error = %e, "failed to read art file");
                }
                None
            }
        }
    }

    /// Lists metadata records in index order
    ///
    /// Entries whose metadata file is missing or unreadable are skipped.
    pub fn list(&self) -> Vec<ArtRecord> {
        self.index
            .items
            .iter()
            .filter_map(|item| {
                let content = fs::read_to_string(self.record_path(&item.id)).ok()?;
                match serde_json::from_str(&content) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(id = %item.id, error = %e, "skipping unreadable metadata");
                        None
                    }
                }
            })
            .collect()
    }

    /// Deletes every indexed artwork and resets the index
    pub fn clear(&mut self) -> Result<(), CacheError> {
        let items = std::mem::take(&mut self.index.items);
        for item in &items {
            self.remove_files(&item.id)?;
        }
        self.index.last_updated = None;
        self.persist_index()?;
        tracing::info!(removed = items.len(), "cleared art cache");
        Ok(())
    }

    /// Whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.index.items.is_empty()
    }

    /// Number of entries in the index
    pub fn size(&self) -> usize {
        self.index.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn create_test_cache(capacity: usize) -> (ArtCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = ArtCache::with_dir(temp_dir.path().to_path_buf(), capacity)
            .expect("Cache should open");
        (cache, temp_dir)
    }

    fn save(cache: &mut ArtCache, art: &str) -> String {
        cache
            .save(art, "a prompt", "cyberpunk", "retro")
            .expect("Save should succeed")
    }

    #[test]
    fn test_save_writes_art_metadata_and_index() {
        let (mut cache, temp_dir) = create_test_cache(10);

        let id = save(&mut cache, "AAA");

        assert_eq!(id, content_id("AAA"));
        let art = fs::read_to_string(temp_dir.path().join(format!("{}.txt", id))).unwrap();
        assert_eq!(art, "AAA");

        let meta = fs::read_to_string(temp_dir.path().join(format!("{}.json", id))).unwrap();
        let record: ArtRecord = serde_json::from_str(&meta).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.prompt, "a prompt");
        assert_eq!(record.theme, "cyberpunk");
        assert_eq!(record.style, "retro");

        let index = fs::read_to_string(temp_dir.path().join(INDEX_FILE)).unwrap();
        let index: CacheIndex = serde_json::from_str(&index).unwrap();
        assert_eq!(index.items.len(), 1);
        assert_eq!(index.items[0].id, id);
        assert_eq!(index.items[0].created, record.created);
        assert!(index.last_updated.is_some());
        assert!(!temp_dir.path().join(INDEX_TMP_FILE).exists());
    }

    #[test]
    fn test_save_same_art_twice_yields_same_id() {
        let (mut cache, _temp_dir) = create_test_cache(10);

        let first = save(&mut cache, "same art");
        let second = save(&mut cache, "same art");

        assert_eq!(first, second);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_capacity_two_evicts_oldest() {
        let (mut cache, temp_dir) = create_test_cache(2);

        let id1 = save(&mut cache, "AAA");
        let id2 = save(&mut cache, "BBB");
        let id3 = save(&mut cache, "CCC");

        assert_eq!(cache.size(), 2);
        assert!(cache.get_by_id(&id1).is_none());
        assert!(!temp_dir.path().join(format!("{}.json", id1)).exists());
        assert_eq!(cache.get_by_id(&id2).as_deref(), Some("BBB"));
        assert_eq!(cache.get_by_id(&id3).as_deref(), Some("CCC"));
    }

    #[test]
    fn test_size_stays_at_capacity_and_evicts_in_insertion_order() {
        let (mut cache, _temp_dir) = create_test_cache(3);
        let ids: Vec<String> = (0..7).map(|i| save(&mut cache, &format!("art {}", i))).collect();

        assert_eq!(cache.size(), 3);
        let remaining: Vec<&str> = cache.index().items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(remaining, vec![ids[4].as_str(), ids[5].as_str(), ids[6].as_str()]);
        for evicted in &ids[..4] {
            assert!(cache.get_by_id(evicted).is_none());
        }
    }

    #[test]
    fn test_get_by_id_round_trips_exact_text() {
        let (mut cache, _temp_dir) = create_test_cache(10);
        let art = "  /\\_/\\\n ( o.o )\n  > ^ <  \n\n";

        let id = save(&mut cache, art);

        assert_eq!(cache.get_by_id(&id).as_deref(), Some(art));
    }

    #[test]
    fn test_get_by_id_ignores_index_membership() {
        let (cache, temp_dir) = create_test_cache(10);
        fs::write(temp_dir.path().join("stray.txt"), "stray art").unwrap();

        assert_eq!(cache.get_by_id("stray").as_deref(), Some("stray art"));
        assert!(cache.get_by_id("missing").is_none());
    }

    #[test]
    fn test_empty_cache_has_no_random_art_and_empty_list() {
        let (cache, _temp_dir) = create_test_cache(10);

        assert!(cache.is_empty());
        assert_eq!(cache.size(), 0);
        assert!(cache.get_random().is_none());
        assert!(cache.list().is_empty());
    }

    #[test]
    fn test_get_random_returns_cached_art() {
        let (mut cache, _temp_dir) = create_test_cache(10);
        save(&mut cache, "AAA");
        save(&mut cache, "BBB");
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let art = cache.get_random_with(&mut rng).expect("Should pick art");
            assert!(art == "AAA" || art == "BBB");
        }
    }

    #[test]
    fn test_get_random_reports_missing_backing_file_as_absent() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let id = save(&mut cache, "AAA");
        fs::remove_file(temp_dir.path().join(format!("{}.txt", id))).unwrap();

        assert!(cache.get_random().is_none());
    }

    #[test]
    fn test_list_follows_index_order_and_skips_missing_metadata() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let id1 = save(&mut cache, "AAA");
        let id2 = save(&mut cache, "BBB");
        let id3 = save(&mut cache, "CCC");
        fs::remove_file(temp_dir.path().join(format!("{}.json", id2))).unwrap();

        let records = cache.list();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![id1.as_str(), id3.as_str()]);
        assert!(records.len() <= cache.size());
    }

    #[test]
    fn test_clear_removes_files_and_resets_index() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let ids = vec![save(&mut cache, "AAA"), save(&mut cache, "BBB")];

        cache.clear().expect("Clear should succeed");

        assert!(cache.is_empty());
        for id in &ids {
            assert!(!temp_dir.path().join(format!("{}.txt", id)).exists());
            assert!(!temp_dir.path().join(format!("{}.json", id)).exists());
        }
        let reopened = ArtCache::with_dir(temp_dir.path().to_path_buf(), 10).unwrap();
        assert!(reopened.is_empty());
        assert!(reopened.index().last_updated.is_none());
    }

    #[test]
    fn test_clear_tolerates_already_missing_files() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let id = save(&mut cache, "AAA");
        fs::remove_file(temp_dir.path().join(format!("{}.txt", id))).unwrap();

        cache.clear().expect("Clear should succeed");

        assert!(cache.is_empty());
    }

    #[test]
    fn test_index_survives_reopen() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let id = save(&mut cache, "AAA");

        let reopened = ArtCache::with_dir(temp_dir.path().to_path_buf(), 10).unwrap();

        assert_eq!(reopened.size(), 1);
        assert_eq!(reopened.index().items[0].id, id);
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("cache");

        let cache = ArtCache::with_dir(nested.clone(), 10).expect("Cache should open");

        assert!(nested.is_dir());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_open_rejects_corrupt_index() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(INDEX_FILE), "{ not json").unwrap();

        let err = ArtCache::with_dir(temp_dir.path().to_path_buf(), 10).unwrap_err();

        assert!(matches!(err, CacheError::CorruptIndex { .. }));
    }

    #[test]
    fn test_import_with_explicit_id() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let options = ImportOptions {
            id: Some("company_logo".to_string()),
            description: "Company logo".to_string(),
            ..ImportOptions::default()
        };

        let id = cache.import("LOGO", &options).expect("Import should succeed");

        assert_eq!(id, "company_logo");
        assert_eq!(cache.get_by_id(&id).as_deref(), Some("LOGO"));
        let records = cache.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prompt, "Company logo");
        assert_eq!(records[0].theme, "custom");
        assert_eq!(records[0].style, "ASCII art");
        assert!(temp_dir.path().join(INDEX_FILE).exists());
    }

    #[test]
    fn test_import_without_id_uses_content_hash() {
        let (mut cache, _temp_dir) = create_test_cache(10);

        let id = cache.import("LOGO", &ImportOptions::default()).unwrap();

        assert_eq!(id, content_id("LOGO"));
    }

    #[test]
    fn test_import_rejects_invalid_id() {
        let (mut cache, _temp_dir) = create_test_cache(10);
        let options = ImportOptions {
            id: Some("../escape".to_string()),
            ..ImportOptions::default()
        };

        let err = cache.import("LOGO", &options).unwrap_err();

        assert!(matches!(err, CacheError::InvalidId(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_import_duplicate_id_leaves_existing_entry_unchanged() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let options = ImportOptions {
            id: Some("logo".to_string()),
            ..ImportOptions::default()
        };
        cache.import("ORIGINAL", &options).unwrap();
        let meta_before = fs::read_to_string(temp_dir.path().join("logo.json")).unwrap();

        let err = cache.import("REPLACEMENT", &options).unwrap_err();

        assert!(matches!(err, CacheError::DuplicateId(ref id) if id == "logo"));
        assert_eq!(cache.get_by_id("logo").as_deref(), Some("ORIGINAL"));
        let meta_after = fs::read_to_string(temp_dir.path().join("logo.json")).unwrap();
        assert_eq!(meta_before, meta_after);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_import_rejects_id_still_indexed_without_art_file() {
        let (mut cache, temp_dir) = create_test_cache(10);
        let options = ImportOptions {
            id: Some("logo".to_string()),
            ..ImportOptions::default()
        };
        cache.import("ORIGINAL", &options).unwrap();
        fs::remove_file(temp_dir.path().join("logo.txt")).unwrap();

        let err = cache.import("REPLACEMENT", &options).unwrap_err();

        assert!(matches!(err, CacheError::DuplicateId(ref id) if id == "logo"));
        let ids: Vec<&str> = cache.index().items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["logo"]);
        assert!(!temp_dir.path().join("logo.txt").exists());
    }

    #[test]
    fn test_open_reads_offset_less_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(INDEX_FILE),
            r#"{"items": [{"id": "a1b2c3d4", "created": "2024-07-15T14:00:00.123456"}],
                "last_updated": "2024-07-15T14:00:00.123456"}"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("a1b2c3d4.txt"), "OLD ART").unwrap();
        fs::write(
            temp_dir.path().join("a1b2c3d4.json"),
            r#"{"id": "a1b2c3d4", "created": "2024-07-15T14:00:00.123456",
                "prompt": "p", "theme": "space", "style": "s"}"#,
        )
        .unwrap();

        let cache = ArtCache::with_dir(temp_dir.path().to_path_buf(), 10).expect("Cache should open");

        assert_eq!(cache.size(), 1);
        let records = cache.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].theme, "space");
        assert_eq!(cache.get_random().as_deref(), Some("OLD ART"));
    }

    #[test]
    fn test_import_is_not_bounded_by_capacity() {
        let (mut cache, _temp_dir) = create_test_cache(1);
        for name in ["one", "two", "three"] {
            let options = ImportOptions {
                id: Some(name.to_string()),
                ..ImportOptions::default()
            };
            cache.import(name, &options).unwrap();
        }

        assert_eq!(cache.size(), 3);

        // The next save trims back to capacity, oldest first
        let id = save(&mut cache, "fresh");
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.index().items[0].id, id);
        assert!(cache.get_by_id("one").is_none());
    }
}
