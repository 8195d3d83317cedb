//! Bounded cache of resolved icons
//!
//! Entries are keyed by a [`Fingerprint`] of the render request and evicted in
//! insertion order: once the cache holds more than its limit, the single
//! oldest-inserted entry is dropped. Reads do not refresh an entry's position
//! and neither does overwriting an existing key.
//!
//! The cache has no internal locking. A multi-threaded host should guard it
//! with one mutex held across the get-then-put sequence.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::IconError;
use crate::resolver::{requested, ResolvedIcon, SIZE_KEYS};
use crate::value::{Options, Value};

/// Default number of entries kept
pub const DEFAULT_CACHE_LIMIT: usize = 500;

/// Largest accepted preload batch
pub const MAX_PRELOAD_BATCH: usize = 20;

/// Option keys that do not change the resolved icon
const UNFINGERPRINTED_KEYS: [&str; 1] = ["unsafe"];

/// Digest of the parts of a render request that affect its output
///
/// Covers the name, the variant and every non-null option except `unsafe`,
/// which only changes how the markup is handed back. Options are sorted by
/// key first so insertion order does not matter. Size options are compared by
/// the pixel value the resolver reads from them, so `32` and `"32"` share an
/// entry while `["32"]` matches no size at all. Every other value is compared
/// by its kind and attribute text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn compute(name: &str, variant: &str, options: &Options) -> Self {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        for (key, value) in options.present_entries() {
            if UNFINGERPRINTED_KEYS.contains(&key) {
                continue;
            }
            let field = if SIZE_KEYS.contains(&key) {
                // a size that reads as nothing renders like an absent one
                requested(options, key).map(|px| format!("px:{px}"))
            } else {
                value
                    .to_attribute()
                    .map(|text| format!("{}:{}", value.kind(), text))
            };
            if let Some(field) = field {
                pairs.push((key, field));
            }
        }
        pairs.sort();

        let mut hasher = Sha256::new();
        for part in [name, variant] {
            update_field(&mut hasher, part);
        }
        for (key, value) in &pairs {
            update_field(&mut hasher, key);
            update_field(&mut hasher, value);
        }
        let digest = hasher.finalize();

        // 16 bytes is plenty for a few hundred entries
        Fingerprint(hex::encode(&digest[..16]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Length-prefix each field so `("ab", "c")` and `("a", "bc")` differ
fn update_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insertion-ordered, size-bounded icon cache
#[derive(Debug, Clone)]
pub struct IconCache {
    limit: usize,
    entries: IndexMap<Fingerprint, Arc<ResolvedIcon>>,
}

impl Default for IconCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_LIMIT)
    }
}

impl IconCache {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: IndexMap::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<ResolvedIcon>> {
        self.entries.get(fingerprint).cloned()
    }

    /// Insert or overwrite, then evict the oldest entry if over the limit
    pub fn put(&mut self, fingerprint: Fingerprint, icon: impl Into<Arc<ResolvedIcon>>) {
        self.entries.insert(fingerprint, icon.into());

        if self.entries.len() > self.limit {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                debug!("Evicted cached icon {}", evicted);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Warm the cache with a batch of 1 to 20 requests
    ///
    /// For each request (after dropping sizes below `floor`) the callback is
    /// handed either the cached icon or the request itself; on a miss the icon
    /// it returns is stored. An error stops the batch but keeps whatever was
    /// stored before it.
    pub fn preload<F>(
        &mut self,
        batch: &[PreloadRequest],
        floor: i64,
        mut callback: F,
    ) -> Result<PreloadStats, IconError>
    where
        F: FnMut(Preload<'_>) -> Result<Option<ResolvedIcon>, IconError>,
    {
        if batch.is_empty() || batch.len() > MAX_PRELOAD_BATCH {
            return Err(IconError::batch(format!(
                "expected 1 to {} items, got {}",
                MAX_PRELOAD_BATCH,
                batch.len()
            )));
        }

        let mut stats = PreloadStats::default();
        for request in batch {
            let request = request.clamped(floor);
            let fingerprint = request.fingerprint();

            match self.get(&fingerprint) {
                Some(cached) => {
                    callback(Preload::Hit(&cached))?;
                    stats.hits += 1;
                }
                None => {
                    if let Some(icon) = callback(Preload::Miss(&request))? {
                        self.put(fingerprint, icon);
                    }
                    stats.misses += 1;
                }
            }
        }

        debug!(
            "Preloaded {} icons ({} cached, {} resolved)",
            batch.len(),
            stats.hits,
            stats.misses
        );
        Ok(stats)
    }
}

/// What the preload callback is asked to handle
#[derive(Debug)]
pub enum Preload<'a> {
    /// Not cached; return the icon to store
    Miss(&'a PreloadRequest),
    /// Already cached; the return value is ignored
    Hit(&'a Arc<ResolvedIcon>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadStats {
    pub hits: usize,
    pub misses: usize,
}

/// One item of a preload batch
#[derive(Debug, Clone, PartialEq)]
pub struct PreloadRequest {
    pub name: String,
    pub variant: String,
    pub height: Option<Value>,
    pub width: Option<Value>,
}

impl PreloadRequest {
    pub fn new(name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            height: None,
            width: None,
        }
    }

    pub fn with_height(mut self, height: impl Into<Value>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<Value>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Parse a batch from a list of maps with `name`, `variant`, `height?`, `width?`
    pub fn batch_from_value(value: &Value) -> Result<Vec<Self>, IconError> {
        match value {
            Value::List(items) => items.iter().map(Self::from_value).collect(),
            other => Err(IconError::batch(format!(
                "expected a list, got {}",
                other.kind()
            ))),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, IconError> {
        let Value::Map(fields) = value else {
            return Err(IconError::batch(format!(
                "expected each item to be a map, got {}",
                value.kind()
            )));
        };
        let field = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
                .filter(|v| !v.is_null())
        };
        let identifier = |key: &'static str| {
            field(key)
                .ok_or_else(|| IconError::batch(format!("item is missing '{}'", key)))
                .and_then(|v| v.to_identifier(key))
        };

        Ok(Self {
            name: identifier("name")?,
            variant: identifier("variant")?,
            height: field("height").cloned(),
            width: field("width").cloned(),
        })
    }

    /// Render options equivalent to this request
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        if let Some(height) = &self.height {
            options.insert("height", height.clone());
        }
        if let Some(width) = &self.width {
            options.insert("width", width.clone());
        }
        options
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(&self.name, &self.variant, &self.options())
    }

    /// Copy with sizes under `floor` treated as unset
    fn clamped(&self, floor: i64) -> Self {
        let keep = |size: &Option<Value>| size.clone().filter(|v| v.to_int() >= floor);
        Self {
            name: self.name.clone(),
            variant: self.variant.clone(),
            height: keep(&self.height),
            width: keep(&self.width),
        }
    }
}
