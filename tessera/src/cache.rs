//! Memoized construction of recursive pictures.
//!
//! The combinators in [`split`](crate::split) rebuild every level of a
//! recursion on each call, so a corner split of depth `n` constructs its
//! lower levels many times over. A [`PictureCache`] shares those levels
//! instead. Cached pictures render exactly like their uncached counterparts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::combinators::{below, beside};
use crate::error::{check_depth, Result};
use crate::picture::PictureRef;
use crate::split::square_limit_of;

/// The recursive constructions a [`PictureCache`] can memoize.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SplitKind {
    /// [`right_split`](crate::split::right_split).
    Right,
    /// [`up_split`](crate::split::up_split).
    Up,
    /// [`corner_split`](crate::split::corner_split).
    Corner,
    /// [`square_limit`](crate::split::square_limit).
    SquareLimit,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct CacheKey {
    /// Address of the base picture's allocation.
    base: usize,
    kind: SplitKind,
    depth: u32,
}

#[derive(Debug)]
struct CacheEntry {
    /// Keeps the base allocation alive so its address is not reused while keyed.
    _base: PictureRef,
    picture: PictureRef,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    limit: Option<usize>,
    hits: u64,
    misses: u64,
}

/// Hit and miss counts of a [`PictureCache`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to build a picture.
    pub misses: u64,
}

/// A thread-safe memo table for recursive pictures.
///
/// Entries are keyed on the identity of the base picture (its [`Arc`]
/// allocation), the kind of construction, and the depth. Two pictures that
/// look the same but were built separately do not share entries.
///
/// Every entry holds a reference to its base picture, so a cache keeps the
/// pictures it was used with alive. An unbounded cache ([`PictureCache::new`])
/// therefore grows for as long as new base pictures are passed to it. A
/// [`PictureCache::bounded`] cache drops all of its entries whenever an
/// insertion would exceed its capacity.
///
/// Cheaply clonable; clones share the same table.
#[derive(Debug, Default, Clone)]
pub struct PictureCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl PictureCache {
    /// Creates an empty, unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding at most `max_entries` pictures.
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                limit: Some(max_entries),
                ..Default::default()
            })),
        }
    }

    /// The maximum number of cached pictures, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.lock().limit
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The number of cached pictures.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Hit and miss counts since creation or the last [`PictureCache::clear`].
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    /// Drops every entry and resets the statistics.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
    }

    /// Memoized [`right_split`](crate::split::right_split).
    pub fn right_split(&self, p: &PictureRef, n: i32) -> Result<PictureRef> {
        Ok(self.get(p, SplitKind::Right, check_depth(n)?))
    }

    /// Memoized [`up_split`](crate::split::up_split).
    pub fn up_split(&self, p: &PictureRef, n: i32) -> Result<PictureRef> {
        Ok(self.get(p, SplitKind::Up, check_depth(n)?))
    }

    /// Memoized [`corner_split`](crate::split::corner_split).
    pub fn corner_split(&self, p: &PictureRef, n: i32) -> Result<PictureRef> {
        Ok(self.get(p, SplitKind::Corner, check_depth(n)?))
    }

    /// Memoized [`square_limit`](crate::split::square_limit).
    pub fn square_limit(&self, p: &PictureRef, n: i32) -> Result<PictureRef> {
        Ok(self.get(p, SplitKind::SquareLimit, check_depth(n)?))
    }

    /// Looks up a construction, building and inserting it on a miss.
    ///
    /// The lock is not held while building, since building recurses into the cache.
    fn get(&self, p: &PictureRef, kind: SplitKind, depth: u32) -> PictureRef {
        if depth == 0 && kind != SplitKind::SquareLimit {
            return p.clone();
        }
        let key = CacheKey {
            base: Arc::as_ptr(p) as *const () as usize,
            kind,
            depth,
        };
        {
            let mut inner = self.lock();
            if let Some(picture) = inner.entries.get(&key).map(|e| e.picture.clone()) {
                inner.hits += 1;
                return picture;
            }
            inner.misses += 1;
        }

        tracing::debug!(?kind, depth, "building cached picture");
        let picture = self.build(p, kind, depth);
        let mut inner = self.lock();
        match inner.limit {
            Some(0) => return picture,
            Some(limit) if inner.entries.len() >= limit && !inner.entries.contains_key(&key) => {
                tracing::debug!(limit, "picture cache full, evicting all entries");
                inner.entries.clear();
            }
            _ => {}
        }
        let entry = inner.entries.entry(key).or_insert(CacheEntry {
            _base: p.clone(),
            picture,
        });
        entry.picture.clone()
    }

    fn build(&self, p: &PictureRef, kind: SplitKind, depth: u32) -> PictureRef {
        match kind {
            SplitKind::Right => {
                let smaller = self.get(p, SplitKind::Right, depth - 1);
                beside(p, &below(&smaller, &smaller))
            }
            SplitKind::Up => {
                let smaller = self.get(p, SplitKind::Up, depth - 1);
                below(p, &beside(&smaller, &smaller))
            }
            SplitKind::Corner => {
                let up = self.get(p, SplitKind::Up, depth - 1);
                let right = self.get(p, SplitKind::Right, depth - 1);
                let top_left = beside(&up, &up);
                let bottom_right = below(&right, &right);
                let corner = self.get(p, SplitKind::Corner, depth - 1);
                beside(&below(p, &top_left), &below(&bottom_right, &corner))
            }
            SplitKind::SquareLimit => {
                square_limit_of(&self.get(p, SplitKind::Corner, depth))
            }
        }
    }
}
