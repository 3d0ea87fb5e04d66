//! Hash-consed string interning over a single append-only byte arena.
//! Equal byte slices intern to equal IDs, lookup is O(1) average, and
//! stored bytes never relocate once inserted.

use std::collections::HashMap;

/// Opaque handle to an interned byte slice. `0` is the sentinel for
/// none/invalid; valid IDs start at `1`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomId(u32);

impl AtomId {
    /// The sentinel "no atom" value.
    pub const NONE: AtomId = AtomId(0);

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Snapshot of interning activity, exposed for diagnostics/metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InternStats {
    pub atoms: usize,
    pub bytes: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Append-only string interner backed by a single contiguous byte arena.
///
/// `intern` is idempotent: interning the same bytes twice returns the same
/// [`AtomId`]. Resolved slices remain valid for the lifetime of the table —
/// the arena is never compacted or relocated.
#[derive(Debug, Default)]
pub struct AtomTable {
    arena: Vec<u8>,
    // (start, end) byte ranges into `arena`, indexed by `AtomId - 1`.
    slices: Vec<(u32, u32)>,
    by_bytes: HashMap<Box<[u8]>, AtomId>,
    hits: u64,
    misses: u64,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `bytes`, returning a stable [`AtomId`]. Equal input always
    /// yields equal output.
    pub fn intern(&mut self, bytes: &[u8]) -> AtomId {
        if let Some(&id) = self.by_bytes.get(bytes) {
            self.hits += 1;
            return id;
        }
        self.misses += 1;

        let start = self.arena.len() as u32;
        self.arena.extend_from_slice(bytes);
        let end = self.arena.len() as u32;
        self.slices.push((start, end));

        let id = AtomId(self.slices.len() as u32);
        self.by_bytes.insert(bytes.into(), id);
        id
    }

    /// Convenience wrapper for UTF-8 text.
    #[inline]
    pub fn intern_str(&mut self, s: &str) -> AtomId {
        self.intern(s.as_bytes())
    }

    /// Resolve an [`AtomId`] back to its interned bytes.
    ///
    /// # Panics
    /// Panics for [`AtomId::NONE`] or an ID beyond the current highwater —
    /// callers that accept externally-sourced IDs should use
    /// [`try_resolve`](Self::try_resolve) instead.
    pub fn resolve(&self, id: AtomId) -> &[u8] {
        self.try_resolve(id)
            .expect("AtomId not produced by this table")
    }

    /// Resolve an [`AtomId`] back to its interned bytes as `str`.
    ///
    /// # Panics
    /// Panics if the atom's bytes are not valid UTF-8 (never happens for
    /// IDs produced by [`intern_str`](Self::intern_str)).
    pub fn resolve_str(&self, id: AtomId) -> &str {
        std::str::from_utf8(self.resolve(id)).expect("interned bytes are not valid UTF-8")
    }

    pub fn try_resolve(&self, id: AtomId) -> Option<&[u8]> {
        if id.is_none() {
            return None;
        }
        let (start, end) = *self.slices.get(id.0 as usize - 1)?;
        Some(&self.arena[start as usize..end as usize])
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn stats(&self) -> InternStats {
        InternStats {
            atoms: self.slices.len(),
            bytes: self.arena.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Emit the arena as a binary blob alongside a per-atom offset table
    /// (`len() + 1` entries, the last being the total blob size), for
    /// callers persisting an interned vocabulary across incremental-reparse
    /// generations.
    pub fn to_blob(&self) -> (Vec<u8>, Vec<u32>) {
        let mut offsets = Vec::with_capacity(self.slices.len() + 1);
        for &(start, _) in &self.slices {
            offsets.push(start);
        }
        offsets.push(self.arena.len() as u32);
        (self.arena.clone(), offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut table = AtomTable::new();
        let a = table.intern_str("hello");
        let b = table.intern_str("hello");
        let c = table.intern_str("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn resolve_roundtrips() {
        let mut table = AtomTable::new();
        let id = table.intern_str("héllo");
        assert_eq!(table.resolve_str(id), "héllo");
    }

    #[test]
    fn none_never_resolves() {
        let table = AtomTable::new();
        assert!(table.try_resolve(AtomId::NONE).is_none());
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let mut table = AtomTable::new();
        table.intern_str("a");
        table.intern_str("a");
        table.intern_str("b");
        let stats = table.stats();
        assert_eq!(stats.atoms, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn to_blob_round_trips_offsets() {
        let mut table = AtomTable::new();
        let a = table.intern_str("ab");
        let b = table.intern_str("cde");
        let (blob, offsets) = table.to_blob();
        assert_eq!(&blob[offsets[a.as_u32() as usize - 1] as usize..offsets[a.as_u32() as usize] as usize], b"ab");
        assert_eq!(&blob[offsets[b.as_u32() as usize - 1] as usize..offsets[b.as_u32() as usize] as usize], b"cde");
    }
}
