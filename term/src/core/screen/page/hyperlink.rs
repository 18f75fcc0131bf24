// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC 8 hyperlink interning.
//!
//! A hyperlink is an optional explicit id plus a URI. Both strings live in
//! the page's [`StringArena`]; the set stores only `(offset, len)` refs and
//! interns on content equality, so every cell sharing a link shares one
//! entry. The set mirrors the style set's open-addressing discipline,
//! including the distinct needs-rehash and out-of-memory failures.
//!
//! [`StringArena`]: super::StringArena

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use super::{PageError, StrRef, StringArena};

/// Handle to an interned hyperlink; `0` means "no hyperlink".
pub type HyperlinkId = u16;

/// Nominal bytes per set entry, used to derive entry capacity from the
/// `hyperlink_bytes` knob (the string payload itself is budgeted by
/// `string_bytes`).
const BYTES_PER_ENTRY: usize = 32;

/// Borrowed view of a hyperlink's strings.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct HyperlinkData<'a> {
    /// Explicit id from OSC 8 `id=`; links with equal ids join across
    /// cells, links without ids are distinct per URI.
    pub id: Option<&'a str>,
    pub uri: &'a str,
}

#[derive(Clone, Debug)]
struct HyperlinkEntry {
    id_ref: Option<StrRef>,
    uri_ref: StrRef,
    /// 0 marks a dead (recycled) entry.
    ref_count: u32,
}

const EMPTY: u16 = 0;
const TOMBSTONE: u16 = u16::MAX;

#[derive(Clone, Debug)]
pub struct HyperlinkSet {
    entries: Vec<HyperlinkEntry>,
    free_ids: Vec<HyperlinkId>,
    table: Vec<u16>,
    mask: usize,
    max_items: usize,
    tombstones: usize,
}

impl HyperlinkSet {
    /// Capacity derived from the page's `hyperlink_bytes` knob.
    #[must_use]
    pub fn new(byte_budget: usize) -> Self {
        let max_items = (byte_budget / BYTES_PER_ENTRY).max(2);
        let table_len = (max_items * 2).next_power_of_two();
        Self {
            entries: Vec::new(),
            free_ids: Vec::new(),
            table: vec![EMPTY; table_len],
            mask: table_len - 1,
            max_items,
            tombstones: 0,
        }
    }

    fn hash_link(link: HyperlinkData<'_>) -> usize {
        let mut hasher = FxHasher::default();
        link.id.hash(&mut hasher);
        link.uri.hash(&mut hasher);
        #[allow(clippy::cast_possible_truncation)]
        let hash = hasher.finish() as usize;
        hash
    }

    fn entry_matches(
        &self,
        arena: &StringArena,
        entry: &HyperlinkEntry,
        link: HyperlinkData<'_>,
    ) -> bool {
        let entry_id = entry.id_ref.map(|r| arena.get(r));
        let entry_uri = arena.get(entry.uri_ref);
        entry_id == link.id.map(str::as_bytes) && entry_uri == link.uri.as_bytes()
    }

    #[must_use]
    pub fn live_len(&self) -> usize { self.entries.len() - self.free_ids.len() }

    /// Intern a link, storing its strings in `arena` on first sight. The
    /// returned id carries one fresh reference for the caller.
    pub fn intern(
        &mut self,
        arena: &mut StringArena,
        link: HyperlinkData<'_>,
    ) -> Result<HyperlinkId, PageError> {
        let start = Self::hash_link(link);
        let mut saw_tombstone = false;
        let mut insert_at = None;

        for probe in 0..self.table.len() {
            let slot = (start + probe) & self.mask;
            match self.table[slot] {
                EMPTY => {
                    insert_at = Some(slot);
                    break;
                }
                TOMBSTONE => saw_tombstone = true,
                id => {
                    let entry = &self.entries[id as usize - 1];
                    if entry.ref_count > 0 && self.entry_matches(arena, entry, link) {
                        self.entries[id as usize - 1].ref_count += 1;
                        return Ok(id);
                    }
                }
            }
        }

        let Some(slot) = insert_at else {
            return if saw_tombstone {
                Err(PageError::HyperlinkSetNeedsRehash)
            } else {
                Err(PageError::HyperlinkSetOutOfMemory)
            };
        };

        // Reserve the entry slot before touching the arena so an arena
        // failure leaves no half-inserted state.
        let reuse_id = self.free_ids.last().copied();
        if reuse_id.is_none() && self.entries.len() >= self.max_items {
            return Err(PageError::HyperlinkSetOutOfMemory);
        }

        let id_ref = match link.id {
            Some(id_str) => Some(arena.alloc(id_str.as_bytes())?),
            None => None,
        };
        let uri_ref = match arena.alloc(link.uri.as_bytes()) {
            Ok(uri_ref) => uri_ref,
            Err(e) => {
                if let Some(r) = id_ref {
                    arena.free(r);
                }
                return Err(e);
            }
        };

        let entry = HyperlinkEntry {
            id_ref,
            uri_ref,
            ref_count: 1,
        };
        let id = match reuse_id {
            Some(id) => {
                self.free_ids.pop();
                self.entries[id as usize - 1] = entry;
                id
            }
            None => {
                self.entries.push(entry);
                #[allow(clippy::cast_possible_truncation)]
                let id = self.entries.len() as u16;
                id
            }
        };
        self.table[slot] = id;
        Ok(id)
    }

    pub fn acquire(&mut self, id: HyperlinkId) {
        debug_assert!(id != 0);
        let entry = &mut self.entries[id as usize - 1];
        debug_assert!(entry.ref_count > 0, "acquire of dead hyperlink {id}");
        entry.ref_count += 1;
    }

    /// Drop one reference; at zero the entry dies and its strings return to
    /// the arena.
    pub fn release(&mut self, arena: &mut StringArena, id: HyperlinkId) {
        debug_assert!(id != 0);
        let entry = &mut self.entries[id as usize - 1];
        debug_assert!(entry.ref_count > 0, "release of dead hyperlink {id}");
        entry.ref_count -= 1;
        if entry.ref_count > 0 {
            return;
        }
        let (id_ref, uri_ref) = (entry.id_ref, entry.uri_ref);
        let link_data = HyperlinkData {
            id: id_ref
                .map(|r| std::str::from_utf8(arena.get(r)).unwrap_or_default()),
            uri: std::str::from_utf8(arena.get(uri_ref)).unwrap_or_default(),
        };
        let start = Self::hash_link(link_data);
        for probe in 0..self.table.len() {
            let slot = (start + probe) & self.mask;
            if self.table[slot] == id {
                self.table[slot] = TOMBSTONE;
                self.tombstones += 1;
                break;
            }
        }
        if let Some(r) = id_ref {
            arena.free(r);
        }
        arena.free(uri_ref);
        self.free_ids.push(id);
    }

    #[must_use]
    pub fn get<'a>(
        &'a self,
        arena: &'a StringArena,
        id: HyperlinkId,
    ) -> Option<HyperlinkData<'a>> {
        if id == 0 {
            return None;
        }
        let entry = self.entries.get(id as usize - 1)?;
        if entry.ref_count == 0 {
            return None;
        }
        Some(HyperlinkData {
            id: entry
                .id_ref
                .map(|r| std::str::from_utf8(arena.get(r)).unwrap_or_default()),
            uri: std::str::from_utf8(arena.get(entry.uri_ref)).unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn ref_count(&self, id: HyperlinkId) -> u32 {
        if id == 0 {
            return 0;
        }
        self.entries
            .get(id as usize - 1)
            .map_or(0, |entry| entry.ref_count)
    }

    /// Rebuild the hash index, clearing tombstones. Ids are unchanged.
    pub fn rehash(&mut self, arena: &StringArena) {
        self.table.fill(EMPTY);
        self.tombstones = 0;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.ref_count == 0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let id = (index + 1) as u16;
            let link = HyperlinkData {
                id: entry
                    .id_ref
                    .map(|r| std::str::from_utf8(arena.get(r)).unwrap_or_default()),
                uri: std::str::from_utf8(arena.get(entry.uri_ref)).unwrap_or_default(),
            };
            let start = Self::hash_link(link);
            for probe in 0..self.table.len() {
                let slot = (start + probe) & self.mask;
                if self.table[slot] == EMPTY {
                    self.table[slot] = id;
                    break;
                }
            }
        }
    }

    /// Live `(id, ref_count)` pairs, for integrity checks.
    pub fn iter_live(&self) -> impl Iterator<Item = (HyperlinkId, u32)> + '_ {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = (index + 1) as u16;
            (entry.ref_count > 0).then_some((id, entry.ref_count))
        })
    }
}

/// The per-page map from cell offset to hyperlink handle. Bounded so a page
/// cannot grow without limit; the bound scales with the same byte budget as
/// the set.
#[derive(Clone, Debug, Default)]
pub struct HyperlinkMap {
    map: FxHashMap<u32, HyperlinkId>,
    max_entries: usize,
}

impl HyperlinkMap {
    #[must_use]
    pub fn new(byte_budget: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            // Each association is one map slot; size generously relative to
            // the set (many cells share one link).
            max_entries: (byte_budget / 4).max(16),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.map.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    #[must_use]
    pub fn get(&self, cell_offset: u32) -> Option<HyperlinkId> {
        self.map.get(&cell_offset).copied()
    }

    pub fn insert(
        &mut self,
        cell_offset: u32,
        id: HyperlinkId,
    ) -> Result<Option<HyperlinkId>, PageError> {
        if !self.map.contains_key(&cell_offset) && self.map.len() >= self.max_entries {
            return Err(PageError::HyperlinkMapOutOfMemory);
        }
        Ok(self.map.insert(cell_offset, id))
    }

    pub fn remove(&mut self, cell_offset: u32) -> Option<HyperlinkId> {
        self.map.remove(&cell_offset)
    }

    pub fn rekey(&mut self, old_offset: u32, new_offset: u32) {
        if old_offset == new_offset {
            return;
        }
        debug_assert!(!self.map.contains_key(&new_offset));
        if let Some(id) = self.map.remove(&old_offset) {
            self.map.insert(new_offset, id);
        }
    }

    pub fn swap(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let id_a = self.map.remove(&a);
        let id_b = self.map.remove(&b);
        if let Some(id) = id_a {
            self.map.insert(b, id);
        }
        if let Some(id) = id_b {
            self.map.insert(a, id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, HyperlinkId)> + '_ {
        self.map.iter().map(|(&offset, &id)| (offset, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link<'a>(id: Option<&'a str>, uri: &'a str) -> HyperlinkData<'a> {
        HyperlinkData { id, uri }
    }

    #[test]
    fn test_intern_dedupes_on_content() {
        let mut arena = StringArena::new(512);
        let mut set = HyperlinkSet::new(256);
        let a = set
            .intern(&mut arena, link(Some("x"), "https://r3bl.com"))
            .unwrap();
        let a2 = set
            .intern(&mut arena, link(Some("x"), "https://r3bl.com"))
            .unwrap();
        let b = set.intern(&mut arena, link(None, "https://r3bl.com")).unwrap();
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(set.ref_count(a), 2);
        let got = set.get(&arena, a).unwrap();
        assert_eq!(got.id, Some("x"));
        assert_eq!(got.uri, "https://r3bl.com");
    }

    #[test]
    fn test_release_frees_arena_strings() {
        let mut arena = StringArena::new(64);
        let mut set = HyperlinkSet::new(256);
        let id = set
            .intern(&mut arena, link(None, "https://example.com/long-path"))
            .unwrap();
        let used = arena.used_bytes();
        assert!(used > 0);
        set.release(&mut arena, id);
        assert_eq!(arena.used_bytes(), 0);
        assert_eq!(set.get(&arena, id), None);
    }

    #[test]
    fn test_arena_exhaustion_bubbles_strings_oom() {
        let mut arena = StringArena::new(16); // one chunk
        let mut set = HyperlinkSet::new(256);
        set.intern(&mut arena, link(None, "0123456789abcdef")).unwrap();
        assert_eq!(
            set.intern(&mut arena, link(None, "another")),
            Err(PageError::StringsOutOfMemory)
        );
        // Failed insert left the set unchanged.
        assert_eq!(set.live_len(), 1);
    }

    #[test]
    fn test_map_caps_and_rekeys() {
        let mut map = HyperlinkMap::new(64); // max 16 entries
        for offset in 0..16 {
            map.insert(offset, 1).unwrap();
        }
        assert_eq!(map.insert(99, 1), Err(PageError::HyperlinkMapOutOfMemory));
        // Overwriting an existing key is always allowed.
        assert_eq!(map.insert(3, 2).unwrap(), Some(1));

        map.remove(0);
        map.insert(99, 7).unwrap();
        map.rekey(99, 100);
        assert_eq!(map.get(100), Some(7));
        assert_eq!(map.get(99), None);
    }
}
