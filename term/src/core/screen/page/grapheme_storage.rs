// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Storage for multi-codepoint cells.
//!
//! Most cells hold exactly one Unicode scalar inline. Cells that need more
//! (combining marks, ZWJ emoji, flags) keep their base scalar inline, are
//! tagged `CodepointGrapheme`, and store the **extra** codepoints here: a
//! chunked codepoint arena plus a map from cell offset to its slice.
//!
//! Keys are cell offsets (`row * cols + col`), so entries must be re-keyed
//! when cells move within the page.

use rustc_hash::FxHashMap;

use super::{BitmapAllocator, ChunkRange, PageError};

/// Codepoints per arena chunk. Two covers the common single combining mark
/// without waste; longer clusters take consecutive chunks.
pub const GRAPHEME_CHUNK_CPS: usize = 2;

/// One cell's extra codepoints: an arena range plus the used length.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GraphemeSlice {
    range: ChunkRange,
    len: u32,
}

impl GraphemeSlice {
    #[must_use]
    pub const fn len(&self) -> usize { self.len as usize }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    const fn capacity(&self) -> usize {
        self.range.chunk_count as usize * GRAPHEME_CHUNK_CPS
    }

    const fn first_cp(&self) -> usize {
        self.range.first_chunk as usize * GRAPHEME_CHUNK_CPS
    }
}

#[derive(Clone, Debug)]
pub struct GraphemeStorage {
    /// Codepoint arena; slices index into this.
    cps: Vec<u32>,
    allocator: BitmapAllocator,
    map: FxHashMap<u32, GraphemeSlice>,
    max_entries: usize,
}

impl GraphemeStorage {
    /// Storage sized from a byte budget (4 bytes per codepoint). The map is
    /// capped at one entry per chunk, which a page full of two-codepoint
    /// clusters can reach.
    #[must_use]
    pub fn new(byte_budget: usize) -> Self {
        let cp_count = byte_budget / 4;
        let chunk_count = cp_count / GRAPHEME_CHUNK_CPS;
        Self {
            cps: vec![0; chunk_count * GRAPHEME_CHUNK_CPS],
            allocator: BitmapAllocator::new(chunk_count),
            map: FxHashMap::default(),
            max_entries: chunk_count,
        }
    }

    #[must_use]
    pub fn entry_count(&self) -> usize { self.map.len() }

    #[must_use]
    pub fn contains(&self, cell_offset: u32) -> bool {
        self.map.contains_key(&cell_offset)
    }

    /// Install the extra codepoints for a cell that has none yet.
    pub fn set(&mut self, cell_offset: u32, extra: &[char]) -> Result<(), PageError> {
        debug_assert!(!extra.is_empty());
        debug_assert!(
            !self.map.contains_key(&cell_offset),
            "cell {cell_offset} already has grapheme data"
        );
        if self.map.len() >= self.max_entries {
            return Err(PageError::GraphemeMapOutOfMemory);
        }
        let chunks = extra.len().div_ceil(GRAPHEME_CHUNK_CPS);
        let range = self
            .allocator
            .alloc(chunks)
            .ok_or(PageError::GraphemeAllocOutOfMemory)?;
        #[allow(clippy::cast_possible_truncation)]
        let slice = GraphemeSlice {
            range,
            len: extra.len() as u32,
        };
        let first = slice.first_cp();
        for (i, &cp) in extra.iter().enumerate() {
            self.cps[first + i] = cp as u32;
        }
        self.map.insert(cell_offset, slice);
        Ok(())
    }

    /// Append one codepoint, growing the slice into a fresh run when the
    /// current chunks are full. The old run is freed after the copy, so a
    /// failed grow leaves the entry intact.
    pub fn append(&mut self, cell_offset: u32, cp: char) -> Result<(), PageError> {
        let Some(slice) = self.map.get(&cell_offset).copied() else {
            return self.set(cell_offset, &[cp]);
        };
        if slice.len() < slice.capacity() {
            let at = slice.first_cp() + slice.len();
            self.cps[at] = cp as u32;
            self.map.insert(
                cell_offset,
                GraphemeSlice {
                    range: slice.range,
                    len: slice.len + 1,
                },
            );
            return Ok(());
        }
        // Grow: allocate one more chunk's worth and move the codepoints.
        let new_chunks = slice.range.chunk_count as usize + 1;
        let new_range = self
            .allocator
            .alloc(new_chunks)
            .ok_or(PageError::GraphemeAllocOutOfMemory)?;
        let new_first = new_range.first_chunk as usize * GRAPHEME_CHUNK_CPS;
        let old_first = slice.first_cp();
        for i in 0..slice.len() {
            self.cps[new_first + i] = self.cps[old_first + i];
        }
        self.cps[new_first + slice.len()] = cp as u32;
        self.allocator.free(slice.range);
        self.map.insert(
            cell_offset,
            GraphemeSlice {
                range: new_range,
                len: slice.len + 1,
            },
        );
        Ok(())
    }

    /// The extra codepoints for a cell, as Unicode scalar values.
    #[must_use]
    pub fn get(&self, cell_offset: u32) -> Option<&[u32]> {
        let slice = self.map.get(&cell_offset)?;
        let first = slice.first_cp();
        Some(&self.cps[first..first + slice.len()])
    }

    /// Drop a cell's entry and free its arena run.
    pub fn clear(&mut self, cell_offset: u32) {
        if let Some(slice) = self.map.remove(&cell_offset) {
            self.allocator.free(slice.range);
        }
    }

    /// Move an entry to a new cell offset (cells moved within the page).
    pub fn rekey(&mut self, old_offset: u32, new_offset: u32) {
        if old_offset == new_offset {
            return;
        }
        debug_assert!(!self.map.contains_key(&new_offset));
        if let Some(slice) = self.map.remove(&old_offset) {
            self.map.insert(new_offset, slice);
        }
    }

    /// Swap the entries (or absence thereof) of two cell offsets.
    pub fn swap(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let slice_a = self.map.remove(&a);
        let slice_b = self.map.remove(&b);
        if let Some(slice) = slice_a {
            self.map.insert(b, slice);
        }
        if let Some(slice) = slice_b {
            self.map.insert(a, slice);
        }
    }

    /// All entries, for integrity checks.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u32])> {
        self.map.iter().map(|(&offset, slice)| {
            let first = slice.first_cp();
            (offset, &self.cps[first..first + slice.len()])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(slice: &[u32]) -> String {
        slice
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap())
            .collect()
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let mut storage = GraphemeStorage::new(256);
        storage.set(5, &['\u{0301}', '\u{0302}']).unwrap();
        assert_eq!(chars(storage.get(5).unwrap()), "\u{0301}\u{0302}");
        assert!(storage.get(6).is_none());
    }

    #[test]
    fn test_append_grows_in_place_then_reallocates() {
        let mut storage = GraphemeStorage::new(256);
        storage.append(0, '\u{200D}').unwrap();
        assert_eq!(storage.get(0).unwrap().len(), 1);
        // Second fits the same 2-cp chunk.
        storage.append(0, '\u{1F469}').unwrap();
        assert_eq!(storage.get(0).unwrap().len(), 2);
        // Third forces a grow into a larger run.
        storage.append(0, '\u{200D}').unwrap();
        assert_eq!(
            chars(storage.get(0).unwrap()),
            "\u{200D}\u{1F469}\u{200D}"
        );
    }

    #[test]
    fn test_arena_exhaustion_and_recovery() {
        let mut storage = GraphemeStorage::new(64); // 16 cps, 8 chunks
        // Four 3-cp entries occupy two chunks each: the arena is full while
        // the map still has headroom.
        for offset in 0..4 {
            storage.set(offset, &['x', 'y', 'z']).unwrap();
        }
        assert_eq!(
            storage.set(100, &['z']),
            Err(PageError::GraphemeAllocOutOfMemory)
        );
        storage.clear(0);
        storage.set(100, &['z']).unwrap();
        assert_eq!(chars(storage.get(100).unwrap()), "z");
    }

    #[test]
    fn test_map_cap_surfaces_its_own_error() {
        let mut storage = GraphemeStorage::new(32); // 8 cps, 4 chunks, 4 entries
        for offset in 0..4 {
            storage.set(offset, &['a']).unwrap();
        }
        assert_eq!(
            storage.set(100, &['b']),
            Err(PageError::GraphemeMapOutOfMemory)
        );
    }

    #[test]
    fn test_rekey_and_swap() {
        let mut storage = GraphemeStorage::new(256);
        storage.set(1, &['a']).unwrap();
        storage.rekey(1, 9);
        assert!(storage.get(1).is_none());
        assert_eq!(chars(storage.get(9).unwrap()), "a");

        storage.set(2, &['b']).unwrap();
        storage.swap(9, 2);
        assert_eq!(chars(storage.get(2).unwrap()), "a");
        assert_eq!(chars(storage.get(9).unwrap()), "b");

        // Swap with an empty side moves one way.
        storage.swap(2, 50);
        assert!(storage.get(2).is_none());
        assert_eq!(chars(storage.get(50).unwrap()), "a");
    }
}
