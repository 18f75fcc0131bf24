// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte-string arena backing hyperlink ids and URIs.
//!
//! Strings are stored as `(offset, len)` ranges into a page-owned byte
//! buffer, allocated through the chunk bitmap. All references are offsets,
//! so a deep copy of the page carries the arena verbatim.

use super::{BitmapAllocator, ChunkRange, PageError};

/// Bytes per allocation chunk. Short URIs take a few chunks; the chunk
/// granularity keeps the bitmap small.
pub const STRING_CHUNK_BYTES: usize = 16;

/// A string stored in the arena: byte offset + length.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StrRef {
    pub offset: u32,
    pub len: u32,
}

#[derive(Clone, Debug)]
pub struct StringArena {
    bytes: Vec<u8>,
    allocator: BitmapAllocator,
}

impl StringArena {
    /// An arena of (roughly) `byte_budget` bytes, rounded down to whole
    /// chunks.
    #[must_use]
    pub fn new(byte_budget: usize) -> Self {
        let chunk_count = byte_budget / STRING_CHUNK_BYTES;
        Self {
            bytes: vec![0; chunk_count * STRING_CHUNK_BYTES],
            allocator: BitmapAllocator::new(chunk_count),
        }
    }

    /// Copy `data` into the arena.
    #[allow(clippy::cast_possible_truncation)]
    pub fn alloc(&mut self, data: &[u8]) -> Result<StrRef, PageError> {
        if data.is_empty() {
            return Ok(StrRef { offset: 0, len: 0 });
        }
        let chunks = data.len().div_ceil(STRING_CHUNK_BYTES);
        let range = self
            .allocator
            .alloc(chunks)
            .ok_or(PageError::StringsOutOfMemory)?;
        let offset = range.first_chunk as usize * STRING_CHUNK_BYTES;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(StrRef {
            offset: offset as u32,
            len: data.len() as u32,
        })
    }

    #[must_use]
    pub fn get(&self, str_ref: StrRef) -> &[u8] {
        let offset = str_ref.offset as usize;
        &self.bytes[offset..offset + str_ref.len as usize]
    }

    pub fn free(&mut self, str_ref: StrRef) {
        if str_ref.len == 0 {
            return;
        }
        let chunks = (str_ref.len as usize).div_ceil(STRING_CHUNK_BYTES);
        #[allow(clippy::cast_possible_truncation)]
        self.allocator.free(ChunkRange {
            first_chunk: (str_ref.offset as usize / STRING_CHUNK_BYTES) as u32,
            chunk_count: chunks as u32,
        });
    }

    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.allocator.used_chunks() * STRING_CHUNK_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_get_free_round_trip() {
        let mut arena = StringArena::new(256);
        let a = arena.alloc(b"https://r3bl.com").unwrap();
        let b = arena.alloc(b"id-42").unwrap();
        assert_eq!(arena.get(a), b"https://r3bl.com");
        assert_eq!(arena.get(b), b"id-42");
        arena.free(a);
        let c = arena.alloc(b"short").unwrap();
        assert_eq!(arena.get(c), b"short");
        assert_eq!(arena.get(b), b"id-42");
    }

    #[test]
    fn test_empty_string() {
        let mut arena = StringArena::new(64);
        let empty = arena.alloc(b"").unwrap();
        assert_eq!(arena.get(empty), b"");
        arena.free(empty); // no-op
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn test_exhaustion_surfaces_typed_error() {
        let mut arena = StringArena::new(32); // two chunks
        arena.alloc(&[b'x'; 32]).unwrap();
        assert_eq!(arena.alloc(b"y"), Err(PageError::StringsOutOfMemory));
    }
}
