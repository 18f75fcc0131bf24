// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The screen model: pages, scrollback, cursor, selection.
//!
//! [`Screen`] owns the [`PageList`] (history pages + the active page), the
//! cursor and scroll margins, tab stops, and charset state, and applies the
//! action stream from the VT parser to the grid. Reads go through the four
//! row coordinate spaces of [`RowAddr`]; geometry over pinned positions
//! lives in [`selection`].

// Attach sources.
pub mod charsets;
pub mod events;
pub mod page;
pub mod page_list;
pub mod pin;
pub mod row_addr;
pub mod screen_struct;
pub mod selection;
pub mod tab_stops;
pub mod vt_ops;

// Re-export.
pub use charsets::*;
pub use events::*;
pub use page::*;
pub use page_list::*;
pub use pin::*;
pub use row_addr::*;
pub use screen_struct::*;
pub use selection::*;
pub use tab_stops::*;
