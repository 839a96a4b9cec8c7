//! # Frontend Stats
//!
//! Client-side logic for the voting page.
//!
//! ## Flow
//!
//! - On page mount the stats client fires one fetch against the backend's
//!   `/api/form-data` endpoint
//! - Further triggers are rate-limited: no real network call until 10
//!   minutes have passed since the last successful one
//! - A successful fetch replaces the cached snapshot and hands the raw
//!   `{ totalVotes, thisWeek, topRequests }` to the page callback
//! - The page canonicalizes the raw labels, attaches glyphs and
//!   percentages, and pads to 3 slots for a stable layout
//! - A failed fetch keeps the old snapshot on screen and only flips the
//!   error state; retry is manual

pub mod client;
pub mod labels;
pub mod scroll;

pub use client::{
    FetchError, FormStats, HttpTransport, LiveRequest, RequestCount, StatsClient, StatsUpdate,
    Transport,
};
pub use labels::{DisplayRequest, display_requests, glyph_for, percentage, standardize};
pub use scroll::ScrollHub;
