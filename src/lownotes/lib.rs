//! # Lownotes Architecture
//!
//! Lownotes is a **UI-agnostic note library** with a small CLI client. Notes
//! are plain text bodies filed under a title and creation timestamp in a flat
//! key-value store, and can be exported as text, PDF or DOCX.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (indexes / titles → notes)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - create, list, view, update, export, config               │
//! │  - Plain Rust arguments in, `Result<CmdResult>` out         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/) + Key Codec (codec.rs)              │
//! │  - KeyValueStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Keys
//!
//! There is no separate index of notes. A note's content is stored under
//! `note_{created_at}_{title}` and the note list is rebuilt by decoding every
//! key. See [`codec`].
//!
//! ## Testing Strategy
//!
//! Commands are tested against `InMemoryStore`; that is where most tests
//! live. The API tests only check dispatch. The CLI is covered end to end in
//! `tests/`, against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`codec`]: Storage key encoding, decoding and enumeration
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`export`]: Destination picking and text/PDF/DOCX writers
//! - [`model`]: Core data types (`Note`, `NoteRef`)
//! - [`index`]: Display indexes and note selectors
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod index;
pub mod model;
pub mod store;
