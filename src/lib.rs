//! Lessmay - Clean up sync-conflict copies of Markdown notes
//!
//! File synchronization tools such as Syncthing leave copies like
//! `Notes.sync-conflict-20240818-215425-I2NUVZU.md` next to `Notes.md` when
//! two devices edit the same note. Most of the time the copy is identical to
//! the note it would have synced with. This library finds those copies,
//! removes the identical ones, and produces a ready-to-run `diff` command plus
//! Obsidian deep links for the rest.
//!
//! # Architecture
//!
//! - **conflict** - Discovery, comparison, report formatting and the resolver
//!   that drives them
//! - **config** - Optional TOML settings file with home-directory expansion
//!
//! # Example
//!
//! ```rust,no_run
//! use lessmay::SyncConflictResolver;
//! use std::path::PathBuf;
//!
//! let resolver = SyncConflictResolver::new();
//! let roots = vec![PathBuf::from("/home/me/Documents/Obsidian Vault")];
//! let skip = vec![".trash".to_string()];
//!
//! let summary = resolver
//!     .resolve(&roots, &skip, &mut std::io::stdout())
//!     .expect("Failed to scan vault");
//! println!("{} identical copies removed", summary.deleted);
//! ```

pub mod config;
pub mod conflict;

pub use config::{ConfigError, LogFormat, Settings};
pub use conflict::*;
