//! # presence-core
//!
//! Builds editor presence payloads: what the user is doing, in which file and
//! repository, shaped for a Discord-like rich-presence service.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Hosts wrap with async if needed.
//! - **Graceful degradation**: Missing data becomes a sentinel or fallback, never an error.
//! - **Injected edges**: File icons, file sizes and the clock sit behind traits.
//! - **One refresh, one payload**: The only carried state is the start timestamp.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use presence_core::{load_config, PresenceAssembler, PresenceSnapshot};
//!
//! let config = load_config(None)?;
//! let assembler = PresenceAssembler::new();
//! let payload = assembler.assemble(&config, &snapshot, previous_start);
//! ```

pub mod anchor;
pub mod assembler;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod icons;
pub mod probe;
pub mod scm;
pub mod sequencer;
pub mod size;
pub mod storage;
pub mod template;
pub mod types;

pub use anchor::{carry_start_timestamp, AnchorStore, Clock, SystemClock};
pub use assembler::PresenceAssembler;
pub use classify::{ActivityClass, DetailSlot};
pub use config::*;
pub use context::TemplateContext;
pub use error::{PresenceError, Result};
pub use icons::{ExtensionIconResolver, FileIconResolver};
pub use probe::{FileSizeProbe, FsFileSizeProbe};
pub use sequencer::{Delivery, RefreshSequencer, RefreshTicket};
pub use size::format_file_size;
pub use storage::StorageConfig;
pub use template::{render_template, ReplacementToken, Template, TokenSource};
pub use types::*;

pub use presence_protocol::{ActivityType, PresenceButton, PresencePayload};
