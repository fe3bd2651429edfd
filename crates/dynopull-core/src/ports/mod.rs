//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the command handlers expect from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `tokio::process`, `reqwest` or `zip` types in any signature
//! - Errors are semantic enums mapped at the adapter boundary
//! - Secrets travel inside [`CommandSpec`] with an explicit redaction list

pub mod archive;
pub mod chat;
pub mod process;

pub use archive::{ArchiveError, ArchiveSummary, Archiver};
pub use chat::{ChatId, ChatTransport, MessageId, OutgoingDocument, TransportError, UserId};
pub use process::{CommandOutput, CommandRunner, CommandSpec, ProcessError};
