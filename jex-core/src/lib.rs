//! jex core - templated per-record command execution over JSON input
//!
//! This crate provides the building blocks of the jex pipeline:
//!
//! - Top-level input sniffing and decoding ([`input`])
//! - The template engine adapter with the `tojson` helper ([`template`])
//! - Command construction and subprocess execution ([`exec`])
//! - Loose JSON decoding with raw-text fallback ([`decode`])
//! - The per-record orchestrator ([`pipeline`])
//! - Error types ([`error`])

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decode;
pub mod error;
pub mod exec;
pub mod input;
pub mod pipeline;
pub mod template;

// Re-export commonly used types
pub use decode::decode_loose;
pub use error::{JexError, Result};
pub use input::{read_document, sniff_document, InputDocument};
pub use pipeline::{Pipeline, PipelineConfig};
pub use template::{TemplateSet, DEFAULT_MAP_TEMPLATE};
