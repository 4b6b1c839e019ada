//! heartlog-core - Core library for heartlog
//!
//! This crate provides the functionality shared between the heartlog CLI and
//! heartlog-server:
//!
//! - **store**: Flat-file persistence for memories, emotions and the today-word
//! - **emotion**: Canonical emotion mapping, distribution and chart rendering
//! - **analyzer**: Language-model backed summary/emotion/empathy generation
//! - **config**: Configuration file and environment loading

pub mod analyzer;
pub mod config;
pub mod emotion;
pub mod error;
pub mod store;
pub mod time;
pub mod types;

// Re-export commonly used types
pub use analyzer::{Analysis, Analyzer, OpenAiClient};
pub use config::Config;
pub use error::{Error, Result};
pub use store::Store;
pub use types::{EmotionRecord, Memory, NewMemory, TodayWord};
