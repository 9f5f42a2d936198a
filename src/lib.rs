pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod format_detect;
pub mod format_escape;
pub mod format_types;
pub mod masking;
pub mod output;
pub mod seed;
pub mod verbose;
