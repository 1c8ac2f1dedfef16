#![warn(clippy::pedantic)]

pub mod archive;
pub mod json;
pub mod log_file;
pub mod metadata;
pub mod object_store;
pub mod settings_file;
