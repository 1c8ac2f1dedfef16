#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod chart;
pub mod log;

mod artifact;
mod render;
mod service;
mod settings;
mod upload;

pub use artifact::*;
pub use render::*;
pub use service::*;
pub use settings::*;
pub use upload::*;
