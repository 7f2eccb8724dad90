pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{AnnotateConfig, Cli, Command, SetupArgs};

pub use config::cli::LocalStorage;
pub use config::setup_config::SetupConfig;
pub use core::{engine::AnnotateEngine, pipeline::AnnotatePipeline, setup::SetupRunner};
pub use domain::model::{AnnotateResult, PinyinStyle};
pub use utils::error::{AnnotateError, Result};
