pub mod annotate;
pub mod engine;
pub mod pipeline;
pub mod setup;

pub use crate::domain::model::{AnnotateResult, AnnotatedLine, PinyinStyle};
pub use crate::domain::ports::{OptionsProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
