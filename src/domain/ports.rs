use crate::domain::model::{AnnotateResult, PinyinStyle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait OptionsProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_file(&self) -> Option<&str>;
    fn style(&self) -> PinyinStyle;
    fn gap(&self) -> usize;
    fn preview(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, text: String) -> Result<AnnotateResult>;
    async fn load(&self, result: AnnotateResult) -> Result<String>;
}
