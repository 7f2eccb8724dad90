use crate::core::annotate;
use crate::core::{AnnotateResult, OptionsProvider, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::Path;

pub struct AnnotatePipeline<S: Storage, C: OptionsProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: OptionsProvider> AnnotatePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 未指定輸出檔時沿用舊轉換器的命名：<stem>_pinyin<ext>
    fn resolve_output_path(&self) -> String {
        if let Some(output) = self.config.output_file() {
            return output.to_string();
        }

        let input = Path::new(self.config.input_file());
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let file_name = format!("{}_pinyin{}", stem, ext);

        match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.join(file_name).to_string_lossy().into_owned()
            }
            _ => file_name,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: OptionsProvider> Pipeline for AnnotatePipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        tracing::debug!("Reading input file: {}", self.config.input_file());
        let data = self.storage.read_file(self.config.input_file()).await?;
        let text = String::from_utf8(data)?;
        Ok(text)
    }

    async fn transform(&self, text: String) -> Result<AnnotateResult> {
        let result = annotate::annotate_text(&text, self.config.style(), self.config.gap());

        tracing::debug!(
            "Annotated {}/{} lines, {} hanzi",
            result.annotated_lines,
            result.total_lines,
            result.hanzi_count
        );
        if result.hanzi_count == 0 {
            tracing::warn!("No Chinese characters found in input, output equals input");
        }

        Ok(result)
    }

    async fn load(&self, result: AnnotateResult) -> Result<String> {
        let output_path = self.resolve_output_path();

        tracing::debug!(
            "Writing {} bytes to {}",
            result.annotated_text.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.annotated_text.as_bytes())
            .await?;

        if self.config.preview() {
            println!("\nPreview:");
            println!("{}", "-".repeat(40));
            println!("{}", result.annotated_text);
            println!("{}", "-".repeat(40));
        }

        Ok(output_path)
    }
}
