use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct AnnotateEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnnotateEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting pinyin annotation...");

        println!("Reading input...");
        let text = self.pipeline.extract().await?;
        println!("Read {} characters", text.chars().count());
        self.monitor.log_phase("Extract");

        println!("Annotating text...");
        let result = self.pipeline.transform(text).await?;
        println!(
            "Annotated {} of {} lines ({} hanzi)",
            result.annotated_lines, result.total_lines, result.hanzi_count
        );
        self.monitor.log_phase("Transform");

        println!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
