use crate::utils::error::{AnnotateError, Result};
use crate::utils::monitor::SystemMonitor;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// 一個安裝步驟：對外部工具的單次呼叫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
}

impl SetupStep {
    pub fn new(name: &str, program: &str, args: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args,
        }
    }

    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// 單一步驟的執行紀錄
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step_name: String,
    pub command_line: String,
    pub duration: Duration,
    pub stdout: String,
}

/// 環境安裝步驟的順序執行器。
///
/// 每一步都檢查結束狀態，第一個失敗的步驟會中止整個流程，
/// 後續步驟不會執行，錯誤會帶出失敗步驟名稱與 stderr。
pub struct SetupRunner {
    steps: Vec<SetupStep>,
    monitor: SystemMonitor,
    execution_id: String,
}

impl SetupRunner {
    pub fn new(execution_id: String) -> Self {
        Self {
            steps: Vec::new(),
            monitor: SystemMonitor::new(false),
            execution_id,
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn add_step(&mut self, step: SetupStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[SetupStep] {
        &self.steps
    }

    /// 依序執行所有步驟，遇到第一個失敗即中止
    pub async fn execute_all(&self) -> Result<Vec<StepReport>> {
        let mut reports = Vec::new();
        let total = self.steps.len();

        tracing::info!("🚀 Setup run started: {} ({} steps)", self.execution_id, total);

        for (index, step) in self.steps.iter().enumerate() {
            println!("[{}/{}] {}...", index + 1, total, step.name);
            tracing::info!("🔧 Running step: {} ({})", step.name, step.command_line());

            let start_time = Instant::now();
            let output = Command::new(&step.program)
                .args(&step.args)
                .output()
                .await
                .map_err(|e| AnnotateError::SetupStepError {
                    step: step.name.clone(),
                    detail: format!("failed to launch '{}': {}", step.program, e),
                })?;
            let duration = start_time.elapsed();

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim();
                tracing::error!("❌ Step failed: {} ({})", step.name, output.status);
                return Err(AnnotateError::SetupStepError {
                    step: step.name.clone(),
                    detail: if stderr.is_empty() {
                        format!("'{}' exited with {}", step.command_line(), output.status)
                    } else {
                        format!(
                            "'{}' exited with {}: {}",
                            step.command_line(),
                            output.status,
                            stderr
                        )
                    },
                });
            }

            tracing::info!("✅ Step finished: {} ({:?})", step.name, duration);
            self.monitor.log_phase(&step.name);

            reports.push(StepReport {
                step_name: step.name.clone(),
                command_line: step.command_line(),
                duration,
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            });
        }

        self.monitor.log_final_stats();
        Ok(reports)
    }

    pub fn get_execution_summary(reports: &[StepReport]) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        summary.insert(
            "total_steps".to_string(),
            serde_json::Value::Number(reports.len().into()),
        );

        let total_duration_ms: u64 = reports.iter().map(|r| r.duration.as_millis() as u64).sum();
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::Number(total_duration_ms.into()),
        );

        let executed_steps: Vec<serde_json::Value> = reports
            .iter()
            .map(|r| serde_json::Value::String(r.step_name.clone()))
            .collect();
        summary.insert(
            "executed_steps".to_string(),
            serde_json::Value::Array(executed_steps),
        );

        summary
    }
}

/// 虛擬環境內可執行檔的路徑（Windows 下是 Scripts\，其餘是 bin/）
pub fn env_bin(env_dir: &str, exe: &str) -> String {
    if cfg!(windows) {
        format!("{}\\Scripts\\{}.exe", env_dir, exe)
    } else {
        format!("{}/bin/{}", env_dir, exe)
    }
}
