use crate::core::setup::{env_bin, SetupStep};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENV_DIR: &str = ".venv";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_PACKAGE: &str = "pypinyin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
    pub extra_steps: Option<Vec<ExtraStep>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_env_dir")]
    pub dir: String,
    pub python: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraStep {
    pub name: String,
    pub program: String,
    pub args: Option<Vec<String>>,
}

fn default_env_dir() -> String {
    DEFAULT_ENV_DIR.to_string()
}

fn default_packages() -> Vec<String> {
    vec![DEFAULT_PACKAGE.to_string()]
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            dir: default_env_dir(),
            python: None,
        }
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            packages: default_packages(),
            extra_steps: None,
        }
    }
}

impl SetupConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        tracing::debug!("Loading setup config from: {}", path);
        let content = std::fs::read_to_string(Path::new(path))?;
        let content = Self::interpolate_env_vars(&content);
        let config: SetupConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// 將設定檔中的 ${VAR} 以環境變數展開，未定義的保持原樣
    fn interpolate_env_vars(content: &str) -> String {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });
        result.into_owned()
    }

    pub fn python(&self) -> &str {
        self.environment.python.as_deref().unwrap_or(DEFAULT_PYTHON)
    }

    /// 對應原始安裝腳本的三個動作，改為逐步檢查的計畫：
    /// 建環境、確認環境直譯器可用（取代 shell 的 activate）、裝套件，
    /// 其後接上設定檔裡的額外步驟。
    pub fn plan(&self) -> Vec<SetupStep> {
        let env_dir = &self.environment.dir;
        let mut steps = vec![
            SetupStep::new(
                "create virtual environment",
                self.python(),
                vec!["-m".to_string(), "venv".to_string(), env_dir.clone()],
            ),
            SetupStep::new(
                "verify environment interpreter",
                &env_bin(env_dir, "python"),
                vec!["--version".to_string()],
            ),
        ];

        if !self.packages.is_empty() {
            let mut args = vec!["install".to_string()];
            args.extend(self.packages.iter().cloned());
            steps.push(SetupStep::new(
                "install packages",
                &env_bin(env_dir, "pip"),
                args,
            ));
        }

        if let Some(extra) = &self.extra_steps {
            for step in extra {
                steps.push(SetupStep::new(
                    &step.name,
                    &step.program,
                    step.args.clone().unwrap_or_default(),
                ));
            }
        }

        steps
    }
}

impl Validate for SetupConfig {
    fn validate(&self) -> Result<()> {
        validate_path("environment.dir", &self.environment.dir)?;
        validate_non_empty_string("environment.dir", &self.environment.dir)?;

        if let Some(python) = &self.environment.python {
            validate_non_empty_string("environment.python", python)?;
        }

        for package in &self.packages {
            validate_non_empty_string("packages", package)?;
        }

        if let Some(extra) = &self.extra_steps {
            for step in extra {
                validate_non_empty_string("extra_steps.name", &step.name)?;
                validate_non_empty_string("extra_steps.program", &step.program)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_plan() {
        let config = SetupConfig::default();
        let steps = config.plan();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].name, "create virtual environment");
        assert_eq!(steps[0].program, "python3");
        assert_eq!(steps[0].args, vec!["-m", "venv", ".venv"]);
        assert_eq!(steps[1].name, "verify environment interpreter");
        assert_eq!(steps[2].name, "install packages");
        assert!(steps[2].args.contains(&"pypinyin".to_string()));
    }

    #[test]
    fn test_plan_skips_install_without_packages() {
        let config = SetupConfig {
            packages: vec![],
            ..SetupConfig::default()
        };
        let steps = config.plan();
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.name != "install packages"));
    }

    #[test]
    fn test_plan_appends_extra_steps() {
        let config = SetupConfig {
            extra_steps: Some(vec![ExtraStep {
                name: "freeze".to_string(),
                program: ".venv/bin/pip".to_string(),
                args: Some(vec!["freeze".to_string()]),
            }]),
            ..SetupConfig::default()
        };
        let steps = config.plan();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[3].name, "freeze");
    }

    #[test]
    fn test_interpolate_env_vars() {
        std::env::set_var("PA_TEST_HOME", "/tmp/pa");
        let content = "dir = \"${PA_TEST_HOME}/venv\"\nother = \"${PA_UNDEFINED_VAR}\"";
        let resolved = SetupConfig::interpolate_env_vars(content);
        assert!(resolved.contains("/tmp/pa/venv"));
        assert!(resolved.contains("${PA_UNDEFINED_VAR}"));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
            packages = ["pypinyin", "requests"]

            [environment]
            dir = "env"
            python = "python3.11"

            [[extra_steps]]
            name = "freeze"
            program = "env/bin/pip"
            args = ["freeze"]
        "#;
        let config: SetupConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.environment.dir, "env");
        assert_eq!(config.python(), "python3.11");
        assert_eq!(config.packages.len(), 2);
        assert_eq!(config.extra_steps.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_validate_rejects_empty_package_name() {
        let config = SetupConfig {
            packages: vec!["".to_string()],
            ..SetupConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_env_dir() {
        let config = SetupConfig {
            environment: EnvironmentConfig {
                dir: "".to_string(),
                python: None,
            },
            ..SetupConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
