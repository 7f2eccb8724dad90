pub mod cli;
pub mod setup_config;

#[cfg(feature = "cli")]
pub use cli_args::{AnnotateConfig, Cli, Command, SetupArgs};

#[cfg(feature = "cli")]
mod cli_args {
    use crate::domain::model::PinyinStyle;
    use crate::domain::ports::OptionsProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_non_empty_string, validate_path, validate_range,
        Validate,
    };
    use clap::{Args, Parser, Subcommand};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Parser)]
    #[command(name = "pinyin-annotate")]
    #[command(about = "Annotate Chinese text files with pinyin readings")]
    pub struct Cli {
        #[command(subcommand)]
        pub command: Command,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Enable system resource monitoring")]
        pub monitor: bool,
    }

    #[derive(Debug, Subcommand)]
    pub enum Command {
        /// 在含漢字的行上方加入拼音列
        Annotate(AnnotateConfig),
        /// 建立舊版 Python 轉換器的虛擬環境並安裝相依套件
        Setup(SetupArgs),
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct AnnotateConfig {
        /// Input Chinese text file
        pub input_file: String,

        /// Output file (defaults to <stem>_pinyin<ext> next to the input)
        #[arg(short, long)]
        pub output: Option<String>,

        /// Pinyin style for the annotation row
        #[arg(long, value_enum, default_value_t = PinyinStyle::Tone)]
        pub style: PinyinStyle,

        /// Minimum spaces between adjacent syllables
        #[arg(long, default_value_t = 1)]
        pub gap: usize,

        /// Print the annotated text to stdout after writing
        #[arg(long)]
        pub preview: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct SetupArgs {
        /// Path to a TOML setup plan (defaults apply when omitted)
        #[arg(short, long)]
        pub config: Option<String>,

        /// Override the virtual environment directory
        #[arg(long)]
        pub env_dir: Option<String>,

        /// Override the packages to install
        #[arg(long, value_delimiter = ',')]
        pub packages: Vec<String>,

        /// Print the resolved plan without executing anything
        #[arg(long)]
        pub dry_run: bool,
    }

    impl OptionsProvider for AnnotateConfig {
        fn input_file(&self) -> &str {
            &self.input_file
        }

        fn output_file(&self) -> Option<&str> {
            self.output.as_deref()
        }

        fn style(&self) -> PinyinStyle {
            self.style
        }

        fn gap(&self) -> usize {
            self.gap
        }

        fn preview(&self) -> bool {
            self.preview
        }
    }

    impl Validate for AnnotateConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input_file", &self.input_file)?;
            validate_non_empty_string("input_file", &self.input_file)?;
            validate_file_extension("input_file", &self.input_file, &["txt", "text", "md"])?;

            if let Some(output) = &self.output {
                validate_path("output", output)?;
                validate_non_empty_string("output", output)?;
            }

            validate_range("gap", self.gap, 1, 8)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn base_config() -> AnnotateConfig {
            AnnotateConfig {
                input_file: "lesson.txt".to_string(),
                output: None,
                style: PinyinStyle::Tone,
                gap: 1,
                preview: false,
            }
        }

        #[test]
        fn test_valid_config_passes() {
            assert!(base_config().validate().is_ok());
        }

        #[test]
        fn test_rejects_empty_input() {
            let config = AnnotateConfig {
                input_file: "".to_string(),
                ..base_config()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_rejects_unsupported_extension() {
            let config = AnnotateConfig {
                input_file: "lesson.pdf".to_string(),
                ..base_config()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_rejects_zero_gap() {
            let config = AnnotateConfig {
                gap: 0,
                ..base_config()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_cli_parses_annotate_subcommand() {
            let cli = Cli::parse_from([
                "pinyin-annotate",
                "annotate",
                "lesson.txt",
                "--style",
                "plain",
                "--preview",
            ]);
            match cli.command {
                Command::Annotate(config) => {
                    assert_eq!(config.input_file, "lesson.txt");
                    assert_eq!(config.style, PinyinStyle::Plain);
                    assert!(config.preview);
                }
                _ => panic!("expected annotate subcommand"),
            }
        }

        #[test]
        fn test_cli_parses_setup_subcommand() {
            let cli = Cli::parse_from([
                "pinyin-annotate",
                "setup",
                "--env-dir",
                "env",
                "--packages",
                "pypinyin,requests",
                "--dry-run",
            ]);
            match cli.command {
                Command::Setup(args) => {
                    assert_eq!(args.env_dir.as_deref(), Some("env"));
                    assert_eq!(args.packages, vec!["pypinyin", "requests"]);
                    assert!(args.dry_run);
                }
                _ => panic!("expected setup subcommand"),
            }
        }
    }
}
