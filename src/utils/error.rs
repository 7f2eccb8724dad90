use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Setup step '{step}' failed: {detail}")]
    SetupStepError { step: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Processing,
    Setup,
}

impl AnnotateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnnotateError::IoError(_) | AnnotateError::EncodingError(_) => ErrorCategory::Io,
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::TomlError(_)
            | AnnotateError::ValidationError { .. } => ErrorCategory::Config,
            AnnotateError::ProcessingError { .. } | AnnotateError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            AnnotateError::SetupStepError { .. } => ErrorCategory::Setup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::TomlError(_)
            | AnnotateError::ValidationError { .. } => ErrorSeverity::High,
            AnnotateError::ProcessingError { .. } | AnnotateError::SerializationError(_) => {
                ErrorSeverity::High
            }
            AnnotateError::SetupStepError { .. } => ErrorSeverity::Medium,
            AnnotateError::IoError(_) | AnnotateError::EncodingError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AnnotateError::IoError(_) => {
                "檢查檔案路徑是否存在、是否有讀寫權限".to_string()
            }
            AnnotateError::EncodingError(_) => {
                "輸入檔必須是 UTF-8 編碼的文字檔".to_string()
            }
            AnnotateError::TomlError(_) => {
                "檢查設定檔是否為合法的 TOML 格式".to_string()
            }
            AnnotateError::ConfigError { .. }
            | AnnotateError::MissingConfigError { .. }
            | AnnotateError::InvalidConfigValueError { .. }
            | AnnotateError::ValidationError { .. } => {
                "執行 --help 查看參數格式後重新輸入".to_string()
            }
            AnnotateError::ProcessingError { .. } | AnnotateError::SerializationError(_) => {
                "檢查輸入內容，必要時以 --verbose 重跑取得詳細日誌".to_string()
            }
            AnnotateError::SetupStepError { .. } => {
                "確認 python3 與網路可用後重新執行 setup，失敗的步驟可安全重試".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnnotateError::IoError(e) => format!("檔案存取失敗: {}", e),
            AnnotateError::EncodingError(_) => "輸入檔不是合法的 UTF-8 文字".to_string(),
            AnnotateError::SetupStepError { step, detail } => {
                format!("環境安裝在「{}」這一步失敗: {}", step, detail)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
