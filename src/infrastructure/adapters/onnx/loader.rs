//! Model Artifact Loader - 启动时读取模型文件
//!
//! 两个 ONNX 模型，外加训练列和故障类型标签表两个 JSON 文件。
//! 任何一个缺失或无效时服务以降级模式运行。

use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;

use super::session::open_session;
use super::{OnnxBinaryClassifier, OnnxMultiLabelClassifier};
use crate::application::inference::FailureModels;
use crate::application::ports::ClassifierError;
use crate::config::ModelsConfig;
use crate::domain::diagnosis::TrainedColumnSchema;

/// 模型文件错误
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid artifact {path}: {message}")]
    Invalid { path: String, message: String },

    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),
}

impl ArtifactError {
    fn invalid(path: &Path, message: impl ToString) -> Self {
        Self::Invalid {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn parse(path: &Path, message: impl ToString) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ArtifactError::NotFound(path.display().to_string()),
        _ => ArtifactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })?;

    serde_json::from_str(&text).map_err(|e| ArtifactError::parse(path, e))
}

/// 在阻塞线程里创建会话并包装成分类器
async fn read_onnx<C, F>(path: PathBuf, wrap: F) -> Result<C, ArtifactError>
where
    C: Send + 'static,
    F: FnOnce(ort::session::Session) -> Result<C, ClassifierError> + Send + 'static,
{
    if !fs::try_exists(&path).await.unwrap_or(false) {
        return Err(ArtifactError::NotFound(path.display().to_string()));
    }

    tokio::task::spawn_blocking(move || {
        let session = open_session(&path).map_err(|e| ArtifactError::parse(&path, e))?;
        wrap(session).map_err(|e| ArtifactError::invalid(&path, e))
    })
    .await
    .map_err(|e| ArtifactError::Inconsistent(format!("model loading task failed: {}", e)))?
}

/// 加载并校验全部模型文件
pub async fn load_models(config: &ModelsConfig) -> Result<FailureModels, ArtifactError> {
    let classes = config.failure_model_classes.clone();
    let gate = read_onnx(config.failure_model_path(), move |session| {
        OnnxBinaryClassifier::new(session, classes)
    })
    .await?;

    let failure_types =
        read_onnx(config.failure_type_model_path(), OnnxMultiLabelClassifier::new).await?;

    let columns_path = config.model_columns_path();
    let columns: Vec<String> = read_json(&columns_path).await?;
    let columns =
        TrainedColumnSchema::new(columns).map_err(|e| ArtifactError::invalid(&columns_path, e))?;

    let labels: Vec<String> = read_json(&config.failure_type_labels_path()).await?;

    FailureModels::new(Arc::new(gate), Arc::new(failure_types), columns, labels)
        .map_err(|e| ArtifactError::Inconsistent(e.to_string()))
}

/// 加载模型，失败时记录错误并返回 None（降级模式）
pub async fn load_models_or_degraded(config: &ModelsConfig) -> Option<FailureModels> {
    match load_models(config).await {
        Ok(models) => {
            tracing::info!(
                dir = ?config.dir,
                columns = models.columns().len(),
                labels = ?models.labels(),
                "Prediction models loaded"
            );
            Some(models)
        }
        Err(e) => {
            tracing::error!(
                dir = ?config.dir,
                error = %e,
                "Failed to load prediction models, diagnosis is unavailable"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::inference::DiagnosisPipeline;
    use crate::domain::diagnosis::Verdict;
    use crate::domain::reading::{MachineType, RawReading};
    use tempfile::{tempdir, TempDir};

    const LABELS: &str = r#"["TWF", "HDF", "PWF", "OSF"]"#;

    fn bundled_config() -> ModelsConfig {
        ModelsConfig {
            dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("models"),
            ..ModelsConfig::default()
        }
    }

    /// 复制随附模型到临时目录，列和标签文件按需替换
    fn artifacts(columns: Option<&str>, labels: &str) -> (TempDir, ModelsConfig) {
        let bundled = bundled_config();
        let dir = tempdir().unwrap();
        let config = ModelsConfig {
            dir: dir.path().to_path_buf(),
            ..ModelsConfig::default()
        };
        std::fs::copy(bundled.failure_model_path(), config.failure_model_path()).unwrap();
        std::fs::copy(
            bundled.failure_type_model_path(),
            config.failure_type_model_path(),
        )
        .unwrap();
        match columns {
            Some(columns) => std::fs::write(config.model_columns_path(), columns).unwrap(),
            None => {
                std::fs::copy(bundled.model_columns_path(), config.model_columns_path()).unwrap();
            }
        }
        std::fs::write(config.failure_type_labels_path(), labels).unwrap();
        (dir, config)
    }

    #[tokio::test]
    async fn test_bundled_models_load() {
        let models = load_models(&bundled_config()).await.unwrap();
        assert_eq!(models.columns().len(), 7);
        assert_eq!(models.labels(), ["TWF", "HDF", "PWF", "OSF"]);

        let pipeline = DiagnosisPipeline::new(models);

        let worn = RawReading::new(MachineType::L, 298.1, 308.6, 1300, 62.4, 215).unwrap();
        let diagnosis = pipeline.diagnose(&worn).unwrap();
        assert_eq!(diagnosis.result.verdict, Verdict::Failure);
        assert_eq!(diagnosis.result.confidence, "62.67%");
        let flags = diagnosis.failure_flags.unwrap();
        assert!(flags.twf);
        assert!(!flags.osf);

        let fresh = RawReading::new(MachineType::M, 298.1, 308.0, 1500, 40.0, 10).unwrap();
        let diagnosis = pipeline.diagnose(&fresh).unwrap();
        assert_eq!(diagnosis.result.verdict, Verdict::Normal);
        assert!(diagnosis.failure_flags.is_none());
    }

    #[tokio::test]
    async fn test_missing_artifact() {
        let (_dir, config) = artifacts(None, LABELS);
        std::fs::remove_file(config.failure_type_model_path()).unwrap();

        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::NotFound(_))));
        assert!(load_models_or_degraded(&config).await.is_none());
    }

    #[tokio::test]
    async fn test_unparsable_model() {
        let (_dir, config) = artifacts(None, LABELS);
        std::fs::write(config.failure_model_path(), b"not an onnx graph").unwrap();

        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_unparsable_columns() {
        let (_dir, config) = artifacts(Some("{not json"), LABELS);
        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_columns_are_invalid() {
        let columns = r#"["torque", "torque", "tool_wear", "type_L", "type_M", "air_temperature", "process_temperature"]"#;
        let (_dir, config) = artifacts(Some(columns), LABELS);
        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Invalid { .. })));
    }

    #[tokio::test]
    async fn test_column_count_drift_is_inconsistent() {
        let columns = r#"["air_temperature", "process_temperature", "rotational_speed", "torque", "tool_wear", "type_L"]"#;
        let (_dir, config) = artifacts(Some(columns), LABELS);
        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Inconsistent(_))));
    }

    #[tokio::test]
    async fn test_label_count_drift_is_inconsistent() {
        let (_dir, config) = artifacts(None, r#"["TWF", "HDF", "PWF"]"#);
        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Inconsistent(_))));
    }

    #[tokio::test]
    async fn test_single_output_gate_is_invalid() {
        let (_dir, config) = artifacts(None, LABELS);
        std::fs::copy(config.failure_type_model_path(), config.failure_model_path()).unwrap();

        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Invalid { .. })));
    }

    #[tokio::test]
    async fn test_gate_class_list_drift_is_invalid() {
        let (_dir, mut config) = artifacts(None, LABELS);
        config.failure_model_classes = vec![0, 1, 2];

        let result = load_models(&config).await;
        assert!(matches!(result, Err(ArtifactError::Invalid { .. })));
    }
}
