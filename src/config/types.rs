//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 模型文件配置
    #[serde(default)]
    pub models: ModelsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/machine_doctor.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 模型文件配置
///
/// 文件名相对于 `dir`
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,

    /// 一级模型（是否故障），ONNX 格式
    #[serde(default = "default_failure_model")]
    pub failure_model: String,

    /// 一级模型的类别标签，顺序与 probabilities 输出列一致
    ///
    /// ONNX 元数据不带 classlabels，只能由训练侧给出
    #[serde(default = "default_failure_model_classes")]
    pub failure_model_classes: Vec<i64>,

    /// 训练列
    #[serde(default = "default_model_columns")]
    pub model_columns: String,

    /// 二级模型（故障类型），ONNX 格式
    #[serde(default = "default_failure_type_model")]
    pub failure_type_model: String,

    /// 故障类型标签表
    #[serde(default = "default_failure_type_labels")]
    pub failure_type_labels: String,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_failure_model() -> String {
    "failure_model.onnx".to_string()
}

fn default_failure_model_classes() -> Vec<i64> {
    vec![0, 1]
}

fn default_model_columns() -> String {
    "model_columns.json".to_string()
}

fn default_failure_type_model() -> String {
    "failure_type_model.onnx".to_string()
}

fn default_failure_type_labels() -> String {
    "failure_type_labels.json".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: default_models_dir(),
            failure_model: default_failure_model(),
            failure_model_classes: default_failure_model_classes(),
            model_columns: default_model_columns(),
            failure_type_model: default_failure_type_model(),
            failure_type_labels: default_failure_type_labels(),
        }
    }
}

impl ModelsConfig {
    pub fn failure_model_path(&self) -> PathBuf {
        self.dir.join(&self.failure_model)
    }

    pub fn model_columns_path(&self) -> PathBuf {
        self.dir.join(&self.model_columns)
    }

    pub fn failure_type_model_path(&self) -> PathBuf {
        self.dir.join(&self.failure_type_model)
    }

    pub fn failure_type_labels_path(&self) -> PathBuf {
        self.dir.join(&self.failure_type_labels)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
