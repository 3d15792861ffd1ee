use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::models::DataSourceKind;
use crate::utils::error::{AppError, AppResult};

/// 对比槽位上限
pub const MAX_COMPARISON_SLOTS: usize = 4;

/// 环境变量默认前缀，例如 `COMPARE__DATA_SOURCE__BASE_URL`
pub const DEFAULT_ENV_PREFIX: &str = "COMPARE";

/// 应用程序主配置结构
/// 包含应用程序运行所需的所有配置信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 应用程序基本设置
    #[serde(default)]
    pub app_settings: AppSettings,
    /// 数据源配置
    #[serde(default)]
    pub data_source: DataSourceConfig,
    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,
    /// 日志配置
    #[serde(default)]
    pub logging_config: LoggingConfig,
}

/// 应用程序基本设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// 应用程序名称
    pub app_name: String,
    /// 运行环境 (development, testing, production)
    pub environment: String,
    /// 对比槽位数量（1..=4）
    pub max_comparison_slots: usize,
}

/// 数据源配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// 数据源类型 (http, directory)
    pub kind: DataSourceKind,
    /// HTTP数据源的基础地址
    pub base_url: String,
    /// 目录数据源的根目录
    pub directory: PathBuf,
    /// 单次请求超时时间（毫秒）
    pub request_timeout_ms: u64,
    /// 收发器资源名
    pub transceivers_resource: String,
    /// 测试类别资源名
    pub categories_resource: String,
    /// 测试用例资源名
    pub test_cases_resource: String,
    /// 测试结果资源名模板，`{id}` 替换为收发器ID
    pub results_resource_pattern: String,
}

impl DataSourceConfig {
    /// 某个收发器的测试结果资源名
    pub fn results_resource(&self, transceiver_id: &str) -> String {
        self.results_resource_pattern.replace("{id}", transceiver_id)
    }
}

/// 导出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 导出文件输出目录
    pub output_dir: PathBuf,
    /// 导出文件名前缀
    pub file_prefix: String,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 日志文件路径，为空时只输出到控制台
    pub log_file_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "InterconnectCompare".to_string(),
            environment: "development".to_string(),
            max_comparison_slots: MAX_COMPARISON_SLOTS,
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            kind: DataSourceKind::Http,
            base_url: "http://127.0.0.1:5173/data".to_string(),
            directory: PathBuf::from("data"),
            request_timeout_ms: 15000,
            transceivers_resource: "transceivers.json".to_string(),
            categories_resource: "test-categories.json".to_string(),
            test_cases_resource: "test-cases.json".to_string(),
            results_resource_pattern: "test-results-{id}.json".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            file_prefix: "interconnect-test-results".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file_path: None,
        }
    }
}

/// 配置管理器
/// 负责加载、保存和管理应用程序配置
///
/// 加载顺序：默认值 → 配置文件（可选，JSON）→ 环境变量
pub struct ConfigManager {
    config: AppConfig,
    config_file_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new(config_file_path: Option<PathBuf>) -> Self {
        Self {
            config: AppConfig::default(),
            config_file_path,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// 使用自定义环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 按层加载配置并验证
    pub fn load(&mut self) -> AppResult<()> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = &self.config_file_path {
            builder = builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Json)
                    .required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: AppConfig = builder.build()?.try_deserialize()?;
        self.config = loaded;
        self.validate_config()
    }

    /// 将配置保存到文件
    pub async fn save_to_file(&self) -> AppResult<()> {
        let path = self
            .config_file_path
            .as_ref()
            .ok_or_else(|| AppError::configuration_error("未指定配置文件路径"))?;

        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await
                    .map_err(|e| AppError::io_error(format!("创建配置目录失败: {}", e), e.kind().to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(&self.config)
            .map_err(|e| AppError::json_error(format!("序列化配置失败: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| AppError::io_error(format!("写入配置文件失败: {}", e), e.kind().to_string()))?;

        Ok(())
    }

    /// 获取配置的只读引用
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取配置的可变引用
    pub fn get_config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// 验证配置的有效性
    pub fn validate_config(&self) -> AppResult<()> {
        validate(&self.config)
    }

    /// 重置为默认配置
    pub fn reset_to_default(&mut self) {
        self.config = AppConfig::default();
    }
}

/// 验证配置的有效性
pub fn validate(config: &AppConfig) -> AppResult<()> {
    // 验证环境配置
    let valid_environments = ["development", "testing", "production"];
    if !valid_environments.contains(&config.app_settings.environment.as_str()) {
        return Err(AppError::configuration_error(format!(
            "无效的环境配置: {}，有效值: {:?}",
            config.app_settings.environment, valid_environments
        )));
    }

    let slots = config.app_settings.max_comparison_slots;
    if slots == 0 || slots > MAX_COMPARISON_SLOTS {
        return Err(AppError::configuration_error(format!(
            "无效的对比槽位数量: {}，有效范围: 1..={}",
            slots, MAX_COMPARISON_SLOTS
        )));
    }

    // 验证日志级别
    let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.logging_config.log_level.as_str()) {
        return Err(AppError::configuration_error(format!(
            "无效的日志级别: {}，有效值: {:?}",
            config.logging_config.log_level, valid_log_levels
        )));
    }

    if config.data_source.kind == DataSourceKind::Http && config.data_source.base_url.trim().is_empty() {
        return Err(AppError::configuration_error("HTTP数据源地址不能为空"));
    }

    if !config.data_source.results_resource_pattern.contains("{id}") {
        return Err(AppError::configuration_error(format!(
            "测试结果资源模板缺少 {{id}} 占位符: {}",
            config.data_source.results_resource_pattern
        )));
    }

    Ok(())
}
