use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::upper_first;
use crate::order::ManualOrder;

/// 默认每页文章数
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("配置无效: {0}")]
    Invalid(String),
}

/// 显示名称表 - 栏目名、标签名到本地化名称的映射
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.0.insert(key.into(), label.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// 显示名称：有映射时使用映射值，否则使用原始值，并将首字母大写
    pub fn display(&self, key: &str) -> String {
        upper_first(self.get(key).unwrap_or(key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut labels = Labels::new();
        for (key, label) in iter {
            labels.insert(key, label);
        }
        labels
    }
}

/// 站点配置 - 启动时加载一次，之后只读
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// 列表页每页文章数
    pub page_size: usize,
    /// 栏目与标签的显示名称
    pub labels: Labels,
    /// 手动排序表
    pub order: ManualOrder,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            labels: Labels::default(),
            order: ManualOrder::default(),
        }
    }
}

impl SiteConfig {
    /// 从 TOML 文本解析配置
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size 必须大于 0".to_string()));
        }
        Ok(())
    }
}
