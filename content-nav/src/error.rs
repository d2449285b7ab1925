use serde::Serialize;
use thiserror::Error;

/// 索引构建与导航解析中可能出现的错误
///
/// 除 `MalformedContentItem` 外，这些错误都在构建期作为诊断信息出现，
/// 不会传递给渲染层。
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexError {
    #[error("重复的 slug '{slug}'，已忽略路径 '{path}'")]
    DuplicateSlug { slug: String, path: String },

    #[error("重复的路径 '{path}'，已忽略 slug '{slug}'")]
    DuplicatePath { path: String, slug: String },

    #[error("未找到内容: '{slug}'")]
    NotFound { slug: String },

    #[error("内容条目格式错误 '{file}': {reason}")]
    MalformedContentItem { file: String, reason: String },
}

impl IndexError {
    pub(crate) fn malformed(file: &str, reason: impl Into<String>) -> Self {
        IndexError::MalformedContentItem {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}
