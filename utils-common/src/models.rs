use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 内容条目 - 一篇可发布的文章或页面
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContentItem {
    /// 唯一标识符（在整个内容集合内唯一）
    pub slug: String,
    /// 路由路径，以 `/` 分隔，第一段为所属栏目（如 "writing"）
    pub path: String,
    /// 标题
    pub title: String,
    /// 发布日期
    pub date: DateTime<Utc>,
    /// 标签列表，按首次出现顺序去重
    #[serde(default)]
    pub tags: Vec<String>,
    /// 侧边栏分组主题，缺省时归入空主题
    #[serde(default)]
    pub topic: Option<String>,
    /// 摘要
    #[serde(default)]
    pub summary: Option<String>,
    /// 草稿不会进入索引
    #[serde(default)]
    pub draft: bool,
}

impl ContentItem {
    /// 创建内容条目，标签会按首次出现顺序去重
    pub fn new(
        slug: impl Into<String>,
        path: impl Into<String>,
        title: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            slug: slug.into(),
            path: path.into(),
            title: title.into(),
            date,
            tags: Vec::new(),
            topic: None,
            summary: None,
            draft: false,
        }
    }

    /// 设置标签
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedup_tags(tags.into_iter().map(Into::into));
        self
    }

    /// 设置主题
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// 所属栏目：路径的第一段
    pub fn section(&self) -> &str {
        self.path
            .split('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("")
    }

    /// 分组键，没有主题时为空字符串
    pub fn topic_key(&self) -> &str {
        self.topic.as_deref().unwrap_or("")
    }
}

/// 去除空标签和重复标签，保留首次出现顺序
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}
