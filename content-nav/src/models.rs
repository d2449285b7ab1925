use serde::{Deserialize, Serialize};
use utils_common::compression::{from_compressed_with_max_version, to_compressed, CodecError};
use utils_common::models::ContentItem;

use crate::config::SiteConfig;
use crate::error::IndexError;

/// 索引包版本号
pub const BUNDLE_VERSION: [u8; 2] = [1, 0];

/// 主题分组 - 侧边栏中的一个分区
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TopicGroup {
    /// 主题名称，空字符串表示未分组
    pub topic: String,
    /// 分组内的条目，顺序与排序后的列表一致
    pub items: Vec<ContentItem>,
}

impl TopicGroup {
    /// 具名主题渲染为可折叠分区，未分组条目平铺展示
    pub fn is_collapsible(&self) -> bool {
        !self.topic.is_empty()
    }

    /// 分组中是否包含当前条目，用于默认展开
    pub fn contains(&self, slug: &str) -> bool {
        self.items.iter().any(|item| item.slug == slug)
    }
}

/// 内容索引 - 排序后的条目、主题分组和构建期诊断
#[derive(Serialize, Debug, Clone, Default)]
pub struct ContentIndex {
    pub sorted: Vec<ContentItem>,
    pub groups: Vec<TopicGroup>,
    /// 被丢弃的重复条目
    pub diagnostics: Vec<IndexError>,
}

/// 面包屑中的一项
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub url: String,
}

/// 面包屑导航
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    /// 可点击的祖先路径
    pub links: Vec<Crumb>,
    /// 当前页面（叶子段），不渲染为链接
    pub current: Option<Crumb>,
}

impl BreadcrumbTrail {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.current.is_none()
    }
}

/// 当前条目的导航状态
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Navigation<'a> {
    /// 当前条目的主题，用于展开对应分区
    pub active_topic: Option<&'a str>,
    pub breadcrumb: BreadcrumbTrail,
    /// 排序列表中的前一项（较新的文章）
    pub prev: Option<&'a ContentItem>,
    /// 排序列表中的后一项（较旧的文章）
    pub next: Option<&'a ContentItem>,
}

impl Navigation<'_> {
    /// 未找到当前条目时的结果，只保留面包屑
    pub fn detached(breadcrumb: BreadcrumbTrail) -> Self {
        Navigation {
            active_topic: None,
            breadcrumb,
            prev: None,
            next: None,
        }
    }
}

/// 标签频率
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagFrequency {
    pub tag: String,
    pub count: usize,
}

/// 标签侧边栏中的一项
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub tag: String,
    /// 本地化后的显示名称
    pub label: String,
    /// 标签页 URL 中使用的 slug
    pub slug: String,
    pub count: usize,
}

/// 浏览器端使用的索引包：排序后的条目和站点配置
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavBundle {
    pub items: Vec<ContentItem>,
    pub config: SiteConfig,
}

impl NavBundle {
    /// 压缩编码
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        to_compressed(self, BUNDLE_VERSION)
    }

    /// 从压缩数据恢复
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        from_compressed_with_max_version(data, BUNDLE_VERSION[0])
    }
}
