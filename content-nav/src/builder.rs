use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use utils_common::compression::CodecError;
use utils_common::models::ContentItem;

use crate::config::SiteConfig;
use crate::error::IndexError;
use crate::index::{build_index, build_index_strict};
use crate::models::{ContentIndex, NavBundle};

/// 内容索引构建器
pub struct IndexBuilder {
    config: SiteConfig,
    items: Vec<ContentItem>,
}

impl IndexBuilder {
    /// 创建新的索引构建器
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// 已添加的条目数量
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// 按添加顺序排列的原始条目
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// 添加条目，草稿会被忽略
    pub fn add_item(&mut self, item: ContentItem) {
        if !item.draft {
            self.items.push(item);
        }
    }

    /// 添加条目，包括草稿
    pub fn add_item_with_drafts(&mut self, item: ContentItem) {
        self.items.push(item);
    }

    /// 构建索引，重复条目保留首个
    pub fn build(&self) -> ContentIndex {
        build_index(self.items.iter().cloned(), &self.config.order)
    }

    /// 构建索引，遇到重复条目时失败
    pub fn build_strict(&self) -> Result<ContentIndex, IndexError> {
        build_index_strict(self.items.iter().cloned(), &self.config.order)
    }

    /// 浏览器端使用的索引包
    ///
    /// 保存原始条目而不是排序结果，浏览器端用同样的输入重新构建索引和标签统计。
    pub fn bundle(&self) -> NavBundle {
        NavBundle {
            items: self.items.clone(),
            config: self.config.clone(),
        }
    }

    /// 压缩并保存索引包，返回写入的字节数
    pub fn save_bundle(&self, path: &Path) -> Result<usize, CodecError> {
        let data = self.bundle().encode()?;
        let mut file = File::create(path)?;
        file.write_all(&data)?;

        info!("索引包已写入文件: {}，大小: {} 字节", path.display(), data.len());
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(slug: &str, day: u32) -> ContentItem {
        let date = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        ContentItem::new(slug, format!("writing/{}", slug), slug, date)
    }

    #[test]
    fn drafts_are_skipped_unless_requested() {
        let mut draft = item("draft", 2);
        draft.draft = true;

        let mut builder = IndexBuilder::new(SiteConfig::default());
        builder.add_item(item("a", 1));
        builder.add_item(draft.clone());
        assert_eq!(builder.item_count(), 1);

        builder.add_item_with_drafts(draft);
        assert_eq!(builder.build().sorted.len(), 2);
    }

    #[test]
    fn saved_bundle_keeps_input_order_and_rebuilds_same_index() {
        let mut builder = IndexBuilder::new(SiteConfig::default());
        builder.add_item(item("old", 1));
        builder.add_item(item("new", 5));
        let index = builder.build();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav_bundle.bin");
        let written = builder.save_bundle(&path).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len(), written);
        let bundle = NavBundle::decode(&data).unwrap();
        let slugs: Vec<&str> = bundle.items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["old", "new"]);
        assert_eq!(bundle.config, SiteConfig::default());

        let rebuilt = build_index(bundle.items, &bundle.config.order);
        assert_eq!(rebuilt.sorted, index.sorted);
    }
}
