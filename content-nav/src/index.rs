use std::collections::{HashMap, HashSet};

use log::{info, warn};
use utils_common::models::ContentItem;

use crate::error::IndexError;
use crate::models::{ContentIndex, TopicGroup};
use crate::order::ManualOrder;

/// 构建内容索引
///
/// 重复的 slug 或路径采用"保留首个"策略：后出现的条目被丢弃，
/// 并记录到 `diagnostics` 中。
pub fn build_index<I>(items: I, order: &ManualOrder) -> ContentIndex
where
    I: IntoIterator<Item = ContentItem>,
{
    let (unique, diagnostics) = dedup_items(items);
    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    let sorted = sort_items(unique, order);
    let groups = group_by_topic(&sorted);

    info!(
        "索引构建完成，条目数量: {}, 主题数量: {}, 丢弃重复: {}",
        sorted.len(),
        groups.len(),
        diagnostics.len()
    );

    ContentIndex {
        sorted,
        groups,
        diagnostics,
    }
}

/// 构建内容索引，遇到重复条目时直接失败
pub fn build_index_strict<I>(items: I, order: &ManualOrder) -> Result<ContentIndex, IndexError>
where
    I: IntoIterator<Item = ContentItem>,
{
    let (unique, diagnostics) = dedup_items(items);
    if let Some(first) = diagnostics.into_iter().next() {
        return Err(first);
    }

    let sorted = sort_items(unique, order);
    let groups = group_by_topic(&sorted);
    Ok(ContentIndex {
        sorted,
        groups,
        diagnostics: Vec::new(),
    })
}

// 按 slug 和路径去重，保留首次出现的条目
fn dedup_items<I>(items: I) -> (Vec<ContentItem>, Vec<IndexError>)
where
    I: IntoIterator<Item = ContentItem>,
{
    let mut seen_slugs = HashSet::new();
    let mut seen_paths = HashSet::new();
    let mut unique = Vec::new();
    let mut diagnostics = Vec::new();

    for item in items {
        let path_key = item.path.trim_matches('/').to_string();

        if seen_slugs.contains(&item.slug) {
            diagnostics.push(IndexError::DuplicateSlug {
                slug: item.slug,
                path: item.path,
            });
            continue;
        }
        if seen_paths.contains(&path_key) {
            diagnostics.push(IndexError::DuplicatePath {
                path: item.path,
                slug: item.slug,
            });
            continue;
        }

        seen_slugs.insert(item.slug.clone());
        seen_paths.insert(path_key);
        unique.push(item);
    }

    (unique, diagnostics)
}

/// 默认按日期倒序（稳定排序），再应用手动排序表
pub fn sort_items(mut items: Vec<ContentItem>, order: &ManualOrder) -> Vec<ContentItem> {
    items.sort_by(|a, b| b.date.cmp(&a.date));
    order.apply(&mut items);
    items
}

/// 按主题分组，分组顺序为主题在列表中首次出现的顺序
///
/// 没有主题的条目归入空主题分组；所有条目都没有主题时只返回一个空主题分组。
pub fn group_by_topic(sorted: &[ContentItem]) -> Vec<TopicGroup> {
    let mut groups: Vec<TopicGroup> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for item in sorted {
        let slot = *slots.entry(item.topic_key()).or_insert_with(|| {
            groups.push(TopicGroup {
                topic: item.topic_key().to_string(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item.clone());
    }

    groups
}
