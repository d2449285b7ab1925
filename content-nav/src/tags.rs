use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use utils_common::models::ContentItem;

use crate::config::Labels;
use crate::models::{TagEntry, TagFrequency};

// slug 中不保留的字符
static SLUG_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s_-]").expect("valid slug regex"));
static SLUG_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("valid whitespace regex"));

/// 统计标签频率
///
/// 标签区分大小写，按出现次数降序排列；次数相同时保持首次出现的顺序。
pub fn aggregate_tags<'a, I>(items: I) -> Vec<TagFrequency>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let mut counts: Vec<TagFrequency> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for item in items {
        // 同一条目内的重复标签只计一次
        let mut seen: HashSet<&str> = HashSet::new();
        for tag in &item.tags {
            if !seen.insert(tag.as_str()) {
                continue;
            }
            match slots.get(tag.as_str()) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    slots.insert(tag.as_str(), counts.len());
                    counts.push(TagFrequency {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// 标签侧边栏条目：附带显示名称和 slug
pub fn tag_entries(frequencies: &[TagFrequency], labels: &Labels) -> Vec<TagEntry> {
    frequencies
        .iter()
        .map(|freq| TagEntry {
            tag: freq.tag.clone(),
            label: labels.display(&freq.tag),
            slug: tag_slug(&freq.tag),
            count: freq.count,
        })
        .collect()
}

/// 标签页 URL 使用的 slug：小写，去掉标点，空白替换为 `-`
pub fn tag_slug(tag: &str) -> String {
    let lower = tag.trim().to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lower, "");
    SLUG_SPACE.replace_all(&stripped, "-").into_owned()
}

/// 标签页中的文章
pub fn items_with_tag<'a>(items: &'a [ContentItem], slug: &str) -> Vec<&'a ContentItem> {
    items
        .iter()
        .filter(|item| item.tags.iter().any(|tag| tag_slug(tag) == slug))
        .collect()
}
