use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utils_common::models::ContentItem;

type RankTable = BTreeMap<String, BTreeMap<String, u32>>;

/// 手动排序表 - 路径前缀 -> (主题 -> 排名)
///
/// 同一前缀下的条目作为一个整体排列，位置由其中最新的日期决定；
/// 整体内部先按主题排名，未列出的主题排在已排名主题之后，同一排名内保持日期倒序。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "RankTable", into = "RankTable")]
pub struct ManualOrder {
    sections: RankTable,
}

// 条目在最终列表中的位置
struct Placement<'a> {
    anchor: DateTime<Utc>,
    scope: Option<&'a str>,
    rank: Option<u32>,
}

impl ManualOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为某个路径前缀下的主题设置排名
    ///
    /// 前缀两端的 `/` 会被去掉，写法不同的同一前缀合并到一起。
    pub fn insert(&mut self, prefix: impl Into<String>, topic: impl Into<String>, rank: u32) {
        let prefix = prefix.into().trim_matches('/').to_string();
        self.sections
            .entry(prefix)
            .or_default()
            .insert(topic.into(), rank);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// 已配置的前缀数量
    pub fn scope_count(&self) -> usize {
        self.sections.len()
    }

    /// 条目所属的排序范围：匹配最长的路径前缀
    pub fn scope_of(&self, path: &str) -> Option<&str> {
        let path = path.trim_matches('/');
        self.sections
            .keys()
            .map(String::as_str)
            .filter(|prefix| {
                !prefix.is_empty()
                    && path.len() > prefix.len()
                    && path.starts_with(prefix)
                    && path.as_bytes()[prefix.len()] == b'/'
            })
            .max_by_key(|prefix| prefix.len())
    }

    /// 主题在指定范围内的排名
    pub fn rank_of(&self, scope: &str, topic: Option<&str>) -> Option<u32> {
        let ranks = self.sections.get(scope.trim_matches('/'))?;
        topic.and_then(|topic| ranks.get(topic).copied())
    }

    /// 在已按日期排序的列表上应用手动排序
    ///
    /// 排序键只取决于条目本身和整个集合，与输入顺序无关，
    /// 因此对结果再次排序不会改变顺序。
    pub fn apply(&self, items: &mut [ContentItem]) {
        if self.is_empty() {
            return;
        }

        let mut anchors: HashMap<&str, DateTime<Utc>> = HashMap::new();
        for item in items.iter() {
            if let Some(scope) = self.scope_of(&item.path) {
                let anchor = anchors.entry(scope).or_insert(item.date);
                if item.date > *anchor {
                    *anchor = item.date;
                }
            }
        }

        let mut placed: Vec<(Placement, ContentItem)> = items
            .iter()
            .map(|item| {
                let placement = match self.scope_of(&item.path) {
                    Some(scope) => Placement {
                        anchor: anchors.get(scope).copied().unwrap_or(item.date),
                        scope: Some(scope),
                        rank: self.rank_of(scope, item.topic.as_deref()),
                    },
                    None => Placement {
                        anchor: item.date,
                        scope: None,
                        rank: None,
                    },
                };
                (placement, item.clone())
            })
            .collect();

        // 稳定排序：键完全相同的条目保持输入顺序
        placed.sort_by(|(a, x), (b, y)| {
            b.anchor
                .cmp(&a.anchor)
                .then_with(|| a.scope.cmp(&b.scope))
                .then_with(|| compare_rank(a.rank, b.rank))
                .then_with(|| y.date.cmp(&x.date))
        });

        for (slot, (_, item)) in items.iter_mut().zip(placed) {
            *slot = item;
        }
    }
}

impl From<RankTable> for ManualOrder {
    fn from(table: RankTable) -> Self {
        let mut order = ManualOrder::new();
        for (prefix, ranks) in table {
            for (topic, rank) in ranks {
                order.insert(prefix.as_str(), topic, rank);
            }
        }
        order
    }
}

impl From<ManualOrder> for RankTable {
    fn from(order: ManualOrder) -> Self {
        order.sections
    }
}

impl<P, T> FromIterator<(P, T, u32)> for ManualOrder
where
    P: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, T, u32)>>(iter: I) -> Self {
        let mut order = ManualOrder::new();
        for (prefix, topic, rank) in iter {
            order.insert(prefix, topic, rank);
        }
        order
    }
}

// 有排名的在前，排名小的在前
fn compare_rank(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(slug: &str, path: &str, day: u32, topic: Option<&str>) -> ContentItem {
        let date = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        let item = ContentItem::new(slug, path, slug, date);
        match topic {
            Some(topic) => item.with_topic(topic),
            None => item,
        }
    }

    fn slugs(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.slug.as_str()).collect()
    }

    #[test]
    fn longest_prefix_wins() {
        let order: ManualOrder = [
            ("writing/rust/beginner", "基本介紹", 1),
            ("writing/rust/beginner/100-exercises-to-learn-rust", "筆記", 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            order.scope_of("writing/rust/beginner/intro"),
            Some("writing/rust/beginner")
        );
        assert_eq!(
            order.scope_of("/writing/rust/beginner/100-exercises-to-learn-rust/01/"),
            Some("writing/rust/beginner/100-exercises-to-learn-rust")
        );
        assert_eq!(order.scope_of("writing/rust/beginner"), None);
        assert_eq!(order.scope_of("writing/rust/beginners-guide"), None);
    }

    #[test]
    fn ranked_topics_come_first_and_unranked_keep_date_order() {
        let order: ManualOrder = [
            ("writing/dsa", "基本介紹", 1),
            ("writing/dsa", "實作", 3),
        ]
        .into_iter()
        .collect();

        // 已按日期倒序
        let mut items = vec![
            item("impl-b", "writing/dsa/impl-b", 9, Some("實作")),
            item("misc-new", "writing/dsa/misc-new", 8, Some("雜項")),
            item("intro", "writing/dsa/intro", 7, Some("基本介紹")),
            item("misc-old", "writing/dsa/misc-old", 5, None),
            item("impl-a", "writing/dsa/impl-a", 3, Some("實作")),
        ];
        order.apply(&mut items);

        assert_eq!(
            slugs(&items),
            vec!["intro", "impl-b", "impl-a", "misc-new", "misc-old"]
        );
    }

    #[test]
    fn scope_moves_as_one_block_at_its_newest_date() {
        let order: ManualOrder = [("writing/dsa", "基本介紹", 1)].into_iter().collect();

        let mut items = vec![
            item("dsa-late", "writing/dsa/late", 9, Some("實作")),
            item("other", "writing/others/blog", 8, None),
            item("dsa-intro", "writing/dsa/intro", 7, Some("基本介紹")),
            item("older", "bookmarks/tools", 6, None),
        ];
        order.apply(&mut items);

        assert_eq!(slugs(&items), vec!["dsa-intro", "dsa-late", "other", "older"]);
    }

    #[test]
    fn applying_twice_keeps_the_order() {
        let order: ManualOrder = [
            ("writing/dsa", "基本介紹", 1),
            ("writing/dsa", "實作", 2),
        ]
        .into_iter()
        .collect();

        // bookmarks 与 writing/dsa 的较旧条目日期相同
        let mut items = vec![
            item("s_a", "writing/dsa/s_a", 3, Some("實作")),
            item("o", "bookmarks/o", 2, None),
            item("x", "writing/dsa/x", 2, Some("基本介紹")),
        ];
        order.apply(&mut items);
        let first = slugs(&items).join(",");
        assert_eq!(first, "x,s_a,o");

        items.sort_by(|a, b| b.date.cmp(&a.date));
        order.apply(&mut items);
        assert_eq!(slugs(&items).join(","), first);
    }

    #[test]
    fn prefix_spellings_merge_into_one_scope() {
        let order: ManualOrder = toml::from_str(
            r#"
            ["writing/dsa"]
            "基本介紹" = 1
            ["/writing/dsa/"]
            "實作" = 2
            "#,
        )
        .unwrap();

        assert_eq!(order.scope_count(), 1);
        assert_eq!(order.rank_of("writing/dsa", Some("基本介紹")), Some(1));
        assert_eq!(order.rank_of("writing/dsa", Some("實作")), Some(2));

        let mut items = vec![
            item("impl", "writing/dsa/impl", 9, Some("實作")),
            item("misc", "writing/dsa/misc", 8, None),
            item("intro", "writing/dsa/intro", 1, Some("基本介紹")),
        ];
        order.apply(&mut items);
        assert_eq!(slugs(&items), vec!["intro", "impl", "misc"]);
    }
}
