use log::debug;
use utils_common::models::ContentItem;

use crate::config::Labels;
use crate::error::IndexError;
use crate::models::{BreadcrumbTrail, Crumb, Navigation};

/// 在排序后的列表中查找 slug 对应的位置
pub fn locate(sorted: &[ContentItem], slug: &str) -> Result<usize, IndexError> {
    sorted
        .iter()
        .position(|item| item.slug == slug)
        .ok_or_else(|| IndexError::NotFound {
            slug: slug.to_string(),
        })
}

/// 根据当前 slug 解析导航状态
///
/// `prev` 是排序列表中的前一项（更新的文章），`next` 是后一项（更旧的文章），
/// 两者都必须与当前条目属于同一栏目。找不到当前条目时返回空导航。
pub fn resolve_navigation<'a>(
    sorted: &'a [ContentItem],
    current_slug: &str,
    labels: &Labels,
) -> Navigation<'a> {
    match locate(sorted, current_slug) {
        Ok(index) => navigate_at(sorted, index, labels),
        Err(e) => {
            debug!("{}，返回空导航", e);
            Navigation::detached(BreadcrumbTrail::default())
        }
    }
}

/// 根据当前路由路径解析导航状态，找不到条目时仍然根据路径生成面包屑
pub fn resolve_navigation_by_path<'a>(
    sorted: &'a [ContentItem],
    current_path: &str,
    labels: &Labels,
) -> Navigation<'a> {
    let wanted = current_path.trim_matches('/');
    match sorted
        .iter()
        .position(|item| item.path.trim_matches('/') == wanted)
    {
        Some(index) => navigate_at(sorted, index, labels),
        None => {
            debug!("路径 '{}' 不在索引中，只生成面包屑", current_path);
            Navigation::detached(build_breadcrumb(current_path, labels))
        }
    }
}

fn navigate_at<'a>(sorted: &'a [ContentItem], index: usize, labels: &Labels) -> Navigation<'a> {
    let current = &sorted[index];
    let section = current.section();
    let same_section = |item: &&ContentItem| item.section() == section;

    let prev = index
        .checked_sub(1)
        .and_then(|i| sorted.get(i))
        .filter(same_section);
    let next = sorted.get(index + 1).filter(same_section);

    Navigation {
        active_topic: current.topic.as_deref(),
        breadcrumb: build_breadcrumb(&current.path, labels),
        prev,
        next,
    }
}

/// 由路径生成面包屑
///
/// 除最后一段外，每段都是一个链接，URL 为截至该段的路径（不带前导斜杠）；
/// 最后一段作为当前页面标记。
pub fn build_breadcrumb(path: &str, labels: &Labels) -> BreadcrumbTrail {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((leaf, ancestors)) = segments.split_last() else {
        return BreadcrumbTrail::default();
    };

    let mut url = String::new();
    let mut links = Vec::with_capacity(ancestors.len());
    for segment in ancestors {
        if !url.is_empty() {
            url.push('/');
        }
        url.push_str(segment);
        links.push(Crumb {
            label: labels.display(segment),
            url: url.clone(),
        });
    }

    let current_url = if url.is_empty() {
        leaf.to_string()
    } else {
        format!("{}/{}", url, leaf)
    };

    BreadcrumbTrail {
        links,
        current: Some(Crumb {
            label: labels.display(leaf),
            url: current_url,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::index::build_index;
    use crate::order::ManualOrder;

    fn item(slug: &str, path: &str, (y, m, d): (i32, u32, u32)) -> ContentItem {
        let date = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        ContentItem::new(slug, path, slug, date)
    }

    fn crumb(label: &str, url: &str) -> Crumb {
        Crumb {
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn prev_is_newer_and_next_is_older() {
        let items = vec![
            item("A", "writing/a", (2024, 1, 1)),
            item("B", "writing/b", (2024, 2, 1)),
            item("C", "writing/c", (2024, 3, 1)),
        ];
        let index = build_index(items, &ManualOrder::new());
        let slugs: Vec<&str> = index.sorted.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["C", "B", "A"]);

        let nav = resolve_navigation(&index.sorted, "B", &Labels::new());
        assert_eq!(nav.prev.map(|i| i.slug.as_str()), Some("C"));
        assert_eq!(nav.next.map(|i| i.slug.as_str()), Some("A"));

        let first = resolve_navigation(&index.sorted, "C", &Labels::new());
        assert!(first.prev.is_none());
        assert_eq!(first.next.map(|i| i.slug.as_str()), Some("B"));
    }

    #[test]
    fn neighbours_never_cross_sections() {
        let items = vec![
            item("A", "writing/a", (2024, 1, 1)),
            item("B", "writing/b", (2024, 2, 1)),
            item("D", "bookmarks/d", (2023, 6, 1)),
            item("E", "bookmarks/e", (2024, 1, 15)),
        ];
        let index = build_index(items, &ManualOrder::new());
        // B, E, A, D
        let nav = resolve_navigation(&index.sorted, "A", &Labels::new());
        assert!(nav.prev.is_none());
        assert!(nav.next.is_none());

        let nav = resolve_navigation(&index.sorted, "E", &Labels::new());
        assert!(nav.prev.is_none());
        assert!(nav.next.is_none());
    }

    #[test]
    fn active_topic_follows_current_item() {
        let items = vec![
            item("a", "writing/a", (2024, 1, 1)).with_topic("實作"),
            item("b", "writing/b", (2024, 2, 1)),
        ];
        let index = build_index(items, &ManualOrder::new());
        assert_eq!(
            resolve_navigation(&index.sorted, "a", &Labels::new()).active_topic,
            Some("實作")
        );
        assert_eq!(
            resolve_navigation(&index.sorted, "b", &Labels::new()).active_topic,
            None
        );
    }

    #[test]
    fn unknown_slug_gives_empty_navigation() {
        let index = build_index(vec![item("a", "writing/a", (2024, 1, 1))], &ManualOrder::new());
        let nav = resolve_navigation(&index.sorted, "missing", &Labels::new());
        assert_eq!(nav.active_topic, None);
        assert!(nav.prev.is_none());
        assert!(nav.next.is_none());
        assert!(nav.breadcrumb.is_empty());
    }

    #[test]
    fn unknown_path_still_has_breadcrumb() {
        let index = build_index(vec![item("a", "writing/a", (2024, 1, 1))], &ManualOrder::new());
        let nav = resolve_navigation_by_path(&index.sorted, "/writing/rust/gone", &Labels::new());
        assert!(nav.prev.is_none() && nav.next.is_none());
        assert_eq!(nav.breadcrumb.links, vec![crumb("Writing", "writing"), crumb("Rust", "writing/rust")]);
    }

    #[test]
    fn path_lookup_matches_slug_lookup() {
        let items = vec![
            item("a", "writing/a", (2024, 1, 1)),
            item("b", "writing/b", (2024, 2, 1)),
        ];
        let index = build_index(items, &ManualOrder::new());
        let by_path = resolve_navigation_by_path(&index.sorted, "/writing/a/", &Labels::new());
        let by_slug = resolve_navigation(&index.sorted, "a", &Labels::new());
        assert_eq!(by_path, by_slug);
    }

    #[test]
    fn breadcrumb_links_ancestors_and_marks_leaf() {
        let trail = build_breadcrumb("writing/rust/intro", &Labels::new());
        assert_eq!(trail.links, vec![crumb("Writing", "writing"), crumb("Rust", "writing/rust")]);
        assert_eq!(trail.current, Some(crumb("Intro", "writing/rust/intro")));
    }

    #[test]
    fn breadcrumb_uses_configured_labels() {
        let labels: Labels = [("design-system", "設計系統")].into_iter().collect();
        let trail = build_breadcrumb("/writing/design-system/tokens", &labels);
        assert_eq!(trail.links[1], crumb("設計系統", "writing/design-system"));
    }

    #[test]
    fn short_paths_do_not_panic() {
        let root = build_breadcrumb("/writing", &Labels::new());
        assert!(root.links.is_empty());
        assert_eq!(root.current, Some(crumb("Writing", "writing")));

        assert!(build_breadcrumb("", &Labels::new()).is_empty());
        assert!(build_breadcrumb("///", &Labels::new()).is_empty());
    }
}
