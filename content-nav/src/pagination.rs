use serde::Serialize;
use utils_common::models::ContentItem;

/// 分页信息
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 当前页码（从 1 开始）
    pub current_page: usize,
    /// 总页数，至少为 1
    pub total_pages: usize,
    /// 条目总数
    pub total: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// 一页文章
#[derive(Serialize, Debug, Clone)]
pub struct Page<'a> {
    pub items: &'a [ContentItem],
    pub pagination: Pagination,
}

/// 分页，页码超出范围时会被限制到有效范围内
pub fn paginate<'a>(items: &'a [ContentItem], page: usize, per_page: usize, base: &str) -> Page<'a> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let current_page = page.clamp(1, total_pages);

    let start = ((current_page - 1) * per_page).min(total);
    let end = (start + per_page).min(total);

    let prev_href = (current_page > 1).then(|| page_href(base, current_page - 1));
    let next_href = (current_page < total_pages).then(|| page_href(base, current_page + 1));

    Page {
        items: &items[start..end],
        pagination: Pagination {
            current_page,
            total_pages,
            total,
            prev_href,
            next_href,
        },
    }
}

/// 列表页链接：`/{base}/page/{n}`
pub fn page_href(base: &str, page: usize) -> String {
    format!("/{}/page/{}", base.trim_matches('/'), page)
}

/// 从当前路由得到列表的基础路径
///
/// 一般取第一段（如 `/writing/page/2` -> `writing`），
/// 嵌套列表（如标签页）取前两段（`/tags/rust/page/2` -> `tags/rust`）。
pub fn list_base_path(pathname: &str, nested: bool) -> String {
    let depth = if nested { 2 } else { 1 };
    pathname
        .split('/')
        .filter(|s| !s.is_empty())
        .take(depth)
        .collect::<Vec<_>>()
        .join("/")
}
