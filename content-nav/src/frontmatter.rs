use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use utils_common::models::{dedup_tags, ContentItem};

use crate::error::IndexError;

/// Markdown/MDX 文件头部的元数据
#[derive(Deserialize, Debug, Default)]
struct FrontMatter {
    title: Option<String>,
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    topic: Option<String>,
    slug: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    draft: bool,
}

/// 拆分 `---` 包围的 YAML 头部与正文
pub fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let source = source.trim_start_matches('\u{feff}');
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// 由相对文件路径得到路由路径：去掉扩展名和末尾的 `index`
pub fn route_path(relative_path: &str) -> String {
    let normalized = relative_path.replace('\\', "/");
    let without_ext = match normalized.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
        _ => normalized.as_str(),
    };
    let trimmed = without_ext.trim_matches('/');
    match trimmed.strip_suffix("index") {
        Some(parent) if parent.is_empty() || parent.ends_with('/') => {
            parent.trim_end_matches('/').to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// 默认 slug：去掉栏目段后的路径
pub fn default_slug(path: &str) -> String {
    match path.trim_matches('/').split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => path.trim_matches('/').to_string(),
    }
}

/// 解析日期：RFC 3339 或 `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// 从文件内容解析内容条目
///
/// 缺少标题或日期、头部无法解析时返回 `MalformedContentItem`。
pub fn parse_content_item(source: &str, relative_path: &str) -> Result<ContentItem, IndexError> {
    let (yaml, _body) = split_front_matter(source)
        .ok_or_else(|| IndexError::malformed(relative_path, "缺少 front matter"))?;

    if yaml.trim().is_empty() {
        return Err(IndexError::malformed(relative_path, "front matter 为空"));
    }

    let front: FrontMatter = serde_yaml::from_str(yaml)
        .map_err(|e| IndexError::malformed(relative_path, format!("YAML 解析失败: {}", e)))?;

    let title = front
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| IndexError::malformed(relative_path, "缺少 title"))?;
    let raw_date = front
        .date
        .ok_or_else(|| IndexError::malformed(relative_path, "缺少 date"))?;
    let date = parse_date(&raw_date)
        .ok_or_else(|| IndexError::malformed(relative_path, format!("无效的日期 '{}'", raw_date)))?;

    let path = route_path(relative_path);
    if path.is_empty() {
        return Err(IndexError::malformed(relative_path, "无法确定路由路径"));
    }
    let slug = front
        .slug
        .map(|s| s.trim_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_slug(&path));

    Ok(ContentItem {
        slug,
        path,
        title: title.trim().to_string(),
        date,
        tags: dedup_tags(front.tags),
        topic: front.topic.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        summary: front.summary,
        draft: front.draft,
    })
}
