//! 博客内容导航：索引排序与主题分组、面包屑与上下篇、标签统计。
//!
//! 三个核心函数 [`build_index`]、[`resolve_navigation`] 和 [`aggregate_tags`]
//! 都是纯函数，只依赖传入的内容列表和只读配置。

pub mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod frontmatter;
pub mod index;
pub mod models;
pub mod navigation;
pub mod order;
pub mod pagination;
pub mod tags;
pub mod wasm;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub use utils_common::models::ContentItem;

pub use builder::IndexBuilder;
pub use config::{ConfigError, Labels, SiteConfig};
pub use error::IndexError;
pub use index::{build_index, build_index_strict, group_by_topic};
pub use models::{
    BreadcrumbTrail, ContentIndex, Crumb, NavBundle, Navigation, TagEntry, TagFrequency, TopicGroup,
};
pub use navigation::{build_breadcrumb, resolve_navigation, resolve_navigation_by_path};
pub use order::ManualOrder;
pub use pagination::{paginate, Page, Pagination};
pub use tags::{aggregate_tags, items_with_tag, tag_entries, tag_slug};
