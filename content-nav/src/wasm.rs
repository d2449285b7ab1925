use std::sync::Mutex;

use once_cell::sync::OnceCell;
use serde::Serialize;
use utils_common::models::ContentItem;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::SiteConfig;
use crate::format::view_count_label;
use crate::index::build_index;
use crate::models::{ContentIndex, NavBundle, TagEntry};
use crate::navigation::{resolve_navigation, resolve_navigation_by_path};
use crate::pagination::{list_base_path, paginate, Page};
use crate::tags::{aggregate_tags, items_with_tag, tag_entries};

/// 已加载的站点数据
struct LoadedSite {
    /// 索引包中的原始条目，标签统计基于它
    items: Vec<ContentItem>,
    index: ContentIndex,
    config: SiteConfig,
}

impl LoadedSite {
    fn from_bundle(bundle: NavBundle) -> Self {
        let index = build_index(bundle.items.iter().cloned(), &bundle.config.order);
        Self {
            items: bundle.items,
            index,
            config: bundle.config,
        }
    }

    fn tag_entries(&self) -> Vec<TagEntry> {
        tag_entries(&aggregate_tags(&self.items), &self.config.labels)
    }

    // 列表页：基础路径取当前路由的第一段
    fn list_page(&self, page: usize, pathname: &str) -> Page<'_> {
        let base = list_base_path(pathname, false);
        paginate(&self.index.sorted, page, self.config.page_size, &base)
    }

    // 标签页的文章，保持排序后的顺序
    fn tagged(&self, slug: &str) -> Vec<ContentItem> {
        items_with_tag(&self.index.sorted, slug)
            .into_iter()
            .cloned()
            .collect()
    }
}

// 全局站点数据，init 时替换
static SITE: OnceCell<Mutex<Option<LoadedSite>>> = OnceCell::new();

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 列表中展示的阅读数文字，例如 `1.2K views`；没有阅读数时返回 undefined
#[wasm_bindgen]
pub fn view_label(count: Option<f64>) -> Option<String> {
    let count = count.filter(|c| c.is_finite() && *c >= 0.0).map(|c| c as u64);
    view_count_label(count)
}

fn load(data: &[u8]) -> Result<(), String> {
    let bundle = NavBundle::decode(data).map_err(|e| format!("解析索引包失败: {}", e))?;
    let site = LoadedSite::from_bundle(bundle);

    let slot = SITE.get_or_init(|| Mutex::new(None));
    let mut guard = slot.lock().map_err(|_| "获取索引锁失败".to_string())?;
    *guard = Some(site);
    Ok(())
}

fn with_site<T>(f: impl FnOnce(&LoadedSite) -> Result<T, String>) -> Result<T, String> {
    let slot = SITE.get().ok_or("索引未初始化")?;
    let guard = slot.lock().map_err(|_| "获取索引锁失败")?;
    let site = guard.as_ref().ok_or("索引为空")?;
    f(site)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(value).map_err(|e| format!("序列化结果失败: {}", e))
}

fn js_error(message: String) -> JsValue {
    console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// 内容导航 JS 接口
#[wasm_bindgen]
pub struct ContentNavJS;

#[wasm_bindgen]
impl ContentNavJS {
    /// 加载压缩的索引包
    #[wasm_bindgen]
    pub fn init(bundle_data: &[u8]) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        load(bundle_data).map_err(js_error)
    }

    /// 侧边栏的主题分组
    #[wasm_bindgen]
    pub fn groups() -> Result<JsValue, JsValue> {
        with_site(|site| to_js(&site.index.groups)).map_err(js_error)
    }

    /// 当前文章的导航状态：展开的主题、面包屑、上一篇和下一篇
    #[wasm_bindgen]
    pub fn navigation(slug: &str) -> Result<JsValue, JsValue> {
        with_site(|site| {
            let nav = resolve_navigation(&site.index.sorted, slug, &site.config.labels);
            to_js(&nav)
        })
        .map_err(js_error)
    }

    /// 按路由路径解析导航，路径不在索引中时只返回面包屑
    #[wasm_bindgen]
    pub fn navigation_by_path(pathname: &str) -> Result<JsValue, JsValue> {
        with_site(|site| {
            let nav = resolve_navigation_by_path(&site.index.sorted, pathname, &site.config.labels);
            to_js(&nav)
        })
        .map_err(js_error)
    }

    /// 标签侧边栏：按文章数降序
    #[wasm_bindgen]
    pub fn tags() -> Result<JsValue, JsValue> {
        with_site(|site| to_js(&site.tag_entries())).map_err(js_error)
    }

    /// 所有标签名称
    #[wasm_bindgen]
    pub fn all_tags() -> Result<js_sys::Array, JsValue> {
        with_site(|site| {
            Ok(aggregate_tags(&site.items)
                .into_iter()
                .map(|freq| JsValue::from_str(&freq.tag))
                .collect::<js_sys::Array>())
        })
        .map_err(js_error)
    }

    /// 列表分页，`pathname` 为当前路由（如 `/writing/page/2`）
    #[wasm_bindgen]
    pub fn page(page: usize, pathname: &str) -> Result<JsValue, JsValue> {
        with_site(|site| to_js(&site.list_page(page, pathname))).map_err(js_error)
    }

    /// 标签页分页，`pathname` 为当前路由（如 `/tags/rust/page/2`）
    #[wasm_bindgen]
    pub fn tag_page(slug: &str, page: usize, pathname: &str) -> Result<JsValue, JsValue> {
        with_site(|site| {
            let tagged = site.tagged(slug);
            let base = list_base_path(pathname, true);
            to_js(&paginate(&tagged, page, site.config.page_size, &base))
        })
        .map_err(js_error)
    }
}
