use std::fs;
use std::path::Path;

use clap::{Arg, ArgAction, Command};
use log::{debug, info, warn};
use serde::Serialize;
use walkdir::WalkDir;

use content_nav::frontmatter::parse_content_item;
use content_nav::{aggregate_tags, resolve_navigation, tag_entries, IndexBuilder, SiteConfig};
use utils_common::ContentItem;

/// 输出文件名
const INDEX_FILE: &str = "content_index.json";
const TAG_FILE: &str = "tag-data.json";
const BUNDLE_FILE: &str = "nav_bundle.bin";

/// 生成索引所需的参数
struct IndexOptions<'a> {
    source_dir: &'a Path,
    output_dir: &'a Path,
    config_path: Option<&'a Path>,
    include_drafts: bool,
    strict: bool,
    slug: Option<&'a str>,
}

fn main() {
    let matches = Command::new("内容索引生成器")
        .version(env!("CARGO_PKG_VERSION"))
        .about("生成博客侧边栏、面包屑和标签所需的内容索引")
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .value_name("SOURCE_DIR")
            .help("Markdown/MDX 内容目录")
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("OUTPUT_DIR")
            .help("索引输出目录")
            .required(true))
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .value_name("CONFIG_FILE")
            .help("站点配置文件 (TOML)"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("drafts")
            .long("drafts")
            .help("包含草稿")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("strict")
            .long("strict")
            .help("遇到重复的 slug 或路径时失败")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("slug")
            .long("slug")
            .value_name("SLUG")
            .help("输出指定文章的导航状态"))
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // clap 已保证必填参数存在
    let source_dir = matches.get_one::<String>("source").map(String::as_str).unwrap_or_default();
    let output_dir = matches.get_one::<String>("output").map(String::as_str).unwrap_or_default();

    let source_path = Path::new(source_dir);
    if !source_path.is_dir() {
        eprintln!("错误: 内容目录不存在或不是有效目录 '{}'", source_dir);
        std::process::exit(1);
    }

    let output_path = Path::new(output_dir);
    if let Err(e) = fs::create_dir_all(output_path) {
        eprintln!("错误: 无法创建输出目录 '{}': {}", output_dir, e);
        std::process::exit(1);
    }

    let options = IndexOptions {
        source_dir: source_path,
        output_dir: output_path,
        config_path: matches.get_one::<String>("config").map(Path::new),
        include_drafts: matches.get_flag("drafts"),
        strict: matches.get_flag("strict"),
        slug: matches.get_one::<String>("slug").map(String::as_str),
    };

    info!("源目录: {}", source_dir);
    info!("输出目录: {}", output_dir);

    match generate_index(&options) {
        Ok(count) => println!("索引生成成功，共 {} 篇内容", count),
        Err(e) => {
            eprintln!("错误: 索引生成失败: {}", e);
            std::process::exit(1);
        }
    }
}

// 生成索引的主函数，返回索引中的条目数量
fn generate_index(options: &IndexOptions) -> Result<usize, String> {
    let start_time = std::time::Instant::now();

    let config = match options.config_path {
        Some(path) => SiteConfig::load(path).map_err(|e| e.to_string())?,
        None => SiteConfig::default(),
    };

    let (items, skipped) = scan_content_files(options.source_dir)?;
    info!("扫描完成。找到 {} 篇内容，跳过 {} 个文件。", items.len(), skipped);

    if items.is_empty() {
        warn!("没有找到有效内容，将输出空索引");
    }

    let mut builder = IndexBuilder::new(config);
    for item in items {
        if options.include_drafts {
            builder.add_item_with_drafts(item);
        } else {
            builder.add_item(item);
        }
    }

    let index = if options.strict {
        builder.build_strict().map_err(|e| format!("索引构建失败: {}", e))?
    } else {
        builder.build()
    };

    let labels = &builder.config().labels;
    write_json(&options.output_dir.join(INDEX_FILE), &index)?;
    // 标签统计基于原始条目列表，而不是排序结果
    write_json(
        &options.output_dir.join(TAG_FILE),
        &tag_entries(&aggregate_tags(builder.items()), labels),
    )?;
    builder
        .save_bundle(&options.output_dir.join(BUNDLE_FILE))
        .map_err(|e| format!("保存索引包失败: {}", e))?;

    if let Some(slug) = options.slug {
        let nav = resolve_navigation(&index.sorted, slug, labels);
        let json = serde_json::to_string_pretty(&nav)
            .map_err(|e| format!("序列化导航失败: {}", e))?;
        println!("{}", json);
    }

    info!("索引生成完成！耗时: {:.2}秒", start_time.elapsed().as_secs_f32());
    Ok(index.sorted.len())
}

// 扫描内容文件，格式错误的文件记录警告后跳过
fn scan_content_files(dir: &Path) -> Result<(Vec<ContentItem>, usize), String> {
    let mut items = Vec::new();
    let mut skipped = 0;

    // 按文件名排序，保证重复条目的取舍稳定
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| format!("遍历目录时出错: {}", e))?;
        if !entry.file_type().is_file() || !is_content_file(entry.path()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|_| "计算相对路径失败".to_string())?
            .to_string_lossy()
            .replace('\\', "/");

        let source = match fs::read_to_string(entry.path()) {
            Ok(source) => source,
            Err(e) => {
                warn!("无法读取文件 {}: {}", entry.path().display(), e);
                skipped += 1;
                continue;
            }
        };

        match parse_content_item(&source, &relative) {
            Ok(item) => {
                debug!("处理: {}", relative);
                items.push(item);
            }
            Err(e) => {
                warn!("{}", e);
                skipped += 1;
            }
        }
    }

    Ok((items, skipped))
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == "md" || ext == "mdx")
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("序列化 {} 失败: {}", path.display(), e))?;
    fs::write(path, json).map_err(|e| format!("无法写入文件 {}: {}", path.display(), e))?;
    info!("已写入: {}", path.display());
    Ok(())
}
