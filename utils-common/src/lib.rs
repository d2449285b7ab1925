pub mod compression;
pub mod models;

// 重新导出常用类型和函数
pub use compression::{to_compressed, from_compressed_with_max_version, to_binary, from_binary, CodecError};
pub use models::{ContentItem, dedup_tags};
