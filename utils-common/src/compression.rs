use std::io::{Read, Write};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};
use thiserror::Error;

/// 魔数常量 - 用于标识索引包格式
pub const MAGIC_BYTES: &[u8] = b"CNIDX"; // Content Navigation Index

/// 头部长度：魔数 + 版本号(2) + 原始数据大小(4)
const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("序列化失败: {0}")]
    Encode(String),

    #[error("反序列化失败: {0}")]
    Decode(String),

    #[error("数据太短，无法解析: {0} 字节")]
    TooShort(usize),

    #[error("无效的文件格式：魔数不匹配")]
    BadMagic,

    #[error("不支持的版本: {0}.{1}")]
    UnsupportedVersion(u8, u8),

    #[error("解压后数据大小不匹配: 期望 {expected} 字节, 实际 {actual} 字节")]
    SizeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> Result<Vec<u8>, CodecError> {
    bincode::serde::encode_to_vec(obj, bincode::config::standard())
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, CodecError> {
    bincode::serde::decode_from_slice(data, bincode::config::standard())
        .map_err(|e| CodecError::Decode(e.to_string()))
        .map(|(value, _)| value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> Result<Vec<u8>, CodecError> {
    let binary = to_binary(obj)?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&(binary.len() as u32).to_le_bytes());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&binary)?;
    output.extend_from_slice(&encoder.finish()?);

    Ok(output)
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大主版本
pub fn from_compressed_with_max_version<T: for<'a> serde::de::Deserialize<'a>>(
    data: &[u8],
    max_version: u8,
) -> Result<T, CodecError> {
    validate_compressed_data_with_max_version(data, max_version)?;

    let size_offset = MAGIC_BYTES.len() + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..HEADER_LEN]);
    let original_size = u32::from_le_bytes(size_bytes) as usize;

    let mut decoder = GzDecoder::new(&data[HEADER_LEN..]);
    let mut decompressed = Vec::with_capacity(original_size);
    decoder.read_to_end(&mut decompressed)?;

    if decompressed.len() != original_size {
        return Err(CodecError::SizeMismatch {
            expected: original_size,
            actual: decompressed.len(),
        });
    }

    from_binary(&decompressed)
}

/// 校验头部并返回版本号
pub fn validate_compressed_data_with_max_version(data: &[u8], max_version: u8) -> Result<[u8; 2], CodecError> {
    if data.len() < HEADER_LEN {
        return Err(CodecError::TooShort(data.len()));
    }

    if &data[..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(CodecError::BadMagic);
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];
    if version[0] > max_version {
        return Err(CodecError::UnsupportedVersion(version[0], version[1]));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn header_carries_magic_and_version() {
        let mut map = BTreeMap::new();
        map.insert("rust".to_string(), 2u32);
        let data = to_compressed(&map, [1, 3]).unwrap();

        assert!(data.starts_with(MAGIC_BYTES));
        assert_eq!(validate_compressed_data_with_max_version(&data, 1).unwrap(), [1, 3]);

        let back: BTreeMap<String, u32> = from_compressed_with_max_version(&data, 1).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn newer_major_version_is_rejected() {
        let data = to_compressed(&vec![1u8, 2, 3], [2, 0]).unwrap();
        let err = from_compressed_with_max_version::<Vec<u8>>(&data, 1).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVersion(2, 0)));
    }

    #[test]
    fn corrupted_input_is_rejected() {
        assert!(matches!(
            validate_compressed_data_with_max_version(b"CNI", 1),
            Err(CodecError::TooShort(3))
        ));
        assert!(matches!(
            validate_compressed_data_with_max_version(b"NECMP\x01\x00\x00\x00\x00\x00", 1),
            Err(CodecError::BadMagic)
        ));
    }
}
