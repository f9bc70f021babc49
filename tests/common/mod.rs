//! Shared test constants and helpers for integration tests.
#![allow(dead_code)]

/// References in the three shapes the converter is expected to handle:
/// a full journal article, an explicit-key candidate with semicolon
/// separators, and a reference with no `[J]` marker or volume(issue) group.
pub const SAMPLE_REFERENCES: [&str; 3] = [
    "张三，李四，王五. 深度学习在自然语言处理中的应用研究[J]. 计算机学报, 2023, 46(5): 100-115.",
    "王小明; 李华. 人工智能发展趋势分析[J]. 科技导报, 2022, 40(10): 25-30.",
    "赵六. 大数据技术综述. 信息技术, 2021: 45-50.",
];

/// Returns the cite key from the `@article{key,` opening line.
pub fn cite_key_of(entry: &str) -> &str {
    entry
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("@article{"))
        .and_then(|rest| rest.strip_suffix(','))
        .unwrap_or_default()
}

/// True when the key is non-empty and every character is an ASCII letter,
/// digit or underscore.
pub fn is_sanitized_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
