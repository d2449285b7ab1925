/// 首字母大写，其余字符保持不变
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const COMPACT_UNITS: [(u64, &str); 3] = [
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// 紧凑格式的阅读数：999、1.2K、12K、1.5M
pub fn format_view_count(count: u64) -> String {
    for (i, &(unit, suffix)) in COMPACT_UNITS.iter().enumerate() {
        if count < unit {
            continue;
        }

        let scaled = count as f64 / unit as f64;
        let rounded = if scaled < 10.0 {
            (scaled * 10.0).round() / 10.0
        } else {
            scaled.round()
        };

        // 999_999 这类值四舍五入后进位到更大的单位
        if rounded >= 1000.0 && i > 0 {
            let (bigger, bigger_suffix) = COMPACT_UNITS[i - 1];
            let promoted = (count as f64 / bigger as f64 * 10.0).round() / 10.0;
            return format!("{}{}", trim_decimal(promoted), bigger_suffix);
        }

        return format!("{}{}", trim_decimal(rounded), suffix);
    }

    count.to_string()
}

fn trim_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{:.1}", value)
    }
}

/// 阅读数对应的单复数名词
pub fn view_noun(count: u64) -> &'static str {
    if count == 1 {
        "view"
    } else {
        "views"
    }
}

/// 列表中展示的阅读数文字，没有数据时不展示
pub fn view_count_label(count: Option<u64>) -> Option<String> {
    match count {
        Some(count) if count > 0 => {
            Some(format!("{} {}", format_view_count(count), view_noun(count)))
        }
        _ => None,
    }
}
