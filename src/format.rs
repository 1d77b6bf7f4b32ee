//! 화면 표시용 숫자/가격/날짜 포맷
// region:    --- Number

/// 천 단위 콤마 (`1234567` -> `1,234,567`)
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 값이 없으면 `0`
pub fn format_optional_number(value: Option<i64>) -> String {
    format_number(value.unwrap_or(0))
}

/// `1,500원`, 값이 없으면 `-`
pub fn format_price(value: Option<i64>) -> String {
    match value {
        Some(value) => format!("{}원", format_number(value)),
        None => "-".to_string(),
    }
}

// endregion: --- Number

// region:    --- Date

/// `YYYYMMDDHHmmss` -> `YYYY-MM-DD HH:mm`, 8~11자는 `YYYY-MM-DD`, 그 외 `-`
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_ascii() {
        return "-".to_string();
    }
    match raw.len() {
        n if n >= 12 => format!(
            "{}-{}-{} {}:{}",
            &raw[0..4],
            &raw[4..6],
            &raw[6..8],
            &raw[8..10],
            &raw[10..12]
        ),
        n if n >= 8 => ymd(raw),
        _ => "-".to_string(),
    }
}

/// 항상 `YYYY-MM-DD` (8자 미만이면 `-`)
pub fn format_date_short(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_ascii() || raw.len() < 8 {
        return "-".to_string();
    }
    ymd(raw)
}

/// 선택 값 버전
pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "-".to_string())
}

fn ymd(raw: &str) -> String {
    format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8])
}

// endregion: --- Date


// endregion: --- Tests
