use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

/// 当前 unix 时间戳（秒）
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// 生成一个随机唯一 ID
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

// 1536 -> "1.5 KB"
pub fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
