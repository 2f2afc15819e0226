//! Display formatting for contact and meeting fields.

use chrono::{DateTime, Utc};
use rolo_core::types::MeetingStatus;

/// Relative date for list views, absolute beyond a year.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    let Some(date) = date else {
        return "-".to_string();
    };
    let days = (Utc::now() - *date).num_days();
    match days {
        0 => "今天".to_string(),
        1 => "昨天".to_string(),
        2..=6 => format!("{}天前", days),
        7..=29 => format!("{}周前", days / 7),
        30..=364 => format!("{}个月前", days / 30),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

pub fn format_datetime(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

pub fn stage_label(stage: Option<&str>) -> &'static str {
    match stage {
        Some("new") => "新认识",
        Some("acquaintance") => "熟人",
        Some("friend") => "朋友",
        Some("ally") => "盟友",
        Some("key_partner") => "关键伙伴",
        _ => "未分类",
    }
}

pub fn sentiment_label(sentiment: Option<&str>) -> &'static str {
    match sentiment {
        Some("positive") => "积极",
        Some("negative") => "消极",
        Some("neutral") => "中性",
        _ => "-",
    }
}

pub fn status_label(status: MeetingStatus) -> &'static str {
    match status {
        MeetingStatus::Processing => "处理中",
        MeetingStatus::Completed => "已完成",
        MeetingStatus::Failed => "失败",
    }
}

pub fn temperature(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.0}°", score),
        None => "-".to_string(),
    }
}
