use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 评论排序方式，取值与 Play 商店接口一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    MostRelevant,
    #[default]
    Newest,
    Rating,
}

impl Sort {
    /// 接口使用的数值
    pub fn wire_value(self) -> u8 {
        match self {
            Sort::MostRelevant => 1,
            Sort::Newest => 2,
            Sort::Rating => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sort::MostRelevant => "most-relevant",
            Sort::Newest => "newest",
            Sort::Rating => "rating",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Sort::Newest),
            "most-relevant" | "most_relevant" | "relevant" => Ok(Sort::MostRelevant),
            "rating" => Ok(Sort::Rating),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// 上游返回的一条完整评论
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub review_id: String,
    pub user_name: String,
    pub user_image: Option<String>,
    pub content: String,
    pub score: u8,
    pub thumbs_up_count: u64,
    pub review_created_version: Option<String>,
    pub at: Option<DateTime<Utc>>,
    pub reply_content: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub app_version: Option<String>,
}

impl ReviewRecord {
    /// 便捷构造，主要用于测试替身
    pub fn new(user_name: impl Into<String>, score: u8, content: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            score,
            content: content.into(),
            ..Default::default()
        }
    }
}

/// 导出到 CSV 的三列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub user_name: String,
    pub score: u8,
    pub content: String,
}

impl ExportRow {
    pub const HEADER: [&'static str; 3] = ["userName", "score", "content"];

    pub fn fields(&self) -> [String; 3] {
        [
            self.user_name.clone(),
            self.score.to_string(),
            self.content.clone(),
        ]
    }
}

impl From<ReviewRecord> for ExportRow {
    fn from(record: ReviewRecord) -> Self {
        Self {
            user_name: record.user_name,
            score: record.score,
            content: record.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_wire_values() {
        assert_eq!(Sort::MostRelevant.wire_value(), 1);
        assert_eq!(Sort::Newest.wire_value(), 2);
        assert_eq!(Sort::Rating.wire_value(), 3);
        assert_eq!(Sort::default(), Sort::Newest);
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("newest".parse::<Sort>(), Ok(Sort::Newest));
        assert_eq!("NEWEST".parse::<Sort>(), Ok(Sort::Newest));
        assert_eq!("most_relevant".parse::<Sort>(), Ok(Sort::MostRelevant));
        assert_eq!("rating".parse::<Sort>(), Ok(Sort::Rating));
        assert!("oldest".parse::<Sort>().is_err());
    }

    #[test]
    fn test_projection_keeps_three_fields() {
        let record = ReviewRecord {
            review_id: "gp:AOqpTO".to_string(),
            user_name: "alice".to_string(),
            content: "great app".to_string(),
            score: 5,
            thumbs_up_count: 12,
            app_version: Some("5.1.2".to_string()),
            ..Default::default()
        };

        let row = ExportRow::from(record);
        assert_eq!(row.user_name, "alice");
        assert_eq!(row.score, 5);
        assert_eq!(row.content, "great app");
        assert_eq!(row.fields(), ["alice".to_string(), "5".to_string(), "great app".to_string()]);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ReviewRecord::new("bob", 1, "crashes, a lot");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userName"], "bob");
        assert_eq!(json["score"], 1);
        assert_eq!(json["thumbsUpCount"], 0);
    }
}
