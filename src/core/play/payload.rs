use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::infrastructure::error::ExportError;
use crate::models::{ReviewRecord, Sort};

/// 单次请求允许的最大评论数
pub const MAX_COUNT_EACH_FETCH: usize = 199;

/// 评论接口的 RPC 名称
const REVIEWS_RPC_ID: &str = "UsvDTd";

/// 上游被限流时返回体中的标记
pub const GATEWAY_ERROR_MARKER: &str = "com.google.play.gateway.proto.PlayGatewayError";

// 响应以 )]}' 防护前缀开头
static RESPONSE_GUARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\)\]\}'\n\n([\s\S]+)").unwrap()
});

/// 一页评论
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewRecord>,
    pub next_token: Option<String>,
}

/// 构建 batchexecute 表单请求体
pub fn build_form_body(
    app_id: &str,
    sort: Sort,
    page_size: usize,
    filter_score: Option<u8>,
    token: Option<&str>,
) -> String {
    let token = token.map(Value::from).unwrap_or(Value::Null);
    let score = filter_score.map(Value::from).unwrap_or(Value::Null);

    let inner = json!([
        null,
        null,
        [
            2,
            sort.wire_value(),
            [page_size, null, token],
            null,
            [null, score, null, null, null, null, null, null, null]
        ],
        [app_id, 7]
    ]);
    let outer = json!([[[REVIEWS_RPC_ID, inner.to_string(), null, "generic"]]]);

    format!("f.req={}", urlencoding::encode(&outer.to_string()))
}

/// 解析 batchexecute 响应
///
/// 结构缺失视为没有更多数据，返回空页；JSON 本身损坏才报错。
pub fn parse_reviews_response(body: &str) -> Result<ReviewPage, ExportError> {
    let Some(captures) = RESPONSE_GUARD.captures(body) else {
        return Ok(ReviewPage::default());
    };
    let payload = captures.get(1).map_or("", |m| m.as_str());

    let outer: Value = serde_json::from_str(payload)
        .map_err(|e| ExportError::parse(format!("Invalid batchexecute envelope: {}", e)))?;

    let Some(data) = value_at(&outer, &[0, 2]).and_then(Value::as_str) else {
        return Ok(ReviewPage::default());
    };

    let data: Value = serde_json::from_str(data)
        .map_err(|e| ExportError::parse(format!("Invalid reviews payload: {}", e)))?;

    let Some(items) = data.get(0).and_then(Value::as_array) else {
        return Ok(ReviewPage::default());
    };

    Ok(ReviewPage {
        reviews: items.iter().map(review_from_value).collect(),
        next_token: continuation_token(&data),
    })
}

/// 续页 token 位于 `[-2][-1]`，不是字符串则表示已到末页
fn continuation_token(data: &Value) -> Option<String> {
    let sections = data.as_array()?;
    let index = sections.len().checked_sub(2)?;
    sections[index]
        .as_array()?
        .last()?
        .as_str()
        .map(str::to_owned)
}

fn review_from_value(item: &Value) -> ReviewRecord {
    let text = |path: &[usize]| {
        value_at(item, path)
            .and_then(Value::as_str)
            .map(str::to_owned)
    };
    let timestamp = |path: &[usize]| {
        value_at(item, path)
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    };

    ReviewRecord {
        review_id: text(&[0]).unwrap_or_default(),
        user_name: text(&[1, 0]).unwrap_or_default(),
        user_image: text(&[1, 1, 3, 2]),
        content: text(&[4]).unwrap_or_default(),
        score: value_at(item, &[2])
            .and_then(Value::as_u64)
            .and_then(|s| u8::try_from(s).ok())
            .unwrap_or(0),
        thumbs_up_count: value_at(item, &[6]).and_then(Value::as_u64).unwrap_or(0),
        review_created_version: text(&[10]),
        at: timestamp(&[5, 0]),
        reply_content: text(&[7, 1]),
        replied_at: timestamp(&[7, 2, 0]),
        app_version: text(&[10]),
    }
}

fn value_at<'a>(value: &'a Value, path: &[usize]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, &index| current.get(index))
}
