use serde::{Deserialize, Serialize};

/// 持久化的短链接映射记录
///
/// `id` is assigned by the store, monotonic and never reused. Aliases are
/// immutable once created; there is no update path.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub alias: String,
    pub original_url: String,
}
