use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::deserialize::string_or_i64;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "string_or_i64")]
    pub page: i64,
    #[serde(
        default = "default_limit",
        alias = "size",
        deserialize_with = "string_or_i64"
    )]
    pub limit: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 页码上限，保证 (page - 1) * limit 不会溢出 u64
const MAX_PAGE: i64 = u32::MAX as i64;

impl PaginationQuery {
    /// 规范化后的页码（1..=u32::MAX）
    pub fn page(&self) -> u64 {
        self.page.clamp(1, MAX_PAGE) as u64
    }

    /// 规范化后的每页数量（1..=100）
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, 100) as u64
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_out_of_range_values() {
        let query = PaginationQuery { page: 0, limit: 500 };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);

        let query = PaginationQuery { page: 3, limit: 0 };
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn test_huge_page_is_capped() {
        let query = PaginationQuery {
            page: i64::MAX,
            limit: 100,
        };
        assert_eq!(query.page(), u32::MAX as u64);
        assert!((query.page() - 1).checked_mul(query.limit()).is_some());
    }

    #[test]
    fn test_accepts_string_values_and_size_alias() {
        let query: PaginationQuery = serde_json::from_str(r#"{"page": "2", "size": "25"}"#).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 25);

        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
    }
}
