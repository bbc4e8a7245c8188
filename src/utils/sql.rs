use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符（% 和 _）以及转义符本身，配合 `ESCAPE '\'` 使用
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 子串匹配：`%转义后的输入%`，带 ESCAPE 子句
pub fn contains_pattern(input: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(input))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("ravi"), "ravi");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("CS_301"), "CS\\_301");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }
}
