//! 学期与院系过滤值的解析
//!
//! 学期在不同位置有两种写法："3" 和 "sem3"。学生、考试、成绩使用 "semN" 字符串，
//! 课程和出勤记录使用整数。

const MAX_SEMESTER: i32 = 12;

/// "3" / "sem3" / "SEM 3" -> 3
pub fn semester_number(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    let digits = match (trimmed.get(..3), trimmed.get(3..)) {
        (Some(prefix), Some(rest)) if prefix.eq_ignore_ascii_case("sem") => rest.trim(),
        _ => trimmed,
    };
    digits
        .parse::<i32>()
        .ok()
        .filter(|n| (1..=MAX_SEMESTER).contains(n))
}

/// "3" / "sem3" -> "sem3"
pub fn normalize_semester(input: &str) -> Option<String> {
    semester_number(input).map(|n| format!("sem{n}"))
}

/// 旧数据约定：课程代码第 4 个字符是学期数字，如 "CSE301" 中的 '3'
pub fn semester_from_code(code: &str) -> Option<i32> {
    code.chars()
        .nth(3)
        .and_then(|c| c.to_digit(10))
        .map(|d| d as i32)
        .filter(|n| (1..=MAX_SEMESTER).contains(n))
}

/// 院系取值 "all"（不区分大小写）表示不过滤
pub fn is_show_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("all")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_forms() {
        assert_eq!(semester_number("3"), Some(3));
        assert_eq!(semester_number("sem3"), Some(3));
        assert_eq!(semester_number("SEM 8"), Some(8));
        assert_eq!(semester_number("sem0"), None);
        assert_eq!(semester_number("third"), None);
        assert_eq!(semester_number("学期3"), None);
        assert_eq!(normalize_semester(" 5 ").as_deref(), Some("sem5"));
    }

    #[test]
    fn test_semester_from_code() {
        assert_eq!(semester_from_code("CSE301"), Some(3));
        assert_eq!(semester_from_code("MAT1"), Some(1));
        assert_eq!(semester_from_code("CS3"), None);
        assert_eq!(semester_from_code("CSEX01"), None);
    }

    #[test]
    fn test_show_all() {
        assert!(is_show_all("all"));
        assert!(is_show_all(" ALL "));
        assert!(!is_show_all("cse"));
    }
}
