use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ROLL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9/_-]{2,31}$").expect("Invalid roll regex"));

// 课程代码：字母前缀 + 至少 3 位数字，如 CS301
static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,4}[0-9]{3,4}[A-Za-z]?$").expect("Invalid code regex"));

static BRANCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,10}$").expect("Invalid branch regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_roll(roll: &str) -> Result<(), &'static str> {
    if !ROLL_RE.is_match(roll) {
        return Err("Invalid roll number");
    }
    Ok(())
}

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("Invalid subject code");
    }
    Ok(())
}

pub fn validate_branch(branch: &str) -> Result<(), &'static str> {
    if !BRANCH_RE.is_match(branch) {
        return Err("Invalid branch");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 校验出勤日期并规范为 YYYY-MM-DD
pub fn parse_attendance_date(date: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("Invalid date: {date}, expected YYYY-MM-DD"))
}

/// 当天日期（UTC）
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
