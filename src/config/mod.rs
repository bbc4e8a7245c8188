//! 配置管理
//!
//! 配置来源优先级（从低到高）：默认值 → config.toml → config.{APP_ENV}.toml → CAMPUS_* 环境变量 → 常用环境变量覆盖。

mod r#impl;
mod structs;

pub use structs::*;
