//! 宽松的反序列化辅助函数
//!
//! 查询参数（serde_urlencoded + flatten）中的值总是字符串，而 JSON 中的 ID 可能是数字也可能是字符串，
//! 这里统一兼容两种写法。

use serde::{Deserialize, Deserializer};
use serde::de::{Error, Unexpected, Visitor};
use std::fmt;

struct I64Visitor;

impl<'de> Visitor<'de> for I64Visitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if value <= i64::MAX as u64 {
            Ok(value as i64)
        } else {
            Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        value
            .trim()
            .parse()
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }
}

struct OptionI64Visitor;

impl<'de> Visitor<'de> for OptionI64Visitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an optional integer or a string containing an integer")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        I64Visitor.visit_i64(value).map(Some)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        I64Visitor.visit_u64(value).map(Some)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        // 空字符串视为未提供
        if value.trim().is_empty() {
            return Ok(None);
        }
        I64Visitor.visit_str(value).map(Some)
    }
}

struct OptionBoolVisitor;

impl<'de> Visitor<'de> for OptionBoolVisitor {
    type Value = Option<bool>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an optional boolean or \"true\"/\"false\"")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Some(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        match value.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(Error::invalid_value(Unexpected::Str(value), &self)),
        }
    }
}

/// 数字或数字字符串 -> i64
pub fn string_or_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(I64Visitor)
}

/// 可选的数字或数字字符串 -> Option<i64>，null 和空字符串都视为 None
pub fn option_string_or_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionI64Visitor)
}

/// 可选的布尔值或 "true"/"false" 字符串 -> Option<bool>
pub fn option_string_or_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionBoolVisitor)
}

#[derive(Deserialize)]
struct LenientI64(#[serde(deserialize_with = "string_or_i64")] i64);

/// 可选的 ID 列表，元素可以是数字或数字字符串
pub fn option_vec_string_or_i64<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Option::<Vec<LenientI64>>::deserialize(deserializer)?;
    Ok(ids.map(|ids| ids.into_iter().map(|LenientI64(id)| id).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "option_string_or_i64")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "option_string_or_bool")]
        flag: Option<bool>,
    }

    #[test]
    fn test_json_numbers_and_strings() {
        let sample: Sample = serde_json::from_str(r#"{"id": 42, "flag": true}"#).unwrap();
        assert_eq!(sample.id, Some(42));
        assert_eq!(sample.flag, Some(true));

        let sample: Sample = serde_json::from_str(r#"{"id": "17", "flag": "false"}"#).unwrap();
        assert_eq!(sample.id, Some(17));
        assert_eq!(sample.flag, Some(false));
    }

    #[test]
    fn test_null_empty_and_missing() {
        let sample: Sample = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(sample.id, None);
        assert_eq!(sample.flag, None);

        let sample: Sample = serde_json::from_str(r#"{"id": "", "flag": ""}"#).unwrap();
        assert_eq!(sample.id, None);
        assert_eq!(sample.flag, None);
    }

    #[derive(Debug, Deserialize)]
    struct IdList {
        #[serde(default, deserialize_with = "option_vec_string_or_i64")]
        ids: Option<Vec<i64>>,
    }

    #[test]
    fn test_id_list_mixes_numbers_and_strings() {
        let list: IdList = serde_json::from_str(r#"{"ids": [3, "4", " 5 "]}"#).unwrap();
        assert_eq!(list.ids, Some(vec![3, 4, 5]));

        let list: IdList = serde_json::from_str(r#"{"ids": null}"#).unwrap();
        assert_eq!(list.ids, None);
        let list: IdList = serde_json::from_str("{}").unwrap();
        assert_eq!(list.ids, None);

        assert!(serde_json::from_str::<IdList>(r#"{"ids": ["x"]}"#).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"flag": "maybe"}"#).is_err());
    }
}
