use serde::{Deserialize, Deserializer};

// query-string values arrive as text; anything that does not parse falls back
// to the caller's default instead of failing the request
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.parse::<i64>().ok()))
}
