use serde::de::{self, Deserialize, Deserializer};
use tracing::debug;

// Custom deserializer to handle both number and string inputs for u32
pub fn string_or_number_to_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    debug!("Deserializing value for u32: {:?}", value);

    match value {
        serde_json::Value::Number(num) => num.as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| de::Error::custom("Invalid number for u32")),
        serde_json::Value::String(s) => s.parse::<u32>()
            .map_err(|_| de::Error::custom("Invalid string for u32")),
        _ => Err(de::Error::custom("Expected a string or a number")),
    }
}

// Chain ids show up as both "7700" and 7700 in token lists
pub fn string_or_number_to_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::Number(num) => num.as_u64()
            .ok_or_else(|| de::Error::custom("Invalid number for u64")),
        serde_json::Value::String(s) => s.parse::<u64>()
            .map_err(|_| de::Error::custom("Invalid string for u64")),
        _ => Err(de::Error::custom("Expected a string or a number")),
    }
}

// Custom deserializer to ensure amounts are always treated as strings
pub fn number_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    debug!("Deserializing value for string: {:?}", value);

    match value {
        serde_json::Value::Number(num) => Ok(num.to_string()),
        serde_json::Value::String(s) => Ok(s),
        _ => Err(de::Error::custom("Expected a string or a number")),
    }
}

// Custom deserializer to handle both number and string inputs for Option<u32>
pub fn string_or_number_to_option_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    debug!("Deserializing value for Option<u32>: {:?}", value);

    match value {
        serde_json::Value::Number(num) => num.as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom("Invalid number for u32")),
        serde_json::Value::String(s) => s.parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom("Invalid string for u32")),
        serde_json::Value::Null => Ok(None),
        _ => Err(de::Error::custom("Expected a string, number, or null")),
    }
}

// Same as above for optional chain ids
pub fn string_or_number_to_option_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::Number(num) => num.as_u64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("Invalid number for u64")),
        serde_json::Value::String(s) => s.parse::<u64>()
            .map(Some)
            .map_err(|_| de::Error::custom("Invalid string for u64")),
        serde_json::Value::Null => Ok(None),
        _ => Err(de::Error::custom("Expected a string, number, or null")),
    }
}
