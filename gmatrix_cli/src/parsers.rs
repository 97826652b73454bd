pub fn parse_timestamp(input: &str) -> Result<jiff::Timestamp, String> {
    if input == "now" {
        return Ok(jiff::Timestamp::now());
    }

    if let Ok(timestamp) = input.parse::<jiff::Timestamp>() {
        return Ok(timestamp);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return jiff::Timestamp::from_second(seconds).map_err(|err| err.to_string());
    }

    Err(String::from("Invalid timestamp"))
}

/// Parses `key=value`, the value may itself contain `=`.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Expected key=value, got {input}")),
    }
}
