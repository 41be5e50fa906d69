use crate::network::Timestamp;

// Timestamp is seconds since the start of the service day, and may run past midnight (e.g. "25:10:00").

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid time \"{0}\" (expected H:MM:SS).")]
    Invalid(String),
}

fn parse_time_impl(h: &str, m: &str, s: &str) -> Result<Timestamp, std::num::ParseIntError> {
    let hours: u32 = h.parse()?;
    let minutes: u32 = m.parse()?;
    let seconds: u32 = s.parse()?;
    Ok(hours * 3600 + minutes * 60 + seconds)
}

pub fn parse_time(s: &str) -> Result<Timestamp, TimeParseError> {
    let invalid = || TimeParseError::Invalid(s.to_owned());
    let s = s.trim();
    if s.len() < 7 {
        return Err(invalid());
    }

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let (hour, min, sec) = (parts[0], parts[1], parts[2]);
    if hour.is_empty() || hour.len() > 3 || min.len() != 2 || sec.len() != 2 {
        return Err(invalid());
    }
    // Hours may exceed 23, minutes and seconds may not.
    if min > "59" || sec > "59" {
        return Err(invalid());
    }

    parse_time_impl(hour, min, sec).map_err(|_| invalid())
}

pub fn get_time_str(time: Timestamp) -> String {
    let hours = time / 3600;
    let minutes = (time % 3600) / 60;
    let seconds = time % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
