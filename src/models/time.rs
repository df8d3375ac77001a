use serde::{Deserialize, Serialize};

/// Time of day as minutes since midnight.
///
/// Parses both 12-hour (`"6:30 PM"`) and 24-hour (`"18:30"`) clock strings
/// and orders chronologically, so itinerary entries sort correctly however
/// the time was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Create from minutes since midnight. Returns `None` past 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < 24 * 60 {
            Some(TimeOfDay(minutes))
        } else {
            None
        }
    }

    /// Create from an hour/minute pair on the 24-hour clock.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl Default for TimeOfDay {
    /// Midnight.
    fn default() -> Self {
        TimeOfDay(0)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("time of day must not be empty".to_string());
        }

        // Split an optional trailing AM/PM marker, with or without a space.
        let upper = trimmed.to_ascii_uppercase();
        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end().to_string(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end().to_string(), Some(true))
        } else {
            (upper, None)
        };

        let mut parts = clock.split(':');
        let hour: u16 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(|| format!("invalid time of day: {:?}", s))?;
        let minute: u16 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(|| format!("invalid time of day: {:?}", s))?;
        // A trailing seconds component (from database TIME columns) is accepted
        // and ignored.
        if parts.clone().count() > 1 {
            return Err(format!("invalid time of day: {:?}", s));
        }
        if minute >= 60 {
            return Err(format!("minute out of range in {:?}", s));
        }

        let hour = match meridiem {
            None => {
                if hour >= 24 {
                    return Err(format!("hour out of range in {:?}", s));
                }
                hour
            }
            Some(pm) => {
                if hour == 0 || hour > 12 {
                    return Err(format!("hour out of range in {:?}", s));
                }
                match (hour, pm) {
                    (12, false) => 0,
                    (12, true) => 12,
                    (h, false) => h,
                    (h, true) => h + 12,
                }
            }
        };

        Ok(TimeOfDay(hour * 60 + minute))
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (hour12, meridiem) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{}:{:02} {}", hour12, self.minute(), meridiem)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::TimeOfDay;

    #[test]
    fn test_parse_12_hour() {
        let t: TimeOfDay = "6:30 PM".parse().unwrap();
        assert_eq!(t.minutes(), 18 * 60 + 30);
    }

    #[test]
    fn test_parse_24_hour() {
        let t: TimeOfDay = "18:30".parse().unwrap();
        assert_eq!(t.minutes(), 18 * 60 + 30);
    }

    #[test]
    fn test_parse_midnight_and_noon() {
        assert_eq!("12:00 AM".parse::<TimeOfDay>().unwrap().minutes(), 0);
        assert_eq!("12:00 PM".parse::<TimeOfDay>().unwrap().minutes(), 720);
    }

    #[test]
    fn test_parse_without_space_before_meridiem() {
        let t: TimeOfDay = "8:05am".parse().unwrap();
        assert_eq!(t.minutes(), 8 * 60 + 5);
    }

    #[test]
    fn test_parse_with_seconds() {
        let t: TimeOfDay = "09:15:00".parse().unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 15);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<TimeOfDay>().is_err());
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("13:00 PM".parse::<TimeOfDay>().is_err());
        assert!("10:75".parse::<TimeOfDay>().is_err());
        assert!("rope drop".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let morning: TimeOfDay = "9:00 AM".parse().unwrap();
        let noon: TimeOfDay = "12:00 PM".parse().unwrap();
        let evening: TimeOfDay = "6:30 PM".parse().unwrap();
        assert!(morning < noon);
        assert!(noon < evening);
    }

    #[test]
    fn test_display_is_12_hour() {
        let t = TimeOfDay::from_hm(18, 30).unwrap();
        assert_eq!(t.to_string(), "6:30 PM");
        let t = TimeOfDay::from_hm(0, 5).unwrap();
        assert_eq!(t.to_string(), "12:05 AM");
    }

    #[test]
    fn test_display_parse_roundtrip() {
        for minutes in [0u16, 59, 720, 1439] {
            let t = TimeOfDay::from_minutes(minutes).unwrap();
            let back: TimeOfDay = t.to_string().parse().unwrap();
            assert_eq!(t, back);
        }
    }

    #[test]
    fn test_from_minutes_bounds() {
        assert!(TimeOfDay::from_minutes(1439).is_some());
        assert!(TimeOfDay::from_minutes(1440).is_none());
    }
}
