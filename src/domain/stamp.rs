use std::fmt;

use serde::Serialize;
use time::error::InvalidFormatDescription;
use time::format_description::{self, OwnedFormatItem};
use time::OffsetDateTime;
use tracing::warn;

/// MySQL-style `Y-m-d H:i:s`, rendered in UTC.
pub const CALENDAR_LAYOUT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

/// A point in time in the representation records are compared in.
///
/// Ordering is only meaningful between two stamps of the same kind. Comparing a
/// `Unix` stamp with a `Calendar` one falls back to variant order, which is a
/// configuration mistake rather than something to paper over here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Stamp {
    Unix(i64),
    Calendar(String),
}

impl Stamp {
    pub fn same_kind(&self, other: &Stamp) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stamp::Unix(secs) => write!(f, "{secs}"),
            Stamp::Calendar(text) => f.write_str(text),
        }
    }
}

/// How the previous visit is rendered before it is compared with record stamps.
#[derive(Debug, Clone, Default)]
pub enum TimestampFormat {
    #[default]
    Unix,
    Calendar {
        description: String,
        items: OwnedFormatItem,
    },
}

impl PartialEq for TimestampFormat {
    fn eq(&self, other: &Self) -> bool {
        self.describe() == other.describe()
    }
}

impl Eq for TimestampFormat {}

impl TimestampFormat {
    pub fn calendar(description: &str) -> Result<Self, InvalidFormatDescription> {
        let items = format_description::parse_owned::<1>(description)?;
        Ok(Self::Calendar { description: description.to_owned(), items })
    }

    /// `unix` (or PHP's `U`) selects epoch seconds, anything else is a `time`
    /// format description.
    pub fn parse(raw: &str) -> Result<Self, InvalidFormatDescription> {
        match raw.trim() {
            "" | "unix" | "U" => Ok(Self::Unix),
            description => Self::calendar(description),
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            Self::Unix => "unix",
            Self::Calendar { description, .. } => description,
        }
    }

    pub fn stamp(&self, unix: i64) -> Stamp {
        match self {
            Self::Unix => Stamp::Unix(unix),
            Self::Calendar { items, description } => {
                let rendered = OffsetDateTime::from_unix_timestamp(unix)
                    .ok()
                    .and_then(|dt| dt.format(items).ok());
                match rendered {
                    Some(text) => Stamp::Calendar(text),
                    None => {
                        warn!(unix, format = %description, "timestamp not representable, keeping epoch seconds");
                        Stamp::Unix(unix)
                    }
                }
            }
        }
    }

    pub fn stamp_at(&self, at: OffsetDateTime) -> Stamp {
        self.stamp(at.unix_timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_is_the_default_and_keeps_seconds() {
        let format = TimestampFormat::default();
        assert_eq!(format.stamp(1_700_000_000), Stamp::Unix(1_700_000_000));
        assert_eq!(TimestampFormat::parse("unix").unwrap(), TimestampFormat::Unix);
        assert_eq!(TimestampFormat::parse("U").unwrap(), TimestampFormat::Unix);
    }

    #[test]
    fn calendar_layout_renders_utc() {
        let format = TimestampFormat::calendar(CALENDAR_LAYOUT).unwrap();
        assert_eq!(
            format.stamp(1_700_000_000),
            Stamp::Calendar("2023-11-14 22:13:20".to_owned())
        );
        assert_eq!(format.describe(), CALENDAR_LAYOUT);
    }

    #[test]
    fn calendar_strings_order_chronologically() {
        let format = TimestampFormat::calendar(CALENDAR_LAYOUT).unwrap();
        assert!(format.stamp(1_700_000_000) < format.stamp(1_700_000_001));
        assert!(format.stamp(999_999_999) < format.stamp(1_000_000_000));
    }

    #[test]
    fn bad_description_is_rejected() {
        assert!(TimestampFormat::parse("[year").is_err());
    }

    #[test]
    fn kinds_are_distinguished() {
        let unix = Stamp::Unix(1);
        assert!(unix.same_kind(&Stamp::Unix(2)));
        assert!(!unix.same_kind(&Stamp::Calendar("1970".into())));
    }
}
