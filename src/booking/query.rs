//! Search parameters read back from a hotel page URL

use super::dates::StayDates;
use crate::config::GuestLimits;
use crate::error::Result;
use crate::guests::{RoomGuestConfig, RoomGuestConfigSet};
use serde_json::{Map, Value};
use tracing::warn;

const DEFAULT_ADULTS: u32 = 2;

/// Decoded search state that seeds a guest widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub adults: u32,
    pub children: u32,
    pub rooms: usize,
    pub children_ages: Vec<i32>,
    /// Per-room detail, empty when the URL only carried totals
    pub room_guests: Vec<RoomGuestConfig>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            adults: DEFAULT_ADULTS,
            children: 0,
            rooms: 1,
            children_ages: Vec::new(),
            room_guests: Vec::new(),
        }
    }
}

/// Leading-integer parse; malformed values fall back to `default`
fn parse_count<T: std::str::FromStr>(key: &str, value: &str, default: T) -> T {
    let digits: String = value.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(key, value, "ignoring malformed count in search query");
            default
        }
    }
}

/// Comma-separated ages; entries that are not integers are skipped
fn parse_ages(value: &str) -> Vec<i32> {
    value
        .split(',')
        .filter_map(|age| age.trim().parse::<i32>().ok())
        .collect()
}

impl SearchQuery {
    /// Read URL query pairs; unknown keys are ignored
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        let mut rooms: Option<usize> = None;

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "checkIn" if !value.is_empty() => query.check_in = Some(value.to_string()),
                "checkOut" if !value.is_empty() => query.check_out = Some(value.to_string()),
                "adults" if !value.is_empty() => query.adults = parse_count(key, value, DEFAULT_ADULTS),
                "children" if !value.is_empty() => query.children = parse_count(key, value, 0),
                "rooms" if !value.is_empty() => {
                    rooms = Some(parse_count(key, value, 1));
                }
                "childrenAges" => query.children_ages = parse_ages(value),
                "roomGuests" if !value.is_empty() => {
                    match serde_json::from_str::<Vec<RoomGuestConfig>>(value) {
                        Ok(decoded) => query.room_guests = decoded,
                        Err(e) => warn!(error = %e, "ignoring malformed roomGuests in search query"),
                    }
                }
                _ => {}
            }
        }

        query.rooms = rooms
            .filter(|rooms| *rooms > 0)
            .unwrap_or_else(|| query.room_guests.len().max(1));
        query
    }

    /// Read stored parameters whose values may be strings or numbers
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self::from_pairs(object.iter().filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => value.to_string(),
                Value::Bool(_) | Value::Null => return None,
            };
            Some((key.as_str(), value))
        }))
    }

    /// Validated stay dates
    pub fn stay(&self) -> Result<StayDates> {
        StayDates::parse(self.check_in.as_deref(), self.check_out.as_deref())
    }

    /// Rooms to open the widget with
    ///
    /// Per-room detail wins when present; otherwise the totals are spread
    /// across `rooms`.
    pub fn room_guests(&self, limits: GuestLimits) -> RoomGuestConfigSet {
        if self.room_guests.is_empty() {
            RoomGuestConfigSet::initialize(
                self.adults,
                self.children,
                self.rooms,
                &self.children_ages,
                limits,
            )
        } else {
            RoomGuestConfigSet::from_rooms(self.room_guests.clone(), limits)
        }
    }
}
