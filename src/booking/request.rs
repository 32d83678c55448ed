//! Apply / confirm payload handed to the search or booking API

use super::dates::StayDates;
use crate::error::{BookingCoreError, Result};
use crate::guests::{RoomGuestConfig, RoomGuestConfigSet};
use serde::Serialize;

/// Request emitted when a guest widget is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// `YYYY-MM-DD`
    pub check_in: String,
    /// `YYYY-MM-DD`
    pub check_out: String,
    pub adults: u32,
    pub children: u32,
    pub rooms: usize,
    pub children_ages: Vec<i32>,
    pub room_guests: Vec<RoomGuestConfig>,
}

impl BookingRequest {
    /// Derive the request from a validated stay and the current rooms
    pub fn build(stay: &StayDates, set: &RoomGuestConfigSet) -> Self {
        let totals = set.aggregate();
        Self {
            check_in: stay.check_in_wire(),
            check_out: stay.check_out_wire(),
            adults: totals.total_adults,
            children: totals.total_children,
            rooms: set.len(),
            children_ages: totals.all_children_ages,
            room_guests: set.rooms().to_vec(),
        }
    }

    /// Total people; saturates instead of wrapping on absurd counts
    #[inline]
    pub fn guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BookingCoreError::SerializationError(e.to_string()))
    }

    /// URL query parameters for the hotel page
    ///
    /// `childrenAges` is comma-joined and `roomGuests` is JSON, matching what
    /// `SearchQuery::from_pairs` reads back.
    pub fn to_query_pairs(&self) -> Result<Vec<(String, String)>> {
        let room_guests = serde_json::to_string(&self.room_guests)
            .map_err(|e| BookingCoreError::SerializationError(e.to_string()))?;
        let children_ages = self
            .children_ages
            .iter()
            .map(|age| age.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut pairs = vec![
            ("checkIn".to_string(), self.check_in.clone()),
            ("checkOut".to_string(), self.check_out.clone()),
            ("guests".to_string(), self.guests().to_string()),
            ("adults".to_string(), self.adults.to_string()),
            ("children".to_string(), self.children.to_string()),
            ("rooms".to_string(), self.rooms.to_string()),
        ];
        if !children_ages.is_empty() {
            pairs.push(("childrenAges".to_string(), children_ages));
        }
        pairs.push(("roomGuests".to_string(), room_guests));
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuestLimits;

    fn sample_request() -> BookingRequest {
        let stay = StayDates::parse(Some("2026-11-02"), Some("2026-11-05")).unwrap();
        let mut set = RoomGuestConfigSet::initialize(3, 1, 2, &[], GuestLimits::default());
        set.set_child_age(1, 0, 8);
        BookingRequest::build(&stay, &set)
    }

    #[test]
    fn test_build_from_rooms() {
        let request = sample_request();
        assert_eq!(request.adults, 3);
        assert_eq!(request.children, 1);
        assert_eq!(request.rooms, 2);
        assert_eq!(request.children_ages, vec![8]);
        assert_eq!(request.room_guests.len(), 2);
        assert_eq!(request.guests(), 4);
    }

    #[test]
    fn test_json_shape() {
        let json = sample_request().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["checkIn"], "2026-11-02");
        assert_eq!(value["checkOut"], "2026-11-05");
        assert_eq!(value["childrenAges"], serde_json::json!([8]));
        assert_eq!(value["roomGuests"][1]["childrenAges"], serde_json::json!([8]));
        assert_eq!(value["roomGuests"][0]["children"], 0);
    }

    #[test]
    fn test_query_pairs() {
        let pairs = sample_request().to_query_pairs().unwrap();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("guests"), Some("4"));
        assert_eq!(get("rooms"), Some("2"));
        assert_eq!(get("childrenAges"), Some("8"));
        assert_eq!(
            get("roomGuests"),
            Some(r#"[{"adults":1,"children":0,"childrenAges":[]},{"adults":2,"children":1,"childrenAges":[8]}]"#)
        );
    }

    #[test]
    fn test_guest_total_saturates() {
        let stay = StayDates::parse(Some("2026-11-02"), Some("2026-11-05")).unwrap();
        let set = RoomGuestConfigSet::initialize(u32::MAX, 1, 1, &[], GuestLimits::default());
        let request = BookingRequest::build(&stay, &set);
        assert_eq!(request.guests(), u32::MAX);

        let pairs = request.to_query_pairs().unwrap();
        let guests = pairs.iter().find(|(k, _)| k == "guests").map(|(_, v)| v.clone());
        assert_eq!(guests, Some(u32::MAX.to_string()));
    }
}
