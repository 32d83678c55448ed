//! Child age policies for the guest widgets

/// Age value meaning "not chosen yet" under a sentinel policy
pub const UNSET_AGE: i32 = 0;

/// Selectable child-age domain for one widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePolicy {
    pub min: i32,
    pub max: i32,
    /// Whether `UNSET_AGE` is shown as a "please choose" placeholder
    pub has_unset_sentinel: bool,
}

impl AgePolicy {
    /// Ages 0..=12, every value a real choice
    pub const fn free_choice() -> Self {
        Self {
            min: 0,
            max: 12,
            has_unset_sentinel: false,
        }
    }

    /// Ages 2..=12 with 0 as the unset placeholder
    pub const fn with_unset_sentinel() -> Self {
        Self {
            min: 2,
            max: 12,
            has_unset_sentinel: true,
        }
    }

    /// Ages offered by the selector, in display order
    pub fn choices(&self) -> Vec<i32> {
        (self.min..=self.max).collect()
    }

    /// Whether `age` is one of the selectable values
    #[inline]
    pub fn accepts(&self, age: i32) -> bool {
        (self.min..=self.max).contains(&age)
    }

    #[inline]
    pub fn is_unset(&self, age: i32) -> bool {
        self.has_unset_sentinel && age == UNSET_AGE
    }

    /// Age written into a freshly added child slot
    ///
    /// Sentinel policies leave the slot unset so the selector shows its
    /// placeholder; otherwise the slot starts at `default_age`.
    #[inline]
    pub fn new_child_age(&self, default_age: i32) -> i32 {
        if self.has_unset_sentinel {
            UNSET_AGE
        } else {
            default_age
        }
    }
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self::free_choice()
    }
}

/// The two widgets that edit room guests
///
/// The widget picks the age policy and, when no search totals are passed in,
/// the starting rooms (see `RoomGuestConfigSet::for_widget`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestWidget {
    /// "Change search" bar on listing and hotel pages
    #[default]
    Availability,
    /// Modal opened before navigating to a hotel
    BookingDetails,
}

impl GuestWidget {
    /// Parse a widget name as passed from Python
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "availability" | "search" => Some(Self::Availability),
            "booking_details" | "booking" | "modal" => Some(Self::BookingDetails),
            _ => None,
        }
    }
}
