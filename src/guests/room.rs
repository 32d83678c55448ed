//! Per-room guest configuration

use crate::config::GuestLimits;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Child ages for one room - at most a handful, kept inline
pub type ChildAges = SmallVec<[i32; 5]>;

/// Guests requested for one physical room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomGuestConfig {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    /// One entry per child, in the order the children were added
    #[serde(default)]
    pub children_ages: ChildAges,
}

impl Default for RoomGuestConfig {
    fn default() -> Self {
        Self::single_adult()
    }
}

impl RoomGuestConfig {
    #[inline]
    pub fn new(adults: u32, children: u32, children_ages: ChildAges) -> Self {
        Self {
            adults,
            children,
            children_ages,
        }
    }

    /// Room added by the "add room" action
    #[inline]
    pub fn single_adult() -> Self {
        Self {
            adults: 1,
            children: 0,
            children_ages: ChildAges::new(),
        }
    }

    /// Total people in this room
    #[inline]
    pub fn guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Set the child count and resize the ages in the same step
    #[inline]
    pub(crate) fn resize_children(&mut self, count: u32, default_age: i32) {
        self.children = count;
        self.children_ages.resize(count as usize, default_age);
    }

    /// Bring a decoded room back inside `limits`, padding or truncating ages
    pub fn normalized(mut self, limits: &GuestLimits) -> Self {
        self.adults = limits.clamp_adults(i64::from(self.adults));
        let children = limits.clamp_children(i64::from(self.children));
        self.resize_children(children, limits.default_child_age);
        self
    }
}
