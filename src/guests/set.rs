//! Room guest configuration set and its mutation operations
//!
//! Every mutation is total: out-of-range values are clamped, impossible
//! actions (removing the last room, adding past the room cap, touching an
//! index that does not exist) are refused. Mutations return whether the set
//! changed so callers can skip re-rendering.

use super::room::{ChildAges, RoomGuestConfig};
use super::summary::{format_summary, GuestTotals};
use crate::config::{AgePolicy, GuestLimits, GuestWidget};
use tracing::debug;

/// Adults in the single room a widget opens with when no totals are given
const STARTING_ADULTS: u32 = 2;

/// Step `current` by `delta`, clamped to `[min, max]` but never moved further
/// outside that range than it already is
fn step_within(current: u32, delta: i64, min: u32, max: u32) -> u32 {
    let target = i64::from(current).saturating_add(delta);
    target.clamp(i64::from(min.min(current)), i64::from(max.max(current))) as u32
}

/// Ordered rooms of one search or booking, always at least one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomGuestConfigSet {
    rooms: Vec<RoomGuestConfig>,
    limits: GuestLimits,
    /// Age written into child slots added by the +/- controls
    new_child_age: i32,
}

impl Default for RoomGuestConfigSet {
    fn default() -> Self {
        Self::new(GuestLimits::default())
    }
}

impl RoomGuestConfigSet {
    /// One room with a single adult
    pub fn new(limits: GuestLimits) -> Self {
        Self {
            rooms: vec![RoomGuestConfig::single_adult()],
            limits,
            new_child_age: limits.default_child_age,
        }
    }

    /// Rooms a widget opens with when there are no search totals to spread
    ///
    /// The availability bar starts from the default search (2 adults, 1 room);
    /// the booking modal starts from one room with 2 adults.
    pub fn for_widget(widget: GuestWidget, limits: GuestLimits) -> Self {
        match widget {
            GuestWidget::Availability => Self::initialize(STARTING_ADULTS, 0, 1, &[], limits),
            GuestWidget::BookingDetails => Self::from_rooms(
                vec![RoomGuestConfig::new(STARTING_ADULTS, 0, ChildAges::new())],
                limits,
            ),
        }
    }

    /// Use `policy` for the age of children added from now on
    pub fn with_age_policy(mut self, policy: &AgePolicy) -> Self {
        self.new_child_age = policy.new_child_age(self.limits.default_child_age);
        self
    }

    /// Spread search totals across `room_count` rooms
    ///
    /// Totals are floor-divided and the remainder goes to the last room.
    /// Each room keeps at least `min_adults`, so when there are fewer adults
    /// than rooms the adult sum exceeds `total_adults`. Child ages are taken
    /// from `children_ages` in room order when a room's span lines up with its
    /// child count, otherwise that room gets default ages. Per-room counts are
    /// not capped here; the +/- controls only step them back toward the limits.
    pub fn initialize(
        total_adults: u32,
        total_children: u32,
        room_count: usize,
        children_ages: &[i32],
        limits: GuestLimits,
    ) -> Self {
        let room_count = limits.clamp_rooms(room_count);
        let divisor = room_count as u32;
        let adults_per_room = total_adults / divisor;
        let children_per_room = total_children / divisor;

        let mut rooms = Vec::with_capacity(room_count);
        for i in 0..room_count {
            let is_last = i == room_count - 1;
            let (room_adults, room_children) = if is_last {
                (
                    total_adults - adults_per_room * (divisor - 1),
                    total_children - children_per_room * (divisor - 1),
                )
            } else {
                (adults_per_room, children_per_room)
            };

            let start = (i * children_per_room as usize).min(children_ages.len());
            let end = if is_last {
                children_ages.len()
            } else {
                (start + children_per_room as usize).min(children_ages.len())
            };
            let span = &children_ages[start..end];
            let ages = if span.len() == room_children as usize {
                ChildAges::from_slice(span)
            } else {
                ChildAges::from_elem(limits.default_child_age, room_children as usize)
            };

            rooms.push(RoomGuestConfig::new(
                room_adults.max(limits.min_adults),
                room_children,
                ages,
            ));
        }

        Self {
            rooms,
            limits,
            new_child_age: limits.default_child_age,
        }
    }

    /// Rebuild a set from decoded rooms, repairing them to the invariants
    pub fn from_rooms(rooms: Vec<RoomGuestConfig>, limits: GuestLimits) -> Self {
        let mut rooms: Vec<RoomGuestConfig> = rooms
            .into_iter()
            .take(limits.max_rooms.max(1))
            .map(|room| room.normalized(&limits))
            .collect();
        if rooms.is_empty() {
            rooms.push(RoomGuestConfig::single_adult());
        }
        Self {
            rooms,
            limits,
            new_child_age: limits.default_child_age,
        }
    }

    #[inline]
    pub fn rooms(&self) -> &[RoomGuestConfig] {
        &self.rooms
    }

    #[inline]
    pub fn room(&self, index: usize) -> Option<&RoomGuestConfig> {
        self.rooms.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    #[inline]
    pub fn limits(&self) -> &GuestLimits {
        &self.limits
    }

    #[inline]
    pub fn can_add_room(&self) -> bool {
        self.rooms.len() < self.limits.max_rooms
    }

    #[inline]
    pub fn can_remove_room(&self) -> bool {
        self.rooms.len() > 1
    }

    /// Append a room with one adult
    pub fn add_room(&mut self) -> bool {
        if !self.can_add_room() {
            debug!(rooms = self.rooms.len(), "room cap reached, add refused");
            return false;
        }
        self.rooms.push(RoomGuestConfig::single_adult());
        true
    }

    pub fn remove_room(&mut self, index: usize) -> bool {
        if !self.can_remove_room() || index >= self.rooms.len() {
            debug!(index, rooms = self.rooms.len(), "remove room refused");
            return false;
        }
        self.rooms.remove(index);
        true
    }

    /// Grow or shrink to `count` rooms (clamped), keeping the leading rooms
    pub fn set_room_count(&mut self, count: usize) -> bool {
        let count = self.limits.clamp_rooms(count);
        if count == self.rooms.len() {
            return false;
        }
        self.rooms.resize_with(count, RoomGuestConfig::single_adult);
        true
    }

    pub fn set_room_adults(&mut self, index: usize, value: i64) -> bool {
        let adults = self.limits.clamp_adults(value);
        self.apply_adults(index, adults)
    }

    /// The +/- adult buttons
    ///
    /// A count already above the cap (from `initialize`) can only step down.
    pub fn adjust_room_adults(&mut self, index: usize, delta: i64) -> bool {
        let Some(room) = self.rooms.get(index) else {
            debug!(index, "adjust adults on missing room");
            return false;
        };
        let adults = step_within(room.adults, delta, self.limits.min_adults, self.limits.max_adults);
        self.apply_adults(index, adults)
    }

    fn apply_adults(&mut self, index: usize, adults: u32) -> bool {
        let Some(room) = self.rooms.get_mut(index) else {
            debug!(index, "set adults on missing room");
            return false;
        };
        if room.adults == adults {
            return false;
        }
        room.adults = adults;
        true
    }

    /// Clamp the child count and resize the ages together
    pub fn set_room_children(&mut self, index: usize, value: i64) -> bool {
        let children = self.limits.clamp_children(value);
        self.apply_children(index, children)
    }

    /// The +/- child buttons
    ///
    /// A count already above the cap can only step down, one slot at a time.
    pub fn adjust_room_children(&mut self, index: usize, delta: i64) -> bool {
        let Some(room) = self.rooms.get(index) else {
            debug!(index, "adjust children on missing room");
            return false;
        };
        let children = step_within(room.children, delta, 0, self.limits.max_children);
        self.apply_children(index, children)
    }

    fn apply_children(&mut self, index: usize, children: u32) -> bool {
        let new_child_age = self.new_child_age;
        let Some(room) = self.rooms.get_mut(index) else {
            debug!(index, "set children on missing room");
            return false;
        };
        if room.children == children {
            return false;
        }
        room.resize_children(children, new_child_age);
        true
    }

    /// Overwrite one child's age; the value itself is not range-checked
    pub fn set_child_age(&mut self, room_index: usize, child_index: usize, age: i32) -> bool {
        match self
            .rooms
            .get_mut(room_index)
            .and_then(|room| room.children_ages.get_mut(child_index))
        {
            Some(slot) => {
                *slot = age;
                true
            }
            None => {
                debug!(room_index, child_index, "set age on missing child");
                false
            }
        }
    }

    /// `(room, child)` positions still holding the policy's unset sentinel
    pub fn unset_ages(&self, policy: &AgePolicy) -> Vec<(usize, usize)> {
        self.rooms
            .iter()
            .enumerate()
            .flat_map(|(room_index, room)| {
                room.children_ages
                    .iter()
                    .enumerate()
                    .filter(|(_, age)| policy.is_unset(**age))
                    .map(move |(child_index, _)| (room_index, child_index))
            })
            .collect()
    }

    /// Sum adults and children and flatten ages in room order
    pub fn aggregate(&self) -> GuestTotals {
        let mut totals = GuestTotals::default();
        for room in &self.rooms {
            totals.total_adults = totals.total_adults.saturating_add(room.adults);
            totals.total_children = totals.total_children.saturating_add(room.children);
            totals.all_children_ages.extend_from_slice(&room.children_ages);
        }
        totals
    }

    /// Label such as `"3 adults · 1 child · 2 rooms"`
    pub fn summary(&self) -> String {
        let totals = self.aggregate();
        format_summary(totals.total_adults, totals.total_children, self.rooms.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> GuestLimits {
        GuestLimits::default()
    }

    #[test]
    fn test_initialize_splits_with_remainder_in_last_room() {
        let set = RoomGuestConfigSet::initialize(5, 2, 2, &[], limits());
        assert_eq!(set.len(), 2);
        assert_eq!(set.rooms()[0].adults, 2);
        assert_eq!(set.rooms()[0].children, 1);
        assert_eq!(set.rooms()[1].adults, 3);
        assert_eq!(set.rooms()[1].children, 1);
        assert_eq!(set.rooms()[0].children_ages.as_slice(), &[5]);
    }

    #[test]
    fn test_initialize_slices_matching_ages() {
        let set = RoomGuestConfigSet::initialize(4, 3, 2, &[3, 8, 11], limits());
        assert_eq!(set.rooms()[0].children_ages.as_slice(), &[3]);
        assert_eq!(set.rooms()[1].children_ages.as_slice(), &[8, 11]);
        assert_eq!(set.aggregate().all_children_ages, vec![3, 8, 11]);
    }

    #[test]
    fn test_initialize_mismatched_ages_use_default() {
        let set = RoomGuestConfigSet::initialize(2, 2, 1, &[7], limits());
        assert_eq!(set.rooms()[0].children_ages.as_slice(), &[5, 5]);
    }

    #[test]
    fn test_initialize_floors_adults_to_one() {
        let set = RoomGuestConfigSet::initialize(1, 0, 3, &[], limits());
        assert!(set.rooms().iter().all(|room| room.adults == 1));
        assert_eq!(set.aggregate().total_adults, 3);
    }

    #[test]
    fn test_initialize_clamps_room_count() {
        assert_eq!(RoomGuestConfigSet::initialize(2, 0, 0, &[], limits()).len(), 1);
        assert_eq!(RoomGuestConfigSet::initialize(12, 0, 9, &[], limits()).len(), 5);
    }

    #[test]
    fn test_add_room_respects_cap() {
        let mut set = RoomGuestConfigSet::initialize(5, 0, 5, &[], limits());
        assert!(!set.add_room());
        assert_eq!(set.len(), 5);

        let mut set = RoomGuestConfigSet::default();
        assert!(set.add_room());
        assert_eq!(set.rooms()[1], RoomGuestConfig::single_adult());
    }

    #[test]
    fn test_remove_last_room_refused() {
        let mut set = RoomGuestConfigSet::default();
        let before = set.clone();
        assert!(!set.remove_room(0));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_room_by_index() {
        let mut set = RoomGuestConfigSet::initialize(6, 0, 3, &[], limits());
        set.set_room_adults(1, 7);
        assert!(set.remove_room(1));
        assert_eq!(set.len(), 2);
        assert!(set.rooms().iter().all(|room| room.adults == 2));
        assert!(!set.remove_room(5));
    }

    #[test]
    fn test_adults_clamped() {
        let mut set = RoomGuestConfigSet::default();
        set.set_room_adults(0, 0);
        assert_eq!(set.rooms()[0].adults, 1);
        set.set_room_adults(0, 42);
        assert_eq!(set.rooms()[0].adults, 10);
        assert!(!set.adjust_room_adults(0, 1));
        assert!(set.adjust_room_adults(0, -1));
        assert_eq!(set.rooms()[0].adults, 9);
    }

    #[test]
    fn test_children_clamped_and_ages_resized() {
        let mut set = RoomGuestConfigSet::default();
        set.set_room_children(0, 6);
        assert_eq!(set.rooms()[0].children, 5);
        assert_eq!(set.rooms()[0].children_ages.len(), 5);

        set.set_child_age(0, 0, 9);
        set.set_room_children(0, 1);
        assert_eq!(set.rooms()[0].children_ages.as_slice(), &[9]);

        set.adjust_room_children(0, -3);
        assert_eq!(set.rooms()[0].children, 0);
        assert!(set.rooms()[0].children_ages.is_empty());
    }

    #[test]
    fn test_set_child_age_then_aggregate() {
        let mut set = RoomGuestConfigSet::default();
        set.set_room_children(0, 2);
        assert!(set.set_child_age(0, 0, 7));
        assert_eq!(set.aggregate().all_children_ages[0], 7);
        // Out-of-range ages are stored as given
        assert!(set.set_child_age(0, 1, 40));
        assert_eq!(set.rooms()[0].children_ages[1], 40);
    }

    #[test]
    fn test_missing_indices_are_noops() {
        let mut set = RoomGuestConfigSet::default();
        let before = set.clone();
        assert!(!set.set_room_adults(3, 2));
        assert!(!set.set_room_children(3, 2));
        assert!(!set.adjust_room_children(3, 1));
        assert!(!set.set_child_age(0, 0, 4));
        assert!(!set.set_child_age(4, 0, 4));
        assert_eq!(set, before);
    }

    #[test]
    fn test_set_room_count() {
        let mut set = RoomGuestConfigSet::initialize(4, 0, 2, &[], limits());
        assert!(set.set_room_count(4));
        assert_eq!(set.len(), 4);
        assert_eq!(set.rooms()[3], RoomGuestConfig::single_adult());
        assert!(set.set_room_count(1));
        assert_eq!(set.rooms()[0].adults, 2);
        assert!(!set.set_room_count(0));
        assert!(set.set_room_count(20));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_unset_ages() {
        let mut set = RoomGuestConfigSet::default();
        set.add_room();
        set.set_room_children(0, 2);
        set.set_room_children(1, 1);
        set.set_child_age(0, 1, 0);
        set.set_child_age(1, 0, 0);

        let policy = AgePolicy::with_unset_sentinel();
        assert_eq!(set.unset_ages(&policy), vec![(0, 1), (1, 0)]);
        assert!(set.unset_ages(&AgePolicy::free_choice()).is_empty());
    }

    #[test]
    fn test_from_rooms_repairs() {
        let rooms = vec![
            RoomGuestConfig::new(0, 2, ChildAges::new()),
            RoomGuestConfig::single_adult(),
        ];
        let set = RoomGuestConfigSet::from_rooms(rooms, limits());
        assert_eq!(set.rooms()[0].adults, 1);
        assert_eq!(set.rooms()[0].children_ages.as_slice(), &[5, 5]);

        let empty = RoomGuestConfigSet::from_rooms(Vec::new(), limits());
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn test_summary() {
        let set = RoomGuestConfigSet::default();
        assert_eq!(set.summary(), "1 adult · 1 room");
        let set = RoomGuestConfigSet::initialize(5, 2, 2, &[], limits());
        assert_eq!(set.summary(), "5 adults · 2 children · 2 rooms");
    }

    #[test]
    fn test_adjust_never_pushes_past_over_limit_start() {
        let mut set = RoomGuestConfigSet::initialize(2, 12, 1, &[], limits());
        assert_eq!(set.rooms()[0].children, 12);
        assert!(!set.adjust_room_children(0, 1));
        assert_eq!(set.rooms()[0].children, 12);
        assert_eq!(set.rooms()[0].children_ages.len(), 12);
        assert!(set.adjust_room_children(0, -1));
        assert_eq!(set.rooms()[0].children, 11);
        assert_eq!(set.rooms()[0].children_ages.len(), 11);

        let mut set = RoomGuestConfigSet::initialize(30, 0, 1, &[], limits());
        assert!(!set.adjust_room_adults(0, 1));
        assert_eq!(set.rooms()[0].adults, 30);
        assert!(set.adjust_room_adults(0, -1));
        assert_eq!(set.rooms()[0].adults, 29);
    }

    #[test]
    fn test_adjust_extreme_delta() {
        let mut set = RoomGuestConfigSet::default();
        assert!(set.adjust_room_adults(0, i64::MAX));
        assert_eq!(set.rooms()[0].adults, 10);
        assert!(set.adjust_room_adults(0, i64::MIN));
        assert_eq!(set.rooms()[0].adults, 1);
    }

    #[test]
    fn test_sentinel_policy_leaves_new_children_unset() {
        let policy = AgePolicy::with_unset_sentinel();
        let mut set = RoomGuestConfigSet::default().with_age_policy(&policy);
        assert!(set.adjust_room_children(0, 1));
        assert_eq!(set.unset_ages(&policy), vec![(0, 0)]);

        set.set_child_age(0, 0, 7);
        assert!(set.unset_ages(&policy).is_empty());

        let mut set = RoomGuestConfigSet::default().with_age_policy(&AgePolicy::free_choice());
        set.set_room_children(0, 2);
        assert_eq!(set.rooms()[0].children_ages.as_slice(), &[5, 5]);
    }

    #[test]
    fn test_for_widget() {
        let booking = RoomGuestConfigSet::for_widget(GuestWidget::BookingDetails, limits());
        assert_eq!(booking.rooms(), &[RoomGuestConfig::new(2, 0, ChildAges::new())]);

        let search = RoomGuestConfigSet::for_widget(GuestWidget::Availability, limits());
        assert_eq!(search.summary(), "2 adults · 1 room");
    }
}
