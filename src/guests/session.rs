//! RoomGuestSession - guest widget state held across the Python-Rust boundary
//!
//! The Python side keeps one session per open widget and forwards every UI
//! event to it. The session owns its set; nothing is shared between sessions.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::booking::{BookingRequest, SearchQuery, StayDates};
use crate::config::{AgePolicy, GuestWidget};

use super::{RoomGuestConfig, RoomGuestConfigSet};

fn room_to_dict<'py>(py: Python<'py>, room: &RoomGuestConfig) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("adults", room.adults)?;
    dict.set_item("children", room.children)?;
    dict.set_item("childrenAges", PyList::new(py, room.children_ages.iter())?)?;
    Ok(dict)
}

fn parse_widget(name: &str) -> PyResult<GuestWidget> {
    GuestWidget::from_name(name)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown guest widget: {}", name)))
}

/// Guest configuration of one open widget
#[pyclass]
pub struct RoomGuestSession {
    set: RoomGuestConfigSet,
    widget: GuestWidget,
    age_policy: AgePolicy,
}

impl RoomGuestSession {
    /// Wrap `set`; children added later get the policy's starting age
    pub fn from_set(set: RoomGuestConfigSet, widget: GuestWidget, age_policy: AgePolicy) -> Self {
        Self {
            set: set.with_age_policy(&age_policy),
            widget,
            age_policy,
        }
    }

    #[inline]
    pub fn rooms(&self) -> &RoomGuestConfigSet {
        &self.set
    }

    fn booking_request(&self, check_in: Option<&str>, check_out: Option<&str>) -> PyResult<BookingRequest> {
        let stay = StayDates::parse(check_in, check_out)?;
        Ok(BookingRequest::build(&stay, &self.set))
    }
}

#[pymethods]
impl RoomGuestSession {
    /// Open a widget seeded from search totals
    ///
    /// With no totals at all the widget's own starting rooms are used.
    #[new]
    #[pyo3(signature = (adults=None, children=None, rooms=None, children_ages=None, widget="availability"))]
    fn py_new(
        adults: Option<u32>,
        children: Option<u32>,
        rooms: Option<usize>,
        children_ages: Option<Vec<i32>>,
        widget: &str,
    ) -> PyResult<Self> {
        let widget = parse_widget(widget)?;
        let (limits, age_policy) = crate::with_config(|config| (config.limits, config.age_policy(widget)));
        let set = match (adults, children, rooms) {
            (None, None, None) => RoomGuestConfigSet::for_widget(widget, limits),
            _ => {
                let defaults = SearchQuery::default();
                RoomGuestConfigSet::initialize(
                    adults.unwrap_or(defaults.adults),
                    children.unwrap_or(defaults.children),
                    rooms.unwrap_or(defaults.rooms),
                    children_ages.as_deref().unwrap_or(&[]),
                    limits,
                )
            }
        };
        Ok(Self::from_set(set, widget, age_policy))
    }

    /// Open a widget seeded from URL query pairs
    #[staticmethod]
    #[pyo3(signature = (pairs, widget="availability"))]
    fn from_query(pairs: Vec<(String, String)>, widget: &str) -> PyResult<Self> {
        let widget = parse_widget(widget)?;
        let (limits, age_policy) = crate::with_config(|config| (config.limits, config.age_policy(widget)));
        let set = SearchQuery::from_pairs(pairs).room_guests(limits);
        Ok(Self::from_set(set, widget, age_policy))
    }

    // ------------------------------------------------------------------------
    // Getter Properties
    // ------------------------------------------------------------------------

    #[getter]
    fn room_count(&self) -> usize {
        self.set.len()
    }

    #[getter]
    fn total_adults(&self) -> u32 {
        self.set.rooms().iter().map(|room| room.adults).sum()
    }

    #[getter]
    fn total_children(&self) -> u32 {
        self.set.rooms().iter().map(|room| room.children).sum()
    }

    /// Label for the guest button, e.g. "2 adults · 1 room"
    #[getter]
    fn summary(&self) -> String {
        self.set.summary()
    }

    #[getter]
    fn can_add_room(&self) -> bool {
        self.set.can_add_room()
    }

    #[getter]
    fn can_remove_room(&self) -> bool {
        self.set.can_remove_room()
    }

    #[getter]
    fn widget(&self) -> &'static str {
        match self.widget {
            GuestWidget::Availability => "availability",
            GuestWidget::BookingDetails => "booking_details",
        }
    }

    // ------------------------------------------------------------------------
    // UI Events
    // ------------------------------------------------------------------------

    fn add_room(&mut self) -> bool {
        self.set.add_room()
    }

    fn remove_room(&mut self, index: usize) -> bool {
        self.set.remove_room(index)
    }

    fn set_room_count(&mut self, count: usize) -> bool {
        self.set.set_room_count(count)
    }

    fn set_room_adults(&mut self, index: usize, value: i64) -> bool {
        self.set.set_room_adults(index, value)
    }

    fn adjust_room_adults(&mut self, index: usize, delta: i64) -> bool {
        self.set.adjust_room_adults(index, delta)
    }

    fn set_room_children(&mut self, index: usize, value: i64) -> bool {
        self.set.set_room_children(index, value)
    }

    fn adjust_room_children(&mut self, index: usize, delta: i64) -> bool {
        self.set.adjust_room_children(index, delta)
    }

    fn set_child_age(&mut self, room_index: usize, child_index: usize, age: i32) -> bool {
        self.set.set_child_age(room_index, child_index, age)
    }

    // ------------------------------------------------------------------------
    // Derived Data
    // ------------------------------------------------------------------------

    /// Totals dict: {"totalAdults", "totalChildren", "allChildrenAges"}
    fn aggregate(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let totals = self.set.aggregate();
        let dict = PyDict::new(py);
        dict.set_item("totalAdults", totals.total_adults)?;
        dict.set_item("totalChildren", totals.total_children)?;
        dict.set_item("allChildrenAges", PyList::new(py, &totals.all_children_ages)?)?;
        Ok(dict.into())
    }

    /// Per-room dicts in room order
    fn get_rooms(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let list = PyList::empty(py);
        for room in self.set.rooms() {
            list.append(room_to_dict(py, room)?)?;
        }
        Ok(list.into())
    }

    /// Ages offered by this widget's age selector
    fn age_choices(&self) -> Vec<i32> {
        self.age_policy.choices()
    }

    /// `(room, child)` pairs whose age is still unset
    fn unset_ages(&self) -> Vec<(usize, usize)> {
        self.set.unset_ages(&self.age_policy)
    }

    /// Apply/confirm payload as JSON
    ///
    /// # Raises
    /// ValueError if a date is missing, malformed, or check-out is not after check-in
    #[pyo3(signature = (check_in, check_out))]
    fn build_booking(&self, check_in: Option<&str>, check_out: Option<&str>) -> PyResult<String> {
        Ok(self.booking_request(check_in, check_out)?.to_json()?)
    }

    /// URL query pairs for navigating to the hotel page
    #[pyo3(signature = (check_in, check_out))]
    fn booking_query(&self, check_in: Option<&str>, check_out: Option<&str>) -> PyResult<Vec<(String, String)>> {
        Ok(self.booking_request(check_in, check_out)?.to_query_pairs()?)
    }

    fn __repr__(&self) -> String {
        format!("RoomGuestSession({}, widget={})", self.set.summary(), self.widget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuestLimits;

    #[test]
    fn test_session_events() {
        let set = RoomGuestConfigSet::initialize(2, 0, 1, &[], GuestLimits::default());
        let mut session =
            RoomGuestSession::from_set(set, GuestWidget::BookingDetails, AgePolicy::with_unset_sentinel());

        assert!(session.add_room());
        assert!(session.adjust_room_children(1, 1));
        assert_eq!(session.unset_ages(), vec![(1, 0)]);
        assert!(session.set_child_age(1, 0, 4));
        assert!(session.unset_ages().is_empty());
        assert_eq!(session.total_adults(), 3);
        assert_eq!(session.total_children(), 1);
        assert_eq!(session.summary(), "3 adults · 1 child · 2 rooms");
        assert_eq!(session.widget(), "booking_details");
        assert_eq!(session.age_choices().first(), Some(&2));
    }

    #[test]
    fn test_booking_widget_new_child_prompts_for_age() {
        let set = RoomGuestConfigSet::for_widget(GuestWidget::BookingDetails, GuestLimits::default());
        let mut session =
            RoomGuestSession::from_set(set, GuestWidget::BookingDetails, AgePolicy::with_unset_sentinel());
        assert!(session.adjust_room_children(0, 1));
        assert_eq!(session.unset_ages(), vec![(0, 0)]);
        assert_eq!(session.rooms().aggregate().all_children_ages, vec![0]);
    }

    #[test]
    fn test_availability_widget_new_child_defaults_to_five() {
        let mut session = RoomGuestSession::from_set(
            RoomGuestConfigSet::default(),
            GuestWidget::Availability,
            AgePolicy::free_choice(),
        );
        assert!(session.set_room_children(0, 2));
        assert!(session.unset_ages().is_empty());
        assert_eq!(session.rooms().aggregate().all_children_ages, vec![5, 5]);
    }

    #[test]
    fn test_booking_request_validation() {
        let session = RoomGuestSession::from_set(
            RoomGuestConfigSet::default(),
            GuestWidget::Availability,
            AgePolicy::free_choice(),
        );
        assert!(session.booking_request(None, Some("2026-01-02")).is_err());

        let request = session.booking_request(Some("2026-01-01"), Some("2026-01-02")).unwrap();
        assert_eq!(request.adults, 1);
        assert_eq!(request.rooms, 1);
    }
}
