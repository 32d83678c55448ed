//! Aggregated guest totals and the guest summary label

use serde::Serialize;

/// Totals forwarded to the search or booking request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestTotals {
    pub total_adults: u32,
    pub total_children: u32,
    /// Ages of every child, rooms in order
    pub all_children_ages: Vec<i32>,
}

impl GuestTotals {
    #[inline]
    pub fn total_guests(&self) -> u32 {
        self.total_adults.saturating_add(self.total_children)
    }
}

#[inline]
fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Build `"<N> adult[s] · <M> child[ren] · <R> room[s]"`
///
/// The adult and child clauses are left out when their count is zero; the
/// room clause is always present.
pub fn format_summary(adults: u32, children: u32, rooms: usize) -> String {
    let mut parts = Vec::with_capacity(3);
    if adults > 0 {
        parts.push(plural(adults as usize, "adult", "adults"));
    }
    if children > 0 {
        parts.push(plural(children as usize, "child", "children"));
    }
    parts.push(plural(rooms, "room", "rooms"));
    parts.join(" · ")
}
