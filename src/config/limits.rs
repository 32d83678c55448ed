//! Guest count limits for a room configuration

/// Bounds applied to every room configuration set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestLimits {
    /// Maximum number of rooms in one request
    pub max_rooms: usize,
    /// Minimum adults per room
    pub min_adults: u32,
    /// Maximum adults per room
    pub max_adults: u32,
    /// Maximum children per room
    pub max_children: u32,
    /// Age given to a new child slot unless the age policy leaves it unset
    pub default_child_age: i32,
}

impl Default for GuestLimits {
    fn default() -> Self {
        Self {
            max_rooms: 5,
            min_adults: 1,
            max_adults: 10,
            max_children: 5,
            default_child_age: 5,
        }
    }
}

impl GuestLimits {
    /// Clamp a requested adult count into `[min_adults, max_adults]`
    #[inline]
    pub fn clamp_adults(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min_adults), i64::from(self.max_adults)) as u32
    }

    /// Clamp a requested child count into `[0, max_children]`
    #[inline]
    pub fn clamp_children(&self, value: i64) -> u32 {
        value.clamp(0, i64::from(self.max_children)) as u32
    }

    /// Clamp a requested room count into `[1, max_rooms]`
    #[inline]
    pub fn clamp_rooms(&self, value: usize) -> usize {
        value.clamp(1, self.max_rooms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = GuestLimits::default();
        assert_eq!(limits.max_rooms, 5);
        assert_eq!(limits.max_adults, 10);
        assert_eq!(limits.max_children, 5);
        assert_eq!(limits.default_child_age, 5);
    }

    #[test]
    fn test_clamping() {
        let limits = GuestLimits::default();
        assert_eq!(limits.clamp_adults(0), 1);
        assert_eq!(limits.clamp_adults(-3), 1);
        assert_eq!(limits.clamp_adults(11), 10);
        assert_eq!(limits.clamp_children(-1), 0);
        assert_eq!(limits.clamp_children(6), 5);
        assert_eq!(limits.clamp_rooms(0), 1);
        assert_eq!(limits.clamp_rooms(9), 5);
    }
}
