use chrono::{DateTime, Duration, Utc};

/// One-hour query window `[start, start + 1h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + Duration::hours(1),
        }
    }
}

/// Windows starting at every hour step from `first` up to and including `last`.
#[derive(Debug, Clone)]
pub struct HourlyWindows {
    next: Option<DateTime<Utc>>,
    last: DateTime<Utc>,
}

impl HourlyWindows {
    #[must_use]
    pub fn new(first: DateTime<Utc>, last: DateTime<Utc>) -> Self {
        Self {
            next: Some(first),
            last,
        }
    }
}

impl Iterator for HourlyWindows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let current = self.next.filter(|start| *start <= self.last)?;
        self.next = current.checked_add_signed(Duration::hours(1));
        Some(Window::starting_at(current))
    }
}
