//! Per-row like/save/follow state
//!
//! Lookups are deferred until a row scrolls into view and happen at most once
//! per row. Toggles flip the flag only after the server confirms, and a row
//! never has two requests in flight.

/// Lazy lookup state of one row flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFetch {
    Unknown,
    Fetching,
    Resolved(bool),
}

/// Intersection settings for lazy lookups
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub trigger_once: bool,
}

/// Rows start fetching 200px before they become visible
pub const ROW_VIEWPORT: ViewportConfig = ViewportConfig {
    threshold: 0.1,
    root_margin: "200px 0px",
    trigger_once: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFlag {
    fetch: RowFetch,
    value: bool,
    count: u64,
    in_flight: bool,
}

impl RowFlag {
    /// Flag whose initial value needs a lookup unless the server already said yes
    pub fn lazy(default: bool, count: u64) -> Self {
        Self {
            fetch: if default { RowFetch::Resolved(true) } else { RowFetch::Unknown },
            value: default,
            count,
            in_flight: false,
        }
    }

    /// Flag whose value is already authoritative (e.g. `isFollow`)
    pub fn known(value: bool) -> Self {
        Self {
            fetch: RowFetch::Resolved(value),
            value,
            count: 0,
            in_flight: false,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn fetch_state(&self) -> RowFetch {
        self.fetch
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight || self.fetch == RowFetch::Fetching
    }

    /// Row entered the viewport. Returns true when a lookup should start.
    pub fn on_visible(&mut self) -> bool {
        if self.fetch == RowFetch::Unknown {
            self.fetch = RowFetch::Fetching;
            true
        } else {
            false
        }
    }

    /// Lookup finished. A failure resolves to the negative default.
    pub fn resolve_fetch<E>(&mut self, result: Result<bool, E>) {
        if self.fetch != RowFetch::Fetching {
            return;
        }
        let value = result.unwrap_or(false);
        self.fetch = RowFetch::Resolved(value);
        self.value = value;
    }

    /// Start a toggle. Returns the target value, or None if refused.
    pub fn begin_toggle(&mut self) -> Option<bool> {
        if self.is_busy() {
            return None;
        }
        self.in_flight = true;
        Some(!self.value)
    }

    /// Finish a toggle started with [`begin_toggle`](Self::begin_toggle)
    pub fn finish_toggle<E>(&mut self, target: bool, result: Result<(), E>) -> Result<(), E> {
        self.in_flight = false;
        result?;
        if self.value != target {
            self.count = if target {
                self.count.saturating_add(1)
            } else {
                self.count.saturating_sub(1)
            };
        }
        self.value = target;
        self.fetch = RowFetch::Resolved(target);
        Ok(())
    }
}
