//! Chart navigation state machine
//!
//! Overview versus a single drilled-down domain. The tag is explicit: whether
//! the chart is at overview is never inferred by comparing a node reference
//! against the current taxonomy, which breaks across rebuilds.

/// Current navigation scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Overview,
    Domain(String),
}

impl ViewState {
    pub fn is_overview(&self) -> bool {
        matches!(self, ViewState::Overview)
    }

    pub fn domain_name(&self) -> Option<&str> {
        match self {
            ViewState::Overview => None,
            ViewState::Domain(name) => Some(name),
        }
    }
}

/// Drill-down navigation with back history
///
/// The hierarchy is two levels deep (root -> domain), so the history only
/// ever holds `Overview` and previously drilled domains.
#[derive(Debug, Clone)]
pub struct ChartView {
    current: ViewState,
    history: Vec<ViewState>,
}

impl ChartView {
    pub fn new() -> Self {
        Self {
            current: ViewState::Overview,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &ViewState {
        &self.current
    }

    pub fn is_overview(&self) -> bool {
        self.current.is_overview()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Push the current state and focus the named domain
    ///
    /// Also valid while already drilled: the new domain replaces the old one
    /// as current and the old becomes the back target.
    pub fn drill_down(&mut self, domain_name: impl Into<String>) {
        let next = ViewState::Domain(domain_name.into());
        let prev = std::mem::replace(&mut self.current, next);
        self.history.push(prev);
    }

    /// Pop the most recent history entry; no-op when the history is empty
    pub fn go_back(&mut self) {
        if let Some(prev) = self.history.pop() {
            self.current = prev;
        }
    }

    /// Jump to overview and drop all history unconditionally
    pub fn reset_to_overview(&mut self) {
        self.current = ViewState::Overview;
        self.history.clear();
    }
}

impl Default for ChartView {
    fn default() -> Self {
        Self::new()
    }
}
