//! Notification engine
//!
//! Owns the kiosk's single message slot. Transient success/error toasts
//! preempt each other and auto-expire; between toasts the slot falls back to
//! the ambient status message derived from the equipment status cache
//! (overdue and away-from-home lists).

use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::models::Equipment;
use crate::services::status::StatusCache;

/// Label substituted when a serial has no matching equipment entry
pub const UNKNOWN_EQUIPMENT: &str = "Unknown Equipment";

/// Visual category of a transient toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// What the display slot currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationView {
    pub text: String,
    /// `Some` while a toast is showing, `None` for ambient text
    pub kind: Option<ToastKind>,
    pub visible: bool,
}

/// Single-slot toast/ambient arbiter.
///
/// States: Idle (ambient or empty) and Transient (toast with pending
/// expiry). At most one expiry deadline is active; a new `notify` replaces
/// both the message and the deadline. Expiry is deadline-based: the driver
/// calls [`NotificationEngine::poll`] with the current instant.
#[derive(Debug)]
pub struct NotificationEngine {
    view: NotificationView,
    /// Freshest composed ambient message; rendered on each Idle entry
    ambient: Option<String>,
    expires_at: Option<Instant>,
    transient_active: bool,
    default_delay: Duration,
}

impl NotificationEngine {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            view: NotificationView::default(),
            ambient: None,
            expires_at: None,
            transient_active: false,
            default_delay,
        }
    }

    pub fn view(&self) -> &NotificationView {
        &self.view
    }

    pub fn has_pending_expiry(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Show a transient toast, preempting any active one.
    ///
    /// A zero delay shows the toast and immediately resolves back to the
    /// ambient message, leaving no deadline pending.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        delay: Duration,
        now: Instant,
    ) {
        // Cancel any pending expiry; last caller wins, nothing queues
        self.expires_at = None;
        self.transient_active = true;
        self.view = NotificationView {
            text: message.into(),
            kind: Some(kind),
            visible: true,
        };
        if delay > Duration::ZERO {
            self.expires_at = Some(now + delay);
        } else {
            self.expire();
        }
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.notify(message, ToastKind::Success, self.default_delay, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.notify(message, ToastKind::Error, self.default_delay, now);
    }

    /// Fire the expiry transition if its deadline has passed.
    /// Returns true when the view changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.expires_at = None;
                self.expire();
                true
            }
            _ => false,
        }
    }

    /// Record the latest composed ambient message.
    ///
    /// Rendered immediately while Idle; while a toast is active the render
    /// is deferred until the next Idle entry so the toast is never visually
    /// interrupted.
    pub fn update_ambient(&mut self, ambient: Option<String>) {
        self.ambient = ambient;
        if !self.transient_active {
            self.render_ambient();
        }
    }

    fn expire(&mut self) {
        self.transient_active = false;
        self.render_ambient();
    }

    fn render_ambient(&mut self) {
        self.view = match &self.ambient {
            Some(text) => NotificationView {
                text: text.clone(),
                kind: None,
                visible: true,
            },
            None => NotificationView::default(),
        };
    }
}

/// Compose the ambient status message from the cache and the equipment map.
///
/// Overdue entries (positive balance) come first, then equipment whose last
/// known station differs case-insensitively from its home station. Returns
/// `None` when both lists are empty.
pub fn compose_ambient(
    cache: &StatusCache,
    equipment: &IndexMap<String, Equipment>,
) -> Option<String> {
    let display_name = |serial: &str| -> String {
        match equipment.get(serial) {
            Some(item) if !item.name.is_empty() => item.name.clone(),
            _ => UNKNOWN_EQUIPMENT.to_string(),
        }
    };

    let overdue: Vec<String> = cache
        .overdue()
        .map(|serial| format!("{serial} ({})", display_name(serial)))
        .collect();

    let away: Vec<String> = cache
        .last_stations()
        .filter(|(serial, last)| {
            equipment.get(*serial).is_some_and(|item| {
                !item.home_station.is_empty()
                    && item.home_station.to_lowercase() != last.to_lowercase()
            })
        })
        .map(|(serial, _)| format!("{serial} ({})", display_name(serial)))
        .collect();

    let mut sections = Vec::new();
    if !overdue.is_empty() {
        sections.push(format!("Overdue Equipment: {}", overdue.join(", ")));
    }
    if !away.is_empty() {
        sections.push(format!("Equipment Away From Home: {}", away.join(", ")));
    }
    if sections.is_empty() {
        None
    } else {
        Some(sections.join(" | "))
    }
}
