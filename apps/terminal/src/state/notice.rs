//! # Banners
//!
//! Transient messages raised by handlers. Each banner remembers when it was
//! raised; views only show banners younger than [`BANNER_TTL`], so they
//! dismiss themselves without a timer task.

use std::time::{Duration, Instant};

/// How long a banner stays visible.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= BANNER_TTL
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.items.push(Notice {
            kind,
            text: text.into(),
            raised_at: Instant::now(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text);
    }

    /// Banners still visible at `now`, oldest first.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.items.iter().filter(move |n| !n.is_expired(now))
    }

    /// Drops expired banners.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banners_expire_after_ttl() {
        let mut notices = Notices::default();
        notices.success("Product deleted successfully");
        let raised = notices.latest().unwrap().raised_at;

        assert_eq!(notices.active(raised).count(), 1);
        assert_eq!(notices.active(raised + Duration::from_millis(2999)).count(), 1);
        assert_eq!(notices.active(raised + BANNER_TTL).count(), 0);

        notices.prune(raised + BANNER_TTL);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_kinds() {
        let mut notices = Notices::default();
        notices.warning("Cart is empty!");
        notices.error("Failed to delete product");
        assert_eq!(notices.latest().map(|n| n.kind), Some(NoticeKind::Error));
    }
}
