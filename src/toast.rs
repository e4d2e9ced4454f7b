//! Transient toast notifications.

use std::time::{Duration, Instant};

/// Maximum toasts kept on screen at once.
pub const MAX_TOASTS: usize = 5;

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single notification.
#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }

    /// Fraction of lifetime left, 1.0 when fresh.
    pub fn remaining(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.created_at).as_secs_f32();
        (1.0 - elapsed / self.ttl.as_secs_f32().max(f32::EPSILON)).clamp(0.0, 1.0)
    }
}

/// Queue of active toasts.
#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
    ttl: Duration,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    /// Add a toast created now.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.push_at(level, message, Instant::now())
    }

    /// Add a toast with an explicit creation time.
    pub fn push_at(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push(Toast {
            id,
            level,
            message: message.into(),
            created_at: now,
            ttl: self.ttl,
        });

        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }

        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Success, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Error, message)
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| !t.is_expired(now));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut toasts = Toasts::new(Duration::from_secs(5));
        let a = toasts.success("saved");
        let b = toasts.error("failed");

        assert_eq!(toasts.len(), 2);
        assert_ne!(a, b);

        toasts.dismiss(a);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().message, "failed");
    }

    #[test]
    fn test_prune_expired() {
        let mut toasts = Toasts::new(Duration::from_secs(5));
        let start = Instant::now();
        toasts.push_at(ToastLevel::Info, "old", start);
        toasts.push_at(ToastLevel::Info, "new", start + Duration::from_secs(3));

        toasts.prune(start + Duration::from_secs(4));
        assert_eq!(toasts.len(), 2);

        toasts.prune(start + Duration::from_secs(6));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().message, "new");

        toasts.prune(start + Duration::from_secs(9));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_oldest_dropped_beyond_max() {
        let mut toasts = Toasts::new(Duration::from_secs(5));
        for i in 0..(MAX_TOASTS + 2) {
            toasts.info(format!("toast {i}"));
        }

        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.iter().next().unwrap().message, "toast 2");
    }

    #[test]
    fn test_remaining_fraction() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        let start = Instant::now();
        toasts.push_at(ToastLevel::Warning, "half", start);

        let toast = toasts.iter().next().unwrap();
        assert!((toast.remaining(start + Duration::from_secs(2)) - 0.5).abs() < 0.01);
        assert_eq!(toast.remaining(start + Duration::from_secs(10)), 0.0);
    }
}
