//! Caller-owned deprecation logger
//!
//! One `WarnOnce` is created per configuration load and passed to every rule factory,
//! so repeated deprecation notices for the same option are logged a single time.

use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct WarnOnce {
    emitted: RefCell<HashSet<String>>,
}

impl WarnOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `message` at warn level unless it was already logged. Returns true if logged.
    pub fn warn(&self, message: impl Into<String>) -> bool {
        let message = message.into();
        let mut emitted = self.emitted.borrow_mut();
        if emitted.contains(&message) {
            return false;
        }
        log::warn!("{message}");
        emitted.insert(message);
        true
    }

    /// Messages logged so far, sorted
    pub fn emitted(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.emitted.borrow().iter().cloned().collect();
        messages.sort();
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_message_is_logged_once() {
        let warn_once = WarnOnce::new();
        assert!(warn_once.warn("option `a` is deprecated"));
        assert!(!warn_once.warn("option `a` is deprecated"));
        assert!(warn_once.warn("option `b` is deprecated"));
        assert_eq!(
            warn_once.emitted(),
            vec!["option `a` is deprecated".to_string(), "option `b` is deprecated".to_string()]
        );
    }

    #[test]
    fn test_separate_loggers_do_not_share_state() {
        let first = WarnOnce::new();
        let second = WarnOnce::new();
        assert!(first.warn("same"));
        assert!(second.warn("same"));
    }
}
