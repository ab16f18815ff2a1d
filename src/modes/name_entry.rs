use std::time::{Duration, Instant};

/// Bounded player name buffer for the high score screen
///
/// Keystrokes closer together than the debounce interval are dropped, so a
/// held key does not flood the buffer.
#[derive(Debug, Clone)]
pub struct NameEntry {
    name: String,
    max_len: usize,
    debounce: Duration,
    last_keystroke: Option<Instant>,
}

impl NameEntry {
    pub fn new(max_len: usize, debounce: Duration) -> Self {
        Self {
            name: String::with_capacity(max_len),
            max_len,
            debounce,
            last_keystroke: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.name.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_len
    }

    /// Append a character; returns whether it was accepted
    pub fn push(&mut self, c: char, now: Instant) -> bool {
        if self.is_full() || !self.ready(now) {
            return false;
        }

        self.name.push(c);
        self.last_keystroke = Some(now);
        true
    }

    /// Remove the last character; returns whether one was removed
    pub fn backspace(&mut self, now: Instant) -> bool {
        if self.is_empty() || !self.ready(now) {
            return false;
        }

        self.name.pop();
        self.last_keystroke = Some(now);
        true
    }

    fn ready(&self, now: Instant) -> bool {
        match self.last_keystroke {
            Some(last) => now.saturating_duration_since(last) >= self.debounce,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(100);

    /// Types `text` with keystrokes spaced just past the debounce interval
    fn type_text(entry: &mut NameEntry, text: &str, start: Instant) -> Instant {
        let mut now = start;
        for c in text.chars() {
            now += DEBOUNCE;
            entry.push(c, now);
        }
        now
    }

    #[test]
    fn test_typing_a_name() {
        let mut entry = NameEntry::new(19, DEBOUNCE);
        type_text(&mut entry, "ada", Instant::now());
        assert_eq!(entry.as_str(), "ada");
        assert_eq!(entry.len(), 3);
    }

    #[test]
    fn test_name_is_capped() {
        let mut entry = NameEntry::new(19, DEBOUNCE);
        let now = type_text(&mut entry, "abcdefghijklmnopqrstuvwxyz", Instant::now());

        assert_eq!(entry.as_str(), "abcdefghijklmnopqrs");
        assert!(entry.is_full());
        assert!(!entry.push('z', now + DEBOUNCE * 2));
    }

    #[test]
    fn test_fast_keystrokes_are_dropped() {
        let mut entry = NameEntry::new(19, DEBOUNCE);
        let start = Instant::now();

        assert!(entry.push('a', start));
        assert!(!entry.push('b', start + Duration::from_millis(40)));
        assert!(!entry.backspace(start + Duration::from_millis(99)));
        assert!(entry.push('c', start + Duration::from_millis(100)));
        assert_eq!(entry.as_str(), "ac");
    }

    #[test]
    fn test_backspace() {
        let mut entry = NameEntry::new(19, DEBOUNCE);
        let now = type_text(&mut entry, "bob", Instant::now());

        assert!(entry.backspace(now + DEBOUNCE));
        assert_eq!(entry.as_str(), "bo");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut entry = NameEntry::new(19, DEBOUNCE);
        assert!(!entry.backspace(Instant::now()));
        assert!(entry.is_empty());
    }
}
