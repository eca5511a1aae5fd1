/// Maximum number of remembered command lines; the oldest is evicted.
pub const RECALL_CAP: usize = 50;

/// Bounded, deduplicated, most-recent-first list of previously entered raw
/// command strings, with a cursor for up/down traversal. A cursor of `None`
/// means "not navigating" (the original's `-1`).
#[derive(Debug, Clone, Default)]
pub struct RecallBuffer {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl RecallBuffer {
    /// Record a committed command. Re-committing an existing string moves it
    /// to the front without growing the buffer; the cursor resets.
    pub fn commit(&mut self, raw: &str) {
        if raw.trim().is_empty() {
            return;
        }
        self.entries.retain(|entry| entry != raw);
        self.entries.insert(0, raw.to_string());
        self.entries.truncate(RECALL_CAP);
        self.cursor = None;
    }

    /// One step toward older entries, clamped at the oldest. `None` when the
    /// buffer is empty (the input should be left alone).
    pub fn navigate_up(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(index) => (index + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// One step toward newer entries. Past the newest the cursor leaves
    /// navigation and `None` is returned (the input should become empty).
    pub fn navigate_down(&mut self) -> Option<&str> {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                None
            }
            Some(index) => {
                self.cursor = Some(index - 1);
                self.entries.get(index - 1).map(String::as_str)
            }
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn commit_dedupes_by_moving_to_front() {
        let mut buf = RecallBuffer::default();
        buf.commit("a");
        buf.commit("b");
        buf.commit("a");
        assert_eq!(buf.entries(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn commit_ignores_blank_lines() {
        let mut buf = RecallBuffer::default();
        buf.commit("   ");
        buf.commit("");
        assert!(buf.is_empty());
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut buf = RecallBuffer::default();
        for i in 0..RECALL_CAP + 10 {
            buf.commit(&format!("cmd-{i}"));
        }
        assert_eq!(buf.len(), RECALL_CAP);
        assert_eq!(buf.entries()[0], format!("cmd-{}", RECALL_CAP + 9));
        assert!(!buf.entries().contains(&"cmd-0".to_string()));
    }

    #[test]
    fn up_then_down_traversal_matches_the_original() {
        let mut buf = RecallBuffer::default();
        for cmd in ["a", "b", "c"] {
            buf.commit(cmd);
        }
        assert_eq!(buf.navigate_up(), Some("c"));
        assert_eq!(buf.navigate_up(), Some("b"));
        assert_eq!(buf.navigate_up(), Some("a"));
        // Clamped at the oldest.
        assert_eq!(buf.navigate_up(), Some("a"));
        assert_eq!(buf.navigate_down(), Some("b"));
        assert_eq!(buf.navigate_down(), Some("c"));
        // Past the newest: back to "not navigating", input clears.
        assert_eq!(buf.navigate_down(), None);
        assert_eq!(buf.navigate_down(), None);
    }

    #[test]
    fn up_on_empty_buffer_stays_out_of_navigation() {
        let mut buf = RecallBuffer::default();
        assert_eq!(buf.navigate_up(), None);
        buf.commit("a");
        assert_eq!(buf.navigate_up(), Some("a"));
    }

    #[test]
    fn commit_resets_an_active_cursor() {
        let mut buf = RecallBuffer::default();
        buf.commit("a");
        buf.commit("b");
        assert_eq!(buf.navigate_up(), Some("b"));
        buf.commit("c");
        assert_eq!(buf.navigate_up(), Some("c"));
    }

    proptest! {
        #[test]
        fn bounded_and_duplicate_free(cmds in prop::collection::vec("[a-z]{1,6}", 0..200)) {
            let mut buf = RecallBuffer::default();
            for cmd in &cmds {
                buf.commit(cmd);
            }
            prop_assert!(buf.len() <= RECALL_CAP);
            let mut seen = HashSet::new();
            for entry in buf.entries() {
                prop_assert!(seen.insert(entry.clone()));
            }
        }

        #[test]
        fn recommit_never_grows_the_buffer(cmds in prop::collection::vec("[a-z]{1,4}", 1..50)) {
            let mut buf = RecallBuffer::default();
            for cmd in &cmds {
                buf.commit(cmd);
            }
            let before = buf.len();
            buf.commit(&cmds[0]);
            prop_assert_eq!(buf.len(), before);
            prop_assert_eq!(&buf.entries()[0], &cmds[0]);
        }
    }
}
