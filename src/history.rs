/// Snapshot limit per canvas, for both the undo and redo direction.
pub const HISTORY_LIMIT: usize = 50;

/// Undo/redo stacks holding full state snapshots. Both directions are
/// bounded; pushing past the cap silently drops the oldest entry.
#[derive(Clone)]
pub struct History<T: Clone> {
    past: Vec<T>,
    future: Vec<T>,
    max_size: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl<T: Clone> History<T> {
    pub fn new(max_size: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_size,
        }
    }

    /// Record a new state. Clears the redo stack: only a fresh mutation
    /// invalidates the redo line, never undo/redo themselves.
    pub fn push(&mut self, state: T) {
        self.future.clear();
        self.past.push(state);

        while self.past.len() > self.max_size {
            self.past.remove(0);
        }
    }

    /// Undo: move current to future, return the previous state.
    pub fn undo(&mut self, current: T) -> Option<T> {
        self.past.pop().map(|previous| {
            self.future.push(current);
            while self.future.len() > self.max_size {
                self.future.remove(0);
            }
            previous
        })
    }

    /// Redo: move current to past, return the next state.
    pub fn redo(&mut self, current: T) -> Option<T> {
        self.future.pop().map(|next| {
            self.past.push(current);
            while self.past.len() > self.max_size {
                self.past.remove(0);
            }
            next
        })
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop both stacks entirely (canvas reset).
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history: History<i32> = History::new(100);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn push_enables_undo() {
        let mut history: History<i32> = History::new(100);
        history.push(1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_returns_previous_state() {
        let mut history: History<i32> = History::new(100);
        history.push(1);
        history.push(2);

        let result = history.undo(3);
        assert_eq!(result, Some(2));
        assert!(history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_returns_next_state() {
        // Use distinct values to prove correctness (not coincidental)
        let mut history: History<i32> = History::new(100);
        history.push(10);
        history.push(20);

        let undone = history.undo(30);
        assert_eq!(undone, Some(20));

        // Current is now 20, redo should return 30 (what we passed to undo)
        let redone = history.redo(20);
        assert_eq!(redone, Some(30));

        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn push_clears_redo_stack() {
        let mut history: History<i32> = History::new(100);
        history.push(1);
        let _ = history.undo(2);
        assert!(history.can_redo());

        history.push(3);
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_size() {
        let mut history: History<i32> = History::new(3);
        history.push(1);
        history.push(2);
        history.push(3);
        history.push(4);

        // Only 3 items retained, oldest (1) dropped
        assert_eq!(history.undo(5), Some(4));
        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), None);
    }

    #[test]
    fn future_stack_is_bounded_too() {
        let mut history: History<i32> = History::new(2);
        history.push(1);
        history.push(2);

        history.undo(3); // future=[3]
        history.undo(2); // future=[3,2]
        assert_eq!(history.undo(1), None);

        // Both redos still available at cap
        assert_eq!(history.redo(1), Some(2));
        assert_eq!(history.redo(2), Some(3));
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_on_empty_returns_none() {
        let mut history: History<i32> = History::new(100);
        assert_eq!(history.undo(1), None);
    }

    #[test]
    fn redo_on_empty_returns_none() {
        let mut history: History<i32> = History::new(100);
        assert_eq!(history.redo(1), None);
    }

    #[test]
    fn chain_undo_redo() {
        let mut history: History<String> = History::new(100);
        history.push("a".to_string());
        history.push("b".to_string());
        history.push("c".to_string());

        let r1 = history.undo("d".to_string());
        assert_eq!(r1, Some("c".to_string()));

        let r2 = history.undo("c".to_string());
        assert_eq!(r2, Some("b".to_string()));

        let r3 = history.redo("b".to_string());
        assert_eq!(r3, Some("c".to_string()));

        let r4 = history.redo("c".to_string());
        assert_eq!(r4, Some("d".to_string()));

        assert!(!history.can_redo());
    }

    #[test]
    fn undo_all_then_redo_all() {
        let mut history: History<i32> = History::new(100);
        history.push(1);
        history.push(2);

        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), Some(1));
        assert_eq!(history.undo(1), None);

        assert_eq!(history.redo(1), Some(2));
        assert_eq!(history.redo(2), Some(3));
        assert_eq!(history.redo(3), None);
    }

    #[test]
    fn overflow_never_underflows_on_repeated_undo() {
        // More mutations than the cap, then undo past the cap: oldest
        // entries are silently gone, undo just returns None.
        let mut history: History<i32> = History::default();
        for i in 0..60 {
            history.push(i);
        }
        let mut current = 60;
        let mut undone = 0;
        for _ in 0..51 {
            match history.undo(current) {
                Some(prev) => {
                    current = prev;
                    undone += 1;
                }
                None => break,
            }
        }
        assert_eq!(undone, HISTORY_LIMIT);
        assert_eq!(current, 10);
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut history: History<i32> = History::new(100);
        history.push(1);
        history.push(2);
        history.undo(3);
        assert!(history.can_undo());
        assert!(history.can_redo());

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn max_size_zero_never_stores_history() {
        let mut history: History<i32> = History::new(0);
        history.push(1);
        history.push(2);

        assert!(!history.can_undo());
        assert_eq!(history.undo(3), None);
    }

    #[test]
    fn push_after_partial_undo_clears_only_redo() {
        let mut history: History<i32> = History::new(100);
        history.push(1);
        history.push(2);
        history.push(3);

        history.undo(4); // past=[1,2], future=[4]
        history.push(5); // past=[1,2,5], future=[]

        assert!(!history.can_redo());
        assert_eq!(history.undo(6), Some(5));
        assert_eq!(history.undo(5), Some(2));
        assert_eq!(history.undo(2), Some(1));
        assert_eq!(history.undo(1), None);
    }
}
