//! Branch-item selection heuristics.
//!
//! A small, closed set of strategies, represented as a plain enum rather
//! than a trait object — a `match` over dynamic dispatch fits this kind of
//! small fixed alternative, and the C reference
//! (`xcc_choose_i_naively`/`xcc_choose_i_mrv`) is itself just two free
//! functions selected by a function pointer.

use crate::arena::{Arena, Link, ROOT};

/// Strategy used by [`crate::driver::Driver`] to pick the next item to branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Always choose the leftmost active primary item (`rlink(0)`).
    Naive,
    /// Minimum-remaining-values: choose the active primary item with the
    /// fewest remaining options, breaking ties by first occurrence, and
    /// returning immediately on encountering a dead column (`len == 0`).
    #[default]
    Mrv,
}

impl Heuristic {
    /// Chooses the next item to branch on. Panics if there is no active
    /// primary item; callers (the `Driver`) only call this after confirming
    /// `rlink(0) != 0`.
    pub fn choose(&self, arena: &Arena) -> Link {
        match self {
            Heuristic::Naive => {
                let i = arena.rlink(ROOT);
                debug_assert_ne!(i, ROOT, "choose() called with no active primary items");
                i
            }
            Heuristic::Mrv => {
                let mut best = arena.rlink(ROOT);
                debug_assert_ne!(best, ROOT, "choose() called with no active primary items");
                let mut best_len = arena.len(best);
                for item in arena.active_primary_items() {
                    let l = arena.len(item);
                    if l < best_len {
                        best_len = l;
                        best = item;
                    }
                    if l == 0 {
                        return item;
                    }
                }
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    #[test]
    fn naive_picks_leftmost() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let arena = b.into_arena();
        assert_eq!(Heuristic::Naive.choose(&arena), 1);
    }

    #[test]
    fn mrv_short_circuits_on_zero() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        // "b" (index 2) gets no options: len(b) == 0.
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let arena = b.into_arena();
        assert_eq!(Heuristic::Mrv.choose(&arena), 2);
    }

    #[test]
    fn mrv_picks_minimum_len() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        for opt in [vec![1], vec![1, 2], vec![1]] {
            b.begin_option().unwrap();
            for item in opt {
                b.add_item(item).unwrap();
            }
            b.end_option().unwrap();
        }
        b.end_options().unwrap();
        let arena = b.into_arena();
        // len(a) == 3, len(b) == 1.
        assert_eq!(Heuristic::Mrv.choose(&arena), 2);
    }
}
