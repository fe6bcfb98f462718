//! The resumable search driver: Knuth's Algorithm C, states C1-C8, kept as
//! explicit fields rather than a recursive call stack so one `next_solution`
//! call can return after finding a single solution and a later call can
//! resume the search exactly where it left off.
//!
//! State transitions are pinned to `examples/original_source/src/algorithm_c.c`'s
//! `compute_next_result`; the split into `Stage::Enter`/`Stage::Retry` here
//! mirrors an `enum Stage` driving an `Iterator` impl the same way.

use log::{debug, trace};

use crate::arena::{Arena, Link, ROOT};
use crate::error::SolveError;
use crate::heuristic::Heuristic;
use crate::ops::{commit, cover, uncommit, uncover};
use crate::solution::Solution;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    /// C2/C3: about to enter the level at `self.l`, choosing a fresh item.
    Enter,
    /// C5/C6/C7: a level just finished (by producing a solution or by its
    /// own deeper levels running out); about to try the next row in the
    /// current level's column, or give up on the level entirely.
    Retry,
    /// Search space exhausted; every further call returns `Ok(None)`.
    Done,
}

/// Drives an Algorithm C search over an [`Arena`] built by [`crate::builder::Builder`].
/// Also implements [`Iterator`], yielding one [`Solution`] per item.
pub struct Driver {
    arena: Arena,
    heuristic: Heuristic,
    stage: Stage,
    l: usize,
    /// `items[k]` is the item branched on at level `k`.
    items: Vec<Link>,
    /// `x[k]` is the option row currently committed to at level `k`; equal
    /// to `items[k]` itself when no row has been found for that item.
    x: Vec<Link>,
    checked_initial: bool,
}

impl Driver {
    pub(crate) fn new(arena: Arena, heuristic: Heuristic) -> Self {
        Driver {
            arena,
            heuristic,
            stage: Stage::Enter,
            l: 0,
            items: Vec::new(),
            x: Vec::new(),
            checked_initial: false,
        }
    }

    /// The underlying arena, for callers that want to inspect item names,
    /// counts, or column lengths without running a search.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the underlying arena. Exposed so callers can build
    /// search variants on top of this one directly against the primitives
    /// in [`crate::ops`] (e.g. [`crate::ops::TweakLog`]), which the default
    /// search here does not call (see DESIGN.md).
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Runs the search forward until it produces another solution, or
    /// returns `Ok(None)` once every possibility has been exhausted. Returns
    /// `Err` exactly once, on the very first call, if some primary or
    /// secondary item never occurs in any option (C1's empty-column check).
    pub fn next_solution(&mut self) -> Result<Option<Solution>, SolveError> {
        if !self.checked_initial {
            self.checked_initial = true;
            for item in self.arena.active_primary_items() {
                if self.arena.is_empty_column(item) {
                    return Err(SolveError::ItemNeverOccurs {
                        item: self.item_label(item),
                    });
                }
            }
        }

        loop {
            match self.stage {
                Stage::Done => return Ok(None),
                Stage::Enter => {
                    // C2: enter level l.
                    trace!("C2: enter level {}", self.l);
                    if self.arena.rlink(ROOT) == ROOT {
                        self.stage = Stage::Retry;
                        let solution = self.extract_solution();
                        debug!("solution found at level {}: {:?}", self.l, solution.option_indices());
                        return Ok(Some(solution));
                    }
                    // C3: choose an item, cover it, commit to its first row.
                    let i = self.heuristic.choose(&self.arena);
                    trace!("C3: cover item {}", self.item_label(i));
                    cover(&mut self.arena, i);
                    self.items.push(i);
                    self.x.push(self.arena.dlink(i));
                    self.l += 1;
                    self.try_row();
                }
                Stage::Retry => self.retry_row(),
            }
        }
    }

    fn item_label(&self, item: Link) -> String {
        self.arena
            .name(item)
            .map(str::to_string)
            .unwrap_or_else(|| item.to_string())
    }

    /// C4: if the level's current row is the sentinel (column exhausted
    /// with no row picked), fail the level; otherwise commit to every other
    /// cell in the row and stay in `Enter` to descend.
    fn try_row(&mut self) {
        let lvl = self.l - 1;
        let i = self.items[lvl];
        let xl = self.x[lvl];
        if xl == i {
            trace!("C4: column {} exhausted", self.item_label(i));
            self.stage = Stage::Retry;
            return;
        }
        let mut p = xl + 1;
        while p != xl {
            let j = self.arena.top(p);
            if j <= 0 {
                p = self.arena.ulink(p);
            } else {
                commit(&mut self.arena, p, j as Link);
                p += 1;
            }
        }
        self.stage = Stage::Enter;
    }

    /// C5/C6/C7: undo the commits made for the row just abandoned at the
    /// deepest level, then either try the next row in the same column or,
    /// if none remain, uncover the item and retry the level above.
    fn retry_row(&mut self) {
        if self.l == 0 {
            self.stage = Stage::Done;
            return;
        }
        let lvl = self.l - 1;
        let i = self.items[lvl];
        let xl = self.x[lvl];
        if xl != i {
            let mut p = xl - 1;
            while p != xl {
                let j = self.arena.top(p);
                if j <= 0 {
                    p = self.arena.dlink(p);
                } else {
                    uncommit(&mut self.arena, p, j as Link);
                    p -= 1;
                }
            }
            self.x[lvl] = self.arena.dlink(xl);
            self.try_row();
        } else {
            trace!("C6/C7: uncover item {} and backtrack", self.item_label(i));
            uncover(&mut self.arena, i);
            self.items.pop();
            self.x.pop();
            self.l = lvl;
            self.stage = Stage::Retry;
        }
    }

    fn extract_solution(&self) -> Solution {
        Solution::from_rows(&self.arena, &self.x)
    }
}

impl Iterator for Driver {
    type Item = Result<Solution, SolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_solution() {
            Ok(Some(solution)) => Some(Ok(solution)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn knuth_example() -> Builder {
        let mut b = Builder::new();
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            b.define_primary_item(name).unwrap();
        }
        b.prepare_options().unwrap();
        for opt in [
            vec!["c", "e"],
            vec!["a", "d", "g"],
            vec!["b", "c", "f"],
            vec!["a", "d", "f"],
            vec!["b", "g"],
            vec!["d", "e", "g"],
        ] {
            b.begin_option().unwrap();
            for name in opt {
                let idx = b.item_index(name).unwrap();
                b.add_item(idx).unwrap();
            }
            b.end_option().unwrap();
        }
        b.end_options().unwrap();
        b
    }

    #[test]
    fn knuth_example_has_exactly_one_solution() {
        let mut driver = knuth_example().build(Heuristic::Mrv).unwrap();
        let first = driver.next_solution().unwrap().unwrap();
        let mut indices = first.option_indices().to_vec();
        indices.sort_unstable();
        assert_eq!(indices, vec![1, 4, 5]);
        assert_eq!(driver.next_solution().unwrap(), None);
    }

    #[test]
    fn naive_and_mrv_agree_on_the_solution_set() {
        let naive = knuth_example().build(Heuristic::Naive).unwrap();
        let mrv = knuth_example().build(Heuristic::Mrv).unwrap();
        let mut naive_solutions: Vec<Vec<usize>> = naive
            .map(|r| {
                let mut v = r.unwrap().option_indices().to_vec();
                v.sort_unstable();
                v
            })
            .collect();
        let mut mrv_solutions: Vec<Vec<usize>> = mrv
            .map(|r| {
                let mut v = r.unwrap().option_indices().to_vec();
                v.sort_unstable();
                v
            })
            .collect();
        naive_solutions.sort();
        mrv_solutions.sort();
        assert_eq!(naive_solutions, mrv_solutions);
    }

    #[test]
    fn unsatisfiable_problem_yields_no_solutions() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let mut driver = b.build(Heuristic::Mrv).unwrap();
        assert_eq!(driver.next_solution().unwrap(), None);
    }

    #[test]
    fn item_never_occurring_is_reported_before_search() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let mut driver = b.build(Heuristic::Naive).unwrap();
        assert_eq!(
            driver.next_solution(),
            Err(SolveError::ItemNeverOccurs {
                item: "b".to_string()
            })
        );
    }

    #[test]
    fn enumerates_multiple_solutions() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.prepare_options().unwrap();
        for _ in 0..3 {
            b.begin_option().unwrap();
            b.add_item(1).unwrap();
            b.end_option().unwrap();
        }
        b.end_options().unwrap();
        let driver = b.build(Heuristic::Naive).unwrap();
        let solutions: Vec<_> = driver.map(|r| r.unwrap()).collect();
        assert_eq!(solutions.len(), 3);
    }

    #[test]
    fn colour_conflict_forces_branching_to_a_later_option() {
        // Two primary slots must both be covered; a secondary "wire" item
        // forces any two options covering different slots to agree on
        // colour. Only the (1, 3) pairing agrees (both "red").
        let mut b = Builder::new();
        b.define_primary_item("slot1").unwrap();
        b.define_primary_item("slot2").unwrap();
        b.define_secondary_item("wire").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap(); // 1: slot1, wire=red
        b.add_item(1).unwrap();
        b.add_item_with_color(3, "red").unwrap();
        b.end_option().unwrap();
        b.begin_option().unwrap(); // 2: slot2, wire=blue
        b.add_item(2).unwrap();
        b.add_item_with_color(3, "blue").unwrap();
        b.end_option().unwrap();
        b.begin_option().unwrap(); // 3: slot2, wire=red
        b.add_item(2).unwrap();
        b.add_item_with_color(3, "red").unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let mut driver = b.build(Heuristic::Naive).unwrap();
        let solution = driver.next_solution().unwrap().unwrap();
        let mut indices = solution.option_indices().to_vec();
        indices.sort_unstable();
        assert_eq!(indices, vec![1, 3]);
    }
}
