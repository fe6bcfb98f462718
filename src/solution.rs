//! The result extractor: turns a committed stack of option-row nodes into
//! the 1-based option ordinals a caller expects back from a search.
//!
//! Grounded in `examples/original_source/src/algorithm.c`'s `end_option`,
//! which stores `TOP(closing spacer) = -M` for the `M`-th option just
//! closed; walking left from any node in a row to its opening spacer and
//! negating `TOP` recovers that row's ordinal.

use crate::arena::{Arena, Link};

/// One solution: the 1-based ordinals of the options selected, in the order
/// the search committed to them (not necessarily sorted).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    option_indices: Vec<usize>,
    rows: Vec<Link>,
}

impl Solution {
    pub(crate) fn from_rows(arena: &Arena, rows: &[Link]) -> Self {
        let option_indices = rows.iter().map(|&p| option_ordinal(arena, p)).collect();
        Solution {
            option_indices,
            rows: rows.to_vec(),
        }
    }

    /// The 1-based ordinal of each selected option, in commit order.
    pub fn option_indices(&self) -> &[usize] {
        &self.option_indices
    }

    /// Number of options selected.
    pub fn len(&self) -> usize {
        self.option_indices.len()
    }

    /// Whether this solution selects zero options (only possible when the
    /// problem declares no primary items, which the builder already
    /// rejects; kept for `Iterator`/`len` symmetry).
    pub fn is_empty(&self) -> bool {
        self.option_indices.is_empty()
    }

    /// Renders each selected option as its item names (and, for coloured
    /// secondary items, `name:colour`), in the order the items were added
    /// to the option.
    pub fn rows(&self, arena: &Arena) -> Vec<Vec<(String, Option<String>)>> {
        self.rows
            .iter()
            .map(|&p| {
                let mut q = p;
                while arena.top(q) > 0 {
                    q -= 1;
                }
                q += 1;
                let mut cells = Vec::new();
                while arena.top(q) > 0 {
                    let item = arena.top(q) as Link;
                    let name = arena.name(item).unwrap_or("").to_string();
                    let color = if arena.color(q) != 0 {
                        arena.color_name(q).map(str::to_string)
                    } else {
                        None
                    };
                    cells.push((name, color));
                    q += 1;
                }
                cells
            })
            .collect()
    }
}

/// Walks left from `p`, a node inside some option row, to that row's
/// opening spacer, and recovers the row's 1-based ordinal.
fn option_ordinal(arena: &Arena, p: Link) -> usize {
    let mut q = p;
    while arena.top(q) > 0 {
        q -= 1;
    }
    (-arena.top(q) + 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::heuristic::Heuristic;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_rows_with_colour_suffixes() {
        let mut b = Builder::new();
        b.define_primary_item("slot").unwrap();
        b.define_secondary_item("wire").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.add_item_with_color(2, "red").unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let mut driver = b.build(Heuristic::Naive).unwrap();
        let solution = driver.next_solution().unwrap().unwrap();
        let rows = solution.rows(driver.arena());
        assert_eq!(
            rows,
            vec![vec![
                ("slot".to_string(), None),
                ("wire".to_string(), Some("red".to_string())),
            ]]
        );
    }

    #[test]
    fn extracts_correct_ordinals_for_a_known_solution() {
        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap(); // option 1
        b.add_item(1).unwrap();
        b.end_option().unwrap();
        b.begin_option().unwrap(); // option 2
        b.add_item(2).unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let mut driver = b.build(Heuristic::Naive).unwrap();
        let solution = driver.next_solution().unwrap().unwrap();
        let mut indices = solution.option_indices().to_vec();
        indices.sort_unstable();
        assert_eq!(indices, vec![1, 2]);
    }
}
