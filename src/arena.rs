//! The link arena: a set of parallel, index-addressed arrays that together
//! encode the sparse exact-cover matrix as intertwined doubly-linked lists.
//!
//! Every other component (`ops`, `builder`, `driver`, `solution`) reaches the
//! arena only through the accessor/mutator methods here; nothing indexes the
//! underlying vectors directly.

use std::collections::HashMap;
use std::fmt;

/// An index into the arena. A plain alias rather than a newtype: the
/// primitives do enough `p + 1` / `q - 1` spacer-jump arithmetic that a
/// transparent `usize` reads most naturally, exactly as it does in Knuth's
/// own pseudocode.
pub type Link = usize;

/// Index of the root sentinel for the primary-item ring.
pub const ROOT: Link = 0;

/// The link arena. Grows by appending default-initialised entries during
/// problem construction; never shrinks; mutates in place during search.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    name: Vec<Option<String>>,
    llink: Vec<Link>,
    rlink: Vec<Link>,
    ulink: Vec<Link>,
    dlink: Vec<Link>,
    top: Vec<isize>,
    color: Vec<i32>,
    color_name: Vec<Option<String>>,
    len: Vec<usize>,

    /// Number of primary items (`N_1` in Knuth's notation).
    pub(crate) n1: usize,
    /// Total number of items (`N`).
    pub(crate) n: usize,
    /// Number of options declared so far (`M`).
    pub(crate) m: usize,
    /// Index of the first spacer (`N + 1`); also the secondary ring's root.
    pub(crate) secondary_root: Link,
}

impl Arena {
    /// Creates an arena with just the root sentinel at index 0.
    pub fn new() -> Self {
        Arena {
            name: vec![None],
            llink: vec![0],
            rlink: vec![0],
            ulink: vec![0],
            dlink: vec![0],
            top: vec![0],
            color: vec![0],
            color_name: vec![None],
            len: vec![0],
            n1: 0,
            n: 0,
            m: 0,
            secondary_root: 0,
        }
    }

    /// Number of nodes currently in the arena (next index to be appended).
    pub(crate) fn len_nodes(&self) -> usize {
        self.name.len()
    }

    /// Appends a new item header, self-looped vertically, returning its index.
    pub(crate) fn push_header(&mut self, name: &str) -> Link {
        let idx = self.len_nodes();
        self.name.push(Some(name.to_string()));
        self.llink.push(idx);
        self.rlink.push(idx);
        self.ulink.push(idx);
        self.dlink.push(idx);
        self.top.push(0);
        self.color.push(0);
        self.color_name.push(None);
        self.len.push(0);
        idx
    }

    /// Appends a bare node slot (used for spacers and option nodes), whose
    /// caller is responsible for wiring `top`/`ulink`/`dlink`/`color`.
    pub(crate) fn push_node(&mut self) -> Link {
        let idx = self.len_nodes();
        self.name.push(None);
        self.llink.push(0);
        self.rlink.push(0);
        self.ulink.push(idx);
        self.dlink.push(idx);
        self.top.push(0);
        self.color.push(0);
        self.color_name.push(None);
        self.len.push(0);
        idx
    }

    /// Splices a fresh option node onto the bottom of item `item`'s vertical
    /// list, setting `top`/`color`/`color_name`, and bumping `len[item]`.
    pub(crate) fn splice_option_node(
        &mut self,
        idx: Link,
        item: Link,
        color: i32,
        color_name: Option<&str>,
    ) {
        self.top[idx] = item as isize;
        self.color[idx] = color;
        self.color_name[idx] = color_name.map(|s| s.to_string());

        let last = self.ulink[item];
        self.dlink[last] = idx;
        self.ulink[idx] = last;
        self.dlink[idx] = item;
        self.ulink[item] = idx;
        self.len[item] += 1;
    }

    /// Finalises the item count once all items have been declared. `n1` is
    /// the number of primary items, `n` the total number of items.
    pub(crate) fn finish_headers(&mut self, n1: usize, n: usize) {
        self.n1 = n1;
        self.n = n;
    }

    /// Wires `root`'s horizontal ring across items `first..=last` in order;
    /// wires an empty self-loop if `first > last`.
    pub(crate) fn wire_ring(&mut self, root: Link, first: Link, last: Link) {
        if first > last {
            self.llink[root] = root;
            self.rlink[root] = root;
            return;
        }
        self.rlink[root] = first;
        self.llink[first] = root;
        for i in first..last {
            self.rlink[i] = i + 1;
            self.llink[i + 1] = i;
        }
        self.rlink[last] = root;
        self.llink[root] = last;
    }

    // --- accessors -------------------------------------------------------

    /// The declared name of item `i`, or `None` for spacers and option nodes.
    pub fn name(&self, i: Link) -> Option<&str> {
        self.name[i].as_deref()
    }

    /// Left neighbour in a horizontal ring (item headers only).
    pub fn llink(&self, i: Link) -> Link {
        self.llink[i]
    }
    /// Right neighbour in a horizontal ring (item headers only).
    pub fn rlink(&self, i: Link) -> Link {
        self.rlink[i]
    }
    /// Up neighbour in a vertical list.
    pub fn ulink(&self, i: Link) -> Link {
        self.ulink[i]
    }
    /// Down neighbour in a vertical list.
    pub fn dlink(&self, i: Link) -> Link {
        self.dlink[i]
    }
    /// For an option node, the owning item's index; for a spacer, the
    /// negated 1-based ordinal of the option it closes (or 0 for the first).
    pub fn top(&self, i: Link) -> isize {
        self.top[i]
    }
    /// Colour tag of an option node (0 means uncoloured).
    pub fn color(&self, i: Link) -> i32 {
        self.color[i]
    }
    /// The colour name an option node was tagged with, if any.
    pub fn color_name(&self, i: Link) -> Option<&str> {
        self.color_name[i].as_deref()
    }
    /// Number of option rows currently covering item `i`.
    pub fn len(&self, i: Link) -> usize {
        self.len[i]
    }

    pub(crate) fn set_llink(&mut self, i: Link, v: Link) {
        self.llink[i] = v;
    }
    pub(crate) fn set_rlink(&mut self, i: Link, v: Link) {
        self.rlink[i] = v;
    }
    pub(crate) fn set_ulink(&mut self, i: Link, v: Link) {
        self.ulink[i] = v;
    }
    pub(crate) fn set_dlink(&mut self, i: Link, v: Link) {
        self.dlink[i] = v;
    }
    pub(crate) fn set_top(&mut self, i: Link, v: isize) {
        self.top[i] = v;
    }
    pub(crate) fn set_ulink_raw(&mut self, i: Link, v: Link) {
        self.ulink[i] = v;
    }
    pub(crate) fn set_color(&mut self, i: Link, v: i32) {
        self.color[i] = v;
    }
    pub(crate) fn inc_len(&mut self, i: Link) {
        self.len[i] += 1;
    }
    pub(crate) fn dec_len(&mut self, i: Link) {
        debug_assert!(self.len[i] > 0, "len underflow at {i}");
        self.len[i] -= 1;
    }

    /// Number of primary items.
    pub fn primary_count(&self) -> usize {
        self.n1
    }
    /// Total number of items.
    pub fn item_count(&self) -> usize {
        self.n
    }
    /// Number of options declared.
    pub fn option_count(&self) -> usize {
        self.m
    }
    /// Increments and returns the option count; called once per `end_option`.
    pub(crate) fn bump_option_count(&mut self) -> usize {
        self.m += 1;
        self.m
    }
    /// Index of the first spacer (`N + 1`).
    pub fn secondary_root(&self) -> Link {
        self.secondary_root
    }

    /// Iterates the active primary-item ring starting at `rlink(0)`.
    pub fn active_primary_items(&self) -> impl Iterator<Item = Link> + '_ {
        self.active_ring(ROOT)
    }

    /// Iterates the active secondary-item ring starting at `rlink(secondary_root)`.
    pub fn active_secondary_items(&self) -> impl Iterator<Item = Link> + '_ {
        self.active_ring(self.secondary_root)
    }

    fn active_ring(&self, root: Link) -> impl Iterator<Item = Link> + '_ {
        ActiveItems {
            arena: self,
            root,
            cur: self.rlink[root],
        }
    }

    /// Returns whether item `i`'s vertical list is empty (self-looped).
    pub fn is_empty_column(&self, i: Link) -> bool {
        self.ulink[i] == i && self.dlink[i] == i
    }
}

/// Dumps the matrix of currently active items and option rows: a header line
/// of the items still in the active rings, then one line per option row with
/// a cell for each of its nodes whose item is still active (one column per
/// active item, in ring order). A covered item disappears from the header
/// and from every row's cell under it. Meant for `-v`/`--verbose` step-by-step
/// inspection, not machine parsing.
impl fmt::Display for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut columns = HashMap::new();
        let mut col = 0usize;
        write!(f, " ")?;
        for item in self.active_primary_items().chain(self.active_secondary_items()) {
            columns.insert(item, col);
            col += 1;
            write!(f, "{} ", self.name[item].as_deref().unwrap_or("?"))?;
        }
        writeln!(f)?;

        let mut last_col = 0;
        for idx in (self.secondary_root + 1)..self.len_nodes() {
            if self.top[idx] <= 0 {
                writeln!(f)?;
                last_col = 0;
            } else if let Some(&cur_col) = columns.get(&(self.top[idx] as Link)) {
                let item = self.top[idx] as Link;
                let label = match self.color_name[idx].as_deref() {
                    Some(c) => format!("{}:{c}", self.name[item].as_deref().unwrap_or("?")),
                    None => self.name[item].as_deref().unwrap_or("?").to_string(),
                };
                let width = 2 * (1 + cur_col.saturating_sub(last_col));
                write!(f, "{label:width$}")?;
                last_col = cur_col + 1;
            }
        }
        Ok(())
    }
}

struct ActiveItems<'a> {
    arena: &'a Arena,
    root: Link,
    cur: Link,
}

impl<'a> Iterator for ActiveItems<'a> {
    type Item = Link;
    fn next(&mut self) -> Option<Link> {
        if self.cur == self.root {
            None
        } else {
            let item = self.cur;
            self.cur = self.arena.rlink[item];
            Some(item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_self_loops() {
        let a = Arena::new();
        assert_eq!(a.llink(ROOT), ROOT);
        assert_eq!(a.rlink(ROOT), ROOT);
    }

    #[test]
    fn fresh_header_self_loops_vertically() {
        let mut a = Arena::new();
        let h = a.push_header("x");
        assert!(a.is_empty_column(h));
        assert_eq!(a.len(h), 0);
    }

    #[test]
    fn wire_ring_links_in_order() {
        let mut a = Arena::new();
        let h1 = a.push_header("a");
        let h2 = a.push_header("b");
        let h3 = a.push_header("c");
        a.wire_ring(ROOT, h1, h3);
        assert_eq!(a.rlink(ROOT), h1);
        assert_eq!(a.rlink(h1), h2);
        assert_eq!(a.rlink(h2), h3);
        assert_eq!(a.rlink(h3), ROOT);
        assert_eq!(a.llink(h1), ROOT);
        assert_eq!(a.llink(h3), h2);
    }

    #[test]
    fn display_drops_covered_items_and_hidden_cells() {
        use crate::builder::Builder;
        use crate::ops::cover;

        let mut b = Builder::new();
        b.define_primary_item("a").unwrap();
        b.define_primary_item("b").unwrap();
        b.prepare_options().unwrap();
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.end_option().unwrap();
        b.begin_option().unwrap();
        b.add_item(1).unwrap();
        b.add_item(2).unwrap();
        b.end_option().unwrap();
        b.end_options().unwrap();
        let mut arena = b.into_arena();

        let before = format!("{arena}");
        assert!(before.contains('a'));
        assert!(before.contains('b'));

        cover(&mut arena, 1);
        let after = format!("{arena}");
        assert!(!after.contains('a'));
        assert!(after.contains('b'));
    }
}
