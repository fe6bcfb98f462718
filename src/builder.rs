//! The problem builder: an ordered-construction API over [`Arena`].
//!
//! Grounded in `tveness-dlx-rs/src/solver.rs`'s `Solver::new_optional`/
//! `add_option` for the append-only arena-building mechanics, and in
//! `examples/original_source/src/algorithm.c`'s `define_item`,
//! `prepare_options`, `add_item_with_color`, `end_option`, and `end_options`
//! for the phase ordering and spacer bookkeeping (the `p`/`j` fields there
//! become `self.p`/`self.current_option_len` here). The error variant shapes
//! follow `examples/other_examples/e704b52f_pbevin-xcc__src-builder.rs.rs`'s
//! `BuildError`.

use crate::arena::{Arena, Link, ROOT};
use crate::driver::Driver;
use crate::error::BuildError;
use crate::heuristic::Heuristic;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    DeclaringItems,
    OptionsPrepared,
    InOption,
    Closed,
}

/// Builds an [`Arena`] through an ordered sequence of calls: declare items,
/// `prepare_options`, then `begin_option`/`add_item*`/`end_option` for each
/// option, then `end_options`, then `build`. Calls made out of order, or
/// with bad arguments, return a [`BuildError`] and leave the builder
/// otherwise unchanged.
#[derive(Debug)]
pub struct Builder {
    arena: Arena,
    phase: Phase,
    names: HashMap<String, Link>,
    n1_set: bool,
    n1: usize,
    colors: HashMap<String, i32>,
    next_color: i32,
    /// Index of the most recently written spacer: the opening spacer of the
    /// option currently in progress, or the final spacer once none is.
    p: Link,
    current_option_len: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates an empty builder with just the root sentinel declared.
    pub fn new() -> Self {
        Builder {
            arena: Arena::new(),
            phase: Phase::DeclaringItems,
            names: HashMap::new(),
            n1_set: false,
            n1: 0,
            colors: HashMap::new(),
            next_color: 1,
            p: ROOT,
            current_option_len: 0,
        }
    }

    /// Declares a primary item, one that every solution must cover exactly
    /// once. Must precede every secondary item and every call to
    /// `prepare_options`.
    pub fn define_primary_item(&mut self, name: &str) -> Result<(), BuildError> {
        if self.phase != Phase::DeclaringItems {
            return Err(BuildError::ItemDeclaredAfterOptionsStarted(
                name.to_string(),
            ));
        }
        if self.n1_set {
            return Err(BuildError::PrimaryAfterSecondary(name.to_string()));
        }
        if self.names.contains_key(name) {
            return Err(BuildError::DuplicateItemName(name.to_string()));
        }
        let idx = self.arena.push_header(name);
        self.names.insert(name.to_string(), idx);
        Ok(())
    }

    /// Declares a secondary item, one that may be covered at most once and
    /// that every option covering it must agree on colour. Must follow every
    /// primary item.
    pub fn define_secondary_item(&mut self, name: &str) -> Result<(), BuildError> {
        if self.phase != Phase::DeclaringItems {
            return Err(BuildError::ItemDeclaredAfterOptionsStarted(
                name.to_string(),
            ));
        }
        if self.names.contains_key(name) {
            return Err(BuildError::DuplicateItemName(name.to_string()));
        }
        let idx = self.arena.push_header(name);
        if !self.n1_set {
            self.n1 = idx - 1;
            self.n1_set = true;
        }
        self.names.insert(name.to_string(), idx);
        Ok(())
    }

    /// Looks up a previously declared item's 1-based index.
    pub fn item_index(&self, name: &str) -> Option<Link> {
        self.names.get(name).copied()
    }

    /// Closes item declaration and wires the primary/secondary item rings,
    /// readying the builder to accept options.
    pub fn prepare_options(&mut self) -> Result<(), BuildError> {
        if self.phase != Phase::DeclaringItems {
            return Err(BuildError::OptionsAlreadyPrepared);
        }
        let n = self.arena.len_nodes() - 1;
        if !self.n1_set {
            self.n1 = n;
        }
        self.arena.finish_headers(self.n1, n);
        self.arena.wire_ring(ROOT, 1, self.n1);

        let spacer = self.arena.push_node();
        self.arena.set_top(spacer, 0);
        self.arena.set_ulink_raw(spacer, spacer);
        self.arena.set_dlink(spacer, spacer);
        self.arena.secondary_root = spacer;
        self.arena.wire_ring(spacer, self.n1 + 1, n);

        self.p = spacer;
        self.phase = Phase::OptionsPrepared;
        Ok(())
    }

    /// Opens a new option row.
    pub fn begin_option(&mut self) -> Result<(), BuildError> {
        match self.phase {
            Phase::DeclaringItems => Err(BuildError::OptionsNotPrepared),
            Phase::InOption => Err(BuildError::OptionAlreadyInProgress),
            Phase::Closed => Err(BuildError::OptionsAlreadyClosed),
            Phase::OptionsPrepared => {
                self.phase = Phase::InOption;
                self.current_option_len = 0;
                Ok(())
            }
        }
    }

    /// Adds an uncoloured item to the option currently in progress.
    pub fn add_item(&mut self, item: Link) -> Result<(), BuildError> {
        self.add_item_impl(item, None)
    }

    /// Adds a secondary item, tagged with a named colour, to the option
    /// currently in progress. Two colour names are considered equal (and
    /// thus compatible under [`crate::ops::commit`]) only if they're the
    /// same string; the numeric tag used internally is an implementation
    /// detail assigned on first sight.
    pub fn add_item_with_color(&mut self, item: Link, color: &str) -> Result<(), BuildError> {
        self.add_item_impl(item, Some(color))
    }

    fn add_item_impl(&mut self, item: Link, color_name: Option<&str>) -> Result<(), BuildError> {
        if self.phase == Phase::DeclaringItems {
            return Err(BuildError::OptionsNotPrepared);
        }
        if self.phase != Phase::InOption {
            return Err(BuildError::NoOptionInProgress);
        }
        if item < 1 || item > self.arena.item_count() {
            return Err(BuildError::ItemIndexOutOfRange(item));
        }
        let tag = match color_name {
            None => 0,
            Some(name) => match self.colors.get(name) {
                Some(tag) => *tag,
                None => {
                    let tag = self.next_color;
                    self.colors.insert(name.to_string(), tag);
                    self.next_color += 1;
                    tag
                }
            },
        };
        let idx = self.arena.push_node();
        self.arena.splice_option_node(idx, item, tag, color_name);
        self.current_option_len += 1;
        Ok(())
    }

    /// Closes the option currently in progress, placing a closing spacer
    /// after its nodes.
    pub fn end_option(&mut self) -> Result<(), BuildError> {
        if self.phase != Phase::InOption {
            return Err(BuildError::NoOptionInProgress);
        }
        if self.current_option_len == 0 {
            return Err(BuildError::EmptyOption);
        }
        let opening = self.p;
        let last_node = opening + self.current_option_len;
        self.arena.set_dlink(opening, last_node);

        let spacer = self.arena.push_node();
        let m = self.arena.bump_option_count();
        self.arena.set_top(spacer, -(m as isize));
        self.arena.set_ulink_raw(spacer, opening + 1);

        self.p = spacer;
        self.current_option_len = 0;
        self.phase = Phase::OptionsPrepared;
        Ok(())
    }

    /// Closes option declaration. No further items or options may be added.
    pub fn end_options(&mut self) -> Result<(), BuildError> {
        match self.phase {
            Phase::DeclaringItems => Err(BuildError::OptionsNotPrepared),
            Phase::InOption => Err(BuildError::NoOptionInProgress),
            Phase::Closed => Err(BuildError::OptionsAlreadyClosed),
            Phase::OptionsPrepared => {
                let last = self.arena.len_nodes() - 1;
                self.arena.set_dlink(last, 0);
                self.phase = Phase::Closed;
                Ok(())
            }
        }
    }

    /// Consumes the builder, producing a [`Driver`] ready to search.
    pub fn build(self, heuristic: Heuristic) -> Result<Driver, BuildError> {
        if self.phase != Phase::Closed {
            return Err(BuildError::OptionsNotClosed);
        }
        if self.arena.primary_count() == 0 {
            return Err(BuildError::NoPrimaryItems);
        }
        Ok(Driver::new(self.arena, heuristic))
    }

    /// Consumes the builder, returning the raw arena without a driver.
    /// Used internally and by tests that want to inspect arena state
    /// directly rather than drive a search.
    pub(crate) fn into_arena(self) -> Arena {
        self.arena
    }
}
