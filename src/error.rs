//! Error types for construction, solving, and text-format reading.
//!
//! Grounded in `examples/other_examples/e704b52f_pbevin-xcc__src-builder.rs.rs`'s
//! `BuildError` enum (same derive style, same "short diagnostic string" role
//! builder methods return, just typed instead of `&str`).

use thiserror::Error;

/// Errors raised while populating a [`crate::builder::Builder`]. Raising one
/// leaves the builder's arena exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An item name was declared (primary or secondary) more than once.
    #[error("item `{0}` is already defined")]
    DuplicateItemName(String),

    /// A primary item was declared after the first secondary item; every
    /// secondary declaration must follow all primary ones.
    #[error("primary item `{0}` declared after a secondary item")]
    PrimaryAfterSecondary(String),

    /// `define_primary_item`/`define_secondary_item` called after
    /// `prepare_options`.
    #[error("item `{0}` declared after options have already started")]
    ItemDeclaredAfterOptionsStarted(String),

    /// `add_item`/`add_item_with_color` referenced an index outside
    /// `1..=item_count()`.
    #[error("item index {0} is out of the declared range")]
    ItemIndexOutOfRange(usize),

    /// `add_item`/`add_item_with_color`/`begin_option` called before
    /// `prepare_options`.
    #[error("cannot add items before prepare_options() has been called")]
    OptionsNotPrepared,

    /// `prepare_options` called more than once.
    #[error("prepare_options() has already been called")]
    OptionsAlreadyPrepared,

    /// `add_item`/`add_item_with_color`/`end_option` called with no
    /// `begin_option` open.
    #[error("no option is currently open (call begin_option() first)")]
    NoOptionInProgress,

    /// `end_option` called with zero items added since `begin_option`.
    #[error("end_option() called with no items added to the current option")]
    EmptyOption,

    /// `begin_option` called while a previous option was never closed.
    #[error("begin_option() called before the previous option was ended")]
    OptionAlreadyInProgress,

    /// Any builder call made after `end_options()`.
    #[error("options have already been ended")]
    OptionsAlreadyClosed,

    /// `build` called before `end_options`.
    #[error("build() called before end_options()")]
    OptionsNotClosed,

    /// No primary items were ever declared.
    #[error("no primary items were declared")]
    NoPrimaryItems,
}

/// Errors raised while stepping [`crate::driver::Driver`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// State C1 found an item header whose vertical list is empty: no
    /// option mentions it, so no solution can ever exist.
    #[error("item `{item}` never occurs in any option")]
    ItemNeverOccurs {
        /// Name of the offending item (or its 1-based index if unnamed).
        item: String,
    },
}

/// Errors raised while reading the `<primary> [secondary] option;` text
/// format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Input ended while a bracketed item list or option row was open.
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// A token didn't match what the grammar expected at that position.
    #[error("expected {expected} but found `{found}`")]
    Expected {
        /// Human-readable description of what was expected.
        expected: &'static str,
        /// The token actually found.
        found: String,
    },

    /// An option referenced a colour on a primary item; `:color` suffixes
    /// are only valid on secondary items.
    #[error("item `{0}` is primary and cannot carry a colour")]
    PrimaryItemColored(String),

    /// A `:` appeared right after a primary item's name inside `<...>`,
    /// i.e. an attempt at the `name : bound` or `name : lower;upper`
    /// multiplicity syntax. Recognised and rejected explicitly rather than
    /// falling through to a generic "expected an item name" error, since
    /// this crate's core only implements Algorithm C (uncoloured and
    /// coloured exact cover), not Algorithm M's bounded-multiplicity items.
    #[error("item `{0}` declares a multiplicity bound, which this crate does not implement")]
    PrimaryItemMultiplicityUnsupported(String),

    /// The underlying builder rejected a call; see [`BuildError`].
    #[error(transparent)]
    Build(#[from] BuildError),
}
