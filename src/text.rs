//! Reads the problem text format:
//!
//! ```text
//! <primary_1 primary_2 ... primary_k>
//! [secondary_1 secondary_2 ... secondary_m]
//! item_a item_b:color_x item_c;
//! item_d:color_y item_e;
//! ```
//!
//! A hand-rolled tokeniser, not a parser-combinator crate: the grammar is
//! regular enough (two bracketed header lines, `;`-terminated option rows,
//! an optional `:color` suffix) that `examples/other_examples/e704b52f_pbevin-xcc__src-builder.rs.rs`'s
//! own `"name:color".split_once(':')` style is the idiomatic amount of
//! machinery, not `pest` or `chumsky`.
//!
//! A primary item name followed by `:` inside `<...>` (declaring a
//! multiplicity bound, e.g. `<a : 2 b : 1;2>`) is recognised and rejected
//! with [`ReadError::PrimaryItemMultiplicityUnsupported`] rather than
//! falling through to a generic syntax error: this reader only builds
//! problems for the uncoloured/coloured exact-cover core, which has no
//! slack/bound fields to populate.

use crate::builder::Builder;
use crate::driver::Driver;
use crate::error::ReadError;
use crate::heuristic::Heuristic;

/// Reads a complete problem description and returns a [`Driver`] ready to
/// search it with the given heuristic.
pub fn read_problem(src: &str, heuristic: Heuristic) -> Result<Driver, ReadError> {
    let mut tokens = Tokenizer::new(src);
    let mut builder = Builder::new();

    let primary = tokens.bracketed('<', '>')?;
    for name in &primary {
        builder.define_primary_item(name)?;
    }

    let secondary = match tokens.peek() {
        Some(Token::Punct('[')) => tokens.bracketed('[', ']')?,
        _ => Vec::new(),
    };
    for name in &secondary {
        builder.define_secondary_item(name)?;
    }

    builder.prepare_options()?;

    let mut any_option = false;
    while tokens.peek().is_some() {
        any_option = true;
        builder.begin_option()?;
        loop {
            let word = tokens.word()?;
            let (name, color) = match word.split_once(':') {
                Some((n, c)) => (n, Some(c)),
                None => (word.as_str(), None),
            };
            let idx = builder
                .item_index(name)
                .ok_or_else(|| ReadError::Expected {
                    expected: "a declared item name",
                    found: name.to_string(),
                })?;
            match color {
                None => builder.add_item(idx)?,
                Some(c) => {
                    if idx <= primary.len() {
                        return Err(ReadError::PrimaryItemColored(name.to_string()));
                    }
                    builder.add_item_with_color(idx, c)?;
                }
            }
            match tokens.next() {
                Some(Token::Punct(';')) => break,
                Some(Token::Word(_)) => {
                    return Err(ReadError::Expected {
                        expected: "`;` to end the option",
                        found: word,
                    })
                }
                Some(Token::Punct(c)) => {
                    return Err(ReadError::Expected {
                        expected: "`;` to end the option",
                        found: c.to_string(),
                    })
                }
                None => return Err(ReadError::UnexpectedEof("an option row")),
            }
        }
        builder.end_option()?;
    }
    if !any_option {
        return Err(ReadError::UnexpectedEof("at least one option"));
    }

    builder.end_options()?;
    Ok(builder.build(heuristic)?)
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Punct(char),
}

struct Tokenizer<'a> {
    rest: std::str::Chars<'a>,
    peeked: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Tokenizer {
            rest: src.chars(),
            peeked: None,
        }
    }

    fn lex(&mut self) -> Option<Token> {
        let mut chars = self.rest.clone();
        loop {
            let c = chars.next()?;
            if c.is_whitespace() {
                self.rest = chars.clone();
                continue;
            }
            if matches!(c, '<' | '>' | '[' | ']' | ';' | ':') {
                self.rest = chars;
                return Some(Token::Punct(c));
            }
            let mut word = String::new();
            word.push(c);
            loop {
                let mut lookahead = chars.clone();
                match lookahead.next() {
                    Some(c) if !c.is_whitespace() && !matches!(c, '<' | '>' | '[' | ']' | ';') => {
                        word.push(c);
                        chars = lookahead;
                    }
                    _ => break,
                }
            }
            self.rest = chars;
            return Some(Token::Word(word));
        }
    }

    fn peek(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            self.peeked = self.lex();
        }
        self.peeked.as_ref()
    }

    fn next(&mut self) -> Option<Token> {
        self.peek();
        self.peeked.take()
    }

    fn word(&mut self) -> Result<String, ReadError> {
        match self.next() {
            Some(Token::Word(w)) => Ok(w),
            Some(Token::Punct(c)) => Err(ReadError::Expected {
                expected: "an item name",
                found: c.to_string(),
            }),
            None => Err(ReadError::UnexpectedEof("an item name")),
        }
    }

    fn bracketed(&mut self, open: char, close: char) -> Result<Vec<String>, ReadError> {
        match self.next() {
            Some(Token::Punct(c)) if c == open => {}
            Some(Token::Word(w)) => {
                return Err(ReadError::Expected {
                    expected: "an opening bracket",
                    found: w,
                })
            }
            Some(Token::Punct(c)) => {
                return Err(ReadError::Expected {
                    expected: "an opening bracket",
                    found: c.to_string(),
                })
            }
            None => return Err(ReadError::UnexpectedEof("a bracketed item list")),
        }
        let mut names = Vec::new();
        loop {
            match self.next() {
                Some(Token::Punct(c)) if c == close => break,
                Some(Token::Word(w)) => names.push(w),
                Some(Token::Punct(':')) => {
                    let item = names.pop().unwrap_or_default();
                    return Err(ReadError::PrimaryItemMultiplicityUnsupported(item));
                }
                Some(Token::Punct(c)) => {
                    return Err(ReadError::Expected {
                        expected: "an item name or closing bracket",
                        found: c.to_string(),
                    })
                }
                None => return Err(ReadError::UnexpectedEof("a bracketed item list")),
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_uncoloured_problem() {
        let src = "<a b c>\none;\ntwo three;\n";
        let mut driver = read_problem(src, Heuristic::Naive).unwrap();
        let solution = driver.next_solution().unwrap();
        assert!(solution.is_some());
    }

    #[test]
    fn reads_coloured_problem() {
        let src = "<slot1 slot2>\n[wire]\nslot1 wire:red;\nslot2 wire:red;\n";
        let mut driver = read_problem(src, Heuristic::Naive).unwrap();
        let solution = driver.next_solution().unwrap().unwrap();
        let mut indices = solution.option_indices().to_vec();
        indices.sort_unstable();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn rejects_colour_on_primary_item() {
        let src = "<a>\na:red;\n";
        let err = read_problem(src, Heuristic::Naive).unwrap_err();
        assert_eq!(err, ReadError::PrimaryItemColored("a".to_string()));
    }

    #[test]
    fn rejects_undeclared_item() {
        let src = "<a b>\na c;\n";
        let err = read_problem(src, Heuristic::Naive).unwrap_err();
        assert_eq!(
            err,
            ReadError::Expected {
                expected: "a declared item name",
                found: "c".to_string()
            }
        );
    }

    #[test]
    fn rejects_missing_semicolon() {
        let src = "<a b>\na b\n";
        let err = read_problem(src, Heuristic::Naive).unwrap_err();
        assert!(matches!(err, ReadError::UnexpectedEof(_)));
    }

    #[test]
    fn rejects_primary_item_multiplicity_bound() {
        let src = "<a : 2 b : 1;2>\na b;\n";
        let err = read_problem(src, Heuristic::Naive).unwrap_err();
        assert_eq!(
            err,
            ReadError::PrimaryItemMultiplicityUnsupported("a".to_string())
        );
    }
}
