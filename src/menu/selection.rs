//! Module selection parsing
//!
//! Turns a line such as `1 3,5` into module indices. Bad tokens are reported
//! individually and never cancel the valid ones.

use crate::extensions::ModuleSpec;

/// Why a token was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Not a number
    Invalid,
    /// A number outside `1..=count`
    OutOfRange,
}

/// A token that did not select anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedToken {
    pub token: String,
    pub reason: RejectReason,
}

/// Parsed answer to the module picker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Zero-based indices, in the order typed, without repeats
    pub indices: Vec<usize>,
    /// Tokens that were dropped
    pub rejected: Vec<RejectedToken>,
}

impl Selection {
    /// Every module
    #[must_use]
    pub fn all(count: usize) -> Self {
        Self {
            indices: (0..count).collect(),
            rejected: Vec::new(),
        }
    }

    /// Check if nothing was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The selected modules
    #[must_use]
    pub fn pick(&self, modules: &[ModuleSpec]) -> Vec<ModuleSpec> {
        self.indices
            .iter()
            .filter_map(|&idx| modules.get(idx).cloned())
            .collect()
    }
}

/// Parse the picker's input for a list of `count` modules
///
/// - `""` or `"q"`: nothing
/// - `"a"` or `"all"`: everything
/// - otherwise 1-based indices separated by commas and/or whitespace
#[must_use]
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let choice = input.trim().to_lowercase();

    match choice.as_str() {
        "" | "q" => return Selection::default(),
        "a" | "all" => return Selection::all(count),
        _ => {}
    }

    let mut selection = Selection::default();

    for token in choice
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        if !token.chars().all(|c| c.is_ascii_digit()) {
            selection.rejected.push(RejectedToken {
                token: token.to_string(),
                reason: RejectReason::Invalid,
            });
            continue;
        }

        // Digits that overflow usize are out of range like any other large index
        match token.parse::<usize>() {
            Ok(idx) if (1..=count).contains(&idx) => {
                if !selection.indices.contains(&(idx - 1)) {
                    selection.indices.push(idx - 1);
                }
            }
            _ => selection.rejected.push(RejectedToken {
                token: token.to_string(),
                reason: RejectReason::OutOfRange,
            }),
        }
    }

    selection
}
