//! Brace tracker — decides which closing brace ends a function body.
//!
//! A closing brace on its own says nothing; only the accumulated depth since
//! the function started does. Depth is reset when a function start is seen
//! and the end fires when the body returns to depth zero on a line holding
//! at least one `}`. Nested blocks therefore never end the function early.
//!
//! Unbalanced input is not an error. Depth may go negative or stay positive
//! at end of file; the open function is then simply never closed.

use crate::literals::CodeScanner;

/// How braces are counted on a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BracePolicy {
    /// Every `{` and `}` character counts, even inside strings and comments.
    #[default]
    Textual,
    /// Braces inside string/char literals and comments are ignored.
    CodeOnly,
}

/// Opening and closing brace counts for one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceCounts {
    pub opens: i64,
    pub closes: i64,
}

impl BraceCounts {
    fn of(text: &str) -> Self {
        Self {
            opens: text.matches('{').count() as i64,
            closes: text.matches('}').count() as i64,
        }
    }
}

/// Counts braces under a [`BracePolicy`], keeping scanner state across lines.
#[derive(Debug, Default)]
pub struct BraceCounter {
    policy: BracePolicy,
    scanner: CodeScanner,
}

impl BraceCounter {
    pub fn new(policy: BracePolicy) -> Self {
        Self {
            policy,
            scanner: CodeScanner::new(),
        }
    }

    pub fn count(&mut self, line: &str) -> BraceCounts {
        match self.policy {
            BracePolicy::Textual => BraceCounts::of(line),
            BracePolicy::CodeOnly => BraceCounts::of(&self.scanner.code_only(line)),
        }
    }

    /// Move past a line whose braces must not count (an existing comment),
    /// keeping block-comment state in sync.
    pub fn skip(&mut self, line: &str) {
        if self.policy == BracePolicy::CodeOnly {
            self.scanner.code_only(line);
        }
    }
}

/// The function whose body just closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEnd {
    /// Name recorded at the function start, if the user supplied one.
    pub name: Option<String>,
}

/// Per-file tracking state, threaded through the processing loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackerState {
    pub brace_depth: i64,
    pub in_function: bool,
    pub current_function: Option<String>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A function start line was seen. Depth restarts from zero.
    pub fn enter_function(&mut self, name: Option<String>) {
        self.in_function = true;
        self.brace_depth = 0;
        self.current_function = name.filter(|n| !n.is_empty());
    }

    /// Apply one line's brace counts; returns the end event if this line
    /// closed the function body.
    pub fn observe(&mut self, counts: BraceCounts) -> Option<FunctionEnd> {
        self.brace_depth += counts.opens - counts.closes;

        if self.in_function && counts.closes > 0 && self.brace_depth == 0 {
            self.in_function = false;
            return Some(FunctionEnd {
                name: self.current_function.take(),
            });
        }
        None
    }

    /// A function was entered but its body never closed.
    pub fn is_open(&self) -> bool {
        self.in_function
    }
}
