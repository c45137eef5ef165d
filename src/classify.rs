//! Line classifier — decides what kind of C++ line we are looking at.
//!
//! Plain substring checks, evaluated in a fixed priority order. This is a
//! heuristic, not a parser: a `"for ("` inside a string literal still counts
//! as a loop, and a declaration followed by a call on the same line is not
//! recognized as a declaration.

use regex::Regex;
use std::sync::LazyLock;

/// What a single source line looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    FunctionStart,
    IoStatement,
    ControlStatement,
    VariableDeclaration,
    /// Never returned by [`classify`]; raised by the brace tracker.
    FunctionEnd,
    PlainCode,
    ExistingComment,
}

/// Control keywords as they appear with an opening paren.
const CONTROL_PAREN_PATTERNS: &[&str] = &["if (", "else if (", "while (", "for (", "switch ("];

/// Substrings that mark a control statement. `else` and `do` are plain
/// containment checks, so `double` counts too.
const CONTROL_PATTERNS: &[&str] = &["if (", "else if (", "else", "while (", "for (", "switch (", "do"];

const IO_PATTERNS: &[&str] = &["cout", "cin", "printf", "scanf", "getline"];

const TYPE_KEYWORDS: &[&str] = &["int ", "string ", "double ", "float ", "char ", "bool "];

/// Identifier (optionally qualified, or a destructor) right before the first `(`.
static RE_FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:[A-Za-z_]\w*::)*~?[A-Za-z_]\w*)\s*\(").unwrap());

/// Classify one line (without its trailing newline).
pub fn classify(line: &str) -> LineClass {
    if is_existing_comment(line) {
        LineClass::ExistingComment
    } else if is_function_start(line) {
        LineClass::FunctionStart
    } else if is_io_statement(line) {
        LineClass::IoStatement
    } else if is_control_statement(line) {
        LineClass::ControlStatement
    } else if is_variable_declaration(line) {
        LineClass::VariableDeclaration
    } else {
        LineClass::PlainCode
    }
}

/// `//` or `/*` at offset 0. Indented comments do not count.
pub fn is_existing_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*")
}

/// Has both parens, no `;`, and is neither a control structure nor a
/// `cout`/`cin` line.
pub fn is_function_start(line: &str) -> bool {
    if !line.contains('(') || !line.contains(')') {
        return false;
    }
    if line.contains(';') {
        return false;
    }
    if CONTROL_PAREN_PATTERNS.iter().any(|p| line.contains(*p)) || starts_with_bare_control(line) {
        return false;
    }
    !(line.contains("cout") || line.contains("cin"))
}

pub fn is_io_statement(line: &str) -> bool {
    IO_PATTERNS.iter().any(|p| line.contains(*p))
}

pub fn is_control_statement(line: &str) -> bool {
    CONTROL_PATTERNS.iter().any(|p| line.contains(*p))
}

/// A primitive type keyword, a `;`, and no `(`.
pub fn is_variable_declaration(line: &str) -> bool {
    TYPE_KEYWORDS.iter().any(|k| line.contains(*k)) && line.contains(';') && !line.contains('(')
}

/// `else` / `do` leading the line, after indentation and an optional `}`.
fn starts_with_bare_control(line: &str) -> bool {
    let rest = line.trim_start().trim_start_matches('}').trim_start();
    ["else", "do"].iter().any(|kw| {
        rest.strip_prefix(*kw)
            .is_some_and(|after| !after.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_'))
    })
}

/// Best guess at the function name declared on a FunctionStart line.
///
/// `int CCounter::GetValue()` → `CCounter::GetValue`.
pub fn guess_function_name(line: &str) -> Option<String> {
    RE_FUNCTION_NAME
        .captures(line)
        .map(|caps| caps[1].to_string())
}

/// Leading whitespace of a line, reused to indent inserted comments.
pub fn leading_indent(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
