//! Literal and comment stripping for C++ lines.
//!
//! Used by the code-only brace policy: blanks out string literals, character
//! literals, `//` comments and `/* */` comments so only braces that belong to
//! the program structure are counted. Block comments may span lines, so the
//! scanner carries that one bit of state between calls.
//!
//! Raw string literals (`R"(...)"`) and digit separators (`1'000`) are not
//! understood.

/// Line-by-line scanner that keeps track of open block comments.
#[derive(Debug, Default)]
pub struct CodeScanner {
    in_block_comment: bool,
}

impl CodeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the code portion of `line` with literals and comments removed.
    pub fn code_only(&mut self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if ch == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            match (ch, next) {
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    self.in_block_comment = true;
                    i += 2;
                }
                ('"', _) | ('\'', _) => {
                    i = skip_literal(&chars, i);
                }
                _ => {
                    out.push(ch);
                    i += 1;
                }
            }
        }
        out
    }
}

/// Skip a quoted literal starting at `start`, honoring backslash escapes.
/// Returns the index just past the closing quote, or the line end if the
/// literal is unterminated.
fn skip_literal(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}
