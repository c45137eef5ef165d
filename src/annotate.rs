//! Annotation loop — classify each line, ask, write.
//!
//! One line is fully handled (classified, possibly annotated, written) before
//! the next one is looked at. The tracker state lives here and nowhere else.

use crate::classify::{self, LineClass};
use crate::prompt::Prompter;
use crate::render::{self, FunctionAnnotation, Parameter};
use crate::tracker::{BraceCounter, BracePolicy, FunctionEnd, TrackerState};
use std::io::{self, Write};
use tracing::debug;

/// What happened during one pass over a file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub functions: usize,
    pub function_headers: usize,
    pub line_comments: usize,
    pub end_markers: usize,
    /// A function body was still open when the input ran out.
    pub open_at_eof: bool,
}

/// Prompts for the single-line comment kinds.
struct LineCommentKind {
    found: &'static str,
    confirm: &'static str,
    ask: &'static str,
}

const VARIABLE_COMMENT: LineCommentKind = LineCommentKind {
    found: "Found variable",
    confirm: "Add variable comment? (y/n): ",
    ask: "What is this variable for? ",
};

const IO_COMMENT: LineCommentKind = LineCommentKind {
    found: "Found input/output",
    confirm: "Add input/output comment? (y/n): ",
    ask: "What does this input/output do? ",
};

const CONTROL_COMMENT: LineCommentKind = LineCommentKind {
    found: "Found control statement",
    confirm: "Add control statement comment? (y/n): ",
    ask: "What does this control statement do? ",
};

/// Annotate `source`, writing the result to `out`.
///
/// Lines are copied byte for byte, line endings included; only the
/// classifier sees a lossy UTF-8 view. Generated comments use the line
/// ending of the line they are attached to.
///
/// Prompts go through `prompter`; only I/O failures (writing, or input that
/// ended while an answer was required) abort the pass.
pub fn annotate<P: Prompter, W: Write>(
    source: &[u8],
    prompter: &mut P,
    out: &mut W,
    policy: BracePolicy,
) -> io::Result<Summary> {
    let mut annotator = Annotator {
        prompter,
        out,
        state: TrackerState::new(),
        braces: BraceCounter::new(policy),
        summary: Summary::default(),
    };

    for (idx, raw) in source.split_inclusive(|&b| b == b'\n').enumerate() {
        annotator.process_line(idx + 1, &SourceLine::split(raw))?;
    }

    annotator.finish()
}

/// One input line: its bytes without the terminator, and the terminator.
struct SourceLine<'a> {
    body: &'a [u8],
    eol: &'a [u8],
}

impl<'a> SourceLine<'a> {
    fn split(raw: &'a [u8]) -> Self {
        let cut = if raw.ends_with(b"\r\n") {
            raw.len() - 2
        } else if raw.ends_with(b"\n") {
            raw.len() - 1
        } else {
            raw.len()
        };
        let (body, eol) = raw.split_at(cut);
        SourceLine { body, eol }
    }

    /// Ending for generated lines; a final unterminated line gets `\n`.
    fn newline(&self) -> &'a [u8] {
        if self.eol.is_empty() {
            b"\n"
        } else {
            self.eol
        }
    }
}

struct Annotator<'a, P, W> {
    prompter: &'a mut P,
    out: &'a mut W,
    state: TrackerState,
    braces: BraceCounter,
    summary: Summary,
}

impl<P: Prompter, W: Write> Annotator<'_, P, W> {
    fn process_line(&mut self, line_no: usize, src: &SourceLine<'_>) -> io::Result<()> {
        self.summary.lines += 1;
        let text = String::from_utf8_lossy(src.body);
        let line: &str = &text;
        let class = classify::classify(line);
        debug!(line_no, ?class, depth = self.state.brace_depth, "classified");

        match class {
            LineClass::ExistingComment => {
                self.braces.skip(line);
                self.out.write_all(src.body)?;
                return self.out.write_all(src.eol);
            }
            LineClass::FunctionStart => self.handle_function_start(line, src.newline())?,
            LineClass::VariableDeclaration => {
                self.handle_line_comment(line, src.newline(), &VARIABLE_COMMENT)?
            }
            LineClass::IoStatement => self.handle_line_comment(line, src.newline(), &IO_COMMENT)?,
            LineClass::ControlStatement => {
                self.handle_line_comment(line, src.newline(), &CONTROL_COMMENT)?
            }
            LineClass::PlainCode | LineClass::FunctionEnd => {}
        }

        self.out.write_all(src.body)?;

        let counts = self.braces.count(line);
        if let Some(end) = self.state.observe(counts) {
            debug!(line_no, class = ?LineClass::FunctionEnd, name = ?end.name, "function body closed");
            if let Some(name) = self.end_marker_name(line, end)? {
                let nl = src.newline();
                self.out.write_all(render::end_marker(&name).as_bytes())?;
                self.out.write_all(&[nl, nl, nl].concat())?;
                self.summary.end_markers += 1;
                return Ok(());
            }
        }
        self.out.write_all(src.eol)
    }

    /// Write generated text, switching its `\n` endings to `nl`.
    fn write_generated(&mut self, text: &str, nl: &[u8]) -> io::Result<()> {
        if nl == b"\n" {
            return self.out.write_all(text.as_bytes());
        }
        for piece in text.split_inclusive('\n') {
            match piece.strip_suffix('\n') {
                Some(body) => {
                    self.out.write_all(body.as_bytes())?;
                    self.out.write_all(nl)?;
                }
                None => self.out.write_all(piece.as_bytes())?,
            }
        }
        Ok(())
    }

    fn handle_function_start(&mut self, line: &str, nl: &[u8]) -> io::Result<()> {
        self.summary.functions += 1;
        self.prompter.say(&format!("Found function: {}", line))?;

        let name = if self.prompter.ask_yes_no("Add function comment? (y/n): ")? {
            let ann = self.collect_annotation(line)?;
            self.write_generated(&render::function_header(&ann), nl)?;
            self.summary.function_headers += 1;
            Some(ann.name)
        } else {
            None
        };
        self.prompter.say("")?;

        self.state.enter_function(name);
        Ok(())
    }

    fn collect_annotation(&mut self, line: &str) -> io::Result<FunctionAnnotation> {
        let guess = classify::guess_function_name(line);
        let name_prompt = match guess {
            Some(ref g) => format!("Enter function name [{}]: ", g),
            None => "Enter function name: ".to_string(),
        };
        let mut name = self.prompter.ask_text(&name_prompt)?;
        if name.is_empty() {
            name = guess.unwrap_or_default();
        }

        let description = self.prompter.ask_text("What does this function do? ")?;

        let parameter = if self
            .prompter
            .ask_yes_no("Does this function have parameters? (y/n): ")?
        {
            let param_name = self.prompter.ask_text("Enter parameter name: ")?;
            let param_desc = self
                .prompter
                .ask_text(&format!("What does '{}' do? ", param_name))?;
            let mode = self.prompter.ask_parameter_mode(&param_name)?;
            Some(Parameter {
                name: param_name,
                mode,
                description: param_desc,
            })
        } else {
            None
        };

        let returns = self
            .prompter
            .ask_text("What does this function return? (or Enter for void): ")?;

        Ok(FunctionAnnotation {
            name,
            description,
            parameter,
            returns,
        })
    }

    fn handle_line_comment(
        &mut self,
        line: &str,
        nl: &[u8],
        kind: &LineCommentKind,
    ) -> io::Result<()> {
        self.prompter.say(&format!("{}: {}", kind.found, line))?;
        if self.prompter.ask_yes_no(kind.confirm)? {
            let text = self.prompter.ask_text(kind.ask)?;
            if !text.is_empty() {
                write!(self.out, "{}// {}", classify::leading_indent(line), text)?;
                self.out.write_all(nl)?;
                self.summary.line_comments += 1;
            }
        }
        self.prompter.say("")
    }

    /// Name for the end-of-function marker, or `None` to leave the line bare.
    fn end_marker_name(&mut self, line: &str, end: FunctionEnd) -> io::Result<Option<String>> {
        self.prompter
            .say(&format!("Found end of function: {}", line))?;
        match end.name {
            Some(name) => {
                let confirm = format!("Add end-of-function comment for \"{}\"? (y/n): ", name);
                Ok(self.prompter.ask_yes_no(&confirm)?.then_some(name))
            }
            None => {
                let name = self
                    .prompter
                    .ask_text("Enter function name for this closing brace (or Enter to skip): ")?;
                Ok((!name.is_empty()).then_some(name))
            }
        }
    }

    fn finish(mut self) -> io::Result<Summary> {
        if self.state.is_open() {
            debug!(
                name = ?self.state.current_function,
                depth = self.state.brace_depth,
                "function still open at end of input"
            );
            self.summary.open_at_eof = true;
        }
        self.out.flush()?;
        Ok(self.summary)
    }
}
