//! Fixed-format comment blocks: file header, function header, end marker.

use std::fmt;

/// Closing rule shared by the file and function headers.
const RULE: &str = "// ============================================================================";

/// Target width of the function banner line.
const BANNER_WIDTH: usize = 80;

/// `"// ==== "` before the name plus the single space after it.
const BANNER_FIXED: usize = 9;

/// Data-flow direction of a documented parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    In,
    Out,
    InOut,
}

impl ParamMode {
    /// Parse the exact literal the user must type. No trimming, no case folding.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "IN" => Some(Self::In),
            "OUT" => Some(Self::Out),
            "IN/OUT" => Some(Self::InOut),
            _ => None,
        }
    }
}

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::InOut => "IN/OUT",
        })
    }
}

/// The single documented parameter of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub mode: ParamMode,
    pub description: String,
}

/// Everything needed to render a function header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionAnnotation {
    pub name: String,
    pub description: String,
    /// Only one parameter can be documented.
    pub parameter: Option<Parameter>,
    /// Empty means nothing is returned (no Output section).
    pub returns: String,
}

/// Fields of the file header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    pub file_name: String,
    pub date: String,
    pub project: String,
    pub description: String,
    pub programmer: Option<String>,
    pub course: Option<String>,
    pub class_time: Option<String>,
    pub instructor: Option<String>,
}

/// Number of `=` after the function name. Long names get none.
pub fn banner_padding(name: &str) -> usize {
    BANNER_WIDTH.saturating_sub(BANNER_FIXED + name.chars().count())
}

/// Render the function header block, blank lines included.
pub fn function_header(ann: &FunctionAnnotation) -> String {
    let mut out = String::new();
    out.push_str("\n\n");
    out.push_str(&format!(
        "// ==== {} {}\n",
        ann.name,
        "=".repeat(banner_padding(&ann.name))
    ));
    out.push_str("//\n");
    out.push_str(&format!("// {}\n", ann.description));
    out.push_str("//\n");

    if let Some(ref param) = ann.parameter {
        out.push_str("// Input:\n");
        out.push_str(&format!(
            "//      {} [{}] -- {}\n",
            param.name, param.mode, param.description
        ));
        out.push_str("//\n");
    }

    if !ann.returns.is_empty() {
        out.push_str("// Output:\n");
        out.push_str(&format!("//      {}\n", ann.returns));
        out.push_str("//\n");
    }

    out.push_str(RULE);
    out.push_str("\n\n");
    out
}

/// Render the file header block. Unset identity fields are left out.
pub fn file_header(header: &FileHeader) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("// file: {}\n", header.file_name));
    out.push_str(RULE);
    out.push('\n');

    if let Some(ref programmer) = header.programmer {
        out.push_str(&format!("// Programmer: {}\n", programmer));
    }
    out.push_str(&format!("// Date: {}\n", header.date));
    if let Some(ref course) = header.course {
        out.push_str(&format!("// Class: {}\n", course));
    }
    if let Some(ref time) = header.class_time {
        out.push_str(&format!("// Time: {}\n", time));
    }
    if let Some(ref instructor) = header.instructor {
        out.push_str(&format!("// Instructor: {}\n", instructor));
    }
    out.push_str(&format!("// Project: {}\n", header.project));
    out.push_str("//\n");
    out.push_str("// Description:\n");
    out.push_str(&format!("//      {}\n", header.description));
    out.push_str("//\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out
}

/// Trailing comment appended to a function's closing brace line.
pub fn end_marker(name: &str) -> String {
    format!("  // end of \"{}\"", name)
}
