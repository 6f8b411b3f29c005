pub mod build;
pub mod compare;
pub mod run;

use std::fmt;

/// Per-test verdict of the run pipeline. `Differs` and `Failed` are
/// reported outcomes, not tool errors: the test loop stops at the first
/// one but the process still exits zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Differs,
    Failed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Ok => "Ok",
            Verdict::Differs => "Differs",
            Verdict::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}

/// Applies placeholder substitutions to a command template.
///
/// The template is split on whitespace; each token containing a
/// placeholder has every occurrence replaced by literal substring
/// substitution, so surrounding text like `-o$OUTPUT` survives intact.
/// Quoted arguments with embedded spaces are not supported.
pub fn render_command(template: &str, mapping: &[(&str, &str)]) -> Vec<String> {
    template
        .split_whitespace()
        .map(|token| {
            let mut rendered = token.to_string();
            for (placeholder, value) in mapping {
                if rendered.contains(placeholder) {
                    rendered = rendered.replace(placeholder, value);
                }
            }
            rendered
        })
        .collect()
}

/// Prints a captured stream as a labelled diagnostic block on stdout.
pub(crate) fn emit_diagnostic_block(label: &str, content: &str) {
    if !content.is_empty() {
        println!("{label}");
        print!("{content}");
    }
}
