//! Few-shot prompt assembly for the model source
//!
//! The rendered text is sent as the model's input and is also the exact
//! delimiter the extractor splits the generated text on, so the layout here
//! has to stay byte-stable.

use crate::store::Example;

/// Header line naming the task domain for the model
pub const CONTEXT_HEADER: &str = "Linux bash command to accomplish the task";

/// Render the query context: header, one block per stored example, then the
/// new query as a final unanswered `# <query>` line.
///
/// ```text
/// Linux bash command to accomplish the task
///
/// # list files
/// ls -la
///
/// # <new query>
/// ```
///
/// Lines are joined with `\n` and the text carries no trailing newline; the
/// model continues right after the last line.
pub fn render(examples: &[Example], query: &str) -> String {
    let mut lines = vec![CONTEXT_HEADER.to_string()];

    for example in examples {
        lines.push(String::new());
        lines.push(format!("# {}", example.query));
        lines.push(example.command.clone());
    }

    lines.push(String::new());
    lines.push(format!("# {}", query));

    lines.join("\n")
}
