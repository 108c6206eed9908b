//! The autoformatter's printer. Formatting rules:
//!
//! 1. Indentation is two spaces per level.
//! 2. One blank line between top-level expressions.
//! 3. A top-level comment attaches to the expression below it.
//! 4. A list without comments prints on one line if that line (indent
//!    included) stays under 80 characters; otherwise one item per line.
//! 5. A list containing a comment always prints one item per line; the
//!    comment stays on the same line as the item it follows.

use crate::ast::Value;
use crate::list::List;
use crate::value_format::format_value;

const MAX_LINE: usize = 80;

pub fn pretty_print(ast: &Value) -> String {
    pretty_print_indented(ast, 0)
}

/// Formats a whole file that was read as `(do form…)`: each top-level form
/// on its own, blank-line separated, comments attached above the form that
/// follows them.
pub fn pretty_print_top_level_do(ast: &Value) -> String {
    let Some(items) = ast.as_list() else {
        return pretty_print(ast);
    };
    if items.first().as_symbol() != Some("do") {
        return pretty_print(ast);
    }

    let mut sections: Vec<String> = Vec::new();
    let mut pending_comments: Vec<String> = Vec::new();
    for form in &items.rest() {
        if let Value::Comment(_) = form {
            pending_comments.push(format_value(form));
            continue;
        }
        let mut section = String::new();
        for comment in pending_comments.drain(..) {
            section.push_str(&comment);
            section.push('\n');
        }
        section.push_str(&pretty_print(form));
        sections.push(section);
    }
    // Trailing comments with no following form still get printed.
    if !pending_comments.is_empty() {
        sections.push(pending_comments.join("\n"));
    }
    sections.join("\n\n")
}

fn pretty_print_indented(ast: &Value, indent: usize) -> String {
    match ast {
        Value::List(items) => pretty_print_list(ast, items, indent),
        other => format_value(other),
    }
}

fn pretty_print_list(ast: &Value, items: &List, indent: usize) -> String {
    if items.is_empty() {
        return format_value(ast);
    }

    let contains_comment = items
        .iter()
        .any(|item| matches!(item, Value::Comment(_)));

    // A comment needs the closing paren on a later line, so only
    // comment-free lists may collapse to a single line.
    if !contains_comment {
        let trial = format_value(ast);
        if trial.len() + indent * 2 < MAX_LINE {
            return trial;
        }
    }

    let mut out = String::new();
    out.push('(');
    out.push_str(&format_value(&items.first()));

    let args: Vec<Value> = items.rest().to_vec();
    for (i, arg) in args.iter().enumerate() {
        if let Value::Comment(_) = arg {
            // Inline comments stick to the form they follow.
            out.push(' ');
            out.push_str(&format_value(arg));
            if i == args.len() - 1 {
                out.push('\n');
                out.push_str(&indentation(indent));
            }
            continue;
        }
        out.push('\n');
        out.push_str(&indentation(indent + 1));
        out.push_str(&pretty_print_indented(arg, indent + 1));
    }
    out.push(')');
    out
}

fn indentation(indent: usize) -> String {
    "  ".repeat(indent)
}
