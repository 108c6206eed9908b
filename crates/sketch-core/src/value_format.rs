use crate::ast::Value;
use crate::hash_map::SketchMap;
use crate::list::List;

/// Renders a value in its printed form. These forms are bit-stable: the
/// docstring test runner compares against them, and for data values
/// `read(format_value(v))` reproduces `v`.
pub fn format_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Nil => out.push_str("nil"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            out.push('"');
            out.push_str(&escape_string_fragment(s));
            out.push('"');
        }
        Value::Symbol(s) => out.push_str(s),
        Value::Comment(text) => {
            out.push_str("; ");
            out.push_str(text);
        }
        Value::List(items) => write_list(out, items),
        Value::HashMap(map) => write_map(out, map),
        Value::Func(_) | Value::Lambda(_) => out.push_str("#<function>"),
        Value::Module(_) => out.push_str("#<module>"),
    }
}

fn write_list(out: &mut String, items: &List) {
    out.push('(');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        write_value(out, item);
    }
    out.push(')');
}

fn write_map(out: &mut String, map: &SketchMap) {
    out.push('{');
    for (idx, (key, value)) in map.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        write_value(out, &key.to_value());
        out.push(' ');
        write_value(out, value);
    }
    out.push('}');
}

/// Re-encodes the escapes the reader decodes, so printed strings re-read to
/// the same value.
pub fn escape_string_fragment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}
