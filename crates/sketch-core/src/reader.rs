use crate::ast::Value;
use crate::error::SketchError;
use crate::hash_map::SketchMap;
use crate::list::List;
use crate::tokenizer::tokenize;

/// Converts source text into an AST, applying the reader macros (comment
/// stripping and module-lookup expansion).
///
/// If the whole input is a single comment, returns the distinguished
/// `ReadComment` signal so the REPL can print nothing.
pub fn read(source: &str) -> Result<Value, SketchError> {
    let ast = read_with_comments(source)?;
    if let Value::Comment(_) = ast {
        return Err(SketchError::ReadComment);
    }
    let ast = strip_comments(ast);
    Ok(expand_module_lookup(ast))
}

/// Reads without applying reader macros. Comments stay in the tree; the
/// formatter depends on this.
pub fn read_with_comments(source: &str) -> Result<Value, SketchError> {
    let tokens = tokenize(source);
    let mut reader = Reader::new(tokens);
    reader.read_form()
}

struct Reader {
    tokens: Vec<String>,
    position: usize,
}

impl Reader {
    fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Result<&str, SketchError> {
        self.tokens
            .get(self.position)
            .map(|token| token.as_str())
            .ok_or_else(|| SketchError::parse("unexpected end of input"))
    }

    fn next(&mut self) -> Result<String, SketchError> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or_else(|| SketchError::parse("unexpected end of input"))?;
        self.position += 1;
        Ok(token)
    }

    fn read_form(&mut self) -> Result<Value, SketchError> {
        match self.peek()? {
            "(" => {
                self.next()?;
                self.read_list()
            }
            "{" => {
                self.next()?;
                self.read_hash_map()
            }
            _ => self.read_atom(),
        }
    }

    fn read_list(&mut self) -> Result<Value, SketchError> {
        let mut items = Vec::new();
        loop {
            let token = self
                .peek()
                .map_err(|_| SketchError::parse("unexpected end of input inside list"))?;
            if token == ")" {
                self.next()?;
                return Ok(Value::list(items));
            }
            items.push(self.read_form()?);
        }
    }

    fn read_hash_map(&mut self) -> Result<Value, SketchError> {
        let mut items = Vec::new();
        loop {
            let token = self
                .peek()
                .map_err(|_| SketchError::parse("unexpected end of input inside hash map"))?;
            if token == "}" {
                self.next()?;
                let map = SketchMap::from_pairs(&items)?;
                return Ok(Value::HashMap(map));
            }
            items.push(self.read_form()?);
        }
    }

    fn read_atom(&mut self) -> Result<Value, SketchError> {
        let token = self.next()?;

        if token.starts_with(';') {
            let comment = token.trim_start_matches(|ch| ch == ';' || ch == ' ');
            return Ok(Value::Comment(comment.to_string()));
        }

        if let Ok(number) = token.parse::<i64>() {
            return Ok(Value::Int(number));
        }

        match token.as_str() {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "nil" => return Ok(Value::Nil),
            _ => {}
        }

        if token.starts_with('"') {
            if token.len() < 2 || !token.ends_with('"') {
                return Err(SketchError::parse("unclosed string"));
            }
            let interior = &token[1..token.len() - 1];
            return Ok(Value::String(unescape(interior)));
        }

        Ok(Value::Symbol(token))
    }
}

// Escape table: \n, \" and \\. Any other backslash sequence passes through
// as written.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Drops comment values occurring inside lists, recursively. Top-level
/// comments are handled by `read` before this runs.
fn strip_comments(ast: Value) -> Value {
    match ast {
        Value::List(items) => {
            let kept: List = items
                .iter()
                .filter(|item| !matches!(item, Value::Comment(_)))
                .map(|item| strip_comments(item.clone()))
                .collect();
            Value::List(kept)
        }
        other => other,
    }
}

/// Rewrites dotted symbols into module lookups: `string.join` becomes
/// `(module-lookup string join)`. Applies recursively inside lists.
fn expand_module_lookup(ast: Value) -> Value {
    match ast {
        Value::Symbol(ref name) if name.contains('.') => {
            let (module, item) = name.split_once('.').expect("checked above");
            Value::list(vec![
                Value::symbol("module-lookup"),
                Value::symbol(module),
                Value::symbol(item),
            ])
        }
        Value::List(items) => {
            let expanded: List = items
                .iter()
                .map(|item| expand_module_lookup(item.clone()))
                .collect();
            Value::List(expanded)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_format::format_value;

    fn read_to_string(source: &str) -> String {
        format_value(&read(source).unwrap())
    }

    #[test]
    fn reads_atoms() {
        assert_eq!(read_to_string("1"), "1");
        assert_eq!(read_to_string("-42"), "-42");
        assert_eq!(read_to_string("true"), "true");
        assert_eq!(read_to_string("nil"), "nil");
        assert_eq!(read_to_string("abc"), "abc");
    }

    #[test]
    fn reads_lists() {
        assert_eq!(read_to_string("(+ 1 (2 3))"), "(+ 1 (2 3))");
        assert_eq!(read_to_string("()"), "()");
    }

    #[test]
    fn reads_hash_map_literals() {
        assert_eq!(read_to_string("{1 2}"), "{1 2}");
    }

    #[test]
    fn odd_hash_map_entries_error() {
        assert!(read("{1 2 3}").is_err());
    }

    #[test]
    fn unterminated_list_errors() {
        assert!(read("(1 2").is_err());
    }

    #[test]
    fn unclosed_string_errors() {
        assert!(read(r#""unclosed"#).is_err());
    }

    #[test]
    fn escaped_newline_becomes_real_newline() {
        let value = read(r#""a\nb""#).unwrap();
        assert_eq!(value, Value::String("a\nb".to_string()));
    }

    #[test]
    fn escaped_quote_and_backslash() {
        assert_eq!(
            read(r#""a \" b""#).unwrap(),
            Value::String(r#"a " b"#.to_string())
        );
        assert_eq!(
            read(r#""a \\ b""#).unwrap(),
            Value::String(r#"a \ b"#.to_string())
        );
    }

    #[test]
    fn unknown_escapes_pass_through() {
        assert_eq!(
            read(r#""a \t b""#).unwrap(),
            Value::String(r#"a \t b"#.to_string())
        );
    }

    #[test]
    fn comment_only_input_signals_read_comment() {
        assert!(matches!(read("; hello"), Err(SketchError::ReadComment)));
    }

    #[test]
    fn comments_inside_lists_are_stripped() {
        assert_eq!(read_to_string("(1 ; note\n 2)"), "(1 2)");
    }

    #[test]
    fn comments_survive_in_comment_mode() {
        let ast = read_with_comments("(1 ; note\n)").unwrap();
        let items = ast.as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(items.get(1), Some(Value::Comment(_))));
    }

    #[test]
    fn dotted_symbols_expand_to_module_lookup() {
        assert_eq!(
            read_to_string("(string.join x)"),
            "((module-lookup string join) x)"
        );
    }

    #[test]
    fn dotted_symbol_splits_on_first_dot_only() {
        assert_eq!(read_to_string("a.b.c"), "(module-lookup a b.c)");
    }
}
