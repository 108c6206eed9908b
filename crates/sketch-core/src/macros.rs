//! Macro expansion and the quasiquote templating algorithm.

use crate::ast::Value;
use crate::env::EnvRef;
use crate::error::SketchError;
use crate::eval::apply_function;

/// True iff `ast` is a non-empty list whose head symbol resolves to an
/// interpreted function flagged as a macro.
pub fn is_macro_call(ast: &Value, env: &EnvRef) -> bool {
    let Some(items) = ast.as_list() else {
        return false;
    };
    let Some(name) = items.first().as_symbol().map(str::to_string) else {
        return false;
    };
    match env.read().unwrap().get(&name) {
        Some(Value::Lambda(lambda)) => lambda.is_macro,
        _ => false,
    }
}

/// Repeatedly applies macros at the head of `ast` until none remain. The
/// macro function receives the list's tail unevaluated and its return value
/// replaces the whole form.
pub fn macro_expand(mut ast: Value, env: &EnvRef) -> Result<Value, SketchError> {
    while is_macro_call(&ast, env) {
        let items = ast.as_list().expect("checked by is_macro_call");
        let name = items
            .first()
            .as_symbol()
            .expect("checked by is_macro_call")
            .to_string();
        let macro_fn = env
            .read()
            .unwrap()
            .get(&name)
            .expect("checked by is_macro_call");
        let args = items.rest().to_vec();
        ast = apply_function(&macro_fn, &args)?;
    }
    Ok(ast)
}

/// Builds the unevaluated form which, when evaluated, reconstructs `ast`
/// with `unquote` holes filled in and `splice-unquote` lists spliced.
///
/// Non-lists quote themselves; `(unquote x)` becomes `x`; otherwise the
/// list is folded from the right into nested `cons`/`concat` calls.
pub fn quasiquote(ast: &Value) -> Value {
    let Some(items) = ast.as_list() else {
        return Value::list(vec![Value::symbol("quote"), ast.clone()]);
    };

    if items.is_empty() {
        return ast.clone();
    }

    if items.first().as_symbol() == Some("unquote") {
        return items.rest().first();
    }

    let mut acc = Value::empty_list();
    let elements = items.to_vec();
    for element in elements.iter().rev() {
        if let Some(spliced) = splice_unquote_arg(element) {
            acc = Value::list(vec![Value::symbol("concat"), spliced, acc]);
        } else {
            acc = Value::list(vec![Value::symbol("cons"), quasiquote(element), acc]);
        }
    }
    acc
}

fn splice_unquote_arg(ast: &Value) -> Option<Value> {
    let items = ast.as_list()?;
    if items.first().as_symbol() == Some("splice-unquote") {
        return Some(items.rest().first());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;
    use crate::value_format::format_value;

    fn quasiquote_to_string(source: &str) -> String {
        let ast = read(source).unwrap();
        format_value(&quasiquote(&ast))
    }

    #[test]
    fn non_lists_are_quoted() {
        assert_eq!(quasiquote_to_string("a"), "(quote a)");
        assert_eq!(quasiquote_to_string("7"), "(quote 7)");
    }

    #[test]
    fn empty_list_is_unchanged() {
        assert_eq!(quasiquote_to_string("()"), "()");
    }

    #[test]
    fn unquote_inserts_the_expression() {
        assert_eq!(quasiquote_to_string("(unquote a)"), "a");
    }

    #[test]
    fn lists_fold_into_cons_chains() {
        assert_eq!(
            quasiquote_to_string("(a b)"),
            "(cons (quote a) (cons (quote b) ()))"
        );
    }

    #[test]
    fn splice_unquote_folds_into_concat() {
        assert_eq!(
            quasiquote_to_string("((splice-unquote xs) b)"),
            "(concat xs (cons (quote b) ()))"
        );
    }

    #[test]
    fn nested_unquote_inside_list() {
        assert_eq!(
            quasiquote_to_string("(a (unquote b))"),
            "(cons (quote a) (cons b ()))"
        );
    }
}
