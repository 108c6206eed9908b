mod common;

use common::{run_tests_with_imports, TestCase};

#[test]
fn test_string_join() {
    run_tests_with_imports(
        &[
            TestCase {
                name: "string.join joins strings",
                input: "(string.join (list \"a\" \"b\") \"-\")",
                expected: "\"a-b\"",
            },
            TestCase {
                name: "string.join returns the element if one element in list",
                input: "(string.join (list \"hello\") \"-\")",
                expected: "\"hello\"",
            },
            TestCase {
                name: "string.join returns empty string for empty list",
                input: "(string.join () \"-\")",
                expected: "\"\"",
            },
        ],
        &["string"],
    );
}

#[test]
fn test_string_split() {
    run_tests_with_imports(
        &[
            TestCase {
                name: "string.split splits on a separator",
                input: "(string.split \"a-b\" \"-\")",
                expected: "(\"a\" \"b\")",
            },
            TestCase {
                name: "string.split with empty separator splits into characters",
                input: "(string.split \"a-b\" \"\")",
                expected: "(\"a\" \"-\" \"b\")",
            },
        ],
        &["string"],
    );
}

#[test]
fn test_string_fields() {
    run_tests_with_imports(
        &[TestCase {
            name: "string.fields splits on whitespace runs",
            input: "(string.fields \"  a b\tc \")",
            expected: "(\"a\" \"b\" \"c\")",
        }],
        &["string"],
    );
}
