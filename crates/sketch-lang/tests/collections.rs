mod common;

use common::{run_tests, TestCase};

#[test]
fn test_fold() {
    run_tests(&[
        TestCase {
            name: "fold left",
            input: "(fold-left + 0 (list 1 2 3 4))",
            expected: "10",
        },
        TestCase {
            name: "reduce",
            input: "(reduce + (list 1 2 3 4))",
            expected: "10",
        },
    ]);
}

#[test]
fn test_map() {
    run_tests(&[
        TestCase {
            name: "map add1",
            input: "(map (fn (x) (+ x 1)) (list 1 2 3 4 5))",
            expected: "(2 3 4 5 6)",
        },
        TestCase {
            name: "map over the empty list",
            input: "(map (fn (x) x) ())",
            expected: "()",
        },
    ]);
}

#[test]
fn test_filter() {
    run_tests(&[TestCase {
        name: "filter even",
        input: "(filter (fn (x) (= (modulo x 2) 0)) (list 1 2 3 4 5 6))",
        expected: "(2 4 6)",
    }]);
}

#[test]
fn test_list_primitives() {
    run_tests(&[
        TestCase {
            name: "cons prepends",
            input: "(cons 1 (quote (2 3)))",
            expected: "(1 2 3)",
        },
        TestCase {
            name: "first of cons is the consed item",
            input: "(first (cons 1 (list 2 3)))",
            expected: "1",
        },
        TestCase {
            name: "rest of cons is the original list",
            input: "(rest (cons 1 (list 2 3)))",
            expected: "(2 3)",
        },
        TestCase {
            name: "cons of first and rest rebuilds the list",
            input: "(cons (first (list 1 2 3)) (rest (list 1 2 3)))",
            expected: "(1 2 3)",
        },
        TestCase {
            name: "concat joins lists",
            input: "(concat (list 1 2) (list 3 4))",
            expected: "(1 2 3 4)",
        },
        TestCase {
            name: "first of string",
            input: "(first \"abc\")",
            expected: "\"a\"",
        },
        TestCase {
            name: "rest of string",
            input: "(rest \"abc\")",
            expected: "\"bc\"",
        },
        TestCase {
            name: "first of nil is nil",
            input: "(first nil)",
            expected: "nil",
        },
        TestCase {
            name: "count of a list",
            input: "(count (list 1 2 3))",
            expected: "3",
        },
        TestCase {
            name: "count of an int is zero",
            input: "(count 1)",
            expected: "0",
        },
        TestCase {
            name: "nth indexes into a list",
            input: "(nth (list 1 2 3) 1)",
            expected: "2",
        },
        TestCase {
            name: "length of a string counts characters",
            input: "(length \"abcd\")",
            expected: "4",
        },
        TestCase {
            name: "empty? on the empty list",
            input: "(empty? ())",
            expected: "true",
        },
    ]);
}

#[test]
fn test_string_to_list() {
    run_tests(&[
        TestCase {
            name: "string without spaces",
            input: "(string-to-list \"abc\")",
            expected: "(\"a\" \"b\" \"c\")",
        },
        TestCase {
            name: "empty string",
            input: "(string-to-list \"\")",
            expected: "()",
        },
    ]);
}

#[test]
fn test_cond() {
    run_tests(&[
        TestCase {
            name: "empty cond",
            input: "(macroexpand (cond))",
            expected: "nil",
        },
        TestCase {
            name: "cond expands to nested ifs",
            input: "(macroexpand (cond (false 1) (true 2)))",
            expected: "(if false 1 (cond (true 2)))",
        },
        TestCase {
            name: "cond picks the first truthy clause",
            input: "(cond (false 1) (true 2))",
            expected: "2",
        },
    ]);
}

#[test]
fn test_apply() {
    run_tests(&[TestCase {
        name: "apply spreads a list into a call",
        input: "(apply + (list 1 2 3))",
        expected: "6",
    }]);
}

#[test]
fn test_prelude_helpers() {
    run_tests(&[
        TestCase {
            name: "not inverts truthiness",
            input: "(not nil)",
            expected: "true",
        },
        TestCase {
            name: "second",
            input: "(second (list 1 2 3))",
            expected: "2",
        },
        TestCase {
            name: "inc",
            input: "(inc 41)",
            expected: "42",
        },
        TestCase {
            name: "dec",
            input: "(dec 43)",
            expected: "42",
        },
    ]);
}
