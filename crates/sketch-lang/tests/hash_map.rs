mod common;

use common::{expect_error, run_tests, TestCase};

#[test]
fn test_hash_map() {
    run_tests(&[
        TestCase {
            name: "hash map literal",
            input: "{1 2}",
            expected: "{1 2}",
        },
        TestCase {
            name: "hash map set",
            input: "(do (def h {}) (hashmap-set h 1 2))",
            expected: "{1 2}",
        },
        TestCase {
            name: "hash map set twice",
            input: "(do (def h {}) (def h (hashmap-set h 1 2)) (hashmap-set h 3 4))",
            expected: "{1 2 3 4}",
        },
        TestCase {
            name: "set returns a new map without mutating the receiver",
            input: "(do (def h {1 2}) (hashmap-set h 3 4) h)",
            expected: "{1 2}",
        },
        TestCase {
            name: "hash map get",
            input: "(hashmap-get {1 2} 1)",
            expected: "2",
        },
        TestCase {
            name: "hash map get of a missing key is nil",
            input: "(hashmap-get {1 2} 9)",
            expected: "nil",
        },
        TestCase {
            name: "hash map keys",
            input: "(hashmap-keys {1 2 3 4})",
            expected: "(1 3)",
        },
        TestCase {
            name: "hash map values",
            input: "(hashmap-values {1 2 3 4})",
            expected: "(2 4)",
        },
        TestCase {
            name: "hash map values are evaluated, keys are not",
            input: "{1 (+ 1 1)}",
            expected: "{1 2}",
        },
        TestCase {
            name: "string and bool keys",
            input: "{\"k\" 1 true 2}",
            expected: "{\"k\" 1 true 2}",
        },
    ]);
}

#[test]
fn test_odd_hash_map_literal_errors() {
    expect_error("{1 2 3}");
}

#[test]
fn test_restricted_keys_error() {
    expect_error("(hashmap-set {} (fn (x) x) 1)");
    expect_error("(hashmap-set {} {} 1)");
}
