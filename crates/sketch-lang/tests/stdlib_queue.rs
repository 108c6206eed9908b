mod common;

use common::{run_tests_with_imports, TestCase};

#[test]
fn test_queue() {
    run_tests_with_imports(
        &[
            TestCase {
                name: "new queue",
                input: "(queue.new 1 2 3)",
                expected: "((1 2 3) ())",
            },
            TestCase {
                name: "queue put",
                input: "(queue.put (queue.new) 1)",
                expected: "(() (1))",
            },
            TestCase {
                name: "queue head, with items there",
                input: "(queue.head (queue.new 2))",
                expected: "2",
            },
            TestCase {
                name: "queue head, force rebalance",
                input: "(queue.head (queue.put (queue.new) 1))",
                expected: "1",
            },
            TestCase {
                name: "queue tail, with items there",
                input: "(queue.tail (queue.new 1 2))",
                expected: "((2) ())",
            },
            TestCase {
                name: "queue tail, force rebalance",
                input: "(queue.tail (queue.put (queue.put (queue.new) 1) 2))",
                expected: "((2) ())",
            },
        ],
        &["queue"],
    );
}
