use sketch_core::builtins::root_env;
use sketch_core::rep;

// All these tests take the same form: evaluate the input in a fresh root
// environment and compare the printed result.
pub struct TestCase {
    pub name: &'static str,
    pub input: &'static str,
    pub expected: &'static str,
}

#[allow(dead_code)]
pub fn run_tests(cases: &[TestCase]) {
    run_tests_with_imports(cases, &[]);
}

#[allow(dead_code)]
pub fn run_tests_with_imports(cases: &[TestCase], imports: &[&str]) {
    for case in cases {
        let env = root_env().expect("root environment builds");
        for module in imports {
            rep(&format!("(import \"{}\")", module), &env)
                .unwrap_or_else(|err| panic!("importing {}: {}", module, err));
        }
        let actual = rep(case.input, &env)
            .unwrap_or_else(|err| panic!("{}: evaluating {}: {}", case.name, case.input, err))
            .unwrap_or_default();
        assert_eq!(actual, case.expected, "{}", case.name);
    }
}

#[allow(dead_code)]
pub fn expect_error(input: &str) -> sketch_core::SketchError {
    let env = root_env().expect("root environment builds");
    match rep(input, &env) {
        Err(err) => err,
        Ok(result) => panic!("expected {} to fail, got {:?}", input, result),
    }
}
