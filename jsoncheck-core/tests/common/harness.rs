//! Test harness for running fixture cases with stochastic variations

use crate::common::{Gen, TestCase};
use jsoncheck_core::{parse, Lexer, TokenKind};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Error kind names for a parse, empty on success
pub fn error_names(input: &str) -> Vec<String> {
    match parse(input) {
        Ok(_) => Vec::new(),
        Err(errors) => errors.iter().map(|e| e.kind.name().to_string()).collect(),
    }
}

fn compare(input: String, expected: &[String], seed: u64) -> TestResult {
    let actual = error_names(&input);
    let mut errors = Vec::new();

    if actual.len() != expected.len() {
        errors.push(format!(
            "Error count mismatch: expected {}, got {}",
            expected.len(),
            actual.len()
        ));
    }
    for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
        if act != exp {
            errors.push(format!("Error {}: expected '{}', got '{}'", i, exp, act));
        }
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        expected: expected.to_vec(),
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    compare(case.json.clone(), &case.errors, 0)
}

/// Run test with whitespace injected between tokens.
///
/// Keeps every original gap and adds a random run of whitespace before,
/// between and after the tokens. Returns `None` for inputs the lexer does
/// not scan completely, where there is no token stream to re-space.
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> Option<TestResult> {
    let source = case.json.as_str();
    let scanned = Lexer::new(source).scan();
    if scanned.halt.is_some() || scanned.tokens.iter().any(|t| t.is(TokenKind::EmptyString)) {
        return None;
    }

    let mut input = gen.whitespace();
    let mut last = 0;
    for token in &scanned.tokens {
        let range = token.span.range();
        input.push_str(&source[last..range.start]);
        input.push_str(&gen.whitespace());
        input.push_str(&source[range.clone()]);
        last = range.end;
    }
    input.push_str(&source[last..]);
    input.push_str(&gen.whitespace());

    Some(compare(input, &case.errors, gen.seed))
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!(
            "Seed: {} (set JSONCHECK_TEST_SEED={} to reproduce)",
            self.seed, self.seed
        );
        eprintln!("\nInput:");
        eprintln!("{}", self.input);
        eprintln!("\nExpected errors: {:?}", self.expected);
        eprintln!("Actual errors:   {:?}", self.actual);
        eprintln!("\nMismatches:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
