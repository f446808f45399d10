use std::fs;
use std::path::{Path, PathBuf};

use flow_lang::ast::render;

/// Find all test directories in tests/parse/
fn find_parse_tests() -> Vec<PathBuf> {
    let parse_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/parse");
    let mut test_dirs = Vec::new();

    if let Ok(entries) = fs::read_dir(parse_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            // Check if it has a main.flow file
            if path.is_dir() && path.join("main.flow").exists() {
                test_dirs.push(path);
            }
        }
    }

    test_dirs.sort();
    test_dirs
}

/// Run a single test case
///
/// A case either parses and matches expected_ast.txt, or is rejected with the
/// message in expected_error.txt.
fn run_test_case(test_dir: &Path) -> Result<(), String> {
    let test_name = test_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let source = fs::read_to_string(test_dir.join("main.flow"))
        .map_err(|e| format!("Test '{}': failed to read main.flow: {}", test_name, e))?;

    let expected_ast_file = test_dir.join("expected_ast.txt");
    let expected_error_file = test_dir.join("expected_error.txt");

    let (expected, actual) = if expected_ast_file.exists() {
        let expected = fs::read_to_string(&expected_ast_file)
            .map_err(|e| format!("Test '{}': failed to read expected_ast.txt: {}", test_name, e))?;
        let actual = match flow_lang::parse(&source) {
            Ok(statements) => render(&statements),
            Err(e) => return Err(format!("Test '{}': parse failed: {}", test_name, e)),
        };
        (expected, actual)
    } else if expected_error_file.exists() {
        let expected = fs::read_to_string(&expected_error_file).map_err(|e| {
            format!("Test '{}': failed to read expected_error.txt: {}", test_name, e)
        })?;
        let actual = match flow_lang::parse(&source) {
            Ok(statements) => {
                return Err(format!(
                    "Test '{}': expected a syntax error, got:\n{}",
                    test_name,
                    render(&statements)
                ));
            }
            Err(e) => e.to_string(),
        };
        (expected, actual)
    } else {
        return Err(format!(
            "Test '{}': expected_ast.txt or expected_error.txt not found",
            test_name
        ));
    };

    if actual.trim() != expected.trim() {
        return Err(format!(
            "Test '{}': output mismatch\nExpected:\n{}\nActual:\n{}",
            test_name,
            expected.trim(),
            actual.trim()
        ));
    }

    Ok(())
}

#[test]
fn test_parse_fixtures() {
    let test_dirs = find_parse_tests();

    if test_dirs.is_empty() {
        panic!("No parse tests found in tests/parse/");
    }

    let mut failures = Vec::new();

    for test_dir in &test_dirs {
        if let Err(e) = run_test_case(test_dir) {
            failures.push(e);
        }
    }

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("  {}", failure);
        }
        panic!("{} of {} parse test(s) failed", failures.len(), test_dirs.len());
    }
}

// Individual tests for specific cases - makes it easier to run one case
#[test]
fn test_parse_dispatch() {
    let test_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/parse/dispatch");
    if let Err(e) = run_test_case(&test_dir) {
        panic!("{}", e);
    }
}

#[test]
fn test_parse_with_limits() {
    let limits = flow_lang::ParserLimits {
        max_token_count: 4,
        ..flow_lang::ParserLimits::default()
    };
    assert_eq!(flow_lang::parse_with_limits("x = a ;", &limits).unwrap().len(), 1);

    let err = flow_lang::parse_with_limits("x = a -> b ;", &limits).unwrap_err();
    assert!(err.message.contains("Token limit exceeded"));
}

#[test]
fn test_parses_are_independent_across_threads() {
    let sources = ["x = a -> b ;", "import f : A -> B ;", "y = { 1 : c } ;"];
    let handles: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = source.to_string();
            std::thread::spawn(move || render(&flow_lang::parse(&source).unwrap()))
        })
        .collect();

    for (handle, source) in handles.into_iter().zip(sources) {
        assert_eq!(
            handle.join().unwrap(),
            render(&flow_lang::parse(source).unwrap())
        );
    }
}
