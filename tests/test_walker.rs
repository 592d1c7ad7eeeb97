// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Tests for the tree walker: class attribution, visit order, and node kinds

use simple_search::{parse_file, search, search_source, MatchRecord, Options, SearchError};

fn find(source: &str, patterns: &[&str]) -> Vec<MatchRecord> {
    search_source(source, &Options::new(patterns, -1).unwrap()).unwrap()
}

#[test]
fn test_method_comment_on_signature_line() {
    let source = "class Foo:\n    def bar(): # calls baz\n        baz()\n";
    let results = find(source, &["baz"]);
    assert_eq!(
        results,
        vec![MatchRecord {
            class_name: "Foo".to_string(),
            first_line: "def bar(): # calls baz".to_string(),
            start_line: 2,
            end_line: 3,
        }]
    );
}

#[test]
fn test_module_level_function_has_empty_class() {
    let results = find("def top():\n    needle()\n", &["needle"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].class_name, "");
    assert_eq!(results[0].start_line, 1);
}

#[test]
fn test_conditional_inside_class_keeps_class() {
    let source = "\
class Config:
    if DEBUG:
        def dump(self):
            needle(self)
    else:
        def dump(self):
            pass
";
    let results = find(source, &["needle"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].class_name, "Config");
    assert_eq!(results[0].start_line, 3);
}

#[test]
fn test_nested_class_takes_inner_name_then_restores() {
    let source = "\
class Outer:
    class Inner:
        def a(self):
            needle()

    def b(self):
        needle()
";
    let results = find(source, &["needle"]);
    let classes: Vec<&str> = results.iter().map(|r| r.class_name.as_str()).collect();
    assert_eq!(classes, vec!["Inner", "Outer"]);
}

#[test]
fn test_depth_first_source_order() {
    let source = "\
def one():
    hit()

class A:
    def two(self):
        hit()

def three():
    hit()
";
    let lines: Vec<usize> = find(source, &["hit"]).iter().map(|r| r.start_line).collect();
    assert_eq!(lines, vec![1, 5, 8]);
}

#[test]
fn test_nested_function_reported_once_through_outer() {
    let source = "def outer():\n    def inner():\n        needle()\n    return inner\n";
    let results = find(source, &["needle"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].first_line, "def outer():");
    assert_eq!(results[0].end_line, 4);
}

#[test]
fn test_decorated_and_async_functions() {
    let source = "\
class Api:
    @route('/x')
    async def handler(self):
        await needle()
";
    let results = find(source, &["needle"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].class_name, "Api");
    assert_eq!(results[0].first_line, "async def handler(self):");
    assert_eq!(results[0].start_line, 3);
}

#[test]
fn test_module_level_conditional_block() {
    let source = "if sys.version_info > (3,):\n    def compat():\n        needle()\n";
    let results = find(source, &["needle"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].class_name, "");
}

#[test]
fn test_walk_from_subtree_with_given_class() {
    let parsed = parse_file("def f():\n    needle()\n").unwrap();
    let options = Options::new(&["needle"], -1).unwrap();
    let results = search(&parsed, parsed.root(), &options, "Preset");
    assert_eq!(results[0].class_name, "Preset");
}

#[test]
fn test_signature_counts_as_a_line() {
    let results = find("def needle_fn():\n    pass\n", &["needle"]);
    assert_eq!(results.len(), 1);
}

#[test]
fn test_unparseable_source_is_error() {
    let err = search_source("def broken(:\n", &Options::new(&["x"], -1).unwrap()).unwrap_err();
    assert!(matches!(err, SearchError::Parse { .. }));
}

#[test]
fn test_function_inside_except_star_handler() {
    let source = "try:\n    pass\nexcept* ValueError:\n    def handler():\n        needle()\n";
    let results = find(source, &["needle"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].first_line, "def handler():");
}
