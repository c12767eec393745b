//! Pipeline integration tests.
//!
//! End-to-end scenarios through the library API, checking the emitted C
//! text and the diagnostics contract without touching the filesystem.

use novac_drv::compile_source;
use novac_util::Handler;

fn compile_ok(source: &str) -> String {
    let handler = Handler::new();
    let c_code = compile_source(source, &handler, false);
    assert!(
        !handler.has_errors(),
        "unexpected diagnostics: {:?}",
        handler.diagnostics()
    );
    c_code.expect("compilation should succeed")
}

fn compile_err(source: &str) -> Vec<String> {
    let handler = Handler::new();
    let result = compile_source(source, &handler, false);
    assert!(result.is_none(), "compilation should fail");
    handler
        .diagnostics()
        .iter()
        .map(|d| d.to_string())
        .collect()
}

#[test]
fn test_scenario_arithmetic_print() {
    let c_code = compile_ok("function void main() { int x = 2 + 3 * 4; print(x); }");
    assert!(c_code.contains("int x = (2 + (3 * 4));"));
    assert!(c_code.contains("printf(\"%d\\n\", x);"));
}

#[test]
fn test_scenario_boolean_print() {
    let c_code = compile_ok("function void main() { bool b = true; print(b); }");
    assert!(c_code.contains("printf(\"%s\\n\", (b) ? \"true\" : \"false\");"));
}

#[test]
fn test_scenario_float_widening() {
    let c_code = compile_ok("function void main() { float f = 1; print(f); }");
    assert!(c_code.contains("float f = 1;"));
    assert!(c_code.contains("printf(\"%f\\n\", f);"));
}

#[test]
fn test_scenario_undefined_variable() {
    let errors = compile_err("function void main() { print(y); }");
    assert_eq!(
        errors,
        vec!["Error at line 1, column 30: Undefined variable: y".to_string()]
    );
}

#[test]
fn test_scenario_non_boolean_condition() {
    let errors = compile_err("function void main() { if (1) {} }");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("If condition must be boolean"), "{:?}", errors);
}

#[test]
fn test_scenario_for_loop_emission() {
    let c_code = compile_ok("function void main() { for (int i = 0; i < 3; i = i + 1) print(i); }");
    assert!(c_code.contains("for (int i = 0; (i < 3); (i = (i + 1))) {"));
}

#[test]
fn test_void_main_gets_return_zero() {
    let c_code = compile_ok("function void main(){}");
    assert!(c_code.contains("int main() {"));
    assert!(c_code.contains("    return 0;"));
}

#[test]
fn test_string_escapes_pass_through_to_c() {
    let c_code = compile_ok(r#"function void main() { print("line\n\ttab"); }"#);
    assert!(c_code.contains(r#"printf("%s\n", "line\n\ttab");"#), "{}", c_code);
}

#[test]
fn test_pipeline_is_deterministic() {
    let source = "function int f(int n) { return n * 2; } function void main() { print(f(21)); }";
    let first = compile_ok(source);
    let second = compile_ok(source);
    assert_eq!(first, second);
}

#[test]
fn test_diagnostics_keep_discovery_order() {
    // Analysis keeps going after a semantic error, so later errors in
    // the same stage are collected too, in source order.
    let errors = compile_err(
        "function void main() { print(a); print(b); }",
    );
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("Undefined variable: a"));
    assert!(errors[1].contains("Undefined variable: b"));
}

#[test]
fn test_parse_errors_stop_before_analysis() {
    // The parser reports one error and the pipeline never reaches the
    // analyser, so the undefined name is not reported.
    let errors = compile_err("int x = ; print(y);");
    assert!(errors.iter().all(|e| !e.contains("Undefined variable")), "{:?}", errors);
}
