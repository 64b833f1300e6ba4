use std::fs;

use smartscript::{
    error::{ParseError, RuntimeError},
    interpreter::parser::core::parse_document,
    render, render_to_string,
    sink::{MemorySink, Parameters, RequestContext, Scope, Sink},
};
use walkdir::WalkDir;

#[test]
fn demo_templates_render_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "smscr"))
    {
        let path = entry.path();
        let template =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                               panic!("Failed to read {expected_path:?}: {e}")
                                                           });

        count += 1;
        match render_to_string(&template) {
            Ok(output) => assert_eq!(output.trim_end(),
                                     expected.trim_end(),
                                     "Demo {path:?} rendered unexpected output"),
            Err(e) => panic!("Demo {path:?} failed:\n{template}\nError: {e}"),
        }
    }

    assert!(count > 0, "No demo templates found in demos/");
}

fn assert_output(src: &str, expected: &str) {
    match render_to_string(src) {
        Ok(output) => assert_eq!(output, expected, "Template: {src}"),
        Err(e) => panic!("Template failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if render_to_string(src).is_ok() {
        panic!("Template succeeded but was expected to fail: {src}")
    }
}

fn parse_failure(src: &str) -> ParseError {
    match parse_document(src) {
        Ok(_) => panic!("Template parsed but was expected to fail: {src}"),
        Err(e) => e,
    }
}

#[test]
fn plain_text_is_copied() {
    assert_output("Hello, world!", "Hello, world!");
    assert_output("  padded  ", "padded");
    assert_output(r"a \{ b \\ c", r"a { b \ c");
}

#[test]
fn loops_print_their_variable() {
    assert_output("{$FOR i 1 3$}{$=i$}{$END$}", "123");
    assert_output(r#"{$FOR i 0 10 2$}{$= i " "$}{$END$}"#, "0 2 4 6 8 10 ");
    assert_output("{$FOR i 3 1$}{$= i $}{$END$}", "");
}

#[test]
fn missing_step_defaults_to_one() {
    assert_output("{$FOR i -1 1$}{$= i $};{$END$}", "-1;0;1;");
}

#[test]
fn operators_produce_doubles() {
    assert_output("{$= 3 4 +$}", "7.0");
    assert_output(r#"{$= "1.5" "2.5" +$}"#, "4.0");
    assert_output("{$= 10 4 - $}", "6.0");
    assert_output("{$= 6 -3 / $}", "-2.0");
}

#[test]
fn param_get_returns_default_as_text() {
    assert_output(r#"{$= "missing" 42 @paramGet $}"#, "42");

    let request = [("user".to_string(), "Ana".to_string())].into();
    let mut sink = MemorySink::new(Parameters::new(request, Default::default()));
    render(r#"Hi {$= "user" "guest" @paramGet $}"#, &mut sink).unwrap();
    assert_eq!(sink.output(), "Hi Ana");
}

#[test]
fn persistent_parameters_survive_the_render() {
    let persistent = [("count".to_string(), "1".to_string())].into();
    let mut sink = MemorySink::new(Parameters::new(Default::default(), persistent));

    render(r#"{$= "count" "count" 0 @pparamGet 1 + @pparamSet "gone" @pparamDel $}"#, &mut sink).unwrap();

    assert_eq!(sink.output(), "");
    assert_eq!(sink.parameters().get(Scope::Persistent, "count"), Some("2.0"));
}

#[test]
fn builtin_failures_do_not_abort() {
    assert_output("{$= @dup 1 $}", "1");
    assert_output(r#"{$= 1 "0.x" @decfmt 2 $}"#, "2");
    assert_output(r#"{$= 5 @setMimeType "!" $}"#, "!");
    assert_output("{$= 1 @swap 2 $}", "2");
}

#[test]
fn large_templates_render_in_one_pass() {
    let lines = 50_000;
    let output = render_to_string(&"x{$= 1 $}\n".repeat(lines)).unwrap();
    assert_eq!(output, "x1\n".repeat(lines).trim_end());

    let mut source = "x{$= 1 $}\n".repeat(lines);
    source.push_str("{$= $}");
    assert_eq!(parse_failure(&source).line(), lines + 1);
}

#[test]
fn runtime_errors_abort() {
    assert_failure("{$= i $}");
    assert_failure("{$= 1 @unknown $}");
    assert_failure("{$= 1 + $}");
    assert_failure(r#"{$= "abc" 1 * $}"#);
    assert_failure("{$FOR i 1 3 0$}{$END$}");
}

#[test]
fn parse_errors_abort() {
    assert!(matches!(parse_failure(r"bad \escape"), ParseError::IllegalEscape { .. }));
    assert!(matches!(parse_failure("{$= 1 "), ParseError::UnterminatedTag { .. }));
    assert!(matches!(parse_failure("{$IF x$}"), ParseError::UnknownTag { .. }));
    assert!(matches!(parse_failure("{$=$}"), ParseError::EmptyEcho { .. }));
    assert!(matches!(parse_failure("{$= 1x $}"), ParseError::UnrecognizedToken { .. }));
    assert!(matches!(parse_failure("{$= @ $}"), ParseError::InvalidFunctionName { .. }));
    assert!(matches!(parse_failure("{$FOR i 1$}{$END$}"), ParseError::ForLoopArity { .. }));
    assert!(matches!(parse_failure("{$FOR 1 1 2$}{$END$}"), ParseError::InvalidLoopVariable { .. }));
    assert!(matches!(parse_failure("{$FOR i 1 n$}{$END$}"),
                     ParseError::NonConstantLoopBound { .. }));
    assert!(matches!(parse_failure("{$END$}"), ParseError::UnmatchedEnd { .. }));
    assert!(matches!(parse_failure("{$FOR i 1 2$}"), ParseError::UnclosedFor { .. }));
}

#[test]
fn parse_error_reports_line() {
    let err = parse_failure("line one\nline two\n{$= $}");
    assert_eq!(err.line(), 3);
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn canonical_text_reparses_to_same_shape() {
    let source = r#"Head \\ {$FOR i 1 4 2$}row {$= i "x y" @dup * $}
{$END$}tail"#;
    let document = parse_document(source).unwrap();
    let reparsed = parse_document(&document.to_string()).unwrap();

    assert_eq!(document.node_kinds(), reparsed.node_kinds());
    assert_eq!(document.node_kinds(), ["document", "text", "for", "text", "echo", "text", "text"]);
}

#[test]
fn request_context_renders_headers_and_body() {
    let mut context = RequestContext::new(Vec::new(), Parameters::default());
    render(r#"{$= "text/plain" @setMimeType $}ok"#, &mut context).unwrap();

    let output = String::from_utf8(context.into_inner()).unwrap();
    assert_eq!(output, "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\nok");
}

#[test]
fn mime_type_after_output_is_isolated() {
    let mut context = RequestContext::new(Vec::new(), Parameters::default());
    render(r#"body{$= "text/plain" @setMimeType $}"#, &mut context).unwrap();

    let output = String::from_utf8(context.into_inner()).unwrap();
    assert!(output.starts_with("HTTP/1.1 200 OK\r\nContent-Type: text/html"));
    assert!(output.ends_with("\r\n\r\nbody"));
}

#[test]
fn runtime_error_is_a_runtime_error() {
    let mut sink = MemorySink::default();
    let err = render("{$= 1 0 @nope $}", &mut sink).unwrap_err();
    assert!(err.downcast_ref::<RuntimeError>().is_some());
}
