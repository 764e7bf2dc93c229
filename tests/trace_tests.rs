// Integration tests for the tracing interpreter

use logictrace::memory::value::Value;
use logictrace::memory::Variables;
use logictrace::{trace, trace_with_config, Trace, TraceConfig};
use pretty_assertions::assert_eq;
use std::fs;

fn trace_demo(name: &str) -> Trace {
    let source = fs::read_to_string(format!("demos/{}", name)).expect("Failed to read demo file");
    trace(&source).expect("Trace failed")
}

fn summary(trace: &Trace) -> Vec<(usize, &str)> {
    trace
        .iter()
        .map(|step| (step.line_no, step.action.as_str()))
        .collect()
}

#[test]
fn test_loop_sample() {
    let trace = trace_demo("loops.py");

    assert_eq!(
        summary(&trace),
        vec![
            (1, "Assignment"),
            (2, "Loop Iteration"),
            (3, "Assignment"),
            (4, "Output"),
            (2, "Loop Iteration"),
            (3, "Assignment"),
            (4, "Output"),
            (2, "Loop Iteration"),
            (3, "Assignment"),
            (4, "Output"),
        ]
    );

    let totals: Vec<Option<&Value>> = trace
        .iter()
        .filter(|step| step.action == "Assignment")
        .map(|step| step.variables.get("total"))
        .collect();
    assert_eq!(
        totals,
        vec![
            Some(&Value::Int(0)),
            Some(&Value::Int(0)),
            Some(&Value::Int(1)),
            Some(&Value::Int(3)),
        ]
    );

    assert_eq!(trace.final_output(), ["0", "1", "3"]);
    assert_eq!(
        trace.final_variables(),
        Some(&Variables::from([("total", Value::Int(3)), ("i", Value::Int(2))]))
    );
}

#[test]
fn test_strings_sample() {
    let trace = trace_demo("strings.py");

    assert_eq!(
        summary(&trace),
        vec![
            (1, "Assignment"),
            (2, "Assignment"),
            (3, "Assignment"),
            (4, "Output"),
        ]
    );
    assert_eq!(trace.steps()[3].source_line, "print(full)");
    assert_eq!(trace.final_output(), ["LogicTrace"]);
    assert_eq!(
        trace.final_variables(),
        Some(&Variables::from([
            ("first", Value::Str("Logic".to_string())),
            ("last", Value::Str("Trace".to_string())),
            ("full", Value::Str("LogicTrace".to_string())),
        ]))
    );
}

#[test]
fn test_logic_sample() {
    let trace = trace_demo("logic.py");

    assert_eq!(
        summary(&trace),
        vec![
            (1, "Assignment"),
            (2, "Assignment"),
            (3, "Condition"),
            (4, "Assignment"),
            (5, "Output"),
        ]
    );
    assert_eq!(
        trace.steps()[2].reason,
        "The condition `x < y` is True, so the if block runs."
    );
    assert_eq!(trace.steps()[3].variables.get("z"), Some(&Value::Int(30)));
    assert_eq!(trace.final_output(), ["30"]);
}

#[test]
fn test_inline_suite_matches_block_form() {
    let inline = trace("x = 10; y = 20\nif x < y: z = x + y; print(z)\n").unwrap();
    let actions: Vec<&str> = inline.iter().map(|s| s.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["Assignment", "Assignment", "Condition", "Assignment", "Output"]
    );
    assert_eq!(inline.final_output(), ["30"]);
}

#[test]
fn test_grades_demo() {
    let trace = trace_demo("grades.py");
    assert_eq!(
        trace.final_output(),
        [
            "score 0 grade F",
            "score 25 grade F",
            "score 50 grade C",
            "score 75 grade C",
            "score 100 grade A",
            "passed: 3 ratio: 0.6",
        ]
    );
    let last = trace.final_variables().unwrap();
    assert_eq!(last.get("average"), Some(&Value::Float(0.6)));
    assert_eq!(last.get("grade"), Some(&Value::Str("A".to_string())));
}

#[test]
fn test_determinism() {
    let source = fs::read_to_string("demos/grades.py").unwrap();
    let first = trace(&source).unwrap();
    let second = trace(&source).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_output_is_monotonic() {
    let trace = trace_demo("grades.py");
    for pair in trace.steps().windows(2) {
        assert!(pair[1].output.len() >= pair[0].output.len());
        assert!(pair[1].output.starts_with(&pair[0].output));
    }
}

#[test]
fn test_flat_scope_persistence() {
    let trace = trace("for i in range(2):\n    if i == 0:\n        inner = \"set\"\nprint(inner)\nafter = 1\n").unwrap();

    let first_seen = trace
        .iter()
        .position(|step| step.variables.contains("inner"))
        .expect("inner never assigned");
    for step in &trace.steps()[first_seen..] {
        assert_eq!(step.variables.get("inner"), Some(&Value::Str("set".to_string())));
    }
    assert_eq!(trace.final_output(), ["set"]);
}

#[test]
fn test_variables_keep_first_assignment_order() {
    let trace = trace("b = 1\na = 2\nb = 3\n").unwrap();
    let names: Vec<&str> = trace
        .final_variables()
        .unwrap()
        .iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_loop_counts() {
    for n in [0usize, 1, 5] {
        let trace = trace(&format!("for i in range({}):\n    print(i)\n", n)).unwrap();
        let iterations = trace
            .iter()
            .filter(|step| step.action == "Loop Iteration")
            .count();
        assert_eq!(iterations, n);
        assert_eq!(trace.final_output().len(), n);
    }

    let trace = trace("for i in range(0):\n    x = 1\n").unwrap();
    assert!(trace.is_empty());
}

#[test]
fn test_string_concatenation() {
    let trace = trace("s = \"a\" + \"b\"\n").unwrap();
    assert_eq!(
        trace.final_variables().unwrap().get("s"),
        Some(&Value::Str("ab".to_string()))
    );
}

#[test]
fn test_large_range_within_limit() {
    let trace = trace_with_config(
        "for i in range(1000):\n    pass\n",
        &TraceConfig::default().with_step_limit(1010),
    )
    .expect("range(1000) should fit under the step limit");
    assert_eq!(trace.len(), 1000);
    assert_eq!(
        trace.final_variables().unwrap().get("i"),
        Some(&Value::Int(999))
    );
}

#[test]
fn test_step_json_shape() {
    let trace = trace("x = 1\nprint(x)\n").unwrap();
    let json = serde_json::to_value(&trace).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            {
                "lineNo": 1,
                "code": "x = 1",
                "action": "Assignment",
                "reason": "Created variable 'x' with value 1.",
                "variables": { "x": 1 },
                "output": []
            },
            {
                "lineNo": 2,
                "code": "print(x)",
                "action": "Output",
                "reason": "Printed \"1\" to the console.",
                "variables": { "x": 1 },
                "output": ["1"]
            }
        ])
    );
}
