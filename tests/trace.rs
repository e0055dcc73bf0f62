use tsaio_dev::{
    hash_position, trace_caller, trace_position, CodePosition, TraceError,
};

#[inline(never)]
fn level1() -> CodePosition {
    trace_position(1).unwrap()
}

#[inline(never)]
fn level2() -> CodePosition {
    level1()
}

#[test]
fn depth_zero_is_the_tracer() {
    let position = trace_position(0).unwrap();
    assert!(position.url.ends_with("trace.rs"), "{}", position);
    assert!(position.line > 0);
}

#[test]
fn depth_one_is_the_caller() {
    let position = level1();
    assert!(position.url.ends_with("trace.rs"), "{}", position);
    assert_eq!(position.line, 7);

    let nested = level2();
    assert_eq!(nested, position);
}

#[test]
fn repeated_traces_agree() {
    let positions: Vec<CodePosition> = (0..2).map(|_| trace_position(0).unwrap()).collect();
    assert_eq!(positions[0], positions[1]);
}

#[test]
fn depth_beyond_stack_is_out_of_bounds() {
    for depth in [100, 9999] {
        match trace_position(depth) {
            Err(err @ TraceError::OutOfBounds { .. }) => {
                assert!(
                    err.to_string()
                        .starts_with(&format!("stack depth({}) out of bounds(", depth)),
                    "{}",
                    err
                );
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}

#[test]
fn caller_position_matches_source() {
    let position = trace_caller();
    assert_eq!(position.url, file!());
    assert_eq!(position.line, line!() - 2);
}

#[test]
fn position_hash_is_stable_per_call_site() {
    let hash = || hash_position(16);
    let first = hash();
    let second = hash();
    assert_eq!(first, second);
    assert_ne!(first, hash_position(16));
}
