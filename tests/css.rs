use tsaio_dev::{css, css_variable, CssVariable};

fn is_class_name(name: &str) -> bool {
    name.len() == 18
        && name.starts_with("cm")
        && name[2..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

fn is_variable_name(name: &str) -> bool {
    name.strip_prefix("--v-").is_some_and(|hash| {
        !hash.is_empty()
            && hash
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    })
}

#[test]
fn class_name_has_expected_shape() {
    let class = css(&["\n  display: flex;\n  gap: 1rem;\n"], &[]);
    assert!(is_class_name(class.as_str()), "{}", class);
}

#[test]
fn empty_template_is_hashed() {
    // sha256("") starts with e3b0c44298fc1c14
    assert_eq!(css(&[""], &[]).as_str(), "cme3b0c44298fc1c14");
    assert_eq!(css(&[], &[]).as_str(), "cme3b0c44298fc1c14");
}

#[test]
fn same_content_same_class() {
    let first = css(&["color: red;"], &[]);
    let second = css(&["color: red;"], &[]);
    assert_eq!(first, second);
}

#[test]
fn different_content_different_class() {
    let red = css(&["color: red;"], &[]);
    let blue = css(&["color: blue;"], &[]);
    assert_ne!(red, blue);
}

#[test]
fn class_depends_only_on_concatenated_content() {
    let color = css_variable();
    let background = css_variable();

    let interleaved = css(
        &["color: var(", "); background: var(", ");"],
        &[color.clone(), background.clone()],
    );
    let literal = format!("color: var({}); background: var({});", color, background);
    assert_eq!(interleaved, css(&[literal.as_str()], &[]));
}

#[test]
fn variables_from_distinct_call_sites_differ() {
    let first = css_variable();
    let second = css_variable();
    assert!(is_variable_name(first.as_str()), "{}", first);
    assert!(is_variable_name(second.as_str()), "{}", second);
    assert_eq!(first.as_str().len(), 7);
    assert_ne!(first, second);
}

#[test]
fn same_call_site_same_variable() {
    let variables: Vec<CssVariable> = (0..3).map(|_| css_variable()).collect();
    assert_eq!(variables[0], variables[1]);
    assert_eq!(variables[1], variables[2]);
}

#[test]
fn variables_change_the_class() {
    let variable = css_variable();
    let with_variable = css(&["color: var(", ");"], &[variable]);
    let without_variable = css(&["color: var(", ");"], &[]);
    assert_ne!(with_variable, without_variable);
}
