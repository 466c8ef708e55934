use crate::spec::spec_model::{ActionStep, TestSpec};

pub const DEFAULT_TEST_ID: &str = "default_test";
pub const DEFAULT_DESCRIPTION: &str = "Default description";

/// One `key=value` declaration of the snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn line(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Flatten a spec into ordered properties namespaced under `test.<test_id>`.
///
/// Order: description, data file, start page, then each action, then each
/// assertion. Empty test id / description fall back to placeholders. An
/// action's empty `value` is omitted, an assertion's never is. Values are
/// written verbatim; `=` or newlines inside a value are not escaped.
pub fn properties(spec: &TestSpec) -> Vec<Property> {
    let test_id = or_default(&spec.test_id, DEFAULT_TEST_ID);
    let prefix = format!("test.{}", test_id);
    let mut props = Vec::new();

    let mut push = |path: String, value: &str| {
        props.push(Property {
            key: format!("{}.{}", prefix, path),
            value: value.to_string(),
        });
    };

    push("description".into(), or_default(&spec.description, DEFAULT_DESCRIPTION));

    if !spec.data_file.is_empty() {
        push("dataFile".into(), &spec.data_file);
    }
    if !spec.start_page.is_empty() {
        push("startPage".into(), &spec.start_page);
    }

    for (i, action) in spec.actions.iter().enumerate() {
        push(format!("actions[{}].action", i), action.kind.as_str());

        match action.step() {
            ActionStep::Navigate { target_page } => {
                push(format!("actions[{}].targetPage", i), target_page);
            }
            ActionStep::Enter { page, element, value } | ActionStep::Click { page, element, value } => {
                push(format!("actions[{}].page", i), page);
                push(format!("actions[{}].element", i), element);
                if !value.is_empty() {
                    push(format!("actions[{}].value", i), value);
                }
            }
        }
    }

    for (i, assertion) in spec.assertions.iter().enumerate() {
        push(format!("assertions[{}].type", i), assertion.kind.as_str());
        push(format!("assertions[{}].value", i), &assertion.value);
        push(format!("assertions[{}].condition", i), assertion.condition.as_str());
    }

    props
}

/// Render a spec as the properties snippet, one declaration per line.
pub fn serialize(spec: &TestSpec) -> String {
    let mut out = String::new();
    for prop in properties(spec) {
        out.push_str(&prop.line());
        out.push('\n');
    }
    out
}

fn or_default<'a>(raw: &'a str, placeholder: &'a str) -> &'a str {
    if raw.is_empty() { placeholder } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_only_applies_to_empty_input() {
        assert_eq!(or_default("", DEFAULT_TEST_ID), "default_test");
        assert_eq!(or_default(" ", DEFAULT_TEST_ID), " ");
        assert_eq!(or_default("checkout", DEFAULT_TEST_ID), "checkout");
    }

    #[test]
    fn property_line_joins_key_and_value() {
        let prop = Property {
            key: "test.t.description".into(),
            value: "a=b".into(),
        };
        assert_eq!(prop.line(), "test.t.description=a=b");
    }
}
