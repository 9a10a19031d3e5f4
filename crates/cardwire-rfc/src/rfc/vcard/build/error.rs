//! vCard write errors.

/// A property that cannot be written in the requested version without
/// corrupting the output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("property {property}: group {group:?} may not contain {}", display_chars(.forbidden))]
    IllegalGroup {
        property: String,
        group: String,
        forbidden: Vec<char>,
    },

    /// An empty `forbidden` list means the name is empty.
    #[error("property name {name:?} {}", name_problem(.forbidden))]
    IllegalPropertyName { name: String, forbidden: Vec<char> },

    #[error(
        "property {property}: parameter name {parameter:?} may not contain {}",
        display_chars(.forbidden)
    )]
    IllegalParameterName {
        property: String,
        parameter: String,
        forbidden: Vec<char>,
    },

    #[error(
        "property {property}: value {value:?} of parameter {parameter} may not contain {}",
        display_chars(.forbidden)
    )]
    IllegalParameterValue {
        property: String,
        parameter: String,
        value: String,
        forbidden: Vec<char>,
    },
}

fn name_problem(forbidden: &[char]) -> String {
    if forbidden.is_empty() {
        return "may not be empty".to_string();
    }
    format!("may not contain {}", display_chars(forbidden))
}

/// Renders characters for messages, spelling out the invisible ones.
fn display_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| match c {
            '\r' => "CR".to_string(),
            '\n' => "LF".to_string(),
            ' ' => "leading space".to_string(),
            '\t' => "leading tab".to_string(),
            c => format!("'{c}'"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
