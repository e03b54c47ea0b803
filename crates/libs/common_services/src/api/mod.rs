use validator::ValidationErrors;

pub mod access;
pub mod auth;
pub mod chat;
pub mod expenses;
pub mod export;
pub mod gallery;
pub mod itinerary;
pub mod maps;
pub mod trips;

/// Flattens validator errors into a single message for display on the originating form.
#[must_use]
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("Invalid {field}"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Trims a required text field, returning `None` when nothing is left.
#[must_use]
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Trims an optional text field, treating whitespace-only input as absent.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<&str> {
    value.and_then(non_blank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(email(message = "Please enter a valid email address"))]
        email: String,
        #[validate(length(min = 3))]
        code: String,
    }

    #[test]
    fn validation_messages_are_joined() {
        let form = Form {
            email: "nope".to_owned(),
            code: "x".to_owned(),
        };
        let errors = form.validate().expect_err("both fields are invalid");

        assert_eq!(
            validation_message(&errors),
            "Invalid code, Please enter a valid email address"
        );
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(non_blank("  Beach "), Some("Beach"));
        assert_eq!(non_blank("   "), None);
        assert_eq!(optional_text(Some("")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" Goa")), Some("Goa"));
    }
}
