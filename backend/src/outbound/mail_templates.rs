//! Handlebars-backed mail templates.
//!
//! Template sources live in `backend/templates/` and are compiled into the
//! binary. Rendering is strict: a missing variable is an error rather than
//! an empty string. Bodies are plain text, so HTML escaping is disabled.

use handlebars::{Handlebars, no_escape};
use serde_json::Value;

use crate::domain::ports::{MailTemplate, MailTemplateError, MailTemplateProvider};

const SOURCES: [(MailTemplate, &str); 1] = [(
    MailTemplate::ForgotPassword,
    include_str!("../../templates/forgot_password.hbs"),
)];

/// [`MailTemplateProvider`] over a precompiled Handlebars registry.
pub struct HandlebarsMailTemplateProvider {
    registry: Handlebars<'static>,
}

impl HandlebarsMailTemplateProvider {
    /// Compile every bundled template.
    ///
    /// # Errors
    ///
    /// Returns [`MailTemplateError::Render`] when a template fails to parse.
    pub fn new() -> Result<Self, MailTemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        for (template, source) in SOURCES {
            registry
                .register_template_string(template.name(), source)
                .map_err(|err| MailTemplateError::render(err.to_string()))?;
        }
        Ok(Self { registry })
    }
}

impl MailTemplateProvider for HandlebarsMailTemplateProvider {
    fn parse(
        &self,
        template: MailTemplate,
        variables: &Value,
    ) -> Result<String, MailTemplateError> {
        let name = template.name();
        if !self.registry.has_template(name) {
            return Err(MailTemplateError::unknown_template(name));
        }
        self.registry
            .render(name, variables)
            .map_err(|err| MailTemplateError::render(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn templates() -> HandlebarsMailTemplateProvider {
        HandlebarsMailTemplateProvider::new().expect("bundled templates compile")
    }

    #[rstest]
    fn forgot_password_renders_name_link_and_ttl(templates: HandlebarsMailTemplateProvider) {
        let body = templates
            .parse(
                MailTemplate::ForgotPassword,
                &json!({
                    "name": "John & Jane",
                    "link": "http://localhost:3000/reset-password?token=abc",
                    "ttlHours": 2,
                }),
            )
            .expect("render");

        assert!(body.starts_with("Hello, John & Jane!"));
        assert!(body.contains("http://localhost:3000/reset-password?token=abc"));
        assert!(body.contains("valid\nfor 2 hours"));
    }

    #[rstest]
    fn missing_variables_fail_to_render(templates: HandlebarsMailTemplateProvider) {
        let error = templates
            .parse(MailTemplate::ForgotPassword, &json!({"name": "John"}))
            .expect_err("strict mode");
        assert!(matches!(error, MailTemplateError::Render { .. }));
    }
}
