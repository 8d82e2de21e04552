// src/services/templates.rs
use chrono::{Datelike, Utc};
use regex::Regex;
use std::collections::HashMap;

use crate::services::config::AppConfig;

/// Merge-field renderer for email bodies. `{{fieldName}}` placeholders are
/// replaced by literal substitution; there is no escaping, nesting, or
/// conditional syntax. Unresolved fields render as empty string. The four
/// built-ins (companyName, supportEmail, currentDate, currentYear) are
/// resolved last and override caller-supplied fields of the same name.
#[derive(Debug, Clone)]
pub struct Templater {
    company_name: String,
    support_email: String,
}

impl Templater {
    pub fn new(company_name: impl Into<String>, support_email: impl Into<String>) -> Self {
        Templater {
            company_name: company_name.into(),
            support_email: support_email.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Templater::new(&config.company_name, &config.support_email)
    }

    fn builtin(&self, name: &str) -> Option<String> {
        let now = Utc::now();
        match name {
            "companyName" => Some(self.company_name.clone()),
            "supportEmail" => Some(self.support_email.clone()),
            "currentDate" => Some(now.format("%B %e, %Y").to_string()),
            "currentYear" => Some(now.year().to_string()),
            _ => None,
        }
    }

    pub fn render(&self, template: &str, fields: &HashMap<String, String>) -> String {
        // Placeholder grammar is deliberately minimal: a word between braces.
        let placeholder = Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid");
        placeholder
            .replace_all(template, |caps: &regex::Captures| {
                let name = &caps[1];
                self.builtin(name)
                    .or_else(|| fields.get(name).cloned())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templater() -> Templater {
        Templater::new("Sterling Bond Partners", "support@sterlingbond.example")
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_supplied_fields() {
        let out = templater().render("Hi {{name}}", &fields(&[("name", "Sam")]));
        assert_eq!(out, "Hi Sam");
    }

    #[test]
    fn missing_fields_render_empty() {
        let out = templater().render("{{missing}}", &HashMap::new());
        assert_eq!(out, "");
    }

    #[test]
    fn builtins_override_caller_fields() {
        let out = templater().render(
            "From {{companyName}}",
            &fields(&[("companyName", "Spoofed Inc")]),
        );
        assert_eq!(out, "From Sterling Bond Partners");
    }

    #[test]
    fn current_year_is_always_available() {
        let out = templater().render("(c) {{currentYear}}", &HashMap::new());
        assert_eq!(out, format!("(c) {}", Utc::now().year()));
    }

    #[test]
    fn repeated_and_adjacent_placeholders() {
        let out = templater().render(
            "{{firstName}}{{firstName}}, {{email}}",
            &fields(&[("firstName", "Ada"), ("email", "ada@example.com")]),
        );
        assert_eq!(out, "AdaAda, ada@example.com");
    }

    #[test]
    fn no_nesting_or_conditionals() {
        // An unknown outer name is just an unknown field.
        let out = templater().render("{{a{{b}}c}}", &fields(&[("b", "x")]));
        // Literal scan: "{{b}}" is the only well-formed placeholder.
        assert_eq!(out, "{{axc}}");
    }
}
