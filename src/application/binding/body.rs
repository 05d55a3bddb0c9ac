use crate::application::error::{ApplicationError, ApplicationResult, FieldViolation};
use crate::domain::article::value_objects::{CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use serde_json::Value;
use std::collections::BTreeMap;

/// Declared text field accepted from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub nullable: bool,
    pub non_blank: bool,
    pub max_chars: Option<usize>,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            nullable: true,
            non_blank: false,
            max_chars: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self.nullable = false;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn non_blank(mut self) -> Self {
        self.non_blank = true;
        self
    }

    pub const fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    fn check(&self, value: Option<&Value>) -> Result<Option<BoundValue>, FieldViolation> {
        let name = self.name;
        let value = match value {
            None if self.required => {
                return Err(FieldViolation::new(name, format!("{name} is required")));
            }
            None => return Ok(None),
            Some(value) => value,
        };

        let text = match value {
            Value::Null if self.required => {
                return Err(FieldViolation::new(name, format!("{name} is required")));
            }
            Value::Null if !self.nullable => {
                return Err(FieldViolation::new(name, format!("{name} cannot be null")));
            }
            Value::Null => return Ok(Some(BoundValue::Null)),
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(FieldViolation::new(name, format!("{name} must be a string")));
            }
        };

        if self.non_blank && text.trim().is_empty() {
            return Err(FieldViolation::new(name, format!("{name} cannot be empty")));
        }
        if let Some(max) = self.max_chars {
            if text.chars().count() > max {
                return Err(FieldViolation::new(
                    name,
                    format!("{name} must be at most {max} characters"),
                ));
            }
        }

        Ok(Some(BoundValue::Text(text)))
    }
}

/// Field set bound to a route at registration time.
pub trait FieldSet: Send + Sync + 'static {
    const FIELDS: &'static [FieldSpec];
}

pub struct CreateArticleFields;

impl FieldSet for CreateArticleFields {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("title")
            .required()
            .non_blank()
            .max_chars(TITLE_MAX_CHARS),
        FieldSpec::text("content").max_chars(CONTENT_MAX_CHARS),
    ];
}

pub struct UpdateArticleFields;

impl FieldSet for UpdateArticleFields {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("title")
            .not_null()
            .non_blank()
            .max_chars(TITLE_MAX_CHARS),
        FieldSpec::text("content").max_chars(CONTENT_MAX_CHARS),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Text(String),
    Null,
}

/// Declared fields that were present in the body, already coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundFields {
    values: BTreeMap<&'static str, BoundValue>,
}

impl BoundFields {
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.values.get(name)
    }

    pub fn take(&mut self, name: &str) -> Option<BoundValue> {
        self.values.remove(name)
    }

    pub fn require_text(&mut self, name: &str) -> ApplicationResult<String> {
        match self.take(name) {
            Some(BoundValue::Text(text)) => Ok(text),
            Some(BoundValue::Null) | None => Err(ApplicationError::validation(
                name,
                format!("{name} is required"),
            )),
        }
    }

    /// Absent and explicit `null` both yield `None`.
    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        match self.take(name) {
            Some(BoundValue::Text(text)) => Some(text),
            Some(BoundValue::Null) | None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Binds `body` against `fields`: unknown keys are dropped and every
/// violation is reported at once.
pub fn bind_body(fields: &[FieldSpec], body: Value) -> ApplicationResult<BoundFields> {
    let Value::Object(object) = body else {
        return Err(ApplicationError::validation(
            "body",
            "request body must be a JSON object",
        ));
    };

    let mut bound = BoundFields::default();
    let mut violations = Vec::new();

    for spec in fields {
        match spec.check(object.get(spec.name)) {
            Ok(Some(value)) => {
                bound.values.insert(spec.name, value);
            }
            Ok(None) => {}
            Err(violation) => violations.push(violation),
        }
    }

    if violations.is_empty() {
        Ok(bound)
    } else {
        Err(ApplicationError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations(result: ApplicationResult<BoundFields>) -> Vec<FieldViolation> {
        match result {
            Err(ApplicationError::Validation(list)) => list,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_requires_title() {
        let list = violations(bind_body(
            CreateArticleFields::FIELDS,
            json!({ "content": "x" }),
        ));
        assert_eq!(list, vec![FieldViolation::new("title", "title is required")]);
    }

    #[test]
    fn create_rejects_blank_title() {
        let list = violations(bind_body(
            CreateArticleFields::FIELDS,
            json!({ "title": "   " }),
        ));
        assert_eq!(list[0].param, "title");
    }

    #[test]
    fn unknown_fields_are_dropped_and_scalars_coerced() {
        let mut bound = bind_body(
            CreateArticleFields::FIELDS,
            json!({ "title": 42, "content": true, "role": "admin" }),
        )
        .unwrap();

        assert_eq!(bound.require_text("title").unwrap(), "42");
        assert_eq!(bound.optional_text("content").as_deref(), Some("true"));
        assert!(bound.get("role").is_none());
        assert!(bound.is_empty());
    }

    #[test]
    fn update_accepts_partial_body() {
        let bound = bind_body(UpdateArticleFields::FIELDS, json!({ "content": "only" })).unwrap();
        assert!(bound.get("title").is_none());
        assert_eq!(bound.get("content"), Some(&BoundValue::Text("only".into())));
    }

    #[test]
    fn update_keeps_explicit_null_content_but_rejects_null_title() {
        let bound = bind_body(UpdateArticleFields::FIELDS, json!({ "content": null })).unwrap();
        assert_eq!(bound.get("content"), Some(&BoundValue::Null));

        let list = violations(bind_body(
            UpdateArticleFields::FIELDS,
            json!({ "title": null }),
        ));
        assert_eq!(list, vec![FieldViolation::new("title", "title cannot be null")]);
    }

    #[test]
    fn nested_values_are_rejected() {
        let list = violations(bind_body(
            CreateArticleFields::FIELDS,
            json!({ "title": ["a"], "content": { "x": 1 } }),
        ));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let list = violations(bind_body(CreateArticleFields::FIELDS, json!("title")));
        assert_eq!(list[0].param, "body");
    }
}
