//! Schema-driven form rendering.
//!
//! [`render`] maps a [`ViewSchema`] plus runtime handlers into a
//! [`RenderedForm`]: one [`FieldWidget`] per field, in declared order, with
//! the widget control chosen by an exhaustive match over [`FieldKind`].
//! Rendering is pure — no I/O, no persistence. Submitting a form collects
//! the current values and hands them to the caller's [`SubmitHandler`];
//! persisting the result (if desired) stays the caller's job via the view
//! service.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{FieldDefinition, FieldKind, FieldOption, ViewSchema};

/// Callback invoked when a rendered form is submitted.
///
/// Used as `Arc<dyn SubmitHandler>` so host UI layers can share one handler
/// across forms.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Receives the submitted values as a flat mapping keyed by field name.
    async fn on_submit(&self, values: BTreeMap<String, Value>);
}

/// Runtime handlers recognized by [`render`].
#[derive(Clone)]
pub struct RenderHandlers {
    /// Invoked exactly once per [`RenderedForm::submit`] call.
    pub on_submit: Arc<dyn SubmitHandler>,
}

/// The type-specific part of a widget.
///
/// One variant per recognized [`FieldKind`]; option-backed variants carry
/// their choices. Adding a field kind without handling it here is a compile
/// error, not a runtime fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    TextArea,
    /// Numeric input.
    Number,
    /// Single boolean toggle.
    Checkbox,
    /// Date picker.
    Date,
    /// Dropdown selection.
    Select {
        /// Choices in declared order.
        options: Vec<FieldOption>,
    },
    /// Multi-select checkbox group.
    CheckboxGroup {
        /// Choices in declared order.
        options: Vec<FieldOption>,
    },
    /// Single-select radio group.
    RadioGroup {
        /// Choices in declared order.
        options: Vec<FieldOption>,
    },
}

/// One rendered field: display strings plus the type-specific control.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWidget {
    /// Field name, the key submitted values are collected under.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether the field is marked required.
    pub required: bool,
    /// Placeholder text, if any.
    pub placeholder: Option<String>,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Inline help text, if any.
    pub help_text: Option<String>,
    /// The control to render.
    pub control: Control,
}

/// A renderable, submittable form produced by [`render`].
pub struct RenderedForm {
    /// ID of the schema this form was rendered from.
    pub id: String,
    /// Widgets in declared field order.
    pub widgets: Vec<FieldWidget>,
    on_submit: Arc<dyn SubmitHandler>,
}

impl RenderedForm {
    /// Looks up a widget by field name.
    #[must_use]
    pub fn widget(&self, name: &str) -> Option<&FieldWidget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    /// Submits the form.
    ///
    /// Keeps only the entries of `values` whose key names a rendered field,
    /// then invokes the submit handler exactly once with that mapping.
    pub async fn submit(&self, values: BTreeMap<String, Value>) {
        let collected: BTreeMap<String, Value> = values
            .into_iter()
            .filter(|(name, _)| self.widgets.iter().any(|w| &w.name == name))
            .collect();
        self.on_submit.on_submit(collected).await;
    }
}

/// Renders a schema into a form tree.
///
/// One widget per field, in declared order. The schema is treated as
/// immutable input; callers are expected to have run
/// [`validate_schema`](crate::validate::validate_schema) first, but an
/// invalid schema still renders on a best-effort basis (e.g. a select with
/// no options renders an empty dropdown).
#[must_use]
pub fn render(schema: &ViewSchema, handlers: RenderHandlers) -> RenderedForm {
    let widgets = schema
        .fields
        .iter()
        .map(|(name, field)| build_widget(name, field))
        .collect::<Vec<_>>();
    tracing::debug!(id = %schema.id, widgets = widgets.len(), "rendered form");

    RenderedForm {
        id: schema.id.clone(),
        widgets,
        on_submit: handlers.on_submit,
    }
}

fn build_widget(name: &str, field: &FieldDefinition) -> FieldWidget {
    let control = match field.kind {
        FieldKind::Text => Control::Text,
        FieldKind::Textarea => Control::TextArea,
        FieldKind::Number => Control::Number,
        FieldKind::Boolean => Control::Checkbox,
        FieldKind::Date => Control::Date,
        FieldKind::Select => Control::Select {
            options: field.options.clone(),
        },
        FieldKind::Checkbox => Control::CheckboxGroup {
            options: field.options.clone(),
        },
        FieldKind::Radio => Control::RadioGroup {
            options: field.options.clone(),
        },
        // Host-defined widgets degrade to a plain text input.
        FieldKind::Custom => Control::Text,
    };

    FieldWidget {
        name: name.to_string(),
        label: field.label.clone(),
        required: field.required,
        placeholder: field.placeholder.clone(),
        description: field.description.clone(),
        help_text: field.help_text.clone(),
        control,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct RecordingHandler {
        calls: AtomicUsize,
        last: Mutex<Option<BTreeMap<String, Value>>>,
    }

    #[async_trait]
    impl SubmitHandler for RecordingHandler {
        async fn on_submit(&self, values: BTreeMap<String, Value>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(values);
        }
    }

    fn handlers(handler: &Arc<RecordingHandler>) -> RenderHandlers {
        RenderHandlers {
            on_submit: handler.clone(),
        }
    }

    #[test]
    fn widgets_follow_declared_order() {
        let schema = ViewSchema::new("profile")
            .with_field("bio", FieldDefinition::new(FieldKind::Textarea, "Bio"))
            .with_field("age", FieldDefinition::new(FieldKind::Number, "Age"))
            .with_field("dob", FieldDefinition::new(FieldKind::Date, "Born"));

        let form = render(&schema, handlers(&Arc::new(RecordingHandler::default())));
        let names: Vec<&str> = form.widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["bio", "age", "dob"]);
        assert_eq!(form.widgets[0].control, Control::TextArea);
        assert_eq!(form.widgets[1].control, Control::Number);
        assert_eq!(form.widgets[2].control, Control::Date);
    }

    #[test]
    fn option_kinds_carry_their_options() {
        let options = vec![
            FieldOption::new("s", "Small"),
            FieldOption::new("l", "Large"),
        ];
        let schema = ViewSchema::new("order")
            .with_field(
                "size",
                FieldDefinition::new(FieldKind::Select, "Size").with_options(options.clone()),
            )
            .with_field(
                "extras",
                FieldDefinition::new(FieldKind::Checkbox, "Extras").with_options(options.clone()),
            )
            .with_field(
                "crust",
                FieldDefinition::new(FieldKind::Radio, "Crust").with_options(options.clone()),
            );

        let form = render(&schema, handlers(&Arc::new(RecordingHandler::default())));
        assert_eq!(
            form.widget("size").unwrap().control,
            Control::Select {
                options: options.clone()
            }
        );
        assert_eq!(
            form.widget("extras").unwrap().control,
            Control::CheckboxGroup {
                options: options.clone()
            }
        );
        assert_eq!(
            form.widget("crust").unwrap().control,
            Control::RadioGroup { options }
        );
    }

    #[test]
    fn custom_kind_falls_back_to_text() {
        let schema = ViewSchema::new("misc")
            .with_field("sig", FieldDefinition::new(FieldKind::Custom, "Signature"));

        let form = render(&schema, handlers(&Arc::new(RecordingHandler::default())));
        assert_eq!(form.widget("sig").unwrap().control, Control::Text);
    }

    #[tokio::test]
    async fn submit_invokes_handler_exactly_once() {
        let handler = Arc::new(RecordingHandler::default());
        let schema = ViewSchema::new("contact-form")
            .with_field("email", FieldDefinition::new(FieldKind::Text, "Email").required());
        let form = render(&schema, handlers(&handler));

        form.submit(BTreeMap::from([("email".to_string(), json!("a@b.com"))]))
            .await;

        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        let values = handler.last.lock().unwrap().clone().unwrap();
        assert_eq!(values, BTreeMap::from([("email".to_string(), json!("a@b.com"))]));
    }

    #[tokio::test]
    async fn submit_drops_values_for_undeclared_fields() {
        let handler = Arc::new(RecordingHandler::default());
        let schema = ViewSchema::new("contact-form")
            .with_field("email", FieldDefinition::new(FieldKind::Text, "Email"));
        let form = render(&schema, handlers(&handler));

        form.submit(BTreeMap::from([
            ("email".to_string(), json!("a@b.com")),
            ("injected".to_string(), json!("oops")),
        ]))
        .await;

        let values = handler.last.lock().unwrap().clone().unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.contains_key("email"));
    }
}
