//! Element handles the page controllers write to and read from.
//!
//! Each page element the behavior layer touches is a small capability
//! trait. The controllers hold boxed handles, so a browser binding, the
//! CLI's in-memory page, or a test fake can all stand behind them. Every
//! handle is optional; a missing element switches its interaction off.

use std::sync::{Arc, Mutex, MutexGuard};

/// Element whose content is replaced wholesale with markup.
pub trait HtmlContainer: Send {
    fn set_html(&mut self, html: &str);
}

/// Element with a current string value (text input, select).
pub trait TextInput: Send {
    fn value(&self) -> String;
}

/// Element showing plain text.
pub trait TextDisplay: Send {
    fn set_text(&mut self, text: &str);
}

/// A form: its current named entries, and a way to restore them.
pub trait FormFields: Send {
    fn entries(&self) -> Vec<(String, String)>;
    fn reset(&mut self);
}

/// Handles used by the project listing.
#[derive(Default)]
pub struct PageElements {
    pub projects: Option<Box<dyn HtmlContainer>>,
    pub search: Option<Box<dyn TextInput>>,
    pub sort: Option<Box<dyn TextInput>>,
    pub year: Option<Box<dyn TextDisplay>>,
}

/// Handles used by the contact form.
#[derive(Default)]
pub struct ContactElements {
    pub form: Option<Box<dyn FormFields>>,
    pub status: Option<Box<dyn TextDisplay>>,
}

fn lock<T>(cell: &Mutex<T>) -> MutexGuard<'_, T> {
    cell.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory container. Clones share content, so a caller can keep one
/// clone to read back what the controller rendered.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    html: Arc<Mutex<String>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> String {
        lock(&self.html).clone()
    }

    /// Number of times the content has been replaced.
    pub fn writes(&self) -> usize {
        *lock(&self.writes)
    }
}

impl HtmlContainer for MemoryContainer {
    fn set_html(&mut self, html: &str) {
        *lock(&self.html) = html.to_string();
        *lock(&self.writes) += 1;
    }
}

/// In-memory input or select element.
#[derive(Debug, Clone, Default)]
pub struct MemoryInput {
    value: Arc<Mutex<String>>,
}

impl MemoryInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: Arc::new(Mutex::new(value.to_string())),
        }
    }

    pub fn set(&self, value: &str) {
        *lock(&self.value) = value.to_string();
    }
}

impl TextInput for MemoryInput {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }
}

/// In-memory text element.
#[derive(Debug, Clone, Default)]
pub struct MemoryText {
    text: Arc<Mutex<String>>,
}

impl MemoryText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        lock(&self.text).clone()
    }
}

impl TextDisplay for MemoryText {
    fn set_text(&mut self, text: &str) {
        *lock(&self.text) = text.to_string();
    }
}

/// In-memory form. Fields keep their declaration order; `reset` puts every
/// field back to the value it was created with.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: Arc<Mutex<Vec<(String, String)>>>,
    defaults: Arc<Vec<(String, String)>>,
}

impl MemoryForm {
    /// A form whose fields all start out empty.
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let defaults: Vec<(String, String)> = names
            .into_iter()
            .map(|name| (name.into(), String::new()))
            .collect();
        Self {
            fields: Arc::new(Mutex::new(defaults.clone())),
            defaults: Arc::new(defaults),
        }
    }

    /// Sets a field's value, adding the field if the form lacks it.
    pub fn set(&self, name: &str, value: &str) {
        let mut fields = lock(&self.fields);
        match fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn value(&self, name: &str) -> Option<String> {
        lock(&self.fields)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl FormFields for MemoryForm {
    fn entries(&self) -> Vec<(String, String)> {
        lock(&self.fields).clone()
    }

    fn reset(&mut self) {
        let mut fields = lock(&self.fields);
        for (name, value) in fields.iter_mut() {
            *value = self
                .defaults
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
        }
    }
}
