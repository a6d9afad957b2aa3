//! Options offered by select-style prompts

/// One choice in a select or multi-select prompt
///
/// Immutable once built; the builder methods consume `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<T> {
    value: T,
    label: String,
    hint: Option<String>,
}

impl<T: ToString> SelectOption<T> {
    /// Option whose label is the value's string form
    pub fn new(value: T) -> Self {
        let label = value.to_string();
        Self {
            value,
            label,
            hint: None,
        }
    }
}

impl<T> SelectOption<T> {
    /// Option with an explicit label, for values without a useful `Display`
    pub fn labeled<S: Into<String>>(value: T, label: S) -> Self {
        Self {
            value,
            label: label.into(),
            hint: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    /// Extra text shown while the option is highlighted
    pub fn with_hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl<T: ToString> From<T> for SelectOption<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
