#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SwapId(pub usize);

/// How a simple input field gets swapped for a richer one
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapConfig {
    /// Translation key of the text shown in the simple field while empty
    pub default_text_key: String,

    /// Name under which the rich control's value gets submitted
    pub field_name: String,

    /// If false, the form cannot be submitted while the rich control is empty
    pub optional: bool,

    /// Use a textarea as rich control, rather than a plain text input
    pub use_textarea: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapState {
    /// Rich control hidden, simple field showing its default text
    SimpleVisible,

    /// Simple field hidden and disabled, rich control shown
    RichVisible,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapView {
    pub state: SwapState,

    /// Whether the simple field currently shows the default text
    pub showing_default: bool,

    /// Translated default text, once known
    pub default_text: Option<String>,

    /// Value of the rich control
    pub value: String,

    pub optional: bool,
}

impl SwapView {
    /// Fields that already have a value start with the rich control shown
    pub fn new(value: String, optional: bool) -> SwapView {
        let state = match value.is_empty() {
            true => SwapState::SimpleVisible,
            false => SwapState::RichVisible,
        };
        SwapView {
            state,
            showing_default: state == SwapState::SimpleVisible,
            default_text: None,
            value,
            optional,
        }
    }

    pub fn simple_hidden(&self) -> bool {
        self.state == SwapState::RichVisible
    }

    pub fn simple_disabled(&self) -> bool {
        self.simple_hidden()
    }

    pub fn rich_hidden(&self) -> bool {
        self.state == SwapState::SimpleVisible
    }

    /// Value to set on the simple field, if it should be changed
    pub fn simple_value(&self) -> Option<&str> {
        match (self.state, self.showing_default) {
            (SwapState::SimpleVisible, true) => self.default_text.as_deref(),
            _ => None,
        }
    }

    /// The simple field got focus. Returns whether the rich control got shown.
    pub fn focus_simple(&mut self) -> bool {
        if self.state == SwapState::RichVisible {
            return false;
        }
        self.state = SwapState::RichVisible;
        self.showing_default = false;
        true
    }

    /// The rich control lost focus while holding `value`. Returns whether the
    /// simple field got shown back, in which case its default text needs to
    /// be fetched again.
    pub fn blur_rich(&mut self, value: String) -> bool {
        self.value = value;
        if self.state == SwapState::SimpleVisible || !self.value.is_empty() {
            return false;
        }
        self.state = SwapState::SimpleVisible;
        self.showing_default = true;
        true
    }

    /// Returns whether the simple field needs to be rendered again
    pub fn default_text_arrived(&mut self, text: String) -> bool {
        self.default_text = Some(text);
        self.simple_value().is_some()
    }

    /// The form is being submitted with the rich control holding `value`
    pub fn allows_submit(&mut self, value: String) -> bool {
        self.value = value;
        self.optional || !self.value.is_empty()
    }
}
