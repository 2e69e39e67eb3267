//! Widget UI states.

/// Which form is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Volunteer,
    Contact,
}

impl FormKind {
    /// Wire/analytics name for this form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Volunteer => "volunteer",
            FormKind::Contact => "contact",
        }
    }
}

/// The widget's UI state.
///
/// Transitions (driven by [`crate::WidgetEngine`]):
///
/// ```text
/// Closed ──toggle──▶ OpenIdle ──send──▶ OpenTyping ──reply──▶ OpenIdle
///    ▲                  │
///    │                  ├──action button──▶ OpenForm(kind)
///    └──toggle / outside click── any open state (resets active form)
/// ```
///
/// A reply arriving while `Closed` appends to the hidden transcript but
/// never reopens the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Only the launcher button is visible.
    #[default]
    Closed,
    /// Panel open, input ready.
    OpenIdle,
    /// Panel open, bot typing indicator shown.
    OpenTyping,
    /// Panel open with a form; the actions panel is hidden.
    OpenForm(FormKind),
}

impl WidgetState {
    /// True for every state except `Closed`.
    pub fn is_open(&self) -> bool {
        !matches!(self, WidgetState::Closed)
    }

    /// The form on screen, if any.
    pub fn active_form(&self) -> Option<FormKind> {
        match self {
            WidgetState::OpenForm(kind) => Some(*kind),
            _ => None,
        }
    }
}
