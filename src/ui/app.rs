use crate::dashboard::{DashboardState, Effect};
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
}

/// Focusable inputs of the transaction form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Kind,
    Amount,
    Date,
    Division,
    Category,
    Description,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Kind,
            Self::Amount,
            Self::Date,
            Self::Division,
            Self::Category,
            Self::Description,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Date => "Date & Time",
            Self::Division => "Division",
            Self::Category => "Category",
            Self::Description => "Description",
        }
    }

    /// Free-text fields take typed characters; the rest cycle with Left/Right.
    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Amount | Self::Date | Self::Description)
    }

    pub(crate) fn next(self) -> Self {
        crate::ui::util::cycle(self, Self::all(), 1)
    }

    pub(crate) fn prev(self) -> Self {
        crate::ui::util::cycle(self, Self::all(), -1)
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Transaction table (indices into the filtered view)
    pub(crate) table_index: usize,
    pub(crate) table_scroll: usize,

    // Form
    pub(crate) form_field: FormField,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    /// Effects waiting to run before the next key is read.
    pub(crate) pending_effects: Vec<Effect>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            table_index: 0,
            table_scroll: 0,

            form_field: FormField::Kind,

            pending_action: None,
            confirm_message: String::new(),

            pending_effects: Vec::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn queue(&mut self, effect: Option<Effect>) {
        if let Some(effect) = effect {
            if !self.pending_effects.contains(&effect) {
                self.pending_effects.push(effect);
            }
        }
    }

    /// The row under the cursor in the filtered view.
    pub(crate) fn selected<'a>(&self, state: &'a DashboardState) -> Option<&'a Transaction> {
        state.visible().get(self.table_index).copied()
    }

    /// Keep the cursor inside the filtered view after it shrinks.
    pub(crate) fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.table_index = 0;
            self.table_scroll = 0;
            return;
        }
        if self.table_index >= len {
            self.table_index = len - 1;
        }
        if self.table_scroll > self.table_index {
            self.table_scroll = self.table_index;
        }
    }
}
