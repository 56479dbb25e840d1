use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Things a key press can ask the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    CursorUp,
    CursorDown,
    ToggleRow,
    ToggleAll,
    PrevPage,
    NextPage,
    /// Click the n-th visible page button (0-based)
    PageButton(usize),
    GotoPage,
    SelectRows,
    ClearSelection,
    /// Abort a running "select N rows"
    CancelSelection,
    Retry,
}

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<(KeyCode, KeyModifiers)>,
    pub label: &'static str,
    pub description: &'static str,
    pub action: Action,
}

impl KeyBinding {
    pub fn new(
        keys: &[(KeyCode, KeyModifiers)],
        label: &'static str,
        description: &'static str,
        action: Action,
    ) -> Self {
        Self {
            keys: keys.to_vec(),
            label,
            description,
            action,
        }
    }

    /// Shift is ignored for plain characters since terminals disagree on
    /// whether `?` arrives with it
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|&(code, modifiers)| {
            code == event.code
                && (modifiers == event.modifiers
                    || (matches!(code, KeyCode::Char(_))
                        && modifiers == KeyModifiers::NONE
                        && event.modifiers == KeyModifiers::SHIFT))
        })
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyCode::*;
        const NONE: KeyModifiers = KeyModifiers::NONE;
        const CTRL: KeyModifiers = KeyModifiers::CONTROL;

        Self {
            bindings: vec![
                KeyBinding::new(&[(Char('c'), CTRL), (Char('q'), NONE)], "q", "Quit", Action::Quit),
                KeyBinding::new(&[(Char('g'), CTRL), (Char('?'), NONE)], "?", "Show/hide help", Action::ToggleHelp),
                KeyBinding::new(&[(Up, NONE), (Char('k'), NONE)], "↑/k", "Previous row", Action::CursorUp),
                KeyBinding::new(&[(Down, NONE), (Char('j'), NONE)], "↓/j", "Next row", Action::CursorDown),
                KeyBinding::new(&[(Char(' '), NONE)], "space", "Toggle row checkbox", Action::ToggleRow),
                KeyBinding::new(&[(Char('a'), NONE)], "a", "Select/deselect all rows on page", Action::ToggleAll),
                KeyBinding::new(&[(Left, NONE), (Char('h'), NONE)], "←/h", "Previous page", Action::PrevPage),
                KeyBinding::new(&[(Right, NONE), (Char('l'), NONE)], "→/l", "Next page", Action::NextPage),
                KeyBinding::new(&[(Char('g'), NONE)], "g", "Go to page", Action::GotoPage),
                KeyBinding::new(&[(Char('s'), NONE)], "s", "Select N rows across pages", Action::SelectRows),
                KeyBinding::new(&[(Char('c'), NONE)], "c", "Clear selection", Action::ClearSelection),
                KeyBinding::new(&[(Char('r'), NONE)], "r", "Retry failed request", Action::Retry),
                KeyBinding::new(&[(Esc, NONE)], "esc", "Cancel running row selection", Action::CancelSelection),
            ],
        }
    }
}

impl KeyMap {
    /// Resolve a key press to an action
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        if let KeyCode::Char(c @ '0'..='9') = event.code {
            if event.modifiers == KeyModifiers::NONE {
                let index = if c == '0' { 9 } else { c as usize - '1' as usize };
                return Some(Action::PageButton(index));
            }
        }

        self.bindings
            .iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Help text rows: key label and description
    pub fn help_entries(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|binding| (binding.label, binding.description))
            .collect();
        entries.insert(8, ("1-9, 0", "Jump to page button"));
        entries
    }
}
