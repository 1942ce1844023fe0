//! Keyboard dispatch for the browser surface.
//!
//! Pure mapping from a key event plus the current UI context to an action.
//! Priorities follow the modal > tooltip > help ordering: Escape always
//! closes the topmost layer first.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// What is currently on screen, from the dispatcher's point of view.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiContext {
    pub modal_open: bool,
    pub help_open: bool,
    pub tooltip_open: bool,
    /// Focus is inside a text input; printable shortcuts are suppressed.
    pub in_input: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    FocusSearch,
    CloseModal,
    CloseTooltip,
    CloseHelp,
    OpenHelp,
    ToggleSourceView,
    ModalPrevious,
    ModalNext,
    PagePrevious,
    PageNext,
    ListUp,
    ListDown,
    ActivateFocused,
}

pub fn dispatch(key: Key, ctx: &UiContext) -> Action {
    // Modal shortcuts take precedence over everything else.
    if ctx.modal_open {
        match key {
            Key::Escape => return Action::CloseModal,
            Key::Char('s') | Key::Char('S') if !ctx.in_input => {
                return Action::ToggleSourceView;
            }
            Key::ArrowLeft if !ctx.in_input => return Action::ModalPrevious,
            Key::ArrowRight if !ctx.in_input => return Action::ModalNext,
            _ => return Action::None,
        }
    }

    if ctx.help_open {
        return match key {
            Key::Escape => Action::CloseHelp,
            _ => Action::None,
        };
    }

    if key == Key::Escape {
        return if ctx.tooltip_open {
            Action::CloseTooltip
        } else {
            Action::None
        };
    }

    if ctx.in_input {
        return Action::None;
    }

    match key {
        Key::Char('?') => Action::OpenHelp,
        Key::Char('/') => Action::FocusSearch,
        Key::ArrowLeft => Action::PagePrevious,
        Key::ArrowRight => Action::PageNext,
        Key::ArrowUp => Action::ListUp,
        Key::ArrowDown => Action::ListDown,
        Key::Enter | Key::Char(' ') => Action::ActivateFocused,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(modal: bool, help: bool, tooltip: bool, input: bool) -> UiContext {
        UiContext {
            modal_open: modal,
            help_open: help,
            tooltip_open: tooltip,
            in_input: input,
        }
    }

    #[test]
    fn test_escape_closes_modal_before_tooltip() {
        assert_eq!(dispatch(Key::Escape, &ctx(true, false, true, false)), Action::CloseModal);
        assert_eq!(dispatch(Key::Escape, &ctx(false, false, true, false)), Action::CloseTooltip);
    }

    #[test]
    fn test_source_toggle_only_while_modal_open() {
        assert_eq!(dispatch(Key::Char('s'), &ctx(true, false, false, false)), Action::ToggleSourceView);
        assert_eq!(dispatch(Key::Char('S'), &ctx(true, false, false, false)), Action::ToggleSourceView);
        assert_eq!(dispatch(Key::Char('s'), &ctx(false, false, false, false)), Action::None);
    }

    #[test]
    fn test_arrows_navigate_modal_or_pages() {
        assert_eq!(dispatch(Key::ArrowRight, &ctx(true, false, false, false)), Action::ModalNext);
        assert_eq!(dispatch(Key::ArrowLeft, &ctx(true, false, false, false)), Action::ModalPrevious);
        assert_eq!(dispatch(Key::ArrowRight, &ctx(false, false, false, false)), Action::PageNext);
        assert_eq!(dispatch(Key::ArrowLeft, &ctx(false, false, false, false)), Action::PagePrevious);
    }

    #[test]
    fn test_help_opens_only_when_nothing_else_is_open() {
        assert_eq!(dispatch(Key::Char('?'), &ctx(false, false, false, false)), Action::OpenHelp);
        assert_eq!(dispatch(Key::Char('?'), &ctx(true, false, false, false)), Action::None);
        assert_eq!(dispatch(Key::Escape, &ctx(false, true, false, false)), Action::CloseHelp);
    }

    #[test]
    fn test_slash_focuses_search() {
        assert_eq!(dispatch(Key::Char('/'), &ctx(false, false, false, false)), Action::FocusSearch);
    }

    #[test]
    fn test_input_suppresses_printable_shortcuts() {
        assert_eq!(dispatch(Key::Char('/'), &ctx(false, false, false, true)), Action::None);
        assert_eq!(dispatch(Key::Char('s'), &ctx(true, false, false, true)), Action::None);
        // Escape still works from inside an input.
        assert_eq!(dispatch(Key::Escape, &ctx(true, false, false, true)), Action::CloseModal);
    }

    #[test]
    fn test_activation_keys() {
        assert_eq!(dispatch(Key::Enter, &ctx(false, false, false, false)), Action::ActivateFocused);
        assert_eq!(dispatch(Key::Char(' '), &ctx(false, false, false, false)), Action::ActivateFocused);
    }
}
