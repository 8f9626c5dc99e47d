use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Back,
    Forward,
}

pub(super) fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}

/// Moves a selection through `indices`, starting from the nearest end when
/// nothing is selected and stopping at either end.
pub(super) fn step_selection(indices: &[usize], current: Option<usize>, step: Step) -> Option<usize> {
    let next = match (current, step) {
        (None, Step::Forward) => indices.first().copied(),
        (None, Step::Back) => indices.last().copied(),
        (Some(at), Step::Forward) => indices.iter().copied().find(|&idx| idx > at).or(Some(at)),
        (Some(at), Step::Back) => indices.iter().copied().rev().find(|&idx| idx < at).or(Some(at)),
    };
    next.filter(|idx| indices.contains(idx))
}
