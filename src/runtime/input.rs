use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{Intent, PlayerState};
use crate::ui::ScreenLayout;

/// Largest slider value a forward step can reach. A step never lands on 1.0,
/// which means "dragged to the end".
const LAST_STEP: f32 = 1.0 - f32::EPSILON;

/// What the event loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Intent(Intent),
}

/// Map a key press onto a command. Relative seeks are computed from the
/// current slider position.
pub fn command_for_key(key: KeyEvent, state: &PlayerState, seek_step: f32) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let intent = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => Intent::TogglePlayPause,
        KeyCode::Char('s') => Intent::Stop,
        KeyCode::Char('l') | KeyCode::Right => Intent::Next,
        KeyCode::Char('h') | KeyCode::Left => Intent::Previous,
        KeyCode::Char('L') => Intent::Seek((state.slider_position + seek_step).min(LAST_STEP)),
        KeyCode::Char('H') => Intent::Seek((state.slider_position - seek_step).max(0.0)),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let tenth = c.to_digit(10).unwrap_or(0) as f32;
            Intent::Seek(tenth / 10.0)
        }
        _ => return None,
    };
    Some(Command::Intent(intent))
}

/// Left clicks and drags on the progress bar seek.
pub fn command_for_mouse(mouse: MouseEvent, layout: &ScreenLayout) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => layout
            .progress_fraction_at(mouse.column, mouse.row)
            .map(|f| Command::Intent(Intent::Seek(f))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn at(slider: f32) -> PlayerState {
        PlayerState {
            slider_position: slider,
            ..PlayerState::default()
        }
    }

    #[test]
    fn transport_keys_map_to_intents() {
        let s = PlayerState::default();
        let cases = [
            (KeyCode::Char(' '), Intent::TogglePlayPause),
            (KeyCode::Char('p'), Intent::TogglePlayPause),
            (KeyCode::Char('s'), Intent::Stop),
            (KeyCode::Char('l'), Intent::Next),
            (KeyCode::Right, Intent::Next),
            (KeyCode::Char('h'), Intent::Previous),
            (KeyCode::Left, Intent::Previous),
        ];
        for (code, intent) in cases {
            assert_eq!(
                command_for_key(press(code), &s, 0.05),
                Some(Command::Intent(intent)),
                "{code:?}"
            );
        }
    }

    #[test]
    fn quit_keys() {
        let s = PlayerState::default();
        assert_eq!(command_for_key(press(KeyCode::Char('q')), &s, 0.05), Some(Command::Quit));
        assert_eq!(command_for_key(press(KeyCode::Esc), &s, 0.05), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(ctrl_c, &s, 0.05), Some(Command::Quit));
    }

    #[test]
    fn relative_seeks_clamp_to_the_slider_range() {
        let seek = |slider: f32, code: KeyCode| match command_for_key(press(code), &at(slider), 0.25) {
            Some(Command::Intent(Intent::Seek(f))) => f,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(seek(0.5, KeyCode::Char('L')), 0.75);
        assert_eq!(seek(0.9, KeyCode::Char('L')), LAST_STEP);
        assert!(seek(0.99, KeyCode::Char('L')) < 1.0);
        assert_eq!(seek(0.5, KeyCode::Char('H')), 0.25);
        assert_eq!(seek(0.1, KeyCode::Char('H')), 0.0);
    }

    #[test]
    fn digits_jump_to_tenths() {
        let s = PlayerState::default();
        assert_eq!(
            command_for_key(press(KeyCode::Char('0')), &s, 0.05),
            Some(Command::Intent(Intent::Seek(0.0)))
        );
        assert_eq!(
            command_for_key(press(KeyCode::Char('5')), &s, 0.05),
            Some(Command::Intent(Intent::Seek(0.5)))
        );
    }

    #[test]
    fn unbound_keys_and_releases_are_ignored() {
        let s = PlayerState::default();
        assert_eq!(command_for_key(press(KeyCode::Char('x')), &s, 0.05), None);
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(release, &s, 0.05), None);
    }

    #[test]
    fn clicking_the_progress_bar_seeks() {
        let layout = ScreenLayout {
            progress: Rect::new(0, 10, 22, 3),
            ..ScreenLayout::default()
        };
        let click = |kind, column, row| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            command_for_mouse(click(MouseEventKind::Down(MouseButton::Left), 11, 11), &layout),
            Some(Command::Intent(Intent::Seek(0.5)))
        );
        assert_eq!(
            command_for_mouse(click(MouseEventKind::Drag(MouseButton::Left), 21, 11), &layout),
            Some(Command::Intent(Intent::Seek(1.0)))
        );
        assert_eq!(
            command_for_mouse(click(MouseEventKind::Down(MouseButton::Left), 11, 2), &layout),
            None
        );
        assert_eq!(
            command_for_mouse(click(MouseEventKind::Moved, 11, 11), &layout),
            None
        );
    }
}
