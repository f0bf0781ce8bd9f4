use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::pen::PointerEvent;
use crate::player::RefreshTicker;

use super::config::matches_binding;
use super::state::{EditorState, Mode};
use super::ui::Layout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// Only canvas cells changed; flush the damage.
    FlushCanvas,
    Redraw,
    Quit,
    ToggleFullscreen,
}

pub fn handle_event(state: &mut EditorState, layout: &Layout, event: Event) -> Result<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, layout, mouse),
        Event::Resize(_, _) => Ok(Action::Redraw),
        _ => Ok(Action::Continue),
    }
}

fn handle_key(state: &mut EditorState, key: KeyEvent) -> Result<Action> {
    let bindings = &state.config.key_bindings;

    if matches_binding(&bindings.fullscreen, &key) {
        return Ok(Action::ToggleFullscreen);
    }
    if matches_binding(&bindings.quit, &key) {
        return Ok(Action::Quit);
    }

    if let Mode::Playing { player, .. } = &mut state.mode {
        if matches_binding(&bindings.pause, &key) || matches_binding(&bindings.play, &key) {
            // The tick already scheduled lapses and hands control back.
            player.pause();
        }
        return Ok(Action::Continue);
    }

    if matches_binding(&bindings.add_frame, &key) {
        // A gesture in flight belongs to the old frame; the next drag must
        // not extend a stroke the new frame does not have.
        state.pen.reset();
        let index = state.session.add_frame()?;
        state.status_message = Some(format!("New frame {}", index + 1));
        return Ok(Action::Redraw);
    }
    if matches_binding(&bindings.play, &key) {
        start_playback(state)?;
        return Ok(Action::Redraw);
    }
    Ok(Action::Continue)
}

fn start_playback(state: &mut EditorState) -> Result<()> {
    let mut player = state.session.player(state.config.playback.player.clone())?;
    player.play();
    state.pen.reset();
    state.status_message = None;
    state.mode = Mode::Playing {
        player,
        ticker: RefreshTicker::new(state.config.playback.refresh_hz)?,
    };
    tracing::info!(frames = state.session.animation().len(), "playback requested");
    Ok(())
}

/// Translate a terminal mouse event into a pen event on the canvas.
///
/// Presses and drags outside the canvas are dropped; a release anywhere
/// ends the gesture.
pub fn to_pointer_event(layout: &Layout, mouse: &MouseEvent) -> Option<PointerEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => layout
            .to_canvas(mouse.column, mouse.row)
            .map(PointerEvent::Down),
        MouseEventKind::Drag(MouseButton::Left) => layout
            .to_canvas(mouse.column, mouse.row)
            .map(PointerEvent::Move),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}

fn handle_mouse(state: &mut EditorState, layout: &Layout, mouse: MouseEvent) -> Result<Action> {
    if state.mode.is_playing() {
        return Ok(Action::Continue);
    }
    let Some(event) = to_pointer_event(layout, &mouse) else {
        return Ok(Action::Continue);
    };
    match state.pen.handle(event) {
        Some(action) => {
            state.session.apply_pen(action)?;
            Ok(Action::FlushCanvas)
        }
        None => Ok(Action::Continue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::editor::config::EditorConfig;

    fn state() -> (EditorState, Layout) {
        let layout = Layout::compute(40, 13);
        let state = EditorState::new(EditorConfig::default(), layout.canvas_width, layout.canvas_height);
        (state, layout)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drag_gesture_records_one_stroke() {
        let (mut state, layout) = state();
        let events = [
            mouse(MouseEventKind::Down(MouseButton::Left), 2, 2),
            mouse(MouseEventKind::Drag(MouseButton::Left), 3, 2),
            mouse(MouseEventKind::Drag(MouseButton::Left), 4, 3),
            mouse(MouseEventKind::Up(MouseButton::Left), 4, 3),
            mouse(MouseEventKind::Drag(MouseButton::Left), 9, 9),
        ];
        let actions: Vec<_> = events
            .into_iter()
            .map(|e| handle_event(&mut state, &layout, e).unwrap())
            .collect();

        assert_eq!(
            actions,
            vec![
                Action::FlushCanvas,
                Action::FlushCanvas,
                Action::FlushCanvas,
                Action::Continue,
                Action::Continue,
            ]
        );
        let frame = state.session.animation().get_frame(None).unwrap();
        assert_eq!(frame.strokes().len(), 1);
        assert_eq!(frame.strokes()[0].len(), 3);
        // Row 2 on screen is canvas row 1 under the menu bar.
        assert_eq!(frame.strokes()[0].coords()[0].y(), 1.0);
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let (mut state, layout) = state();
        let action = handle_event(
            &mut state,
            &layout,
            mouse(MouseEventKind::Down(MouseButton::Left), 2, 0),
        )
        .unwrap();
        assert_eq!(action, Action::Continue);
        assert!(!state.pen.is_dragging());
    }

    #[test]
    fn add_frame_key_appends_and_retargets() {
        let (mut state, layout) = state();
        assert_eq!(handle_event(&mut state, &layout, press('+')).unwrap(), Action::Redraw);
        assert_eq!(state.session.frame_info(), (2, 2));
    }

    #[test]
    fn play_then_pause_and_mouse_is_ignored_while_playing() {
        let (mut state, layout) = state();
        handle_event(&mut state, &layout, press('p')).unwrap();
        assert!(state.mode.is_playing());

        let action = handle_event(
            &mut state,
            &layout,
            mouse(MouseEventKind::Down(MouseButton::Left), 2, 2),
        )
        .unwrap();
        assert_eq!(action, Action::Continue);
        assert!(state.session.animation().get_frame(None).unwrap().is_empty());

        handle_event(&mut state, &layout, press(' ')).unwrap();
        match &state.mode {
            Mode::Playing { player, .. } => {
                assert!(!player.is_playing());
                assert!(player.is_tick_pending());
            }
            Mode::Drawing => panic!("pause must leave the lapsing tick to end playback"),
        }
    }

    #[test]
    fn add_frame_mid_drag_ends_the_gesture() {
        let (mut state, layout) = state();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 2, 2);
        let drag = |column| mouse(MouseEventKind::Drag(MouseButton::Left), column, 2);

        handle_event(&mut state, &layout, down.clone()).unwrap();
        handle_event(&mut state, &layout, press('+')).unwrap();
        assert!(!state.pen.is_dragging());

        // The held button keeps dragging over the new, empty frame.
        assert_eq!(handle_event(&mut state, &layout, drag(3)).unwrap(), Action::Continue);
        assert!(state.session.animation().get_frame(Some(1)).unwrap().is_empty());

        // A fresh press draws on the new frame.
        handle_event(&mut state, &layout, down).unwrap();
        handle_event(&mut state, &layout, drag(4)).unwrap();
        let frames = state.session.animation().frames();
        assert_eq!(frames[0].strokes()[0].len(), 1);
        assert_eq!(frames[1].strokes().len(), 1);
        assert_eq!(frames[1].strokes()[0].len(), 2);
    }

    #[test]
    fn play_mid_drag_then_drawing_again_needs_a_new_press() {
        let (mut state, layout) = state();
        handle_event(&mut state, &layout, mouse(MouseEventKind::Down(MouseButton::Left), 2, 2)).unwrap();
        handle_event(&mut state, &layout, press('p')).unwrap();
        assert!(state.mode.is_playing());
        assert!(!state.pen.is_dragging());

        handle_event(&mut state, &layout, press(' ')).unwrap();
        // The lapsed tick hands control back to drawing.
        state.mode = Mode::Drawing;

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 5, 2);
        assert_eq!(handle_event(&mut state, &layout, drag.clone()).unwrap(), Action::Continue);
        assert_eq!(state.session.animation().get_frame(None).unwrap().strokes()[0].len(), 1);

        handle_event(&mut state, &layout, mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)).unwrap();
        assert_eq!(handle_event(&mut state, &layout, drag).unwrap(), Action::FlushCanvas);
        let frame = state.session.animation().get_frame(None).unwrap();
        assert_eq!(frame.strokes().len(), 2);
        assert_eq!(frame.strokes()[1].len(), 2);
    }

    #[test]
    fn release_outside_canvas_ends_the_gesture() {
        let (mut state, layout) = state();
        handle_event(&mut state, &layout, mouse(MouseEventKind::Down(MouseButton::Left), 2, 2)).unwrap();
        // Drags over the menu bar are dropped without ending the gesture.
        handle_event(&mut state, &layout, mouse(MouseEventKind::Drag(MouseButton::Left), 2, 0)).unwrap();
        assert!(state.pen.is_dragging());

        handle_event(&mut state, &layout, mouse(MouseEventKind::Up(MouseButton::Left), 2, 0)).unwrap();
        assert!(!state.pen.is_dragging());
        assert_eq!(state.session.animation().get_frame(None).unwrap().strokes()[0].len(), 1);
    }

    #[test]
    fn quit_key() {
        let (mut state, layout) = state();
        assert_eq!(handle_event(&mut state, &layout, press('q')).unwrap(), Action::Quit);
    }
}
