//! Full-screen fuzzy picker for choosing a note to edit.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout},
    prelude::{Backend, CrosstermBackend},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tnote_notes::NoteRecord;

use crate::fuzzy::rank;
use crate::tui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Continue,
    Cancel,
    Accept(Option<usize>),
}

pub struct PickerState<'a> {
    notes: &'a [NoteRecord],
    query: String,
    matches: Vec<usize>,
    selected: usize,
}

impl<'a> PickerState<'a> {
    pub fn new(notes: &'a [NoteRecord], query: &str) -> Self {
        let mut state = Self {
            notes,
            query: query.to_string(),
            matches: Vec::new(),
            selected: 0,
        };
        state.refilter();
        state
    }

    fn refilter(&mut self) {
        self.matches = rank(&self.query, self.notes);
        self.selected = 0;
    }

    /// Index into the full note list of the highlighted entry.
    pub fn selected_note(&self) -> Option<usize> {
        self.matches.get(self.selected).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        if key.kind != KeyEventKind::Press {
            return PickerAction::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return PickerAction::Cancel,
            KeyCode::Char('c') if ctrl => return PickerAction::Cancel,
            KeyCode::Enter => return PickerAction::Accept(self.selected_note()),
            KeyCode::Up => self.move_by(-1),
            KeyCode::Char('p') if ctrl => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::Char('n') if ctrl => self.move_by(1),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
        PickerAction::Continue
    }

    fn move_by(&mut self, delta: isize) {
        if self.matches.is_empty() {
            return;
        }
        let last = self.matches.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }
}

/// Runs its closure when dropped, so terminal state is restored on every
/// exit path.
struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> OnDrop<F> {
    fn new(restore: F) -> Self {
        Self(Some(restore))
    }
}

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.0.take() {
            restore();
        }
    }
}

/// Let the user pick one of `notes`. `None` when cancelled.
///
/// Blocks on terminal input; run it off the async runtime.
pub fn pick(notes: &[NoteRecord], query: &str) -> io::Result<Option<usize>> {
    let mut state = PickerState::new(notes, query);

    terminal::enable_raw_mode()?;
    let _raw_mode = OnDrop::new(|| {
        let _ = terminal::disable_raw_mode();
    });

    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let _alternate_screen = OnDrop::new(|| {
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    });

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let result = run_loop(&mut terminal, &mut state);
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut PickerState<'_>,
) -> io::Result<Option<usize>> {
    loop {
        terminal.draw(|frame| draw(frame, state))?;

        if let Event::Key(key) = event::read()? {
            match state.handle_key(key) {
                PickerAction::Continue => {}
                PickerAction::Cancel => return Ok(None),
                PickerAction::Accept(choice) => return Ok(choice),
            }
        }
    }
}

fn draw(frame: &mut Frame, state: &PickerState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(frame.area());

    let input = Paragraph::new(format!("> {}", state.query)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(theme::query_border()),
    );
    frame.render_widget(input, chunks[0]);
    frame.set_cursor_position((
        chunks[0].x + 3 + state.query.chars().count() as u16,
        chunks[0].y + 1,
    ));

    let items: Vec<ListItem> = state
        .matches
        .iter()
        .map(|&idx| {
            let note = &state.notes[idx];
            let mut spans = vec![Span::styled(note.filename().to_string(), theme::filename())];
            if !note.title().is_empty() {
                spans.push(Span::raw(format!("  {}", note.title())));
            }
            if !note.tags().is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", note.tags().join(", ")),
                    theme::tags(),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Notes ({}/{}) ", state.matches.len(), state.notes.len()))
                .borders(Borders::ALL)
                .border_style(theme::list_border()),
        )
        .highlight_style(theme::highlight())
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default().with_selected(state.selected_note().map(|_| state.selected));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnote_notes::Frontmatter;

    fn notes() -> Vec<NoteRecord> {
        ["20240101-alpha.md", "20240102-beta.md", "20240103-gamma.md"]
            .into_iter()
            .map(|name| NoteRecord::new(name, Frontmatter::default()).unwrap())
            .collect()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_filters_and_enter_accepts() {
        let notes = notes();
        let mut state = PickerState::new(&notes, "");
        assert_eq!(state.selected_note(), Some(0));

        for c in "gam".chars() {
            assert_eq!(state.handle_key(press(KeyCode::Char(c))), PickerAction::Continue);
        }
        assert_eq!(state.handle_key(press(KeyCode::Enter)), PickerAction::Accept(Some(2)));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let notes = notes();
        let mut state = PickerState::new(&notes, "");

        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.selected_note(), Some(0));
        for _ in 0..5 {
            state.handle_key(press(KeyCode::Down));
        }
        assert_eq!(state.selected_note(), Some(2));
        state.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        assert_eq!(state.selected_note(), Some(1));
    }

    #[test]
    fn test_no_match_accepts_nothing() {
        let notes = notes();
        let mut state = PickerState::new(&notes, "zzz");
        assert_eq!(state.handle_key(press(KeyCode::Enter)), PickerAction::Accept(None));

        state.handle_key(press(KeyCode::Backspace));
        state.handle_key(press(KeyCode::Backspace));
        state.handle_key(press(KeyCode::Backspace));
        assert_eq!(state.selected_note(), Some(0));
    }

    #[test]
    fn test_restore_runs_on_early_return() {
        use std::cell::Cell;

        fn setup(restored: &Cell<bool>, fail: bool) -> io::Result<()> {
            let _guard = OnDrop::new(|| restored.set(true));
            if fail {
                return Err(io::Error::other("no terminal"));
            }
            Ok(())
        }

        let restored = Cell::new(false);
        assert!(setup(&restored, true).is_err());
        assert!(restored.get());

        let restored = Cell::new(false);
        setup(&restored, false).unwrap();
        assert!(restored.get());
    }

    #[test]
    fn test_escape_and_ctrl_c_cancel() {
        let notes = notes();
        let mut state = PickerState::new(&notes, "");
        assert_eq!(state.handle_key(press(KeyCode::Esc)), PickerAction::Cancel);
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PickerAction::Cancel
        );
    }
}
