//! Event loop

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::{ApiClient, Outcome};
use crate::ui::{draw::draw, FormAction, FormState};

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the form until the operator quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails. Failed predictions
/// are shown in the form, not returned.
pub fn run(client: &ApiClient) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = FormState::new();

    loop {
        terminal.draw(|f| draw(f, &state))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match state.handle_key(k.code) {
                    FormAction::Quit => break,
                    FormAction::Submit => submit(&mut terminal, &mut state, client)?,
                    FormAction::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

/// Show the spinner, then block on the request
fn submit<B: Backend>(terminal: &mut Terminal<B>, state: &mut FormState, client: &ApiClient) -> Result<()> {
    let payload = state.payload();
    state.busy = true;
    terminal.draw(|f| draw(f, state))?;

    let result = client.predict(&payload);
    if let Err(e) = &result {
        log::warn!("Prediction failed: {}", e);
    }

    state.outcome = Some(Outcome::from_result(result));
    state.busy = false;
    Ok(())
}
