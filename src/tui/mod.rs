pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::view::FeedView;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut tui_app = TuiApp::new(FeedView::new(config.display.clone()));
    let event_handler = EventHandler::new(Duration::from_millis(100));

    let mut feed_rx = ctx.store.subscribe();
    let mut poller = ctx.start_polling();
    info!("Live feed started for {}", ctx.endpoint);

    loop {
        if feed_rx.has_changed().unwrap_or(false) {
            let snapshot = feed_rx.borrow_and_update().clone();
            tui_app.set_feed(snapshot);
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                tui_app.clear_status();
                match config.keybindings.get_action(&key) {
                    Action::Quit => tui_app.should_quit = true,
                    Action::MoveUp => tui_app.move_up(),
                    Action::MoveDown => tui_app.move_down(),
                    Action::Activate => tui_app.activate_selected(ctx.navigator.as_ref()),
                    Action::Close => tui_app.close_modal(),
                    Action::Refresh => {
                        // No-op inside the store if a poll is already running.
                        let store = ctx.store.clone();
                        tokio::spawn(async move {
                            store.update().await;
                        });
                    }
                    Action::None => {}
                }
            }
            AppEvent::Click(column, row) => {
                tui_app.clear_status();
                tui_app.handle_click(column, row, ctx.navigator.as_ref());
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    poller.stop();
    ctx.store.dispose();
    Ok(())
}
