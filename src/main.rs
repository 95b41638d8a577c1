use crossbeam_channel::Receiver;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use wortquiz::api::ApiClient;
use wortquiz::api_worker::spawn_api_worker;
use wortquiz::app::App;
use wortquiz::config::AppConfig;
use wortquiz::models::{ApiResponse, AppState};
use wortquiz::{db, logger, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    logger::init(&config.log_file);
    logger::log(&format!("Starting wortquiz against {}", config.api_url));

    let conn = match db::init_db(config.db_path.as_deref()) {
        Ok(conn) => Some(conn),
        Err(e) => {
            logger::log(&format!("Local database unavailable, history disabled: {}", e));
            None
        }
    };

    let client = ApiClient::new(&config).map_err(|e| io::Error::other(e.to_string()))?;
    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let worker = spawn_api_worker(Arc::new(client), response_tx, request_rx)?;

    let mut app = App::new(config, conn, request_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Closing the request channel lets the worker finish queued score
    // submissions and exit.
    drop(app);
    if worker.join().is_err() {
        logger::log("API worker panicked");
    }
    logger::log("Exiting wortquiz");

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    responses: &Receiver<ApiResponse>,
) -> io::Result<()> {
    loop {
        while let Ok(response) = responses.try_recv() {
            app.handle_response(response);
        }

        terminal.draw(|f| draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
}

fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Home => ui::draw_home(
            f,
            app.selected_home_index,
            &app.history,
            &app.config.api_url,
        ),
        AppState::Setup => ui::draw_setup(f, &app.setup),
        AppState::Loading => ui::draw_loading(f, app.setup.game),
        AppState::Quiz => {
            if let Some(quiz) = &app.quiz {
                ui::draw_quiz(f, quiz, app.personal_best);
            }
        }
        AppState::QuizQuitConfirm => ui::draw_quit_confirmation(f),
        AppState::Summary => {
            if let Some(quiz) = &app.quiz {
                ui::draw_summary(f, quiz, app.personal_best);
            }
        }
        AppState::Statistics => ui::draw_statistics(f, &app.statistics),
    }
}
