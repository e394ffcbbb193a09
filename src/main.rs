use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use exam_prep::{App, Catalog, Cli, Config, db, logger, ui};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse());

    logger::init(&config.log_file, config.log_level)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;
    log::info!(
        "starting exam-prep (data {}, db {})",
        config.data_dir.display(),
        config.db_path.display()
    );

    let catalog = Catalog::load(&config.data_dir).with_context(|| {
        format!(
            "failed to load question banks from {}",
            config.data_dir.display()
        )
    })?;
    let conn = db::init_db(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    let mut app =
        App::new(catalog, conn, config.subject.as_deref()).context("failed to read saved state")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("exiting");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.handle_key(key) {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => {
                    log::error!("{}", e);
                    app.status = Some(format!("Error: {}", e));
                }
            }
        }
    }
}
