mod config;
mod keys;
mod logging;

use anyhow::Context;
use clap::Parser;

fn main() -> std::process::ExitCode {
    let config = config::Config::parse();

    // The terminal is restored by the time `run` returns, so errors print cleanly.
    match run(&config) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fred: {err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(config: &config::Config) -> anyhow::Result<()> {
    if let Some(log_file) = &config.log_file {
        logging::init(log_file)?;
    }

    let mut doc = editor_state::document::Document::open(&config.path)
        .with_context(|| format!("failed to open '{}'", config.path.display()))?;
    let mut session =
        renderer::terminal::TerminalSession::acquire().context("failed to set up the terminal")?;
    let (rows, cols) = session.size().context("failed to query the terminal size")?;
    let mut viewport = layout::viewport::Viewport::new(rows, cols);

    loop {
        let win = viewport.follow(doc.text_buffer.line_index(), doc.cursor());

        session
            .paint(&renderer::frame::Frame::compose(&doc, &viewport, win))
            .context("failed to draw")?;

        match crossterm::event::read().context("failed to read input")? {
            crossterm::event::Event::Key(event) => {
                if let Some(key) = keys::translate(event)
                    && doc
                        .handle_key(key)
                        .with_context(|| format!("failed to handle {key:?}"))?
                        == editor_state::input::Flow::Quit
                {
                    break;
                }
            }
            crossterm::event::Event::Resize(cols, rows) => {
                tracing::debug!(rows, cols, "resized");
                viewport.resize(usize::from(rows), usize::from(cols));
            }
            _ => {}
        }
    }

    tracing::info!(
        path = %config.path.display(),
        dirty = doc.text_buffer.is_dirty(),
        "session closed"
    );

    Ok(())
}
