use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;

use coverdeck_core::{color, covers, AppConfig, CarouselController, ExtractionRequest};
use coverdeck_tui::{
    app::App,
    event::{AppEvent, EventHandler, ExtractionResult},
    input::handle_key_event,
    theme::Theme,
    widgets::{CarouselWidget, StatusBarWidget},
};

pub async fn run(config: AppConfig, covers_dir: Option<PathBuf>) -> Result<()> {
    let dir = covers_dir.unwrap_or_else(|| config.general.covers_dir.clone());
    let covers = covers::load_covers(&dir)?;
    tracing::info!("Loaded {} covers from {}", covers.len(), dir.display());

    let controller = CarouselController::new(covers, &config);
    let mut app = App::new(controller, config.ui.scroll.clone(), Theme::default());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("coverdeck"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.scroll.animation_fps);

    let result = event_loop(&mut terminal, &mut app, &event_handler).await;

    // Always restore the terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ExtractionResult>();

    // Seed viewport size and kick off extraction for the first cover
    let size = terminal.size()?;
    if let Some(request) = app.on_resize(size.width, size.height) {
        spawn_extraction(app, request, tx.clone());
    }

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let carousel_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };
            let status_area = Rect {
                x: area.x,
                y: area.y + carousel_area.height,
                width: area.width,
                height: area.height - carousel_area.height,
            };

            CarouselWidget::render(frame, carousel_area, app);
            StatusBarWidget::render(frame, status_area, app);
        })?;

        match event_handler.next(app.is_animating())? {
            Some(AppEvent::Key(key)) => app.handle_action(handle_key_event(key)),
            Some(AppEvent::Resize(width, height)) => {
                if let Some(request) = app.on_resize(width, height) {
                    spawn_extraction(app, request, tx.clone());
                }
            }
            Some(AppEvent::Tick) | None => {}
        }

        if let Some(request) = app.on_tick() {
            spawn_extraction(app, request, tx.clone());
        }

        while let Ok(result) = rx.try_recv() {
            app.apply_extraction(result);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Run one extraction on a blocking worker; the pixel snapshot is immutable
/// and stale results are discarded on arrival, so no cancellation is needed
fn spawn_extraction(
    app: &App,
    request: ExtractionRequest,
    tx: mpsc::UnboundedSender<ExtractionResult>,
) {
    let extractor = app.controller.extractor_config().clone();
    let ExtractionRequest {
        generation,
        index,
        image,
    } = request;

    tokio::task::spawn_blocking(move || {
        let color = color::extract(&image, &extractor);
        let _ = tx.send(ExtractionResult {
            generation,
            index,
            color,
        });
    });
}
