//! Widget gallery.
//!
//! Walks through each widget inline in the current terminal:
//! a box, a text prompt, an animated progress bar and a queue of alerts.
//!
//! Run with: cargo run --example gallery
//! Logs go to stderr: RUST_LOG=spark_widgets=debug cargo run --example gallery 2>gallery.log

use std::thread;
use std::time::{Duration, Instant};

use crossterm::terminal;
use spark_widgets::primitives::PatternRule;
use spark_widgets::{
    Alert, AlertType, BoxProps, BoxWidget, BorderStyle, CrosstermKeys, CrosstermTerminal,
    EngineConfig, Error, InlineRenderer, InputProps, KeyCode, KeySource, ProgressBar,
    ProgressProps, ProgressStyle, Terminal, TextAlign, TextInput, Widget,
};
use tracing_subscriber::EnvFilter;

/// Leaves raw mode on every exit path.
struct RawMode;

impl RawMode {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let theme = config.theme()?;

    let _raw = RawMode::enable()?;
    let mut term = CrosstermTerminal::stdout();
    let mut keys = CrosstermKeys;

    // Box
    let intro = BoxWidget::new(BoxProps {
        title: Some("spark-widgets".into()),
        title_align: TextAlign::Center,
        content: "A box, a prompt, a progress bar and some alerts. Escape cancels the prompt."
            .into(),
        border_style: BorderStyle::Rounded,
        shadow: true,
        ..BoxProps::new(40, 5)
    })?;
    let mut renderer = InlineRenderer::new();
    renderer.render(&mut term, &intro.render(&theme))?;
    renderer.finish(&mut term)?;

    // TextInput
    let mut name = TextInput::new(InputProps {
        placeholder: "your name".into(),
        required: true,
        max_length: Some(24),
        validation: vec![PatternRule::new(r"^[\p{L} '-]*$", "Letters only")],
        ..InputProps::default()
    })?;
    let greeting = match name.read_value(&mut keys, &mut term, &theme) {
        Ok(value) => format!("Hello, {value}!"),
        Err(Error::Cancelled(_)) => "No name then.".to_string(),
        Err(e) => return Err(e.into()),
    };

    // ProgressBar
    let start = Instant::now();
    let mut bar = ProgressBar::new(
        ProgressProps {
            label: Some("Working".into()),
            width: 30,
            style: ProgressStyle::Bar,
            animate: true,
            show_eta: true,
            ..ProgressProps::default()
        },
        start,
    )?
    .with_interval(config.animation_interval());

    let mut renderer = InlineRenderer::new();
    while !bar.is_complete() {
        let now = Instant::now();
        bar.set_value(now.duration_since(start).as_secs_f64() * 40.0);
        bar.tick(now);
        renderer.render(&mut term, &bar.render(&theme))?;
        thread::sleep(Duration::from_millis(30));
    }
    renderer.render(&mut term, &bar.render(&theme))?;
    renderer.finish(&mut term)?;

    // AlertManager
    let mut alerts = config.alert_manager()?;
    let now = Instant::now();
    let messages = [
        (AlertType::Success, greeting.as_str()),
        (AlertType::Info, "Alerts beyond the visible limit wait in a queue."),
        (AlertType::Warning, "Press x to dismiss the newest alert."),
        (AlertType::Error, "Press q to quit early."),
        (AlertType::Info, "Last one."),
    ];
    for (kind, message) in messages {
        let props = spark_widgets::AlertProps {
            dismissible: true,
            show_timestamp: true,
            ..config.alert_props(kind, message)
        };
        alerts.add(Alert::new(props)?, now);
    }

    let mut renderer = InlineRenderer::new();
    renderer.render(&mut term, &alerts.render(&theme))?;
    while !alerts.is_empty() {
        let mut redraw = false;
        if let Some(key) = keys.next_key(Duration::from_millis(50))? {
            if key.code == KeyCode::Char('q') || key.is_cancel() {
                alerts.clear();
                redraw = true;
            } else {
                redraw |= !alerts.handle_key(&key, Instant::now()).is_empty();
            }
        }
        redraw |= !alerts.tick(Instant::now()).is_empty();
        if redraw {
            renderer.render(&mut term, &alerts.render(&theme))?;
        }
    }
    renderer.clear(&mut term)?;
    term.flush()?;
    Ok(())
}
