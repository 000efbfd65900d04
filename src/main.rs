use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio::time::sleep_until;

use ezpg::app::action::Action;
use ezpg::app::effect::Effect;
use ezpg::app::effect_runner::EffectRunner;
use ezpg::app::ports::ConfigStore;
use ezpg::app::reducer::reduce;
use ezpg::app::render_schedule::next_animation_deadline;
use ezpg::app::state::AppState;
use ezpg::error;
use ezpg::infra::adapters::{PostgresAdapter, TomlConfigStore};
use ezpg::infra::logging;
use ezpg::ui::adapters::TuiAdapter;
use ezpg::ui::event::handler::handle_event;
use ezpg::ui::tui::TuiRunner;

/// A keyboard-driven PostgreSQL browser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: <config dir>/ezpg/config.toml)
    config: Option<PathBuf>,

    /// Log file (default: <cache dir>/ezpg/ezpg.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[allow(
    clippy::print_stderr,
    reason = "config errors are reported before the terminal is taken over"
)]
fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    error::install_hooks()?;

    let args = Args::parse();
    let log_path = logging::init(args.log_file.as_deref());

    let config_store = TomlConfigStore::new(args.config).unwrap_or_else(|e| fail(e));
    let config = config_store.load().unwrap_or_else(|e| fail(e));
    log::info!(
        "loaded {} connection(s) from {}",
        config.connections.len(),
        config_store.path().display()
    );
    if let Some(path) = log_path {
        log::debug!("logging to {}", path.display());
    }

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(256);

    let adapter = Arc::new(PostgresAdapter::new(
        config.connections.clone(),
        config.settings.null_display.clone(),
    ));
    let effect_runner = EffectRunner::new(
        Arc::clone(&adapter) as _,
        Arc::clone(&adapter) as _,
        Arc::clone(&adapter) as _,
        Arc::new(config_store),
        action_tx.clone(),
    );

    let mut state = AppState::new(config);

    let mut tui = TuiRunner::new()?;
    tui.enter()?;

    let initial_size = tui.terminal().size()?;
    let _ = action_tx
        .send(Action::Resize(initial_size.width, initial_size.height))
        .await;

    loop {
        let now = Instant::now();
        let deadline = next_animation_deadline(&state, now);

        tokio::select! {
            Some(event) = tui.next_event() => {
                let action = handle_event(event, &state);
                if !action.is_none() {
                    let _ = action_tx.send(action).await;
                }
            }
            Some(action) = action_rx.recv() => {
                let now = Instant::now();
                let mut effects = reduce(&mut state, action, now);

                if state.render_dirty {
                    state.clear_expired_timers(now);
                    effects.push(Effect::Render);
                }

                let mut tui_adapter = TuiAdapter::new(&mut tui);
                effect_runner.run(effects, &mut tui_adapter, &mut state).await?;
                state.clear_dirty();
            }
            // Spinner frame or notice expiry
            _ = async {
                match deadline {
                    Some(d) => sleep_until(d.into()).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                let now = Instant::now();
                let effects = reduce(&mut state, Action::Render, now);
                let mut tui_adapter = TuiAdapter::new(&mut tui);
                effect_runner.run(effects, &mut tui_adapter, &mut state).await?;
                state.clear_dirty();
            }
        }

        if state.should_quit {
            break;
        }
    }

    tui.exit()?;
    log::info!("exiting");
    Ok(())
}
