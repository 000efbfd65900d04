use std::io::stdout;
use std::panic;

use color_eyre::eyre::Result;
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode, is_raw_mode_enabled};

/// Panics restore the terminal before the report is printed.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = restore_terminal() {
            log::error!("failed to restore terminal: {}", e);
        }
        log::error!("panic: {}", panic_info);
        report(&panic_hook.panic_report(panic_info));
    }));

    Ok(())
}

#[allow(
    clippy::print_stderr,
    reason = "the terminal has been restored and stderr is the only place left to report"
)]
fn report(report: &dyn std::fmt::Display) {
    eprintln!("{}", report);
}

pub fn restore_terminal() -> Result<()> {
    if is_raw_mode_enabled()? {
        execute!(stdout(), LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
    }
    Ok(())
}
