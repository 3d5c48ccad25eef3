#![warn(clippy::pedantic)]

pub mod actions;
pub mod app;
pub mod export;
pub mod global;
pub mod notice;
pub mod permissions;
pub mod renderer;
pub mod script;
pub mod share;

use anyhow::{Context, Result as AnyResult};

/// Draw one script to completion, waiting for its exports. Returns the notices it produced.
fn draw_script(
    path: &std::path::Path,
    settings: &global::settings::Settings,
    hotkeys: &global::hotkeys::Hotkeys,
) -> AnyResult<Vec<notice::Notice>> {
    let text = std::fs::read_to_string(path).context("reading script")?;
    let commands = script::parse(&text)?;
    log::debug!("{}: {} commands", path.display(), commands.len());

    // Running a script from the command line is consent to touch storage.
    let mut app = app::App::new(
        settings,
        permissions::StaticGate::allow_all(),
        share::LogShare::default(),
    );
    script::run(&mut app, hotkeys, commands);
    app.finish();
    Ok(app.drain_notices())
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    // Args are `--init` to write default preference files, then a list of scripts to draw.
    let mut paths: Vec<std::path::PathBuf> = std::env::args_os().skip(1).map(Into::into).collect();
    let init = paths.first().is_some_and(|first| first.as_os_str() == "--init");
    if init {
        paths.remove(0);
    }

    let settings = global::settings::Settings::load_user();
    let hotkeys = global::hotkeys::Hotkeys::get();
    if init {
        settings.save().context("writing settings")?;
        hotkeys.save().context("writing hotkeys")?;
        log::info!("wrote default preferences");
    } else if hotkeys.did_fail_to_load() {
        if let Err(e) = hotkeys.save() {
            log::warn!("Failed to save hotkey config:\n{e:?}");
        }
    }

    let failures = {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        paths
            .par_iter()
            .filter(|path| match draw_script(path, &settings, hotkeys) {
                Ok(notices) => {
                    for notice in notices {
                        log::info!("{}: {notice}", path.display());
                    }
                    false
                }
                Err(e) => {
                    log::error!("failed to draw {}: {e:#}", path.display());
                    true
                }
            })
            .count()
    };
    if failures > 0 {
        anyhow::bail!("{failures} of {} scripts failed", paths.len());
    }
    Ok(())
}
