use super::{load_generator, print_report};
use crate::ProjectArgs;
use anyhow::{Context, Result};
use autoroutes::{Debouncer, FsEvent, FsEventKind, RouteGenerator, UpdateKind};
use colored::Colorize;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

pub fn execute(args: &ProjectArgs) -> Result<()> {
    println!("{}", "Starting route watcher...".green().bold());

    let mut generator = load_generator(args)?;
    let report = generator.generate(None).context("Initial route generation failed")?;
    print_report(&report);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(watch(generator))
}

async fn watch(mut generator: RouteGenerator) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<FsEvent>(256);

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
        Ok(event) => {
            for fs_event in to_fs_events(&event) {
                let _ = tx.blocking_send(fs_event);
            }
        }
        Err(e) => tracing::error!("Watch error: {:?}", e),
    })?;

    for dir in generator.watch_dirs() {
        if dir.exists() {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {:?}", dir))?;
            println!("  {} Watching: {}", "👀".cyan(), dir.display());
        } else {
            tracing::warn!("{:?} does not exist, not watching it", dir);
        }
    }
    println!();

    let mut debouncer = Debouncer::new(generator.config().debounce);

    loop {
        let deadline = debouncer.deadline();
        let wake = deadline.map(Instant::from_std).unwrap_or_else(Instant::now);

        tokio::select! {
            received = rx.recv() => match received {
                Some(event) => {
                    tracing::trace!("{} {:?}", event.kind, event.path);
                    debouncer.push(event, std::time::Instant::now());
                }
                None => break,
            },
            _ = sleep_until(wake), if deadline.is_some() => {
                let burst = debouncer.drain();
                if let Some(update) = generator.handle_burst(&burst) {
                    regenerate(&mut generator, update);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "Stopping route watcher".yellow());
                break;
            }
        }
    }

    drop(watcher);
    Ok(())
}

fn regenerate(generator: &mut RouteGenerator, update: UpdateKind) {
    println!("{} Routes changed ({}), regenerating...", "🔄".yellow(), update);

    match generator.generate(Some(update)) {
        Ok(report) => print_report(&report),
        Err(e) => eprintln!("{} Failed to regenerate routes: {}", "❌".red(), e),
    }
}

/// Maps a notify event onto add/unlink/change events
///
/// Renames become an unlink of the old path and an add of the new one.
/// Hidden paths are dropped.
fn to_fs_events(event: &Event) -> Vec<FsEvent> {
    let paths = event.paths.iter().filter(|p| !is_hidden(p));

    match &event.kind {
        EventKind::Create(_) => paths.map(FsEvent::add).collect(),
        EventKind::Remove(_) => paths.map(FsEvent::unlink).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => paths.map(FsEvent::unlink).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => paths.map(FsEvent::add).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => paths
            .enumerate()
            .map(|(i, p)| if i == 0 { FsEvent::unlink(p) } else { FsEvent::add(p) })
            .collect(),
        // Platform did not say which side of the rename this is
        EventKind::Modify(ModifyKind::Name(_)) => paths
            .map(|p| if p.exists() { FsEvent::add(p) } else { FsEvent::unlink(p) })
            .collect(),
        EventKind::Modify(_) => paths.map(|p| FsEvent::new(FsEventKind::Change, p)).collect(),
        _ => Vec::new(),
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with('.'))
}
