//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let loader = folio.loader();
    let generator = Generator::new(folio)?;
    let written = generator.generate(&loader)?;

    tracing::info!(
        "Generated {} posts in {:.2}s",
        written,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Paths whose changes require a rebuild
pub fn watched_paths(folio: &Folio) -> Vec<PathBuf> {
    let mut paths = vec![
        folio.content_dir.clone(),
        folio.static_dir.clone(),
        folio.languages_dir(),
    ];
    paths.extend(folio.config_path.clone());
    paths.retain(|p| p.exists());
    paths
}

/// Watch for file changes and regenerate until the watcher stops
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    // The debouncer delivers events over a std channel
    tokio::task::spawn_blocking(move || watch_and_rebuild(&folio, || {})).await?
}

/// Block on debounced file events, regenerating once per batch.
///
/// `on_rebuilt` runs after every successful regeneration.
pub fn watch_and_rebuild<F: FnMut()>(folio: &Folio, mut on_rebuilt: F) -> Result<()> {
    let (tx, rx) = channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in watched_paths(folio) {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Reload so config edits take effect
                match Folio::new(&folio.base_dir).and_then(|fresh| run(&fresh)) {
                    Ok(()) => on_rebuilt(),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor droppings and VCS files never trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}
