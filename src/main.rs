use clap::{Parser, Subcommand};
use livepreview::kernel::services::adapters::{
    ensure_settings_file, load_settings, load_settings_from, load_tree, load_tree_skipping,
    PreviewWorker, ProjectWatcher,
};
use livepreview::kernel::services::ports::Settings;
use livepreview::kernel::services::{event_bus, NoticeLevel, PreviewEvent};
use livepreview::models::Debouncer;
use livepreview::preview::{scan, Bundle, PreviewBundler};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod logging;

/// Filesystem events arrive in bursts; rebuild once the burst is over.
const REBUILD_QUIET: Duration = Duration::from_millis(150);
const IDLE_WAIT: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "livepreview", version, about = "Bundle a web project into one preview document")]
struct Cli {
    /// Settings file (defaults to the per-user settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bundle once and write the document to a file or stdout
    Bundle {
        dir: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rebundle whenever the project changes
    Watch {
        dir: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the asset scan order and tree statistics
    Scan { dir: PathBuf },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _logging = logging::init();

    let settings = match &cli.settings {
        Some(path) => load_settings_from(path)?,
        None => {
            if let Err(err) = ensure_settings_file() {
                tracing::warn!(error = %err, "failed to write default settings");
            }
            load_settings()
        }
    };

    match cli.command {
        Command::Bundle { dir, output } => run_bundle(&dir, output.as_deref(), &settings),
        Command::Watch { dir, output } => run_watch(&dir, &output, &settings),
        Command::Scan { dir } => run_scan(&dir, &settings),
    }
}

fn run_bundle(dir: &Path, output: Option<&Path>, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let skip: Vec<PathBuf> = output.map(Path::to_path_buf).into_iter().collect();
    let tree = load_tree_skipping(dir, &settings.preview, &skip)?;
    let bundle = PreviewBundler::new(settings.preview.clone()).bundle(&tree);
    if bundle.is_empty() {
        eprintln!("no html entry point found in {}", dir.display());
    }
    match output {
        Some(path) => write_bundle(path, &bundle)?,
        None => print!("{}", bundle.html),
    }
    Ok(())
}

fn run_watch(dir: &Path, output: &Path, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let (events, mut event_rx) = event_bus();
    let worker = PreviewWorker::spawn(settings.preview.clone(), events)?;
    let mut watcher = ProjectWatcher::new(dir)?;
    watcher.ignore_path(output);
    let skip = [output.to_path_buf()];

    worker.submit(Arc::new(load_tree_skipping(dir, &settings.preview, &skip)?));
    let mut pending: Debouncer<(), ()> = Debouncer::new(REBUILD_QUIET);

    loop {
        let timeout = pending.next_deadline(Instant::now()).unwrap_or(IDLE_WAIT);
        if watcher.wait_for_change(timeout) {
            pending.touch((), (), Instant::now());
        }

        if !pending.due(Instant::now()).is_empty() {
            match load_tree_skipping(dir, &settings.preview, &skip) {
                Ok(tree) => worker.submit(Arc::new(tree)),
                Err(err) => tracing::warn!(error = %err, "failed to reload project"),
            }
        }

        for event in event_rx.drain() {
            match event {
                PreviewEvent::BundleReady(bundle) if bundle.changed => {
                    write_bundle(output, &bundle)?;
                    eprintln!(
                        "#{} {} (css: {}, js: {})",
                        bundle.sequence,
                        bundle.entry.as_deref().unwrap_or("<no entry>"),
                        bundle.css_files.len(),
                        bundle.js_files.len()
                    );
                }
                PreviewEvent::Notice { level, message } => match level {
                    NoticeLevel::Info => eprintln!("{message}"),
                    NoticeLevel::Warning => eprintln!("warning: {message}"),
                },
                _ => {}
            }
        }
    }
}

fn run_scan(dir: &Path, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let tree = load_tree(dir, &settings.preview)?;
    let assets = scan(&tree, &settings.preview);
    let entry = assets.select_entry(&settings.preview);

    println!("entry: {}", entry.map(|n| n.path()).unwrap_or("<none>"));
    for node in &assets.css {
        println!("css:   {}", node.path());
    }
    for node in &assets.js {
        println!("js:    {}", node.path());
    }

    let stats = tree.stats();
    println!(
        "{} files, {} folders, {} bytes, depth {}",
        stats.files, stats.folders, stats.total_bytes, stats.max_depth
    );
    Ok(())
}

fn write_bundle(path: &Path, bundle: &Bundle) -> std::io::Result<()> {
    std::fs::write(path, &bundle.html)?;
    tracing::info!(path = %path.display(), sequence = bundle.sequence, "bundle written");
    Ok(())
}
