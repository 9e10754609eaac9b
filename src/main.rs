use clap::Parser;
use sortbox::cli::Session;

/// Organize a folder's top-level files into category subdirectories, with
/// optional date bucketing, oversized-file compression and single-level undo.
#[derive(Parser)]
#[command(name = "sortbox", version, about)]
struct Args {
    /// Folder to organize; prompted for interactively when omitted
    folder: Option<String>,
}

fn main() {
    let args = Args::parse();
    Session::new(args.folder).run();
}
