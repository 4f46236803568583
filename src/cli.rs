use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mediaview",
    about = "Browse a directory of images and videos as a web gallery: `mediaview ~/Pictures` and open the URL",
    long_about = None,
    version = env!("GIT_VERSION"),
    arg_required_else_help = true,
)]
pub struct Args {
    /// Directory to scan recursively for png, jpg, jpeg and mp4 files
    pub directory_path: PathBuf,

    /// HTTP port to listen on [default: 8000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to a TOML config file providing `port` and `localhost`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind to localhost only (127.0.0.1) instead of all interfaces (0.0.0.0)
    #[arg(long)]
    pub localhost: bool,
}
