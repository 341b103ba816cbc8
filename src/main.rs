use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tubegrab::prefs::Prefs;
use tubegrab::{
    AudioControlState, CobaltClient, PipelineState, Presenter, Resolver, ResultView, Session,
};

#[derive(Parser)]
#[command(
    name = "tubegrab",
    about = "Resolve YouTube links into direct download URLs",
    long_about = "Paste a YouTube link and get a direct, time-limited download URL\n\
    back from a cobalt resolver instance. The media itself is never fetched;\n\
    hand the printed URL to your browser or download tool.\n\n\
    Examples:\n\
      tubegrab https://youtu.be/dQw4w9WgXcQ            # Resolve video link\n\
      tubegrab -a https://youtu.be/dQw4w9WgXcQ         # Also resolve audio-only\n\
      tubegrab -e https://co.example/api/json <url>    # Use another instance\n\
      tubegrab --toggle-theme                          # Flip the display mode"
)]
struct Args {
    /// YouTube link to resolve (youtube.com or youtu.be)
    url: Option<String>,

    /// Also request an audio-only download URL after the video resolves
    #[arg(short = 'a', long = "audio")]
    audio: bool,

    /// Resolver endpoint to use instead of the default instance
    #[arg(short = 'e', long = "endpoint")]
    endpoint: Option<String>,

    /// Flip the persisted light/dark display mode and exit
    #[arg(long = "toggle-theme")]
    toggle_theme: bool,
}

/// Renders pipeline output on the terminal.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn busy_changed(&mut self, busy: bool) {
        if busy {
            println!("Resolving...");
        }
    }

    fn clear_output(&mut self) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn show_result(&mut self, view: &ResultView) {
        println!("✓ {}", view.label);
        if let Some(thumb) = &view.thumbnail_url {
            println!("  Thumbnail: {}", thumb);
        }
        println!("  Video: {}", view.video_download_url);
    }

    fn set_audio_control(&mut self, state: AudioControlState) {
        if state == AudioControlState::Converting {
            println!("Converting...");
        }
    }

    fn deliver_audio(&mut self, download_url: &str) {
        println!("  Audio: {}", download_url);
    }

    fn notice(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn toggle_theme() -> anyhow::Result<()> {
    let path = Prefs::default_path();
    let mut prefs = Prefs::load(&path);
    prefs.theme = prefs.theme.toggled();
    prefs.save(&path)?;
    println!("Display mode set to {}", prefs.theme);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.toggle_theme {
        return toggle_theme();
    }

    let Some(url) = args.url else {
        anyhow::bail!("no URL given; see --help");
    };

    let resolver: Arc<dyn Resolver> = Arc::new(match args.endpoint {
        Some(endpoint) => CobaltClient::with_endpoint(endpoint),
        None => CobaltClient::new(),
    });
    let session = Session::new(TerminalPresenter, resolver);

    session.submit(&url).await;
    match session.state().await {
        PipelineState::ReadyVideo { .. } if args.audio => session.request_audio().await,
        PipelineState::Failed { .. } => std::process::exit(1),
        _ => {}
    }

    Ok(())
}
