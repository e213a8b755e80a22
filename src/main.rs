use mazepath::app::{self, AppConfig};
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{}", msg);
            return Ok(());
        }
    };

    // Logs go to a file since stdout belongs to the maze viewer
    let file_appender = tracing_appender::rolling::never("logs", "mazepath.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_env("MAZEPATH_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("[main] starting with {:?}", config);
    let mut stdout = std::io::stdout();
    app::run(&mut stdout, &config)
}
