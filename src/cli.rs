//! Setup shared by the command line tools.

use crate::build_info;
use log::LevelFilter;
use std::path::Path;

/// Environment variable holding the log filter, `info` when unset.
pub const LOG_ENV: &str = "COURSENUM_LOG";

/// Options every tool accepts.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Chunk size to use for parallelism.
    #[arg(short, long, default_value = "1000")]
    pub chunk_size: usize,

    /// The number of threads to use, rayon picks when unset.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

/// Keeps the profiling server alive for the length of a run.
pub struct Session {
    #[cfg(feature = "profile-with-puffin")]
    server: Option<puffin_http::Server>,
}

impl Session {
    pub fn finish(self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Flushing profiler");
            profiling::finish_frame!();
            drop(self.server);
        }
    }
}

/// Print build info and exit if asked, otherwise start logging,
/// the thread pool and the profiler.
pub fn setup(name: &str, common: &CommonArgs) -> anyhow::Result<Session> {
    if common.build_info {
        build_info::print_report(name);
        std::process::exit(0);
    }
    init_logging();
    anyhow::ensure!(common.chunk_size > 0, "chunk size must be positive");

    if let Some(threads) = common.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()?;
    }

    #[cfg(feature = "profile-with-puffin")]
    let session = {
        let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        println!("Run this to view profiling data:  puffin_viewer {server_addr}");
        let server = puffin_http::Server::new(&server_addr)?;
        profiling::puffin::set_scopes_on(true);
        Session {
            server: Some(server),
        }
    };
    #[cfg(not(feature = "profile-with-puffin"))]
    let session = Session {};

    Ok(session)
}

/// Route `log` records to stderr, filtered by `COURSENUM_LOG`.
/// Calling it again is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::default()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default().filter_or(LOG_ENV, "info"))
        .try_init();
}

/// Create `dir` and any missing parents. Existing contents are kept.
pub fn ensure_dir_exists<P: AsRef<Path>>(dir: &P) -> crate::Result<()> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        log::debug!("Creating {:?}", dir);
        std::fs::create_dir_all(dir).map_err(|e| crate::Error::file(dir, e))?;
    }
    Ok(())
}
