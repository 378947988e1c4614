//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are always compiled in and cost next to nothing while
//! `puffin::set_scopes_on(false)` (the default). The HTTP server that streams
//! them to `puffin_viewer` lives behind the `profiling` feature.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use glyphrun_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::PuffinHttp => {
            puffin::set_scopes_on(true);

            match puffin_http::Server::new("0.0.0.0:8585") {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://0.0.0.0:8585");
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

/// Turn scope collection on or off without starting a server.
pub fn set_scopes_on(on: bool) {
    puffin::set_scopes_on(on);
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame, after the frame's text has been uploaded.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
