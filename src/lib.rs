pub mod cmd;
pub mod error;
pub use error::GmError;

pub fn log_error<T>(x: Result<T, anyhow::Error>) -> Option<T> {
    x.map_err(|e| {
        log::error!("{e:#}");
    })
    .ok()
}
