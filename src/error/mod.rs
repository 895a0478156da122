mod app;
mod config;
mod extract;
mod probe;
mod render;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use extract::ExtractError;
pub use probe::ProbeError;
pub use render::RenderError;
pub use store::StoreError;
pub use validation::ValidationError;
