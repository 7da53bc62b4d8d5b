mod cache;
mod logging;
mod properties;
mod traits;
