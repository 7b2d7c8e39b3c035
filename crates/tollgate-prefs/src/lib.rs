pub mod models;
pub mod store;

pub use models::{Prefs, DEFAULT_DURATION_SECS};
pub use store::{PrefStore, PrefsError};
