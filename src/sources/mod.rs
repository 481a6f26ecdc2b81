use crate::constants::SENTINEL;

pub mod arcore;
pub mod ligar;

pub use arcore::ArcoreSource;
pub use ligar::{LigarSource, ModelPolicy};

/// Remove line breaks left by spreadsheet exports and re-trim.
///
/// `None` when nothing usable remains (empty or the `-` placeholder).
pub(crate) fn clean_model(raw: &str) -> Option<String> {
    let model = raw.replace(['\n', '\r'], "").trim().to_string();
    if model.is_empty() || model == SENTINEL {
        None
    } else {
        Some(model)
    }
}
