pub mod simulate;
pub mod tuning;

use std::path::Path;

use sw_core::Tuning;

/// Load a tuning override, or the defaults when no file is given.
pub fn load_tuning(path: Option<&Path>) -> Result<Tuning, String> {
    match path {
        Some(path) => Tuning::load(path).map_err(|e| e.to_string()),
        None => Ok(Tuning::default()),
    }
}
