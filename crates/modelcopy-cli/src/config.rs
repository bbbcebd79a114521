//! Copy options from a TOML file
//!
//! ```toml
//! include_usages = true
//! published_values = "reset"
//! name_suffix = " (2)"
//! ```
//!
//! Missing keys take their defaults; command-line flags override the file.

use std::path::Path;

use modelcopy_core::copy::CopyOptions;

/// Read copy options, or the defaults when no file is given
pub fn load_copy_options(path: Option<&Path>) -> Result<CopyOptions, Box<dyn std::error::Error>> {
    match path {
        None => Ok(CopyOptions::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
            parse_copy_options(&text)
        }
    }
}

pub fn parse_copy_options(text: &str) -> Result<CopyOptions, Box<dyn std::error::Error>> {
    Ok(toml::from_str(text)?)
}
