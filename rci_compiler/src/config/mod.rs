//! Configuration module for the RCI compiler
//! Compile-time limits come from the generated constants, runtime options from `runtime`

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{GeneratorLimits, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("RCI_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("RCI_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_limit_matches_protocol() {
        assert_eq!(compile_time::syntax::MAX_DESCRIPTION_LENGTH, 200);
    }

    #[test]
    fn test_source_info_names_profile() {
        assert!(build_info::source_info().contains(build_info::profile()));
    }
}
