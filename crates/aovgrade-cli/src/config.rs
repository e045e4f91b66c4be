//! Runtime configuration for the command-line driver.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aovgrade_core::GradeParams;

/// Default log filter when neither `AOVGRADE_LOG` nor `RUST_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Process-level settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Rayon worker count; 0 leaves the global pool at its default.
    pub threads: usize,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            threads: std::env::var("AOVGRADE_THREADS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            log_filter: std::env::var("AOVGRADE_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl CliConfig {
    /// Layer command-line values over the environment defaults.
    pub fn with_overrides(mut self, threads: usize, verbose: bool) -> Self {
        if threads > 0 {
            self.threads = threads;
        }
        if verbose {
            self.log_filter = "debug".to_string();
        }
        self
    }
}

/// Flag overrides applied on top of the parameter file.
#[derive(Debug, Clone, Default)]
pub struct ParamOverrides {
    pub view_aov: bool,
    pub reverse: bool,
    pub unpremult: bool,
    pub use_mask: bool,
    pub mix: Option<f32>,
}

impl ParamOverrides {
    /// Boolean flags can only switch a knob on; `mix` replaces the file value.
    pub fn apply(&self, mut params: GradeParams) -> GradeParams {
        params.view_aov |= self.view_aov;
        params.reverse |= self.reverse;
        params.unpremult |= self.unpremult;
        params.use_mask |= self.use_mask;
        if let Some(mix) = self.mix {
            params.mix = mix;
        }
        params
    }
}

/// Load grade parameters from a JSON file, or defaults when no file is given.
pub fn load_params(path: Option<&Path>) -> Result<GradeParams> {
    let Some(path) = path else {
        return Ok(GradeParams::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read parameter file {}", path.display()))?;
    GradeParams::from_json(&json)
        .with_context(|| format!("failed to parse parameter file {}", path.display()))
}

/// Resolve the output path, refusing to overwrite any of the inputs.
pub fn check_output(output: &Path, inputs: &[&Path]) -> Result<PathBuf> {
    if inputs.iter().any(|input| *input == output) {
        anyhow::bail!("output {} would overwrite an input", output.display());
    }
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_switch_flags_on() {
        let overrides = ParamOverrides {
            view_aov: true,
            mix: Some(0.25),
            ..ParamOverrides::default()
        };
        let params = overrides.apply(GradeParams {
            reverse: true,
            ..GradeParams::default()
        });
        assert!(params.view_aov);
        assert!(params.reverse);
        assert!(!params.unpremult);
        assert_eq!(params.mix, 0.25);
    }

    #[test]
    fn test_missing_param_file_uses_defaults() {
        let params = load_params(None).expect("defaults");
        assert_eq!(params, GradeParams::default());
    }

    #[test]
    fn test_output_cannot_overwrite_input() {
        let beauty = Path::new("beauty.exr");
        assert!(check_output(Path::new("beauty.exr"), &[beauty]).is_err());
        assert!(check_output(Path::new("out.exr"), &[beauty]).is_ok());
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let config = CliConfig {
            threads: 0,
            log_filter: "warn".into(),
        }
        .with_overrides(4, true);
        assert_eq!(config.threads, 4);
        assert_eq!(config.log_filter, "debug");
    }
}
