//! Prover configuration types.

/// Configuration for a [`Prover`](crate::prover::Prover)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverConfig {
    /// Prefix of the fresh variables introduced by free instantiation.
    /// Must itself be a variable name (start with `u`-`z`).
    pub fresh_variable_prefix: String,
    /// Log every appended line at `info` instead of `debug`
    pub announce_lines: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            fresh_variable_prefix: "z".to_string(),
            announce_lines: false,
        }
    }
}
