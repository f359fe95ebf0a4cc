//! Configuration access port.

/// Read-only access to INI-style sectioned configuration.
///
/// The engine's knobs (`[account]`, `[data]`, `[timeframes]`) are read
/// through this seam so tests can substitute in-memory configs.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Returns `default` when the key is missing or not an integer.
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    /// Returns `default` when the key is missing or not numeric.
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    /// Accepts true/yes/1 and false/no/0; `default` otherwise.
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
