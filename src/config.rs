//! Compilation settings shared by the parser and the compiler.

/// Settings for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name written into the `.unit` header of the compiled output
    pub unit_name: String,
    /// Most parameters a function declaration may list before a diagnostic is reported
    pub max_parameters: usize,
    /// Most arguments a call may pass before a diagnostic is reported
    pub max_arguments: usize,
}

impl Config {
    pub fn new(unit_name: &str) -> Self {
        Config {
            unit_name: unit_name.to_string(),
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unit_name: String::from("main"),
            max_parameters: 255,
            max_arguments: 255,
        }
    }
}
