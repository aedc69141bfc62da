pub trait StringExtensions {
    /// Trim and lower-case a string for case-insensitive matching.
    /// E.g. `"  Dune ".normalize() == "dune"`
    fn normalize(&self) -> String;
}

impl StringExtensions for str {
    fn normalize(&self) -> String {
        self.trim().to_lowercase()
    }
}
