/// Name fragment that marks an unsupported-software finding.
pub const END_OF_LIFE_MARKER: &str = "End Of Life";

/// A catalog vulnerability. Severity is kept as the backend's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vulnerability {
    pub name: String,
    pub severity: String,
}

impl Vulnerability {
    pub fn new(name: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity: severity.into(),
        }
    }

    pub fn is_end_of_life(&self) -> bool {
        self.name.contains(END_OF_LIFE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_life_detection() {
        assert!(Vulnerability::new("Windows 7 End Of Life", "10.0").is_end_of_life());
        assert!(!Vulnerability::new("OpenSSH Multiple Vulnerabilities", "9.8").is_end_of_life());
    }

    #[test]
    fn test_end_of_life_match_is_case_sensitive() {
        assert!(!Vulnerability::new("PHP end of life detection", "10.0").is_end_of_life());
    }
}
