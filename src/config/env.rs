use std::collections::HashMap;

/// Key/value configuration source
pub trait EnvSource: Send + Sync {
    /// Raw value for `key`, if set
    fn get(&self, key: &str) -> Option<String>;

    /// Value for `key` with surrounding whitespace removed; blank counts as unset
    fn value(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_count_as_unset() {
        let env: HashMap<String, String> = [
            ("SET".to_string(), "  value ".to_string()),
            ("BLANK".to_string(), "   ".to_string()),
        ]
        .into();

        assert_eq!(env.value("SET"), Some("value".to_string()));
        assert_eq!(env.value("BLANK"), None);
        assert_eq!(env.value("MISSING"), None);
    }
}
