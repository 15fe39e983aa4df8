pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest parenthesis nesting accepted before failing with `TooDeep`.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(ParserConfig::new().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ParserConfig::new().with_max_depth(3).max_depth, 3);
    }
}
