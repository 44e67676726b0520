//! Fresh variable names

use std::collections::HashSet;

/// Generator of fresh variable names `z1`, `z2`, ...
///
/// Each prover owns its own generator, so names are reproducible per proof.
/// The sequence never repeats a name.
#[derive(Debug, Clone)]
pub struct FreshNames {
    prefix: String,
    counter: u64,
}

impl FreshNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        FreshNames {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Next name in the sequence that is not in `used`
    pub fn next_avoiding(&mut self, used: &HashSet<String>) -> String {
        loop {
            let name = self.next_name();
            if !used.contains(&name) {
                return name;
            }
        }
    }

    fn next_name(&mut self) -> String {
        self.counter += 1;
        format!("{}{}", self.prefix, self.counter)
    }
}

impl Default for FreshNames {
    fn default() -> Self {
        FreshNames::new("z")
    }
}

impl Iterator for FreshNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence() {
        let names: Vec<String> = FreshNames::default().take(3).collect();
        assert_eq!(names, vec!["z1", "z2", "z3"]);
    }

    #[test]
    fn test_avoids_used_names() {
        let mut fresh = FreshNames::new("w");
        let used: HashSet<String> = ["w1", "w2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(fresh.next_avoiding(&used), "w3");
        assert_eq!(fresh.next(), Some("w4".to_string()));
    }

    #[test]
    fn test_generators_are_independent() {
        let mut a = FreshNames::default();
        let mut b = FreshNames::default();
        a.next();
        a.next();
        assert_eq!(b.next(), Some("z1".to_string()));
    }
}
