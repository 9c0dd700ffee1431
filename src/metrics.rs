/// Tally of a batch run
#[derive(Debug, Default, PartialEq)]
pub struct Metrics {
    pub count: usize,
    pub succeeded: usize,
    /// Item name and the reason it failed
    pub failures: Vec<(String, String)>,
}

impl Metrics {
    pub fn success(&mut self) {
        self.count += 1;
        self.succeeded += 1;
    }

    pub fn failure(&mut self, item: &str, reason: impl ToString) {
        self.count += 1;
        self.failures.push((item.to_owned(), reason.to_string()));
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn log_summary(&self, what: &str) {
        info!("{} {} of {}", what, self.succeeded, self.count);
        if !self.failures.is_empty() {
            warn!("{} failed:", self.failures.len());
            for (item, reason) in &self.failures {
                warn!("  {}: {}", item, reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let mut m = Metrics::default();
        m.success();
        m.success();
        m.failure("bad.jpg", "too large");
        assert_eq!(m.count, 3);
        assert_eq!(m.succeeded, 2);
        assert_eq!(m.failed(), 1);
        assert_eq!(m.failures[0], ("bad.jpg".to_owned(), "too large".to_owned()));
    }
}
