use super::MetricValue;

/// All-time totals keyed by metric name, in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllTimeSummary {
    entries: Vec<(String, MetricValue)>,
}

impl AllTimeSummary {
    pub fn new(entries: Vec<(String, MetricValue)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries
            .iter()
            .map(|(metric, value)| (metric.as_str(), value))
    }

    pub fn get(&self, metric: &str) -> Option<&MetricValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
