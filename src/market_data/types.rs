use serde_json::{Map, Value};

// One asset row exactly as the upstream returned it. Fields are kept raw so the
// report layer decides what is required and how strictly.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRecord {
    fields: Map<String, Value>,
}

impl MarketRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl From<Map<String, Value>> for MarketRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

// One fetch cycle worth of records, in page-fetch order. No de-duplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    pub records: Vec<MarketRecord>,
}

impl MarketSnapshot {
    pub fn new(records: Vec<MarketRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
