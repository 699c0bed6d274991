use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connector definition as accepted by `POST /connectors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfiguration {
    name: String,
    #[serde(default)]
    config: BTreeMap<String, Value>,
}

impl ConnectorConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: BTreeMap::new(),
        }
    }

    pub fn with_config(name: impl Into<String>, config: BTreeMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Set a single property, replacing any previous value
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn add_all<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.config
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &BTreeMap<String, Value> {
        &self.config
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_to_connect_request_shape() {
        let configuration = ConnectorConfiguration::new("sink1").add("connector.class", "X");

        let body: Value = serde_json::from_slice(&configuration.to_json().unwrap()).unwrap();

        assert_eq!(body, json!({"name": "sink1", "config": {"connector.class": "X"}}));
    }

    #[test]
    fn test_values_stay_plain_json() {
        let configuration = ConnectorConfiguration::new("jdbc-sink")
            .add("tasks.max", 2)
            .add("auto.create", true)
            .add("topics", json!(["orders", "payments"]));

        let body = String::from_utf8(configuration.to_json().unwrap()).unwrap();

        assert_eq!(
            body,
            r#"{"name":"jdbc-sink","config":{"auto.create":true,"tasks.max":2,"topics":["orders","payments"]}}"#
        );
    }

    #[test]
    fn test_add_all_merges_and_overrides() {
        let configuration = ConnectorConfiguration::new("s")
            .add("tasks.max", "1")
            .add_all([("tasks.max", "3"), ("topics", "orders")]);

        assert_eq!(configuration.config().len(), 2);
        assert_eq!(configuration.config()["tasks.max"], json!("3"));
        assert_eq!(configuration.name(), "s");
    }

    #[test]
    fn test_deserialization_ignores_unknown_fields() {
        let configuration: ConnectorConfiguration = serde_json::from_value(json!({
            "name": "sink1",
            "config": {"connector.class": "X"},
            "tasks": [],
            "type": "sink"
        }))
        .unwrap();

        assert_eq!(
            configuration,
            ConnectorConfiguration::with_config(
                "sink1",
                BTreeMap::from([("connector.class".to_string(), json!("X"))])
            )
        );
    }
}
