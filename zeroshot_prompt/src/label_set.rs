use std::fmt;

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::PromptError;

/// A single diagnosis option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: u32,
    pub description: String,
}

/// Ordered mapping from label key to description.
///
/// Keys are unique. Iteration order is insertion order, which is also the order the options are
/// listed in the rendered prompt. When deserialized from a JSON object the document order is kept
/// and every key must parse as an unsigned integer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut label_set = Self::new();
        for (key, description) in pairs {
            label_set.insert(key, description)?;
        }
        Ok(label_set)
    }

    /// Appends a label. Fails if the key is already present.
    pub fn insert<S: Into<String>>(
        &mut self,
        key: u32,
        description: S,
    ) -> Result<&mut Self, PromptError> {
        if self.contains_key(key) {
            return Err(PromptError::DuplicateLabel(key));
        }
        self.labels.push(Label {
            key,
            description: description.into(),
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.labels.iter().any(|label| label.key == key)
    }

    pub fn get(&self, key: u32) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.key == key)
            .map(|label| label.description.as_str())
    }

    /// The key at `index` in display order.
    pub fn key_at(&self, index: usize) -> Option<u32> {
        self.labels.get(index).map(|label| label.key)
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.iter().map(|label| label.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Newline separated `<key>. <description>` lines, in display order.
    pub fn option_text(&self) -> String {
        self.labels
            .iter()
            .map(|label| format!("{}. {}", label.key, label.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.option_text())
    }
}

impl Serialize for LabelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.labels.len()))?;
        for label in &self.labels {
            map.serialize_entry(&label.key.to_string(), &label.description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LabelSetVisitor)
    }
}

struct LabelSetVisitor;

impl<'de> Visitor<'de> for LabelSetVisitor {
    type Value = LabelSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of integer label keys to descriptions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut label_set = LabelSet::new();
        while let Some((key, description)) = access.next_entry::<String, String>()? {
            let parsed = key
                .trim()
                .parse::<u32>()
                .map_err(|_| de::Error::custom(PromptError::InvalidLabelKey(key.clone())))?;
            label_set
                .insert(parsed, description)
                .map_err(de::Error::custom)?;
        }
        Ok(label_set)
    }
}
