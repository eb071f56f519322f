use crate::evaluation::Measurement;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::slice::Iter;

/// Ordered set of named measurements.
///
/// This is the shape of a finalized run's full statistics and of the
/// cross-run macro sum. Names are unique; insertion order is kept, and the
/// report serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    measurements: Vec<Measurement>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Measurement> {
        self.measurements.iter()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|i| self.measurements[i].value)
    }

    /// Sets `name` to `value`, replacing an existing entry in place.
    pub fn set<N: Into<String>>(&mut self, name: N, value: f64) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.measurements[i].value = value,
            None => self.measurements.push(Measurement::new(name, value)),
        }
    }

    /// Builder form of [`Report::set`].
    pub fn with<N: Into<String>>(mut self, name: N, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Folds `other` into `self` key by key.
    ///
    /// Names already present are added numerically. Missing names are copied
    /// from `other` as they are, never added onto an implicit zero, so a
    /// `NaN` only appears in the sum if some source carried one.
    pub fn merge_add(&mut self, other: &Report) {
        for m in &other.measurements {
            match self.position(&m.name) {
                Some(i) => self.measurements[i].value += m.value,
                None => self.measurements.push(m.clone()),
            }
        }
    }

    /// Copy of `self` with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Report {
        self.measurements
            .iter()
            .map(|m| Measurement::new(m.name.clone(), m.value * factor))
            .collect()
    }

    /// Pretty JSON rendering, falling back to `Debug` output if the report
    /// cannot be serialized.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.measurements.iter().position(|m| m.name == name)
    }
}

impl FromIterator<Measurement> for Report {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        let mut report = Report::new();
        for m in iter {
            report.set(m.name, m.value);
        }
        report
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Measurement;
    type IntoIter = Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.measurements.iter()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.measurements.len()))?;
        for m in &self.measurements {
            map.serialize_entry(&m.name, &m.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Report {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(name, v)| {
                let value = match &v {
                    Value::Null => f64::NAN,
                    Value::Number(n) => n.as_f64().ok_or_else(|| {
                        D::Error::custom(format!("measurement {name:?} is out of range"))
                    })?,
                    other => {
                        return Err(D::Error::custom(format!(
                            "measurement {name:?} must be a number or null, got {other}"
                        )));
                    }
                };
                Ok(Measurement::new(name, value))
            })
            .collect()
    }
}
