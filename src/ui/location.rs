use std::fmt;
use url::form_urlencoded;

/// An in-app route: path plus decoded query pairs, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Parse `"/path?key=value&…"`.
    pub fn parse(route: &str) -> Self {
        let (path, query) = route.split_once('?').unwrap_or((route, ""));
        let query = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self {
            path: path.to_string(),
            query,
        }
    }

    /// First value for `key`; empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Set `key`, or drop it when `value` is `None` or empty.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        self.query.retain(|(k, _)| k != key);
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.query.push((key.to_string(), value.to_string()));
        }
    }

    pub fn with(mut self, key: &str, value: Option<&str>) -> Self {
        self.set(key, value);
        self
    }

    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query_string())
        }
    }
}
