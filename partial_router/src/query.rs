//! Structured query-string handling.
//!
//! Parameters are kept as an ordered list so that anything not explicitly
//! overridden survives a merge untouched, duplicates included. Each parsed
//! parameter remembers the exact text it came from and is written back
//! byte for byte; only parameters set through [`QueryParams::set`] are
//! form-urlencoded.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Param {
    name: String,
    value: String,
    /// Segment as it appeared in the parsed query; `None` once overridden
    raw: Option<String>,
}

impl Param {
    fn parse(segment: &str) -> Self {
        let (name, value) = form_urlencoded::parse(segment.as_bytes())
            .next()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .unwrap_or_default();

        Self {
            name,
            value,
            raw: Some(segment.to_owned()),
        }
    }

    /// An empty segment, as between `&&`
    fn is_blank(&self) -> bool {
        self.raw.as_deref() == Some("")
    }

    fn write(&self, out: &mut String) {
        match &self.raw {
            Some(raw) => out.push_str(raw),
            None => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .append_pair(&self.name, &self.value)
                    .finish();
                out.push_str(&encoded);
            }
        }
    }
}

/// Ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<Param>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        if query.is_empty() {
            return Self::new();
        }

        Self {
            params: query.split('&').map(Param::parse).collect(),
        }
    }

    fn named(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|param| !param.is_blank())
    }

    /// Value of the first occurrence of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named()
            .find(|param| param.name == name)
            .map(|param| param.value.as_str())
    }

    /// Replace the value of the first occurrence of `name`, or append it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        let existing = self
            .params
            .iter_mut()
            .find(|param| !param.is_blank() && param.name == name);

        match existing {
            Some(param) => {
                param.value = value;
                param.raw = None;
            }
            None => self.params.push(Param {
                name,
                value,
                raw: None,
            }),
        }
    }

    /// Apply every override in order with [`QueryParams::set`] semantics
    pub fn merge<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in overrides {
            self.set(name, value);
        }
    }

    /// Number of occurrences of `name`
    pub fn count(&self, name: &str) -> usize {
        self.named().filter(|param| param.name == name).count()
    }

    /// Number of parameters, empty segments excluded
    pub fn len(&self) -> usize {
        self.named().count()
    }

    /// Whether serializing yields an empty string
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Decoded `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named()
            .map(|param| (param.name.as_str(), param.value.as_str()))
    }
}

impl FromStr for QueryParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for QueryParams {
    /// Serialized form without the leading `?`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                out.push('&');
            }
            param.write(&mut out);
        }

        f.write_str(&out)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.merge(iter);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_leading_question_mark() {
        let with = QueryParams::parse("?page=2&sort=title");
        let without = QueryParams::parse("page=2&sort=title");

        assert_eq!(with, without);
        assert_eq!(with.get("page"), Some("2"));
        assert_eq!(with.get("sort"), Some("title"));
    }

    #[test]
    fn set_replaces_existing_value_in_place() {
        let mut params = QueryParams::parse("page=2&sort=title&order=asc");
        params.set("sort", "date");

        assert_eq!(params.count("sort"), 1);
        assert_eq!(params.to_string(), "page=2&sort=date&order=asc");
    }

    #[test]
    fn set_appends_missing_parameter() {
        let mut params = QueryParams::parse("page=2&q=rust");
        params.set("sort", "title");

        assert_eq!(params.to_string(), "page=2&q=rust&sort=title");
    }

    #[test]
    fn set_only_touches_first_occurrence() {
        let mut params = QueryParams::parse("tag=a&tag=b");
        params.set("tag", "c");

        assert_eq!(params.to_string(), "tag=c&tag=b");
    }

    #[test]
    fn merge_is_idempotent() {
        let mut once = QueryParams::parse("page=4&order=asc");
        once.merge([("order", "desc"), ("sort", "title")]);

        let mut twice = once.clone();
        twice.merge([("order", "desc"), ("sort", "title")]);

        assert_eq!(once, twice);
        assert_eq!(twice.to_string(), "page=4&order=desc&sort=title");
    }

    #[test]
    fn untouched_parameters_keep_their_original_text() {
        let mut params = QueryParams::parse("tags=a,b&q=a%20b&draft&&x=%7e");
        params.set("sort", "title");

        assert_eq!(
            params.to_string(),
            "tags=a,b&q=a%20b&draft&&x=%7e&sort=title"
        );
        assert_eq!(params.get("tags"), Some("a,b"));
        assert_eq!(params.get("q"), Some("a b"));
        assert_eq!(params.get("draft"), Some(""));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn overridden_value_is_encoded() {
        let mut params = QueryParams::parse("q=a%20b&page=1");
        params.set("q", "c d");

        assert_eq!(params.to_string(), "q=c+d&page=1");
    }

    #[test]
    fn encoded_names_match_their_decoded_form() {
        let mut params = QueryParams::parse("sort%5Bkey%5D=date");
        params.set("sort[key]", "title");

        assert_eq!(params.count("sort[key]"), 1);
        assert_eq!(params.get("sort[key]"), Some("title"));
    }

    #[test]
    fn names_needing_escapes_are_matched_literally() {
        // Regex metacharacters in a name must not match anything else.
        let mut params = QueryParams::parse("a.b=1&axb=2");
        params.set("a.b", "3");

        assert_eq!(params.get("a.b"), Some("3"));
        assert_eq!(params.get("axb"), Some("2"));
    }

    #[test]
    fn values_round_trip_through_encoding() {
        let mut params = QueryParams::new();
        params.set("q", "hello world&more");

        let serialized = params.to_string();
        assert_eq!(serialized, "q=hello+world%26more");
        assert_eq!(QueryParams::parse(&serialized).get("q"), Some("hello world&more"));
    }

    #[test]
    fn empty_query_is_empty() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
        assert_eq!(QueryParams::new().to_string(), "");
    }
}
