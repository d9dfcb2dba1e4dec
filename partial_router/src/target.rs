//! Resolution of the URL a partial navigation should load.

use std::fmt;

use crate::query::QueryParams;

/// What a trigger element asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Load the trigger's own `href`
    Href(String),
    /// Merge these overrides into the current URL's query string
    Merge(Vec<(String, String)>),
}

/// A resolved navigation target.
///
/// Path, query and fragment are written back exactly as parsed; a merge only
/// rewrites the parameters it overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    path: String,
    /// `None` when the URL has no `?`
    query: Option<QueryParams>,
    fragment: Option<String>,
}

impl NavigationTarget {
    /// Split a URL into path, query and fragment
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_owned())),
            None => (url, None),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(QueryParams::parse(query))),
            None => (rest, None),
        };

        Self {
            path: path.to_owned(),
            query,
            fragment,
        }
    }

    /// Resolve `action` against the URL currently shown in the address bar.
    ///
    /// An `href` is used as written. Returns `None` when the action carries
    /// nothing to navigate to (an empty `href` marks a disabled control).
    pub fn resolve(current_url: &str, action: &NavAction) -> Option<Self> {
        match action {
            NavAction::Href(href) if href.trim().is_empty() => None,
            NavAction::Href(href) => Some(Self::parse(href.trim())),
            NavAction::Merge(overrides) => {
                let mut target = Self::parse(current_url);

                if !overrides.is_empty() {
                    target
                        .query
                        .get_or_insert_with(QueryParams::new)
                        .merge(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                }

                Some(target)
            }
        }
    }

    /// Path part, as written
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, if the URL has a query part
    pub fn query(&self) -> Option<&QueryParams> {
        self.query.as_ref()
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;

        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }

        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }

        Ok(())
    }
}
