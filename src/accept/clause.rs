//! Parsing of a single Accept header clause.

use std::collections::HashMap;

/// Priority given to clauses without a usable `q` parameter.
pub const DEFAULT_PRIORITY: f32 = 1.0;

/// One comma-separated segment of an Accept header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptClause {
    /// The trimmed type portion, e.g. `application/vnd.api+json`
    pub media_type: String,
    /// Spellings of the media type to look up in the registry, most specific first
    pub content_types: Vec<String>,
    /// Parameters such as `q`, case as given
    pub parameters: HashMap<String, String>,
    /// Preference weight in `[0, 1]`
    pub priority: f32,
}

impl AcceptClause {
    /// Parses one clause. Never fails: malformed pieces degrade to defaults.
    ///
    /// # Example
    ///
    /// ```
    /// # use webcodec::accept::AcceptClause;
    /// let clause = AcceptClause::parse("application/vnd.api+json; q=0.5");
    /// assert_eq!(clause.priority, 0.5);
    /// assert_eq!(clause.content_types[0], "application/vnd.api+json");
    /// assert!(clause.content_types.contains(&"application/json".to_string()));
    /// ```
    pub fn parse(clause: &str) -> Self {
        let mut pieces = clause.split(';');
        let media_type = pieces.next().unwrap_or_default().trim().to_string();

        let mut parameters = HashMap::new();
        for piece in pieces {
            let (name, value) = piece.split_once('=').unwrap_or((piece, ""));
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            parameters.insert(name.to_string(), value.trim().to_string());
        }

        let priority = parameters
            .get("q")
            .and_then(|q| q.parse::<f32>().ok())
            .filter(|q| q.is_finite())
            .map(|q| q.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_PRIORITY);

        Self {
            content_types: candidates(&media_type),
            media_type,
            parameters,
            priority,
        }
    }

    /// True for `*/*` and `*`, which accept any format.
    pub fn is_full_wildcard(&self) -> bool {
        self.media_type == "*/*" || self.media_type == "*"
    }

    /// The category of a `type/*` range, if this clause is one.
    pub fn wildcard_category(&self) -> Option<&str> {
        match self.media_type.strip_suffix("/*") {
            Some(category) if !category.is_empty() && category != "*" => Some(category),
            _ => None,
        }
    }
}

/// Expands a type portion into its candidate spellings.
///
/// The category is everything before the first `/`; the slash never appears in
/// a category-less candidate. Order: the type as given, then the base and
/// structural suffix forms under the same category, then the category-less
/// forms.
fn candidates(media_type: &str) -> Vec<String> {
    let (category, subtype) = match media_type.split_once('/') {
        Some((category, subtype)) => (Some(category), subtype),
        None => (None, media_type),
    };

    let mut parts = subtype.split('+');
    let base = parts.next().unwrap_or_default();
    let suffixes: Vec<&str> = parts.collect();

    let mut out = vec![media_type.to_string()];
    if !suffixes.is_empty() {
        if let Some(category) = category {
            out.push(format!("{category}/{base}"));
            out.extend(suffixes.iter().map(|suffix| format!("{category}/{suffix}")));
        }
    }
    out.push(subtype.to_string());
    if !suffixes.is_empty() {
        out.push(base.to_string());
        out.extend(suffixes.iter().map(|suffix| suffix.to_string()));
    }

    let mut seen = Vec::with_capacity(out.len());
    for candidate in out {
        if !candidate.is_empty() && !seen.contains(&candidate) {
            seen.push(candidate);
        }
    }
    seen
}
