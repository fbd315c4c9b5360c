//! PubMed query construction.
//!
//! A query combines user-supplied required terms (AND-joined, never
//! dropped) with an optional domain vocabulary (OR-joined, truncated
//! according to the inclusion policy). An empty required list drops the
//! empty group entirely rather than emitting degenerate `() AND (...)`
//! syntax.

/// How much of the optional vocabulary to fold into the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionPolicy {
    /// Every optional term, OR-joined.
    All,
    /// The first `ceil(len * p / 100)` terms, `p` in 1..=100. The
    /// ceiling guarantees at least one term for a non-empty vocabulary.
    Fraction(u8),
    /// Omit the optional clause entirely.
    None,
}

impl InclusionPolicy {
    /// Parse a loose textual form, e.g. from config or CLI flags.
    pub fn from_str_loose(s: &str, percent: u8) -> Self {
        match s.to_lowercase().as_str() {
            "none" | "off" => InclusionPolicy::None,
            "fraction" | "percent" | "partial" => InclusionPolicy::Fraction(percent),
            _ => InclusionPolicy::All,
        }
    }

    /// Number of leading vocabulary terms this policy selects.
    fn selected(&self, len: usize) -> usize {
        match *self {
            InclusionPolicy::All => len,
            InclusionPolicy::Fraction(p) => {
                let p = usize::from(p.min(100));
                (len * p).div_ceil(100)
            }
            InclusionPolicy::None => 0,
        }
    }
}

/// Build the enriched search query.
///
/// Output shape is `(required AND-joined) AND (optional OR-joined)`;
/// whichever clause is empty is dropped, and a single surviving clause
/// is emitted bare.
pub fn build_query(required: &[String], optional: &[String], policy: InclusionPolicy) -> String {
    let required_clause = required.join(" AND ");
    let optional_clause = optional[..policy.selected(optional.len())].join(" OR ");

    match (required_clause.is_empty(), optional_clause.is_empty()) {
        (false, false) => format!("({required_clause}) AND ({optional_clause})"),
        (false, true) => required_clause,
        (true, false) => optional_clause,
        (true, true) => String::new(),
    }
}
