//! Free-text search over the audit log.
//!
//! Two matching strategies exist and the caller picks one explicitly through
//! [`SearchPolicy`]:
//!
//! - [`SearchPolicy::ExclusionList`] strips a fixed list of reserved query
//!   tokens from the term and splices what is left into a literal `LIKE`
//!   query. This reproduces the plant system's historical behaviour exactly,
//!   including its weaknesses: the list rewrites the value instead of
//!   escaping it, so the resulting query can still be malformed or
//!   manipulated, and harmless search words containing a token are mangled
//!   (`"Compressor"` is searched as `"Compress"`).
//! - [`SearchPolicy::Parameterized`] skips the list and binds the raw term as
//!   a parameter.
//!
//! Both match case-insensitively (SQLite `LIKE`) against `details` or `type`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use diesel::prelude::*;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{LogEntry, LogSearch};
use crate::orm::log_entry::{DEFAULT_RECENT_LIMIT, recent};

/// Tokens removed from search terms under [`SearchPolicy::ExclusionList`],
/// applied in this order.
pub const RESERVED_TOKENS: &[&str] = &[
    "SELECT", "UNION", "OR", "AND", "INSERT", "UPDATE", "DELETE", "DROP", "ALTER", "CREATE",
    "FROM", "WHERE", "LIKE", "GROUP", "BY", "ORDER", "HAVING", "JOIN", "LEFT", "RIGHT", "OUTER",
    "INNER", "LIMIT", "OFFSET", ";", "--", "/*", "*/", "XP_CMDSHELL", "SLEEP", "BENCHMARK",
    "CHAR", "NCHAR", "NVARCHAR", "CAST", "CONVERT",
];

static RESERVED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RESERVED_TOKENS
        .iter()
        .map(|token| {
            RegexBuilder::new(&regex::escape(token))
                .case_insensitive(true)
                .build()
                .expect("escaped literal is a valid pattern")
        })
        .collect()
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SearchPolicy {
    /// Strip reserved tokens, then splice into a literal query.
    #[default]
    ExclusionList,
    /// Bind the unmodified term as a query parameter.
    Parameterized,
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPolicy::ExclusionList => write!(f, "exclusion_list"),
            SearchPolicy::Parameterized => write!(f, "parameterized"),
        }
    }
}

impl FromStr for SearchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "exclusion_list" => Ok(SearchPolicy::ExclusionList),
            "parameterized" => Ok(SearchPolicy::Parameterized),
            other => Err(format!(
                "unknown search policy '{}' (expected exclusion_list or parameterized)",
                other
            )),
        }
    }
}

/// Removes every case-insensitive occurrence of each reserved token.
///
/// Removal is plain substring removal, not word-aware, and runs token by
/// token in list order, so earlier removals can shape later matches.
pub fn filter_term(term: &str) -> String {
    RESERVED_PATTERNS
        .iter()
        .fold(term.to_string(), |filtered, pattern| pattern.replace_all(&filtered, "").into_owned())
}

/// Searches the audit log for `term`.
///
/// An empty term returns the [`DEFAULT_RECENT_LIMIT`] most recent entries.
/// Otherwise every entry whose `details` or `type` contains the (policy
/// processed) term is returned in store order.
///
/// A failing match is not an error: the result is empty and carries a
/// warning. Only a failure while loading the recent entries for an empty
/// term is returned as `Err`.
pub fn search(
    conn: &mut SqliteConnection,
    term: &str,
    policy: SearchPolicy,
) -> Result<LogSearch, diesel::result::Error> {
    if term.is_empty() {
        return Ok(LogSearch {
            filtered_term: String::new(),
            entries: recent(conn, DEFAULT_RECENT_LIMIT)?,
            warning: None,
        });
    }

    let (filtered_term, matched) = match policy {
        SearchPolicy::ExclusionList => {
            let filtered = filter_term(term);
            let matched = match_literal(conn, &filtered);
            (filtered, matched)
        }
        SearchPolicy::Parameterized => (term.to_string(), match_bound(conn, term)),
    };

    match matched {
        Ok(entries) => Ok(LogSearch { filtered_term, entries, warning: None }),
        Err(e) => {
            warn!("Log search for {:?} failed: {}", filtered_term, e);
            Ok(LogSearch {
                filtered_term,
                entries: Vec::new(),
                warning: Some(format!("Query error: {}", e)),
            })
        }
    }
}

fn match_literal(
    conn: &mut SqliteConnection,
    filtered: &str,
) -> Result<Vec<LogEntry>, diesel::result::Error> {
    let sql = format!(
        "SELECT id, type AS type_, device_id, technician_id, timestamp, details FROM logs \
         WHERE details LIKE '%{0}%' OR type LIKE '%{0}%'",
        filtered
    );
    diesel::sql_query(sql).load::<LogEntry>(conn)
}

fn match_bound(conn: &mut SqliteConnection, term: &str) -> Result<Vec<LogEntry>, diesel::result::Error> {
    use crate::schema::logs::dsl::*;

    let pattern = format!("%{}%", term);
    logs.filter(details.like(pattern.clone()).or(type_.like(pattern)))
        .select(LogEntry::as_select())
        .load(conn)
}
