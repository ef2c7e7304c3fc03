//! Include/exclude matchers built from comma-separated property values.

use crate::error::ContextError;
use regex::Regex;

/// How one configured token is compared against a candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateType {
    Equals,
    StartsWith,
    /// Whole-string regular expression.
    Matches,
}

#[derive(Debug, Clone)]
enum Matcher {
    Equals(String),
    StartsWith(String),
    Matches(Regex),
}

impl Matcher {
    fn test(&self, candidate: &str) -> bool {
        match self {
            Matcher::Equals(token) => token == candidate,
            Matcher::StartsWith(token) => candidate.starts_with(token.as_str()),
            Matcher::Matches(re) => re.is_match(candidate),
        }
    }
}

/// OR of the matchers compiled from one property. Never empty.
#[derive(Debug, Clone)]
pub struct NamePredicate {
    matchers: Vec<Matcher>,
}

impl NamePredicate {
    /// Compiles `value`; returns `Ok(None)` when it yields no tokens.
    ///
    /// `property` is only used for error reporting.
    pub fn parse(
        property: &str,
        value: &str,
        kind: PredicateType,
    ) -> Result<Option<Self>, ContextError> {
        let mut matchers = Vec::new();
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let matcher = match kind {
                PredicateType::Equals => Matcher::Equals(token.to_string()),
                PredicateType::StartsWith => Matcher::StartsWith(token.to_string()),
                PredicateType::Matches => {
                    let re = Regex::new(&format!("^(?:{})$", token)).map_err(|e| {
                        ContextError::InvalidPattern {
                            property: property.to_string(),
                            pattern: token.to_string(),
                            message: e.to_string(),
                        }
                    })?;
                    Matcher::Matches(re)
                }
            };
            matchers.push(matcher);
        }

        if matchers.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Self { matchers }))
        }
    }

    pub fn test(&self, candidate: &str) -> bool {
        self.matchers.iter().any(|m| m.test(candidate))
    }
}

/// Combined allow-list/deny-list.
///
/// A configured includes list wins over excludes and turns the filter into
/// an allow-list. Without includes, excludes is a deny-list. With neither,
/// everything passes.
#[derive(Debug, Clone, Default)]
pub struct IncludesExcludes {
    includes: Option<NamePredicate>,
    excludes: Option<NamePredicate>,
}

impl IncludesExcludes {
    pub fn new(includes: Option<NamePredicate>, excludes: Option<NamePredicate>) -> Self {
        Self { includes, excludes }
    }

    pub fn test(&self, candidate: &str) -> bool {
        if let Some(includes) = &self.includes
            && includes.test(candidate)
        {
            return true;
        }
        if let Some(excludes) = &self.excludes
            && excludes.test(candidate)
        {
            return false;
        }
        self.includes.is_none()
    }
}
