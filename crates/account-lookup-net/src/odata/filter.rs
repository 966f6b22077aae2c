//! `$filter` expressions.
//!
//! Filter expressions are built as a small tree and rendered to OData text on
//! demand. Values are always rendered as quoted string literals with embedded
//! quotes doubled, so user input can never terminate the literal early.

use std::fmt;
use std::str::FromStr;

use account_lookup_core::logging::targets;

/// Boolean operator joining several filter predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinOperator {
    /// Every predicate must match.
    And,
    /// Any predicate may match.
    #[default]
    Or,
}

impl JoinOperator {
    /// The OData keyword for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinOperator::And => "and",
            JoinOperator::Or => "or",
        }
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a join operator name is not `and` or `or`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter join operator '{0}', expected 'and' or 'or'")]
pub struct UnknownJoinOperator(pub String);

impl FromStr for JoinOperator {
    type Err = UnknownJoinOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(JoinOperator::And),
            "or" => Ok(JoinOperator::Or),
            _ => Err(UnknownJoinOperator(s.to_string())),
        }
    }
}

/// A `$filter` expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `contains(column,'value')`.
    Contains {
        /// Logical name of the column to search.
        column: String,
        /// Raw (unescaped) substring to look for.
        value: String,
    },
    /// Several expressions joined by one operator.
    Join {
        operator: JoinOperator,
        operands: Vec<Filter>,
    },
}

impl Filter {
    /// Create a `contains` predicate.
    pub fn contains(column: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Join expressions with a boolean operator.
    pub fn join(operator: JoinOperator, operands: Vec<Filter>) -> Self {
        Filter::Join { operator, operands }
    }

    /// Build the lookup search filter: one `contains` predicate per
    /// whitespace-separated term of `search`, joined by `operator`.
    ///
    /// Text made only of whitespace still produces a single predicate with
    /// an empty value, which matches every record.
    ///
    /// ```
    /// use account_lookup_net::odata::{Filter, JoinOperator};
    ///
    /// let filter = Filter::contains_terms("name", "foo bar", JoinOperator::Or);
    /// assert_eq!(filter.to_string(), "contains(name,'foo') or contains(name,'bar')");
    /// ```
    pub fn contains_terms(column: &str, search: &str, operator: JoinOperator) -> Self {
        let mut operands: Vec<Filter> = search
            .split_whitespace()
            .map(|term| Filter::contains(column, term))
            .collect();
        tracing::trace!(
            target: targets::ODATA,
            column,
            terms = operands.len(),
            %operator,
            "building contains filter"
        );

        match operands.len() {
            0 => Filter::contains(column, ""),
            1 => operands.remove(0),
            _ => Filter::join(operator, operands),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Join { operands, .. } if operands.len() > 1 => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Contains { column, value } => {
                write!(f, "contains({column},{})", string_literal(value))
            }
            Filter::Join { operator, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {operator} ")?;
                    }
                    operand.fmt_operand(f)?;
                }
                Ok(())
            }
        }
    }
}

/// Render `value` as an OData string literal.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_term() {
        let filter = Filter::contains_terms("name", "foo", JoinOperator::Or);
        assert_eq!(filter.to_string(), "contains(name,'foo')");
    }

    #[test]
    fn test_two_terms_or() {
        let filter = Filter::contains_terms("name", "foo bar", JoinOperator::Or);
        assert_eq!(filter.to_string(), "contains(name,'foo') or contains(name,'bar')");
    }

    #[test]
    fn test_terms_and_with_extra_whitespace() {
        let filter = Filter::contains_terms("accountnumber", "  a\tb  c ", JoinOperator::And);
        assert_eq!(
            filter.to_string(),
            "contains(accountnumber,'a') and contains(accountnumber,'b') and contains(accountnumber,'c')"
        );
    }

    #[test]
    fn test_whitespace_only_is_single_empty_term() {
        let filter = Filter::contains_terms("name", "   ", JoinOperator::Or);
        assert_eq!(filter.to_string(), "contains(name,'')");
    }

    #[test]
    fn test_quotes_are_doubled() {
        let filter = Filter::contains_terms("name", "O'Brien", JoinOperator::Or);
        assert_eq!(filter.to_string(), "contains(name,'O''Brien')");

        let filter = Filter::contains("name", "x') or true or contains(name,'");
        assert_eq!(
            filter.to_string(),
            "contains(name,'x'') or true or contains(name,''')"
        );
    }

    #[test]
    fn test_nested_join_is_parenthesized() {
        let filter = Filter::join(
            JoinOperator::And,
            vec![
                Filter::contains_terms("name", "a b", JoinOperator::Or),
                Filter::contains("city", "Oslo"),
            ],
        );
        assert_eq!(
            filter.to_string(),
            "(contains(name,'a') or contains(name,'b')) and contains(city,'Oslo')"
        );
    }

    #[test]
    fn test_join_operator_parse() {
        assert_eq!("or".parse::<JoinOperator>(), Ok(JoinOperator::Or));
        assert_eq!(" AND ".parse::<JoinOperator>(), Ok(JoinOperator::And));
        assert_eq!(
            "xor".parse::<JoinOperator>(),
            Err(UnknownJoinOperator("xor".to_string()))
        );
    }
}
