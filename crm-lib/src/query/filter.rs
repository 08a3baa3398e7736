//! Filter AST

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Operator of a [`FilterNode::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// `field eq value`
    Equal,
    /// `field ne value`
    NotEqual,
    /// `field gt value`
    Greater,
    /// `field ge value`
    GreaterOrEqual,
    /// `field lt value`
    Less,
    /// `field le value`
    LessOrEqual,
    /// `contains(field, value)`
    Contains,
    /// `startswith(field, value)`
    StartsWith,
    /// `endswith(field, value)`
    EndsWith,
}

impl ComparisonOperator {
    /// Returns the OData keyword or function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "eq",
            ComparisonOperator::NotEqual => "ne",
            ComparisonOperator::Greater => "gt",
            ComparisonOperator::GreaterOrEqual => "ge",
            ComparisonOperator::Less => "lt",
            ComparisonOperator::LessOrEqual => "le",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::StartsWith => "startswith",
            ComparisonOperator::EndsWith => "endswith",
        }
    }

    /// Returns `true` for operators rendered as a function call.
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::Contains
                | ComparisonOperator::StartsWith
                | ComparisonOperator::EndsWith
        )
    }
}

/// Operator of a [`FilterNode::Logical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
    /// Negates the left operand; takes no right operand.
    Not,
}

impl LogicalOperator {
    /// Returns the OData keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Not => "not",
        }
    }
}

/// A literal operand of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    DateTime(DateTime<Utc>),
    Int(i64),
    Decimal(Decimal),
    Double(f64),
    Bool(bool),
    Guid(Uuid),
    /// The id of a linked record; rendered quoted.
    Entity(Uuid),
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::String(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(v: DateTime<Utc>) -> Self {
        Literal::DateTime(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v.into())
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<Decimal> for Literal {
    fn from(v: Decimal) -> Self {
        Literal::Decimal(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Double(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<Uuid> for Literal {
    fn from(v: Uuid) -> Self {
        Literal::Guid(v)
    }
}

/// A node of a filter tree over remote field names.
///
/// Comparisons are the leaves. Trees are immutable once built; the query
/// builder grows them by wrapping the current root.
///
/// # Example
///
/// ```
/// use crm_lib::query::{ComparisonOperator, FilterNode, compile_filter};
///
/// let filter = FilterNode::and(
///     FilterNode::comparison("budgetamount", ComparisonOperator::Greater, 100000.0),
///     FilterNode::comparison("address1_city", ComparisonOperator::Equal, "Berlin"),
/// );
///
/// assert_eq!(
///     compile_filter(&filter).unwrap(),
///     "(budgetamount gt 100000.0 and address1_city eq 'Berlin')"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// `<field> <operator> <value>`
    Comparison {
        field: String,
        operator: ComparisonOperator,
        value: Literal,
    },
    /// `(<left> and|or <right>)` or `not <left>`
    Logical {
        left: Box<FilterNode>,
        operator: LogicalOperator,
        right: Option<Box<FilterNode>>,
    },
}

impl FilterNode {
    /// Creates a comparison leaf.
    pub fn comparison(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Literal>,
    ) -> Self {
        FilterNode::Comparison {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Creates a binary logical node.
    pub fn logical(left: FilterNode, operator: LogicalOperator, right: FilterNode) -> Self {
        FilterNode::Logical {
            left: Box::new(left),
            operator,
            right: Some(Box::new(right)),
        }
    }

    /// Creates `(<left> and <right>)`.
    pub fn and(left: FilterNode, right: FilterNode) -> Self {
        Self::logical(left, LogicalOperator::And, right)
    }

    /// Creates `(<left> or <right>)`.
    pub fn or(left: FilterNode, right: FilterNode) -> Self {
        Self::logical(left, LogicalOperator::Or, right)
    }

    /// Creates `not <inner>`.
    pub fn not(inner: FilterNode) -> Self {
        FilterNode::Logical {
            left: Box::new(inner),
            operator: LogicalOperator::Not,
            right: None,
        }
    }
}
