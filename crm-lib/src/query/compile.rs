//! Query compiler: [`QueryRequest`] → OData query text
//!
//! Pure and deterministic: equal requests compile to identical strings.

use chrono::DateTime;
use chrono::Utc;

use super::ComparisonOperator;
use super::FilterNode;
use super::Literal;
use super::LogicalOperator;
use super::QueryRequest;
use crate::error::QueryError;

/// Compiles a request into its GET path: `<collection>?<query options>`.
///
/// Without any query option the path is the bare collection name.
pub fn compile(request: &QueryRequest) -> Result<String, QueryError> {
    let query = query_string(request)?;
    if query.is_empty() {
        Ok(request.collection.clone())
    } else {
        Ok(format!("{}?{}", request.collection, query))
    }
}

/// Compiles the query options of a request.
///
/// Clause order is always `$select`, `$filter`, `$top`; absent clauses are
/// left out and present ones joined with `&`.
pub fn query_string(request: &QueryRequest) -> Result<String, QueryError> {
    let mut parts = Vec::new();

    if !request.fields.is_empty() {
        parts.push(format!("$select={}", request.fields.join(",")));
    }

    if let Some(filter) = &request.filter {
        parts.push(format!("$filter={}", compile_filter(filter)?));
    }

    if let Some(top) = request.top {
        if top == 0 {
            return Err(QueryError::InvalidArgument(
                "$top must be a positive integer".to_string(),
            ));
        }
        parts.push(format!("$top={}", top));
    }

    Ok(parts.join("&"))
}

/// Renders a filter tree as an OData `$filter` expression.
pub fn compile_filter(node: &FilterNode) -> Result<String, QueryError> {
    match node {
        FilterNode::Comparison {
            field,
            operator,
            value,
        } => {
            let literal = compile_literal(value);
            if operator.is_function() {
                Ok(format!("{}({}, {})", operator.as_str(), field, literal))
            } else {
                Ok(format!("{} {} {}", field, operator.as_str(), literal))
            }
        }
        FilterNode::Logical {
            left,
            operator: LogicalOperator::Not,
            right: None,
        } => Ok(format!("not {}", compile_filter(left)?)),
        FilterNode::Logical {
            operator: LogicalOperator::Not,
            right: Some(_),
            ..
        } => Err(QueryError::UnsupportedOperator(
            "not takes a single operand".to_string(),
        )),
        FilterNode::Logical {
            left,
            operator,
            right: Some(right),
        } => Ok(format!(
            "({} {} {})",
            compile_filter(left)?,
            operator.as_str(),
            compile_filter(right)?
        )),
        FilterNode::Logical {
            operator,
            right: None,
            ..
        } => Err(QueryError::UnsupportedFilterNode(format!(
            "{} without right operand",
            operator.as_str()
        ))),
    }
}

/// Renders a literal.
///
/// Strings, timestamps (`yyyy-MM-dd HH:mm:ss`) and linked record ids are
/// single-quoted; numbers use `.` as decimal point and no grouping.
pub fn compile_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => escape_string(s),
        Literal::DateTime(dt) => format!("'{}'", format_datetime(dt)),
        Literal::Int(n) => n.to_string(),
        Literal::Decimal(d) => d.to_string(),
        Literal::Double(n) => {
            let s = n.to_string();
            if s.contains('.') || s.contains('e') || s.contains("inf") || s.contains("NaN") {
                s
            } else {
                format!("{}.0", s)
            }
        }
        Literal::Bool(b) => b.to_string(),
        Literal::Guid(id) => id.to_string(),
        Literal::Entity(id) => format!("'{}'", id),
    }
}

/// Quotes a string literal, doubling embedded quotes.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
