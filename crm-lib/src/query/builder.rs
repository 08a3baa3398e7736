//! Fluent typed query builder

use std::marker::PhantomData;

use super::ComparisonOperator;
use super::FilterNode;
use super::Filterable;
use super::Literal;
use super::LogicalOperator;
use super::QueryRequest;
use super::TextFilterable;
use crate::error::QueryError;
use crate::model::CrmEntity;
use crate::model::Property;
use crate::model::Selectable;

/// No filter yet: `filter` starts the chain.
#[derive(Debug, Clone, Copy)]
pub struct Unfiltered;

/// A filter exists: `and`/`or` extend it.
#[derive(Debug, Clone, Copy)]
pub struct Filtered;

/// Builder for a query over records of type `E`.
///
/// Properties are resolved to remote names through their descriptors, so
/// only mapped fields of `E` can be selected or filtered. The filter chain
/// is strictly left-associative: each `and`/`or` takes everything built so
/// far as its left operand.
///
/// # Example
///
/// ```ignore
/// let path = Query::<Lead>::from()
///     .select(&[&Lead::CITY, &Lead::LINE1])
///     .filter(Lead::BUDGET)
///     .greater_than(Decimal::new(1000000, 1))
///     .and(Lead::CITY)
///     .equals("Berlin")
///     .take(50)?
///     .path()?;
///
/// assert_eq!(
///     path,
///     "leads?$select=address1_city,address1_line1\
///      &$filter=(budgetamount gt 100000.0 and address1_city eq 'Berlin')&$top=50"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Query<E, S = Unfiltered> {
    request: QueryRequest,
    _marker: PhantomData<(fn() -> E, S)>,
}

impl<E: CrmEntity> Query<E, Unfiltered> {
    /// Starts a query over the entity set of `E`.
    #[allow(clippy::should_implement_trait)]
    pub fn from() -> Self {
        Self::with_request(QueryRequest::new(E::entity_name().set()))
    }

    /// Starts the filter chain on a property.
    pub fn filter<T: Filterable>(self, property: Property<E, T>) -> Condition<E, T> {
        Condition::new(self.request, property, None)
    }
}

impl<E: CrmEntity> Query<E, Filtered> {
    /// Continues the chain: `(<everything so far> and <next comparison>)`.
    pub fn and<T: Filterable>(self, property: Property<E, T>) -> Condition<E, T> {
        Condition::new(self.request, property, Some(LogicalOperator::And))
    }

    /// Continues the chain: `(<everything so far> or <next comparison>)`.
    pub fn or<T: Filterable>(self, property: Property<E, T>) -> Condition<E, T> {
        Condition::new(self.request, property, Some(LogicalOperator::Or))
    }
}

impl<E: CrmEntity, S> Query<E, S> {
    fn with_request(request: QueryRequest) -> Self {
        Self {
            request,
            _marker: PhantomData,
        }
    }

    /// Replaces the selected fields, keeping the given order.
    pub fn select(mut self, properties: &[&dyn Selectable<E>]) -> Self {
        self.request.fields = properties
            .iter()
            .map(|property| property.select_name().into_owned())
            .collect();
        self
    }

    /// Caps the number of returned rows; `n` must be positive.
    pub fn take(mut self, n: u32) -> Result<Self, QueryError> {
        if n == 0 {
            return Err(QueryError::InvalidArgument(
                "take expects a positive row count".to_string(),
            ));
        }
        self.request.top = Some(n);
        Ok(self)
    }

    /// Returns the request built so far.
    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    /// Consumes the builder, returning the request.
    pub fn into_request(self) -> QueryRequest {
        self.request
    }

    /// Compiles the query options (`$select=...&$filter=...&$top=n`).
    pub fn query_string(&self) -> Result<String, QueryError> {
        self.request.query_string()
    }

    /// Compiles the GET path (`<set>?<query options>`).
    pub fn path(&self) -> Result<String, QueryError> {
        self.request.path()
    }
}

/// A pending comparison on a property of type `T`.
///
/// Only comparisons are available until an operand is supplied.
#[must_use = "a condition does nothing until a comparison is supplied"]
#[derive(Debug)]
pub struct Condition<E, T> {
    request: QueryRequest,
    field: String,
    combinator: Option<LogicalOperator>,
    _marker: PhantomData<(fn() -> E, fn() -> T)>,
}

impl<E: CrmEntity, T: Filterable> Condition<E, T> {
    fn new(
        request: QueryRequest,
        property: Property<E, T>,
        combinator: Option<LogicalOperator>,
    ) -> Self {
        Self {
            request,
            field: property.descriptor().read_key().into_owned(),
            combinator,
            _marker: PhantomData,
        }
    }

    /// `<field> eq <value>`
    pub fn equals(self, value: impl Into<T::Operand>) -> Query<E, Filtered> {
        self.compare(ComparisonOperator::Equal, value.into())
    }

    /// `<field> ne <value>`
    pub fn not_equals(self, value: impl Into<T::Operand>) -> Query<E, Filtered> {
        self.compare(ComparisonOperator::NotEqual, value.into())
    }

    /// `<field> gt <value>`
    pub fn greater_than(self, value: impl Into<T::Operand>) -> Query<E, Filtered> {
        self.compare(ComparisonOperator::Greater, value.into())
    }

    /// `<field> lt <value>`
    pub fn less_than(self, value: impl Into<T::Operand>) -> Query<E, Filtered> {
        self.compare(ComparisonOperator::Less, value.into())
    }

    /// `<field> ge <value>`
    pub fn greater_or_equal(self, value: impl Into<T::Operand>) -> Query<E, Filtered> {
        self.compare(ComparisonOperator::GreaterOrEqual, value.into())
    }

    /// `<field> le <value>`
    pub fn less_or_equal(self, value: impl Into<T::Operand>) -> Query<E, Filtered> {
        self.compare(ComparisonOperator::LessOrEqual, value.into())
    }

    fn compare(self, operator: ComparisonOperator, value: T::Operand) -> Query<E, Filtered> {
        self.push(operator, value.into())
    }
}

impl<E: CrmEntity, T> Condition<E, T> {
    fn push(mut self, operator: ComparisonOperator, value: Literal) -> Query<E, Filtered> {
        let comparison = FilterNode::comparison(self.field, operator, value);
        let root = match (self.combinator, self.request.filter.take()) {
            (Some(combinator), Some(left)) => FilterNode::logical(left, combinator, comparison),
            _ => comparison,
        };
        self.request.filter = Some(root);
        Query::with_request(self.request)
    }
}

impl<E: CrmEntity, T: TextFilterable> Condition<E, T> {
    /// `contains(<field>, <value>)`
    pub fn contains(self, value: impl Into<String>) -> Query<E, Filtered> {
        self.push(ComparisonOperator::Contains, Literal::String(value.into()))
    }

    /// `startswith(<field>, <value>)`
    pub fn starts_with(self, value: impl Into<String>) -> Query<E, Filtered> {
        self.push(ComparisonOperator::StartsWith, Literal::String(value.into()))
    }

    /// `endswith(<field>, <value>)`
    pub fn ends_with(self, value: impl Into<String>) -> Query<E, Filtered> {
        self.push(ComparisonOperator::EndsWith, Literal::String(value.into()))
    }
}
