//! Typed query builder against the lead fixture.

mod common;

use rust_decimal::Decimal;
use uuid::Uuid;

use common::Account;
use common::Lead;
use crm_lib::error::QueryError;
use crm_lib::model::EntityBase;
use crm_lib::query::ComparisonOperator;
use crm_lib::query::FilterNode;
use crm_lib::query::LogicalOperator;
use crm_lib::query::Query;

#[test]
fn test_select_single_field() {
    let query = Query::<Lead>::from().select(&[&Lead::CITY]);
    assert_eq!(query.query_string().unwrap(), "$select=address1_city");
}

#[test]
fn test_select_keeps_declaration_order() {
    let query = Query::<Lead>::from().select(&[&Lead::CITY, &Lead::LINE1]);
    assert_eq!(
        query.query_string().unwrap(),
        "$select=address1_city,address1_line1"
    );
}

#[test]
fn test_select_replaces_previous_selection() {
    let query = Query::<Lead>::from()
        .select(&[&Lead::CITY, &Lead::LINE1])
        .select(&[&Lead::BUDGET]);
    assert_eq!(query.request().fields, vec!["budgetamount"]);
}

#[test]
fn test_select_lookup_uses_value_key() {
    let query = Query::<Lead>::from().select(&[&Lead::CITY, &Lead::PARENT_ACCOUNT]);
    assert_eq!(
        query.query_string().unwrap(),
        "$select=address1_city,_parentaccountid_value"
    );
}

#[test]
fn test_equals() {
    let query = Query::<Lead>::from().filter(Lead::CITY).equals("Berlin");
    assert_eq!(
        query.query_string().unwrap(),
        "$filter=address1_city eq 'Berlin'"
    );
}

#[test]
fn test_and_is_left_associative() {
    let query = Query::<Lead>::from()
        .filter(Lead::BUDGET)
        .greater_than(Decimal::new(1000000, 1))
        .and(Lead::CITY)
        .equals("Berlin");
    assert_eq!(
        query.query_string().unwrap(),
        "$filter=(budgetamount gt 100000.0 and address1_city eq 'Berlin')"
    );
}

#[test]
fn test_double_operand() {
    let query = Query::<Lead>::from()
        .filter(Lead::EXCHANGE_RATE)
        .greater_or_equal(100000.0)
        .or(Lead::EXCHANGE_RATE)
        .less_or_equal(0.5);
    assert_eq!(
        query.query_string().unwrap(),
        "$filter=(exchangerate ge 100000.0 or exchangerate le 0.5)"
    );
}

#[test]
fn test_chain_nests_to_the_left() {
    let query = Query::<Lead>::from()
        .filter(Lead::CITY)
        .equals("Berlin")
        .or(Lead::CITY)
        .equals("Hamburg")
        .and(Lead::EMPLOYEES)
        .less_than(50);

    let expected = FilterNode::and(
        FilterNode::or(
            FilterNode::comparison("address1_city", ComparisonOperator::Equal, "Berlin"),
            FilterNode::comparison("address1_city", ComparisonOperator::Equal, "Hamburg"),
        ),
        FilterNode::comparison("numberofemployees", ComparisonOperator::Less, 50),
    );
    assert_eq!(query.request().filter.as_ref(), Some(&expected));
    assert_eq!(
        query.query_string().unwrap(),
        "$filter=((address1_city eq 'Berlin' or address1_city eq 'Hamburg') and numberofemployees lt 50)"
    );
    assert!(matches!(
        query.request().filter,
        Some(FilterNode::Logical {
            operator: LogicalOperator::And,
            ..
        })
    ));
}

#[test]
fn test_lookup_equals_entity_with_cap() {
    let id = Uuid::parse_str("2b7c1e7e-0f4a-4d7b-9a61-3f0c2d1e5a90").unwrap();
    let account = Account {
        base: EntityBase::with_id(id),
        ..Account::default()
    };

    let query = Query::<Lead>::from()
        .select(&[&Lead::CITY, &Lead::LINE1])
        .filter(Lead::PARENT_ACCOUNT)
        .equals(&account)
        .take(100)
        .unwrap();

    assert_eq!(
        query.query_string().unwrap(),
        format!(
            "$select=address1_city,address1_line1&$filter=_parentaccountid_value eq '{}'&$top=100",
            id
        )
    );
}

#[test]
fn test_lookup_equals_bare_id() {
    let id = Uuid::new_v4();
    let query = Query::<Lead>::from()
        .filter(Lead::PARENT_ACCOUNT)
        .not_equals(id);
    assert_eq!(
        query.query_string().unwrap(),
        format!("$filter=_parentaccountid_value ne '{}'", id)
    );
}

#[test]
fn test_option_set_field_compares_code() {
    let query = Query::<Lead>::from().filter(Lead::SYNC_STATE).equals(2);
    assert_eq!(query.query_string().unwrap(), "$filter=test_sync_state eq 2");
}

#[test]
fn test_text_functions() {
    let query = Query::<Lead>::from()
        .filter(Lead::CITY)
        .starts_with("Ber")
        .and(Lead::LINE1)
        .contains("O'Connell");
    assert_eq!(
        query.query_string().unwrap(),
        "$filter=(startswith(address1_city, 'Ber') and contains(address1_line1, 'O''Connell'))"
    );

    let query = Query::<Lead>::from().filter(Lead::CITY).ends_with("lin");
    assert_eq!(
        query.query_string().unwrap(),
        "$filter=endswith(address1_city, 'lin')"
    );
}

#[test]
fn test_take_rejects_zero() {
    let result = Query::<Lead>::from().select(&[&Lead::CITY]).take(0);
    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
}

#[test]
fn test_take_without_filter() {
    let query = Query::<Lead>::from().select(&[&Lead::CITY]).take(10).unwrap();
    assert_eq!(query.query_string().unwrap(), "$select=address1_city&$top=10");
}

#[test]
fn test_select_after_filter_keeps_clause_order() {
    let query = Query::<Lead>::from()
        .filter(Lead::DO_NOT_EMAIL)
        .equals(false)
        .take(5)
        .unwrap()
        .select(&[&Lead::CITY]);
    assert_eq!(
        query.query_string().unwrap(),
        "$select=address1_city&$filter=donotemail eq false&$top=5"
    );
}

#[test]
fn test_path_uses_entity_set() {
    let query = Query::<Lead>::from()
        .select(&[&Lead::CITY])
        .filter(Lead::CITY)
        .equals("Berlin");
    assert_eq!(
        query.path().unwrap(),
        "leads?$select=address1_city&$filter=address1_city eq 'Berlin'"
    );
    assert_eq!(Query::<Account>::from().path().unwrap(), "accounts");
}

#[test]
fn test_compilation_is_deterministic() {
    let build = || {
        Query::<Lead>::from()
            .select(&[&Lead::CITY, &Lead::LINE1])
            .filter(Lead::BUDGET)
            .greater_than(Decimal::new(5, 0))
            .take(3)
            .unwrap()
            .into_request()
    };
    assert_eq!(build(), build());
    assert_eq!(build().path().unwrap(), build().path().unwrap());
}
