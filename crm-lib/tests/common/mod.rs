//! Shared fixtures: a lead and an account record type and the option sets
//! they use.

#![allow(dead_code)]

use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;

use crm_lib::error::MappingError;
use crm_lib::mapping::EntityMapper;
use crm_lib::model::CrmEntity;
use crm_lib::model::EntityBase;
use crm_lib::model::FieldDescriptor;
use crm_lib::model::FieldValue;
use crm_lib::model::Lookup;
use crm_lib::model::Property;
use crm_lib::model::Schema;
use crm_lib::model::Value;
use crm_lib::option_set::OptionSetRegistry;
use crm_lib::option_set_enum;

pub const SYNC_STATES: &str = "test_sync_states";

option_set_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum SyncState {
        #[default]
        Synchronized,
        OutOfSync => "Out of Sync",
        Error,
    }
}

/// Descriptor document with one custom set, one system set and one custom
/// set without options.
pub const OPTION_SETS_JSON: &str = r#"{
    "@odata.context": "https://org.crm.dynamics.com/api/data/v9.2/$metadata#GlobalOptionSetDefinitions",
    "value": [
        {
            "Name": "test_sync_states",
            "IsCustomOptionSet": true,
            "Options": [
                {"Value": 1, "Label": {"LocalizedLabels": [{"Label": "Synchronized", "LanguageCode": 1033}]}},
                {"Value": 2, "Label": {"LocalizedLabels": [{"Label": "Out of Sync", "LanguageCode": 1033}, {"Label": "Nicht synchron", "LanguageCode": 1031}]}},
                {"Value": 3, "Label": {"LocalizedLabels": [{"Label": "Error", "LanguageCode": 1033}]}}
            ]
        },
        {
            "Name": "budgetstatus",
            "IsCustomOptionSet": false,
            "Options": [
                {"Value": 0, "Label": {"LocalizedLabels": [{"Label": "No Committed Budget", "LanguageCode": 1033}]}}
            ]
        },
        {
            "Name": "test_flags",
            "IsCustomOptionSet": true
        }
    ]
}"#;

pub fn registry() -> OptionSetRegistry {
    let registry = OptionSetRegistry::new();
    registry.load_json(OPTION_SETS_JSON).unwrap();
    registry
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lead {
    pub base: EntityBase,
    pub city: String,
    pub line1: Option<String>,
    pub budget: Option<Decimal>,
    pub exchange_rate: Option<f64>,
    pub employees: i32,
    pub do_not_email: bool,
    pub sync_state: SyncState,
    pub previous_sync_state: Option<SyncState>,
    pub sync_state_code: Option<i32>,
    pub sync_state_label: Option<String>,
    pub founded: Option<i32>,
    pub last_contacted: Option<DateTime<Utc>>,
    pub parent_account: Option<Lookup<Account>>,
}

impl Lead {
    pub const CITY: Property<Lead, String> =
        Property::new("city", FieldDescriptor::string("address1_city"));
    pub const LINE1: Property<Lead, Option<String>> =
        Property::new("line1", FieldDescriptor::string("address1_line1"));
    pub const BUDGET: Property<Lead, Option<Decimal>> =
        Property::new("budget", FieldDescriptor::decimal("budgetamount"));
    pub const EXCHANGE_RATE: Property<Lead, Option<f64>> =
        Property::new("exchange_rate", FieldDescriptor::double("exchangerate"));
    pub const EMPLOYEES: Property<Lead, i32> =
        Property::new("employees", FieldDescriptor::int("numberofemployees"));
    pub const DO_NOT_EMAIL: Property<Lead, bool> =
        Property::new("do_not_email", FieldDescriptor::boolean("donotemail"));
    pub const SYNC_STATE: Property<Lead, SyncState> = Property::new(
        "sync_state",
        FieldDescriptor::option("test_sync_state", SYNC_STATES),
    );
    pub const PREVIOUS_SYNC_STATE: Property<Lead, Option<SyncState>> = Property::new(
        "previous_sync_state",
        FieldDescriptor::option("test_previous_sync_state", SYNC_STATES),
    );
    pub const SYNC_STATE_CODE: Property<Lead, Option<i32>> = Property::new(
        "sync_state_code",
        FieldDescriptor::option("test_last_sync_state", SYNC_STATES),
    );
    pub const SYNC_STATE_LABEL: Property<Lead, Option<String>> = Property::new(
        "sync_state_label",
        FieldDescriptor::option("test_initial_sync_state", SYNC_STATES),
    );
    pub const FOUNDED: Property<Lead, Option<i32>> =
        Property::new("founded", FieldDescriptor::datetime("test_founded"));
    pub const LAST_CONTACTED: Property<Lead, Option<DateTime<Utc>>> =
        Property::new("last_contacted", FieldDescriptor::datetime("test_last_contacted"));
    pub const PARENT_ACCOUNT: Property<Lead, Option<Lookup<Account>>> =
        Property::new("parent_account", FieldDescriptor::reference("parentaccountid"));
}

impl CrmEntity for Lead {
    const LOGICAL_NAME: &'static str = "lead";

    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Lead>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::builder()
                .field(Lead::CITY, |l| &l.city, |l| &mut l.city)
                .field(Lead::LINE1, |l| &l.line1, |l| &mut l.line1)
                .field(Lead::BUDGET, |l| &l.budget, |l| &mut l.budget)
                .field(Lead::EXCHANGE_RATE, |l| &l.exchange_rate, |l| &mut l.exchange_rate)
                .field(Lead::EMPLOYEES, |l| &l.employees, |l| &mut l.employees)
                .field(Lead::DO_NOT_EMAIL, |l| &l.do_not_email, |l| &mut l.do_not_email)
                .field(Lead::SYNC_STATE, |l| &l.sync_state, |l| &mut l.sync_state)
                .field(
                    Lead::PREVIOUS_SYNC_STATE,
                    |l| &l.previous_sync_state,
                    |l| &mut l.previous_sync_state,
                )
                .field(Lead::SYNC_STATE_CODE, |l| &l.sync_state_code, |l| &mut l.sync_state_code)
                .field(
                    Lead::SYNC_STATE_LABEL,
                    |l| &l.sync_state_label,
                    |l| &mut l.sync_state_label,
                )
                .field(Lead::FOUNDED, |l| &l.founded, |l| &mut l.founded)
                .field(Lead::LAST_CONTACTED, |l| &l.last_contacted, |l| &mut l.last_contacted)
                .lookup(Lead::PARENT_ACCOUNT, |l| &l.parent_account, |l| &mut l.parent_account)
                .build()
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }
}

/// Account numbers are stored zero-padded to ten digits remotely and kept
/// unpadded on the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub base: EntityBase,
    pub name: String,
    pub account_number: String,
    pub city: String,
}

impl Account {
    pub const NAME: Property<Account, String> =
        Property::new("name", FieldDescriptor::string("name"));
    pub const ACCOUNT_NUMBER: Property<Account, String> =
        Property::new("account_number", FieldDescriptor::string("accountnumber"));
    pub const CITY: Property<Account, String> =
        Property::new("city", FieldDescriptor::string("address1_city"));
}

impl CrmEntity for Account {
    const LOGICAL_NAME: &'static str = "account";

    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Account>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::builder()
                .field(Account::NAME, |a| &a.name, |a| &mut a.name)
                .field(Account::ACCOUNT_NUMBER, |a| &a.account_number, |a| &mut a.account_number)
                .field(Account::CITY, |a| &a.city, |a| &mut a.city)
                .on_hydrate_field("accountnumber", |_: &FieldDescriptor, value: &Value| {
                    Ok(FieldValue::Text(value.to_string().trim_start_matches('0').to_string()))
                })
                .on_commit_field("accountnumber", |_: &FieldDescriptor, value: &FieldValue| {
                    let digits = value.to_string();
                    if !digits.chars().all(|c| c.is_ascii_digit()) {
                        return Err(MappingError::custom(format!("not an account number: {digits}")).into());
                    }
                    Ok(Value::String(format!("{digits:0>10}")))
                })
                .build()
        })
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }
}

pub fn mapper() -> EntityMapper {
    EntityMapper::new(&registry())
}
