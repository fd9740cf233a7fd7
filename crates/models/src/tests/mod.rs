/// Input schema validation and partial-update semantics
pub mod schema_tests;




use crate::contact::ContactBase;

pub(crate) fn sample(first: &str, last: &str, email: &str) -> ContactBase {
    ContactBase {
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone_number: "+380501234567".into(),
        birth_date: None,
        additional_info: None,
    }
}
