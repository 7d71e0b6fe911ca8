//! Tests for the struct reader engine and its failure policies.

use assay::reader::property;
use assay::validator::structs::{additional_properties, max_properties, min_properties};
use assay::validator::{invalid, valid};
use assay::{
    readers, DefaultErrorBuilders, JsError, JsPath, JsReader, JsValue, Location, PropertyPaths,
    ReaderEnv, ReaderOptions, StructReaderBuilder,
};
use serde_json::json;

type EB = DefaultErrorBuilders;

#[derive(Debug, PartialEq)]
struct User {
    id: String,
    name: String,
}

fn user_reader() -> JsReader<EB, User> {
    let mut builder = StructReaderBuilder::<EB>::new();
    let id = builder.property(property::required("id", readers::string()));
    let name = builder.property(property::required("name", readers::string()));
    builder.build(move |mut values| User {
        id: values.take(id),
        name: values.take(name),
    })
}

fn accumulate() -> ReaderEnv<EB> {
    ReaderEnv::default()
}

fn fail_fast() -> ReaderEnv<EB> {
    ReaderEnv::new(DefaultErrorBuilders, ReaderOptions::new().with_fail_fast(true))
}

fn causes(failure: &assay::Failure) -> Vec<(String, JsError)> {
    failure
        .iter()
        .map(|cause| (cause.location.to_string(), cause.error().clone()))
        .collect()
}

#[test]
fn test_reads_struct() {
    let source = JsValue::from(json!({"id": "u1", "name": "Ada"}));
    let result = user_reader().read_root(&accumulate(), &source);
    assert_eq!(
        result.ok(),
        Some(User {
            id: "u1".to_string(),
            name: "Ada".to_string()
        })
    );
}

#[test]
fn test_empty_struct_reports_every_missing_property() {
    let source = JsValue::from(json!({}));
    let failure = user_reader()
        .read_root(&accumulate(), &source)
        .into_result()
        .unwrap_err();

    assert_eq!(
        causes(&failure),
        vec![
            ("#/id".to_string(), JsError::PathMissing),
            ("#/name".to_string(), JsError::PathMissing),
        ]
    );
}

#[test]
fn test_fail_fast_yields_one_cause() {
    let source = JsValue::from(json!({"id": 1, "name": false}));

    let all = user_reader()
        .read_root(&accumulate(), &source)
        .into_result()
        .unwrap_err();
    assert_eq!(all.len(), 2);
    let locations: Vec<_> = all.iter().map(|c| c.location.to_string()).collect();
    assert_eq!(locations, vec!["#/id", "#/name"]);

    let first = user_reader()
        .read_root(&fail_fast(), &source)
        .into_result()
        .unwrap_err();
    assert_eq!(first.len(), 1);
    assert_eq!(first.first().location.to_string(), "#/id");
}

#[test]
fn test_additional_property_is_reported_at_its_key() {
    let mut builder = StructReaderBuilder::<EB>::new();
    let id = builder.property(property::required("id", readers::string()));
    builder.validation(additional_properties());
    let reader = builder.build(move |mut values| values.take(id));

    let source = JsValue::from(json!({"id": "x", "extra": 1}));
    let failure = reader.read_root(&accumulate(), &source).into_result().unwrap_err();

    assert_eq!(
        causes(&failure),
        vec![("#/extra".to_string(), JsError::AdditionalProperties)]
    );
}

#[test]
fn test_property_count_validators() {
    let mut builder = StructReaderBuilder::<EB>::new();
    builder.property(property::optional("a", readers::int()));
    builder
        .validation(min_properties(1))
        .validation(max_properties(2));
    let reader = builder.build(|_| ());

    let env = accumulate();
    assert_eq!(
        reader
            .read_root(&env, &JsValue::from(json!({})))
            .into_result()
            .unwrap_err()
            .first()
            .error()
            .code(),
        "min_properties"
    );
    assert!(reader.read_root(&env, &JsValue::from(json!({"a": 1}))).is_success());
    assert_eq!(
        reader
            .read_root(&env, &JsValue::from(json!({"a": 1, "b": 2, "c": 3})))
            .into_result()
            .unwrap_err()
            .first()
            .error()
            .code(),
        "max_properties"
    );
}

#[test]
fn test_nested_structs_report_full_locations() {
    let mut address = StructReaderBuilder::<EB>::new();
    let city = address.property(property::required("city", readers::string()));
    let address = address.build(move |mut values| values.take(city));

    let mut person = StructReaderBuilder::<EB>::new();
    let name = person.property(property::required("name", readers::string()));
    let home = person.property(property::required("address", address));
    let person = person.build(move |mut values| (values.take(name), values.take(home)));

    let source = JsValue::from(json!({"name": "Ada", "address": {"zip": "12345"}}));
    let failure = person.read_root(&accumulate(), &source).into_result().unwrap_err();
    assert_eq!(
        causes(&failure),
        vec![("#/address/city".to_string(), JsError::PathMissing)]
    );
}

#[test]
fn test_nested_path_property() {
    let mut builder = StructReaderBuilder::<EB>::new();
    let first_phone = builder.property(property::required(
        JsPath::key("user").then_key("phones").then_index(0),
        readers::string(),
    ));
    let reader = builder.build(move |mut values| values.take(first_phone));

    let env = accumulate();
    let source = JsValue::from(json!({"user": {"phones": ["555-1234"]}}));
    assert_eq!(reader.read_root(&env, &source).ok(), Some("555-1234".to_string()));

    let source = JsValue::from(json!({"user": {"phones": []}}));
    let failure = reader.read_root(&env, &source).into_result().unwrap_err();
    assert_eq!(failure.first().location.to_string(), "#/user/phones[0]");
}

#[test]
fn test_alternative_paths_for_renamed_fields() {
    let mut builder = StructReaderBuilder::<EB>::new();
    let name = builder.property(property::required(
        PropertyPaths::new("name").or("full_name").or("fullName"),
        readers::string(),
    ));
    builder.validation(additional_properties());
    let reader = builder.build(move |mut values| values.take(name));

    let source = JsValue::from(json!({"fullName": "Ada Lovelace"}));
    assert_eq!(
        reader.read_root(&accumulate(), &source).ok(),
        Some("Ada Lovelace".to_string())
    );
}

#[test]
fn test_struct_read_at_nested_location() {
    let source = JsValue::from(json!({}));
    let failure = user_reader()
        .read(&accumulate(), &Location::root().key("owner"), &source)
        .into_result()
        .unwrap_err();
    assert_eq!(failure.first().location.to_string(), "#/owner/id");
}

#[test]
fn test_custom_cross_property_check() {
    let mut builder = StructReaderBuilder::<EB>::new();
    let password = builder.property(property::required("password", readers::string()));
    let confirm = builder.property(property::required("confirm", readers::string()));
    builder.custom(move |_, location, values| {
        if values.get(password) == values.get(confirm) {
            valid()
        } else {
            invalid(
                &location.key("confirm"),
                JsError::custom("mismatch", "passwords do not match"),
            )
        }
    });
    let reader = builder.build(|_| ());

    let env = accumulate();
    let matching = JsValue::from(json!({"password": "s3cret", "confirm": "s3cret"}));
    assert!(reader.read_root(&env, &matching).is_success());

    let different = JsValue::from(json!({"password": "s3cret", "confirm": "secret"}));
    let failure = reader.read_root(&env, &different).into_result().unwrap_err();
    assert_eq!(failure.with_code("mismatch").len(), 1);
    assert_eq!(failure.first().location.to_string(), "#/confirm");
}

#[test]
fn test_failure_renders_as_json() {
    let failure = user_reader()
        .read_root(&accumulate(), &JsValue::from(json!({"id": "x"})))
        .into_result()
        .unwrap_err();
    assert_eq!(
        failure.to_json(),
        json!([{
            "location": "#/name",
            "errors": [{"code": "path_missing", "message": "missing path"}]
        }])
    );
}
