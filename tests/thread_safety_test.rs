//! Tests for sharing readers across threads.

use assay::reader::property;
use assay::validator::numbers;
use assay::{readers, DefaultErrorBuilders, JsReader, JsValue, ReaderEnv, ReaderRef, StructReaderBuilder};
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[derive(Debug, PartialEq)]
struct User {
    name: String,
    age: i32,
}

fn user_reader() -> JsReader<DefaultErrorBuilders, User> {
    let mut builder = StructReaderBuilder::new();
    let name = builder.property(property::required("name", readers::string()));
    let age = builder.property(property::required(
        "age",
        readers::int().validation(numbers::minimum(0)),
    ));
    builder.build(move |mut values| User {
        name: values.take(name),
        age: values.take(age),
    })
}

#[test]
fn test_concurrent_reads() {
    let reader = user_reader();
    let env = Arc::new(ReaderEnv::default());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let reader = reader.clone();
            let env = Arc::clone(&env);
            thread::spawn(move || {
                let source = JsValue::from(json!({"name": format!("User{}", i), "age": 20 + i}));
                let user = reader.read_root(&env, &source).ok().unwrap();
                assert_eq!(user.age, 20 + i);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let reader = user_reader();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let reader = reader.clone();
            thread::spawn(move || {
                let source = if i % 2 == 0 {
                    json!({"name": "ok", "age": i})
                } else {
                    json!({"age": -i})
                };
                let result = reader.read_root(&ReaderEnv::default(), &JsValue::from(source));
                if i % 2 == 0 {
                    assert!(result.is_success());
                } else {
                    assert_eq!(result.failure().map(|f| f.len()), Some(2));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_read_all_keeps_order() {
    let sources: Vec<JsValue> = (0..100)
        .map(|i| {
            if i % 10 == 0 {
                JsValue::from(json!({"name": i}))
            } else {
                JsValue::from(json!({"name": format!("User{}", i), "age": i}))
            }
        })
        .collect();

    let results = user_reader().read_all(&ReaderEnv::default(), &sources);

    assert_eq!(results.len(), 100);
    for (i, result) in results.into_iter().enumerate() {
        if i % 10 == 0 {
            assert!(result.is_failure());
        } else {
            assert_eq!(result.ok().map(|user| user.age), Some(i as i32));
        }
    }
}

#[test]
fn test_recursive_reader_across_threads() {
    let list = ReaderRef::<DefaultErrorBuilders, Vec<i32>>::new("list");
    list.define(readers::array(readers::int())).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let reader = list.reader();
            thread::spawn(move || {
                let source = JsValue::from(json!([i, i + 1]));
                reader.read_root(&ReaderEnv::default(), &source).ok()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let i = i as i32;
        assert_eq!(handle.join().unwrap(), Some(vec![i, i + 1]));
    }
}
