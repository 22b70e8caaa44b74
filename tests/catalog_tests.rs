use sqljson::catalog::{self, ArgKind, Call, Family, Operation, ResultKind};
use sqljson::registry::{self, DescriptorRegistry, FunctionRegistry};
use sqljson::{Argument, ExprError, JsonPath, SqlExpression, Value};

fn literals(n: usize) -> Vec<Argument> {
    (0..n).map(|i| Argument::literal(i as i64)).collect()
}

#[test]
fn test_every_operation_rejects_wrong_arity() {
    for entry in catalog::entries() {
        if entry.min_args > 0 {
            let err = Call::new(entry.operation)
                .args(literals(entry.min_args - 1))
                .build()
                .unwrap_err();
            assert!(
                matches!(err, ExprError::IllegalArgumentShape { .. }),
                "{} accepted too few arguments",
                entry.key
            );
        }
        if let Some(max) = entry.max_args {
            let err = Call::new(entry.operation).args(literals(max + 1)).build().unwrap_err();
            assert!(
                matches!(err, ExprError::IllegalArgumentShape { .. }),
                "{} accepted too many arguments",
                entry.key
            );
        }
    }
}

#[test]
fn test_every_operation_renders_at_minimum_arity() {
    for entry in catalog::entries() {
        let mut count = entry.min_args;
        if entry.check_shape(count).is_err() {
            count += 1;
        }
        let expr = Call::new(entry.operation).args(literals(count)).build().unwrap();
        assert_eq!(expr.operation(), Some(entry.operation));
        assert_eq!(expr.kind(), entry.result);
        assert!(!expr.to_sql().contains('{'), "{} left a placeholder", entry.key);
    }
}

#[test]
fn test_pairing_error_names_expected_shape() {
    let err = Call::new(Operation::JsonObject).args(literals(3)).build().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("JSON_OBJECT"), "{}", message);
    assert!(message.contains("even number"), "{}", message);
    assert!(message.contains('3'), "{}", message);

    assert!(Call::new(Operation::JsonSet).args(literals(4)).build().is_err());
    assert!(Call::new(Operation::JsonSet).args(literals(5)).build().is_ok());
}

#[test]
fn test_lookup_by_name_and_key() {
    assert_eq!(catalog::lookup("JSON_TABLE").unwrap().result, ResultKind::Table);
    assert_eq!(catalog::lookup("member of").unwrap().operation, Operation::MemberOf);
    assert_eq!(catalog::lookup("json_cast").unwrap().family, Family::Creation);
    assert!(matches!(
        catalog::lookup("JSON_NOPE"),
        Err(ExprError::UnknownOperation(name)) if name == "JSON_NOPE"
    ));
}

#[test]
fn test_argument_kinds_cycle() {
    let set = Operation::JsonSet.entry();
    assert_eq!(set.kind_at(0), ArgKind::Json);
    assert_eq!(set.kind_at(1), ArgKind::Path);
    assert_eq!(set.kind_at(2), ArgKind::Any);
    assert_eq!(set.kind_at(3), ArgKind::Path);
    assert_eq!(set.kind_at(4), ArgKind::Any);
}

#[test]
fn test_descriptor_registry_matches_catalog() {
    let registry = DescriptorRegistry::with_catalog().unwrap();
    assert_eq!(registry.len(), catalog::entries().len());
    for entry in catalog::entries() {
        let descriptor = registry.get(entry.key).unwrap();
        assert_eq!(descriptor.min_args, entry.min_args);
        assert_eq!(descriptor.max_args, entry.max_args);
        assert_eq!(descriptor.result, entry.result);
    }
}

struct NameCollector(Vec<String>);

impl FunctionRegistry for NameCollector {
    fn register_function(&mut self, descriptor: registry::FunctionDescriptor) -> sqljson::Result<()> {
        self.0.push(descriptor.name.to_string());
        Ok(())
    }
}

#[test]
fn test_custom_registry() {
    let mut names = NameCollector(Vec::new());
    let count = registry::register_catalog(&mut names).unwrap();
    assert_eq!(count, names.0.len());
    assert!(names.0.iter().any(|n| n == "JSON_OVERLAPS"));
    assert!(names.0.iter().any(|n| n == "->>"));
}

#[test]
fn test_calls_mix_argument_kinds() {
    let path = JsonPath::parse("$.a").unwrap();
    let expr = Call::new(Operation::JsonContains)
        .arg(Argument::raw("`doc`"))
        .arg(Value::Text("1".into()))
        .arg(&path)
        .build()
        .unwrap();
    assert_eq!(expr.to_sql(), "JSON_CONTAINS(`doc`, '1', '$.a')");
    assert_eq!(expr.result_kind(), ResultKind::Boolean);
}
