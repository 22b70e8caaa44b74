use sqljson::catalog::{Call, Operation, Template};
use sqljson::expression::bound_values;
use sqljson::expression::quote::{quote_string, unescape_literal};
use sqljson::{
    column, json_array, json_object, Argument, ExprError, LiteralMode, ParameterStyle, RenderConfig,
    SqlExpression, Value,
};

#[test]
fn test_rendering_is_deterministic() {
    let build = || {
        json_object([
            Argument::from("tags"),
            Argument::from(json_array([1i64, 2, 3]).unwrap()),
            Argument::from("owner"),
            Argument::from(column("u.name")),
        ])
        .unwrap()
    };
    let first = build();
    let second = build();
    assert_eq!(first.to_sql(), second.to_sql());
    assert_eq!(first, second);
}

#[test]
fn test_quoting_round_trips() {
    for text in ["plain", "it's", "back\\slash", "line\nbreak", "tab\tzero\0", "\u{1a}ctrl-z", "", "''"] {
        let quoted = quote_string(text);
        assert_eq!(unescape_literal(&quoted).unwrap(), text, "{:?}", quoted);
    }
    assert_eq!(unescape_literal("'O''Brien'").unwrap(), "O'Brien");
    assert!(unescape_literal("unquoted").is_err());
}

#[test]
fn test_splice_counts() {
    for k in 0..5usize {
        let args: Vec<Argument> = (0..k).map(|i| Argument::literal(i as i64)).collect();
        let sql = Call::new(Operation::JsonArray).args(args).build().unwrap().to_sql().to_string();
        let inner = &sql["JSON_ARRAY(".len()..sql.len() - 1];
        let rendered: Vec<&str> = if inner.is_empty() { Vec::new() } else { inner.split(", ").collect() };
        assert_eq!(rendered.len(), k, "{}", sql);
    }
}

#[test]
fn test_template_engine_directly() {
    let template = Template::parse("F({0}, {1*})").unwrap();
    let bound = template.bind(vec![Argument::raw("a")]).unwrap();
    assert_eq!(bound.render().to_sql(), "F(a)");

    let err = template.bind(Vec::new()).unwrap_err();
    assert!(matches!(err, ExprError::TemplateArityMismatch { index: 0, available: 0, .. }));
}

#[test]
fn test_bind_mode_collects_parameters_in_text_order() {
    let object = json_object([Argument::from("k"), Argument::from(json_array(["x", "y"]).unwrap())]).unwrap();

    let question = object.render_with(&RenderConfig::new().bind_literals());
    assert_eq!(question.sql, "JSON_OBJECT(?, JSON_ARRAY(?, ?))");
    assert_eq!(
        question.params,
        vec![Value::from("k"), Value::from("x"), Value::from("y")]
    );
    assert_eq!(question.params, bound_values(&object));

    let dollar = object.render_with(
        &RenderConfig::new()
            .literal_mode(LiteralMode::Bind)
            .parameter_style(ParameterStyle::Dollar),
    );
    assert_eq!(dollar.sql, "JSON_OBJECT($1, JSON_ARRAY($2, $3))");

    let inline = object.render_with(&RenderConfig::default());
    assert_eq!(inline.sql, object.to_sql());
    assert!(inline.params.is_empty());
}

#[test]
fn test_config_validation() {
    assert!(matches!(
        RenderConfig::parse("style=question;offset=1"),
        Err(ExprError::InvalidConfig(_))
    ));
    assert!(RenderConfig::parse("mode=sideways").is_err());
    let config: RenderConfig = "mode=bind".parse().unwrap();
    assert_eq!(config.literal_mode, LiteralMode::Bind);
}

#[test]
fn test_special_floats_and_booleans() {
    let array = json_array([Value::Float(1.0), Value::Float(f64::NAN), Value::Boolean(false)]).unwrap();
    assert_eq!(array.to_sql(), "JSON_ARRAY(1.0, NULL, FALSE)");
}
