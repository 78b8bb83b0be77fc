//! End-to-end rendering: parse, resolve, modify, format

use std::sync::Arc;
use tokenised_strings::map;
use tokenised_strings::parsing::Parser;
use tokenised_strings::rendering::{RenderError, RenderErrorKind, Renderer};
use tokenised_strings::values::{
    AccessorError, DynamicObject, ObjectValue, ObjectValueBag, Value, ValueErrorKind, ValueStore,
    Values,
};
use tokenised_strings::{Error, TokenizedStringBuilder};

fn render(renderer: &Renderer, template: &str) -> Result<String, RenderError> {
    let ast = Parser::new().parse(template).expect("template to parse");
    renderer.render(&ast, Values::new(), None)
}

fn lower(value: Value) -> Value {
    Value::from(value.as_str().unwrap_or_default().to_lowercase())
}

#[test]
fn nested_value_with_modifier() {
    let mut renderer = Renderer::new();
    renderer.add_value("value", map! { "with" => map! { "nesting" => "WORLD" } });
    renderer.add_modifier("lower", lower);

    assert_eq!(
        render(&renderer, "Hello {value.with.nesting | lower}.").unwrap(),
        "Hello world."
    );
}

#[test]
fn unresolved_value_names_its_path() {
    let error = render(&Renderer::new(), "{world}").unwrap_err();
    assert_eq!(error.kind(), RenderErrorKind::UnresolvedValue);
    match error {
        RenderError::Value(inner) => {
            assert_eq!(inner.kind(), ValueErrorKind::Inaccessible);
            assert_eq!(inner.path(), Some("world"));
        }
        other => panic!("expected a value error, found {:?}", other),
    }
}

#[test]
fn partial_path_is_reported() {
    let mut renderer = Renderer::new();
    renderer.add_value("user", map! { "name" => "Ada" });

    let error = render(&renderer, "{user.name.first}").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Cannot access properties on string. (at path \"user.name.first\")"
    );
}

/// Host type exposing one accessor and one plain property.
struct Account {
    owner: String,
    balance: i64,
}

impl ObjectValue for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn call_accessor(&self, name: &str) -> Option<Result<Value, AccessorError>> {
        match name {
            "getOwner" => Some(Ok(Value::from(self.owner.to_uppercase()))),
            "getBalance" if self.balance < 0 => Some(Err(AccessorError::new("overdrawn"))),
            _ => None,
        }
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "owner" => Some(Value::from(self.owner.as_str())),
            "balance" => Some(Value::Int(self.balance)),
            _ => None,
        }
    }
}

#[test]
fn host_objects_resolve_accessors_then_properties() {
    let mut renderer = Renderer::new();
    renderer.add_value(
        "account",
        Value::object(Account {
            owner: "ada".into(),
            balance: 10,
        }),
    );

    assert_eq!(
        render(&renderer, "{account.owner}: {account.balance}").unwrap(),
        "ADA: 10"
    );
    assert_eq!(
        render(&renderer, "{account.iban}").unwrap_err().to_string(),
        "Cannot access property. (at path \"account.iban\")"
    );
}

#[test]
fn accessor_failures_abort_rendering() {
    let mut renderer = Renderer::new();
    renderer.add_value(
        "account",
        Value::object(Account {
            owner: "ada".into(),
            balance: -1,
        }),
    );

    let error = render(&renderer, "{account.balance}").unwrap_err();
    match error {
        RenderError::Value(inner) => assert_eq!(inner.kind(), ValueErrorKind::Accessor),
        other => panic!("expected a value error, found {:?}", other),
    }
}

#[test]
fn object_bag_uses_model_for_unknown_keys() {
    let article = DynamicObject::new("Article")
        .with_property("title", "Tokenised strings")
        .with_accessor("getAuthor", || Ok(map! { "name" => "Ada" }));

    let mut renderer = Renderer::with_standard_modifiers();
    renderer.set_value_bag(Box::new(ObjectValueBag::new(Arc::new(article))));
    renderer.add_value("title", "Override");

    assert_eq!(
        render(&renderer, "{title} by {author.name|upper}").unwrap(),
        "Override by ADA"
    );
}

#[test]
fn renders_are_independent() {
    let mut renderer = Renderer::new();
    renderer.add_value("greeting", "hi");
    let ast = Parser::new().parse("{greeting} {name}").unwrap();

    let first = renderer
        .render(&ast, Values::from([("name".into(), Value::from("a"))]), None)
        .unwrap();
    let second = renderer
        .render(&ast, Values::from([("name".into(), Value::from("b"))]), None)
        .unwrap();

    assert_eq!((first.as_str(), second.as_str()), ("hi a", "hi b"));
    assert!(!renderer.value_bag().has(&["name".to_string()]).unwrap());
}

#[test]
fn renderer_is_shareable_across_threads() {
    let mut renderer = Renderer::with_standard_modifiers();
    renderer.add_value("name", "ada");
    let renderer = Arc::new(renderer);
    let ast = Arc::new(Parser::new().parse("{name|capitalize}").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let renderer = Arc::clone(&renderer);
            let ast = Arc::clone(&ast);
            std::thread::spawn(move || renderer.render(&ast, Values::new(), None).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Ada");
    }
}

#[test]
fn builder_encodes_urls() {
    let mut builder = TokenizedStringBuilder::new();
    builder.add_param("test_token", "replaced value");

    let template = "https://www.example.com/test/{{ test_token }}/";
    assert_eq!(
        builder.build_as_url(template, Values::new(), false).unwrap(),
        "https://www.example.com/test/replaced+value/"
    );
    assert_eq!(
        builder.build_as_url(template, Values::new(), true).unwrap(),
        "https://www.example.com/test/replaced%20value/"
    );
}

#[test]
fn builder_escapes_html() {
    let mut builder = TokenizedStringBuilder::new();
    builder.add_param("test_token", "<replaced value>");
    builder.add_param("quoted", r#"it's "quoted""#);

    assert_eq!(
        builder
            .build_as_html("<p>{{ test_token }}</p>", Values::new())
            .unwrap(),
        "<p>&lt;replaced value&gt;</p>"
    );
    assert_eq!(
        builder
            .build_as_html("<p title='{{ quoted }}'>", Values::new())
            .unwrap(),
        "<p title='it&apos;s &quot;quoted&quot;'>"
    );
}

#[test]
fn builder_modifiers_and_processors() {
    let mut builder = TokenizedStringBuilder::new();
    builder
        .add_param("name", "world")
        .add_modifier("shout", |value: Value| {
            Value::from(format!("{}!", value.as_str().unwrap_or_default().to_uppercase()))
        });

    let wrap = |s: &str| format!("<{}>", s);
    assert_eq!(
        builder
            .build("Hello {{ name | shout }}", Values::new(), Some(&wrap))
            .unwrap(),
        "Hello <WORLD!>"
    );
}

#[test]
fn can_build_checks_every_tag() {
    let mut builder = TokenizedStringBuilder::new();
    builder.add_param("definedValue", "yes");

    assert!(builder
        .can_build("Example {{ definedValue }}", Values::new())
        .unwrap());
    assert!(!builder
        .can_build("Example {{ undefinedValue }}", Values::new())
        .unwrap());
    assert!(builder
        .can_build(
            "Example {{ undefinedValue }}",
            Values::from([("undefinedValue".into(), Value::from(1))])
        )
        .unwrap());

    let error = builder.can_build("Example {{ }}", Values::new()).unwrap_err();
    assert!(matches!(error, Error::Parse(_)));
}
