//! User-facing error messages

use tokenised_strings::parsing::{Parser, TokenRole};
use tokenised_strings::rendering::Renderer;
use tokenised_strings::values::{DynamicObject, Value, Values};
use tokenised_strings::TokenizedStringBuilder;

fn parse_error(template: &str) -> String {
    Parser::new().parse(template).unwrap_err().to_string()
}

fn render_error(renderer: &Renderer, template: &str) -> String {
    let ast = Parser::new().parse(template).unwrap();
    renderer
        .render(&ast, Values::new(), None)
        .unwrap_err()
        .to_string()
}

#[test]
fn parse_errors() {
    insta::assert_snapshot!(
        parse_error("Hello world}"),
        @r#"Unexpected token TAG_CLOSE outside tag (at offset 11 of "Hello world}")"#
    );
    insta::assert_snapshot!(
        parse_error(r"50\%"),
        @r#"Unexpected escaped character "%" (at offset 3 of "50\%")"#
    );
    insta::assert_snapshot!(
        parse_error("{a|Upper}"),
        @r#"Unexpected value "U" in modifiers (at offset 3 of "{a|Upper}")"#
    );
    insta::assert_snapshot!(
        parse_error("{a}\\}"),
        @r#"Unexpected token TAG_CLOSE escaped outside string (at offset 4 of "{a}\}")"#
    );
}

#[test]
fn empty_token_error() {
    let mut parser = Parser::new();
    parser.set_tokens([(TokenRole::TagModifier, "")]);
    insta::assert_snapshot!(
        parser.parse("x").unwrap_err().to_string(),
        @r#"Token TAG_MODIFIER is configured as an empty string (at offset 0 of "x")"#
    );
}

#[test]
fn render_errors() {
    let mut renderer = Renderer::new();
    renderer.add_value("name", "Ada");
    renderer.add_value("secret", DynamicObject::new("Secret").into_value());
    renderer.add_modifier("erase", |_: Value| Value::Null);

    insta::assert_snapshot!(
        render_error(&renderer, "{missing}"),
        @r#"Undefined key. (at path "missing")"#
    );
    insta::assert_snapshot!(
        render_error(&renderer, "{name|nope}"),
        @r#"Undefined modifier "nope"."#
    );
    insta::assert_snapshot!(
        render_error(&renderer, "{name|erase}"),
        @r#"Empty value returned from modifier "erase"."#
    );
    insta::assert_snapshot!(
        render_error(&renderer, "{secret}"),
        @"Cannot format value of type Secret as a string."
    );
}

#[test]
fn builder_errors_keep_their_message() {
    let builder = TokenizedStringBuilder::new();
    insta::assert_snapshot!(
        builder
            .build("{{ who }}", Values::new(), None)
            .unwrap_err()
            .to_string(),
        @r#"Undefined key. (at path "who")"#
    );
}
