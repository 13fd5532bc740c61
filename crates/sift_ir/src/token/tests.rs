use pretty_assertions::assert_eq;

use super::*;
use crate::LiteralValue;

#[test]
fn fixed_spellings_cover_keywords_and_punctuation() {
    assert_eq!(TokenTag::KwRule.spelling(), Some("rule"));
    assert_eq!(TokenTag::KwCondition.spelling(), Some("condition"));
    assert_eq!(TokenTag::LBrace.spelling(), Some("{"));
    assert_eq!(TokenTag::EqEq.spelling(), Some("=="));
    assert_eq!(TokenTag::Newline.spelling(), Some("\n"));
    assert_eq!(TokenTag::Identifier.spelling(), None);
    assert_eq!(TokenTag::StrLiteral.spelling(), None);
    assert_eq!(TokenTag::Include.spelling(), None);
}

#[test]
fn tag_classification() {
    assert!(TokenTag::Comment.is_comment());
    assert!(TokenTag::BlockComment.is_comment());
    assert!(!TokenTag::Newline.is_comment());

    assert!(TokenTag::KwMeta.is_section_keyword());
    assert!(TokenTag::KwStrings.is_section_keyword());
    assert!(TokenTag::KwCondition.is_section_keyword());
    assert!(!TokenTag::KwRule.is_section_keyword());
}

#[test]
fn token_text_uses_spelling_for_fixed_tags() {
    let token = Token::new(TokenTag::KwAnd, Literal::str("and"));
    assert_eq!(token.text(), "and");
}

#[test]
fn string_literal_text_is_quoted_and_escaped() {
    let token = Token::new(TokenTag::StrLiteral, Literal::str(r#"mz "pe""#));
    assert_eq!(token.text(), r#""mz \"pe\"""#);
}

#[test]
fn string_literal_preserved_spelling_wins() {
    let token = Token::new(
        TokenTag::StrLiteral,
        Literal::with_formatted(LiteralValue::Str("a\tb".into()), r#""a\x09b""#),
    );
    assert_eq!(token.text(), r#""a\x09b""#);
}

#[test]
fn hex_integer_keeps_its_digits() {
    let token = Token::new(
        TokenTag::IntLiteral,
        Literal::with_formatted(LiteralValue::Int(0x5A4D), "0x5A4D"),
    );
    assert_eq!(token.text(), "0x5A4D");
}

#[test]
fn include_text_is_the_verbatim_directive() {
    let mut token = Token::new(TokenTag::Include, Literal::str("lib/common.sift"));
    assert_eq!(token.text(), "include \"lib/common.sift\"");

    // Attaching the included document does not change the verbatim form.
    token.attach_include(TokenStream::new());
    assert_eq!(token.text(), "include \"lib/common.sift\"");
    assert!(token.include().is_some());
}

#[test]
#[should_panic(expected = "cannot attach a sub-stream")]
fn attach_include_rejects_other_tags() {
    let mut token = Token::new(TokenTag::Identifier, Literal::str("pe"));
    token.attach_include(TokenStream::new());
}
