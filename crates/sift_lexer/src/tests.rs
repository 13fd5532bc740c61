use pretty_assertions::assert_eq;
use sift_ir::TokenTag;

use super::*;

fn tags(source: &str) -> Vec<TokenTag> {
    tokenize(source)
        .unwrap()
        .iter()
        .map(|(_, token)| token.tag())
        .collect()
}

#[test]
fn lexes_a_minimal_rule() {
    let got = tags("rule demo { condition: true }");
    assert_eq!(
        got,
        vec![
            TokenTag::KwRule,
            TokenTag::Identifier,
            TokenTag::LBrace,
            TokenTag::KwCondition,
            TokenTag::Colon,
            TokenTag::BoolLiteral,
            TokenTag::RBrace,
        ]
    );
}

#[test]
fn newlines_and_comments_are_kept_as_tokens() {
    let got = tags("x // trailing\n/* block */\ny");
    assert_eq!(
        got,
        vec![
            TokenTag::Identifier,
            TokenTag::Comment,
            TokenTag::Newline,
            TokenTag::BlockComment,
            TokenTag::Newline,
            TokenTag::Identifier,
        ]
    );
}

#[test]
fn comment_text_is_kept_verbatim() {
    let stream = tokenize("// exact  spacing kept").unwrap();
    let texts = stream.token_texts();
    assert_eq!(texts, vec!["// exact  spacing kept"]);
}

#[test]
fn include_folds_into_a_single_token() {
    let stream = tokenize("include \"lib/common.sift\"\n").unwrap();
    let (_, token) = stream.iter().next().unwrap();
    assert_eq!(token.tag(), TokenTag::Include);
    assert_eq!(token.text(), "include \"lib/common.sift\"");
    assert_eq!(stream.len(), 2);
}

#[test]
fn include_without_a_path_is_an_error() {
    let err = tokenize("include 42").unwrap_err();
    assert_eq!(err, LexError::IncludeWithoutPath { offset: 0 });
}

#[test]
fn string_escapes_round_trip_through_the_quoter() {
    let stream = tokenize(r#""a\"b\\c\nd\te""#).unwrap();
    let texts = stream.token_texts();
    assert_eq!(texts, vec![r#""a\"b\\c\nd\te""#]);
}

#[test]
fn exotic_escapes_keep_the_source_spelling() {
    let stream = tokenize(r#""\x41B""#).unwrap();
    let texts = stream.token_texts();
    assert_eq!(texts, vec![r#""\x41B""#]);
}

#[test]
fn hex_integers_keep_their_spelling() {
    let stream = tokenize("0x5A4D").unwrap();
    let (_, token) = stream.iter().next().unwrap();
    assert_eq!(token.tag(), TokenTag::IntLiteral);
    assert_eq!(token.text(), "0x5A4D");
}

#[test]
fn size_suffixed_integers_scale_and_keep_their_spelling() {
    let stream = tokenize("filesize < 2MB").unwrap();
    let texts = stream.token_texts();
    assert_eq!(texts, vec!["filesize", "<", "2MB"]);
}

#[test]
fn regexps_lex_as_one_token() {
    let stream = tokenize("$re = /evil[0-9]+/i").unwrap();
    let texts = stream.token_texts();
    assert_eq!(texts, vec!["$re", "=", "/evil[0-9]+/i"]);
}

#[test]
fn division_is_not_mistaken_for_a_regexp() {
    let got = tags("filesize / 2\n");
    assert_eq!(
        got,
        vec![
            TokenTag::KwFilesize,
            TokenTag::Slash,
            TokenTag::IntLiteral,
            TokenTag::Newline,
        ]
    );
}

#[test]
fn division_without_spaces_still_splits() {
    let got = tags("1/2");
    assert_eq!(
        got,
        vec![TokenTag::IntLiteral, TokenTag::Slash, TokenTag::IntLiteral]
    );
}

#[test]
fn division_inside_parentheses() {
    let got = tags("(x / y)");
    assert_eq!(
        got,
        vec![
            TokenTag::LParen,
            TokenTag::Identifier,
            TokenTag::Slash,
            TokenTag::Identifier,
            TokenTag::RParen,
        ]
    );
}

#[test]
fn regexp_and_division_coexist_on_one_line() {
    let stream = tokenize("$re = /a\\/b/ and filesize / 2").unwrap();
    let texts = stream.token_texts();
    assert_eq!(
        texts,
        vec!["$re", "=", "/a\\/b/", "and", "filesize", "/", "2"]
    );
}

#[test]
fn slash_after_assign_without_a_closing_slash_is_division() {
    // The anchor position allows a regexp, but no closing slash arrives
    // before the line ends, so the operator reading wins.
    let got = tags("x = / 2\n");
    assert_eq!(
        got,
        vec![
            TokenTag::Identifier,
            TokenTag::Assign,
            TokenTag::Slash,
            TokenTag::IntLiteral,
            TokenTag::Newline,
        ]
    );
}

#[test]
fn matches_anchors_a_regexp() {
    let got = tags("meta_field matches /^https?:/i");
    assert_eq!(
        got,
        vec![TokenTag::Identifier, TokenTag::KwMatches, TokenTag::Regexp]
    );
}

#[test]
fn dotted_module_paths_lex_as_one_identifier() {
    let stream = tokenize("sandbox.network.http_request").unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.token_texts(), vec!["sandbox.network.http_request"]);
}

#[test]
fn ranges_still_split_on_dotdot() {
    let got = tags("(0..filesize)");
    assert_eq!(
        got,
        vec![
            TokenTag::LParen,
            TokenTag::IntLiteral,
            TokenTag::DotDot,
            TokenTag::KwFilesize,
            TokenTag::RParen,
        ]
    );
}

#[test]
fn string_ids_with_wildcards() {
    let got = tags("any of ($a*, $b)");
    assert_eq!(
        got,
        vec![
            TokenTag::KwAny,
            TokenTag::KwOf,
            TokenTag::LParen,
            TokenTag::StringId,
            TokenTag::Comma,
            TokenTag::StringId,
            TokenTag::RParen,
        ]
    );
}

#[test]
fn unrecognized_input_reports_its_offset() {
    let err = tokenize("abc @").unwrap_err();
    assert_eq!(err, LexError::Unrecognized { offset: 4 });
}

#[test]
fn operators_two_chars_win_over_one() {
    let got = tags("a << 2 >= 1 != 0 == 3 <= 4 .. 5");
    assert_eq!(
        got,
        vec![
            TokenTag::Identifier,
            TokenTag::Shl,
            TokenTag::IntLiteral,
            TokenTag::GtEq,
            TokenTag::IntLiteral,
            TokenTag::NotEq,
            TokenTag::IntLiteral,
            TokenTag::EqEq,
            TokenTag::IntLiteral,
            TokenTag::LtEq,
            TokenTag::IntLiteral,
            TokenTag::DotDot,
            TokenTag::IntLiteral,
        ]
    );
}
