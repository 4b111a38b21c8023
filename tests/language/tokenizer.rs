//! Integration tests for the tokenizer
//!
//! Tests token production, maximal unmatched runs, live vocabulary lookup
//! and per-token definition copies.

use std::rc::Rc;

use vision_foundation::ErrorKind;
use vision_language::{
    CodeProvider, CodeSpan, Command, Definition, Lexicon, LexiconProvider, LineSource, Module, Token,
};

fn command(text: &str) -> Command {
    let source = Rc::new(LineSource::new("tok.vision", vec![text.to_string()]));
    Command::new(CodeSpan::new(source, 0).unwrap())
}

fn lexicon(table: &[(&str, &str)]) -> Lexicon {
    let module = table
        .iter()
        .try_fold(Module::new("test"), |m, (pattern, kind)| m.define(pattern, kind))
        .unwrap();
    Lexicon::new(vec![module.shared()])
}

fn kinds(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::kind).collect()
}

// =============================================================================
// Token Production
// =============================================================================

#[test]
fn tokens_cover_command_text() {
    let table = lexicon(&[("click|open", "Verb"), (r"\s+", "Space"), ("[a-z]+", "Word")]);
    let tokens = command("click submit").tokenize(table).collect_tokens().unwrap();
    assert_eq!(kinds(&tokens), vec!["Verb", "Space", "Word"]);
    assert_eq!(tokens[2].text, "submit");
    assert_eq!((tokens[2].start(), tokens[2].end()), (6, 12));
    assert_eq!(tokens[2].span.origin(), "tok.vision");
    assert_eq!(tokens[2].span.line(), 0);
}

#[test]
fn first_match_wins_then_unmatched_run() {
    // "aab" against [a+, ab]: "aa" is taken by the first entry, leaving "b".
    let table = lexicon(&[("a+", "A"), ("ab", "B")]);
    let mut tokenizer = command("aab").tokenize(table);

    let first = tokenizer.next_token().unwrap().unwrap();
    assert_eq!(first.kind(), "A");
    assert_eq!(first.text, "aa");

    let err = tokenizer.next_token().unwrap_err();
    let ErrorKind::UnrecognizedToken(detail) = &err.kind else {
        panic!("expected unrecognized token, got {err}");
    };
    assert_eq!(detail.text, "b");
    assert_eq!(detail.start, 2);
    assert_eq!(detail.origin, "tok.vision");
    assert_eq!(detail.code, "aab");
}

#[test]
fn unmatched_run_is_maximal() {
    let table = lexicon(&[("go", "Go")]);
    let mut tokenizer = command("go%%%go").tokenize(table);
    tokenizer.next_token().unwrap();
    let err = tokenizer.next_token().unwrap_err();
    let ErrorKind::UnrecognizedToken(detail) = &err.kind else {
        panic!("expected unrecognized token");
    };
    assert_eq!(detail.text, "%%%");
    assert_eq!(detail.start, 2);
}

#[test]
fn unmatched_run_error_points_at_run() {
    let table = lexicon(&[("go", "Go"), (r"\s+", "Space")]);
    let err = command("go %%%").tokenize(table).collect_tokens().unwrap_err();
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.origin, "tok.vision");
    assert_eq!((ctx.line, ctx.column), (1, 4));
    assert_eq!(ctx.to_string(), "tok.vision:1:4 (while tokenize)");
}

#[test]
fn unmatched_prefix_is_reported_before_later_match() {
    let table = lexicon(&[("go", "Go")]);
    let err = command("??go").tokenize(table).collect_tokens().unwrap_err();
    let ErrorKind::UnrecognizedToken(detail) = &err.kind else {
        panic!("expected unrecognized token");
    };
    assert_eq!(detail.text, "??");
    assert_eq!(detail.start, 0);
}

#[test]
fn iterator_stops_after_failure() {
    let table = lexicon(&[("a", "A")]);
    let results: Vec<_> = command("a?a").tokenize(table).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn multibyte_text_is_split_on_char_boundaries() {
    let table = lexicon(&[("[a-z]+", "Word")]);
    let err = command("café").tokenize(table).collect_tokens().unwrap_err();
    let ErrorKind::UnrecognizedToken(detail) = &err.kind else {
        panic!("expected unrecognized token");
    };
    assert_eq!(detail.text, "é");
    assert_eq!(detail.start, 3);
}

// =============================================================================
// Definition Copies
// =============================================================================

#[test]
fn tokens_hold_independent_definition_copies() {
    let trivia = Definition::new(r"\s+", "Space")
        .unwrap()
        .with_metadata("skip", "true");
    let module = Module::new("core")
        .define("[a-z]+", "Word")
        .unwrap()
        .with_definition(trivia);
    let table = Lexicon::new(vec![module.shared()]);

    let mut tokens = command("a b").tokenize(table).collect_tokens().unwrap();
    assert!(tokens[1].is_trivia());
    assert!(!tokens[0].is_trivia());

    tokens[0].definition = tokens[0].definition.clone().with_metadata("seen", "yes");
    assert_eq!(tokens[0].definition.meta("seen"), Some("yes"));
    assert_eq!(tokens[2].definition.meta("seen"), None);
}

fn shouting(span: CodeSpan, text: String, definition: Definition) -> Token {
    Token::new(span, text.to_uppercase(), definition)
}

#[test]
fn custom_constructor_builds_tokens() {
    let loud = Definition::new("[a-z]+", "Loud")
        .unwrap()
        .with_constructor(shouting);
    let table = Lexicon::new(vec![Module::new("loud").with_definition(loud).shared()]);
    let tokens = command("hey").tokenize(table).collect_tokens().unwrap();
    assert_eq!(tokens[0].text, "HEY");
}

// =============================================================================
// Live Vocabulary
// =============================================================================

struct Fixed(Lexicon);

impl LexiconProvider for Fixed {
    fn lexicon(&self) -> Option<Lexicon> {
        Some(self.0.clone())
    }
}

#[test]
fn commands_without_provider_have_no_tokens() {
    assert!(command("click").tokens().is_none());
}

#[test]
fn provider_supplies_vocabulary() {
    let provider = Rc::new(Fixed(lexicon(&[("click", "Verb")])));
    let cmd = command("click").with_lexicon(provider);
    let tokens = cmd.tokens().unwrap().collect_tokens().unwrap();
    assert_eq!(kinds(&tokens), vec!["Verb"]);
}
