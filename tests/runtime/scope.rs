//! Integration tests for scope resolution
//!
//! Tests push/pop restoration at depth, over-exit, module overrides and
//! agreement between history replay and the incremental stack.

use vision_runtime::{InterpreterConfig, ScopeStack, merge_modules};

use crate::support::{base, interpreter, module, names, run_all};

#[test]
fn nested_scopes_restore_on_exit() {
    let mut interp = interpreter(InterpreterConfig::default());
    interp
        .add_scanner(
            "nested.vision",
            ["use web", "use db", "use files", "end", "end", "end"],
        )
        .unwrap();

    let mut seen = Vec::new();
    while interp.step().unwrap().is_some() {
        seen.push(names(&interp.active_modules()));
    }
    assert_eq!(
        seen,
        vec![
            vec!["base", "web"],
            vec!["base", "web", "db"],
            vec!["base", "web", "db", "files"],
            vec!["base", "web", "db"],
            vec!["base", "web"],
            vec!["base"],
        ]
    );
    assert_eq!(interp.scope_depth(), 0);
}

#[test]
fn multi_level_exit_in_one_command() {
    let mut interp = interpreter(InterpreterConfig::default());
    interp
        .add_scanner("jump.vision", ["use web", "use db", "use files", "end 2"])
        .unwrap();
    run_all(&mut interp);
    assert_eq!(names(&interp.active_modules()), vec!["base", "web"]);
    assert_eq!(interp.scope_depth(), 1);
}

#[test]
fn exiting_past_outermost_scope_leaves_base() {
    let mut interp = interpreter(InterpreterConfig::default());
    interp
        .add_scanner("over.vision", ["use web", "end 5"])
        .unwrap();
    run_all(&mut interp);
    assert_eq!(names(&interp.active_modules()), vec!["base"]);
    assert_eq!(interp.scope_depth(), -4);
}

#[test]
fn one_command_may_bring_several_modules() {
    let mut interp = interpreter(InterpreterConfig::default());
    interp
        .add_scanner("pair.vision", ["use web db", "end"])
        .unwrap();
    interp.step().unwrap();
    assert_eq!(names(&interp.active_modules()), vec!["base", "web", "db"]);
    interp.step().unwrap();
    assert_eq!(names(&interp.active_modules()), vec!["base"]);
}

#[test]
fn replay_agrees_with_incremental_stack() {
    let mut interp = interpreter(InterpreterConfig::default().with_verify_scope(true));
    interp
        .add_scanner(
            "mixed.vision",
            ["use web", "open", "use db", "end", "use files", "read", "end 2", "use db"],
        )
        .unwrap();
    assert_eq!(run_all(&mut interp), 8);

    let replayed = ScopeStack::replay(interp.history().iter());
    assert_eq!(replayed, interp.replay_scope());
    assert_eq!(replayed.depth(), interp.scope_depth());
    assert_eq!(interp.replayed_lexicon(), interp.lexicon());
    interp.audit_scope().unwrap();
}

#[test]
fn replay_of_history_prefix_matches_past_state() {
    let mut interp = interpreter(InterpreterConfig::default());
    interp
        .add_scanner("prefix.vision", ["use web", "use db", "end"])
        .unwrap();
    run_all(&mut interp);

    let history = interp.history();
    let after_two = ScopeStack::replay(history.iter().take(2));
    let modules = after_two.active_modules(&interp.base_modules());
    assert_eq!(names(&modules), vec!["base", "web", "db"]);
}

#[test]
fn nested_module_overrides_base_in_place() {
    let override_base = module("base", "overridden");
    let merged = merge_modules([&base(), &module("web", "click"), &override_base]);
    assert_eq!(names(&merged), vec!["base", "web"]);
    assert_eq!(merged[0].definitions()[0].pattern(), "overridden");
}

#[test]
fn lexicon_reflects_active_modules() {
    let mut interp = interpreter(InterpreterConfig::default());
    interp.add_scanner("lex.vision", ["use db"]).unwrap();
    run_all(&mut interp);
    let lexicon = interp.lexicon();
    assert_eq!(lexicon.module_names(), vec!["base", "db"]);
    assert_eq!(lexicon.match_at("query").map(|(d, _)| d.kind()), Some("db"));
}
