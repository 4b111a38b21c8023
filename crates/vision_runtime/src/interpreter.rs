//! The Vision interpreter front end.
//!
//! The [`Interpreter`] owns the command history, the registry of named
//! scanners and the always-active base modules. Every scanner it registers
//! builds commands through the interpreter's command builder, which
//! classifies each command's scope change and attaches a handle to the live
//! vocabulary. A command's lexicon is therefore resolved when it is
//! tokenized, from whatever is in scope at that moment.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::{debug, warn};
use vision_foundation::{Error, ErrorKind, HistoryVec, Result};
use vision_language::{
    Command, CommandBuilder, LexiconProvider, Lexicon, LineReader, Module, Scanner, Tokenizer,
};

use crate::config::InterpreterConfig;
use crate::registry::ScannerRegistry;
use crate::scope::{ScopeClassifier, ScopeStack, Unscoped};

/// History and scope shared with the commands the interpreter builds.
#[derive(Debug, Default)]
struct ScopeState {
    history: HistoryVec<Command>,
    stack: ScopeStack,
    base: Vec<Arc<Module>>,
}

impl ScopeState {
    fn lexicon(&self) -> Lexicon {
        self.stack.lexicon(&self.base)
    }
}

/// Weak handle to the interpreter's scope; commands hold one of these.
struct LiveLexicon(Weak<RefCell<ScopeState>>);

impl LexiconProvider for LiveLexicon {
    fn lexicon(&self) -> Option<Lexicon> {
        let shared = self.0.upgrade()?;
        let state = shared.try_borrow().ok()?;
        Some(state.lexicon())
    }
}

/// Command history, scanners and scope for one session.
pub struct Interpreter {
    config: InterpreterConfig,
    state: Rc<RefCell<ScopeState>>,
    scanners: ScannerRegistry,
    classifier: Rc<dyn ScopeClassifier>,
}

impl Interpreter {
    /// Creates an interpreter with no base modules and no scope changes.
    #[must_use]
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config,
            state: Rc::new(RefCell::new(ScopeState::default())),
            scanners: ScannerRegistry::new(),
            classifier: Rc::new(Unscoped),
        }
    }

    /// Sets the always-active base modules.
    #[must_use]
    pub fn with_base_modules(self, modules: impl IntoIterator<Item = Arc<Module>>) -> Self {
        self.state.borrow_mut().base = modules.into_iter().collect();
        self
    }

    /// Sets the scope classifier.
    ///
    /// Scanners registered earlier keep the classifier they were built with.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl ScopeClassifier + 'static) -> Self {
        self.classifier = Rc::new(classifier);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Returns a command builder that classifies scope and attaches the live
    /// lexicon.
    #[must_use]
    pub fn command_builder(&self) -> CommandBuilder {
        let classifier = Rc::clone(&self.classifier);
        let provider: Rc<dyn LexiconProvider> = Rc::new(LiveLexicon(Rc::downgrade(&self.state)));
        Rc::new(move |span| {
            let command = Command::new(span);
            let scope = classifier.classify(&command);
            Ok(command
                .with_scope(scope)
                .with_lexicon(Rc::clone(&provider)))
        })
    }

    // =========================================================================
    // Scanners
    // =========================================================================

    /// Registers a scanner, wiring in this interpreter's command builder.
    ///
    /// A scanner already registered under the same name is kept and touched.
    pub fn register_scanner(&mut self, scanner: Scanner) -> &mut Scanner {
        let scanner = scanner.with_builder(self.command_builder());
        self.scanners.register(scanner)
    }

    /// Creates and registers an in-memory scanner.
    pub fn add_scanner<I, S>(&mut self, name: impl Into<String>, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scanner = Scanner::new(name, lines)?;
        self.register_scanner(scanner);
        Ok(())
    }

    /// Reads a test file relative to the configured test directory and
    /// registers a scanner named by `path`.
    pub fn add_test_file(
        &mut self,
        path: impl AsRef<Path>,
        line_reader: Option<LineReader>,
    ) -> Result<()> {
        let path = path.as_ref();
        let name = path.display().to_string();
        if self.scanners.get(&name).is_some() {
            debug!(
                scanner = %name,
                reader_ignored = line_reader.is_some(),
                "test file already registered"
            );
            return self.scanners.touch(&name);
        }
        let full = self.config.test_directory.join(path);
        let text = std::fs::read_to_string(&full).map_err(|err| {
            warn!(path = %full.display(), error = %err, "failed to read test file");
            Error::io(full.display().to_string(), &err)
        })?;
        let mut scanner = Scanner::new(name, text.lines())?;
        scanner.set_line_reader(line_reader);
        self.register_scanner(scanner);
        Ok(())
    }

    /// Appends a line of console input to the interactive scanner, creating
    /// it on first use, and makes it current.
    pub fn push_interactive(&mut self, line: impl Into<String>) -> Result<()> {
        let line: String = line.into();
        let name = self.config.interactive_name.clone();
        if let Some(scanner) = self.scanners.get_mut(&name) {
            scanner.push_line(line);
            return self.scanners.touch(&name);
        }
        self.add_scanner(name, [line])
    }

    /// Makes the named scanner current.
    pub fn touch_scanner(&mut self, name: &str) -> Result<()> {
        self.scanners.touch(name)
    }

    /// Removes a scanner. The next most recently touched becomes current.
    pub fn remove_scanner(&mut self, name: &str) -> Result<Scanner> {
        self.scanners.remove(name)
    }

    /// Returns the current scanner.
    #[must_use]
    pub fn scanner(&self) -> Option<&Scanner> {
        self.scanners.active()
    }

    /// Returns the current scanner mutably.
    pub fn scanner_mut(&mut self) -> Option<&mut Scanner> {
        self.scanners.active_mut()
    }

    /// Returns the most recently touched scanner that is not interactive.
    #[must_use]
    pub fn file_scanner(&self) -> Option<&Scanner> {
        let interactive = self.config.interactive_name.as_str();
        self.scanners.most_recent(|name| name != interactive)
    }

    /// Returns the most recently touched interactive scanner.
    #[must_use]
    pub fn interactive_scanner(&self) -> Option<&Scanner> {
        let interactive = self.config.interactive_name.as_str();
        self.scanners.most_recent(|name| name == interactive)
    }

    /// Mutable form of [`file_scanner`](Self::file_scanner).
    pub fn file_scanner_mut(&mut self) -> Option<&mut Scanner> {
        let interactive = self.config.interactive_name.as_str();
        self.scanners.most_recent_mut(|name| name != interactive)
    }

    /// Mutable form of [`interactive_scanner`](Self::interactive_scanner).
    pub fn interactive_scanner_mut(&mut self) -> Option<&mut Scanner> {
        let interactive = self.config.interactive_name.as_str();
        self.scanners.most_recent_mut(|name| name == interactive)
    }

    /// Returns scanner names, least recently touched first.
    #[must_use]
    pub fn scanner_names(&self) -> Vec<&str> {
        self.scanners.names()
    }

    // =========================================================================
    // Commands and history
    // =========================================================================

    /// Pulls the next command from the current scanner without accepting it.
    ///
    /// Returns `Ok(None)` if there is no current scanner or it is exhausted.
    pub fn next_command(&mut self) -> Result<Option<Command>> {
        match self.scanners.active_mut() {
            Some(scanner) => scanner.next_command(),
            None => Ok(None),
        }
    }

    /// Appends `command` to history and applies its scope change.
    pub fn accept(&mut self, command: Command) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            state.stack.apply(command.scope());
            debug!(
                origin = command.origin(),
                line = command.line(),
                delta = command.scope_delta(),
                depth = state.stack.depth(),
                "accepted command"
            );
            state.history.push(command);
        }
        if self.config.verify_scope {
            self.audit_scope()?;
        }
        Ok(())
    }

    /// Pulls the next command from the current scanner and accepts it.
    pub fn step(&mut self) -> Result<Option<Command>> {
        let Some(command) = self.next_command()? else {
            return Ok(None);
        };
        self.accept(command.clone())?;
        Ok(Some(command))
    }

    /// Returns a snapshot of the history.
    #[must_use]
    pub fn history(&self) -> HistoryVec<Command> {
        self.state.borrow().history.clone()
    }

    // =========================================================================
    // Scope
    // =========================================================================

    /// Returns the base modules.
    #[must_use]
    pub fn base_modules(&self) -> Vec<Arc<Module>> {
        self.state.borrow().base.clone()
    }

    /// Returns the modules in scope now.
    #[must_use]
    pub fn active_modules(&self) -> Vec<Arc<Module>> {
        let state = self.state.borrow();
        state.stack.active_modules(&state.base)
    }

    /// Builds the lexicon for the modules in scope now.
    #[must_use]
    pub fn lexicon(&self) -> Lexicon {
        self.state.borrow().lexicon()
    }

    /// Returns the running scope depth.
    #[must_use]
    pub fn scope_depth(&self) -> i64 {
        self.state.borrow().stack.depth()
    }

    /// Rebuilds the scope stack from history alone.
    #[must_use]
    pub fn replay_scope(&self) -> ScopeStack {
        ScopeStack::replay(self.state.borrow().history.iter())
    }

    /// Builds the lexicon from a full history replay.
    #[must_use]
    pub fn replayed_lexicon(&self) -> Lexicon {
        let state = self.state.borrow();
        self.replay_scope().lexicon(&state.base)
    }

    /// Checks that a full replay agrees with the incremental scope stack.
    pub fn audit_scope(&self) -> Result<()> {
        let replayed = self.replay_scope();
        let state = self.state.borrow();
        if replayed == state.stack {
            return Ok(());
        }
        let names = |stack: &ScopeStack| {
            stack
                .active_modules(&state.base)
                .iter()
                .map(|m| m.name().to_string())
                .collect::<Vec<_>>()
        };
        Err(Error::new(ErrorKind::ScopeDivergence {
            replayed: names(&replayed),
            incremental: names(&state.stack),
        }))
    }

    /// Starts tokenizing `command` against the vocabulary in scope now.
    #[must_use]
    pub fn tokenize(&self, command: &Command) -> Tokenizer {
        command.tokenize(self.lexicon())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Interpreter")
            .field("config", &self.config)
            .field("history", &state.history.len())
            .field("depth", &state.stack.depth())
            .field("scanners", &self.scanners.names())
            .finish_non_exhaustive()
    }
}
