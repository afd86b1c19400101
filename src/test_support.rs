//! Fakes for the injected traits.

use crate::error::Result;
use crate::exec::{CommandOutput, ExternalCommand};
use crate::traits::{CommandRunner, ConsentProvider, Reporter};
use crate::ui::status::Status;
use std::cell::{Cell, RefCell};

/// Records every command and answers from a list of canned outputs.
///
/// A rule matches when its pattern is a substring of the command line.
/// Later rules win; unmatched commands succeed with empty output.
pub(crate) struct FakeRunner {
    rules: Vec<(String, CommandOutput)>,
    calls: RefCell<Vec<ExternalCommand>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn respond(mut self, pattern: &str, output: CommandOutput) -> Self {
        self.rules.push((pattern.to_string(), output));
        self
    }

    pub(crate) fn calls(&self) -> Vec<ExternalCommand> {
        self.calls.borrow().clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.display()).collect()
    }

    /// Number of recorded commands whose line contains `pattern`.
    pub(crate) fn count(&self, pattern: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.contains(pattern))
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        let line = command.display();
        let output = self
            .rules
            .iter()
            .rev()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::new(Some(0), "", ""));
        Ok(output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Section(String),
    Progress(String, Status),
    Finish(String, Status),
    Detail(String),
}

#[derive(Default)]
pub(crate) struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Final statuses in order, as `(name, status)`.
    pub(crate) fn finals(&self) -> Vec<(String, Status)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Finish(name, status) => Some((name.clone(), *status)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn sections(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Section(title) => Some(title.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, title: &str) {
        self.events
            .borrow_mut()
            .push(Event::Section(title.to_string()));
    }

    fn progress(&self, name: &str, status: Status) {
        self.events
            .borrow_mut()
            .push(Event::Progress(name.to_string(), status));
    }

    fn finish(&self, name: &str, status: Status) {
        self.events
            .borrow_mut()
            .push(Event::Finish(name.to_string(), status));
    }

    fn detail(&self, text: &str) {
        self.events
            .borrow_mut()
            .push(Event::Detail(text.to_string()));
    }
}

/// Answers prompts from fixed values.
pub(crate) struct ScriptedConsent {
    elevated: bool,
    password: String,
    answer: String,
    password_prompts: Cell<usize>,
    questions: Cell<usize>,
}

impl ScriptedConsent {
    pub(crate) fn root(answer: &str) -> Self {
        Self {
            elevated: true,
            password: String::new(),
            answer: answer.to_string(),
            password_prompts: Cell::new(0),
            questions: Cell::new(0),
        }
    }

    pub(crate) fn user(password: &str, answer: &str) -> Self {
        Self {
            elevated: false,
            password: password.to_string(),
            ..Self::root(answer)
        }
    }

    pub(crate) fn password_prompts(&self) -> usize {
        self.password_prompts.get()
    }

    pub(crate) fn questions(&self) -> usize {
        self.questions.get()
    }
}

impl ConsentProvider for ScriptedConsent {
    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn ask_password(&self, _prompt: &str) -> Result<String> {
        self.password_prompts.set(self.password_prompts.get() + 1);
        Ok(self.password.clone())
    }

    fn ask_line(&self, _question: &str) -> Result<String> {
        self.questions.set(self.questions.get() + 1);
        Ok(format!("{}\n", self.answer))
    }
}
