//! Interactive terminal page for the generator.
//!
//! Layout:
//! - status bar with the current phase and last message
//! - left column: test case types, output format, the two uploads and the
//!   generate button
//! - right column: summary of the generated test cases
//! - the detailed table replaces both columns after "view details"
//!
//! [`App`] holds all page state and reacts to keys without touching the
//! terminal; [`run`] owns the terminal and the event loop.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::generator::{GenerationRequest, GenerationResult, TestCaseGenerator};
use crate::intake::{ArtifactSlot, IntakeFile};
use crate::options::{OutputFormat, TestCaseType};
use crate::presentation::{
    Clipboard, CopyFeedback, EMPTY_PLACEHOLDER, VIEW_DETAILS_LABEL, copy_test_case, render_summary,
    render_table, today, write_export,
};
use crate::testcase::TestCase;
use crate::workflow::{self, PageState, Phase};

/// A focusable control in the left column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Category(TestCaseType),
    Format(OutputFormat),
    File(ArtifactSlot),
    Generate,
}

/// Controls in navigation order
pub fn items() -> Vec<Item> {
    TestCaseType::ALL
        .into_iter()
        .map(Item::Category)
        .chain(OutputFormat::ALL.into_iter().map(Item::Format))
        .chain(ArtifactSlot::ALL.into_iter().map(Item::File))
        .chain(std::iter::once(Item::Generate))
        .collect()
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Typing the path of a file for `slot`
    PathInput { slot: ArtifactSlot, buffer: String },
}

/// What the event loop should do after a key
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Quit,
    /// Start this run on the runtime
    Spawn(GenerationRequest),
}

/// Visual weight of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Heading,
    Focused,
    Dim,
    Alert,
}

/// One rendered line at a column offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(x: u16, y: u16, text: impl Into<String>, tone: Tone) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            tone,
        }
    }
}

/// Page state plus terminal-only concerns (focus, input mode, messages)
pub struct App {
    pub state: PageState,
    pub cursor: usize,
    pub mode: Mode,
    pub status: String,
    /// Highlighted row in the detailed table
    pub row: usize,
    pub feedback: CopyFeedback,
    clipboard: Box<dyn Clipboard>,
    export_dir: PathBuf,
    items: Vec<Item>,
}

impl App {
    pub fn new(clipboard: Box<dyn Clipboard>, export_dir: PathBuf, feedback: CopyFeedback) -> Self {
        Self {
            state: PageState::new(),
            cursor: 0,
            mode: Mode::Browse,
            status: "Select test case types, an output format and both documents".to_string(),
            row: 0,
            feedback,
            clipboard,
            export_dir,
            items: items(),
        }
    }

    pub fn focused(&self) -> Item {
        self.items[self.cursor]
    }

    /// React to one key press
    pub fn on_key(&mut self, code: KeyCode, now: Instant) -> KeyOutcome {
        if let Mode::PathInput { .. } = self.mode {
            self.on_path_key(code);
            return KeyOutcome::Continue;
        }

        if self.state.details_visible() {
            return self.on_table_key(code, now);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(self.items.len() - 1),
            KeyCode::Enter | KeyCode::Char(' ') => return self.activate(self.focused()),
            KeyCode::Char('g') => return self.activate(Item::Generate),
            KeyCode::Char('v') => self.view_details(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn on_table_key(&mut self, code: KeyCode, now: Instant) -> KeyOutcome {
        let rows = self.state.test_cases().len();
        match code {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Esc | KeyCode::Char('b') => {
                self.state.back_to_summary();
            }
            KeyCode::Up => self.row = self.row.saturating_sub(1),
            KeyCode::Down => self.row = (self.row + 1).min(rows.saturating_sub(1)),
            KeyCode::Char('c') | KeyCode::Enter => self.copy_row(now),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn on_path_key(&mut self, code: KeyCode) {
        let Mode::PathInput { slot, buffer } = &mut self.mode else {
            return;
        };
        let slot = *slot;
        match code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.state.select_file(slot, None);
                self.status = "Selection cancelled".to_string();
            }
            KeyCode::Enter => {
                let path = buffer.trim().to_string();
                self.mode = Mode::Browse;
                if path.is_empty() {
                    self.state.select_file(slot, None);
                    self.status = "Selection cancelled".to_string();
                    return;
                }
                match IntakeFile::from_path(&path) {
                    Ok(file) => {
                        self.status = format!("Selected {}", file.name);
                        self.state.select_file(slot, Some(file));
                    }
                    Err(e) => {
                        warn!(%slot, error = %e, "file selection failed");
                        self.status = e.to_string();
                    }
                }
            }
            _ => {}
        }
    }

    fn activate(&mut self, item: Item) -> KeyOutcome {
        match item {
            Item::Category(category) => self.state.toggle_category(category),
            Item::Format(format) => self.state.set_output_format(format),
            Item::File(slot) => {
                self.mode = Mode::PathInput {
                    slot,
                    buffer: String::new(),
                };
                self.status = format!(
                    "Path to the {} file (.{}), Enter to confirm, Esc to cancel",
                    slot,
                    slot.accepted_extension()
                );
            }
            Item::Generate => match self.state.begin_generation() {
                Ok(request) => {
                    self.status = "Generating test cases...".to_string();
                    return KeyOutcome::Spawn(request);
                }
                Err(e) => self.status = e.to_string(),
            },
        }
        KeyOutcome::Continue
    }

    fn view_details(&mut self) {
        if self.state.test_cases().is_empty() {
            self.status = "Nothing to show yet".to_string();
            return;
        }
        self.state.view_details();
        self.row = 0;
    }

    fn copy_row(&mut self, now: Instant) {
        let Some(tc) = self.state.test_cases().get(self.row) else {
            return;
        };
        let tc = tc.clone();
        match copy_test_case(self.clipboard.as_mut(), &mut self.feedback, &tc, now) {
            Ok(()) => self.status = format!("Copied {}", tc.id),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }

    fn export(&mut self) {
        match write_export(&self.export_dir, self.state.test_cases(), today()) {
            Ok(path) => self.status = format!("Exported to {}", path.display()),
            Err(e) => self.status = format!("Export failed: {}", e),
        }
    }

    /// Apply the result of a finished run
    pub fn on_generation_finished(
        &mut self,
        run_id: u64,
        outcome: GenerationResult<Vec<TestCase>>,
    ) {
        if let Err(e) = self.state.finish_generation(run_id, outcome) {
            debug!(error = %e, "ignoring generation result");
            return;
        }
        self.status = match self.state.last_error() {
            Some(failure) if failure.retryable => {
                format!("{} (press g to retry)", failure.message)
            }
            Some(failure) => failure.message.clone(),
            None => format!("{} test cases generated", self.state.test_cases().len()),
        };
    }

    fn status_line(&self, width: u16) -> Line {
        let text = format!(
            " Test Case Generator | {} | {}",
            self.state.phase().as_str(),
            self.status
        );
        let padded = format!("{:<w$}", text, w = width as usize);
        Line::new(0, 0, padded, Tone::Heading)
    }

    /// Everything to draw for a `width` x `height` terminal
    pub fn lines(&self, width: u16, height: u16, now: Instant) -> Vec<Line> {
        let mut lines = vec![self.status_line(width)];
        if self.state.details_visible() {
            self.table_lines(&mut lines, width, now);
            lines.push(Line::new(
                2,
                height.saturating_sub(1),
                "Up/Down select  c copy  e export CSV  b back  q quit",
                Tone::Dim,
            ));
        } else {
            self.form_lines(&mut lines);
            self.summary_lines(&mut lines, width / 2);
            let help = match self.mode {
                Mode::PathInput { .. } => "Enter confirm  Esc cancel",
                Mode::Browse => "Up/Down move  Enter toggle/select  g generate  v details  q quit",
            };
            lines.push(Line::new(2, height.saturating_sub(1), help, Tone::Dim));
        }
        lines
    }

    fn form_lines(&self, lines: &mut Vec<Line>) {
        let config = self.state.config();
        let intake = self.state.intake();
        let mut y = 2;
        let mut idx = 0;

        let mut push_item = |lines: &mut Vec<Line>, y: &mut u16, text: String, enabled: bool| {
            let tone = if idx == self.cursor && self.mode == Mode::Browse {
                Tone::Focused
            } else if enabled {
                Tone::Normal
            } else {
                Tone::Dim
            };
            lines.push(Line::new(2, *y, text, tone));
            *y += 1;
            idx += 1;
        };

        lines.push(Line::new(2, y, "Test Case Types", Tone::Heading));
        y += 1;
        for category in TestCaseType::ALL {
            let mark = if config.is_selected(category) { "x" } else { " " };
            push_item(lines, &mut y, format!("[{}] {}", mark, category.label()), true);
        }

        y += 1;
        lines.push(Line::new(2, y, "Output Format", Tone::Heading));
        y += 1;
        for format in OutputFormat::ALL {
            let mark = if config.output_format == Some(format) { "*" } else { " " };
            push_item(lines, &mut y, format!("({}) {}", mark, format.label()), true);
        }

        y += 1;
        lines.push(Line::new(2, y, "Upload Design Documents", Tone::Heading));
        y += 1;
        for slot in ArtifactSlot::ALL {
            let text = match (&self.mode, intake.get(slot)) {
                (Mode::PathInput { slot: s, buffer }, _) if *s == slot => {
                    format!("> {}_", buffer)
                }
                (_, Some(file)) => format!("{} [change]", file.name),
                (_, None) => format!("{} [select]", slot.prompt()),
            };
            push_item(lines, &mut y, text, true);
        }

        y += 1;
        let label = if self.state.phase() == Phase::Generating {
            "[ Generating... ]"
        } else {
            "[ Generate Test Cases ]"
        };
        push_item(lines, &mut y, label.to_string(), self.state.can_generate());

        let missing = self.state.missing_inputs();
        if !missing.is_empty() {
            lines.push(Line::new(2, y + 1, format!("To do: {}", missing.join(", ")), Tone::Dim));
        }
        if let Some(failure) = self.state.last_error() {
            lines.push(Line::new(2, y + 2, failure.message.clone(), Tone::Alert));
        }
    }

    fn summary_lines(&self, lines: &mut Vec<Line>, x: u16) {
        let cases = self.state.test_cases();
        let mut y = 2;
        for (i, text) in render_summary(cases).into_iter().enumerate() {
            let tone = if i == 0 && text != EMPTY_PLACEHOLDER {
                Tone::Heading
            } else {
                Tone::Normal
            };
            lines.push(Line::new(x, y, text, tone));
            y += 1;
        }
        if !cases.is_empty() {
            lines.push(Line::new(x, y + 1, format!("[ {} (v) ]", VIEW_DETAILS_LABEL), Tone::Normal));
        }
    }

    fn table_lines(&self, lines: &mut Vec<Line>, width: u16, now: Instant) {
        let cases = self.state.test_cases();
        lines.push(Line::new(
            2,
            2,
            format!("Detailed Test Cases ({} test cases)", cases.len()),
            Tone::Heading,
        ));
        let copied = self.feedback.active_id(now);
        let table = render_table(cases, width.saturating_sub(4) as usize, copied);
        for (i, text) in table.into_iter().enumerate() {
            let tone = match i {
                0 => Tone::Heading,
                1 => Tone::Dim,
                n if n - 2 == self.row => Tone::Focused,
                _ => Tone::Normal,
            };
            lines.push(Line::new(2, 4 + i as u16, text, tone));
        }
    }
}

fn draw(out: &mut impl Write, lines: &[Line], width: u16) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for line in lines {
        let color = match line.tone {
            Tone::Normal => Color::Reset,
            Tone::Heading => Color::Cyan,
            Tone::Focused => Color::Yellow,
            Tone::Dim => Color::DarkGrey,
            Tone::Alert => Color::Red,
        };
        let room = width.saturating_sub(line.x) as usize;
        let text: String = line.text.chars().take(room).collect();
        queue!(out, MoveTo(line.x, line.y), SetForegroundColor(color))?;
        if line.tone == Tone::Focused {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    out.flush()
}

/// Options for [`run`]
pub struct TuiOptions {
    pub generator: Arc<dyn TestCaseGenerator>,
    pub timeout: Duration,
    pub export_dir: PathBuf,
    pub copy_feedback: Duration,
    pub diagram: Option<IntakeFile>,
    pub spec: Option<IntakeFile>,
}

type Pending = oneshot::Receiver<(u64, GenerationResult<Vec<TestCase>>)>;

/// Run the interactive page until the user quits.
///
/// Generation runs on `runtime`; the loop keeps drawing while it is in
/// flight and the generate control stays disabled.
pub fn run(options: TuiOptions, runtime: Handle) -> io::Result<()> {
    let clipboard = Box::new(crate::presentation::Osc52Clipboard::stdout());
    let mut app = App::new(
        clipboard,
        options.export_dir.clone(),
        CopyFeedback::new(options.copy_feedback),
    );
    app.state.select_file(ArtifactSlot::Diagram, options.diagram.clone());
    app.state.select_file(ArtifactSlot::Spec, options.spec.clone());

    let mut out = stdout();
    let result = execute!(out, EnterAlternateScreen, Hide)
        .and_then(|_| terminal::enable_raw_mode())
        .and_then(|_| event_loop(&mut app, &options, &runtime, &mut out));

    // Every restore step runs; the first error wins.
    let restored = restore(&mut out);
    result.and(restored)
}

fn restore(out: &mut impl Write) -> io::Result<()> {
    let raw = terminal::disable_raw_mode();
    let screen = execute!(out, Show, LeaveAlternateScreen);
    raw.and(screen)
}

fn event_loop(
    app: &mut App,
    options: &TuiOptions,
    runtime: &Handle,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut pending: Option<Pending> = None;

    loop {
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok((run_id, outcome)) => {
                    app.on_generation_finished(run_id, outcome);
                    pending = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    pending = None;
                    if let Some(run_id) = app.state.in_flight() {
                        app.on_generation_finished(
                            run_id,
                            Err(crate::generator::GenerationError::Unavailable(
                                "generation task stopped".to_string(),
                            )),
                        );
                    }
                }
            }
        }

        let (width, height) = terminal::size()?;
        let now = Instant::now();
        draw(out, &app.lines(width, height, now), width)?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.on_key(key.code, Instant::now()) {
            KeyOutcome::Continue => {}
            KeyOutcome::Quit => return Ok(()),
            KeyOutcome::Spawn(request) => {
                let (tx, rx) = oneshot::channel();
                let generator = Arc::clone(&options.generator);
                let timeout = options.timeout;
                runtime.spawn(async move {
                    let outcome = workflow::execute(generator.as_ref(), &request, timeout).await;
                    let _ = tx.send((request.run_id, outcome));
                });
                pending = Some(rx);
            }
        }
    }
}
