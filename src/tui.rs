use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    layout::Direction as Axis,
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::deck::{self, IdAllocator};
use crate::layout::{self, MatchGrade};
use crate::models::{Card, CardPayload, Direction, MenuKey, UserType};
use crate::prefs::{KeyValueStore, Session};
use crate::stack::{DismissPolicy, SwipeStack};
use crate::verify::VerifyClient;
use crate::view::{self, ActiveView, ViewStack};

const FRAME: Duration = Duration::from_millis(16);
const NUDGE: i32 = 3;

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Interested/rejected lists left behind by a swipe session.
#[derive(Debug, Default)]
pub struct SwipeOutcome {
    pub interested: Vec<Card>,
    pub rejected: Vec<Card>,
}

impl SwipeOutcome {
    fn from_stack(stack: &mut SwipeStack) -> Self {
        stack.flush();
        Self {
            interested: stack.interested().to_vec(),
            rejected: stack.rejected().to_vec(),
        }
    }
}

fn enter_terminal() -> Result<Term> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

fn leave_terminal() -> Result<()> {
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

// --- Swipe screen ---

struct SwipeScreen {
    stack: SwipeStack,
    user_type: UserType,
}

enum Flow {
    Continue,
    Leave,
}

impl SwipeScreen {
    fn new(cards: Vec<Card>, user_type: UserType, config: &Config) -> Self {
        let policy = DismissPolicy::Partition;
        let mut stack = SwipeStack::new(cards, policy, config.timing(policy));
        stack.set_drag_threshold(config.drag_threshold);
        Self { stack, user_type }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        match key.code {
            KeyCode::Char('q') => return Flow::Leave,
            KeyCode::Esc if self.stack.is_expanded() => self.stack.collapse_top(),
            KeyCode::Esc => return Flow::Leave,
            KeyCode::Left | KeyCode::Char('h') => {
                self.stack.dismiss_top(Direction::Left, now);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.stack.dismiss_top(Direction::Right, now);
            }
            KeyCode::Char('H') => self.stack.nudge(-NUDGE),
            KeyCode::Char('L') => self.stack.nudge(NUDGE),
            KeyCode::Char(' ') if self.stack.drag().is_active() => {
                self.stack.release_drag(now);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.stack.toggle_expanded(),
            KeyCode::Char('u') | KeyCode::Backspace => {
                self.stack.rewind();
            }
            KeyCode::Char('r') => self.stack.reset(),
            _ => {}
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let column = i32::from(mouse.column);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.stack.begin_drag(column),
            MouseEventKind::Drag(MouseButton::Left) => self.stack.drag_to(column),
            MouseEventKind::Up(MouseButton::Left) => {
                self.stack.release_drag(now);
            }
            _ => {}
        }
    }
}

pub fn run_swipe(cards: Vec<Card>, user_type: UserType, config: &Config) -> Result<SwipeOutcome> {
    let mut screen = SwipeScreen::new(cards, user_type, config);

    let mut terminal = enter_terminal()?;
    let result = swipe_loop(&mut terminal, &mut screen);
    leave_terminal()?;
    result?;

    Ok(SwipeOutcome::from_stack(&mut screen.stack))
}

fn swipe_loop(terminal: &mut Term, screen: &mut SwipeScreen) -> Result<()> {
    loop {
        screen.stack.tick(Instant::now());
        terminal.draw(|frame| {
            let area = frame.area();
            draw_swipe(frame, area, screen)
        })?;

        if !event::poll(FRAME)? {
            continue;
        }
        let now = Instant::now();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Flow::Leave = screen.on_key(key, now) {
                    break;
                }
            }
            Event::Mouse(mouse) => screen.on_mouse(mouse, now),
            _ => {}
        }
    }
    Ok(())
}

fn draw_swipe(frame: &mut Frame, area: Rect, screen: &SwipeScreen) {
    let rows = Layout::default()
        .direction(Axis::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let stack = &screen.stack;
    let header = format!(
        " {} left  |  Interested: {}  {}: {}",
        stack.len(),
        stack.interested().len(),
        screen.user_type.rejected_label(),
        stack.rejected().len()
    );
    frame.render_widget(
        Paragraph::new(header).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    let cols = Layout::default()
        .direction(Axis::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(20),
            Constraint::Length(16),
        ])
        .split(rows[1]);

    draw_indicators(frame, cols[0], cols[2], stack, screen.user_type);

    if stack.is_empty() {
        draw_empty(frame, cols[1], stack, screen.user_type);
    } else {
        draw_stack(frame, cols[1], stack);
    }

    let mut help = String::from(" h/l:pass/like  H/L+space:drag  enter:details  r:reset  q:back");
    if stack.last_dismissed().is_some() {
        help.push_str("  u:rewind");
    }
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

fn draw_indicators(
    frame: &mut Frame,
    left: Rect,
    right: Rect,
    stack: &SwipeStack,
    user_type: UserType,
) {
    let (left_strength, right_strength) = match stack.drag().intensity() {
        Some((Direction::Left, s)) => (s, 0.0),
        Some((Direction::Right, s)) => (0.0, s),
        None => (0.0, 0.0),
    };

    let style = |color: Color, strength: f32| {
        let style = Style::default().fg(color);
        if strength >= 1.0 {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else if strength > 0.3 {
            style.add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        }
    };

    let middle = |r: Rect| Rect {
        y: r.y + r.height / 2,
        height: (r.height - r.height / 2).min(2),
        ..r
    };

    frame.render_widget(
        Paragraph::new(vec![Line::from(" ✗ "), Line::from(user_type.pass_label())])
            .alignment(Alignment::Center)
            .style(style(Color::Red, left_strength)),
        middle(left),
    );
    frame.render_widget(
        Paragraph::new(vec![Line::from(" ♥ "), Line::from("Interested")])
            .alignment(Alignment::Center)
            .style(style(Color::Green, right_strength)),
        middle(right),
    );
}

fn card_area(area: Rect, expanded: bool) -> Rect {
    let width = area.width.min(if expanded { 70 } else { 44 });
    let height = area.height.min(if expanded { area.height } else { 16 });
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Moves `rect` by whole cells, clipped to `bounds`.
fn shift(rect: Rect, dx: i32, dy: i32, bounds: Rect) -> Rect {
    let max_x = bounds.right().saturating_sub(rect.width) as i32;
    let max_y = bounds.bottom().saturating_sub(rect.height) as i32;
    let x = (rect.x as i32 + dx).clamp(bounds.x as i32, max_x.max(bounds.x as i32));
    let y = (rect.y as i32 + dy).clamp(bounds.y as i32, max_y.max(bounds.y as i32));
    Rect {
        x: x as u16,
        y: y as u16,
        ..rect
    }
}

fn draw_stack(frame: &mut Frame, area: Rect, stack: &SwipeStack) {
    let top_area = card_area(area, stack.is_expanded());

    // Up to three cards peek out behind the top one.
    let behind: Vec<&Card> = stack.stack().skip(1).take(3).collect();
    for (i, card) in behind.iter().enumerate().rev() {
        let d = i + 1;
        let offset = stack.offset_at(d);
        let scale = layout::depth_scale(d);
        let width = (top_area.width as f32 * scale) as u16;
        let base = Rect {
            x: top_area.x + (top_area.width - width) / 2,
            width,
            ..top_area
        };
        let rect = shift(base, (offset.x / 10.0) as i32, (offset.y / 10.0) as i32, area);
        let tilt = if offset.rotate < 0.0 { "╲" } else { "╱" };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!("{} {}", tilt, card.heading())),
            rect,
        );
    }

    let Some(top) = stack.top() else { return };
    let (dx, border) = match stack.exiting() {
        Some(exiting) if exiting.card_id == top.id => {
            let away = top_area.width as i32;
            match exiting.direction {
                Direction::Left => (-away, Color::Red),
                Direction::Right => (away, Color::Green),
            }
        }
        _ => match stack.drag().intensity() {
            Some((Direction::Left, s)) if s >= 1.0 => (stack.drag().dx(), Color::Red),
            Some((Direction::Right, s)) if s >= 1.0 => (stack.drag().dx(), Color::Green),
            _ => (stack.drag().dx(), Color::White),
        },
    };
    let rect = shift(top_area, dx, 0, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(card_text(top, stack.is_expanded(), rect.width.saturating_sub(4)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", top.id)),
            )
            .wrap(Wrap { trim: false }),
        rect,
    );
}

fn draw_empty(frame: &mut Frame, area: Rect, stack: &SwipeStack, user_type: UserType) {
    let heading = match user_type {
        UserType::Employer => "No more candidates",
        UserType::Candidate => "No more matches",
    };
    let lines = vec![
        Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
        Line::from("Check back later for new opportunities!"),
        Line::from(""),
        Line::from(Span::styled(
            format!("Interested: {}", stack.interested().len()),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            format!("{}: {}", user_type.rejected_label(), stack.rejected().len()),
            Style::default().fg(Color::Red),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded)),
        card_area(area, false),
    );
}

fn grade_style(grade: MatchGrade) -> Style {
    match grade {
        MatchGrade::Good => Style::default().fg(Color::Green),
        MatchGrade::Okay => Style::default().fg(Color::Yellow),
        MatchGrade::Bad => Style::default().fg(Color::Red),
    }
}

fn bullets<'a>(lines: &mut Vec<Line<'a>>, heading: &'a str, items: &[String], width: usize) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))));
    for item in items {
        for (i, line) in textwrap::wrap(item, width.saturating_sub(4).max(10)).iter().enumerate() {
            let marker = if i == 0 { "  • " } else { "    " };
            lines.push(Line::from(format!("{}{}", marker, line)));
        }
    }
}

fn card_text(card: &Card, expanded: bool, width: u16) -> Text<'_> {
    let width = width.max(10) as usize;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        card.heading(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(card.subtitle()));

    if let Some(seed) = card.match_seed() {
        let score = layout::match_score(seed);
        lines.push(Line::from(Span::styled(
            format!("{}% {}", score.percent, score.grade.label()),
            grade_style(score.grade),
        )));
    }
    lines.push(Line::from(""));

    match &card.payload {
        CardPayload::Job(job) => {
            lines.push(Line::from(format!("{} · {}", job.location, job.employment_type)));
            if let Some(salary) = &job.salary {
                lines.push(Line::from(salary.as_str()));
            }
            if let Some(posted) = &job.posted {
                lines.push(Line::from(Span::styled(
                    format!("Posted {}", posted),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if expanded {
                lines.push(Line::from(""));
                for line in textwrap::fill(&job.description, width).lines() {
                    lines.push(Line::from(line.to_string()));
                }
                bullets(&mut lines, "Requirements", &job.requirements, width);
                bullets(&mut lines, "Benefits", &job.benefits, width);
            }
        }
        CardPayload::Candidate(candidate) => {
            lines.push(Line::from(format!("{} · {}", candidate.location, candidate.experience)));
            if let Some(salary) = &candidate.salary {
                lines.push(Line::from(salary.as_str()));
            }
            if !candidate.skills.is_empty() {
                lines.push(Line::from(Span::styled(
                    candidate.skills.join(" · "),
                    Style::default().fg(Color::Cyan),
                )));
            }
            if expanded {
                lines.push(Line::from(""));
                for line in textwrap::fill(&candidate.description, width).lines() {
                    lines.push(Line::from(line.to_string()));
                }
                if let Some(resume) = &candidate.resume {
                    if !resume.experience.is_empty() {
                        lines.push(Line::from(""));
                        lines.push(Line::from(Span::styled(
                            "Experience",
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        for entry in &resume.experience {
                            lines.push(Line::from(format!(
                                "  {} at {} ({})",
                                entry.title, entry.company, entry.duration
                            )));
                            let wrap = width.saturating_sub(4).max(10);
                            for line in textwrap::fill(&entry.description, wrap).lines() {
                                lines.push(Line::from(format!("    {}", line)));
                            }
                        }
                    }
                    if let Some(education) = &resume.education {
                        lines.push(Line::from(""));
                        lines.push(Line::from(Span::styled(
                            "Education",
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        lines.push(Line::from(format!(
                            "  {}, {} ({})",
                            education.degree, education.school, education.duration
                        )));
                        if let Some(honors) = &education.honors {
                            lines.push(Line::from(format!("  {}", honors)));
                        }
                    }
                }
            }
        }
        CardPayload::Menu(item) => {
            lines.push(Line::from(item.icon.as_str()));
            if item.flippable {
                lines.push(Line::from(Span::styled(
                    "enter to flip",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    if !expanded && card.match_seed().is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "enter for details",
            Style::default().fg(Color::DarkGray),
        )));
    }

    Text::from(lines)
}

// --- Card hub ---

#[derive(Debug, Default)]
struct VerifyForm {
    email: String,
    status: Option<std::result::Result<String, String>>,
}

struct Hub<S: KeyValueStore> {
    user_type: UserType,
    menu: SwipeStack,
    views: ViewStack,
    swipe: Option<SwipeScreen>,
    verify: VerifyForm,
    ids: IdAllocator,
    config: Config,
    deck_path: Option<PathBuf>,
    session: Session<S>,
    show_tutorial: bool,
}

impl<S: KeyValueStore> Hub<S> {
    fn new(
        user_type: UserType,
        config: Config,
        deck_path: Option<PathBuf>,
        session: Session<S>,
    ) -> Self {
        let mut ids = IdAllocator::new();
        let policy = DismissPolicy::Recycle;
        let cards = deck::menu_deck(&mut ids, user_type);
        let mut menu = SwipeStack::new(cards, policy, config.timing(policy));
        menu.set_drag_threshold(config.drag_threshold);
        let show_tutorial = !session.has_seen_tutorial();
        Self {
            user_type,
            menu,
            views: ViewStack::new(),
            swipe: None,
            verify: VerifyForm::default(),
            ids,
            config,
            deck_path,
            session,
            show_tutorial,
        }
    }

    /// Switches between candidate and employer menus, resetting the stack.
    fn switch_user_type(&mut self) -> Result<()> {
        self.user_type = match self.user_type {
            UserType::Candidate => UserType::Employer,
            UserType::Employer => UserType::Candidate,
        };
        self.session.sign_in(self.user_type)?;
        let cards = deck::menu_deck(&mut self.ids, self.user_type);
        self.menu.replace_source(cards);
        self.views.home();
        self.swipe = None;
        tracing::info!(user_type = self.user_type.as_str(), "switched user type");
        Ok(())
    }

    fn open(&mut self, key: MenuKey) -> Result<()> {
        let Some(target) = view::view_for(key, self.user_type) else {
            return Ok(());
        };
        if let ActiveView::Swipe(deck_type) = target {
            let cards = deck::swipe_deck(&mut self.ids, deck_type, self.deck_path.as_deref())?;
            self.swipe = Some(SwipeScreen::new(cards, deck_type, &self.config));
        }
        if target == ActiveView::Verify {
            self.verify = VerifyForm::default();
        }
        self.views.push(target);
        Ok(())
    }

    fn back(&mut self) {
        if let ActiveView::Swipe(_) = self.views.current() {
            self.swipe = None;
        }
        self.views.back();
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Result<Flow> {
        if self.show_tutorial {
            self.show_tutorial = false;
            self.session.mark_tutorial_seen()?;
            return Ok(Flow::Continue);
        }

        match self.views.current() {
            ActiveView::Hub => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Leave),
                KeyCode::Left | KeyCode::Char('h') => {
                    self.menu.dismiss_top(Direction::Left, now);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.menu.dismiss_top(Direction::Right, now);
                }
                KeyCode::Enter | KeyCode::Char(' ') if self.menu.can_dismiss(now) => {
                    let key = match self.menu.top().map(|c| &c.payload) {
                        Some(CardPayload::Menu(item)) => Some(item.key),
                        _ => None,
                    };
                    if let Some(key) = key {
                        self.open(key)?;
                    }
                }
                KeyCode::Char('t') => self.switch_user_type()?,
                KeyCode::Char('?') => self.show_tutorial = true,
                _ => {}
            },
            ActiveView::Swipe(_) => {
                let leave = match self.swipe.as_mut() {
                    Some(screen) => matches!(screen.on_key(key, now), Flow::Leave),
                    None => true,
                };
                if leave {
                    self.back();
                }
            }
            ActiveView::Verify => match key.code {
                KeyCode::Esc => self.back(),
                KeyCode::Enter => {
                    let client = VerifyClient::new(&self.config.verify_url);
                    let result = client.verify(&self.verify.email);
                    self.verify.status = Some(result.map_err(|e| format!("{:#}", e)));
                }
                KeyCode::Backspace => {
                    self.verify.email.pop();
                }
                KeyCode::Char(c) => self.verify.email.push(c),
                _ => {}
            },
            _ => match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                    self.back()
                }
                _ => {}
            },
        }
        Ok(Flow::Continue)
    }

    fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match self.views.current() {
            ActiveView::Hub => {
                let column = i32::from(mouse.column);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => self.menu.begin_drag(column),
                    MouseEventKind::Drag(MouseButton::Left) => self.menu.drag_to(column),
                    MouseEventKind::Up(MouseButton::Left) => {
                        self.menu.release_drag(now);
                    }
                    _ => {}
                }
            }
            ActiveView::Swipe(_) => {
                if let Some(screen) = self.swipe.as_mut() {
                    screen.on_mouse(mouse, now);
                }
            }
            _ => {}
        }
    }

    fn tick(&mut self, now: Instant) {
        self.menu.tick(now);
        if let Some(screen) = self.swipe.as_mut() {
            screen.stack.tick(now);
        }
    }
}

pub fn run_hub<S: KeyValueStore>(
    user_type: UserType,
    config: Config,
    deck_path: Option<PathBuf>,
    session: Session<S>,
) -> Result<()> {
    let mut hub = Hub::new(user_type, config, deck_path, session);

    let mut terminal = enter_terminal()?;
    let result = hub_loop(&mut terminal, &mut hub);
    leave_terminal()?;
    result
}

fn hub_loop<S: KeyValueStore>(terminal: &mut Term, hub: &mut Hub<S>) -> Result<()> {
    loop {
        hub.tick(Instant::now());
        terminal.draw(|frame| draw_hub(frame, hub))?;

        if !event::poll(FRAME)? {
            continue;
        }
        let now = Instant::now();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Flow::Leave = hub.on_key(key, now)? {
                    break;
                }
            }
            Event::Mouse(mouse) => hub.on_mouse(mouse, now),
            _ => {}
        }
    }
    Ok(())
}

fn draw_hub<S: KeyValueStore>(frame: &mut Frame, hub: &Hub<S>) {
    let rows = Layout::default()
        .direction(Axis::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let current = hub.views.current();
    frame.render_widget(
        Paragraph::new(format!(" swipehire · {} · {}", hub.user_type.as_str(), current.title()))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    match current {
        ActiveView::Hub => {
            draw_stack(frame, rows[1], &hub.menu);
            frame.render_widget(
                Paragraph::new(" h/l:cycle  enter:open  t:switch role  ?:help  q:quit")
                    .style(Style::default().fg(Color::DarkGray)),
                rows[2],
            );
        }
        ActiveView::Swipe(_) => {
            if let Some(screen) = &hub.swipe {
                draw_swipe(frame, rows[1].union(rows[2]), screen);
            }
        }
        ActiveView::Verify => draw_verify(frame, rows[1], &hub.verify, &hub.config.verify_url),
        other => draw_placeholder(frame, rows[1], other, hub.user_type),
    }

    if hub.show_tutorial {
        draw_tutorial(frame, frame.area());
    }
}

fn draw_verify(frame: &mut Frame, area: Rect, form: &VerifyForm, url: &str) {
    let mut lines = vec![
        Line::from("Record a verification on the Algorand test network."),
        Line::from(Span::styled(
            format!("Endpoint: {}", url),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(format!("Email: {}▏", form.email)),
        Line::from(""),
    ];
    match &form.status {
        Some(Ok(tx_id)) => lines.push(Line::from(Span::styled(
            format!("Verified. Transaction: {}", tx_id),
            Style::default().fg(Color::Green),
        ))),
        Some(Err(error)) => lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from(Span::styled(
            "enter:send  esc:back",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Verify ")),
        card_area(area, true),
    );
}

fn draw_placeholder(frame: &mut Frame, area: Rect, view: ActiveView, user_type: UserType) {
    let body = match view {
        ActiveView::Coach => "Career coaching is not connected in this build.".to_string(),
        ActiveView::Messages => match user_type {
            UserType::Candidate => "No conversations with recruiters yet.".to_string(),
            UserType::Employer => "No conversations with candidates yet.".to_string(),
        },
        ActiveView::Dashboard => "No hiring metrics recorded yet.".to_string(),
        ActiveView::AddJob => "Add postings with: swipehire swipe --deck jobs.json".to_string(),
        ActiveView::Detail(key) => {
            format!("{:?} details are stored locally for this browser profile.", key)
        }
        ActiveView::Hub | ActiveView::Swipe(_) | ActiveView::Verify => String::new(),
    };
    frame.render_widget(
        Paragraph::new(vec![Line::from(body), Line::from(""), Line::from(Span::styled(
            "esc:back",
            Style::default().fg(Color::DarkGray),
        ))])
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", view.title()))),
        card_area(area, false),
    );
}

fn draw_tutorial(frame: &mut Frame, area: Rect) {
    let popup = card_area(area, false);
    let lines = vec![
        Line::from(Span::styled("Welcome", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Swipe cards with h/l or the arrow keys."),
        Line::from("Drag with the mouse past the edge marker to swipe."),
        Line::from("Enter opens the top card, u undoes the last swipe."),
        Line::from(""),
        Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Double)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn hub() -> Hub<MemoryStore> {
        Hub::new(UserType::Candidate, Config::default(), None, Session::new(MemoryStore::default()))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_swipe_screen_keys() {
        let mut ids = IdAllocator::new();
        let cards = deck::swipe_deck(&mut ids, UserType::Candidate, None).unwrap();
        let mut screen = SwipeScreen::new(cards, UserType::Candidate, &Config::default());
        let now = Instant::now();

        screen.on_key(press(KeyCode::Right), now);
        screen.stack.flush();
        assert_eq!(screen.stack.interested().len(), 1);

        screen.on_key(press(KeyCode::Enter), now);
        assert!(screen.stack.is_expanded());
        screen.on_key(press(KeyCode::Left), now);
        assert!(screen.stack.rejected().is_empty());

        assert!(matches!(screen.on_key(press(KeyCode::Esc), now), Flow::Continue));
        assert!(!screen.stack.is_expanded());

        screen.on_key(press(KeyCode::Char('u')), now);
        assert!(screen.stack.interested().is_empty());
        assert_eq!(screen.stack.len(), 6);

        assert!(matches!(screen.on_key(press(KeyCode::Char('q')), now), Flow::Leave));
    }

    #[test]
    fn test_hub_tutorial_shown_once() {
        let mut hub = hub();
        assert!(hub.show_tutorial);
        hub.on_key(press(KeyCode::Char('x')), Instant::now()).unwrap();
        assert!(!hub.show_tutorial);
        assert!(hub.session.has_seen_tutorial());
    }

    #[test]
    fn test_hub_open_jobs_and_back() {
        let mut hub = hub();
        hub.show_tutorial = false;
        let now = Instant::now();

        // candidate menu starts with Jobs
        hub.on_key(press(KeyCode::Enter), now).unwrap();
        assert_eq!(hub.views.current(), ActiveView::Swipe(UserType::Candidate));
        assert!(hub.swipe.is_some());

        hub.on_key(press(KeyCode::Char('q')), now).unwrap();
        assert_eq!(hub.views.current(), ActiveView::Hub);
        assert!(hub.swipe.is_none());
    }

    #[test]
    fn test_hub_cycles_menu() {
        let mut hub = hub();
        hub.show_tutorial = false;
        let first = hub.menu.top().map(|c| c.id);
        let now = Instant::now();
        hub.on_key(press(KeyCode::Left), now).unwrap();
        hub.tick(now + Duration::from_secs(1));
        assert_ne!(hub.menu.top().map(|c| c.id), first);
        assert!(hub.menu.interested().is_empty());
    }

    #[test]
    fn test_hub_switch_user_type() {
        let mut hub = hub();
        hub.show_tutorial = false;
        hub.on_key(press(KeyCode::Char('t')), Instant::now()).unwrap();
        assert_eq!(hub.user_type, UserType::Employer);
        assert_eq!(hub.session.user_type(), Some(UserType::Employer));
        let keys: Vec<MenuKey> = hub
            .menu
            .stack()
            .filter_map(|c| match &c.payload {
                CardPayload::Menu(item) => Some(item.key),
                _ => None,
            })
            .collect();
        assert_eq!(keys.first(), Some(&MenuKey::Candidates));
    }

    #[test]
    fn test_verify_form_rejects_bad_email_without_network() {
        let mut hub = hub();
        hub.show_tutorial = false;
        hub.open(MenuKey::Verify).unwrap();
        for c in "nope".chars() {
            hub.on_key(press(KeyCode::Char(c)), Instant::now()).unwrap();
        }
        hub.on_key(press(KeyCode::Enter), Instant::now()).unwrap();
        assert!(matches!(hub.verify.status, Some(Err(_))));
    }

    #[test]
    fn test_draw_swipe_renders_top_card() {
        let mut ids = IdAllocator::new();
        let cards = deck::swipe_deck(&mut ids, UserType::Candidate, None).unwrap();
        let screen = SwipeScreen::new(cards, UserType::Candidate, &Config::default());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_swipe(frame, area, &screen)
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Google"));
        assert!(text.contains("Interested"));
    }

    #[test]
    fn test_draw_empty_stack() {
        let screen = SwipeScreen::new(Vec::new(), UserType::Employer, &Config::default());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_swipe(frame, area, &screen)
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("No more candidates"));
    }
}
