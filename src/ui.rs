// 🖥️ Results Viewer - entities, duplicates and output of a finished run

use crate::pipeline::MergeRun;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Entities,
    Duplicates,
    Output,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Entities => Page::Duplicates,
            Page::Duplicates => Page::Output,
            Page::Output => Page::Entities,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Entities => Page::Output,
            Page::Duplicates => Page::Entities,
            Page::Output => Page::Duplicates,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Entities => "Entities",
            Page::Duplicates => "Duplicates",
            Page::Output => "Output",
        }
    }
}

pub struct App {
    /// (name, fragments, lines)
    pub entities: Vec<(String, usize, usize)>,
    /// (value, occurrences) in confirmation order
    pub duplicates: Vec<(String, usize)>,
    pub output: Vec<String>,
    pub lines_processed: usize,
    pub current_page: Page,
    pub entities_state: TableState,
    pub duplicates_state: TableState,
    pub output_state: TableState,
}

impl App {
    pub fn new(run: &MergeRun) -> Self {
        let entities = run
            .store
            .iter()
            .map(|e| (e.name().to_string(), e.fragments().len(), e.line_count()))
            .collect();
        let duplicates = run
            .dedup
            .report
            .confirmed_with_counts()
            .map(|(v, c)| (v.to_string(), c))
            .collect();

        let mut app = Self {
            entities,
            duplicates,
            output: run.output.clone(),
            lines_processed: run.flat.len(),
            current_page: Page::Entities,
            entities_state: TableState::default(),
            duplicates_state: TableState::default(),
            output_state: TableState::default(),
        };
        for page in [Page::Entities, Page::Duplicates, Page::Output] {
            if app.row_count(page) > 0 {
                app.state_mut(page).select(Some(0));
            }
        }
        app
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn row_count(&self, page: Page) -> usize {
        match page {
            Page::Entities => self.entities.len(),
            Page::Duplicates => self.duplicates.len(),
            Page::Output => self.output.len(),
        }
    }

    fn state_mut(&mut self, page: Page) -> &mut TableState {
        match page {
            Page::Entities => &mut self.entities_state,
            Page::Duplicates => &mut self.duplicates_state,
            Page::Output => &mut self.output_state,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self.current_page {
            Page::Entities => self.entities_state.selected(),
            Page::Duplicates => self.duplicates_state.selected(),
            Page::Output => self.output_state.selected(),
        }
    }

    fn select(&mut self, i: usize) {
        let page = self.current_page;
        self.state_mut(page).select(Some(i));
    }

    pub fn next(&mut self) {
        let len = self.row_count(self.current_page);
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select(i);
    }

    pub fn previous(&mut self) {
        let len = self.row_count(self.current_page);
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    pub fn page_down(&mut self) {
        let len = self.row_count(self.current_page);
        if len == 0 {
            return;
        }
        let i = self.selected().map_or(0, |i| (i + PAGE_STEP).min(len - 1));
        self.select(i);
    }

    pub fn page_up(&mut self) {
        if self.row_count(self.current_page) == 0 {
            return;
        }
        let i = self.selected().map_or(0, |i| i.saturating_sub(PAGE_STEP));
        self.select(i);
    }

    pub fn home(&mut self) {
        if self.row_count(self.current_page) > 0 {
            self.select(0);
        }
    }

    pub fn end(&mut self) {
        let len = self.row_count(self.current_page);
        if len > 0 {
            self.select(len - 1);
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.home(),
                KeyCode::End => app.end(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs + totals
            Constraint::Min(0),    // Page content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    match app.current_page {
        Page::Entities => render_entities(f, chunks[1], app),
        Page::Duplicates => render_duplicates(f, chunks[1], app),
        Page::Output => render_output(f, chunks[1], app),
    }
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Entities, Page::Duplicates, Page::Output].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }
        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Processed: {}", app.lines_processed),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Duplicated: {}", app.duplicates.len()),
        Style::default().fg(Color::Red),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Output: {}", app.output.len()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn table_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

fn highlight() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

fn render_entities(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.entities.iter().map(|(name, fragments, lines)| {
        Row::new(vec![
            Cell::from(name.clone()),
            Cell::from(fragments.to_string()),
            Cell::from(lines.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [Constraint::Min(20), Constraint::Length(12), Constraint::Length(12)],
    )
    .header(header_row(&["Entity", "Fragments", "Lines"]))
    .block(table_block(" Entities "))
    .highlight_style(highlight())
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.entities_state);
}

fn render_duplicates(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.duplicates.iter().map(|(value, count)| {
        Row::new(vec![
            Cell::from(count.to_string()).style(Style::default().fg(Color::Red)),
            Cell::from(value.clone()),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(20)])
        .header(header_row(&["Count", "Value"]))
        .block(table_block(" Confirmed duplicates "))
        .highlight_style(highlight())
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.duplicates_state);
}

fn render_output(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.output.iter().enumerate().map(|(i, line)| {
        Row::new(vec![
            Cell::from(format!("{:>5}", i + 1)).style(Style::default().fg(Color::DarkGray)),
            Cell::from(line.clone()),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(6), Constraint::Min(20)])
        .block(table_block(" Output file "))
        .highlight_style(highlight())
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.output_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.row_count(app.current_page);

    let status_spans = vec![
        Span::styled(format!(" Row: {}/{} ", selected, total), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(status_bar, area);
}
