//! Main application state.
//!
//! Follows the Elm architecture: [`App::update`] folds terminal events and
//! [`App::handle_message`] folds background results into the state, and
//! [`App::view`] draws it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::actions::ActionResponse;
use crate::config::Settings;
use crate::domain::{Inquiry, MailTemplate, Property, Realtor, StatusCycle};
use crate::error::AppError;
use crate::events::Event;
use crate::logging;
use crate::store::{LayoutStore, Repository, Stores};
use crate::table::csv::write_csv;
use crate::tasks::{DataMessage, Routed, TaskSpawner};
use crate::ui::{
    theme::theme, ErrorDialog, HelpAction, HelpView, InputOutcome, NotificationManager,
    TableAction, TableView, TextInput,
};

/// The four table screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Properties,
    Realtors,
    Inquiries,
    MailTemplates,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Properties,
        Screen::Realtors,
        Screen::Inquiries,
        Screen::MailTemplates,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Properties => "Properties",
            Screen::Realtors => "Realtors",
            Screen::Inquiries => "Inquiries",
            Screen::MailTemplates => "Mail templates",
        }
    }

    /// Parse a table name as used in settings and on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "properties" => Some(Screen::Properties),
            "realtors" => Some(Screen::Realtors),
            "inquiries" => Some(Screen::Inquiries),
            "mail_templates" => Some(Screen::MailTemplates),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Records shown on a screen.
trait ScreenRecord: Routed + StatusCycle {
    fn repo(stores: &Stores) -> Arc<dyn Repository<Self>>;
}

impl ScreenRecord for Property {
    fn repo(stores: &Stores) -> Arc<dyn Repository<Self>> {
        stores.properties.clone()
    }
}

impl ScreenRecord for Realtor {
    fn repo(stores: &Stores) -> Arc<dyn Repository<Self>> {
        stores.realtors.clone()
    }
}

impl ScreenRecord for Inquiry {
    fn repo(stores: &Stores) -> Arc<dyn Repository<Self>> {
        stores.inquiries.clone()
    }
}

impl ScreenRecord for MailTemplate {
    fn repo(stores: &Stores) -> Arc<dyn Repository<Self>> {
        stores.mail_templates.clone()
    }
}

/// Everything but the table views, so a view and its services can be
/// borrowed together.
struct Context {
    settings: Settings,
    stores: Stores,
    export_dir: PathBuf,
    spawner: TaskSpawner,
    notifications: NotificationManager,
    error_dialog: Option<ErrorDialog>,
    import_prompt: Option<TextInput>,
}

impl Context {
    fn handle_error(&mut self, error: AppError) {
        tracing::error!(error = %error, "Application error");
        if error.is_critical() {
            self.error_dialog = Some(ErrorDialog::from_error(&error));
        } else {
            self.notifications.error(error.user_message());
        }
    }

    fn perform<R: ScreenRecord>(&mut self, view: &mut TableView<R>, action: TableAction) {
        match action {
            TableAction::LayoutChanged(layout) => {
                if let Err(e) = self.stores.layouts.save(R::TABLE, &layout) {
                    self.handle_error(e.into());
                }
            }
            TableAction::ResetLayout => {
                if let Err(e) = self.stores.layouts.clear(R::TABLE) {
                    self.handle_error(e.into());
                }
                self.notifications.info("Columns reset");
            }
            TableAction::Export => {
                let rows = view.export_rows();
                match write_csv(&self.export_dir, R::TABLE, &rows) {
                    Ok(path) => self
                        .notifications
                        .success(format!("Exported {} rows to {}", rows.len(), path.display())),
                    Err(e) => self.handle_error(e.into()),
                }
            }
            TableAction::Reload => {
                info!(table = R::TABLE, "Reloading");
                self.spawner.spawn_load(R::repo(&self.stores));
            }
            TableAction::CycleStatus(id) => {
                let patch = view
                    .table()
                    .rows()
                    .iter()
                    .find(|r| r.id() == id)
                    .map(|r| r.status_patch());
                if let Some(patch) = patch {
                    self.spawner.spawn_update(R::repo(&self.stores), id, patch);
                }
            }
            TableAction::Import => {
                self.import_prompt = Some(TextInput::new());
            }
        }
    }

    fn submit_import<R: ScreenRecord>(&mut self, path: &str) {
        let path = path.trim();
        if path.is_empty() {
            return;
        }
        let delay = Duration::from_millis(self.settings.import_delay_ms);
        self.spawner.spawn_import::<R>(PathBuf::from(path), delay);
        self.notifications.info(format!("Importing {}…", path));
    }

    fn apply_update<R: ScreenRecord>(&mut self, view: &mut TableView<R>, response: ActionResponse<R>) {
        if let Some(record) = response.data.filter(|_| response.success) {
            view.table_mut().replace_row(record);
            self.notifications.success(response.message);
        } else if response.errors.is_empty() {
            self.notifications.error(response.message);
        } else {
            let details: Vec<String> = response.errors.iter().map(|e| e.to_string()).collect();
            self.notifications
                .error(format!("{}: {}", response.message, details.join("; ")));
        }
    }
}

fn apply_layout<R: ScreenRecord>(view: &mut TableView<R>, layouts: &LayoutStore) {
    if let Some(layout) = layouts.load(R::TABLE) {
        view.table_mut().apply_layout(&layout);
    }
}

/// Run `$body` with `$view` bound to the active screen's view.
macro_rules! on_screen {
    ($self:ident, $view:ident => $body:expr) => {
        match $self.screen {
            Screen::Properties => {
                let $view = &mut $self.properties;
                $body
            }
            Screen::Realtors => {
                let $view = &mut $self.realtors;
                $body
            }
            Screen::Inquiries => {
                let $view = &mut $self.inquiries;
                $body
            }
            Screen::MailTemplates => {
                let $view = &mut $self.mail_templates;
                $body
            }
        }
    };
}

/// The application model.
pub struct App {
    screen: Screen,
    should_quit: bool,
    help: Option<HelpView>,
    ctx: Context,
    properties: TableView<Property>,
    realtors: TableView<Realtor>,
    inquiries: TableView<Inquiry>,
    mail_templates: TableView<MailTemplate>,
}

impl App {
    /// Build the app and restore saved column layouts. Rows load once
    /// [`App::start`] is called.
    pub fn new(settings: Settings, stores: Stores, export_dir: PathBuf, spawner: TaskSpawner) -> Self {
        let budget = settings.text_budget;
        let screen = Screen::from_name(&settings.default_screen).unwrap_or_default();
        debug!(?screen, budget, "Creating application");

        let mut app = Self {
            screen,
            should_quit: false,
            help: None,
            properties: TableView::new(Screen::Properties.title(), budget),
            realtors: TableView::new(Screen::Realtors.title(), budget),
            inquiries: TableView::new(Screen::Inquiries.title(), budget),
            mail_templates: TableView::new(Screen::MailTemplates.title(), budget),
            ctx: Context {
                settings,
                stores,
                export_dir,
                spawner,
                notifications: NotificationManager::new(),
                error_dialog: None,
                import_prompt: None,
            },
        };

        let layouts = app.ctx.stores.layouts.clone();
        apply_layout(&mut app.properties, &layouts);
        apply_layout(&mut app.realtors, &layouts);
        apply_layout(&mut app.inquiries, &layouts);
        apply_layout(&mut app.mail_templates, &layouts);
        app
    }

    /// Start loading every table in the background.
    pub fn start(&mut self) {
        let spawner = &self.ctx.spawner;
        let stores = &self.ctx.stores;
        spawner.spawn_load(Property::repo(stores));
        spawner.spawn_load(Realtor::repo(stores));
        spawner.spawn_load(Inquiry::repo(stores));
        spawner.spawn_load(MailTemplate::repo(stores));
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn properties(&self) -> &TableView<Property> {
        &self.properties
    }

    pub fn realtors(&self) -> &TableView<Realtor> {
        &self.realtors
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.ctx.notifications
    }

    pub fn is_error_dialog_visible(&self) -> bool {
        self.ctx.error_dialog.is_some()
    }

    /// Report an error as a toast, or a dialog when it is critical.
    pub fn handle_error(&mut self, error: AppError) {
        self.ctx.handle_error(error);
    }

    /// Fold a terminal event into the state.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Mouse(mouse) => {
                if self.ctx.error_dialog.is_none() && self.help.is_none() {
                    let ctx = &mut self.ctx;
                    on_screen!(self, view => {
                        if let Some(action) = view.handle_mouse(mouse) {
                            ctx.perform(view, action);
                        }
                    });
                }
            }
            Event::Resize(width, height) => {
                let px = self.ctx.settings.viewport_px(width);
                trace!(width, height, px, "Terminal resized");
                self.properties.table_mut().set_viewport_width(px);
                self.realtors.table_mut().set_viewport_width(px);
                self.inquiries.table_mut().set_viewport_width(px);
                self.mail_templates.table_mut().set_viewport_width(px);
            }
            Event::Tick => self.ctx.notifications.tick(),
        }
    }

    /// Fold a background task result into the state.
    pub fn handle_message(&mut self, message: DataMessage) {
        let ctx = &mut self.ctx;
        match message {
            DataMessage::PropertiesLoaded(rows) => self.properties.table_mut().set_rows(rows),
            DataMessage::RealtorsLoaded(rows) => self.realtors.table_mut().set_rows(rows),
            DataMessage::InquiriesLoaded(rows) => self.inquiries.table_mut().set_rows(rows),
            DataMessage::MailTemplatesLoaded(rows) => {
                self.mail_templates.table_mut().set_rows(rows)
            }
            DataMessage::PropertyUpdated(response) => ctx.apply_update(&mut self.properties, response),
            DataMessage::RealtorUpdated(response) => ctx.apply_update(&mut self.realtors, response),
            DataMessage::InquiryUpdated(response) => ctx.apply_update(&mut self.inquiries, response),
            DataMessage::MailTemplateUpdated(response) => {
                ctx.apply_update(&mut self.mail_templates, response)
            }
            DataMessage::ImportFinished { table, response } => {
                debug!(table, success = response.success, "Import finished");
                ctx.notifications.outcome(response.success, response.message);
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(dialog) = &self.ctx.error_dialog {
            if dialog.handle_input(key) {
                self.ctx.error_dialog = None;
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if let Some(help) = &mut self.help {
            if help.handle_input(key) == Some(HelpAction::Close) {
                self.help = None;
            }
            return;
        }

        if let Some(prompt) = &mut self.ctx.import_prompt {
            match prompt.handle_input(key) {
                InputOutcome::Submit => {
                    let path = prompt.value().to_string();
                    self.ctx.import_prompt = None;
                    let ctx = &mut self.ctx;
                    match self.screen {
                        Screen::Properties => ctx.submit_import::<Property>(&path),
                        Screen::Realtors => ctx.submit_import::<Realtor>(&path),
                        Screen::Inquiries => ctx.submit_import::<Inquiry>(&path),
                        Screen::MailTemplates => ctx.submit_import::<MailTemplate>(&path),
                    }
                }
                InputOutcome::Cancel => self.ctx.import_prompt = None,
                InputOutcome::Changed | InputOutcome::Unchanged => {}
            }
            return;
        }

        let capturing = on_screen!(self, view => view.is_capturing_input());
        if !capturing {
            match (key.code, key.modifiers) {
                (KeyCode::Char('q'), KeyModifiers::NONE) => {
                    info!("Quit requested");
                    self.should_quit = true;
                    return;
                }
                (KeyCode::Char('?'), _) => {
                    self.help = Some(HelpView::new());
                    return;
                }
                (KeyCode::Tab, _) => {
                    self.screen = self.screen.next();
                    return;
                }
                (KeyCode::BackTab, _) => {
                    self.screen = self.screen.prev();
                    return;
                }
                (KeyCode::Char(c @ '1'..='4'), KeyModifiers::NONE) => {
                    let index = c as usize - '1' as usize;
                    self.screen = Screen::ALL[index];
                    return;
                }
                _ => {}
            }
            if !self.ctx.settings.vim_mode && is_vim_motion(&key) {
                trace!(key = ?key.code, "Vim motion ignored");
                return;
            }
        }

        let ctx = &mut self.ctx;
        on_screen!(self, view => {
            if let Some(action) = view.handle_key(key) {
                ctx.perform(view, action);
            }
        });
    }

    /// Draw the whole UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [tabs_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_tabs(frame, tabs_area);
        on_screen!(self, view => view.render(frame, content_area));
        self.render_footer(frame, footer_area);

        if let Some(help) = &mut self.help {
            let log_dir = logging::log_directory().map(|p| p.display().to_string());
            help.render(frame, content_area, log_dir.as_deref());
        }

        self.ctx.notifications.render(frame, area);

        if let Some(dialog) = &self.ctx.error_dialog {
            dialog.render(frame, area);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut spans = vec![Span::styled(
            " realtydesk ",
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        )];
        for (i, screen) in Screen::ALL.iter().enumerate() {
            let style = if *screen == self.screen {
                Style::default().fg(t.fg).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(t.muted)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("{} {}", i + 1, screen.title()), style));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(t.border)),
            ),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        if let Some(prompt) = &self.ctx.import_prompt {
            prompt.render(frame, area, "Import CSV file: ", true);
            return;
        }

        let hints = "j/k move  n/p page  space check  / search  c columns  e export  ? help  q quit";
        let footer = Line::from(vec![
            Span::styled(
                format!(" {} ", self.screen.title()),
                Style::default().fg(ratatui::style::Color::Black).bg(t.accent),
            ),
            Span::raw(" "),
            Span::styled(hints, Style::default().fg(t.muted)),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}

fn is_vim_motion(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('h' | 'j' | 'k' | 'l' | 'g' | 'G'))
}

/// Export directory from settings, or the platform default.
pub fn export_dir(settings: &Settings, data_dir: &Path) -> PathBuf {
    settings
        .export_dir
        .clone()
        .unwrap_or_else(|| crate::store::default_export_dir(data_dir))
}
