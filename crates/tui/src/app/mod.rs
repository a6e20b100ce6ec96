use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use engine::{Currency, Dashboard, MovementList};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    source::AppSource,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Movements,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Dashboard, Section::Movements];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Movements => "Movements",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Movements,
            Self::Movements => Self::Dashboard,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub dashboard: Dashboard,
    pub movements: MovementsState,
    pub currency: Currency,
    pub source: String,
    pub last_refresh: Option<DateTime<Local>>,
}

pub struct App {
    source: AppSource,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, source: AppSource) -> Self {
        let state = AppState {
            section: Section::Dashboard,
            dashboard: Dashboard::new().with_window(config.window()),
            movements: MovementsState::default(),
            currency: config.currency,
            source: source.describe(),
            last_refresh: None,
        };

        Self {
            source,
            state,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::TerminalSession::enter()?;
        self.event_loop(&mut terminal).await
    }

    async fn event_loop(&mut self, terminal: &mut ui::TerminalSession) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.refresh().await;
        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await;
                }
            }
        }

        Ok(())
    }

    /// Activates both components against the source, one fetch each.
    pub async fn refresh(&mut self) {
        tracing::info!("refreshing from {}", self.state.source);
        let today = Local::now().date_naive();
        self.state.dashboard.activate(&self.source, today).await;
        self.state.movements.list.activate(&self.source).await;
        self.state.movements.clamp_selection();
        self.state.last_refresh = Some(Local::now());
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        self.handle_action(map_key(key)).await;
    }

    async fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::NextSection => self.state.section = self.state.section.next(),
            AppAction::Up => self.state.movements.select_prev(),
            AppAction::Down => self.state.movements.select_next(),
            AppAction::Input(ch) => self.handle_char(ch).await,
            AppAction::None => {}
        }
    }

    async fn handle_char(&mut self, ch: char) {
        match ch {
            'd' | 'D' | 'h' | 'H' => self.state.section = Section::Dashboard,
            'm' | 'M' | 'l' | 'L' => self.state.section = Section::Movements,
            'r' | 'R' => self.refresh().await,
            'j' | 'J' => self.state.movements.select_next(),
            'k' | 'K' => self.state.movements.select_prev(),
            _ => {}
        }
    }
}

#[derive(Debug, Default)]
pub struct MovementsState {
    pub list: MovementList,
    pub selected: usize,
}

impl MovementsState {
    fn select_next(&mut self) {
        if self.list.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.list.len() - 1);
    }

    fn select_prev(&mut self) {
        if self.list.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use engine::{Category, JsonFileSource, LoadStatus, Money};

    use super::*;
    use crate::config::SourceKind;

    fn write_fixture(name: &str, body: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("fincontrol_tui_app_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}_{}.json", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn app_for(path: &std::path::Path) -> App {
        let config = AppConfig {
            source: SourceKind::File,
            file: path.display().to_string(),
            ..AppConfig::default()
        };
        App::new(&config, AppSource::File(JsonFileSource::new(path)))
    }

    #[tokio::test]
    async fn refresh_loads_both_components() {
        let today = Local::now().date_naive().format("%Y-%m-%d");
        let path = write_fixture(
            "refresh",
            &format!(
                r#"[
                {{"id": 1, "description": "Salary", "amount_minor": 10000,
                  "category": "INCOME", "date": "{today}"}},
                {{"id": 2, "description": "Lunch", "amount_minor": 1500,
                  "category": "EXPENSE", "tag": "Food", "date": "{today}"}}
            ]"#
            ),
        );
        let mut app = app_for(&path);

        app.handle_action(AppAction::Input('r')).await;
        std::fs::remove_file(&path).unwrap();

        assert!(app.state.dashboard.status().is_ready());
        assert_eq!(app.state.dashboard.total_income(), Money::new(10_000));
        assert_eq!(app.state.dashboard.total_expense(), Money::new(1_500));
        assert_eq!(app.state.movements.list.len(), 2);
        assert_eq!(
            app.state.movements.list.movements()[1].category,
            Category::Expense
        );
        assert!(app.state.last_refresh.is_some());
    }

    #[tokio::test]
    async fn failed_refresh_is_reported_on_both_components() {
        let mut app = app_for(std::path::Path::new("/no/such/movements.json"));
        app.refresh().await;

        assert!(matches!(app.state.dashboard.status(), LoadStatus::Failed(_)));
        assert!(matches!(app.state.movements.list.status(), LoadStatus::Failed(_)));
    }

    #[tokio::test]
    async fn navigation_keys_switch_sections_and_quit() {
        let mut app = app_for(std::path::Path::new("/unused.json"));
        assert_eq!(app.state.section, Section::Dashboard);

        app.handle_action(AppAction::Input('m')).await;
        assert_eq!(app.state.section, Section::Movements);
        app.handle_action(AppAction::NextSection).await;
        assert_eq!(app.state.section, Section::Dashboard);

        app.handle_action(AppAction::Quit).await;
        assert!(app.should_quit);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = MovementsState::default();
        state.select_next();
        assert_eq!(state.selected, 0);

        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        state.list.apply(vec![
            engine::Movement::new("a", Money::new(1), Category::Income, date),
            engine::Movement::new("b", Money::new(2), Category::Income, date),
        ]);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, 0);

        state.selected = 5;
        state.clamp_selection();
        assert_eq!(state.selected, 1);
    }
}
