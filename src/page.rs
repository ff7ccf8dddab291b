use crate::filter::{filter_and_sort, SortMode};
use crate::github::RepoSource;
use crate::render::{load_error, render_list};
use crate::types::Repository;
use crate::view::PageElements;
use chrono::{Datelike, Local};
use tracing::{debug, warn};

/// Repositories held by the page for the session.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Everything the listing API returned.
    pub repos: Vec<Repository>,
    /// The display list derived from `repos` by the latest query and sort.
    pub filtered: Vec<Repository>,
}

/// Owns the project listing for one page: loads repositories once, then
/// re-derives and re-renders the display list on every input change.
pub struct PageController<S> {
    username: String,
    source: S,
    elements: PageElements,
    state: DisplayState,
}

impl<S: RepoSource> PageController<S> {
    pub fn new(username: impl Into<String>, source: S, elements: PageElements) -> Self {
        Self {
            username: username.into(),
            source,
            elements,
            state: DisplayState::default(),
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Startup: stamp the current year, then load and show the projects.
    pub async fn start(&mut self) {
        self.show_year(Local::now().year());
        self.load_repos().await;
    }

    pub fn show_year(&mut self, year: i32) {
        if let Some(el) = self.elements.year.as_mut() {
            el.set_text(&year.to_string());
        }
    }

    /// Fetches the repository list once. A failure is shown in the projects
    /// container and otherwise swallowed; the full list stays as it was.
    pub async fn load_repos(&mut self) {
        let result = self.source.list_user_repos(&self.username).await;
        match result {
            Ok(repos) => {
                self.state.repos = repos;
                self.apply_filter_and_sort();
            }
            Err(e) => {
                warn!("Could not load repositories for {}: {}", self.username, e);
                if let Some(projects) = self.elements.projects.as_mut() {
                    projects.set_html(&load_error(&e.to_string()));
                }
            }
        }
    }

    pub fn on_search_input(&mut self) {
        self.apply_filter_and_sort();
    }

    pub fn on_sort_change(&mut self) {
        self.apply_filter_and_sort();
    }

    /// Current query, or empty without a search element.
    pub fn query(&self) -> String {
        self.elements
            .search
            .as_ref()
            .map(|el| el.value())
            .unwrap_or_default()
    }

    /// Current sort mode, or the default without a sort element.
    pub fn sort_mode(&self) -> SortMode {
        self.elements
            .sort
            .as_ref()
            .map(|el| SortMode::from_selector(&el.value()))
            .unwrap_or_default()
    }

    pub fn apply_filter_and_sort(&mut self) {
        let query = self.query();
        let mode = self.sort_mode();
        self.state.filtered = filter_and_sort(&self.state.repos, &query, mode);
        debug!(
            "{} of {} repositories match {:?} sorted by {}",
            self.state.filtered.len(),
            self.state.repos.len(),
            query.trim(),
            mode.as_str()
        );
        self.render();
    }

    /// Replaces the projects container with the current display list.
    pub fn render(&mut self) {
        if let Some(projects) = self.elements.projects.as_mut() {
            projects.set_html(&render_list(&self.state.filtered));
        }
    }
}
