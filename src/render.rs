use crate::escape::escape_html;
use crate::types::Repository;
use chrono::{DateTime, Utc};

pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_LANGUAGE: &str = "—";
pub const EMPTY_STATE: &str = r#"<p class="muted">No projects found.</p>"#;

/// Renders one repository as a project card.
pub fn repo_card(repo: &Repository) -> String {
    let name = escape_html(&repo.name);
    let desc = escape_html(non_empty(repo.description.as_deref()).unwrap_or(NO_DESCRIPTION));
    let lang = non_empty(repo.language.as_deref())
        .map(escape_html)
        .unwrap_or_else(|| NO_LANGUAGE.to_string());
    let stars = repo.stargazers_count;
    let updated = repo.updated_at.map(format_date).unwrap_or_default();
    let html_url = escape_html(&repo.html_url);

    let live_btn = repo
        .live_url()
        .map(|homepage| {
            format!(
                r#"<a class="btn btn--ghost" href="{}" target="_blank" rel="noreferrer">Live</a>"#,
                escape_html(homepage)
            )
        })
        .unwrap_or_default();

    format!(
        r#"
      <article class="project">
        <div class="project__top">
          <div class="project__name">{name}</div>
          <span class="badge">{lang}</span>
        </div>
        <p class="project__desc">{desc}</p>
        <div class="project__meta">
          <span class="badge">★ {stars}</span>
          <span class="badge">Updated: {updated}</span>
        </div>
        <div class="project__links">
          <a class="btn" href="{html_url}" target="_blank" rel="noreferrer">View on GitHub</a>
          {live_btn}
        </div>
      </article>
    "#
    )
}

/// Renders the whole display list, or the empty-state message.
pub fn render_list(repos: &[Repository]) -> String {
    if repos.is_empty() {
        return EMPTY_STATE.to_string();
    }
    repos.iter().map(repo_card).collect()
}

/// Message shown in place of the list when loading failed.
pub fn load_error(reason: &str) -> String {
    format!(
        r#"<p class="muted">Could not load projects from GitHub. ({})</p>"#,
        escape_html(reason)
    )
}

/// Wraps rendered projects in a standalone HTML document with the year
/// footer and the contact form markup.
pub fn render_document(projects_html: &str, year: &str, username: &str) -> String {
    let username = escape_html(username);
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{username} · Projects</title>
</head>
<body>
  <main>
    <section id="work">
      <h2>Projects</h2>
      <div class="controls">
        <input id="search" type="search" placeholder="Search projects" aria-label="Search projects">
        <select id="sort" aria-label="Sort projects">
          <option value="updated">Recently updated</option>
          <option value="stars">Most stars</option>
          <option value="name">Name</option>
        </select>
      </div>
      <div id="projects" class="projects">{projects_html}</div>
    </section>
    <section id="contact">
      <h2>Contact</h2>
      <form id="contactForm">
        <input name="name" type="text" placeholder="Your name" required>
        <input name="email" type="email" placeholder="Your email" required>
        <textarea name="message" placeholder="Message" required></textarea>
        <button class="btn" type="submit">Send</button>
        <p id="formStatus" class="muted" role="status"></p>
      </form>
    </section>
  </main>
  <footer>© <span id="year">{year}</span> {username}</footer>
</body>
</html>
"#
    )
}

/// Short en-US calendar date, e.g. `3/7/2024`.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%-m/%-d/%Y").to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
