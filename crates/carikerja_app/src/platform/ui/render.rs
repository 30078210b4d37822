use std::fmt::Write;

use carikerja_core::{AppViewModel, JobDetailCard, JobDetailView, JobListView};
use chrono::{DateTime, NaiveDate};

use super::constants::*;

/// Renders the whole screen for `view`. The detail page replaces the
/// listing while it is open.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    match &view.detail {
        JobDetailView::Hidden => render_listing(&mut out, view),
        detail => render_detail(&mut out, detail),
    }
    out
}

fn render_listing(out: &mut String, view: &AppViewModel) {
    let category = view
        .selected_category_name
        .as_deref()
        .unwrap_or(LABEL_ALL_CATEGORIES);
    let status = if view.transitioning {
        format!(" ({})", LABEL_UPDATING)
    } else {
        String::new()
    };

    heading(out, TITLE_JOBS);
    let _ = writeln!(out, "{}: {}", LABEL_CATEGORY, category);
    if !view.search_text.is_empty() {
        let _ = writeln!(out, "{}: \"{}\"", LABEL_SEARCH, view.search_text);
    }
    if !view.categories.is_empty() {
        let options = view
            .categories
            .iter()
            .map(|option| {
                let marker = if option.selected { "*" } else { "" };
                format!("{}[{}] {}", marker, option.id, option.name)
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "  {}", options);
    }
    out.push('\n');

    match &view.job_list {
        JobListView::Loading => {
            let _ = writeln!(out, "{}", MSG_LOADING_JOBS);
        }
        JobListView::Empty => {
            let _ = writeln!(out, "{}", MSG_NO_RESULTS);
            let _ = writeln!(out, "{}", MSG_NO_RESULTS_HINT);
        }
        JobListView::Jobs(cards) => {
            let _ = writeln!(
                out,
                "{} / {} lowongan{}",
                view.visible_job_count, view.total_job_count, status
            );
            for (index, card) in cards.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {}", index + 1, card.title);
                let _ = writeln!(out, "     {}", card.subtitle);
                let tags = [card.job_type.as_deref(), card.category_name.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>();
                if !tags.is_empty() {
                    let _ = writeln!(out, "     [{}]", tags.join("] ["));
                }
                let _ = writeln!(out, "     {}", card.detail_path);
            }
        }
    }
    out.push('\n');

    heading(out, TITLE_ARTICLES);
    if view.articles.is_empty() {
        let _ = writeln!(out, "{}", MSG_NO_ARTICLES);
        return;
    }
    for article in &view.articles {
        let _ = writeln!(out, "- {}", article.title);
        if let Some(date) = article.date_posted.as_deref() {
            let _ = writeln!(out, "  {}", format_date(date));
        }
        if let Some(image) = article.image.as_deref() {
            let _ = writeln!(out, "  {}: {}", LABEL_IMAGE, image);
        }
        if !article.excerpt.is_empty() {
            let _ = writeln!(out, "  {}", article.excerpt);
        }
        let _ = writeln!(out, "  {}", article.detail_path);
    }
}

fn render_detail(out: &mut String, detail: &JobDetailView) {
    match detail {
        JobDetailView::Hidden => {}
        JobDetailView::Loading { slug } => {
            let _ = writeln!(out, "{} ({})", MSG_LOADING_DETAIL, slug);
        }
        JobDetailView::NotFound { slug } => {
            let _ = writeln!(out, "{} ({})", MSG_JOB_NOT_FOUND, slug);
        }
        JobDetailView::Unavailable { slug } => {
            let _ = writeln!(out, "{} ({})", MSG_DETAIL_UNAVAILABLE, slug);
        }
        JobDetailView::Ready(card) => render_card(out, card),
    }
    let _ = writeln!(out, "\n[back] {}", LABEL_BACK);
}

fn render_card(out: &mut String, card: &JobDetailCard) {
    heading(out, &card.title);
    let _ = writeln!(out, "{}", card.company);
    let facts = [
        Some(card.location.as_str()).filter(|value| !value.is_empty()),
        Some(card.job_type.as_str()).filter(|value| !value.is_empty()),
        card.category_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(" • "));
    }
    if let Some(date) = card.date_posted.as_deref() {
        let _ = writeln!(out, "{}: {}", LABEL_POSTED, format_date(date));
    }
    if let Some(poster) = card.poster.as_deref() {
        let _ = writeln!(out, "{}: {}", LABEL_POSTER, poster);
        if card.extra_posters > 0 {
            let _ = writeln!(out, "  (+{} {})", card.extra_posters, LABEL_MORE_POSTERS);
        }
    }
    out.push('\n');

    let description = card.description.trim();
    if description.is_empty() {
        let _ = writeln!(out, "{}", MSG_NO_DESCRIPTION);
    } else {
        let _ = writeln!(out, "{}", description);
    }

    if let Some(link) = card.apply_link.as_deref() {
        let _ = writeln!(out, "\n{}: {}", LABEL_APPLY, link);
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH.min(title.chars().count().max(1))));
}

/// Formats a stored date as `d/m/yyyy`; unparseable input is shown as-is.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%-d/%-m/%Y").to_string();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.date_naive().format("%-d/%-m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
