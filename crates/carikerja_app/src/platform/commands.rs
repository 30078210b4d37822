//! Line commands typed into the terminal.

use carikerja_core::{Category, CategoryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Category(String),
    Job(String),
    Back,
    Reload,
    Help,
    Quit,
    /// Blank line: redraw.
    Redraw,
}

pub const HELP: &str = "\
Perintah:
  search <teks>       cari judul, perusahaan, lokasi, atau tipe (teks biasa juga bisa)
  category <id|nama>  filter kategori; `category all` untuk semua
  job <slug>          buka detail lowongan
  back                kembali ke daftar
  reload              muat ulang semua data
  help                tampilkan bantuan
  quit                keluar";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Command::Redraw;
    }

    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" | "cari" => Command::Search(rest.to_string()),
        "category" | "kategori" => Command::Category(rest.trim().to_string()),
        "job" | "lowongan" => Command::Job(rest.trim().to_string()),
        "back" | "kembali" if rest.trim().is_empty() => Command::Back,
        "reload" if rest.trim().is_empty() => Command::Reload,
        "help" | "?" if rest.trim().is_empty() => Command::Help,
        "quit" | "exit" | "keluar" if rest.trim().is_empty() => Command::Quit,
        _ => Command::Search(line.to_string()),
    }
}

/// Resolves a typed category against the loaded list.
///
/// `Some(None)` selects every category, `None` means nothing matched.
pub fn resolve_category(choice: &str, categories: &[Category]) -> Option<Option<CategoryId>> {
    let choice = choice.trim();
    if choice.is_empty() || choice.eq_ignore_ascii_case("all") || choice.eq_ignore_ascii_case("semua")
    {
        return Some(None);
    }
    categories
        .iter()
        .find(|category| category.id.as_str() == choice)
        .or_else(|| {
            let folded = choice.to_lowercase();
            categories
                .iter()
                .find(|category| category.name.to_lowercase() == folded)
        })
        .map(|category| Some(category.id.clone()))
}
