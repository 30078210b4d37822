pub const TITLE_JOBS: &str = "Lowongan Kerja Terbaru";
pub const TITLE_ARTICLES: &str = "Artikel Terbaru";
pub const LABEL_ALL_CATEGORIES: &str = "Semua Kategori";
pub const LABEL_CATEGORY: &str = "Kategori";
pub const LABEL_SEARCH: &str = "Cari";
pub const LABEL_APPLY: &str = "Lamar Sekarang";
pub const LABEL_BACK: &str = "Kembali";
pub const LABEL_POSTED: &str = "Diposting";
pub const LABEL_UPDATING: &str = "memperbarui...";
pub const LABEL_POSTER: &str = "Poster";
pub const LABEL_MORE_POSTERS: &str = "poster lainnya";
pub const LABEL_IMAGE: &str = "Gambar";

pub const MSG_LOADING_JOBS: &str = "Memuat data lowongan...";
pub const MSG_NO_RESULTS: &str = "Tidak ada hasil yang cocok";
pub const MSG_NO_RESULTS_HINT: &str =
    "Coba gunakan kata kunci atau kategori lain untuk menemukan peluang baru.";
pub const MSG_NO_ARTICLES: &str = "Belum ada artikel.";
pub const MSG_LOADING_DETAIL: &str = "Memuat detail lowongan...";
pub const MSG_JOB_NOT_FOUND: &str = "Lowongan tidak ditemukan.";
pub const MSG_DETAIL_UNAVAILABLE: &str = "Detail lowongan gagal dimuat. Coba lagi nanti.";
pub const MSG_NO_DESCRIPTION: &str = "Tidak ada deskripsi.";

pub const PROMPT: &str = "> ";
pub const RULE_WIDTH: usize = 60;
