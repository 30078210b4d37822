//! PostgREST query strings for the listing tables.
//!
//! A [`Query`] renders to `{base}/rest/v1/{table}?select=..&{column}=eq.{value}&order=..&limit=..`.

use carikerja_core::CategoryId;
use url::Url;

use crate::{FailureKind, FetchError};

/// Columns shown on job cards plus the joined category name.
pub const JOB_LIST_COLUMNS: &str = "id,title,company,location,job_type,date_posted,apply_link,\
poster_url,category_id,slug,description,categories(name)";
/// Every job column plus the joined category name.
pub const JOB_DETAIL_COLUMNS: &str = "*,categories(name)";

const REST_PREFIX: [&str; 2] = ["rest", "v1"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<usize>,
}

impl Query {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    /// Equality filter on one column.
    pub fn eq(mut self, column: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.into(), format!("eq.{}", value.as_ref())));
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    pub fn limit(mut self, rows: usize) -> Self {
        self.limit = Some(rows);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, format!("{base} cannot be a base")))?
            .pop_if_empty()
            .extend(REST_PREFIX)
            .push(&self.table);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", &self.select);
            for (column, filter) in &self.filters {
                pairs.append_pair(column, filter);
            }
            if let Some((column, direction)) = &self.order {
                pairs.append_pair("order", &format!("{column}.{}", direction.as_str()));
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }
}

pub fn categories_query() -> Query {
    Query::from("categories").order("name", Direction::Ascending)
}

pub fn jobs_query(category: Option<&CategoryId>) -> Query {
    let query = Query::from("jobs")
        .select(JOB_LIST_COLUMNS)
        .order("id", Direction::Descending);
    match category {
        Some(category) => query.eq("category_id", category.as_str()),
        None => query,
    }
}

pub fn articles_query() -> Query {
    Query::from("articles").order("date_posted", Direction::Descending)
}

pub fn job_by_slug_query(slug: &str) -> Query {
    Query::from("jobs")
        .select(JOB_DETAIL_COLUMNS)
        .eq("slug", slug)
        .limit(1)
}
