use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

pub type JobId = i64;
pub type ArticleId = i64;

/// Category identifier. The store may hand these out as numbers or strings,
/// so they are kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for CategoryId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(text) => Self(text),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Joined `categories(name)` expansion on a job row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_type: String,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub apply_link: Option<String>,
    #[serde(default, rename = "poster_url", deserialize_with = "poster_list")]
    pub posters: Vec<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default, rename = "categories")]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Job {
    /// Route of the detail page. Slugs are the public lookup key; rows
    /// without one fall back to the numeric id.
    pub fn detail_path(&self) -> String {
        if self.slug.is_empty() {
            format!("/job/{}", self.id)
        } else {
            format!("/job/{}", self.slug)
        }
    }

    pub fn apply_url(&self) -> Option<Url> {
        let link = self.apply_link.as_deref()?.trim();
        if link.is_empty() {
            return None;
        }
        Url::parse(link).ok()
    }

    pub fn primary_poster(&self) -> Option<&str> {
        self.posters.first().map(String::as_str)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
}

impl Article {
    pub fn detail_path(&self) -> String {
        format!("/article/{}", self.id)
    }
}

/// Remote collections tracked by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Jobs,
    Articles,
    JobDetail,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Collection::Categories => "categories",
            Collection::Jobs => "jobs",
            Collection::Articles => "articles",
            Collection::JobDetail => "job detail",
        };
        f.write_str(label)
    }
}

/// A remote fetch that failed, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Older rows store a single poster as a plain string.
fn poster_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPosters {
        Many(Vec<Option<String>>),
        One(String),
    }

    let posters = match Option::<RawPosters>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawPosters::One(single)) => vec![single],
        Some(RawPosters::Many(many)) => many.into_iter().flatten().collect(),
    };
    Ok(posters
        .into_iter()
        .filter(|poster| !poster.trim().is_empty())
        .collect())
}
