use crate::Job;

/// Free-text search over the listing fields of each job.
///
/// A job is visible when `title company location job_type`, joined by single
/// spaces and lower-cased, contains the lower-cased search text. An empty
/// search keeps every job. Input order is preserved.
pub fn derive_visible_jobs<'a>(jobs: &'a [Job], search: &str) -> Vec<&'a Job> {
    let needle = search.to_lowercase();
    jobs.iter().filter(|job| matches_folded(job, &needle)).collect()
}

/// Whether `job` would stay visible for `search`, ignoring case.
pub fn job_matches(job: &Job, search: &str) -> bool {
    matches_folded(job, &search.to_lowercase())
}

fn matches_folded(job: &Job, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    search_haystack(job).contains(needle)
}

fn search_haystack(job: &Job) -> String {
    [
        job.title.as_str(),
        job.company.as_str(),
        job.location.as_str(),
        job.job_type.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}
