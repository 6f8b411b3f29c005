pub mod atcoder;
pub mod codeforces;

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::contest::{Contest, Task, Test};

/// Sample tests extracted from a task page. Rows that could not be
/// parsed are skipped and reported here out-of-band, so a half-broken
/// page still yields the samples it does contain.
#[derive(Debug, Default)]
pub struct Fetched {
    pub tests: Vec<Test>,
    pub warnings: Vec<String>,
}

/// A contest platform the tool can scrape. Adapters produce plain
/// `Contest`/`Task`/`Test` records; the pipeline never sees a page.
pub trait Platform {
    fn accepts(&self, url: &str) -> bool;
    fn fetch_contest(&self, url: &str, root_dir: &Path) -> Result<Contest>;
    fn fetch_tests(&self, task: &Task) -> Result<Fetched>;
}

/// Finds the first registered platform that accepts the URL.
pub fn find(url: &str) -> Option<Box<dyn Platform>> {
    let registered: Vec<Box<dyn Platform>> = vec![
        Box::new(codeforces::Codeforces),
        Box::new(atcoder::AtCoder),
    ];
    registered.into_iter().find(|platform| platform.accepts(url))
}

pub(crate) fn http_get(url: &str) -> Result<String> {
    let response =
        reqwest::blocking::get(url).with_context(|| format!("failed to fetch {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("request to {url} returned status {status}");
    }
    response
        .text()
        .with_context(|| format!("failed to read response body of {url}"))
}

/// Converts the inner HTML of a `<pre>` block into plain sample text:
/// explicit line breaks become newlines, remaining markup is dropped and
/// entities are decoded.
pub(crate) fn pre_to_text(html: &str) -> String {
    let breaks = regex::Regex::new(r"<br\s*/?>|</div>").expect("line break pattern");
    let tags = regex::Regex::new(r"<[^>]+>").expect("tag pattern");
    let text = breaks.replace_all(html, "\n");
    let text = tags.replace_all(&text, "");
    let mut text = decode_entities(&text);
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
