use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, anyhow, bail};
use regex::Regex;

use crate::contest::{Contest, Task, Test};

use super::{Fetched, Platform, decode_entities, http_get, pre_to_text};

const HOST: &str = "https://atcoder.jp";

pub struct AtCoder;

impl Platform for AtCoder {
    fn accepts(&self, url: &str) -> bool {
        normalize_url(url).is_some()
    }

    fn fetch_contest(&self, url: &str, root_dir: &Path) -> Result<Contest> {
        let link = normalize_url(url)
            .ok_or_else(|| anyhow!("not an atcoder contest url: {url}"))?;
        let html = http_get(&format!("{link}/tasks"))?;
        parse_tasks_page(&html, &link, root_dir)
    }

    fn fetch_tests(&self, task: &Task) -> Result<Fetched> {
        let html = http_get(&task.link)?;
        parse_statement_page(&html)
    }
}

/// Normalizes a contest URL to `https://atcoder.jp/contests/<id>`.
fn normalize_url(url: &str) -> Option<String> {
    let re = Regex::new(r"^https?://atcoder\.jp/contests/([A-Za-z0-9_-]+)")
        .expect("contest url pattern");
    let id = re.captures(url)?.get(1)?.as_str().to_string();
    Some(format!("{HOST}/contests/{id}"))
}

/// The assignments table links each task twice with the same href: once
/// from the token cell and once from the title cell. Pairing consecutive
/// anchors by href recovers both.
fn parse_tasks_page(html: &str, link: &str, root_dir: &Path) -> Result<Contest> {
    let title_re =
        Regex::new(r"(?s)<title>\s*(?:[^<-]*-\s*)?([^<]+?)\s*</title>").expect("title pattern");
    let name = title_re
        .captures(html)
        .map(|caps| decode_entities(caps[1].trim()))
        .ok_or_else(|| anyhow!("unable to detect contest name"))?;

    let anchor_re = Regex::new(r#"<a href="(/contests/[^"/]+/tasks/[^"/]+)"[^>]*>([^<]+)</a>"#)
        .expect("task anchor pattern");

    let mut texts_by_href: Vec<(String, Vec<String>)> = Vec::new();
    for caps in anchor_re.captures_iter(html) {
        let href = caps[1].to_string();
        let text = decode_entities(caps[2].trim());
        match texts_by_href.iter_mut().find(|(h, _)| *h == href) {
            Some((_, texts)) => texts.push(text),
            None => texts_by_href.push((href, vec![text])),
        }
    }

    let mut tasks = BTreeMap::new();
    for (href, texts) in texts_by_href {
        let [token_text, name_text, ..] = texts.as_slice() else {
            log::warn!("unable to find name of task at {href}, skipping the row");
            continue;
        };
        let token = token_text.to_lowercase();
        tasks.insert(
            token.clone(),
            Task::new(format!("{HOST}{href}"), name_text.clone(), token),
        );
    }

    Ok(Contest {
        link: link.to_string(),
        name,
        tasks,
        root_dir: root_dir.to_path_buf(),
    })
}

/// Sample blocks are titled "Sample Input N" / "Sample Output N"; they
/// are paired by N in order of first appearance. A sample missing its
/// output is skipped with a warning.
fn parse_statement_page(html: &str) -> Result<Fetched> {
    let section_re =
        Regex::new(r#"(?s)<h3>\s*Sample (Input|Output)\s+(\d+)\s*</h3>\s*<pre[^>]*>(.*?)</pre>"#)
            .expect("sample section pattern");

    let mut inputs = BTreeMap::new();
    let mut outputs = BTreeMap::new();
    let mut id_order: Vec<u32> = Vec::new();
    let mut fetched = Fetched::default();

    for caps in section_re.captures_iter(html) {
        let Ok(id) = caps[2].parse::<u32>() else {
            fetched
                .warnings
                .push(format!("can't parse sample id from header '{}'", &caps[2]));
            continue;
        };
        let text = pre_to_text(&caps[3]);
        match &caps[1] {
            "Input" => {
                inputs.insert(id, text);
            }
            _ => {
                outputs.insert(id, text);
            }
        }
        if !id_order.contains(&id) {
            id_order.push(id);
        }
    }

    for id in id_order {
        let Some(input) = inputs.get(&id) else {
            fetched
                .warnings
                .push(format!("no input for sample {id}, ignoring the sample"));
            continue;
        };
        let Some(output) = outputs.get(&id) else {
            fetched
                .warnings
                .push(format!("no output for sample {id}, ignoring the sample"));
            continue;
        };
        fetched.tests.push(Test {
            token: format!("sample{id}"),
            input: input.clone(),
            output: output.clone(),
        });
    }

    if fetched.tests.is_empty() {
        bail!("tests are not found");
    }
    Ok(fetched)
}
