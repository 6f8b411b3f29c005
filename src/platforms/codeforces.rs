use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, anyhow, bail};
use regex::Regex;

use crate::contest::{Contest, Task, Test};

use super::{Fetched, Platform, decode_entities, http_get, pre_to_text};

const HOST: &str = "https://codeforces.com";

pub struct Codeforces;

impl Platform for Codeforces {
    fn accepts(&self, url: &str) -> bool {
        normalize_url(url).is_some()
    }

    fn fetch_contest(&self, url: &str, root_dir: &Path) -> Result<Contest> {
        let link = normalize_url(url)
            .ok_or_else(|| anyhow!("not a codeforces contest url: {url}"))?;
        let html = http_get(&link)?;
        parse_contest_page(&html, &link, root_dir)
    }

    fn fetch_tests(&self, task: &Task) -> Result<Fetched> {
        let html = http_get(&task.link)?;
        parse_task_page(&html)
    }
}

/// Normalizes a contest URL to `https://codeforces.com/contest/<id>`,
/// pinned to the English locale so scraped markup is reproducible.
fn normalize_url(url: &str) -> Option<String> {
    let re = Regex::new(r"^https?://(?:[a-z0-9-]+\.)*codeforces\.com/contest/(\d+)")
        .expect("contest url pattern");
    let id = re.captures(url)?.get(1)?.as_str().to_string();
    Some(format!("{HOST}/contest/{id}?locale=en"))
}

fn parse_contest_page(html: &str, link: &str, root_dir: &Path) -> Result<Contest> {
    let title_re = Regex::new(r#"(?s)<table class="rtable[^"]*">.*?<a[^>]*>([^<]+)</a>"#)
        .expect("contest title pattern");
    let name = title_re
        .captures(html)
        .map(|caps| decode_entities(caps[1].trim()))
        .ok_or_else(|| anyhow!("unable to detect contest name"))?;

    let id_cell_re = Regex::new(r#"(?s)<td class="id">\s*<a href="([^"]+)">\s*([^<\s]+)"#)
        .expect("problem id pattern");

    let mut tasks = BTreeMap::new();
    for caps in id_cell_re.captures_iter(html) {
        let href = caps[1].to_string();
        let token = caps[2].trim().to_lowercase();
        let rest = &html[caps.get(0).map_or(0, |m| m.end())..];
        let Some(task_name) = find_problem_name(rest, &href) else {
            log::warn!("unable to find name of problem '{token}', skipping the row");
            continue;
        };
        tasks.insert(
            token.clone(),
            Task::new(format!("{HOST}{href}?locale=en"), task_name, token),
        );
    }

    Ok(Contest {
        link: link.to_string(),
        name,
        tasks,
        root_dir: root_dir.to_path_buf(),
    })
}

/// The problem name lives in the next cell, in another anchor pointing
/// at the same problem href.
fn find_problem_name(html_after_id_cell: &str, href: &str) -> Option<String> {
    let name_re = Regex::new(&format!(
        r#"(?s)<a href="{}"[^>]*>(.*?)</a>"#,
        regex::escape(href)
    ))
    .expect("problem name pattern");
    let caps = name_re.captures(html_after_id_cell)?;
    let tags = Regex::new(r"<[^>]+>").expect("tag pattern");
    let name = decode_entities(tags.replace_all(&caps[1], "").trim());
    if name.is_empty() { None } else { Some(name) }
}

fn parse_task_page(html: &str) -> Result<Fetched> {
    let input_re = Regex::new(r#"(?s)<div class="input">.*?<pre[^>]*>(.*?)</pre>"#)
        .expect("sample input pattern");
    let output_re = Regex::new(r#"(?s)<div class="output">.*?<pre[^>]*>(.*?)</pre>"#)
        .expect("sample output pattern");

    let inputs: Vec<String> = input_re
        .captures_iter(html)
        .map(|caps| pre_to_text(&caps[1]))
        .collect();
    let outputs: Vec<String> = output_re
        .captures_iter(html)
        .map(|caps| pre_to_text(&caps[1]))
        .collect();

    let mut fetched = Fetched::default();
    for (idx, input) in inputs.iter().enumerate() {
        let id = idx + 1;
        let Some(output) = outputs.get(idx) else {
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
    if outputs.len() > inputs.len() {
        fetched.warnings.push(format!(
            "{} output block(s) without a matching input",
            outputs.len() - inputs.len()
        ));
    }

    if fetched.tests.is_empty() {
        bail!("no valid sample tests were found");
    }
    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn contest_urls_are_normalized() {
        assert_eq!(
            normalize_url("http://codeforces.com/contest/100/"),
            Some("https://codeforces.com/contest/100?locale=en".to_string())
        );
        assert_eq!(
            normalize_url("https://www.codeforces.com/contest/42?list=a"),
            Some("https://codeforces.com/contest/42?locale=en".to_string())
        );
        assert_eq!(normalize_url("https://codeforces.com/problemset"), None);
        assert_eq!(normalize_url("https://example.com/contest/1"), None);
    }

    const CONTEST_HTML: &str = r#"
        <div id="sidebar"><table class="rtable">
          <tr><th><a href="/contest/1">Example Round #1</a></th></tr>
        </table></div>
        <table class="problems">
          <tr><th>#</th><th>Name</th></tr>
          <tr>
            <td class="id"> <a href="/contest/1/problem/A">A</a></td>
            <td><div><a href="/contest/1/problem/A">Theatre Square</a></div></td>
          </tr>
          <tr>
            <td class="id"> <a href="/contest/1/problem/B">B</a></td>
            <td><div><a href="/contest/1/problem/B">Spreadsheets</a></div></td>
          </tr>
        </table>
    "#;

    #[test]
    fn contest_page_yields_tokenized_tasks() {
        let contest =
            parse_contest_page(CONTEST_HTML, "https://codeforces.com/contest/1?locale=en", Path::new("/tmp/c1"))
                .unwrap();
        assert_eq!(contest.name, "Example Round #1");
        assert_eq!(contest.tasks.len(), 2);
        let task = &contest.tasks["a"];
        assert_eq!(task.name, "Theatre Square");
        assert_eq!(
            task.link,
            "https://codeforces.com/contest/1/problem/A?locale=en"
        );
        assert!(task.test_tokens.is_empty());
    }

    const TASK_HTML: &str = r#"
        <div class="sample-tests">
          <div class="sample-test">
            <div class="input"><div class="title">Input</div>
              <pre>2 2<br/>1 1</pre></div>
            <div class="output"><div class="title">Output</div>
              <pre>4</pre></div>
            <div class="input"><div class="title">Input</div>
              <pre>3 &lt; 5</pre></div>
            <div class="output"><div class="title">Output</div>
              <pre>yes</pre></div>
          </div>
        </div>
    "#;

    #[test]
    fn task_page_yields_ordered_samples() {
        let fetched = parse_task_page(TASK_HTML).unwrap();
        assert!(fetched.warnings.is_empty());
        assert_eq!(fetched.tests.len(), 2);
        assert_eq!(fetched.tests[0].token, "sample1");
        assert_eq!(fetched.tests[0].input, "2 2\n1 1\n");
        assert_eq!(fetched.tests[0].output, "4\n");
        assert_eq!(fetched.tests[1].input, "3 < 5\n");
    }

    #[test]
    fn unmatched_input_is_a_warning_not_an_error() {
        let html = r#"
            <div class="input"><pre>1</pre></div>
            <div class="output"><pre>2</pre></div>
            <div class="input"><pre>3</pre></div>
        "#;
        let fetched = parse_task_page(html).unwrap();
        assert_eq!(fetched.tests.len(), 1);
        assert_eq!(fetched.warnings.len(), 1);
    }

    #[test]
    fn page_without_samples_is_an_error() {
        assert!(parse_task_page("<html></html>").is_err());
    }
}
