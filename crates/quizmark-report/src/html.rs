//! HTML recap generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use quizmark_core::diff::{Segment, WordDiff};

use crate::recap::{RecapStatus, SessionRecap};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML recap.
pub fn generate_html(recap: &SessionRecap) -> String {
    let mut html = String::new();
    let summary = &recap.summary;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizmark recap: {}</title>\n",
        html_escape(&recap.quiz_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&recap.quiz_name)));
    html.push_str(&format!(
        "<p class=\"meta\">Session <code>{}</code> | started {} | updated {}</p>\n",
        recap.session_id,
        recap.started_at.format("%Y-%m-%d %H:%M UTC"),
        recap.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str("</header>\n");

    // Score
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&format!(
        "<p class=\"score\">{}/{} <span>({}%)</span></p>\n",
        summary.score, summary.total_graded, summary.percentage
    ));
    html.push_str(&format!(
        "<div class=\"progress\"><div class=\"bar\" style=\"width: {:.1}%\"></div></div>\n",
        recap.progress.percent
    ));
    html.push_str(&format!(
        "<p class=\"tier\">{} {}</p>\n",
        summary.tier.emoji(),
        html_escape(summary.tier.message())
    ));
    html.push_str("</section>\n");

    // Per-exercise results
    for exercise in &recap.exercises {
        html.push_str("<section class=\"exercise\">\n");
        let heading = if exercise.title.is_empty() {
            format!("Exercise {}", exercise.id)
        } else {
            format!("Exercise {}: {}", exercise.id, exercise.title)
        };
        html.push_str(&format!(
            "<h2>{} <span class=\"count\">{}/{}</span></h2>\n",
            html_escape(&heading),
            exercise.correct,
            exercise.graded
        ));
        html.push_str("<table>\n");
        html.push_str("<thead><tr><th>Question</th><th>Answer</th><th>Status</th></tr></thead>\n");
        html.push_str("<tbody>\n");

        for q in &exercise.questions {
            let class = match q.status {
                RecapStatus::Correct => "pass",
                RecapStatus::Incorrect => "fail",
                RecapStatus::NotGraded => "pending",
            };
            let answer = match &q.answer {
                None => "<em>no answer</em>".to_string(),
                Some(_) if !q.diff.is_empty() => render_diff_html(&q.diff),
                Some(answer) => html_escape(answer),
            };
            let expected = if q.status == RecapStatus::Incorrect {
                format!(
                    "<div class=\"expected\">expected: {}</div>",
                    html_escape(&q.expected)
                )
            } else {
                String::new()
            };
            html.push_str(&format!(
                "<tr class=\"{class}\"><td>{}</td><td>{answer}{expected}</td><td>{}</td></tr>\n",
                q.id,
                q.status.label()
            ));
        }

        html.push_str("</tbody></table>\n");
        html.push_str("<button class=\"reveal\" onclick=\"toggleAnswers(this)\">Show answers</button>\n");
        html.push_str("<ol class=\"answers\" hidden>\n");
        for q in &exercise.questions {
            html.push_str(&format!("<li>{}</li>\n", html_escape(&q.expected)));
        }
        html.push_str("</ol>\n");
        html.push_str("</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(recap)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML recap to a file.
pub fn write_html_report(recap: &SessionRecap, path: &Path) -> Result<()> {
    let html = generate_html(recap);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn render_diff_html(diff: &[WordDiff]) -> String {
    diff.iter()
        .map(|word| {
            word.segments
                .iter()
                .map(|segment| match segment {
                    Segment::Same(text) => html_escape(text),
                    Segment::Changed(text) if text.is_empty() => {
                        "<span class=\"diff-char\">_</span>".to_string()
                    }
                    Segment::Changed(text) => {
                        format!("<span class=\"diff-char\">{}</span>", html_escape(text))
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --bar: #22c55e; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --bar: #16a34a; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .count, .expected { color: #6b7280; }
.score { font-size: 2rem; font-weight: bold; margin: 0.5rem 0; }
.progress { height: 0.75rem; background: var(--border); border-radius: 999px; overflow: hidden; max-width: 32rem; }
.progress .bar { height: 100%; background: var(--bar); }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.diff-char { text-decoration: underline wavy #ef4444; font-weight: bold; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function toggleAnswers(button) {
  const list = button.nextElementSibling;
  list.hidden = !list.hidden;
  button.textContent = list.hidden ? 'Show answers' : 'Hide answers';
}
"#;
