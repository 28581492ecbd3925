//! Section extraction across both templates

use crate::template::{section_end, BodyShape, SectionSpec, TemplateVersion};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Named section bodies of one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sections {
    bodies: BTreeMap<String, String>,
}

impl Sections {
    /// Split `text` into named sections.
    ///
    /// Current-template patterns run first, then legacy ones. The first body
    /// found for a name is kept. Legacy aliases fill a canonical name only
    /// when nothing produced it already.
    pub fn extract(text: &str) -> Self {
        let mut bodies = BTreeMap::new();

        for version in [TemplateVersion::Current, TemplateVersion::Legacy] {
            let descriptor = version.descriptor();
            for (spec, matcher) in descriptor.specs() {
                if bodies.contains_key(spec.name) {
                    continue;
                }
                if let Some(body) = extract_body(text, spec, matcher) {
                    bodies.insert(spec.name.to_string(), body);
                }
            }

            for (from, to) in descriptor.aliases {
                if bodies.contains_key(*to) {
                    continue;
                }
                if let Some(body) = bodies.get(*from).cloned() {
                    bodies.insert(to.to_string(), body);
                }
            }
        }

        Self { bodies }
    }

    /// Body for `name`, or empty when the section is absent
    pub fn get(&self, name: &str) -> &str {
        self.bodies.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn extract_body(text: &str, spec: &SectionSpec, matcher: &Regex) -> Option<String> {
    let heading = matcher.find(text)?;

    let start = match text[heading.end()..].strip_prefix('\n') {
        Some(_) => heading.end() + 1,
        None => text.len(),
    };
    let end = section_end(text, start, spec.boundaries);
    let raw = &text[start..end];

    match spec.shape {
        BodyShape::Plain => Some(raw.trim().to_string()),
        BodyShape::Blockquote => unquote(raw),
    }
}

/// Body from the first quoted line on, with `>` markers stripped
fn unquote(raw: &str) -> Option<String> {
    let first = raw.lines().position(|l| l.trim_start().starts_with('>'))?;

    let lines: Vec<&str> = raw
        .lines()
        .skip(first)
        .map(|line| match line.trim_start().strip_prefix('>') {
            Some(quoted) => quoted.strip_prefix(' ').unwrap_or(quoted),
            None => line,
        })
        .collect();

    Some(lines.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_DOC: &str = "# 2026-W02

## 今週のフォーカス（1つだけ）
> 英語の学習習慣を作る

## デイリーログ
| 曜日 | やったこと | 気分 |
|---|---|---|
| 月 | 単語アプリ | 4/5 |

## KPT
- **Keep（続ける）**: 朝の学習

## AIサマリ

---
footer
";

    const LEGACY_DOC: &str = "■今週自分が得たい結果
資格の勉強を進める

■今週のToDo
- [x] 問題集
- [ ] 模試

■AIからの総括（振り返り）
前回の総括

▼2026年度目標（変動あり）
合格する
";

    #[test]
    fn test_extract_current_sections() {
        let sections = Sections::extract(CURRENT_DOC);
        assert_eq!(sections.get("focus"), "英語の学習習慣を作る");
        assert!(sections.get("daily_log").contains("| 月 | 単語アプリ | 4/5 |"));
        assert_eq!(sections.get("kpt"), "- **Keep（続ける）**: 朝の学習");
    }

    #[test]
    fn test_empty_section_is_present_not_missing() {
        let sections = Sections::extract(CURRENT_DOC);
        assert!(sections.contains("ai_summary"));
        assert_eq!(sections.get("ai_summary"), "");
    }

    #[test]
    fn test_missing_section_reads_as_empty() {
        let sections = Sections::extract(CURRENT_DOC);
        assert!(!sections.contains("reflection"));
        assert_eq!(sections.get("reflection"), "");
    }

    #[test]
    fn test_extract_legacy_sections_and_aliases() {
        let sections = Sections::extract(LEGACY_DOC);
        assert_eq!(sections.get("desired_results"), "資格の勉強を進める");
        assert_eq!(sections.get("todos"), "- [x] 問題集\n- [ ] 模試");
        assert_eq!(sections.get("ai_summary_v1"), "前回の総括");
        assert_eq!(sections.get("ai_summary"), "前回の総括");
        assert_eq!(sections.get("annual_goals"), "合格する");
    }

    #[test]
    fn test_alias_does_not_override_canonical() {
        let text = "■AIからの総括（振り返り）\n古い\n\n## AIサマリ\n新しい\n";
        let sections = Sections::extract(text);
        assert_eq!(sections.get("ai_summary"), "新しい");
        assert!(sections.get("ai_summary_v1").starts_with("古い"));
    }

    #[test]
    fn test_empty_section_does_not_swallow_next_heading() {
        let text = "## KPT\n## AIサマリ\nsummary\n";
        let sections = Sections::extract(text);
        assert_eq!(sections.get("kpt"), "");
        assert_eq!(sections.get("ai_summary"), "summary");
    }

    #[test]
    fn test_first_match_wins() {
        let text = "## KPT\nfirst\n## KPT\nsecond\n";
        assert_eq!(Sections::extract(text).get("kpt"), "first");
    }

    #[test]
    fn test_focus_without_quote_is_absent() {
        let text = "## 今週のフォーカス\nplain text\n## KPT\n";
        let sections = Sections::extract(text);
        assert!(!sections.contains("focus"));
    }

    #[test]
    fn test_focus_multiline_quote() {
        let text = "## 今週のフォーカス\n> 一行目\n> 二行目\n\n## KPT\n";
        assert_eq!(Sections::extract(text).get("focus"), "一行目\n二行目");
    }

    #[test]
    fn test_heading_at_end_of_text() {
        let sections = Sections::extract("intro\n## AIサマリ");
        assert_eq!(sections.get("ai_summary"), "");
        assert!(sections.contains("ai_summary"));
    }
}
