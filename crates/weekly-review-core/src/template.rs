//! Template descriptors for the two known weekly report layouts
//!
//! Each layout is described as data: an ordered table of sections, each with a
//! heading matcher and the markers that end its body. Supporting another
//! layout means adding another table, not another branch.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which weekly report layout a document follows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVersion {
    /// `■`-prefixed headings (v1)
    #[default]
    Legacy,
    /// `##`-prefixed headings (v2)
    Current,
}

impl TemplateVersion {
    /// Detect the layout from content. The current marker heading wins even
    /// when legacy markers appear alongside it, but only as a heading line.
    pub fn detect(text: &str) -> Self {
        if find_heading_line(text, CURRENT.ai_summary_heading).is_some() {
            TemplateVersion::Current
        } else {
            TemplateVersion::Legacy
        }
    }

    pub fn descriptor(self) -> &'static TemplateDescriptor {
        match self {
            TemplateVersion::Current => &CURRENT,
            TemplateVersion::Legacy => &LEGACY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateVersion::Current => "current",
            TemplateVersion::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a section body is read once its span is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Body taken verbatim (then trimmed)
    Plain,
    /// Body starts at the first `>` line; quote markers are stripped
    Blockquote,
}

/// One named section of a template
#[derive(Debug)]
pub struct SectionSpec {
    pub name: &'static str,
    /// Regex matched against a whole heading line
    pub heading: &'static str,
    /// Line prefixes that end the body
    pub boundaries: &'static [&'static str],
    pub shape: BodyShape,
}

/// Data table describing one template
#[derive(Debug)]
pub struct TemplateDescriptor {
    pub version: TemplateVersion,
    /// Heading of the AI summary section, also the layout discriminator
    pub ai_summary_heading: &'static str,
    /// Heading for notes carried over from the previous week, if supported
    pub carryover_heading: Option<&'static str>,
    /// Line prefixes that end a section being rewritten
    pub rewrite_boundaries: &'static [&'static str],
    pub sections: &'static [SectionSpec],
    /// `(template-specific name, canonical name)` pairs
    pub aliases: &'static [(&'static str, &'static str)],
}

const H2: &[&str] = &["##"];
const LEGACY_MARKERS: &[&str] = &["■", "▼"];

pub static CURRENT: TemplateDescriptor = TemplateDescriptor {
    version: TemplateVersion::Current,
    ai_summary_heading: "## AIサマリ",
    carryover_heading: Some("## 前週からの引き継ぎ"),
    rewrite_boundaries: &["##", "---"],
    sections: &[
        SectionSpec {
            name: "focus",
            heading: r"^## 今週のフォーカス.*$",
            boundaries: H2,
            shape: BodyShape::Blockquote,
        },
        SectionSpec {
            name: "daily_log",
            heading: r"^## デイリーログ[ \t\r]*$",
            boundaries: H2,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "reflection",
            heading: r"^## 振り返り.*$",
            boundaries: H2,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "kpt",
            heading: r"^## KPT[ \t\r]*$",
            boundaries: H2,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "prev_week",
            heading: r"^## 前週からの引き継ぎ[ \t\r]*$",
            boundaries: H2,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "ai_summary",
            heading: r"^## AIサマリ[ \t\r]*$",
            boundaries: &["##", "---"],
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "annual_goals",
            heading: r"^## 年度目標.*$",
            boundaries: H2,
            shape: BodyShape::Plain,
        },
    ],
    aliases: &[],
};

pub static LEGACY: TemplateDescriptor = TemplateDescriptor {
    version: TemplateVersion::Legacy,
    ai_summary_heading: "■AIからの総括（振り返り）",
    carryover_heading: None,
    rewrite_boundaries: &["■", "▼", "---"],
    sections: &[
        SectionSpec {
            name: "desired_results",
            heading: r"^■今週自分が得たい結果[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "todos",
            heading: r"^■今週のToDo[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "accomplishments",
            heading: r"^■今週やったこと ＆ 気づき[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "good_bad",
            heading: r"^■今週のGood / Bad[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "analysis",
            heading: r"^■上記の要因分析[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "ai_summary_v1",
            heading: r"^■AIからの総括（振り返り）[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "next_week_goals",
            heading: r"^■来週の目標[ \t\r]*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
        SectionSpec {
            name: "annual_goals_v1",
            heading: r"^▼\d{4}年度目標.*$",
            boundaries: LEGACY_MARKERS,
            shape: BodyShape::Plain,
        },
    ],
    aliases: &[("ai_summary_v1", "ai_summary"), ("annual_goals_v1", "annual_goals")],
};

static CURRENT_MATCHERS: OnceLock<Vec<Regex>> = OnceLock::new();
static LEGACY_MATCHERS: OnceLock<Vec<Regex>> = OnceLock::new();

fn compile(sections: &[SectionSpec]) -> Vec<Regex> {
    sections
        .iter()
        .map(|s| Regex::new(&format!("(?m){}", s.heading)).unwrap())
        .collect()
}

impl TemplateDescriptor {
    /// Compiled heading matchers, index-aligned with `sections`
    pub fn matchers(&self) -> &'static [Regex] {
        match self.version {
            TemplateVersion::Current => CURRENT_MATCHERS.get_or_init(|| compile(CURRENT.sections)),
            TemplateVersion::Legacy => LEGACY_MATCHERS.get_or_init(|| compile(LEGACY.sections)),
        }
    }

    /// Sections paired with their compiled matchers
    pub fn specs(&'static self) -> impl Iterator<Item = (&'static SectionSpec, &'static Regex)> {
        self.sections.iter().zip(self.matchers().iter())
    }
}

/// Span of the first line holding exactly `heading`, allowing trailing
/// spaces, tabs and a carriage return. Returns the line start and the start
/// of the following line (or end of text).
pub fn find_heading_line(text: &str, heading: &str) -> Option<(usize, usize)> {
    text.match_indices(heading).find_map(|(i, _)| {
        if i > 0 && text.as_bytes()[i - 1] != b'\n' {
            return None;
        }
        let after = i + heading.len();
        let rest = &text[after..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        if !rest[..line_len].chars().all(|c| matches!(c, ' ' | '\t' | '\r')) {
            return None;
        }
        let next = (after + line_len + 1).min(text.len());
        Some((i, next))
    })
}

/// Find where a body starting at `start` ends: the first line beginning with
/// one of `markers`, or end of text. `start` must sit at a line start.
pub fn section_end(text: &str, start: usize, markers: &[&str]) -> usize {
    let rest = &text[start..];
    if markers.iter().any(|m| rest.starts_with(m)) {
        return start;
    }

    markers
        .iter()
        .filter_map(|m| rest.find(&format!("\n{}", m)))
        .min()
        .map_or(text.len(), |offset| start + offset)
}
