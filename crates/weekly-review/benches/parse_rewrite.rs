use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use weekly_review_core::{Document, TemplateVersion};
use weekly_review_vault::replace_section;

const REPORT: &str = "\
## 今週のフォーカス
> 毎朝30分の読書

## デイリーログ
| 月 | 20ページ | 4/5 |
| 火 | 休み | 2/5 |
| 水 | 30ページ | 5/5 |
| 木 | 10ページ | 3/5 |
| 金 | 40ページ | 5/5 |

## KPT
- **Keep（続ける）**: 早起き
- **Problem（課題）**: 夜更かし
- **Try（来週試す）**: 23時就寝

## AIサマリ
前回の評価

## 年度目標
健康と学習
";

fn bench_summary(c: &mut Criterion) {
    c.bench_function("summary_current_report", |b| {
        b.iter(|| {
            let document = Document::new("2026-W02.md", black_box(REPORT));
            black_box(document.summary());
        });
    });
}

fn bench_template_detect(c: &mut Criterion) {
    c.bench_function("template_detect", |b| {
        b.iter(|| TemplateVersion::detect(black_box(REPORT)));
    });
}

fn bench_replace_section(c: &mut Criterion) {
    c.bench_function("replace_ai_summary", |b| {
        b.iter(|| replace_section(black_box(REPORT), "## AIサマリ", black_box("新しい評価")));
    });
}

criterion_group!(
    benches,
    bench_summary,
    bench_template_detect,
    bench_replace_section
);
criterion_main!(benches);
