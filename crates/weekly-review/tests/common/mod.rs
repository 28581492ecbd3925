#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const CURRENT_REPORT: &str = "\
# 2026-W02

## 今週のフォーカス
> 毎朝30分の読書

## デイリーログ
| 曜日 | 内容 | 気分 |
|---|---|---|
| 月 | 20ページ | 4/5 |
| 火 | 休み | 2/5 |
| 水 | 30ページ | 5/5 |

## 振り返り（4つの質問）
1. 何がうまくいった？ 朝の時間を確保できた

## KPT
- **Keep（続ける）**: 早起き
- **Problem（課題）**: 夜更かし
- **Try（来週試す）**: 23時就寝

## AIサマリ

## 年度目標
健康と学習
";

pub const LEGACY_REPORT: &str = "\
■今週自分が得たい結果
転職準備を進める

■今週のToDo
- [x] 履歴書を書く
- [ ] 面接練習
- [X] 求人を3件見る

■今週やったこと ＆ 気づき
履歴書が完成した

■AIからの総括（振り返り）
---
▼2026年度目標
転職する
";

/// Write `content` to `dir/name` and return the path
pub fn write_report(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
