//! Preset curriculum: the fixed category/item lists every new unit is
//! expanded from.

use crate::domain::Subject;

/// One category of study material and its items, in workbook order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetCategory {
    pub category: &'static str,
    pub items: &'static [&'static str],
}

const MATH: &[PresetCategory] = &[
    PresetCategory { category: "予習シリーズ", items: &["類題", "基本問題", "練習問題"] },
    PresetCategory { category: "演習問題集", items: &["基本問題", "練習問題", "トレーニング", "実戦演習"] },
    PresetCategory { category: "計算", items: &["①", "②", "③", "④", "⑤", "⑥", "⑦"] },
    PresetCategory {
        category: "プリント",
        items: &["ミニテスト STANDARD", "ミニテスト ADVANCE", "基礎力強化プリント"],
    },
];

const JAPANESE: &[PresetCategory] = &[
    PresetCategory { category: "予習シリーズ", items: &["基本問題", "発展問題", "言語知識"] },
    PresetCategory { category: "漢字とことば", items: &["漢字練習", "漢字確認", "ことば"] },
    PresetCategory { category: "演習問題集", items: &["演習問題集"] },
    PresetCategory { category: "プリント", items: &["漢字", "ことば"] },
];

const SCIENCE: &[PresetCategory] = &[
    PresetCategory { category: "予習シリーズ", items: &["要点チェック"] },
    PresetCategory { category: "演習問題集", items: &["まとめてみよう", "練習問題", "発展問題"] },
    PresetCategory { category: "練成問題集", items: &["トレーニング", "基本問題", "練習問題"] },
    PresetCategory {
        category: "プリント",
        items: &["確認テスト", "まとめプリント 穴埋め編", "まとめプリント まとめプリント"],
    },
];

const SOCIAL: &[PresetCategory] = &[
    PresetCategory { category: "予習シリーズ", items: &["要点チェック"] },
    PresetCategory { category: "演習問題集", items: &["まとめてみよう", "練習問題", "発展問題"] },
    PresetCategory { category: "練成問題集", items: &["トレーニング", "基本問題", "練習問題"] },
    PresetCategory { category: "プリント", items: &["確認テスト", "ジャンプアップ問題"] },
];

/// Preset categories for a subject
pub fn presets(subject: Subject) -> &'static [PresetCategory] {
    match subject {
        Subject::Math => MATH,
        Subject::Japanese => JAPANESE,
        Subject::Science => SCIENCE,
        Subject::Social => SOCIAL,
    }
}

/// Every (subject, category, item) triple in catalog order
pub fn entries() -> impl Iterator<Item = (Subject, &'static str, &'static str)> {
    Subject::all().iter().flat_map(|&subject| {
        presets(subject).iter().flat_map(move |preset| {
            preset
                .items
                .iter()
                .map(move |&item| (subject, preset.category, item))
        })
    })
}

/// Number of tasks one unit expands into
pub fn item_count() -> usize {
    Subject::all()
        .iter()
        .map(|&subject| presets(subject).iter().map(|p| p.items.len()).sum::<usize>())
        .sum()
}
