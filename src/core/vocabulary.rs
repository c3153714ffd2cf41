//! Accepted surface forms for the intake extractor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceForms {
    pub name: &'static str,
    pub forms: &'static [&'static str],
}

pub const UNIT_MARKERS: &[SurfaceForms] = &[SurfaceForms {
    name: "gram",
    forms: &["g", "gram", "grams"],
}];

/// Spoken self-report phrases removed from the label wherever they occur.
pub const FILLER_PHRASES: &[SurfaceForms] = &[
    SurfaceForms {
        name: "self-report",
        forms: &["i ate", "i had", "i drank"],
    },
    SurfaceForms {
        name: "connective",
        forms: &["with"],
    },
    SurfaceForms {
        name: "substance",
        forms: &["of protein"],
    },
];

pub const LEADING_ARTICLES: &[SurfaceForms] = &[SurfaceForms {
    name: "article",
    forms: &["a", "an", "the"],
}];

pub const FALLBACK_LABEL: &str = "Voice Entry";

pub fn all_forms(classes: &[SurfaceForms]) -> impl Iterator<Item = &'static str> + '_ {
    classes.iter().flat_map(|class| class.forms.iter().copied())
}

/// Non-capturing alternation, longest form first.
pub fn alternation(classes: &[SurfaceForms]) -> String {
    let mut forms: Vec<&str> = all_forms(classes).collect();
    forms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    forms.dedup();

    let branches: Vec<String> = forms
        .iter()
        .map(|form| {
            form.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();

    format!("(?:{})", branches.join("|"))
}
