use std::collections::HashSet;
use std::sync::Arc;

use appguide_core::types::{Category, Module};
use appguide_text::{escape_html, fold_case, local_matches, owning_module, snippet};

fn cat(id: i64, title: &str, parent: Option<i64>) -> Category {
    Category { id, title: Some(title.to_string()), name: None, label: None, parent_id: parent }
}

fn modules() -> Vec<Arc<Module>> {
    vec![
        Arc::new(Module {
            id: 1,
            name: "HR".into(),
            description: None,
            icon: None,
            categories: vec![cat(10, "Payroll", None), cat(11, "Payroll Forms", Some(10)), cat(12, "Leave", None)],
        }),
        Arc::new(Module {
            id: 2,
            name: "Finance".into(),
            description: Some("Money".into()),
            icon: None,
            categories: vec![cat(20, "Invoices", None), cat(21, "payroll exports", Some(20))],
        }),
    ]
}

#[test]
fn payroll_scenario_paths() {
    let mods = modules();
    let hits = local_matches(&mods[..1], "Payroll");
    let paths: Vec<_> = hits.iter().map(|h| h.path.as_str()).collect();
    assert_eq!(paths, vec!["Payroll", "Payroll > Payroll Forms"]);
    assert!(hits.iter().all(|h| h.module.id == 1));
}

#[test]
fn every_matching_category_appears_once_and_nothing_else() {
    let mods = modules();
    let hits = local_matches(&mods, "PAYROLL");
    let ids: Vec<_> = hits.iter().map(|h| h.category.id).collect();
    assert_eq!(ids, vec![10, 11, 21], "module order, then category order");
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    for m in &mods {
        for c in &m.categories {
            let contains = c.display_title().to_lowercase().contains("payroll");
            assert_eq!(contains, ids.contains(&c.id), "category {}", c.id);
        }
    }
    assert_eq!(hits[2].path, "Invoices > payroll exports");
}

#[test]
fn empty_query_or_no_modules_yield_nothing() {
    assert!(local_matches(&modules(), "").is_empty());
    assert!(local_matches(&[], "pay").is_empty());
}

#[test]
fn owner_is_first_module_containing_category() {
    let mods = modules();
    assert_eq!(owning_module(&mods, 21).map(|m| m.id), Some(2));
    assert!(owning_module(&mods, 99).is_none());
}

#[test]
fn snippet_without_query_is_a_preview() {
    let body = "x".repeat(200);
    let s = snippet(&body, "");
    assert_eq!(s.before.chars().count(), 140);
    assert!(s.trailing_ellipsis);
    assert!(s.matched.is_none());

    let s = snippet("short body", "absent");
    assert_eq!(s.to_html(), "short body");
}

#[test]
fn snippet_centres_on_first_match() {
    let body = format!("{}annual TAX filing{}", "a".repeat(50), "b".repeat(100));
    let s = snippet(&body, "tax");
    assert!(s.leading_ellipsis);
    assert_eq!(s.before.chars().count(), 40);
    assert_eq!(s.matched.as_deref(), Some("TAX"), "original casing is kept");
    assert_eq!(s.after.chars().count(), 80);
    assert!(s.trailing_ellipsis);
}

#[test]
fn snippet_window_reaching_both_ends_has_no_ellipses() {
    let s = snippet("pay the tax today", "tax");
    assert!(!s.leading_ellipsis && !s.trailing_ellipsis);
    assert_eq!(s.before, "pay the ");
    assert_eq!(s.after, " today");
}

#[test]
fn snippet_is_literal_and_escaped() {
    let s = snippet("if a<b && c.* then", ".*");
    assert_eq!(s.matched.as_deref(), Some(".*"));
    assert_eq!(s.to_html(), "if a&lt;b &amp;&amp; c<mark class=\"search-highlight\">.*</mark> then");
    assert_eq!(s.to_plain("[", "]"), "if a<b && c[.*] then");
}

#[test]
fn snippet_counts_characters_not_bytes() {
    let body = format!("{}Thuế{}", "é".repeat(60), "ü".repeat(10));
    let s = snippet(&body, "thuế");
    assert_eq!(s.before.chars().count(), 40);
    assert_eq!(s.matched.as_deref(), Some("Thuế"));
    assert_eq!(s.after, "ü".repeat(10));
}

#[test]
fn escape_covers_the_four_characters() {
    assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
}

#[test]
fn title_match_and_snippet_agree_on_case_folding() {
    let titles = ["İzmir Office", "ΣΟΦΙΑ Reports", "Straße Forms"];
    let queries = ["izmir", "i\u{307}zmir", "İZMIR", "σοφια", "STRASSE", "straße", "office"];
    for title in titles {
        let mods = vec![Arc::new(Module {
            id: 1,
            name: "M".into(),
            description: None,
            icon: None,
            categories: vec![cat(1, title, None)],
        })];
        for q in queries {
            let local = !local_matches(&mods, q).is_empty();
            let highlighted = snippet(title, q).matched.is_some();
            assert_eq!(local, highlighted, "title {:?} query {:?}", title, q);
        }
    }
    assert_eq!(fold_case("ΣΟΦΙΑ"), "σοφια");
}
