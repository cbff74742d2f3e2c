use appguide_core::config::{Config, Settings, DEFAULT_BASE_URL};
use appguide_core::tree::build_category_tree;
use appguide_core::types::{Category, ContentSearchResponse, Module};
use figment::Jail;

fn cat(id: i64, title: &str, parent: Option<i64>) -> Category {
    Category { id, title: Some(title.to_string()), name: None, label: None, parent_id: parent }
}

#[test]
fn category_title_falls_back_through_name_and_label() {
    let c: Category = serde_json::from_str(r#"{"id":1,"title":"","name":"","label":"Forms"}"#).unwrap();
    assert_eq!(c.display_title(), "Forms");
    let c: Category = serde_json::from_str(r#"{"id":2,"name":"Payroll"}"#).unwrap();
    assert_eq!(c.display_title(), "Payroll");
    let c: Category = serde_json::from_str(r#"{"id":3}"#).unwrap();
    assert_eq!(c.display_title(), "");
}

#[test]
fn camel_case_aliases_decode() {
    let c: Category = serde_json::from_str(r#"{"id":11,"title":"Forms","parentId":10}"#).unwrap();
    assert_eq!(c.parent_id, Some(10));
    let body = r#"{"data":[{"id":5,"title":"Tax Guide","categoryId":11,"plainContent":"annual tax filing"}]}"#;
    let items = serde_json::from_str::<ContentSearchResponse>(body).unwrap().into_items();
    assert_eq!(items[0].category_id, Some(11));
    assert_eq!(items[0].plain_content, "annual tax filing");
}

#[test]
fn both_spellings_present_decode_snake_first() {
    let c: Category = serde_json::from_str(r#"{"id":11,"parent_id":10,"parentId":99}"#).unwrap();
    assert_eq!(c.parent_id, Some(10));
    let c: Category = serde_json::from_str(r#"{"id":11,"parent_id":null,"parentId":10}"#).unwrap();
    assert_eq!(c.parent_id, Some(10));

    let body = r#"{"data":[
        {"id":5,"title":"Tax Guide","category_id":11,"categoryId":11,"plain_content":"a","plainContent":"b"},
        {"id":6,"category_id":null,"categoryId":12,"plain_content":null,"plainContent":"camel body"}
    ]}"#;
    let items = serde_json::from_str::<ContentSearchResponse>(body).unwrap().into_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].category_id, Some(11));
    assert_eq!(items[0].plain_content, "a");
    assert_eq!(items[1].category_id, Some(12));
    assert_eq!(items[1].plain_content, "camel body");
    assert_eq!(items[1].title, "");
}

#[test]
fn module_with_mixed_parent_keys_decodes() {
    let m: Module = serde_json::from_str(
        r#"{"id":1,"name":"HR","categories":[{"id":10,"title":"Payroll"},{"id":11,"title":"Forms","parent_id":null,"parentId":10}]}"#,
    )
    .unwrap();
    assert_eq!(m.categories[1].parent_id, Some(10));
}

#[test]
fn missing_data_is_an_empty_result() {
    let resp: ContentSearchResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.into_items().is_empty());
}

#[test]
fn non_array_categories_decode_as_empty() {
    let m: Module = serde_json::from_str(r#"{"id":1,"name":"HR","categories":null}"#).unwrap();
    assert!(m.categories.is_empty());
    let m: Module = serde_json::from_str(r#"{"id":1,"name":"HR"}"#).unwrap();
    assert!(m.categories.is_empty());
}

#[test]
fn tree_groups_children_under_roots_in_order() {
    let cats = vec![
        cat(10, "Payroll", None),
        cat(11, "Payroll Forms", Some(10)),
        cat(12, "Leave", None),
        cat(13, "Payslips", Some(10)),
        cat(14, "Orphan", Some(999)),
    ];
    let roots = build_category_tree(&cats);
    let titles: Vec<_> = roots.iter().map(|n| n.category.display_title()).collect();
    assert_eq!(titles, vec!["Payroll", "Leave", "Orphan"], "unresolvable parents become roots");
    let kids: Vec<_> = roots[0].children.iter().map(|n| n.category.id).collect();
    assert_eq!(kids, vec![11, 13]);
    assert_eq!(roots[0].subtree_size(), 3);
    assert!(roots[1].is_leaf());
}

#[test]
fn tree_skips_detached_cycles() {
    let cats = vec![cat(1, "A", Some(2)), cat(2, "B", Some(1)), cat(3, "Root", None)];
    let roots = build_category_tree(&cats);
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].category.id, 3);
}

#[test]
fn config_defaults_without_files() {
    Jail::expect_with(|_jail| {
        let config = Config::load_for_env("dev").expect("load");
        let settings = config.settings().expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.search.debounce_ms, 250);
        Ok(())
    });
}

#[test]
fn config_layers_env_file_and_env_vars() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[search]\ndebounce_ms = 300\nrequest_timeout_ms = 5000\n")?;
        jail.create_file("config.dev.toml", "[api]\nbase_url = \"http://guide.local/api\"\ntimeout_ms = 2000\n")?;
        jail.set_env("APP_SEARCH__DEBOUNCE_MS", "120");
        let config = Config::load_for_env("dev").expect("load");
        let settings = config.settings().expect("settings");
        assert_eq!(settings.api.base_url, "http://guide.local/api");
        assert_eq!(settings.search.debounce_ms, 120, "env vars win over files");
        assert_eq!(settings.search.request_timeout_ms, 5000);
        let timeout: u64 = config.get("api.timeout_ms").expect("key");
        assert_eq!(timeout, 2000);
        Ok(())
    });
}

#[test]
fn config_rejects_zero_debounce() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[search]\ndebounce_ms = 0\nrequest_timeout_ms = 5000\n")?;
        assert!(Config::load_for_env("test").is_err());
        Ok(())
    });
}

#[test]
fn config_rejects_zero_search_timeout() {
    let mut settings = Settings::default();
    settings.search.request_timeout_ms = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn default_search_timeout_is_within_client_timeout() {
    let settings = Settings::default();
    assert!(settings.search.request_timeout() < settings.api.timeout());
}

#[test]
fn production_refuses_localhost_api() {
    Jail::expect_with(|_jail| {
        assert!(Config::load_for_env("prod").is_err());
        Ok(())
    });
}

#[test]
fn empty_token_is_not_sent() {
    let mut settings = Settings::default();
    settings.api.token = Some("  ".into());
    assert_eq!(settings.api.bearer_token(), None);
    settings.api.token = Some("abc".into());
    assert_eq!(settings.api.bearer_token(), Some("abc"));
}
