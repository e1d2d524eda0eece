//! Integration tests for route table generation
//!
//! Each test lays out a small project in a temporary directory and drives
//! the public `RouteGenerator` API:
//! - End-to-end table shape
//! - Layout precedence and opt-out
//! - Metadata precedence and cache invalidation
//! - Collision detection
//! - Idempotent generation and writes

use autoroutes::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) -> PathBuf {
    write(root, rel, "export default function Page() { return null; }\n")
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn generator(root: &Path) -> RouteGenerator {
    RouteGenerator::from_config(&Config::default(), Some(root)).unwrap()
}

fn project(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        touch(tmp.path(), file);
    }
    tmp
}

#[test]
fn test_end_to_end_example() {
    let tmp = project(&["src/pages/home/index.tsx", "src/pages/user/$id.tsx", "src/layouts/index.tsx"]);
    let output = generator(tmp.path()).build(None).unwrap();

    let value = serde_json::to_value(&output.routes).unwrap();
    assert_eq!(
        value,
        json!({
            "home": {"id": "home", "path": "/home", "name": "home", "parentId": "@@global-layout"},
            "user-:id": {"id": "user-:id", "path": "/user/:id", "name": "user-:id", "parentId": "@@global-layout"},
            "@@global-layout": {"id": "@@global-layout", "path": "/", "name": "@@global-layout", "isLayout": true}
        })
    );

    assert_eq!(output.route_components["home"], "../pages/home/index.tsx");
    assert_eq!(output.route_components["user-:id"], "../pages/user/$id.tsx");
    assert_eq!(output.route_components["@@global-layout"], "../layouts/index.tsx");
}

#[test]
fn test_layout_records_never_navigable() {
    let tmp = project(&["src/pages/home.tsx", "src/layouts/index.tsx"]);
    let output = generator(tmp.path()).build(None).unwrap();

    let pages: Vec<&str> = output.pages().map(|r| r.id.as_str()).collect();
    assert_eq!(pages, vec!["home"]);
}

#[test]
fn test_local_layout_beats_global() {
    let tmp = project(&[
        "src/pages/admin/layout.tsx",
        "src/pages/admin/users/list.tsx",
        "src/pages/about.tsx",
        "src/layouts/index.tsx",
    ]);
    let output = generator(tmp.path()).build(None).unwrap();

    assert_eq!(output.routes["admin-users-list"].parent_id.as_deref(), Some("@@admin-layout"));
    assert_eq!(output.routes["about"].parent_id.as_deref(), Some(DEFAULT_GLOBAL_LAYOUT_ID));
    assert!(output.routes["@@admin-layout"].is_layout);
    assert_eq!(output.routes["@@admin-layout"].path, "/admin");
}

#[test]
fn test_no_layouts_means_no_parents() {
    let tmp = project(&["src/pages/about.tsx"]);
    let output = generator(tmp.path()).build(None).unwrap();
    assert_eq!(output.routes["about"].parent_id, None);
}

#[test]
fn test_require_layout_opt_out() {
    let tmp = project(&["src/pages/login.tsx", "src/layouts/index.tsx"]);
    write(tmp.path(), "src/pages/login.meta.json", r#"{"requireLayout": false, "title": "Login"}"#);

    let output = generator(tmp.path()).build(None).unwrap();
    let login = &output.routes["login"];

    assert_eq!(login.parent_id, None);
    assert_eq!(login.extra.get("title"), Some(&json!("Login")));
    assert!(login.extra.get("requireLayout").is_none());
}

#[test]
fn test_structural_fields_win_over_meta() {
    let tmp = project(&["src/pages/account.tsx"]);
    write(
        tmp.path(),
        "src/pages/account.meta.json",
        r#"{"path": "/hacked", "id": "evil", "name": "evil", "isLayout": true, "auth": true}"#,
    );

    let output = generator(tmp.path()).build(None).unwrap();
    let account = &output.routes["account"];

    assert_eq!(account.path, "/account");
    assert_eq!(account.id, "account");
    assert_eq!(account.name, "account");
    assert!(!account.is_layout);
    assert_eq!(account.extra.get("auth"), Some(&json!(true)));
    assert!(!output.routes.contains_key("evil"));
}

#[test]
fn test_meta_parent_id_is_kept() {
    let tmp = project(&["src/pages/admin/layout.tsx", "src/pages/report.tsx", "src/layouts/index.tsx"]);
    write(tmp.path(), "src/pages/report.meta.json", r#"{"parentId": "@@admin-layout"}"#);

    let output = generator(tmp.path()).build(None).unwrap();
    assert_eq!(output.routes["report"].parent_id.as_deref(), Some("@@admin-layout"));
}

#[test]
fn test_meta_parent_id_must_be_a_layout() {
    let tmp = project(&["src/pages/report.tsx", "src/pages/home.tsx"]);
    write(tmp.path(), "src/pages/report.meta.json", r#"{"parentId": "home"}"#);

    let err = generator(tmp.path()).build(None).unwrap_err();
    assert!(matches!(err, RouteError::UnknownParent { ref id, ref parent_id } if id == "report" && parent_id == "home"));
}

#[test]
fn test_malformed_meta_is_empty() {
    let tmp = project(&["src/pages/about.tsx"]);
    write(tmp.path(), "src/pages/about.meta.json", "{ not json");

    let output = generator(tmp.path()).build(None).unwrap();
    assert!(output.routes["about"].extra.is_empty());
}

#[test]
fn test_root_index_is_sentinel() {
    let tmp = project(&["src/pages/index.tsx"]);
    let output = generator(tmp.path()).build(None).unwrap();

    assert_eq!(output.routes[ROOT_ROUTE_ID].path, "/");
    assert!(!output.routes.contains_key(""));
}

#[rstest]
#[case(vec!["src/pages/a-b.tsx", "src/pages/a/b.tsx"], "a-b")]
#[case(vec!["src/pages/blog/index.tsx", "src/pages/blog.tsx"], "blog")]
#[case(vec!["src/pages/User.tsx", "src/pages/user/index.jsx"], "user")]
fn test_collisions_fail(#[case] files: Vec<&str>, #[case] id: &str) {
    let tmp = project(&files);
    match generator(tmp.path()).build(None) {
        Err(RouteError::IdCollision { id: got, first, second }) => {
            assert_eq!(got, id);
            assert_ne!(first, second);
        }
        other => panic!("expected collision, got {:?}", other.map(|o| o.routes.len())),
    }
}

#[test]
fn test_build_is_idempotent() {
    let tmp = project(&[
        "src/pages/index.tsx",
        "src/pages/docs/$slug.tsx",
        "src/pages/userProfile/settings.jsx",
        "src/layouts/index.tsx",
    ]);
    let mut generator = generator(tmp.path());

    let first = generator.render(None).unwrap();
    let second = generator.render(Some(UpdateKind::FileListChange)).unwrap();
    assert_eq!(first, second);

    let output = generator.build(None).unwrap();
    assert_eq!(output.routes["user-profile-settings"].path, "/user-profile/settings");
}

#[test]
fn test_meta_change_rereads_sidecar() {
    let tmp = project(&["src/pages/about.tsx"]);
    let meta = write(tmp.path(), "src/pages/about.meta.json", r#"{"title": "Old"}"#);
    let mut generator = generator(tmp.path());

    let output = generator.build(None).unwrap();
    assert_eq!(output.routes["about"].extra["title"], json!("Old"));

    write(tmp.path(), "src/pages/about.meta.json", r#"{"title": "New"}"#);

    // cached until invalidated
    let output = generator.build(None).unwrap();
    assert_eq!(output.routes["about"].extra["title"], json!("Old"));

    let update = generator.handle_burst(&[FsEvent::change(&meta)]);
    assert_eq!(update, Some(UpdateKind::FileMetaChange));

    let output = generator.build(update).unwrap();
    assert_eq!(output.routes["about"].extra["title"], json!("New"));
}

#[test]
fn test_added_file_needs_file_list_change() {
    let tmp = project(&["src/pages/about.tsx"]);
    let mut generator = generator(tmp.path());
    assert_eq!(generator.build(None).unwrap().routes.len(), 1);

    let added = touch(tmp.path(), "src/pages/contact.tsx");
    assert_eq!(generator.build(Some(UpdateKind::FileMetaChange)).unwrap().routes.len(), 1);

    let update = generator.handle_burst(&[FsEvent::add(&added)]);
    assert_eq!(update, Some(UpdateKind::FileListChange));
    assert_eq!(generator.build(update).unwrap().routes.len(), 2);
}

#[test]
fn test_watch_filter_predicates() {
    let tmp = project(&[]);
    let generator = generator(tmp.path());
    let root = tmp.path();

    assert!(generator.is_watch_file(&root.join("src/pages/about.tsx")));
    assert!(generator.is_watch_file(&root.join("src/layouts/index.jsx")));
    assert!(!generator.is_watch_file(&root.join("src/layouts/header.jsx")));
    assert!(!generator.is_watch_file(&root.join("src/pages/components/Card.tsx")));
    assert!(!generator.is_watch_file(&root.join("src/other/about.tsx")));

    assert!(generator.is_meta_file(&root.join("src/pages/about.meta.json")));
    assert!(!generator.is_meta_file(&root.join("package.json")));
}

#[test]
fn test_unrelated_burst_is_noop() {
    let tmp = project(&["src/pages/about.tsx"]);
    let mut generator = generator(tmp.path());

    let events = vec![
        FsEvent::change(tmp.path().join("src/pages/about.tsx")),
        FsEvent::add(tmp.path().join("README.md")),
    ];
    assert_eq!(generator.handle_burst(&events), None);
}

#[test]
fn test_directory_rename_is_file_list_change() {
    let tmp = project(&["src/pages/user/$id.tsx", "src/pages/home.tsx"]);
    let mut generator = generator(tmp.path());
    assert!(generator.build(None).unwrap().routes.contains_key("user-:id"));

    let old_dir = tmp.path().join("src/pages/user");
    let new_dir = tmp.path().join("src/pages/account");
    fs::rename(&old_dir, &new_dir).unwrap();

    let update = generator.handle_burst(&[FsEvent::unlink(&old_dir), FsEvent::add(&new_dir)]);
    assert_eq!(update, Some(UpdateKind::FileListChange));

    let output = generator.build(update).unwrap();
    assert!(output.routes.contains_key("account-:id"));
    assert!(!output.routes.contains_key("user-:id"));
}

#[test]
fn test_ignored_or_foreign_directories_are_noop() {
    let tmp = project(&["src/pages/home.tsx", "src/pages/components/Card.tsx"]);
    let mut generator = generator(tmp.path());

    let events = vec![
        FsEvent::add(tmp.path().join("src/pages/components")),
        FsEvent::unlink(tmp.path().join("src/other")),
        FsEvent::add(tmp.path().join("src/pages/.cache")),
    ];
    assert_eq!(generator.handle_burst(&events), None);
}

#[test]
fn test_utilities_folder_is_ignored_by_default() {
    let tmp = project(&["src/pages/utilities/format.tsx", "src/pages/home.tsx"]);
    let output = generator(tmp.path()).build(None).unwrap();
    assert_eq!(output.routes.keys().collect::<Vec<_>>(), vec!["home"]);
}
