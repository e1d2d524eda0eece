//! Integration tests for generated output on disk and watch bursts

use autoroutes::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "export default function Page() { return null; }\n").unwrap();
    path
}

fn project(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        touch(tmp.path(), file);
    }
    tmp
}

#[test]
fn test_generate_writes_module_and_router() {
    let tmp = project(&["src/pages/home/index.jsx", "src/layouts/index.jsx"]);
    let mut generator = RouteGenerator::from_config(&Config::default(), Some(tmp.path())).unwrap();

    let report = generator.generate(None).unwrap();
    assert_eq!(report.routes_outcome, WriteOutcome::Written);
    assert_eq!(report.router_outcome, Some(WriteOutcome::Written));
    assert_eq!(report.route_count, 1);

    let module = fs::read_to_string(tmp.path().join("src/router/routes.jsx")).unwrap();
    assert!(module.contains("export function getRoutes()"));
    assert!(module.contains(r#""../pages/home/index.jsx""#));

    let router = fs::read_to_string(tmp.path().join("src/router/index.jsx")).unwrap();
    assert!(router.contains("BrowserRouter as Router"));
}

#[test]
fn test_second_generate_is_unchanged() {
    let tmp = project(&["src/pages/about.tsx"]);
    let mut generator = RouteGenerator::from_config(&Config::default(), Some(tmp.path())).unwrap();

    generator.generate(None).unwrap();
    let report = generator.generate(Some(UpdateKind::FileListChange)).unwrap();

    assert_eq!(report.routes_outcome, WriteOutcome::Unchanged);
    // the router component now exists and belongs to the user
    assert_eq!(report.router_outcome, None);
}

#[test]
fn test_user_router_component_is_kept() {
    let tmp = project(&["src/pages/about.tsx"]);
    let custom = tmp.path().join("src/router/index.ts");
    fs::create_dir_all(custom.parent().unwrap()).unwrap();
    fs::write(&custom, "// mine\n").unwrap();

    let mut generator = RouteGenerator::from_config(&Config::default(), Some(tmp.path())).unwrap();
    let report = generator.generate(None).unwrap();

    assert_eq!(report.router_outcome, None);
    assert_eq!(fs::read_to_string(&custom).unwrap(), "// mine\n");
    assert!(!tmp.path().join("src/router/index.jsx").exists());
}

#[test]
fn test_only_routes_and_typescript() {
    let tmp = project(&["src/pages/about.tsx"]);
    fs::write(tmp.path().join("tsconfig.json"), "{}").unwrap();

    let config = Config {
        only_routes: true,
        ..Config::default()
    };
    let mut generator = RouteGenerator::from_config(&config, Some(tmp.path())).unwrap();
    let report = generator.generate(None).unwrap();

    assert_eq!(report.routes_module, tmp.path().join("src/router/routes.tsx"));
    assert!(report.routes_module.exists());
    assert_eq!(report.router_outcome, None);
    assert!(!tmp.path().join("src/router/index.tsx").exists());
}

#[test]
fn test_base_path_prefix_and_extra_dir() {
    let tmp = project(&["src/pages/home.tsx", "docs/intro.tsx", "docs/guide/$step.tsx"]);
    let mut config = Config::default();
    config.dirs.push(DirConfig {
        dir: "docs".to_string(),
        base_path: "/docs".to_string(),
        pattern: None,
        is_global: false,
    });

    let mut generator = RouteGenerator::from_config(&config, Some(tmp.path())).unwrap();
    let output = generator.build(None).unwrap();

    let paths: Vec<&str> = output.routes.values().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/home", "/docs/guide/:step", "/docs/intro"]);
    assert_eq!(output.route_components["docs-intro"], "../../docs/intro.tsx");
}

#[test]
fn test_debounced_burst_is_one_rebuild() {
    let tmp = project(&["src/pages/home.tsx"]);
    let mut generator = RouteGenerator::from_config(&Config::default(), Some(tmp.path())).unwrap();
    let mut debouncer = Debouncer::new(generator.config().debounce);

    let start = Instant::now();
    for i in 0..5 {
        let path = touch(tmp.path(), &format!("src/pages/page{}.tsx", i));
        debouncer.push(FsEvent::add(path), start + Duration::from_millis(i * 50));
    }

    assert!(!debouncer.is_ready(start + Duration::from_millis(300)));
    assert!(debouncer.is_ready(start + Duration::from_millis(500)));

    let burst = debouncer.drain();
    assert_eq!(burst.len(), 5);

    let update = generator.handle_burst(&burst);
    assert_eq!(update, Some(UpdateKind::FileListChange));
    assert_eq!(generator.build(update).unwrap().routes.len(), 6);
}

#[test]
fn test_created_then_written_page_triggers_rescan() {
    let tmp = project(&["src/pages/home.tsx"]);
    let mut generator = RouteGenerator::from_config(&Config::default(), Some(tmp.path())).unwrap();
    generator.generate(None).unwrap();

    let contact = touch(tmp.path(), "src/pages/contact.tsx");
    let mut debouncer = Debouncer::new(generator.config().debounce);
    let now = Instant::now();
    debouncer.push(FsEvent::add(&contact), now);
    debouncer.push(FsEvent::change(&contact), now + Duration::from_millis(5));

    let update = generator.handle_burst(&debouncer.drain());
    assert_eq!(update, Some(UpdateKind::FileListChange));

    let report = generator.generate(update).unwrap();
    assert_eq!(report.routes_outcome, WriteOutcome::Written);
    assert_eq!(report.route_count, 2);
}
