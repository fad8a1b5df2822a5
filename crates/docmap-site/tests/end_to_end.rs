//! End-to-end resolution against a content directory on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use docmap_site::{Site, SiteConfig, SiteError, SiteState};
use docmap_storage::FsStorage;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

fn content_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "manifest.json",
        r#"{
            "versions": ["1.4", "1.3"],
            "routes": [
                {"path": "index.md", "children": [{"path": "guides/deploy.md"}]}
            ]
        }"#,
    );
    write(dir.path(), "index.md", "---\ntitle: Home\n---\n# Home\n\nStart [deploying](guides/deploy.md).\n");
    write(
        dir.path(),
        "guides/deploy.md",
        "---\ntitle: Deploy\ndescription: Shipping to production\n---\n# Deploy\n<!-- TBD: screenshots -->\nSee [home](../index.md#intro) or [docs](https://example.com).\n",
    );
    dir
}

fn warm(dir: &TempDir) -> SiteState {
    let storage = Arc::new(FsStorage::new(dir.path().to_path_buf()));
    SiteState::warm_up(storage, &SiteConfig::default()).unwrap()
}

#[test]
fn test_enumerate_and_resolve() {
    let dir = content_dir();
    let state = warm(&dir);

    let urls: Vec<String> = state.static_paths().into_iter().map(|p| p.url_path).collect();
    assert_eq!(urls, vec!["", "guides/deploy"]);

    let page = state.resolve(&["guides", "deploy"]).unwrap();

    assert_eq!(page.attributes.title, "Deploy");
    assert_eq!(page.attributes.description.as_deref(), Some("Shipping to production"));
    assert_eq!(page.version, "1.4");
    assert_eq!(page.navigation.len(), 1);
    assert_eq!(page.navigation[0].path, "");
    assert_eq!(page.navigation[0].children[0].path, "guides/deploy");
    assert_eq!(
        page.content,
        "# Deploy\n\nSee [home](../) or [docs](https://example.com).\n"
    );
    assert_eq!(page.breadcrumbs.len(), 1);
    assert_eq!(page.breadcrumbs[0].title, "Home");
}

#[test]
fn test_root_page_links_into_sections() {
    let dir = content_dir();
    let state = warm(&dir);

    let page = state.resolve(&[""]).unwrap();

    assert_eq!(page.attributes.title, "Home");
    assert_eq!(page.content, "# Home\n\nStart [deploying](guides/deploy).\n");
    assert!(page.breadcrumbs.is_empty());
}

#[test]
fn test_page_json_shape() {
    let dir = content_dir();
    let state = warm(&dir);

    let page = state.resolve(&["guides", "deploy"]).unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["attributes"]["title"], "Deploy");
    assert_eq!(json["navigation"][0]["children"][0]["title"], "Deploy");
    assert_eq!(json["links"][1]["type"], "external");
}

#[test]
fn test_lazy_site_matches_warm_state() {
    let dir = content_dir();
    let site = Site::new(
        Arc::new(FsStorage::new(dir.path().to_path_buf())),
        SiteConfig::default(),
    );

    let page = site.resolve(&["guides", "deploy"]).unwrap();

    assert_eq!(page, warm(&dir).resolve(&["guides", "deploy"]).unwrap());
}

#[test]
fn test_route_collision_aborts_build() {
    let dir = content_dir();
    write(dir.path(), "guides/index.md", "---\ntitle: Guides\n---\n");
    write(dir.path(), "guides.md", "---\ntitle: Guides again\n---\n");
    write(
        dir.path(),
        "manifest.json",
        r#"{"versions": ["1"], "routes": [{"path": "guides/index.md"}, {"path": "guides.md"}]}"#,
    );
    let storage = Arc::new(FsStorage::new(dir.path().to_path_buf()));

    let result = SiteState::warm_up(storage, &SiteConfig::default());

    assert!(matches!(result, Err(SiteError::RouteCollision { url_path, .. }) if url_path == "guides"));
}

#[test]
fn test_missing_source_aborts_build() {
    let dir = content_dir();
    fs::remove_file(dir.path().join("guides/deploy.md")).unwrap();
    let storage = Arc::new(FsStorage::new(dir.path().to_path_buf()));

    let result = SiteState::warm_up(storage, &SiteConfig::default());

    assert!(matches!(result, Err(SiteError::SourceNotFound(p)) if p == Path::new("guides/deploy.md")));
}

#[test]
fn test_missing_title_aborts_build() {
    let dir = content_dir();
    write(dir.path(), "guides/deploy.md", "---\ndescription: no title\n---\nBody\n");
    let storage = Arc::new(FsStorage::new(dir.path().to_path_buf()));

    let result = SiteState::warm_up(storage, &SiteConfig::default());

    assert!(matches!(result, Err(SiteError::FrontMatterMissingTitle(_))));
}
