use super::*;

fn config() -> PreviewConfig {
    PreviewConfig::default()
}

fn paths(nodes: &[&FileNode]) -> Vec<String> {
    nodes.iter().map(|n| n.path().to_string()).collect()
}

#[test]
fn test_classify_by_extension() {
    let config = config();
    assert_eq!(classify(&FileNode::file("a.HTM", ""), &config), Some(AssetKind::Html));
    assert_eq!(classify(&FileNode::file("a.Css", ""), &config), Some(AssetKind::Css));
    assert_eq!(classify(&FileNode::file("a.js", ""), &config), Some(AssetKind::Js));
    assert_eq!(classify(&FileNode::file("a.ts", ""), &config), None);
    assert_eq!(classify(&FileNode::folder("styles.css"), &config), None);
}

#[test]
fn test_scan_order_is_pre_order() {
    let tree = FileTree::from_nodes(vec![
        FileNode::folder_with(
            "lib",
            vec![
                FileNode::file("b.js", ""),
                FileNode::folder_with("deep", vec![FileNode::file("c.js", "")]),
            ],
        ),
        FileNode::file("a.js", ""),
        FileNode::file("main.css", ""),
        FileNode::file("README.md", ""),
    ]);
    let assets = scan(&tree, &config());
    assert_eq!(paths(&assets.js), vec!["lib/b.js", "lib/deep/c.js", "a.js"]);
    assert_eq!(paths(&assets.css), vec!["main.css"]);
    assert!(assets.html.is_empty());
}

#[test]
fn test_scan_skips_excluded_dirs() {
    let tree = FileTree::from_nodes(vec![
        FileNode::folder_with(
            "node_modules",
            vec![FileNode::folder_with("pkg", vec![FileNode::file("index.js", "")])],
        ),
        FileNode::folder_with("src", vec![FileNode::file("app.js", "")]),
    ]);
    let assets = scan(&tree, &config());
    assert_eq!(paths(&assets.js), vec!["src/app.js"]);
}

#[test]
fn test_nested_excluded_dir_is_skipped() {
    let tree = FileTree::from_nodes(vec![FileNode::folder_with(
        "web",
        vec![FileNode::folder_with(
            "bower_components",
            vec![FileNode::file("x.css", "")],
        )],
    )]);
    assert!(scan(&tree, &config()).css.is_empty());
}

#[test]
fn test_entry_prefers_configured_name() {
    let tree = FileTree::from_nodes(vec![
        FileNode::file("about.html", ""),
        FileNode::folder_with("docs", vec![FileNode::file("Index.html", "")]),
    ]);
    let config = config();
    let assets = scan(&tree, &config);
    let entry = assets.select_entry(&config).unwrap();
    assert_eq!(entry.path(), "docs/Index.html");
}

#[test]
fn test_entry_falls_back_to_first_html() {
    let tree = FileTree::from_nodes(vec![
        FileNode::file("b.html", ""),
        FileNode::file("a.htm", ""),
    ]);
    let config = config();
    let assets = scan(&tree, &config);
    assert_eq!(assets.select_entry(&config).unwrap().path(), "b.html");
}

#[test]
fn test_entry_names_follow_config_order() {
    let tree = FileTree::from_nodes(vec![
        FileNode::file("index.html", ""),
        FileNode::file("main.html", ""),
    ]);
    let config = PreviewConfig {
        entry_names: vec!["main.html".to_string(), "index.html".to_string()],
        ..PreviewConfig::default()
    };
    let assets = scan(&tree, &config);
    assert_eq!(assets.select_entry(&config).unwrap().name(), "main.html");
}

#[test]
fn test_no_html_means_no_entry() {
    let tree = FileTree::from_nodes(vec![FileNode::file("style.css", "")]);
    let config = config();
    assert!(scan(&tree, &config).select_entry(&config).is_none());
}
