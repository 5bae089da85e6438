use super::*;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn paths(tree: &FileTree) -> Vec<String> {
    tree.iter().map(|n| n.path().to_string()).collect()
}

#[test]
fn test_load_tree_sorted_by_name() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.html", b"<p></p>");
    write(dir.path(), "b/z.js", b"z");
    write(dir.path(), "b/a.js", b"a");
    write(dir.path(), "a.css", b"p{}");

    let tree = load_tree(dir.path(), &PreviewConfig::default()).unwrap();
    assert_eq!(paths(&tree), vec!["a.css", "b", "b/a.js", "b/z.js", "index.html"]);
    assert_eq!(tree.find_by_path("b/z.js").unwrap().content(), Some("z"));
}

#[test]
fn test_excluded_and_junk_entries_are_skipped() {
    let dir = tempdir().unwrap();
    write(dir.path(), "node_modules/pkg/index.js", b"x");
    write(dir.path(), ".git/HEAD", b"ref");
    write(dir.path(), ".DS_Store", b"");
    write(dir.path(), "app.js", b"1");

    let tree = load_tree(dir.path(), &PreviewConfig::default()).unwrap();
    assert_eq!(paths(&tree), vec!["app.js"]);
}

#[test]
fn test_binary_files_are_skipped() {
    let dir = tempdir().unwrap();
    write(dir.path(), "logo.png", &[0x89, 0x50, 0xff, 0xfe]);
    write(dir.path(), "index.html", b"<p></p>");

    let tree = load_tree(dir.path(), &PreviewConfig::default()).unwrap();
    assert_eq!(paths(&tree), vec!["index.html"]);
}

#[test]
fn test_empty_folders_are_kept() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("empty")).unwrap();
    let tree = load_tree(dir.path(), &PreviewConfig::default()).unwrap();
    assert!(tree.find_by_path("empty").unwrap().is_folder());
}

#[test]
fn test_missing_root_is_error() {
    let dir = tempdir().unwrap();
    assert!(load_tree(&dir.path().join("missing"), &PreviewConfig::default()).is_err());
}

#[test]
fn test_skipped_output_is_not_loaded() {
    let dir = tempdir().unwrap();
    write(dir.path(), "about.html", b"<p>about</p>");
    write(dir.path(), "a-preview.html", b"<p>old bundle</p>");
    write(dir.path(), "app.js", b"1");

    let output = dir.path().join("a-preview.html");
    let tree = load_tree_skipping(dir.path(), &PreviewConfig::default(), &[output]).unwrap();
    assert_eq!(paths(&tree), vec!["about.html", "app.js"]);
}

#[test]
fn test_skip_accepts_relative_and_missing_paths() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.html", b"<p></p>");
    let not_yet_written = dir.path().join("sub").join("..").join("out.html");
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let tree =
        load_tree_skipping(dir.path(), &PreviewConfig::default(), &[not_yet_written]).unwrap();
    assert_eq!(paths(&tree), vec!["index.html", "sub"]);
}
