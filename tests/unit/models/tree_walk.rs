use super::*;

fn nested() -> FileTree {
    FileTree::from_nodes(vec![
        FileNode::folder_with(
            "a",
            vec![
                FileNode::file("a1.txt", "xx"),
                FileNode::folder_with("b", vec![FileNode::file("b1.txt", "yyy")]),
            ],
        ),
        FileNode::file("z.txt", "z"),
    ])
}

fn paths<'a>(nodes: impl Iterator<Item = &'a FileNode>) -> Vec<&'a str> {
    nodes.map(|n| n.path()).collect()
}

#[test]
fn test_pre_order_follows_child_order() {
    let tree = nested();
    assert_eq!(
        paths(tree.iter()),
        vec!["a", "a/a1.txt", "a/b", "a/b/b1.txt", "z.txt"]
    );
}

#[test]
fn test_walk_matches_iter() {
    let tree = nested();
    let mut visited = Vec::new();
    tree.walk(|node, depth| {
        visited.push((node.path(), depth));
        WalkControl::Continue
    });
    assert_eq!(
        visited,
        vec![
            ("a", 0),
            ("a/a1.txt", 1),
            ("a/b", 1),
            ("a/b/b1.txt", 2),
            ("z.txt", 0)
        ]
    );
}

#[test]
fn test_walk_skip_children() {
    let tree = nested();
    let mut visited = Vec::new();
    tree.walk(|node, _| {
        visited.push(node.path());
        if node.name() == "b" {
            WalkControl::SkipChildren
        } else {
            WalkControl::Continue
        }
    });
    assert_eq!(visited, vec!["a", "a/a1.txt", "a/b", "z.txt"]);
}

#[test]
fn test_walk_stop() {
    let tree = nested();
    let mut count = 0;
    tree.walk(|_, _| {
        count += 1;
        if count == 2 {
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    });
    assert_eq!(count, 2);
}

#[test]
fn test_node_iter_includes_self() {
    let tree = nested();
    let b = tree.find_by_path("a/b").unwrap();
    assert_eq!(paths(b.iter()), vec!["a/b", "a/b/b1.txt"]);
}

#[test]
fn test_stats() {
    let stats = nested().stats();
    assert_eq!(
        stats,
        TreeStats {
            files: 3,
            folders: 2,
            total_bytes: 6,
            max_depth: 2,
        }
    );
    assert_eq!(FileTree::new().stats(), TreeStats::default());
}

#[test]
fn test_search_is_case_insensitive() {
    let tree = nested();
    assert_eq!(paths(tree.search("B1").into_iter()), vec!["a/b/b1.txt"]);
    assert_eq!(tree.search(".TXT").len(), 3);
    assert!(tree.search("").is_empty());
    assert!(tree.search("missing").is_empty());
}

#[test]
fn test_ids_cover_every_node() {
    let tree = nested();
    let ids = tree.ids();
    assert_eq!(ids.len(), 5);
    assert!(tree.iter().all(|n| ids.contains(&n.id())));
}
