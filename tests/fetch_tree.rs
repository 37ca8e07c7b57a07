// tests/fetch_tree.rs
//! Block-tree fetcher behavior against a scripted source: depth
//! ceiling, pagination order, and partial-failure absorption.

mod common;

use common::{bullet, flag_children, paragraph, toggle, MockSource};
use notion_simplify::{BlockTreeFetcher, NotionId};
use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn texts(blocks: &[notion_simplify::Block]) -> Vec<String> {
    blocks.iter().map(|b| b.payload.display_text()).collect()
}

#[tokio::test]
async fn fetches_nested_tree_in_source_order() {
    let root = NotionId::new_v4();
    let first = flag_children(paragraph("first"));
    let second = paragraph("second");
    let child_a = bullet("a");
    let child_b = bullet("b");

    let source = MockSource::new()
        .with_children(&root, vec![first.clone(), second.clone()])
        .with_children(&first.id, vec![child_a, child_b]);

    let fetcher = BlockTreeFetcher::new(Arc::new(source), 5, 4);
    let tree = fetcher.fetch(&root).await.unwrap();

    assert_eq!(texts(&tree), vec!["first", "second"]);
    assert_eq!(texts(&tree[0].children), vec!["a", "b"]);
    assert!(tree[1].children.is_empty());
}

#[tokio::test]
async fn depth_ceiling_leaves_deeper_children_unexpanded() {
    let root = NotionId::new_v4();
    let level1 = flag_children(toggle("level 1"));
    let level2 = flag_children(toggle("level 2"));
    let level3 = toggle("level 3");

    let source = MockSource::new()
        .with_children(&root, vec![level1.clone()])
        .with_children(&level1.id, vec![level2.clone()])
        .with_children(&level2.id, vec![level3]);

    let fetcher = BlockTreeFetcher::new(Arc::new(source), 2, 4);
    let tree = fetcher.fetch(&root).await.unwrap();

    assert_eq!(texts(&tree), vec!["level 1"]);
    assert_eq!(texts(&tree[0].children), vec!["level 2"]);

    // The node at the ceiling keeps its has_children flag so the
    // truncation stays observable, but its list is never fetched.
    let truncated = &tree[0].children[0];
    assert!(truncated.has_children);
    assert!(truncated.children.is_empty());
}

#[tokio::test]
async fn depth_zero_fetches_nothing() {
    let root = NotionId::new_v4();
    let source = MockSource::new().with_children(&root, vec![paragraph("invisible")]);
    let source = Arc::new(source);

    let fetcher = BlockTreeFetcher::new(source.clone(), 0, 4);
    let tree = fetcher.fetch(&root).await.unwrap();

    assert!(tree.is_empty());
    assert_eq!(source.children_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concatenates_result_pages_in_cursor_order() {
    let root = NotionId::new_v4();
    let source = MockSource::new().with_paged_children(
        &root,
        vec![
            vec![paragraph("one"), paragraph("two")],
            vec![paragraph("three")],
            vec![paragraph("four"), paragraph("five")],
        ],
    );

    let fetcher = BlockTreeFetcher::new(Arc::new(source), 1, 4);
    let tree = fetcher.fetch(&root).await.unwrap();

    assert_eq!(texts(&tree), vec!["one", "two", "three", "four", "five"]);
}

#[tokio::test]
async fn failed_subtree_degrades_to_empty_children() {
    let root = NotionId::new_v4();
    let broken = flag_children(paragraph("broken"));
    let healthy = flag_children(paragraph("healthy"));

    let source = MockSource::new()
        .with_children(&root, vec![broken.clone(), healthy.clone()])
        .with_failing_children(&broken.id)
        .with_children(&healthy.id, vec![bullet("still here")]);

    let fetcher = BlockTreeFetcher::new(Arc::new(source), 3, 4);
    let tree = fetcher.fetch(&root).await.unwrap();

    // The failure is absorbed: the broken node stays in place with no
    // children while its sibling's subtree arrives intact.
    assert_eq!(texts(&tree), vec!["broken", "healthy"]);
    assert!(tree[0].has_children);
    assert!(tree[0].children.is_empty());
    assert_eq!(texts(&tree[1].children), vec!["still here"]);
}

#[tokio::test]
async fn root_listing_failure_is_fatal() {
    let root = NotionId::new_v4();
    let source = MockSource::new().with_failing_children(&root);

    let fetcher = BlockTreeFetcher::new(Arc::new(source), 3, 4);
    assert!(fetcher.fetch(&root).await.is_err());
}

#[tokio::test]
async fn wide_sibling_fanout_preserves_order_under_narrow_concurrency() {
    let root = NotionId::new_v4();
    let parents: Vec<_> = (0..12)
        .map(|n| flag_children(paragraph(&format!("parent {}", n))))
        .collect();

    let mut source = MockSource::new().with_children(&root, parents.clone());
    for (n, parent) in parents.iter().enumerate() {
        source = source.with_children(&parent.id, vec![bullet(&format!("child {}", n))]);
    }

    // One permit forces full serialization; order must still be the
    // source order, not the completion order.
    let fetcher = BlockTreeFetcher::new(Arc::new(source), 2, 1);
    let tree = fetcher.fetch(&root).await.unwrap();

    for (n, block) in tree.iter().enumerate() {
        assert_eq!(block.payload.display_text(), format!("parent {}", n));
        assert_eq!(texts(&block.children), vec![format!("child {}", n)]);
    }
}
