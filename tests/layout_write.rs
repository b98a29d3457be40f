use stac::{ErrorCode, HrefObject, Item, Layout, Rebase, Stac, Write, Writer};

fn ids(stac: &mut Stac<stac::Reader>) -> Vec<String> {
    let root = stac.root();
    stac.walk(root, |stac, handle| Ok(stac.get(handle)?.id().to_string()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn best_practices_layout_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root_dir = dir.path().join("v1");
    let (stac, _) = Stac::read("data/catalog.json").unwrap();
    stac.write(&Layout::new(root_dir.to_str().unwrap()), &Writer::default())
        .unwrap();

    for path in [
        "catalog.json",
        "simple-collection/collection.json",
        "simple-collection/simple-item/simple-item.json",
        "simple-collection/core-item/core-item.json",
        "extensions-collection/collection.json",
        "extensions-collection/proj-example/proj-example.json",
    ] {
        assert!(root_dir.join(path).exists(), "{} was not written", path);
    }

    let (mut stac, _) = Stac::read(root_dir.join("catalog.json").as_path()).unwrap();
    assert_eq!(
        ids(&mut stac),
        vec![
            "examples",
            "extensions-collection",
            "proj-example",
            "simple-collection",
            "simple-item",
            "core-item",
        ]
    );
}

#[test]
fn written_items_link_relatively() {
    let dir = tempfile::tempdir().unwrap();
    let (stac, _) = Stac::read("data/catalog.json").unwrap();
    stac.write(&Layout::new(dir.path()), &Writer::default())
        .unwrap();

    let item = stac::read_item(
        &dir.path()
            .join("simple-collection/simple-item/simple-item.json")
            .as_path()
            .into(),
    )
    .unwrap();
    assert_eq!(item.links.len(), 2);
    let root = item.links.iter().find(|link| link.is_root()).unwrap();
    assert_eq!(root.href, "../../catalog.json");
    let parent = item.links.iter().find(|link| link.is_parent()).unwrap();
    assert_eq!(parent.href, "../collection.json");
    assert_eq!(parent.title.as_deref(), Some("Simple Example Collection"));
    assert_eq!(item.assets.len(), 2);

    let core = stac::read(dir.path().join("simple-collection/core-item/core-item.json").as_path())
        .unwrap();
    assert!(core
        .object
        .links()
        .iter()
        .any(|link| link.rel == "alternate"));
}

#[test]
fn removed_subtrees_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let (mut stac, root) = Stac::read("data/catalog.json").unwrap();
    let extensions = stac
        .find(root, |object| object.id() == "extensions-collection")
        .unwrap()
        .unwrap();
    let (object, href) = stac.remove(extensions).unwrap();
    assert_eq!(object.unwrap().id(), "extensions-collection");
    assert_eq!(
        href.unwrap().as_str(),
        "data/extensions-collection/collection.json"
    );

    stac.write(&Layout::new(dir.path()), &Writer::default())
        .unwrap();
    assert!(!dir.path().join("extensions-collection").exists());

    let (mut stac, _) = Stac::read(dir.path().join("catalog.json").as_path()).unwrap();
    assert_eq!(ids(&mut stac).len(), 4);
}

#[test]
fn rebase_keeps_old_structure() {
    let dir = tempfile::tempdir().unwrap();
    let (stac, _) = Stac::read("data/catalog.json").unwrap();
    let layout = Layout::new(dir.path()).with_next_href(Rebase);
    stac.write(&layout, &Writer::default()).unwrap();

    assert!(dir.path().join("catalog.json").exists());
    assert!(dir.path().join("simple-item.json").exists());
    assert!(dir
        .path()
        .join("extensions-collection/proj-example/proj-example.json")
        .exists());
}

#[test]
fn added_items_are_written_with_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let (mut stac, root) = Stac::read("data/catalog.json").unwrap();
    let collection = stac
        .find(root, |object| object.id() == "simple-collection")
        .unwrap()
        .unwrap();
    let _ = stac.add_child(collection, Item::new("new-item")).unwrap();
    stac.write(&Layout::new(dir.path()), &Writer::default())
        .unwrap();

    let collection = stac::read(dir.path().join("simple-collection/collection.json").as_path())
        .unwrap();
    let item_hrefs: Vec<_> = collection
        .object
        .item_links()
        .map(|link| link.href.as_str())
        .collect();
    assert_eq!(
        item_hrefs,
        vec![
            "./simple-item/simple-item.json",
            "./core-item/core-item.json",
            "./new-item/new-item.json",
        ]
    );
}

#[test]
fn writer_rejects_urls() {
    let href_object = HrefObject::new(Item::new("an-item"), "https://example.com/an-item.json");
    let err = Writer::default().write(href_object).unwrap_err();
    assert_eq!(err.code, ErrorCode::WriteUnsupportedHref);
}

#[test]
fn dot_prefixed_href_lays_out_whole_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let (stac, _) = Stac::read("./data/catalog.json").unwrap();
    let href_objects = Layout::new(dir.path())
        .render(stac)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(href_objects.len(), 6);
    let root = &href_objects[0].object;
    assert_eq!(root.child_links().count(), 2);
}
