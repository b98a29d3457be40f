use clap::Args;
use glob_match::glob_match;
use serde::Serialize;

use super::{open_tree, CmdResult, GlobalArgs};

#[derive(Args)]
pub struct WalkArgs {
    /// Path or URL of any object in the catalog
    pub href: String,

    /// Only list objects whose id matches this glob (e.g. "simple-*")
    #[arg(long, value_name = "GLOB")]
    pub filter: Option<String>,
}

#[derive(Serialize)]
pub struct WalkEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub depth: usize,
}

#[derive(Serialize)]
pub struct WalkOutput {
    pub root: Option<String>,
    pub count: usize,
    pub objects: Vec<WalkEntry>,
}

pub fn run(args: WalkArgs, global: &GlobalArgs) -> CmdResult<WalkOutput> {
    let config = global.load_config()?;
    let (mut stac, _) = open_tree(&args.href, &config)?;
    let root = stac.root();
    let root_href = stac.href(root).map(|href| href.to_string());

    let mut objects = Vec::new();
    for result in stac.walk(root, |stac, handle| {
        let mut depth = 0;
        let mut current = handle;
        while let Some(parent) = stac.parent(current) {
            depth += 1;
            current = parent;
        }
        let href = stac.href(handle).map(|href| href.to_string());
        let object = stac.get(handle)?;
        Ok(WalkEntry {
            id: object.id().to_string(),
            type_name: object.type_name().to_string(),
            href,
            depth,
        })
    }) {
        let entry = result?;
        if let Some(pattern) = &args.filter {
            if !glob_match(pattern, &entry.id) {
                continue;
            }
        }
        objects.push(entry);
    }

    Ok((
        WalkOutput {
            root: root_href,
            count: objects.len(),
            objects,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> GlobalArgs {
        GlobalArgs { config: None }
    }

    #[test]
    fn walks_from_an_item_to_the_whole_catalog() {
        let args = WalkArgs {
            href: "data/simple-item.json".to_string(),
            filter: None,
        };
        let (output, _) = run(args, &global()).unwrap();
        assert_eq!(output.count, 6);
        assert_eq!(output.objects[0].id, "examples");
        assert_eq!(output.objects[0].depth, 0);
        let item = output
            .objects
            .iter()
            .find(|entry| entry.id == "proj-example")
            .unwrap();
        assert_eq!(item.depth, 2);
        assert_eq!(item.type_name, "Feature");
    }

    #[test]
    fn filter_keeps_matching_ids() {
        let args = WalkArgs {
            href: "data/catalog.json".to_string(),
            filter: Some("*-item".to_string()),
        };
        let (output, _) = run(args, &global()).unwrap();
        let ids: Vec<_> = output.objects.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["simple-item", "core-item"]);
    }

    #[test]
    fn dot_prefixed_href_walks_every_object_once() {
        let args = WalkArgs {
            href: "./data/simple-item.json".to_string(),
            filter: None,
        };
        let (output, _) = run(args, &global()).unwrap();
        assert_eq!(output.count, 6);
        assert_eq!(output.root.as_deref(), Some("data/catalog.json"));
        let items = output
            .objects
            .iter()
            .filter(|entry| entry.id == "simple-item")
            .count();
        assert_eq!(items, 1);
    }
}
