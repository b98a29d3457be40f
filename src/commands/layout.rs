use clap::Args;
use serde::Serialize;

use stac::{HrefObject, Layout, NextHref, Rebase, Reader, Stac, Write, Writer};

use super::{open_tree, CmdResult, GlobalArgs};

#[derive(Args)]
pub struct LayoutArgs {
    /// Path or URL of any object in the catalog
    pub href: String,

    /// Directory the catalog is written under
    pub output_dir: String,

    /// Keep each object's location relative to the old root instead of the best-practices layout
    #[arg(long)]
    pub rebase: bool,

    /// Preview the new hrefs without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
pub struct LayoutOutput {
    pub root: String,
    pub dry_run: bool,
    pub count: usize,
    pub hrefs: Vec<String>,
}

pub fn run(args: LayoutArgs, global: &GlobalArgs) -> CmdResult<LayoutOutput> {
    let config = global.load_config()?;
    let (stac, _) = open_tree(&args.href, &config)?;
    let writer = Writer::new(&config);

    let layout = Layout::new(args.output_dir.as_str());
    let root = layout.root().to_string();
    let hrefs = if args.rebase {
        render(&layout.with_next_href(Rebase), stac, &writer, args.dry_run)?
    } else {
        render(&layout, stac, &writer, args.dry_run)?
    };

    Ok((
        LayoutOutput {
            root,
            dry_run: args.dry_run,
            count: hrefs.len(),
            hrefs,
        },
        0,
    ))
}

fn render<N: NextHref>(
    layout: &Layout<N>,
    stac: Stac<Reader>,
    writer: &Writer,
    dry_run: bool,
) -> stac::Result<Vec<String>> {
    let mut hrefs = Vec::new();
    for result in layout.render(stac) {
        let href_object: HrefObject = result?;
        hrefs.push(href_object.href.to_string());
        if !dry_run {
            writer.write(href_object)?;
        }
    }
    Ok(hrefs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let args = LayoutArgs {
            href: "data/catalog.json".to_string(),
            output_dir: output_dir.to_string_lossy().to_string(),
            rebase: false,
            dry_run: true,
        };
        let (output, code) = run(args, &GlobalArgs { config: None }).unwrap();
        assert_eq!(code, 0);
        assert_eq!(output.count, 6);
        assert!(output.hrefs[0].ends_with("out/catalog.json"));
        assert!(!output_dir.exists());
    }

    #[test]
    fn rebase_keeps_relative_locations() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("rebased");
        let args = LayoutArgs {
            href: "data/catalog.json".to_string(),
            output_dir: output_dir.to_string_lossy().to_string(),
            rebase: true,
            dry_run: false,
        };
        let (output, _) = run(args, &GlobalArgs { config: None }).unwrap();
        assert_eq!(output.count, 6);
        assert!(output_dir.join("catalog.json").exists());
        assert!(output_dir
            .join("extensions-collection/proj-example/proj-example.json")
            .exists());
    }

    #[test]
    fn config_file_controls_written_json() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("stac.json");
        std::fs::write(&config_path, r#"{"pretty": false}"#).unwrap();
        let output_dir = dir.path().join("compact");
        let args = LayoutArgs {
            href: "./data/catalog.json".to_string(),
            output_dir: output_dir.to_string_lossy().to_string(),
            rebase: false,
            dry_run: false,
        };
        let global = GlobalArgs {
            config: Some(config_path),
        };
        let (output, _) = run(args, &global).unwrap();
        assert_eq!(output.count, 6);
        let content = std::fs::read_to_string(output_dir.join("catalog.json")).unwrap();
        assert!(!content.contains('\n'));
    }

    #[test]
    fn invalid_config_stops_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("stac.json");
        std::fs::write(&config_path, r#"{"http_timeout_secs": 0}"#).unwrap();
        let args = LayoutArgs {
            href: "data/not-a-file.json".to_string(),
            output_dir: dir.path().join("out").to_string_lossy().to_string(),
            rebase: false,
            dry_run: true,
        };
        let global = GlobalArgs {
            config: Some(config_path),
        };
        let err = run(args, &global).err().unwrap();
        assert_eq!(err.code, stac::ErrorCode::ConfigInvalidValue);
    }
}
