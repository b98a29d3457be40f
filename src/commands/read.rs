use clap::Args;
use serde::Serialize;

use stac::{Read, Reader};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ReadArgs {
    /// Path or URL of a STAC object
    pub href: String,
}

#[derive(Serialize)]
pub struct ReadOutput {
    pub href: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub object: serde_json::Value,
}

pub fn run(args: ReadArgs, global: &GlobalArgs) -> CmdResult<ReadOutput> {
    let config = global.load_config()?;
    let href_object = Reader::new(&config).read(args.href.as_str())?;
    let object = &href_object.object;

    Ok((
        ReadOutput {
            href: href_object.href.to_string(),
            type_name: object.type_name().to_string(),
            id: object.id().to_string(),
            title: object.title().map(String::from),
            object: object.to_value()?,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fixture_item() {
        let global = GlobalArgs { config: None };
        let args = ReadArgs {
            href: "data/simple-item.json".to_string(),
        };
        let (output, code) = run(args, &global).unwrap();
        assert_eq!(code, 0);
        assert_eq!(output.type_name, "Feature");
        assert_eq!(output.id, "simple-item");
        assert_eq!(output.object["id"], "simple-item");
    }
}
