use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::inventory::RoadmapRequest;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = if args.input {
        schema_for!(RoadmapRequest)
    } else {
        schema_for!(Config)
    };
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{}", json);
    Ok(())
}
