mod report;

pub use report::build_markdown;

use crate::error::OutputError;
use crate::planner::ProjectPlan;
use std::fs;
use std::path::{Path, PathBuf};

/// Pretty-printed JSON document for a plan
pub fn render_json(plan: &ProjectPlan) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Write the plan JSON to `output`, or to stdout when no path is given
pub fn write_plan(plan: &ProjectPlan, output: Option<&Path>) -> Result<(), OutputError> {
    let json = render_json(plan)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(OutputError::CreateDir)?;
            }
            fs::write(path, format!("{}\n", json)).map_err(OutputError::WriteReport)?;
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Write `roadmap.json` and `roadmap.md` into `report_dir`
pub fn write_report_dir(
    report_dir: &Path,
    plan: &ProjectPlan,
) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let json_path = report_dir.join("roadmap.json");
    fs::write(&json_path, format!("{}\n", render_json(plan)?)).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join("roadmap.md");
    fs::write(&md_path, build_markdown(plan)).map_err(OutputError::WriteReport)?;

    Ok(vec![json_path, md_path])
}
