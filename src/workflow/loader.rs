//! Workflow document decoding
//!
//! Turns downloaded bytes into a [`Workflow`], reporting structurally invalid
//! YAML and malformed `needs:` fields as distinct errors.

use serde_yaml::Value;

use super::Workflow;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("YAML parse error in {locator}: {error}")]
    MalformedDocument {
        locator: String,
        error: serde_yaml::Error,
    },

    #[error("invalid needs field in {locator}, job '{job}': expected a job id or a list of job ids, found {found}")]
    MalformedNeeds {
        locator: String,
        job: String,
        found: &'static str,
    },
}

pub struct WorkflowLoader;

impl WorkflowLoader {
    /// Decode a workflow or action document loaded from `source`.
    ///
    /// Composite action steps are promoted to a synthetic job, see
    /// [`Workflow::promote_composite_steps`].
    pub fn parse(source: &str, data: &[u8]) -> Result<Workflow, LoadError> {
        let malformed = |error| LoadError::MalformedDocument {
            locator: source.to_string(),
            error,
        };

        let value: Value = serde_yaml::from_slice(data).map_err(malformed)?;
        if value.is_null() {
            return Ok(Workflow::default().with_source(source));
        }

        check_needs(source, &value)?;

        let mut workflow: Workflow = serde_yaml::from_value(value).map_err(malformed)?;
        workflow.promote_composite_steps();
        Ok(workflow.with_source(source))
    }

    pub fn parse_str(source: &str, content: &str) -> Result<Workflow, LoadError> {
        Self::parse(source, content.as_bytes())
    }
}

fn check_needs(source: &str, document: &Value) -> Result<(), LoadError> {
    let Some(jobs) = document.get("jobs").and_then(Value::as_mapping) else {
        return Ok(());
    };

    for (name, job) in jobs {
        let Some(needs) = job.get("needs") else {
            continue;
        };
        let found = match needs {
            Value::Null | Value::String(_) => continue,
            Value::Sequence(items) if items.iter().all(Value::is_string) => continue,
            Value::Sequence(_) => "a list with non-string entries",
            Value::Mapping(_) => "a mapping",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::Tagged(_) => "a tagged value",
        };
        return Err(LoadError::MalformedNeeds {
            locator: source.to_string(),
            job: name.as_str().unwrap_or("?").to_string(),
            found,
        });
    }

    Ok(())
}
