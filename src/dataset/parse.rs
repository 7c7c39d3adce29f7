use std::collections::HashSet;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_json::Value;

use super::{AuthorRecord, Dataset, Publication};

#[derive(Clone, Debug, Deserialize)]
struct RawAuthor {
    id: String,
    #[serde(default)]
    field: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawPublication {
    id: Value,
    #[serde(default)]
    authors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawAuthor>,
    #[serde(default)]
    publications: Vec<RawPublication>,
}

fn publication_id(value: &Value) -> Result<String> {
    match value {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(anyhow!(
            "publication id must be a string or a number, found {other}"
        )),
    }
}

pub(super) fn parse_dataset(raw: &str) -> Result<Dataset> {
    let parsed: RawDataset = serde_json::from_str(raw).context("invalid dataset JSON")?;

    let mut seen = HashSet::with_capacity(parsed.nodes.len());
    let mut authors = Vec::with_capacity(parsed.nodes.len());
    for node in parsed.nodes {
        if node.id.is_empty() {
            bail!("author entries must have a non-empty id");
        }
        if !seen.insert(node.id.clone()) {
            bail!("author id {:?} is listed more than once", node.id);
        }

        let field = node.field.filter(|field| !field.trim().is_empty());
        authors.push(AuthorRecord { id: node.id, field });
    }

    let publications = parsed
        .publications
        .into_iter()
        .enumerate()
        .map(|(position, publication)| {
            let id = publication_id(&publication.id)
                .with_context(|| format!("invalid publication at position {position}"))?;
            Ok(Publication {
                id,
                authors: publication.authors,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset {
        authors,
        publications,
    })
}
