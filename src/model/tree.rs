//! Gradient-boosted regression trees evaluated on the CPU.
//!
//! Models are read from the JSON dump format written by XGBoost's
//! `dump_model(..., dump_format="json")`, wrapped in a small envelope that
//! carries the base score:
//!
//! ```json
//! { "base_score": 0.5,
//!   "trees": [ { "nodeid": 0, "split": "snap_pct", "split_condition": 40.0,
//!                "yes": 1, "no": 2, "missing": 1,
//!                "children": [ { "nodeid": 1, "leaf": -0.4 },
//!                              { "nodeid": 2, "leaf": 0.9 } ] } ] }
//! ```
//!
//! Split names are resolved against the model's feature list once, at load
//! time, so evaluation is a plain index walk.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::DeviationModel;
use crate::error::{ForecastError, Result};


/// Node as it appears in the JSON dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub nodeid: u32,
    #[serde(default)]
    pub split: Option<String>,
    #[serde(default)]
    pub split_condition: Option<f64>,
    #[serde(default)]
    pub yes: Option<u32>,
    #[serde(default)]
    pub no: Option<u32>,
    #[serde(default)]
    pub missing: Option<u32>,
    #[serde(default)]
    pub leaf: Option<f64>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// Envelope stored in `xgboost_{POS}_deviation.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, row: &[f64]) -> Result<f64> {
        let mut idx = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf(value) => return Ok(*value),
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let x = row[*feature];
                    idx = if x.is_nan() {
                        *missing
                    } else if x < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
            }
        }
        Err(ForecastError::Prediction {
            message: "tree walk did not terminate".to_string(),
        })
    }
}

/// A compiled tree ensemble: `base_score + Σ leaf`.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    base_score: f64,
    trees: Vec<Tree>,
    n_features: usize,
}

impl TreeEnsemble {
    /// Compile a raw dump against the model's ordered feature names.
    pub fn compile(raw: &RawEnsemble, features: &[String]) -> Result<Self> {
        let trees = raw
            .trees
            .iter()
            .map(|root| compile_tree(root, features))
            .collect::<std::result::Result<Vec<_>, String>>()
            .map_err(|message| ForecastError::Prediction { message })?;

        Ok(Self {
            base_score: raw.base_score,
            trees,
            n_features: features.len(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P, features: &[String]) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let raw: RawEnsemble = serde_json::from_str(&content)?;
        Self::compile(&raw, features)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl DeviationModel for TreeEnsemble {
    fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(ForecastError::Prediction {
                message: format!(
                    "expected {} features, got {}",
                    self.n_features,
                    row.len()
                ),
            });
        }

        let mut total = self.base_score;
        for tree in &self.trees {
            total += tree.evaluate(row)?;
        }
        Ok(total)
    }
}

fn resolve_feature(split: &str, features: &[String]) -> std::result::Result<usize, String> {
    if let Some(idx) = features.iter().position(|f| f == split) {
        return Ok(idx);
    }
    split
        .strip_prefix('f')
        .and_then(|rest| rest.parse::<usize>().ok())
        .filter(|idx| *idx < features.len())
        .ok_or_else(|| format!("unknown split feature {}", split))
}

fn flatten<'a>(node: &'a RawNode, out: &mut Vec<&'a RawNode>) {
    out.push(node);
    for child in &node.children {
        flatten(child, out);
    }
}

fn compile_tree(root: &RawNode, features: &[String]) -> std::result::Result<Tree, String> {
    let mut raw_nodes = Vec::new();
    flatten(root, &mut raw_nodes);

    let index: HashMap<u32, usize> = raw_nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.nodeid, i))
        .collect();
    if index.len() != raw_nodes.len() {
        return Err("duplicate node ids in tree".to_string());
    }

    let lookup = |id: Option<u32>, what: &str, owner: u32| {
        id.and_then(|id| index.get(&id).copied())
            .ok_or_else(|| format!("node {} has no valid '{}' child", owner, what))
    };

    let nodes = raw_nodes
        .iter()
        .map(|n| {
            if let Some(value) = n.leaf {
                return Ok(Node::Leaf(value));
            }
            let split = n
                .split
                .as_deref()
                .ok_or_else(|| format!("node {} is neither leaf nor split", n.nodeid))?;
            let threshold = n
                .split_condition
                .ok_or_else(|| format!("node {} has no split_condition", n.nodeid))?;
            let yes = lookup(n.yes, "yes", n.nodeid)?;
            let no = lookup(n.no, "no", n.nodeid)?;
            let missing = lookup(n.missing.or(n.yes), "missing", n.nodeid)?;
            Ok(Node::Split {
                feature: resolve_feature(split, features)?,
                threshold,
                yes,
                no,
                missing,
            })
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;

    Ok(Tree { nodes })
}
