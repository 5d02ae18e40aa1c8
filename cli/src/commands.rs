use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sylva::metrics::mean_std;
use sylva::prelude::*;
use sylva_datasets::{load_csv, Config};
use sylva_id3::{Id3Params, Id3Tree};
use tracing::{debug, info};

fn params(config: &Config, max_depth: Option<usize>) -> Id3Params {
    Id3Tree::params()
        .target(config.target_attribute.as_str())
        .max_depth(max_depth.or(config.max_depth))
}

fn read_config(path: &Path) -> Result<(Config, Dataset)> {
    let config = Config::from_path(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    let dataset = config
        .load_dataset()
        .with_context(|| format!("failed to load {}", config.data_file.display()))?;

    Ok((config, dataset))
}

/// Fraction of records in `dataset` labelled correctly by `tree`
pub fn accuracy(tree: &Id3Tree, dataset: &Dataset) -> Result<f32> {
    let truth = dataset.column(tree.target())?;
    let cm = tree.predict(dataset).confusion_matrix(truth)?;

    Ok(cm.accuracy())
}

/// Fit a tree on the configured dataset and render it with its rules
///
/// With `json` the fitted tree is serialized instead.
pub fn train(config: &Path, max_depth: Option<usize>, json: bool) -> Result<String> {
    let (config, dataset) = read_config(config)?;
    let tree = params(&config, max_depth).fit(&dataset)?;

    if json {
        return Ok(serde_json::to_string_pretty(&tree)?);
    }

    let mut out = format!("{}\nrules:\n", tree);
    for rule in tree.rules() {
        out.push_str(&format!("  {}\n", rule));
    }
    out.push_str(&format!(
        "training accuracy: {:.4} ({} samples)",
        accuracy(&tree, &dataset)?,
        dataset.nsamples()
    ));

    Ok(out)
}

/// Fit a tree on the configured dataset and score it on a held-out CSV file
pub fn evaluate(config: &Path, test: &Path, max_depth: Option<usize>) -> Result<String> {
    let (config, train) = read_config(config)?;
    let tree = params(&config, max_depth).fit(&train)?;

    let test = load_csv(test)
        .with_context(|| format!("failed to load {}", test.display()))?
        .project(train.header())?;

    let cm = tree
        .predict(&test)
        .confusion_matrix(test.column(tree.target())?)?;

    info!(
        "evaluated {} samples, {} without prediction",
        cm.nsamples(),
        cm.unknown()
    );

    Ok(format!(
        "{:?}\naccuracy: {:.4}\nunknown: {}",
        cm,
        cm.accuracy(),
        cm.unknown()
    ))
}

/// Validation accuracies of one depth limit over all folds
#[derive(Debug, Clone, PartialEq)]
pub struct DepthScore {
    pub max_depth: usize,
    pub accuracies: Vec<f32>,
    pub mean: f32,
    pub std: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossValidation {
    pub folds: usize,
    pub scores: Vec<DepthScore>,
}

impl CrossValidation {
    /// The depth limit with the highest mean accuracy, the smallest depth on ties
    pub fn best(&self) -> Option<&DepthScore> {
        self.scores.iter().fold(None, |best, score| match best {
            Some(b)
                if b.mean > score.mean
                    || (b.mean == score.mean && b.max_depth <= score.max_depth) =>
            {
                Some(b)
            }
            _ => Some(score),
        })
    }
}

impl fmt::Display for CrossValidation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-fold cross-validation", self.folds)?;
        for score in &self.scores {
            writeln!(
                f,
                "  max depth {:>3}: accuracy {:.4} +/- {:.4}",
                score.max_depth, score.mean, score.std
            )?;
        }
        if let Some(best) = self.best() {
            write!(f, "best max depth: {} ({:.4})", best.max_depth, best.mean)?;
        }

        Ok(())
    }
}

/// Score every depth limit with k-fold cross-validation on the shuffled dataset
pub fn cross_validate(
    config: &Path,
    folds: usize,
    depths: &[usize],
    seed: u64,
) -> Result<CrossValidation> {
    if depths.is_empty() {
        bail!("at least one depth limit is required");
    }

    let (config, dataset) = read_config(config)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let splits = dataset.shuffle(&mut rng).fold(folds)?;

    let mut scores = Vec::with_capacity(depths.len());
    for &max_depth in depths {
        let params = params(&config, Some(max_depth));

        let accuracies = splits
            .iter()
            .map(|(train, valid)| {
                let tree = params.fit(train)?;
                accuracy(&tree, valid)
            })
            .collect::<Result<Vec<_>>>()?;

        let (mean, std) = mean_std(&accuracies);
        debug!("max depth {}: fold accuracies {:?}", max_depth, accuracies);

        scores.push(DepthScore {
            max_depth,
            accuracies,
            mean,
            std,
        });
    }

    Ok(CrossValidation { folds, scores })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TENNIS: &str = "\
outlook,temperature,humidity,wind,play
sunny,hot,high,weak,no
sunny,hot,high,strong,no
overcast,hot,high,weak,yes
rain,mild,high,weak,yes
rain,cool,normal,weak,yes
rain,cool,normal,strong,no
overcast,cool,normal,strong,yes
sunny,mild,high,weak,no
sunny,cool,normal,weak,yes
rain,mild,normal,weak,yes
sunny,mild,normal,strong,yes
overcast,mild,high,strong,yes
overcast,hot,normal,weak,yes
rain,mild,high,strong,no
";

    fn setup(config: &str) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tennis.csv"), TENNIS).unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, config).unwrap();

        (dir, path)
    }

    const CONFIG: &str = r#"{
        "data_file": "tennis.csv",
        "data_project_columns": ["outlook", "humidity", "wind", "play"],
        "target_attribute": "play"
    }"#;

    #[test]
    fn train_renders_tree_and_rules() {
        let (_dir, config) = setup(CONFIG);
        let out = train(&config, None, false).unwrap();

        assert!(out.starts_with("split on outlook"));
        assert!(out.contains("IF outlook EQUALS overcast THEN yes"));
        assert!(out.ends_with("training accuracy: 1.0000 (14 samples)"));
    }

    #[test]
    fn train_as_json() {
        let (_dir, config) = setup(CONFIG);
        let out = train(&config, Some(0), true).unwrap();

        let tree: Id3Tree = serde_json::from_str(&out).unwrap();
        assert_eq!(tree.target(), "play");
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn evaluate_on_held_out_file() {
        let (dir, config) = setup(CONFIG);
        let test = dir.path().join("test.csv");
        fs::write(
            &test,
            "play,wind,humidity,outlook,temperature\nyes,weak,normal,sunny,hot\nno,weak,high,foggy,hot\n",
        )
        .unwrap();

        let out = evaluate(&config, &test, None).unwrap();
        assert!(out.contains("accuracy: 0.5000"));
        assert!(out.ends_with("unknown: 1"));
    }

    #[test]
    fn cross_validation_scores_every_depth() {
        let (_dir, config) = setup(CONFIG);
        let cv = cross_validate(&config, 7, &[2, 0, 1], 42).unwrap();

        assert_eq!(cv.scores.len(), 3);
        assert!(cv.scores.iter().all(|s| s.accuracies.len() == 7));
        assert!(cv.best().is_some());
        assert!(cv.to_string().starts_with("7-fold cross-validation"));

        let again = cross_validate(&config, 7, &[2, 0, 1], 42).unwrap();
        assert_eq!(cv, again);
    }

    #[test]
    fn best_prefers_shallow_trees_on_ties() {
        let score = |max_depth, mean| DepthScore {
            max_depth,
            accuracies: vec![mean],
            mean,
            std: 0.0,
        };
        let cv = CrossValidation {
            folds: 2,
            scores: vec![score(5, 0.8), score(2, 0.8), score(1, 0.6)],
        };

        assert_eq!(cv.best().unwrap().max_depth, 2);
    }

    #[test]
    fn too_many_folds() {
        let (_dir, config) = setup(CONFIG);

        assert!(cross_validate(&config, 15, &[1], 0).is_err());
        assert!(cross_validate(&config, 2, &[], 0).is_err());
    }
}
