// sylva-id3/tests/tennis.rs

use approx::assert_abs_diff_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;
use sylva::metrics::mean_std;
use sylva::prelude::*;
use sylva_datasets::{generate, tennis};
use sylva_id3::{information_gain, Id3Tree, TreeNode};

#[test]
fn tennis_tree_structure() {
    let dataset = tennis();
    let tree = Id3Tree::params().target("play").fit(&dataset).unwrap();

    let root = tree.root_node();
    assert_eq!(root.attribute(), Some("outlook"));
    assert_abs_diff_eq!(root.gain().unwrap(), 0.2467, epsilon = 1e-4);

    let branches = root.branches().unwrap();
    assert_eq!(branches["overcast"], TreeNode::leaf("yes"));
    assert_eq!(branches["sunny"].attribute(), Some("humidity"));
    assert_eq!(branches["rain"].attribute(), Some("wind"));

    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.num_leaves(), 5);
    assert_eq!(tree.features(), vec!["humidity", "outlook", "wind"]);
}

#[test]
fn tennis_gains() {
    let dataset = tennis();

    let gain = |attribute: &str| information_gain(&dataset, attribute, "play").unwrap();
    assert_abs_diff_eq!(gain("outlook"), 0.2467, epsilon = 1e-4);
    assert_abs_diff_eq!(gain("humidity"), 0.1518, epsilon = 1e-4);
    assert_abs_diff_eq!(gain("wind"), 0.0481, epsilon = 1e-4);
    assert_abs_diff_eq!(gain("temperature"), 0.0292, epsilon = 1e-4);
}

#[test]
fn tennis_training_accuracy() {
    let dataset = tennis();
    let tree = Id3Tree::params().target("play").fit(&dataset).unwrap();

    let cm = tree
        .predict(&dataset)
        .confusion_matrix(dataset.column("play").unwrap())
        .unwrap();

    assert_abs_diff_eq!(cm.accuracy(), 1.0);
    assert_eq!(cm.unknown(), 0);
}

#[test]
fn tennis_rules() {
    let dataset = tennis();
    let tree = Id3Tree::params().target("play").fit(&dataset).unwrap();

    let rules: Vec<String> = tree.rules().iter().map(|rule| rule.to_string()).collect();
    assert_eq!(rules.len(), tree.num_leaves());
    assert!(rules.contains(&"IF outlook EQUALS overcast THEN yes".to_string()));
    assert!(rules.contains(&"IF outlook EQUALS sunny AND humidity EQUALS high THEN no".to_string()));
    assert!(rules.contains(&"IF outlook EQUALS rain AND wind EQUALS strong THEN no".to_string()));

    // every training record is matched by exactly one rule, which agrees with the tree
    for row in dataset.rows() {
        let matching: Vec<_> = tree.rules().into_iter().filter(|r| r.matches(&row)).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(Some(matching[0].label()), tree.predict_record(&row));
    }
}

#[test]
fn tennis_depth_limits() {
    let dataset = tennis();

    let stump = Id3Tree::params()
        .target("play")
        .max_depth(Some(0))
        .fit(&dataset)
        .unwrap();
    assert_eq!(stump.root_node(), &TreeNode::leaf("yes"));
    assert_eq!(stump.rules()[0].to_string(), "THEN yes");

    let shallow = Id3Tree::params()
        .target("play")
        .max_depth(Some(1))
        .fit(&dataset)
        .unwrap();
    assert_eq!(shallow.depth(), 1);

    let branches = shallow.root_node().branches().unwrap();
    assert_eq!(branches["sunny"], TreeNode::leaf("no"));
    assert_eq!(branches["rain"], TreeNode::leaf("yes"));

    let accuracy = shallow
        .predict(&dataset)
        .confusion_matrix(dataset.column("play").unwrap())
        .unwrap()
        .accuracy();
    assert_abs_diff_eq!(accuracy, 10. / 14., epsilon = 1e-6);
}

#[test]
fn predict_from_map() {
    let tree = Id3Tree::params().target("play").fit(&tennis()).unwrap();

    let mut day = HashMap::new();
    day.insert("outlook", "sunny");
    day.insert("humidity", "normal");
    assert_eq!(tree.predict(&day), Some("yes".to_string()));

    day.insert("outlook", "foggy");
    assert_eq!(tree.predict(&day), None);
}

#[test]
fn tennis_cross_validation() {
    let dataset = tennis().shuffle(&mut SmallRng::seed_from_u64(42));

    let accuracies: Vec<f32> = dataset
        .fold(7)
        .unwrap()
        .into_iter()
        .map(|(train, valid)| {
            let tree = Id3Tree::params().target("play").fit(&train).unwrap();
            tree.predict(&valid)
                .confusion_matrix(valid.column("play").unwrap())
                .unwrap()
                .accuracy()
        })
        .collect();

    assert_eq!(accuracies.len(), 7);
    assert!(accuracies.iter().all(|acc| (0.0..=1.0).contains(acc)));

    let (mean, std) = mean_std(&accuracies);
    assert!((0.0..=1.0).contains(&mean));
    assert!(std >= 0.0);
}

#[test]
fn disjunction_is_learned_with_two_levels() {
    let mut rng = SmallRng::seed_from_u64(42);
    let (train, valid) = generate::disjunction(400, 5, 2, &mut rng).split_with_ratio(0.8);

    let tree = Id3Tree::params().max_depth(Some(2)).fit(&train).unwrap();

    let cm = tree
        .predict(&valid)
        .confusion_matrix(valid.column("label").unwrap())
        .unwrap();

    assert!(
        cm.accuracy() >= 0.99,
        "Expected perfect accuracy on generated data, got {:.2}",
        cm.accuracy()
    );
}
