use std::collections::VecDeque;
use std::iter::Iterator;

use super::TreeNode;

/// Level-order (BFT) iterator of nodes in a decision tree
pub struct NodeIter<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> NodeIter<'a> {
    pub fn new(root: &'a TreeNode) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);

        NodeIter { queue }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            node.children()
                .into_iter()
                .for_each(|child| self.queue.push_back(child));

            node
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn visits_levels_in_order() {
        let mut inner = BTreeMap::new();
        inner.insert("strong".to_string(), TreeNode::leaf("no"));
        inner.insert("weak".to_string(), TreeNode::leaf("yes"));

        let mut children = BTreeMap::new();
        children.insert(
            "rain".to_string(),
            TreeNode::Decision {
                attribute: "wind".to_string(),
                gain: 0.97,
                children: inner,
            },
        );
        children.insert("overcast".to_string(), TreeNode::leaf("yes"));

        let root = TreeNode::Decision {
            attribute: "outlook".to_string(),
            gain: 0.25,
            children,
        };

        let visited: Vec<_> = NodeIter::new(&root)
            .map(|node| node.attribute().or_else(|| node.prediction()).unwrap())
            .collect();

        assert_eq!(visited, vec!["outlook", "yes", "wind", "no", "yes"]);
    }
}
