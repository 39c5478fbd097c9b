use std::collections::HashMap;

use crate::model::Edge;

/// Depth of every node reachable from `root`, following edges
/// source → target in edge order. The first visit fixes a node's depth and
/// it is never revisited, so this is DFS discovery depth rather than the
/// shortest path. Unreachable nodes are absent.
pub fn hierarchy_depths(root: &str, edges: &[Edge]) -> HashMap<String, u32> {
	let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
	for edge in edges {
		children.entry(edge.source.as_str()).or_default().push(edge.target.as_str());
	}

	let mut depths: HashMap<String, u32> = HashMap::new();
	depths.insert(root.to_string(), 0);
	let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

	while let Some(frame) = stack.last_mut() {
		let (node, cursor) = *frame;
		frame.1 += 1;
		match children.get(node).and_then(|c| c.get(cursor)) {
			Some(&child) => {
				if !depths.contains_key(child) {
					let depth = depths[node] + 1;
					depths.insert(child.to_string(), depth);
					stack.push((child, 0));
				}
			}
			None => {
				stack.pop();
			}
		}
	}
	depths
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn edge(source: &str, target: &str) -> Edge {
		Edge {
			id: format!("{source}-{target}"),
			source: source.into(),
			target: target.into(),
		}
	}

	#[test]
	fn first_discovered_path_wins() {
		// r -> a -> b -> c, and r -> c directly (listed later)
		let edges = [edge("r", "a"), edge("a", "b"), edge("b", "c"), edge("r", "c")];
		let depths = hierarchy_depths("r", &edges);
		assert_eq!(depths["r"], 0);
		assert_eq!(depths["a"], 1);
		assert_eq!(depths["b"], 2);
		assert_eq!(depths["c"], 3);
	}

	#[test]
	fn unreachable_nodes_are_absent() {
		let edges = [edge("r", "a"), edge("x", "y"), edge("a", "r")];
		let depths = hierarchy_depths("r", &edges);
		assert_eq!(depths.len(), 2);
		assert!(!depths.contains_key("x"));
		assert!(!depths.contains_key("y"));
	}

	proptest! {
		#[test]
		fn depths_are_deterministic(pairs in proptest::collection::vec((0u8..8, 0u8..8), 0..30)) {
			let edges: Vec<Edge> = pairs
				.iter()
				.map(|(s, t)| edge(&format!("n{s}"), &format!("n{t}")))
				.collect();
			let first = hierarchy_depths("n0", &edges);
			let second = hierarchy_depths("n0", &edges);
			prop_assert_eq!(&first, &second);
			prop_assert_eq!(first.get("n0"), Some(&0));
		}
	}
}
